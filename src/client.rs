//! Authenticated update request.

use crate::config::Credentials;
use crate::error::{error_chain, DdnsError, Result};
use reqwest::{StatusCode, Url};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Raw provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl UpdateResponse {
    /// Body as text, lossily decoded.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The body if the status is exactly 200, a status error otherwise.
    pub fn into_success(self) -> Result<Vec<u8>> {
        if self.status == StatusCode::OK {
            return Ok(self.body);
        }
        Err(DdnsError::Status {
            status: self.status.to_string(),
            body: self.text(),
        })
    }
}

/// Client for the update endpoint.
///
/// Sends exactly one request per [`UpdateClient::update`] call; there is no
/// retry and the HTTP client's default timeouts apply.
pub struct UpdateClient {
    client: reqwest::Client,
}

impl UpdateClient {
    /// Create a new update client.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DdnsError::RequestConstruction(error_chain(&e)))?;
        Ok(Self { client })
    }

    /// GET `url` with Basic authentication and collect the response.
    pub async fn update(&self, url: Url, credentials: &Credentials) -> Result<UpdateResponse> {
        let request = self
            .client
            .get(url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .build()
            .map_err(|e| DdnsError::RequestConstruction(error_chain(&e)))?;

        tracing::debug!("GET {}", request.url());

        let response = self.client.execute(request).await.map_err(|e| {
            if e.is_builder() {
                DdnsError::RequestConstruction(error_chain(&e))
            } else {
                DdnsError::Transport(error_chain(&e))
            }
        })?;

        let status = response.status();
        tracing::debug!("Response status {}", status);

        let body = response
            .bytes()
            .await
            .map_err(|e| DdnsError::ResponseRead(error_chain(&e)))?;

        Ok(UpdateResponse {
            status,
            body: body.to_vec(),
        })
    }
}
