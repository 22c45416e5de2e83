//! Error types for zoneedit-dyndns.

use thiserror::Error;

/// Result type alias for zoneedit-dyndns.
pub type Result<T> = std::result::Result<T, DdnsError>;

/// DDNS error types.
///
/// Every variant maps to a stable process exit code, see [`DdnsError::exit_code`].
#[derive(Error, Debug)]
pub enum DdnsError {
    /// Configuration file error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Positional arguments were given.
    #[error("unexpected arguments: {}", .0.join(" "))]
    UnexpectedArguments(Vec<String>),

    /// Username or password is empty.
    #[error("You must specify a username and password.")]
    MissingCredentials,

    /// Hostname was left at its placeholder default.
    #[error("You must specify a hostname.")]
    MissingHostname,

    /// Wildcard is neither `YES` nor `NO`.
    #[error("wildcard must be YES or NO (got {0:?}).")]
    InvalidWildcard(String),

    /// The request could not be built (bad endpoint URL, client setup).
    #[error("request construction failed: {0}")]
    RequestConstruction(String),

    /// The request could not be sent.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body could not be read.
    #[error("couldn't read response body: {0}")]
    ResponseRead(String),

    /// The provider answered with something other than 200.
    #[error("response status was: {status}\n\tresponse body was: {body}")]
    Status { status: String, body: String },
}

impl DdnsError {
    /// Process exit code for this error. Codes are stable for scripting.
    pub fn exit_code(&self) -> u8 {
        match self {
            DdnsError::Config(_) => 1,
            DdnsError::UnexpectedArguments(_) => 2,
            DdnsError::MissingCredentials => 3,
            DdnsError::MissingHostname => 4,
            DdnsError::InvalidWildcard(_) => 5,
            DdnsError::RequestConstruction(_) => 6,
            DdnsError::Transport(_) => 7,
            DdnsError::ResponseRead(_) => 8,
            DdnsError::Status { .. } => 9,
        }
    }

    /// Whether the usage text should accompany the message.
    pub fn is_usage(&self) -> bool {
        matches!(self.exit_code(), 2..=5)
    }
}

impl From<std::io::Error> for DdnsError {
    fn from(e: std::io::Error) -> Self {
        DdnsError::Config(e.to_string())
    }
}

impl From<toml::de::Error> for DdnsError {
    fn from(e: toml::de::Error) -> Self {
        DdnsError::Config(e.to_string())
    }
}

/// Render an error together with its `source()` chain.
///
/// reqwest keeps the interesting part (e.g. "Connection refused") in the
/// sources, not in its own `Display`.
pub fn error_chain(e: &(dyn std::error::Error + 'static)) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            DdnsError::Config("x".to_string()),
            DdnsError::UnexpectedArguments(vec!["x".to_string()]),
            DdnsError::MissingCredentials,
            DdnsError::MissingHostname,
            DdnsError::InvalidWildcard("maybe".to_string()),
            DdnsError::RequestConstruction("x".to_string()),
            DdnsError::Transport("x".to_string()),
            DdnsError::ResponseRead("x".to_string()),
            DdnsError::Status {
                status: "500 Internal Server Error".to_string(),
                body: String::new(),
            },
        ];
        let codes: HashSet<u8> = errors.iter().map(DdnsError::exit_code).collect();
        assert_eq!(codes.len(), errors.len());
        assert!(!codes.contains(&0));
    }

    #[test]
    fn test_usage_errors() {
        assert!(DdnsError::UnexpectedArguments(vec![]).is_usage());
        assert!(DdnsError::MissingCredentials.is_usage());
        assert!(DdnsError::MissingHostname.is_usage());
        assert!(DdnsError::InvalidWildcard("x".to_string()).is_usage());
        assert!(!DdnsError::Transport("x".to_string()).is_usage());
        assert!(!DdnsError::Config("x".to_string()).is_usage());
    }

    #[derive(Debug, Error)]
    #[error("error sending request")]
    struct Outer(#[source] std::io::Error);

    #[test]
    fn test_error_chain_includes_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused");
        let outer = Outer(inner);
        assert_eq!(error_chain(&outer), "error sending request: Connection refused");
    }

    #[test]
    fn test_status_message_carries_body() {
        let e = DdnsError::Status {
            status: "401 Unauthorized".to_string(),
            body: "bad auth".to_string(),
        };
        let text = e.to_string();
        assert!(text.contains("401 Unauthorized"));
        assert!(text.contains("bad auth"));
    }
}
