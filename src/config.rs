//! Configuration management for zoneedit-dyndns.
//!
//! Settings are layered, lowest precedence first: built-in defaults, the
//! optional TOML config file, environment variables, command-line flags.

use crate::cli::Cli;
use crate::error::{DdnsError, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default update endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://dynamic.zoneedit.com/dyn/jsclient.php";

/// Placeholder hostname; a real one must be supplied.
pub const DEFAULT_HOSTNAME: &str = "myhost.example.com";

/// Accepted wildcard values.
pub const WILDCARD_VALUES: [&str; 2] = ["YES", "NO"];

/// A named value sent in the update query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameter {
    /// Literal query-string key.
    pub name: &'static str,
    /// Current value.
    pub value: String,
    /// Built-in default.
    pub default: &'static str,
    /// Command-line flag that sets it.
    pub flag: &'static str,
    /// Environment variable that sets it.
    pub env: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

impl QueryParameter {
    const fn new(
        name: &'static str,
        default: &'static str,
        flag: &'static str,
        env: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            value: String::new(),
            default,
            flag,
            env,
            description,
        }
    }

    /// The full parameter set, in query order, holding default values.
    pub fn defaults() -> Vec<QueryParameter> {
        [
            QueryParameter::new(
                "rsp_ident",
                "zoneedit",
                "service",
                "DYNDNS_SERVICE",
                "DNS service hosting the domain",
            ),
            QueryParameter::new(
                "hostname",
                DEFAULT_HOSTNAME,
                "hostname",
                "DYNDNS_HOSTNAME",
                "fully qualified hostname to update",
            ),
            QueryParameter::new(
                "wildcard",
                "NO",
                "wildcard",
                "DYNDNS_WILDCARD",
                "specify YES to update the domain wildcard host",
            ),
        ]
        .into_iter()
        .map(|mut p| {
            p.value = p.default.to_string();
            p
        })
        .collect()
    }

    /// Whether the value is still the built-in default.
    pub fn is_default(&self) -> bool {
        self.value == self.default
    }
}

/// Username and password for HTTP Basic authentication.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Optional TOML config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub service: Option<String>,
    pub hostname: Option<String>,
    pub wildcard: Option<String>,
    pub endpoint: Option<String>,
    /// Username (or environment variable name if prefixed with $).
    pub username: Option<String>,
    /// Password (or environment variable name if prefixed with $).
    pub password: Option<String>,
    pub show_response: Option<bool>,
}

impl FileConfig {
    /// Get the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zoneedit-dyndns").join("config.toml"))
    }

    /// The default config file, if one is there.
    pub fn discover() -> Option<PathBuf> {
        Self::default_path().filter(|path| path.exists())
    }

    /// Load the config file at `path`, if any. The path must exist.
    pub fn load(path: Option<&Path>) -> Result<Option<Self>> {
        let Some(path) = path else {
            return Ok(None);
        };
        if !path.exists() {
            return Err(DdnsError::Config(format!(
                "config file {} does not exist",
                path.display()
            )));
        }

        tracing::debug!("Loading config from {}", path.display());
        Self::load_from(path).map(Some)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DdnsError::Config(format!("{}: {}", path.display(), e)))?;
        let config: FileConfig = toml::from_str(&content)?;
        Ok(config)
    }

    fn value_for(&self, flag: &str) -> Option<&String> {
        match flag {
            "service" => self.service.as_ref(),
            "hostname" => self.hostname.as_ref(),
            "wildcard" => self.wildcard.as_ref(),
            _ => None,
        }
    }
}

/// Fully resolved, immutable settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Query parameters, in query order.
    pub params: Vec<QueryParameter>,
    pub endpoint: String,
    pub credentials: Credentials,
    pub show_response: bool,
}

impl Settings {
    /// Merge defaults, config file, environment and flags.
    ///
    /// `env` looks up an environment variable; empty values count as unset.
    pub fn resolve(
        cli: &Cli,
        file: Option<&FileConfig>,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let env = |name: &str| env(name).filter(|v| !v.is_empty());
        let file = file.cloned().unwrap_or_default();

        let mut params = QueryParameter::defaults();
        for param in &mut params {
            let from_flag = match param.flag {
                "service" => cli.service.clone(),
                "hostname" => cli.hostname.clone(),
                "wildcard" => cli.wildcard.clone(),
                _ => None,
            };
            if let Some(value) = from_flag
                .or_else(|| env(param.env))
                .or_else(|| file.value_for(param.flag).cloned())
            {
                param.value = value;
            }
        }

        let credentials = Credentials {
            username: cli
                .username
                .clone()
                .or_else(|| file.username.as_deref().map(|v| resolve_env(v, &env)))
                .unwrap_or_default(),
            password: cli
                .password
                .clone()
                .or_else(|| file.password.as_deref().map(|v| resolve_env(v, &env)))
                .unwrap_or_default(),
        };

        Ok(Self {
            params,
            endpoint: cli
                .endpoint
                .clone()
                .or(file.endpoint)
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            credentials,
            show_response: cli.show_response.or(file.show_response).unwrap_or(true),
        })
    }

    /// Check the settings before any request is made.
    pub fn validate(&self) -> Result<()> {
        if self.credentials.username.is_empty() || self.credentials.password.is_empty() {
            return Err(DdnsError::MissingCredentials);
        }

        for param in &self.params {
            match param.name {
                "hostname" if param.is_default() => return Err(DdnsError::MissingHostname),
                "wildcard" if !WILDCARD_VALUES.contains(&param.value.as_str()) => {
                    return Err(DdnsError::InvalidWildcard(param.value.clone()))
                }
                _ => {}
            }
        }

        Ok(())
    }

    #[cfg(test)]
    fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

/// Resolve environment variable references (values starting with $).
fn resolve_env(value: &str, env: &dyn Fn(&str) -> Option<String>) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        env(var_name).unwrap_or_else(|| {
            tracing::warn!("Environment variable {} not set", var_name);
            String::new()
        })
    } else {
        value.to_string()
    }
}
