//! Media server connection settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_url() -> String {
    String::from("http://localhost:9999")
}

fn default_graphql_path() -> String {
    String::from("/graphql")
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("tally/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Base URL of the media server (scheme + host + port).
    #[serde(default = "default_url")]
    pub url: String,

    /// Path of the GraphQL endpoint, joined onto `url`.
    #[serde(default = "default_graphql_path")]
    pub graphql_path: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            graphql_path: default_graphql_path(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ServerConfig {
    /// Full GraphQL endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), self.graphql_path)
    }

    /// Reject settings that cannot form a usable endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when `url` is blank or
    /// `graphql_path` does not start with `/`, and
    /// [`ConfigError::UnsupportedScheme`] when `url` is not http(s).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "server.url".into(),
                reason: "must not be empty".into(),
            });
        }
        let url = self.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::UnsupportedScheme {
                url: url.to_string(),
            });
        }
        if !self.graphql_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "server.graphql_path".into(),
                reason: format!("must start with '/', got '{}'", self.graphql_path),
            });
        }
        Ok(())
    }
}
