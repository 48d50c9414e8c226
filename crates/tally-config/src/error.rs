//! Errors raised while loading or validating tally configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source failed to parse, or the merged values did not fit the schema.
    #[error("failed to load configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A field parsed but its value is unusable.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// The media server URL is not an http(s) URL.
    #[error("server.url must start with http:// or https://, got '{url}'")]
    UnsupportedScheme { url: String },
}
