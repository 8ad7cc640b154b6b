// Error taxonomy shared by every layer of the crate. Each variant maps to
// one user-facing failure category; the binary turns any of them into a
// red message on stderr and exit code 1.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Config not found at {}. Run 'cl config init' to set up.", .0.display())]
    ConfigMissing(PathBuf),

    #[error("{0}")]
    ConfigInvalid(String),

    #[error("Could not reach ClickUp API. Check your connection.")]
    ConnectionFailure(#[source] reqwest::Error),

    #[error("Authentication failed. Check your API token (cl config init).")]
    AuthFailure,

    #[error("Resource not found: {path}")]
    NotFound { path: String },

    #[error("Rate limited by ClickUp API. Wait a moment and try again.")]
    RateLimited,

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Could not fetch user info. Check your API token.")]
    UserUnavailable,

    #[error("Alias '@{0}' not found. Use 'cl alias list' to see defined aliases.")]
    AliasNotFound(String),

    #[error("Alias '@{name}' is a {actual}, expected a {expected}.")]
    AliasTypeMismatch {
        name: String,
        actual: String,
        expected: String,
    },

    #[error("{0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response from ClickUp API: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Prompt failed: {0}")]
    Prompt(#[source] std::io::Error),
}
