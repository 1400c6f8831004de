//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration could not be read or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Credential or client setup failed in the RentCast layer.
    #[error(transparent)]
    Rentcast(#[from] rentcast::Error),

    /// The MCP service failed to start or stopped abnormally.
    #[error("MCP server error: {0}")]
    Serve(String),

    /// The tool catalog could not be rendered.
    #[error("failed to render tool catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
