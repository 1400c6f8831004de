use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("RENTCAST_API_KEY is not set")]
    MissingApiKey,

    #[error("invalid RentCast API key: expected 32 hexadecimal characters")]
    InvalidApiKey,

    #[error("config error: {0}")]
    Config(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("{tool}: {message}")]
    InvalidArgument { tool: String, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("RentCast API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// HTTP status behind this error, if the vendor answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
