use thiserror::Error;

/// JSON-RPC error code for an unknown block hash or transaction id.
pub const RPC_INVALID_ADDRESS_OR_KEY: i64 = -5;
/// JSON-RPC error code for out-of-range arguments such as a height past the tip.
pub const RPC_INVALID_PARAMETER: i64 = -8;

/// Coarse classification used at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Unavailable,
    Malformed,
}

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("Invalid hash: {0:?}")]
    InvalidHash(String),

    #[error("Invalid block height: {0}")]
    InvalidHeight(String),

    #[error("Unknown search value: {0}")]
    UnknownSearchTerm(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Chain data unavailable while walking block {step}: {source}")]
    DataUnavailable {
        step: usize,
        #[source]
        source: Box<ExplorerError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ExplorerError>;

impl ExplorerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidHash(_) | Self::InvalidHeight(_) | Self::UnknownSearchTerm(_) => {
                ErrorKind::InvalidInput
            }
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Rpc { .. }
            | Self::Transport(_)
            | Self::Timeout
            | Self::DataUnavailable { .. }
            | Self::Config(_) => ErrorKind::Unavailable,
            Self::Malformed(_) => ErrorKind::Malformed,
        }
    }

    /// Maps a daemon-side error object onto the taxonomy.
    pub fn from_rpc(code: i64, message: String) -> Self {
        match code {
            RPC_INVALID_ADDRESS_OR_KEY | RPC_INVALID_PARAMETER => Self::NotFound(message),
            _ => Self::Rpc { code, message },
        }
    }
}

impl From<reqwest::Error> for ExplorerError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Self::Timeout
        } else if value.is_decode() {
            Self::Malformed(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}

impl From<serde_json::Error> for ExplorerError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value.to_string())
    }
}
