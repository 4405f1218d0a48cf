use thiserror::Error;

/// Main error type for MatchCount operations
#[derive(Error, Debug)]
pub enum Error {
    /// The upstream could not be reached; carries the transport's own message
    #[error("{0}")]
    Transport(String),

    /// The upstream answered with something we cannot interpret.
    /// The reason is logged, never shown to callers.
    #[error("could not parse upstream API")]
    UpstreamResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if error came from an unreadable upstream payload
    pub fn is_upstream_response(&self) -> bool {
        matches!(self, Error::UpstreamResponse(_))
    }

    /// Check if error is a transport failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::UpstreamResponse(err.to_string())
    }
}
