use thiserror::Error;

/// The primary error type for console actions.
///
/// Every controller action catches its own error and renders it as text, so
/// these variants mostly exist to keep the message and its origin apart.
/// Transport failures and application-reported failures end up looking the
/// same to the user.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The request never produced a usable response (connection, TLS, timeout).
    #[error("{0}")]
    Transport(String),
    /// The API answered with `status != "success"` or a non-2xx status code.
    #[error("{message}")]
    Api {
        /// HTTP status code, if the failure came from a response.
        status: Option<u16>,
        /// The message carried by the response, or a generic one.
        message: String,
    },
    /// The response body did not have the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),
    /// User input rejected before any request was issued.
    #[error("{0}")]
    InvalidInput(String),
    /// Restore requested without a successful search.
    #[error("No document selected for restoration")]
    NoSelection,
    /// Manual page jump outside the last known page range.
    #[error("Please enter a valid page number between 1 and {total_pages}")]
    PageOutOfRange {
        /// The page the user asked for.
        requested: i64,
        /// Total pages known when the input was made.
        total_pages: u32,
    },
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConsoleError {
    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        ConsoleError::Api { status, message: message.into() }
    }
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ConsoleError::Decode(err.to_string())
        } else {
            ConsoleError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        ConsoleError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for ConsoleError {
    fn from(err: std::io::Error) -> Self {
        ConsoleError::Io(format!("{}: {}", err.kind(), err))
    }
}

/// A type alias for `Result<T, ConsoleError>`, used throughout the crate.
pub type ConsoleResult<T> = Result<T, ConsoleError>;
