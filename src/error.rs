use thiserror::Error;

pub const RATE_LIMIT_MESSAGE: &str = "It looks like you've tried to search too many times. GitHub only lets us do 30 searches per minute. Try again in a minute :)";

/// Everything that can end a search request.
/// The `Display` output is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Not surfaced as a failure, the orchestrator clears results instead.
    #[error("Search text is empty")]
    EmptyQuery,

    #[error("{}", RATE_LIMIT_MESSAGE)]
    RateLimited,

    #[error("Oops, it looks like something went wrong... HTTP Status {status}: {status_text}")]
    RequestFailed { status: u16, status_text: String },

    #[error("Oops, it looks like something went wrong... {0}")]
    Transport(String),

    #[error("Oops, it looks like something went wrong... Unexpected response from GitHub: {0}")]
    Normalization(String),
}

impl SearchError {
    /// Maps a non-200 status to the matching failure kind.
    pub fn from_status(status: u16, status_text: &str) -> Self {
        if status == 403 {
            SearchError::RateLimited
        } else {
            SearchError::RequestFailed {
                status,
                status_text: status_text.to_owned(),
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("'{0}' is not set, add it to the .env")]
    Missing(&'static str),

    #[error("Invalid value '{value}' for '{key}'")]
    Invalid { key: &'static str, value: String },
}
