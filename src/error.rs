use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for failures of the data acquisition layer, as opposed to bad
    /// input or local misconfiguration.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Error::GitHubApi(_) | Error::UserNotFound(_) | Error::Network(_)
        )
    }

    /// Message shown to the person who typed the username.
    pub fn user_message(&self) -> String {
        match self {
            Error::UserNotFound(_) => "User not found".to_string(),
            e if e.is_fetch_failure() => {
                "Failed to fetch GitHub data. Please check the username and try again.".to_string()
            }
            e => e.to_string(),
        }
    }
}
