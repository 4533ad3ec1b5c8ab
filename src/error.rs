use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors raised while talking to the enrollment API.
///
/// Only [`EnrollError::MalformedProfile`] and profile-time transport failures
/// are ever fatal for a submitter; everything else is absorbed into the
/// polling loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnrollError {
    #[error("malformed profile response: {0}")]
    MalformedProfile(String),

    #[error("malformed enrollment detail: {0}")]
    MalformedDetail(String),

    #[error("malformed submit response: {0}")]
    MalformedSubmitResponse(String),

    #[error("malformed history response: {0}")]
    MalformedHistory(String),

    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Enroll(#[from] EnrollError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Collapse any error into the transport bucket of [`EnrollError`].
    ///
    /// Submitter code only cares whether a call produced a usable payload, so
    /// HTTP, decoding and URL failures are all flattened here.
    #[must_use]
    pub fn into_enroll(self) -> EnrollError {
        match self {
            Error::Enroll(inner) => inner,
            other => EnrollError::Transport(other.to_string()),
        }
    }
}
