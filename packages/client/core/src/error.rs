use thiserror::Error;

/// Problems caught on the client before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Only CSV files can be uploaded.")]
    NotCsv,

    #[error("File size cannot exceed {limit_mb}MB.")]
    TooLarge { limit_mb: u64 },

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Please enter your {0}.")]
    MissingField(&'static str),

    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Every way a backend call can fail, as seen by the rest of the client.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("server returned {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },

    /// The backend rejected our credentials. The stored token is already
    /// gone by the time this is returned.
    #[error("authentication required")]
    Unauthorized { detail: Option<String> },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("i/o error: {0}")]
    Io(String),
}

impl ApiError {
    /// The most specific message worth showing to a user, or `fallback`.
    ///
    /// Validation errors and server details are specific; everything else
    /// (network trouble, timeouts, undecodable bodies) gets the fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Validation(err) => err.to_string(),
            ApiError::Server {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            ApiError::Unauthorized {
                detail: Some(detail),
            } if !detail.trim().is_empty() => detail.clone(),
            ApiError::Unauthorized { .. } => {
                "Your session has expired. Please log in again.".to_string()
            }
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
