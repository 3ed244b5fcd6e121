use std::fmt;

/// Error returned by every gateway operation.
///
/// The gateway does not retry or interpret failures; callers decide what to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The request never produced a response (connect, TLS, body read).
    Transport(String),
    /// The service answered with a non-success status.
    Status { status: u16, path: String },
    /// The response body did not have the expected shape.
    Decode(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Transport(msg) => write!(f, "transport error: {}", msg),
            GatewayError::Status { status, path } => {
                write!(f, "{} answered with status {}", path, status)
            }
            GatewayError::Decode(msg) => write!(f, "response decode error: {}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

impl GatewayError {
    /// Status code for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            let path = err
                .url()
                .map(|url| url.path().to_string())
                .unwrap_or_default();
            GatewayError::Status {
                status: status.as_u16(),
                path,
            }
        } else if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}
