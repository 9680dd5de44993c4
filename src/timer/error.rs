//! Timer API error types

use thiserror::Error;

/// Timer API error with classification
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TimerError {
    pub kind: TimerErrorKind,
    pub message: String,
    /// HTTP status reported by the timer API, if a response arrived
    pub status_code: Option<u16>,
}

impl TimerError {
    pub fn new(kind: TimerErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
        }
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(TimerErrorKind::Network, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(TimerErrorKind::Auth, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(TimerErrorKind::InvalidRequest, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(TimerErrorKind::ServerError, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(TimerErrorKind::Unknown, message)
    }
}

/// Error classification, used for logging only; launches are never retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerErrorKind {
    /// Connection failures and timeouts
    Network,
    /// Missing or revoked timer permission (401, 403)
    Auth,
    /// Payload rejected (400)
    InvalidRequest,
    /// Timer API failure (5xx)
    ServerError,
    Unknown,
}
