//! Tagged error type returned by every backend call.
//!
//! Call sites match on the variant instead of probing optional fields of an
//! untyped error object.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use super::types::ErrorBody;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// 401. Already handled centrally by the HTTP client's eviction path.
    #[error("unauthorized: {}", .0.message.as_deref().unwrap_or("no detail"))]
    Unauthorized(ErrorBody),
    /// 403. Left to feature code.
    #[error("forbidden: {}", .0.message.as_deref().unwrap_or("no detail"))]
    Forbidden(ErrorBody),
    /// Any other 4xx.
    #[error("request rejected ({status}): {}", .detail.message.as_deref().unwrap_or("no detail"))]
    Validation { status: u16, detail: ErrorBody },
    /// 5xx.
    #[error("server error ({status}): {}", .detail.message.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: ErrorBody },
    /// Request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// 2xx response whose body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-2xx response.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = ErrorBody::parse(body);
        match status {
            401 => Self::Unauthorized(detail),
            403 => Self::Forbidden(detail),
            500..=599 => Self::Server { status, detail },
            _ => Self::Validation { status, detail },
        }
    }

    /// HTTP status, when the error came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::Validation { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    #[must_use]
    pub fn detail(&self) -> Option<&ErrorBody> {
        match self {
            Self::Unauthorized(detail)
            | Self::Forbidden(detail)
            | Self::Validation { detail, .. }
            | Self::Server { detail, .. } => Some(detail),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Machine-readable backend code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.detail().and_then(|d| d.code.as_deref())
    }

    /// Server-provided message verbatim, else `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail()
            .and_then(|d| d.message.as_deref())
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_owned()
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}
