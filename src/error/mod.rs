//! Error types for Camina.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Primary error type for all Camina operations.
#[derive(Error, Debug)]
pub enum CaminaError {
    /// A structurally required field was missing or mistyped in an
    /// otherwise-successful provider response.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// A classified vendor-side failure.
    #[error("Provider error ({kind}, status {status}): {message}")]
    Provider {
        kind: ProviderErrorKind,
        status: u16,
        message: String,
        details: Option<ErrorDetails>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CaminaError {
    /// Create a provider error without structured details.
    pub fn provider(kind: ProviderErrorKind, status: u16, message: impl Into<String>) -> Self {
        Self::Provider {
            kind,
            status,
            message: message.into(),
            details: None,
        }
    }

    /// Whether this error is potentially retryable by an outer layer.
    ///
    /// Retry policy itself lives with the transport/orchestration layer;
    /// this only reports the classification.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Provider {
                kind: ProviderErrorKind::RateLimited | ProviderErrorKind::Unavailable,
                ..
            }
        )
    }
}

/// Classified kind of a vendor-side failure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProviderErrorKind {
    Authentication,
    RateLimited,
    InvalidRequest,
    Unavailable,
    Unknown,
}

impl ProviderErrorKind {
    /// Classify an HTTP status code. The status is the primary signal;
    /// vendor error bodies only enrich the message, never the kind.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Authentication,
            429 => Self::RateLimited,
            500..=599 => Self::Unavailable,
            400..=499 => Self::InvalidRequest,
            _ => Self::Unknown,
        }
    }
}

/// Structured details decoded from a vendor error body.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ErrorDetails {
    /// Vendor-private error type code (e.g. `rate_limit_error`).
    pub provider_code: Option<String>,
    pub request_id: Option<String>,
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CaminaError>;
