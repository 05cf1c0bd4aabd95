//! # Generation Error Types Module
//!
//! This module defines the error taxonomy of recipe generation. Every failure
//! that crosses the service boundary is classified into one of these kinds.

use thiserror::Error;

/// Longest provider diagnostic kept in a [`GenerationError::Provider`]
pub const MAX_DETAIL_CHARS: usize = 500;

/// Classified failure of a generation request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No ingredients were supplied. The user has to add some.
    #[error("Please provide at least one ingredient")]
    EmptyInput,

    /// No usable credential. An operator has to configure one.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The completion provider rejected or failed the request.
    ///
    /// `status` is `None` when no HTTP response arrived at all
    /// (connection failure or timeout).
    #[error("AI service error{}: {detail}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Provider { status: Option<u16>, detail: String },

    /// The model answered with something that is not JSON.
    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    /// Build a provider error, truncating long diagnostics
    pub fn provider(status: Option<u16>, detail: impl Into<String>) -> Self {
        let detail: String = detail.into();
        let detail = if detail.chars().count() > MAX_DETAIL_CHARS {
            detail.chars().take(MAX_DETAIL_CHARS).collect()
        } else {
            detail
        };
        GenerationError::Provider { status, detail }
    }

    /// Whether re-invoking `generate` with the same input can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::Provider { .. } | GenerationError::MalformedResponse(_)
        )
    }

    /// Whether the failure is transient on the provider side
    ///
    /// Rate limiting, server errors and transport failures qualify; other
    /// client errors will fail again on resubmission as-is.
    pub fn is_transient(&self) -> bool {
        match self {
            GenerationError::Provider { status: None, .. } => true,
            GenerationError::Provider {
                status: Some(status),
                ..
            } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }

    /// Localization key for the user-facing message
    pub fn message_key(&self) -> &'static str {
        match self {
            GenerationError::EmptyInput => "error-empty-ingredients",
            GenerationError::Configuration(_) => "error-ai-not-configured",
            GenerationError::Provider { status: Some(_), .. } => "error-ai-service",
            GenerationError::Provider { status: None, .. } => "error-ai-unreachable",
            GenerationError::MalformedResponse(_) => "error-ai-parse",
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        GenerationError::provider(status, err.to_string())
    }
}
