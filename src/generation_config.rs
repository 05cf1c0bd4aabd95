//! # Generation Configuration Module
//!
//! This module defines configuration structures for recipe generation,
//! including sampling constants, response size bounds and recovery settings
//! for the outbound completion call.

// Constants for generation configuration
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1500;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Recovery configuration for the completion call
///
/// The default makes exactly one attempt: a failure goes straight back to
/// the caller, who decides whether to resubmit.
#[derive(Debug, Clone)]
pub struct RecoveryConfig {
    /// Maximum number of retries after the first attempt
    pub max_retries: u32,
    /// Base delay between retries in milliseconds
    pub base_retry_delay_ms: u64,
    /// Maximum delay between retries in milliseconds
    pub max_retry_delay_ms: u64,
    /// Timeout for a single completion request in seconds
    pub request_timeout_secs: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_retry_delay_ms: 1000, // 1 second
            max_retry_delay_ms: 10000, // 10 seconds
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Configuration structure for recipe generation
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Model identifier overriding the provider's default
    pub model: Option<String>,
    /// Endpoint overriding the provider's base URL (OpenAI-compatible gateways)
    pub base_url: Option<String>,
    /// Sampling temperature
    pub temperature: f32,
    /// Upper bound on the completion length
    pub max_tokens: u32,
    /// Retry and timeout settings
    pub recovery: RecoveryConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: None,
            base_url: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            recovery: RecoveryConfig::default(),
        }
    }
}

impl GenerationConfig {
    /// Apply the optional `COOKBOOK_AI_MODEL` and `COOKBOOK_AI_BASE_URL` overrides
    ///
    /// Empty values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(model) = non_empty_env("COOKBOOK_AI_MODEL") {
            self.model = Some(model);
        }
        if let Some(base_url) = non_empty_env("COOKBOOK_AI_BASE_URL") {
            self.base_url = Some(base_url);
        }
        self
    }
}

/// Read an environment variable, treating blank values as unset
pub fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
