//! # Completion Client Module
//!
//! This module performs the single outbound call of recipe generation:
//! `POST <base-url>/chat/completions` with a bearer token, returning the
//! first choice's message content.
//!
//! Failures are classified before they leave this module. Non-success
//! statuses and transport errors become [`GenerationError::Provider`]; a
//! success body that is not a completion payload becomes
//! [`GenerationError::MalformedResponse`].
//!
//! With the default [`RecoveryConfig`] exactly one request is made. Setting
//! `max_retries` enables bounded retries of transient failures with
//! exponential backoff and jitter.

use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::generation_config::{RecoveryConfig, CONNECT_TIMEOUT_SECS};
use crate::generation_errors::GenerationError;
use crate::prompt::ChatCompletionRequest;
use crate::provider::ResolvedProvider;

/// Completion response, read leniently
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    message: Option<CompletionMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-style error body
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// HTTP client for OpenAI-compatible chat completion endpoints
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: Client,
    recovery: RecoveryConfig,
}

impl CompletionClient {
    /// Create a client with the given recovery settings
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Configuration`] if the HTTP client cannot
    /// be built (for example, no TLS backend is available).
    pub fn new(recovery: RecoveryConfig) -> Result<Self, GenerationError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(recovery.request_timeout_secs))
            .build()
            .map_err(|e| {
                GenerationError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { http, recovery })
    }

    pub fn recovery(&self) -> &RecoveryConfig {
        &self.recovery
    }

    /// Send a completion request and return the first choice's content
    ///
    /// A missing choice or content reads as an empty string.
    pub async fn complete(
        &self,
        target: &ResolvedProvider,
        request: &ChatCompletionRequest,
    ) -> Result<String, GenerationError> {
        let mut attempt = 0;
        loop {
            match self.send_once(target, request).await {
                Ok(content) => return Ok(content),
                Err(err) if err.is_transient() && attempt < self.recovery.max_retries => {
                    attempt += 1;
                    let delay_ms = calculate_retry_delay(attempt, &self.recovery);
                    warn!(
                        provider = %target.provider,
                        attempt,
                        delay_ms,
                        error = %err,
                        "Completion request failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                Err(err) => {
                    warn!(provider = %target.provider, error = %err, "Completion request failed");
                    return Err(err);
                }
            }
        }
    }

    async fn send_once(
        &self,
        target: &ResolvedProvider,
        request: &ChatCompletionRequest,
    ) -> Result<String, GenerationError> {
        let url = target.completions_url();
        info!(provider = %target.provider, model = %request.model, "Requesting completion");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&target.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = error_detail(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(GenerationError::provider(Some(status.as_u16()), detail));
        }

        let completion: CompletionResponse = serde_json::from_str(&body).map_err(|e| {
            GenerationError::MalformedResponse(format!("Invalid completion payload: {e}"))
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default();

        debug!(chars = content.len(), "Completion received");
        Ok(content)
    }
}

/// Diagnostic text of an error body: the provider's message when it sent an
/// OpenAI-style error object, otherwise the raw body
fn error_detail(body: &str) -> Option<String> {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        return Some(parsed.error.message);
    }
    let body = body.trim();
    if body.is_empty() {
        None
    } else {
        Some(body.to_string())
    }
}

/// Delay before retry number `attempt` (1-based), in milliseconds
///
/// Exponential backoff from `base_retry_delay_ms` with up to 10% random
/// jitter, never above `max_retry_delay_ms`.
pub fn calculate_retry_delay(attempt: u32, recovery: &RecoveryConfig) -> u64 {
    let exponent = attempt.saturating_sub(1).min(16);
    let backoff = recovery
        .base_retry_delay_ms
        .saturating_mul(1u64 << exponent)
        .min(recovery.max_retry_delay_ms);
    let jitter = rand::thread_rng().gen_range(0..=backoff / 10);
    backoff.saturating_add(jitter).min(recovery.max_retry_delay_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_retry_delay() {
        let recovery = RecoveryConfig::default();

        let delay1 = calculate_retry_delay(1, &recovery);
        assert!(delay1 >= recovery.base_retry_delay_ms);

        let delay3 = calculate_retry_delay(3, &recovery);
        assert!(delay3 >= 4 * recovery.base_retry_delay_ms);

        let delay_max = calculate_retry_delay(30, &recovery);
        assert!(delay_max <= recovery.max_retry_delay_ms);
    }

    #[test]
    fn test_error_detail_prefers_provider_message() {
        let body = r#"{"error": {"message": "Rate limit reached", "type": "requests"}}"#;
        assert_eq!(error_detail(body), Some("Rate limit reached".to_string()));
        assert_eq!(error_detail("upstream down"), Some("upstream down".to_string()));
        assert_eq!(error_detail("  "), None);
    }

    #[test]
    fn test_lenient_completion_payload() {
        let completion: CompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"role": "assistant"}}]}"#).unwrap();
        assert!(completion.choices[0]
            .message
            .as_ref()
            .unwrap()
            .content
            .is_none());

        let completion: CompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(completion.choices.is_empty());
    }
}
