//! # Completion Provider Module
//!
//! This module resolves which OpenAI-compatible completion service a
//! generation request talks to. The choice is a pure function of which
//! credential is configured:
//!
//! - a secondary (Groq) key selects Groq
//! - otherwise a primary (OpenAI) key selects OpenAI
//! - with neither, generation fails with a configuration error
//!
//! Credentials are read through an injected [`CredentialSource`] at call
//! time, so a key set after start-up is picked up by the next request.

use std::fmt;

use crate::generation_config::{non_empty_env, GenerationConfig};
use crate::generation_errors::GenerationError;
use crate::prompt::{ChatCompletionRequest, ChatMessage};

/// Environment variable holding the primary provider key
pub const PRIMARY_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable holding the secondary provider key
pub const SECONDARY_KEY_ENV: &str = "GROQ_API_KEY";

/// Supported completion providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Groq,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Groq => "groq",
        }
    }

    /// Base URL the `/chat/completions` path is appended to
    pub fn base_url(&self) -> &'static str {
        match self {
            Provider::OpenAi => "https://api.openai.com/v1",
            Provider::Groq => "https://api.groq.com/openai/v1",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-3.5-turbo",
            Provider::Groq => "llama-3.1-70b-versatile",
        }
    }

    /// Shape the request body for this provider
    pub fn build_request(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
        config: &GenerationConfig,
    ) -> ChatCompletionRequest {
        // Both providers accept the same OpenAI wire format today.
        ChatCompletionRequest {
            model: model.to_string(),
            messages,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source of provider API keys
///
/// Looked up on every generation request.
pub trait CredentialSource: Send + Sync {
    fn primary_key(&self) -> Option<String>;
    fn secondary_key(&self) -> Option<String>;
}

/// Reads keys from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn primary_key(&self) -> Option<String> {
        non_empty_env(PRIMARY_KEY_ENV)
    }

    fn secondary_key(&self) -> Option<String> {
        non_empty_env(SECONDARY_KEY_ENV)
    }
}

/// Fixed keys, for tests and embedding
#[derive(Clone, Default)]
pub struct StaticCredentials {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

impl StaticCredentials {
    pub fn primary(key: impl Into<String>) -> Self {
        Self {
            primary: Some(key.into()),
            secondary: None,
        }
    }

    pub fn secondary(key: impl Into<String>) -> Self {
        Self {
            primary: None,
            secondary: Some(key.into()),
        }
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("primary", &self.primary.as_ref().map(|_| "<redacted>"))
            .field("secondary", &self.secondary.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl CredentialSource for StaticCredentials {
    fn primary_key(&self) -> Option<String> {
        self.primary.clone().filter(|k| !k.trim().is_empty())
    }

    fn secondary_key(&self) -> Option<String> {
        self.secondary.clone().filter(|k| !k.trim().is_empty())
    }
}

/// Provider, key, endpoint and model chosen for one request
#[derive(Clone)]
pub struct ResolvedProvider {
    pub provider: Provider,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl ResolvedProvider {
    /// Full URL of the chat completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for ResolvedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedProvider")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

/// Pick the provider for a request
///
/// # Errors
///
/// Returns [`GenerationError::Configuration`] when neither key is set.
pub fn resolve_provider(
    credentials: &dyn CredentialSource,
    config: &GenerationConfig,
) -> Result<ResolvedProvider, GenerationError> {
    let (provider, api_key) = if let Some(key) = credentials.secondary_key() {
        (Provider::Groq, key)
    } else if let Some(key) = credentials.primary_key() {
        (Provider::OpenAi, key)
    } else {
        return Err(GenerationError::Configuration(format!(
            "AI API key not configured. Please set {PRIMARY_KEY_ENV} or {SECONDARY_KEY_ENV} in environment variables."
        )));
    };

    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| provider.base_url().to_string());
    let model = config
        .model
        .clone()
        .unwrap_or_else(|| provider.default_model().to_string());

    Ok(ResolvedProvider {
        provider,
        api_key,
        base_url,
        model,
    })
}
