//! # Recipe Generator Module
//!
//! Entry point of AI recipe generation. [`RecipeGenerator::generate`] takes
//! an ingredient list through the whole pipeline:
//!
//! 1. reject an empty list without touching the network
//! 2. resolve provider and credential (read at call time)
//! 3. build the prompt and the provider-shaped request
//! 4. call the completion endpoint once (or per the configured retries)
//! 5. sanitize, parse and normalize the answer into a [`RecipeDraft`]
//!
//! The generator keeps no state between calls. Dropping the returned future
//! cancels the in-flight request.

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::completion_client::CompletionClient;
use crate::draft_parser::parse_draft;
use crate::generation_config::GenerationConfig;
use crate::generation_errors::GenerationError;
use crate::ingredient_collector::IngredientList;
use crate::prompt::build_messages;
use crate::provider::{resolve_provider, CredentialSource, EnvCredentials};
use crate::recipe_types::RecipeDraft;

/// Generates recipe drafts from ingredient lists
pub struct RecipeGenerator {
    credentials: Arc<dyn CredentialSource>,
    config: GenerationConfig,
    client: CompletionClient,
}

impl RecipeGenerator {
    /// Create a generator reading keys from `credentials`
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Configuration`] if the HTTP client cannot
    /// be built.
    pub fn new(
        credentials: Arc<dyn CredentialSource>,
        config: GenerationConfig,
    ) -> Result<Self, GenerationError> {
        let client = CompletionClient::new(config.recovery.clone())?;
        Ok(Self {
            credentials,
            config,
            client,
        })
    }

    /// Create a generator reading keys and overrides from the environment
    pub fn from_env(config: GenerationConfig) -> Result<Self, GenerationError> {
        Self::new(Arc::new(EnvCredentials), config.with_env_overrides())
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate a recipe from the given ingredients
    ///
    /// # Errors
    ///
    /// - [`GenerationError::EmptyInput`] for an empty list; no request is made
    /// - [`GenerationError::Configuration`] when no API key is configured
    /// - [`GenerationError::Provider`] when the provider fails or is unreachable
    /// - [`GenerationError::MalformedResponse`] when the answer is not JSON
    pub async fn generate(
        &self,
        ingredients: &IngredientList,
    ) -> Result<RecipeDraft, GenerationError> {
        if ingredients.is_empty() {
            return Err(GenerationError::EmptyInput);
        }

        let target = resolve_provider(self.credentials.as_ref(), &self.config)?;
        info!(
            provider = %target.provider,
            model = %target.model,
            ingredient_count = ingredients.len(),
            "Generating recipe"
        );

        let request =
            target
                .provider
                .build_request(&target.model, build_messages(ingredients), &self.config);
        let content = self.client.complete(&target, &request).await?;
        let draft = parse_draft(&content)?;

        info!(title = %draft.title, "Recipe generated");
        Ok(draft)
    }

    /// [`generate`](Self::generate) bounded by a caller deadline
    ///
    /// An elapsed deadline is reported as a provider failure without status.
    pub async fn generate_with_timeout(
        &self,
        ingredients: &IngredientList,
        timeout: Duration,
    ) -> Result<RecipeDraft, GenerationError> {
        match tokio::time::timeout(timeout, self.generate(ingredients)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::provider(
                None,
                format!("AI service did not answer within {}s", timeout.as_secs_f32()),
            )),
        }
    }
}
