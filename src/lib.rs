//! # Cookbook
//!
//! AI recipe generation for a recipe-sharing application: ingredients are
//! collected and normalized, sent to an OpenAI-compatible completion
//! provider, and the answer is turned into a validated recipe draft ready to
//! be stored.

pub mod completion_client;
pub mod draft_parser;
pub mod generation_config;
pub mod generation_errors;
pub mod ingredient_collector;
pub mod localization;
pub mod prompt;
pub mod provider;
pub mod recipe;
pub mod recipe_generator;
pub mod recipe_types;

pub use generation_config::{GenerationConfig, RecoveryConfig};
pub use generation_errors::GenerationError;
pub use ingredient_collector::{IngredientCollector, IngredientList};
pub use provider::{CredentialSource, EnvCredentials, Provider, StaticCredentials};
pub use recipe::{Favorite, FavoriteChange, NewRecipe, Recipe, RecipeFilter, RecipeForm, RecipeFormError};
pub use recipe_generator::RecipeGenerator;
pub use recipe_types::{Category, Difficulty, RecipeDraft};
