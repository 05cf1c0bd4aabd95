//! # Recipe Prompt Module
//!
//! This module builds the chat messages sent to the completion endpoint:
//! a fixed system message establishing the chef persona, and a user message
//! listing the ingredients and the exact JSON schema to answer with.

use serde::{Deserialize, Serialize};

use crate::ingredient_collector::IngredientList;

/// Fixed system message
pub const SYSTEM_PROMPT: &str =
    "You are a helpful chef assistant that creates recipes. Always respond with valid JSON only.";

/// Role in a chat conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in a chat conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Body of a `POST /chat/completions` request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Render the user message for the given ingredients
pub fn render_recipe_prompt(ingredients: &IngredientList) -> String {
    let ingredients_list = ingredients.joined();

    format!(
        r#"You are a professional chef. Create a recipe using these ingredients: {ingredients_list}

Please provide a recipe in the following JSON format:
{{
  "title": "Recipe name",
  "description": "Brief description of the recipe",
  "ingredients": "List of all ingredients needed (including the ones provided, plus any common pantry items)",
  "instructions": "Step-by-step cooking instructions",
  "prep_time": number in minutes,
  "cook_time": number in minutes,
  "servings": number,
  "difficulty": "Easy" or "Medium" or "Hard",
  "category": "Breakfast" or "Lunch" or "Dinner" or "Dessert" or "Snack" or "Appetizer" or "Drink",
  "tags": ["tag1", "tag2", "tag3"]
}}

Make sure to:
- Use most or all of the provided ingredients: {ingredients_list}
- Include common pantry items (salt, pepper, oil, etc.) if needed
- Provide clear, step-by-step instructions
- Be creative but practical
- Return ONLY valid JSON, no markdown formatting"#
    )
}

/// System and user messages for a generation request
pub fn build_messages(ingredients: &IngredientList) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(render_recipe_prompt(ingredients)),
    ]
}
