//! # Recipe Types Module
//!
//! This module defines the core types produced by recipe generation:
//! the caller-ready `RecipeDraft` and the closed vocabularies for
//! difficulty and meal category.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Title used when the model omits one
pub const DEFAULT_TITLE: &str = "AI Generated Recipe";

/// How hard a recipe is to cook
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulties, in display order
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Canonical label as stored and displayed
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Case-insensitive lookup of a label, ignoring surrounding whitespace
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cookbook::recipe_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_label(" hard "), Some(Difficulty::Hard));
    /// assert_eq!(Difficulty::from_label("Bogus"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Meal category a recipe is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Breakfast,
    Lunch,
    Dinner,
    Dessert,
    Snack,
    Appetizer,
    Drink,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 7] = [
        Category::Breakfast,
        Category::Lunch,
        Category::Dinner,
        Category::Dessert,
        Category::Snack,
        Category::Appetizer,
        Category::Drink,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Breakfast => "Breakfast",
            Category::Lunch => "Lunch",
            Category::Dinner => "Dinner",
            Category::Dessert => "Dessert",
            Category::Snack => "Snack",
            Category::Appetizer => "Appetizer",
            Category::Drink => "Drink",
        }
    }

    /// Case-insensitive lookup of a label, ignoring surrounding whitespace
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated recipe returned by the generation service
///
/// Every field is either taken from the model's answer or filled with its
/// documented default, so a `RecipeDraft` is always complete. Serialized
/// field names follow the stored recipe columns (`prep_time`, `cook_time`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    /// Recipe name, never empty
    pub title: String,
    /// Short description, may be empty
    pub description: String,
    /// Free-text ingredient block written by the model, staples included
    pub ingredients: String,
    /// Free-text cooking instructions
    pub instructions: String,
    /// Preparation time in minutes
    #[serde(rename = "prep_time")]
    pub prep_time_minutes: Option<u32>,
    /// Cooking time in minutes
    #[serde(rename = "cook_time")]
    pub cook_time_minutes: Option<u32>,
    /// Number of servings, always positive when present
    pub servings: Option<u32>,
    pub difficulty: Difficulty,
    pub category: Option<Category>,
    /// Distinct tags in the order the model listed them
    pub tags: Vec<String>,
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: String::new(),
            ingredients: String::new(),
            instructions: String::new(),
            prep_time_minutes: None,
            cook_time_minutes: None,
            servings: None,
            difficulty: Difficulty::default(),
            category: None,
            tags: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_labels() {
        assert_eq!(Difficulty::from_label("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_label("MEDIUM"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_label(""), None);
        assert_eq!(Difficulty::default(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.to_string(), "Hard");
    }

    #[test]
    fn test_category_labels() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.as_str()), Some(category));
        }
        assert_eq!(Category::from_label("dessert"), Some(Category::Dessert));
        assert_eq!(Category::from_label("Vegan"), None);
    }

    #[test]
    fn test_draft_serializes_with_column_names() {
        let draft = RecipeDraft {
            prep_time_minutes: Some(10),
            category: Some(Category::Dinner),
            ..Default::default()
        };
        let value = serde_json::to_value(&draft).unwrap();

        assert_eq!(value["title"], DEFAULT_TITLE);
        assert_eq!(value["prep_time"], 10);
        assert!(value["cook_time"].is_null());
        assert_eq!(value["difficulty"], "Medium");
        assert_eq!(value["category"], "Dinner");
    }
}
