//! # Recipe Records Module
//!
//! This module defines the recipe rows exchanged with the hosted store and
//! the feed operations the application runs over them.
//!
//! ## Features
//!
//! - `NewRecipe`: insert payload, built from a generated draft or a manual form
//! - `Recipe`: stored row as returned by the store
//! - Manual tag parsing from comma-separated input
//! - Feed search by title or ingredients, filtered by category
//! - Favorites: membership, toggling and the favorites page listing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::draft_parser::{minutes_in_range, parse_leading_int, servings_in_range};
use crate::recipe_types::{Category, Difficulty, RecipeDraft};

/// Category label that disables category filtering
pub const ALL_CATEGORIES: &str = "All";

/// Insert payload for the `recipes` table
///
/// Carries no id: the store assigns one on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub ingredients: String,
    pub instructions: String,
    pub photo_url: Option<String>,
    pub video_url: Option<String>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub category: Option<Category>,
    pub tags: Option<Vec<String>>,
}

impl RecipeDraft {
    /// Insert payload owned by `user_id`
    ///
    /// Draft fields are copied verbatim; an empty tag list is stored as null.
    pub fn into_new_recipe(self, user_id: impl Into<String>) -> NewRecipe {
        NewRecipe {
            user_id: user_id.into(),
            title: self.title,
            description: Some(self.description),
            ingredients: self.ingredients,
            instructions: self.instructions,
            photo_url: None,
            video_url: None,
            prep_time: self.prep_time_minutes,
            cook_time: self.cook_time_minutes,
            servings: self.servings,
            difficulty: Some(self.difficulty),
            category: self.category,
            tags: if self.tags.is_empty() {
                None
            } else {
                Some(self.tags)
            },
        }
    }
}

/// Fields of the manual "new recipe" form, as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeForm {
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: String,
    pub difficulty: String,
    pub category: String,
    /// Comma-separated tags
    pub tags: String,
}

/// Rejection of a manual recipe form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecipeFormError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

impl NewRecipe {
    /// Insert payload for a manually entered recipe
    ///
    /// Title, ingredients and instructions are required. Blank optional
    /// fields are stored as null, numbers keep their leading integer and
    /// blank tag input stores no tags.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeFormError::MissingField`] naming the first blank
    /// required field.
    pub fn from_form(
        user_id: impl Into<String>,
        form: &RecipeForm,
    ) -> Result<NewRecipe, RecipeFormError> {
        let title = required(&form.title, "Title")?;
        let ingredients = required(&form.ingredients, "Ingredients")?;
        let instructions = required(&form.instructions, "Instructions")?;

        let tags = parse_tag_list(&form.tags);

        Ok(NewRecipe {
            user_id: user_id.into(),
            title,
            description: non_blank(&form.description),
            ingredients,
            instructions,
            photo_url: None,
            video_url: None,
            prep_time: parse_leading_int(&form.prep_time).and_then(minutes_in_range),
            cook_time: parse_leading_int(&form.cook_time).and_then(minutes_in_range),
            servings: parse_leading_int(&form.servings).and_then(servings_in_range),
            difficulty: Difficulty::from_label(&form.difficulty),
            category: Category::from_label(&form.category),
            tags: if tags.is_empty() { None } else { Some(tags) },
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, RecipeFormError> {
    non_blank(value).ok_or(RecipeFormError::MissingField(field))
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// A stored recipe row
///
/// Difficulty and category labels are read leniently: rows written before
/// the vocabularies were enforced may hold other labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub ingredients: String,
    pub instructions: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub prep_time: Option<u32>,
    #[serde(default)]
    pub cook_time: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default, deserialize_with = "stored_difficulty")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, deserialize_with = "stored_category")]
    pub category: Option<Category>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl Recipe {
    /// Total of prep and cook time, when either is known
    pub fn total_time(&self) -> Option<u64> {
        match (self.prep_time, self.cook_time) {
            (None, None) => None,
            (prep, cook) => Some(u64::from(prep.unwrap_or(0)) + u64::from(cook.unwrap_or(0))),
        }
    }
}

fn stored_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string))
}

/// Null stays null; an unknown label reads as the default difficulty
fn stored_difficulty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Difficulty>, D::Error> {
    Ok(stored_label(deserializer)?
        .map(|label| Difficulty::from_label(&label).unwrap_or_default()))
}

/// An unknown label reads as uncategorized
fn stored_category<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Category>, D::Error> {
    Ok(stored_label(deserializer)?.and_then(|label| Category::from_label(&label)))
}

/// Split comma-separated tag input, dropping blanks
///
/// # Examples
///
/// ```rust
/// use cookbook::recipe::parse_tag_list;
///
/// assert_eq!(parse_tag_list("quick, vegan,, weeknight "), vec!["quick", "vegan", "weeknight"]);
/// assert!(parse_tag_list(" , ").is_empty());
/// ```
pub fn parse_tag_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Feed search and category filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeFilter {
    /// Text looked up in title and ingredients, empty matches everything
    pub query: String,
    /// Selected category label, [`ALL_CATEGORIES`] disables the filter
    pub category: String,
}

impl Default for RecipeFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl RecipeFilter {
    pub fn new(query: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: category.into(),
        }
    }

    /// Whether a recipe passes both the search and the category filter
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.matches_query(recipe) && self.matches_category(recipe)
    }

    fn matches_query(&self, recipe: &Recipe) -> bool {
        let query = self.query.trim().to_lowercase();
        query.is_empty()
            || recipe.title.to_lowercase().contains(&query)
            || recipe.ingredients.to_lowercase().contains(&query)
    }

    fn matches_category(&self, recipe: &Recipe) -> bool {
        let selected = self.category.trim();
        if selected.is_empty() || selected.eq_ignore_ascii_case(ALL_CATEGORIES) {
            return true;
        }
        recipe
            .category
            .is_some_and(|c| c.as_str().eq_ignore_ascii_case(selected))
    }

    /// Recipes passing the filter, in their original order
    pub fn apply<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        recipes.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Order recipes newest first
pub fn sort_feed(recipes: &mut [Recipe]) {
    recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// One user's recipes, newest first
pub fn recipes_by_user<'a>(recipes: &'a [Recipe], user_id: &str) -> Vec<&'a Recipe> {
    let mut mine: Vec<&Recipe> = recipes.iter().filter(|r| r.user_id == user_id).collect();
    mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    mine
}

/// A stored favorite: `user_id` saved `recipe_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    pub user_id: String,
    pub recipe_id: String,
    pub created_at: DateTime<Utc>,
}

/// Change to issue against the `favorites` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteChange {
    /// Insert a row for this pair
    Add { user_id: String, recipe_id: String },
    /// Delete every row for this pair
    Remove { user_id: String, recipe_id: String },
}

/// Whether `user_id` has saved `recipe_id`
pub fn is_favorite(favorites: &[Favorite], user_id: &str, recipe_id: &str) -> bool {
    favorites
        .iter()
        .any(|f| f.user_id == user_id && f.recipe_id == recipe_id)
}

/// The change that flips the favorite state of a recipe for a user
pub fn toggle_favorite(favorites: &[Favorite], user_id: &str, recipe_id: &str) -> FavoriteChange {
    let user_id = user_id.to_string();
    let recipe_id = recipe_id.to_string();
    if is_favorite(favorites, &user_id, &recipe_id) {
        FavoriteChange::Remove { user_id, recipe_id }
    } else {
        FavoriteChange::Add { user_id, recipe_id }
    }
}

/// A user's saved recipes, most recently saved first
///
/// Favorites whose recipe is no longer in `recipes` are skipped, and a
/// recipe saved twice is listed once.
pub fn favorite_recipes<'a>(
    favorites: &[Favorite],
    recipes: &'a [Recipe],
    user_id: &str,
) -> Vec<&'a Recipe> {
    let mut mine: Vec<&Favorite> = favorites.iter().filter(|f| f.user_id == user_id).collect();
    mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut saved: Vec<&Recipe> = Vec::new();
    for favorite in mine {
        if saved.iter().any(|r| r.id == favorite.recipe_id) {
            continue;
        }
        if let Some(recipe) = recipes.iter().find(|r| r.id == favorite.recipe_id) {
            saved.push(recipe);
        }
    }
    saved
}
