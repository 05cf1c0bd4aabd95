//! # Ingredient Collector Module
//!
//! This module accumulates the ingredients a user types before asking for a
//! generated recipe. Entries are trimmed, lower-cased and deduplicated on
//! insertion while keeping the order they were added in, so the prompt built
//! from them is deterministic.
//!
//! Mutation goes through `&mut self`, which serializes writers: the
//! dedup and order guarantees hold no matter how the collector is shared.

use std::ops::Deref;
use tracing::debug;

use crate::generation_errors::GenerationError;

/// Ordered, deduplicated, lower-case ingredient names
///
/// Only built through [`IngredientCollector`] or [`FromIterator`], both of
/// which apply the same normalization, so every instance upholds the
/// invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientList {
    items: Vec<String>,
}

impl IngredientList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and insert an ingredient
    ///
    /// Returns `true` when the entry was stored, `false` when the input was
    /// blank or already present.
    fn insert(&mut self, raw: &str) -> bool {
        let Some(normalized) = normalize_ingredient(raw) else {
            return false;
        };
        if self.items.contains(&normalized) {
            return false;
        }
        self.items.push(normalized);
        true
    }

    /// Comma-joined form used inside the generation prompt
    pub fn joined(&self) -> String {
        self.items.join(", ")
    }

    /// Consume the list, yielding the stored entries
    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

impl Deref for IngredientList {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.items
    }
}

impl<S: AsRef<str>> FromIterator<S> for IngredientList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = IngredientList::new();
        for raw in iter {
            list.insert(raw.as_ref());
        }
        list
    }
}

/// Trim and lower-case an ingredient, rejecting blank input
///
/// # Examples
///
/// ```rust
/// use cookbook::ingredient_collector::normalize_ingredient;
///
/// assert_eq!(normalize_ingredient("  Chicken "), Some("chicken".to_string()));
/// assert_eq!(normalize_ingredient(" \t "), None);
/// ```
pub fn normalize_ingredient(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Collects ingredients for a single generation request
#[derive(Debug, Clone, Default)]
pub struct IngredientCollector {
    list: IngredientList,
}

impl IngredientCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ingredient
    ///
    /// Blank input and case-insensitive duplicates are ignored; neither is an
    /// error. Returns whether the list changed.
    pub fn add(&mut self, raw: &str) -> bool {
        let added = self.list.insert(raw);
        if added {
            debug!(count = self.list.len(), "Ingredient added");
        } else {
            debug!("Ignoring blank or duplicate ingredient");
        }
        added
    }

    /// Remove the ingredient at `index`
    ///
    /// Later entries shift down by one. Returns the removed entry, or `None`
    /// when the index is out of range.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.list.items.len() {
            Some(self.list.items.remove(index))
        } else {
            None
        }
    }

    /// Current entries in insertion order
    pub fn ingredients(&self) -> &[String] {
        &self.list
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Hand the collected list over for generation
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::EmptyInput`] when nothing has been added.
    pub fn submit(&self) -> Result<IngredientList, GenerationError> {
        if self.list.is_empty() {
            return Err(GenerationError::EmptyInput);
        }
        Ok(self.list.clone())
    }
}
