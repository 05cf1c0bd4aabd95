//! # Draft Parser Module
//!
//! This module turns the raw text of a completion into a [`RecipeDraft`].
//!
//! ## Stages
//!
//! 1. **Sanitization**: Markdown code fences (tagged or bare) and surrounding
//!    whitespace are stripped.
//! 2. **Structural parse**: the remaining text must be a JSON object. When it
//!    is not, the outermost `{ ... }` span is tried before giving up with
//!    [`GenerationError::MalformedResponse`].
//! 3. **Field normalization**: every field goes through its entry in
//!    [`FIELD_RULES`]. A missing or unusable value falls back to the field's
//!    default; content defects never fail the parse.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::generation_errors::GenerationError;
use crate::recipe_types::{Category, Difficulty, RecipeDraft, DEFAULT_TITLE};

lazy_static! {
    static ref LEADING_FENCE: Regex =
        Regex::new(r"^```[A-Za-z0-9_+-]*[ \t]*\r?\n?").expect("Leading fence pattern should be valid");
    static ref TRAILING_FENCE: Regex =
        Regex::new(r"\r?\n?[ \t]*```$").expect("Trailing fence pattern should be valid");
    static ref LEADING_INTEGER: Regex =
        Regex::new(r"^[+-]?\d+").expect("Leading integer pattern should be valid");
}

/// Strip Markdown code fences and surrounding whitespace
///
/// # Examples
///
/// ```rust
/// use cookbook::draft_parser::sanitize_response;
///
/// assert_eq!(sanitize_response("```json\n{\"a\":1}\n```"), "{\"a\":1}");
/// assert_eq!(sanitize_response("```\n{}\n```\n"), "{}");
/// assert_eq!(sanitize_response("  {}  "), "{}");
/// ```
pub fn sanitize_response(raw: &str) -> &str {
    let text = raw.trim();
    let text = match LEADING_FENCE.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    };
    let text = match TRAILING_FENCE.find(text) {
        Some(m) => &text[..m.start()],
        None => text,
    };
    text.trim()
}

/// Parse a completion's text into a normalized draft
///
/// # Errors
///
/// Returns [`GenerationError::MalformedResponse`] when no JSON object can be
/// read from the text.
pub fn parse_draft(raw: &str) -> Result<RecipeDraft, GenerationError> {
    let sanitized = sanitize_response(raw);
    debug!(chars = sanitized.len(), "Parsing sanitized completion");

    let object = parse_object(sanitized).ok_or_else(|| {
        error!(response = %truncate(raw, 200), "Failed to parse AI response");
        GenerationError::MalformedResponse(
            "Failed to parse AI response. Please try again.".to_string(),
        )
    })?;

    Ok(normalize_draft(&object))
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    let value = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(_) => {
            // Prose around the payload: fall back to the outermost braces.
            let start = text.find('{')?;
            let end = text.rfind('}')?;
            if end <= start {
                return None;
            }
            serde_json::from_str::<Value>(&text[start..=end]).ok()?
        }
    };

    match value {
        Value::Object(mut object) => {
            // Some models nest the payload as {"recipe": {...}}.
            if object.len() == 1 {
                if let Some(Value::Object(inner)) = object.remove("recipe") {
                    return Some(inner);
                }
            }
            Some(object)
        }
        _ => None,
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Longest plausible prep or cook time (about a week)
pub const MAX_MINUTES: u32 = 10_000;

/// Largest plausible serving count
pub const MAX_SERVINGS: u32 = 1_000;

/// Normalization rule for one response field
pub struct FieldRule {
    /// Key in the model's JSON object
    pub key: &'static str,
    /// Human-readable fallback, for logs and docs
    pub default: &'static str,
    /// Store the coerced value; returns `false` when the default was kept
    pub apply: fn(&mut RecipeDraft, Option<&Value>) -> bool,
}

/// Per-field coercion table, applied in order
pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule { key: "title", default: DEFAULT_TITLE, apply: apply_title },
    FieldRule { key: "description", default: "\"\"", apply: apply_description },
    FieldRule { key: "ingredients", default: "\"\"", apply: apply_ingredients },
    FieldRule { key: "instructions", default: "\"\"", apply: apply_instructions },
    FieldRule { key: "prep_time", default: "null", apply: apply_prep_time },
    FieldRule { key: "cook_time", default: "null", apply: apply_cook_time },
    FieldRule { key: "servings", default: "null", apply: apply_servings },
    FieldRule { key: "difficulty", default: "Medium", apply: apply_difficulty },
    FieldRule { key: "category", default: "null", apply: apply_category },
    FieldRule { key: "tags", default: "[]", apply: apply_tags },
];

/// Build a draft from a parsed JSON object
///
/// Never fails: each field is coerced by its [`FIELD_RULES`] entry.
pub fn normalize_draft(object: &Map<String, Value>) -> RecipeDraft {
    let mut draft = RecipeDraft::default();
    for rule in FIELD_RULES {
        if !(rule.apply)(&mut draft, object.get(rule.key)) {
            debug!(field = rule.key, default = rule.default, "Field defaulted");
        }
    }
    draft
}

fn apply_title(draft: &mut RecipeDraft, value: Option<&Value>) -> bool {
    match coerce_text(value).filter(|t| !t.trim().is_empty()) {
        Some(title) => {
            draft.title = title.trim().to_string();
            true
        }
        None => false,
    }
}

fn apply_description(draft: &mut RecipeDraft, value: Option<&Value>) -> bool {
    set_text(&mut draft.description, value)
}

fn apply_ingredients(draft: &mut RecipeDraft, value: Option<&Value>) -> bool {
    set_text(&mut draft.ingredients, value)
}

fn apply_instructions(draft: &mut RecipeDraft, value: Option<&Value>) -> bool {
    set_text(&mut draft.instructions, value)
}

fn set_text(slot: &mut String, value: Option<&Value>) -> bool {
    match coerce_text(value) {
        Some(text) => {
            *slot = text;
            true
        }
        None => false,
    }
}

fn apply_prep_time(draft: &mut RecipeDraft, value: Option<&Value>) -> bool {
    draft.prep_time_minutes = coerce_minutes(value);
    draft.prep_time_minutes.is_some()
}

fn apply_cook_time(draft: &mut RecipeDraft, value: Option<&Value>) -> bool {
    draft.cook_time_minutes = coerce_minutes(value);
    draft.cook_time_minutes.is_some()
}

fn apply_servings(draft: &mut RecipeDraft, value: Option<&Value>) -> bool {
    draft.servings = coerce_servings(value);
    draft.servings.is_some()
}

fn apply_difficulty(draft: &mut RecipeDraft, value: Option<&Value>) -> bool {
    match value.and_then(Value::as_str).and_then(Difficulty::from_label) {
        Some(difficulty) => {
            draft.difficulty = difficulty;
            true
        }
        None => false,
    }
}

fn apply_category(draft: &mut RecipeDraft, value: Option<&Value>) -> bool {
    draft.category = value.and_then(Value::as_str).and_then(Category::from_label);
    draft.category.is_some()
}

fn apply_tags(draft: &mut RecipeDraft, value: Option<&Value>) -> bool {
    match value {
        Some(Value::Array(items)) => {
            draft.tags = coerce_tags(items);
            true
        }
        _ => false,
    }
}

/// Best-effort text coercion
///
/// Strings are kept verbatim, numbers are printed, and arrays of strings
/// (models sometimes list steps) are joined one per line. Anything else is
/// unusable.
pub fn coerce_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let lines: Vec<&str> = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            if lines.is_empty() {
                None
            } else {
                Some(lines.join("\n"))
            }
        }
        _ => None,
    }
}

/// Best-effort integer coercion
///
/// Numbers are truncated toward zero; strings contribute their leading
/// integer (`"20 minutes"` reads as 20). Non-numeric input yields `None`.
pub fn coerce_int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            }
        }
        Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}

/// Leading integer of a string, ignoring surrounding whitespace
///
/// ```rust
/// use cookbook::draft_parser::parse_leading_int;
///
/// assert_eq!(parse_leading_int(" 20 minutes"), Some(20));
/// assert_eq!(parse_leading_int("about 20"), None);
/// ```
pub fn parse_leading_int(text: &str) -> Option<i64> {
    LEADING_INTEGER
        .find(text.trim())
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

/// Duration in minutes: zero allowed, negatives and absurd values rejected
pub fn minutes_in_range(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|&m| m <= MAX_MINUTES)
}

/// Serving count: at least one, absurd values rejected
pub fn servings_in_range(value: i64) -> Option<u32> {
    u32::try_from(value)
        .ok()
        .filter(|&s| (1..=MAX_SERVINGS).contains(&s))
}

pub fn coerce_minutes(value: Option<&Value>) -> Option<u32> {
    coerce_int(value).and_then(minutes_in_range)
}

pub fn coerce_servings(value: Option<&Value>) -> Option<u32> {
    coerce_int(value).and_then(servings_in_range)
}

/// Keep distinct non-blank string tags, first occurrence wins
pub fn coerce_tags(items: &[Value]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in items.iter().filter_map(Value::as_str).map(str::trim) {
        if tag.is_empty() || tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            continue;
        }
        tags.push(tag.to_string());
    }
    tags
}
