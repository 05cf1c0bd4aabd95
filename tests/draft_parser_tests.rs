//! # Draft Parser Tests
//!
//! Tests for completion sanitization, JSON parsing and per-field
//! normalization into recipe drafts.

#[cfg(test)]
mod tests {
    use cookbook::draft_parser::{normalize_draft, parse_draft, sanitize_response};
    use cookbook::{Category, Difficulty, GenerationError, RecipeDraft};
    use serde_json::json;

    const FULL_RECIPE: &str = r#"{
      "title": "Shakshuka",
      "description": "Eggs poached in spiced tomato sauce",
      "ingredients": "4 eggs, 1 can tomatoes, 1 onion, olive oil, salt",
      "instructions": "1. Soften onion. 2. Add tomatoes. 3. Crack in eggs and cover.",
      "prep_time": 5,
      "cook_time": 20,
      "servings": 2,
      "difficulty": "Easy",
      "category": "Breakfast",
      "tags": ["vegetarian", "one-pan"]
    }"#;

    /// Test that a complete answer is taken verbatim
    #[test]
    fn test_full_recipe_parses_verbatim() {
        let draft = parse_draft(FULL_RECIPE).unwrap();

        assert_eq!(
            draft,
            RecipeDraft {
                title: "Shakshuka".to_string(),
                description: "Eggs poached in spiced tomato sauce".to_string(),
                ingredients: "4 eggs, 1 can tomatoes, 1 onion, olive oil, salt".to_string(),
                instructions: "1. Soften onion. 2. Add tomatoes. 3. Crack in eggs and cover."
                    .to_string(),
                prep_time_minutes: Some(5),
                cook_time_minutes: Some(20),
                servings: Some(2),
                difficulty: Difficulty::Easy,
                category: Some(Category::Breakfast),
                tags: vec!["vegetarian".to_string(), "one-pan".to_string()],
            }
        );
    }

    /// Test that fenced and unfenced answers parse identically
    #[test]
    fn test_fence_variants_parse_identically() {
        let expected = parse_draft(FULL_RECIPE).unwrap();

        for wrapped in [
            format!("```json\n{FULL_RECIPE}\n```"),
            format!("```\n{FULL_RECIPE}\n```"),
            format!("\n  ```json{FULL_RECIPE}```  \n"),
            format!("   {FULL_RECIPE}   "),
        ] {
            assert_eq!(parse_draft(&wrapped).unwrap(), expected, "input: {wrapped:?}");
        }
    }

    /// Test that prose around the JSON object is ignored
    #[test]
    fn test_prose_around_payload_is_tolerated() {
        let text = format!("Here is your recipe:\n{FULL_RECIPE}\nEnjoy!");
        let draft = parse_draft(&text).unwrap();
        assert_eq!(draft.title, "Shakshuka");
    }

    /// Test that sanitization leaves plain JSON untouched
    #[test]
    fn test_sanitize_leaves_plain_json_untouched() {
        assert_eq!(sanitize_response(FULL_RECIPE), FULL_RECIPE);
    }

    /// Test inputs with no readable JSON object
    #[test]
    fn test_malformed_inputs() {
        for text in ["not json", "", "```json\n```", "{\"title\": ", "} backwards {"] {
            assert!(
                matches!(parse_draft(text), Err(GenerationError::MalformedResponse(_))),
                "input: {text:?}"
            );
        }
    }

    /// Test defaults for missing and unrecognized fields
    #[test]
    fn test_missing_fields_default() {
        let object = json!({"difficulty": "Bogus"});
        let draft = normalize_draft(object.as_object().unwrap());

        assert_eq!(draft, RecipeDraft::default());
        assert_eq!(draft.title, "AI Generated Recipe");
        assert_eq!(draft.prep_time_minutes, None);
        assert_eq!(draft.servings, None);
        assert!(draft.tags.is_empty());
        assert_eq!(draft.difficulty, Difficulty::Medium);
    }

    /// Test that a blank title takes the placeholder
    #[test]
    fn test_blank_title_defaults() {
        let draft = parse_draft(r#"{"title": "   "}"#).unwrap();
        assert_eq!(draft.title, "AI Generated Recipe");
    }

    /// Test coercion of textual and fractional numbers
    #[test]
    fn test_numeric_coercion() {
        let draft = parse_draft(
            r#"{"prep_time": "15 minutes", "cook_time": 25.5, "servings": "four"}"#,
        )
        .unwrap();

        assert_eq!(draft.prep_time_minutes, Some(15));
        assert_eq!(draft.cook_time_minutes, Some(25));
        assert_eq!(draft.servings, None);
    }

    /// Test that out-of-range numbers become null
    #[test]
    fn test_out_of_range_numbers_become_null() {
        let draft = parse_draft(r#"{"prep_time": -10, "cook_time": 0, "servings": 0}"#).unwrap();

        assert_eq!(draft.prep_time_minutes, None);
        assert_eq!(draft.cook_time_minutes, Some(0));
        assert_eq!(draft.servings, None);
    }

    /// Test case-insensitive enumeration matching
    #[test]
    fn test_enumerations_are_case_insensitive() {
        let draft = parse_draft(r#"{"difficulty": "hard", "category": "DESSERT"}"#).unwrap();
        assert_eq!(draft.difficulty, Difficulty::Hard);
        assert_eq!(draft.category, Some(Category::Dessert));

        let draft = parse_draft(r#"{"difficulty": 3, "category": "Brunch"}"#).unwrap();
        assert_eq!(draft.difficulty, Difficulty::Medium);
        assert_eq!(draft.category, None);
    }

    /// Test that tags must be a sequence of strings
    #[test]
    fn test_tags_must_be_a_sequence() {
        let draft = parse_draft(r#"{"tags": "quick, easy"}"#).unwrap();
        assert!(draft.tags.is_empty());

        let draft = parse_draft(r#"{"tags": ["Quick", "quick", null, "  ", "Easy"]}"#).unwrap();
        assert_eq!(draft.tags, vec!["Quick", "Easy"]);
    }

    /// Test that instruction step lists are joined
    #[test]
    fn test_instruction_steps_array_is_joined() {
        let draft = parse_draft(r#"{"instructions": ["Boil water.", "Cook pasta."]}"#).unwrap();
        assert_eq!(draft.instructions, "Boil water.\nCook pasta.");
    }

    /// Test that absurd durations never reach a draft
    #[test]
    fn test_implausible_durations_become_null() {
        let draft = parse_draft(r#"{"prep_time": 4294967295, "cook_time": 5, "servings": 100000}"#).unwrap();

        assert_eq!(draft.prep_time_minutes, None);
        assert_eq!(draft.cook_time_minutes, Some(5));
        assert_eq!(draft.servings, None);
    }
}
