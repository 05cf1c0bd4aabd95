//! # Localization Module
//!
//! User-facing messages in English and French, backed by Fluent resources
//! embedded at compile time. English is the fallback for unsupported
//! languages.

use anyhow::Result;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use lazy_static::lazy_static;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

use crate::generation_errors::GenerationError;

/// Language used when none is requested or the requested one is unsupported
pub const DEFAULT_LANGUAGE: &str = "en";

const RESOURCES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en/main.ftl")),
    ("fr", include_str!("../locales/fr/main.ftl")),
];

/// Localization manager holding one bundle per supported language
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    /// Create a new localization manager with every embedded language
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();
        for (code, source) in RESOURCES {
            let locale: LanguageIdentifier = code.parse()?;
            bundles.insert(code.to_string(), Self::create_bundle(locale, source)?);
        }
        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(
        locale: LanguageIdentifier,
        source: &str,
    ) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale]);
        // Plain terminal output: no bidi isolation marks around arguments.
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow::anyhow!("Invalid Fluent resource: {errors:?}"))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow::anyhow!("Conflicting Fluent messages: {errors:?}"))?;

        Ok(bundle)
    }

    /// Get a localized message in the given language, falling back to English
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let Some(bundle) = self
            .bundles
            .get(language)
            .or_else(|| self.bundles.get(DEFAULT_LANGUAGE))
        else {
            return format!("Missing translation: {key}");
        };

        let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) else {
            return format!("Missing translation: {key}");
        };

        let fluent_args = args.map(|args| {
            let mut fluent_args = FluentArgs::new();
            for (name, value) in args {
                fluent_args.set(*name, FluentValue::from(*value));
            }
            fluent_args
        });

        let mut errors = vec![];
        bundle
            .format_pattern(pattern, fluent_args.as_ref(), &mut errors)
            .into_owned()
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, language: &str, args: &[(&str, &str)]) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message_in_language(key, language, Some(&args_map))
    }

    /// User-facing message for a generation failure
    pub fn error_message(&self, error: &GenerationError, language: &str) -> String {
        match error {
            GenerationError::Provider {
                status: Some(status),
                ..
            } => {
                let status = status.to_string();
                self.get_message_with_args(error.message_key(), language, &[("status", &status)])
            }
            _ => self.get_message_in_language(error.message_key(), language, None),
        }
    }
}

/// Map a client language code to a supported language
///
/// # Examples
///
/// ```rust
/// use cookbook::localization::detect_language;
///
/// assert_eq!(detect_language(Some("fr-CA")), "fr");
/// assert_eq!(detect_language(Some("de")), "en");
/// assert_eq!(detect_language(None), "en");
/// ```
pub fn detect_language(language_code: Option<&str>) -> &'static str {
    match language_code {
        Some(code) if code.to_ascii_lowercase().starts_with("fr") => "fr",
        _ => DEFAULT_LANGUAGE,
    }
}

lazy_static! {
    /// Global localization instance
    static ref LOCALIZATION_MANAGER: Option<LocalizationManager> = LocalizationManager::new().ok();
}

/// Initialize the global localization manager, surfacing resource errors
pub fn init_localization() -> Result<()> {
    match LOCALIZATION_MANAGER.as_ref() {
        Some(_) => Ok(()),
        None => LocalizationManager::new().map(|_| ()),
    }
}

/// Convenience function to get a localized message in a client's language
pub fn t_lang(key: &str, language_code: Option<&str>) -> String {
    match LOCALIZATION_MANAGER.as_ref() {
        Some(manager) => manager.get_message_in_language(key, detect_language(language_code), None),
        None => format!("Missing translation: {key}"),
    }
}

/// Convenience function to get a localized message with arguments
pub fn t_args_lang(key: &str, args: &[(&str, &str)], language_code: Option<&str>) -> String {
    match LOCALIZATION_MANAGER.as_ref() {
        Some(manager) => manager.get_message_with_args(key, detect_language(language_code), args),
        None => format!("Missing translation: {key}"),
    }
}

/// Convenience function to get the user-facing message for a generation error
pub fn t_error(error: &GenerationError, language_code: Option<&str>) -> String {
    match LOCALIZATION_MANAGER.as_ref() {
        Some(manager) => manager.error_message(error, detect_language(language_code)),
        None => error.to_string(),
    }
}
