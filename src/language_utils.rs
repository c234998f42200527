use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::errors::ValidationError;

/// Language utilities for the closed language table
///
/// Codes map to the descriptive names used in prompts. Only the target
/// language is validated against the table; any other code passes through
/// unchanged as its own description.
const LANGUAGE_TABLE: &[(&str, &str)] = &[
    ("zh-CN", "chinese_simplified"),
    ("zh-TW", "chinese_traditional"),
    ("ru", "russian"),
    ("de", "german"),
    ("es", "spanish"),
    ("fr", "french"),
    ("ja", "japanese"),
    ("pt", "portuguese"),
    ("vi", "vietnamese"),
    ("ar", "arabic"),
    ("en", "english"),
];

static LANGUAGE_NAMES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| LANGUAGE_TABLE.iter().copied().collect());

/// Get the descriptive name for a language code, or the code itself when unknown
pub fn get_language_name(code: &str) -> &str {
    LANGUAGE_NAMES.get(code).copied().unwrap_or(code)
}

/// Check whether a code is in the supported table (exact, case-sensitive match)
pub fn is_supported_language(code: &str) -> bool {
    LANGUAGE_NAMES.contains_key(code)
}

/// Validate a target language code against the supported table
pub fn validate_target_language(code: &str) -> Result<(), ValidationError> {
    if is_supported_language(code) {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedLanguage(code.to_string()))
    }
}

/// Supported (code, name) pairs in table order
pub fn supported_languages() -> impl Iterator<Item = (&'static str, &'static str)> {
    LANGUAGE_TABLE.iter().copied()
}

/// Comma separated list of supported codes, for help and error messages
pub fn supported_codes_display() -> String {
    supported_languages()
        .map(|(code, _)| code)
        .collect::<Vec<_>>()
        .join(", ")
}
