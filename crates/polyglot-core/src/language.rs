//! Language catalog shared by the translator and the user interfaces.
//!
//! The catalog is a fixed, ordered list. Every code is a language code the
//! M2M100 translation model recognizes.

use serde::Serialize;

use crate::error::ValidationError;

/// A selectable language: display name plus model language code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub name: &'static str,
    pub code: &'static str,
}

const fn lang(name: &'static str, code: &'static str) -> Language {
    Language { name, code }
}

/// All supported languages, in display order.
pub const CATALOG: &[Language] = &[
    lang("English", "en"),
    lang("French", "fr"),
    lang("German", "de"),
    lang("Spanish", "es"),
    lang("Italian", "it"),
    lang("Portuguese", "pt"),
    lang("Dutch", "nl"),
    lang("Russian", "ru"),
    lang("Chinese", "zh"),
    lang("Japanese", "ja"),
    lang("Korean", "ko"),
    lang("Arabic", "ar"),
    lang("Hindi", "hi"),
];

/// Default source language offered to the user (first catalog entry).
pub const DEFAULT_SOURCE: &str = "en";
/// Default target language offered to the user (second catalog entry).
pub const DEFAULT_TARGET: &str = "fr";

pub fn languages() -> &'static [Language] {
    CATALOG
}

pub fn by_code(code: &str) -> Option<Language> {
    CATALOG
        .iter()
        .copied()
        .find(|l| l.code.eq_ignore_ascii_case(code))
}

pub fn by_name(name: &str) -> Option<Language> {
    CATALOG
        .iter()
        .copied()
        .find(|l| l.name.eq_ignore_ascii_case(name))
}

/// Resolve user input given either as a code ("fr") or a name ("French").
pub fn resolve(input: &str) -> Result<Language, ValidationError> {
    let trimmed = input.trim();
    by_code(trimmed)
        .or_else(|| by_name(trimmed))
        .ok_or_else(|| ValidationError::UnknownLanguage(trimmed.to_string()))
}
