//! Validated per-request inputs.
//!
//! Constructing one of these is the validation step: a value that exists has
//! already passed every check that must happen before a model call.

use serde::Serialize;

use crate::config::SummarizationConfig;
use crate::error::ValidationError;
use crate::language::{self, Language};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: Language,
    pub target_language: Language,
}

impl TranslationRequest {
    /// Languages may be given as codes or names.
    pub fn new(text: &str, source: &str, target: &str) -> Result<Self, ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyInput("text to translate"));
        }

        let source_language = language::resolve(source)?;
        let target_language = language::resolve(target)?;
        if source_language == target_language {
            return Err(ValidationError::InvalidLanguagePair(
                source_language.code.to_string(),
            ));
        }

        Ok(Self {
            text: text.to_string(),
            source_language,
            target_language,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarizationRequest {
    pub text: String,
    pub max_length: usize,
    pub min_length: usize,
}

impl SummarizationRequest {
    pub fn new(text: &str, min_length: usize, max_length: usize) -> Result<Self, ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyInput("text to summarize"));
        }
        if min_length > max_length {
            return Err(ValidationError::InvalidLengthBounds {
                min: min_length,
                max: max_length,
            });
        }

        Ok(Self {
            text: text.to_string(),
            max_length,
            min_length,
        })
    }

    /// Request with the configured summary length bounds
    pub fn with_config(text: &str, config: &SummarizationConfig) -> Result<Self, ValidationError> {
        Self::new(text, config.min_length, config.max_length)
    }
}
