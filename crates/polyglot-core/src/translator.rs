use tracing::debug;

use crate::config::TranslationConfig;
use crate::error::ValidationError;
use crate::language;
use crate::model::{GenerationRequest, ModelHandle};
use crate::request::TranslationRequest;
use crate::Result;

/// Translates text with the shared multilingual translation model.
///
/// Translating a result back to its source language is not guaranteed to
/// reproduce the original text.
pub struct Translator {
    model: ModelHandle,
    max_input_tokens: usize,
}

impl Translator {
    pub fn new(model: ModelHandle, config: &TranslationConfig) -> Self {
        Self {
            model,
            max_input_tokens: config.max_input_tokens.max(1),
        }
    }

    /// Translate `text` from `source_language_code` to `target_language_code`.
    ///
    /// Callers are expected to reject identical languages before calling;
    /// the check is repeated here so a bad pair never reaches the model.
    pub async fn translate(
        &self,
        text: &str,
        source_language_code: &str,
        target_language_code: &str,
    ) -> Result<String> {
        if source_language_code.eq_ignore_ascii_case(target_language_code) {
            return Err(ValidationError::InvalidLanguagePair(source_language_code.to_string()).into());
        }
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyInput("text to translate").into());
        }
        let source = language::by_code(source_language_code)
            .ok_or_else(|| ValidationError::UnknownLanguage(source_language_code.to_string()))?;
        let target = language::by_code(target_language_code)
            .ok_or_else(|| ValidationError::UnknownLanguage(target_language_code.to_string()))?;

        let request = GenerationRequest::new(text, self.max_input_tokens)
            .with_source_language(source.code)
            .with_forced_target_language(target.code);

        debug!("Translating {} chars {} -> {}", text.chars().count(), source.code, target.code);
        self.model.generate(&request).await
    }

    pub async fn translate_request(&self, request: &TranslationRequest) -> Result<String> {
        self.translate(
            &request.text,
            request.source_language.code,
            request.target_language.code,
        )
        .await
    }
}
