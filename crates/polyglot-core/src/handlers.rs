//! Handlers behind the user-facing actions.
//!
//! Each handler turns raw user input into an [`ActionOutcome`]. Input
//! problems come back as `Ok(ActionOutcome::Warning)` and extraction problems
//! as `Ok(ActionOutcome::Failure)`, so the caller can render them inline.
//! Both are decided before a model is requested from [`Services`].
//! Inference and model load errors are not caught here; they propagate as
//! `Err` to the serving layer.

use serde::Serialize;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::{Error, ExtractionError};
use crate::request::{SummarizationRequest, TranslationRequest};
use crate::services::Services;
use crate::summarizer::prepare_document_text;
use crate::Result;

pub const TRANSLATION_COMPLETE: &str = "Translation Complete!";
pub const SUMMARIZATION_COMPLETE: &str = "Summarization Complete!";
pub const EXTRACTION_FAILED: &str = "Could not extract text from the uploaded PDF.";

/// Result of a user action, ready to be shown next to the form that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ActionOutcome {
    Success { output: String, message: String },
    Warning { message: String },
    #[serde(rename = "error")]
    Failure { message: String },
}

impl ActionOutcome {
    pub fn success(output: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Success {
            output: output.into(),
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::Warning {
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. } | Self::Warning { message } | Self::Failure { message } => {
                message
            }
        }
    }

    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Success { output, .. } => Some(output),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Translate button. `source` and `target` may be language codes or names.
pub async fn on_translate_click(
    services: &Services,
    text: &str,
    source: &str,
    target: &str,
) -> Result<ActionOutcome> {
    let request = match TranslationRequest::new(text, source, target) {
        Ok(request) => request,
        Err(e) => {
            warn!("Translation rejected: {}", e);
            return Ok(ActionOutcome::warning(e.to_string()));
        }
    };

    let span = info_span!(
        "translate",
        id = %Uuid::new_v4(),
        src = request.source_language.code,
        tgt = request.target_language.code
    );
    async {
        let translator = services.translator().await?;
        let output = translator.translate_request(&request).await?;
        info!("Translation complete ({} chars)", output.chars().count());
        Ok::<_, Error>(ActionOutcome::success(output, TRANSLATION_COMPLETE))
    }
    .instrument(span)
    .await
}

/// Summarize button in text mode.
pub async fn on_summarize_click(services: &Services, text: &str) -> Result<ActionOutcome> {
    let request = match SummarizationRequest::with_config(text, services.summarization_config()) {
        Ok(request) => request,
        Err(e) => {
            warn!("Summarization rejected: {}", e);
            return Ok(ActionOutcome::warning(e.to_string()));
        }
    };

    let span = info_span!("summarize", id = %Uuid::new_v4());
    async {
        let summarizer = services.summarizer().await?;
        let output = summarizer.summarize_request(&request).await?;
        info!("Summarization complete ({} chars)", output.chars().count());
        Ok::<_, Error>(ActionOutcome::success(output, SUMMARIZATION_COMPLETE))
    }
    .instrument(span)
    .await
}

/// Summarize button in PDF mode. The document is read before any model is
/// loaded, and nothing is sent to the model when it yields no text.
pub async fn on_summarize_document_click(
    services: &Services,
    document_bytes: &[u8],
) -> Result<ActionOutcome> {
    let span = info_span!(
        "summarize_document",
        id = %Uuid::new_v4(),
        bytes = document_bytes.len()
    );
    async {
        let char_limit = services.summarization_config().document_char_limit;
        let text = match prepare_document_text(document_bytes, char_limit) {
            Ok(text) => text,
            Err(Error::Extraction(e)) => {
                warn!("Document extraction failed: {}", e);
                let message = match e {
                    ExtractionError::NoText => EXTRACTION_FAILED.to_string(),
                    other => other.to_string(),
                };
                return Ok(ActionOutcome::failure(message));
            }
            Err(e) => return Err(e),
        };

        let summarizer = services.summarizer().await?;
        let output = summarizer.summarize(&text).await?;
        info!("Document summarization complete ({} chars)", output.chars().count());
        Ok::<_, Error>(ActionOutcome::success(output, SUMMARIZATION_COMPLETE))
    }
    .instrument(span)
    .await
}
