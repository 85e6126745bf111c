use tracing::{debug, info};

use crate::config::SummarizationConfig;
use crate::document;
use crate::error::{ExtractionError, ValidationError};
use crate::model::{GenerationParams, GenerationRequest, ModelHandle};
use crate::request::SummarizationRequest;
use crate::Result;

/// Cut `input` to at most `max_chars` characters without splitting one.
pub fn truncate_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

/// Extract a PDF's text and cap it at `char_limit` characters.
///
/// Fails with [`ExtractionError::NoText`] when the document has no text.
/// Needs no model, so it can run before one is loaded.
pub fn prepare_document_text(document_bytes: &[u8], char_limit: usize) -> Result<String> {
    let text = document::extract_text(document_bytes)?;
    if text.trim().is_empty() {
        return Err(ExtractionError::NoText.into());
    }

    let extracted_chars = text.chars().count();
    let truncated = truncate_chars(&text, char_limit);
    if truncated.len() < text.len() {
        info!(
            "Document text truncated from {} to {} chars",
            extracted_chars, char_limit
        );
    }
    Ok(truncated.to_string())
}

/// Summarizes text with the shared summarization model using beam search.
pub struct Summarizer {
    model: ModelHandle,
    max_input_tokens: usize,
    document_char_limit: usize,
    params: GenerationParams,
}

impl Summarizer {
    pub fn new(model: ModelHandle, config: &SummarizationConfig) -> Self {
        Self {
            model,
            max_input_tokens: config.max_input_tokens.max(1),
            document_char_limit: config.document_char_limit,
            params: config.generation_params(),
        }
    }

    /// Summarize free text with the configured length bounds.
    pub async fn summarize(&self, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyInput("text to summarize").into());
        }
        self.generate(text, self.params).await
    }

    /// Summarize with the length bounds carried by the request.
    pub async fn summarize_request(&self, request: &SummarizationRequest) -> Result<String> {
        let params = GenerationParams {
            min_length: Some(request.min_length),
            max_length: Some(request.max_length),
            ..self.params
        };
        self.generate(&request.text, params).await
    }

    /// Extract a PDF's text, cap it to the document character limit and
    /// summarize it. No model call happens when extraction finds no text.
    pub async fn summarize_document(&self, document_bytes: &[u8]) -> Result<String> {
        let text = self.prepare_document(document_bytes)?;
        self.generate(&text, self.params).await
    }

    /// Extracted and truncated text that a document summary is built from
    pub fn prepare_document(&self, document_bytes: &[u8]) -> Result<String> {
        prepare_document_text(document_bytes, self.document_char_limit)
    }

    pub fn document_char_limit(&self) -> usize {
        self.document_char_limit
    }

    async fn generate(&self, text: &str, params: GenerationParams) -> Result<String> {
        let request = GenerationRequest::new(text, self.max_input_tokens).with_params(params);
        debug!(
            "Summarizing {} chars (beams {:?}, length {:?}..{:?})",
            text.chars().count(),
            params.num_beams,
            params.min_length,
            params.max_length
        );
        self.model.generate(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{build_pdf, RecordingModel};
    use crate::Error;
    use std::sync::Arc;

    fn summarizer(model: &Arc<RecordingModel>) -> Summarizer {
        Summarizer::new(model.handle(), &SummarizationConfig::default())
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
    }

    #[tokio::test]
    async fn test_summarize_uses_beam_search_parameters() {
        let model = RecordingModel::replying("A short summary.");
        let summary = summarizer(&model).summarize("A long article body.").await.unwrap();
        assert_eq!(summary, "A short summary.");

        let requests = model.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.max_input_tokens, 1024);
        assert_eq!(request.source_language, None);
        assert_eq!(request.forced_target_language, None);
        assert_eq!(
            request.params,
            GenerationParams {
                num_beams: Some(4),
                length_penalty: Some(2.0),
                min_length: Some(50),
                max_length: Some(150),
                early_stopping: Some(true),
            }
        );
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected_before_model() {
        let model = RecordingModel::replying("unused");
        let err = summarizer(&model).summarize("  ").await.unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::EmptyInput(_))));
        assert!(model.requests().is_empty());
    }

    #[tokio::test]
    async fn test_request_bounds_override_defaults() {
        let model = RecordingModel::replying("Summary");
        let request = SummarizationRequest::new("Body text", 10, 40).unwrap();
        summarizer(&model).summarize_request(&request).await.unwrap();

        let params = model.requests()[0].params;
        assert_eq!(params.min_length, Some(10));
        assert_eq!(params.max_length, Some(40));
        assert_eq!(params.num_beams, Some(4));
    }

    #[tokio::test]
    async fn test_document_without_text_is_extraction_error() {
        let model = RecordingModel::replying("unused");
        let pdf = build_pdf(&["", ""]);
        let err = summarizer(&model).summarize_document(&pdf).await.unwrap_err();
        assert!(matches!(err, Error::Extraction(ExtractionError::NoText)));
        assert!(model.requests().is_empty());
    }

    #[tokio::test]
    async fn test_long_document_truncated_before_model_call() {
        let model = RecordingModel::replying("Summary");
        let long_page = "abcdefghij".repeat(500);
        let pdf = build_pdf(&[long_page.as_str(), "tail page"]);

        summarizer(&model).summarize_document(&pdf).await.unwrap();

        let requests = model.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].text.chars().count(), 4096);
        assert!(requests[0].text.starts_with("abcdefghij"));
        assert!(!requests[0].text.contains("tail page"));
    }

    #[tokio::test]
    async fn test_short_document_passes_whole_text() {
        let model = RecordingModel::replying("Summary");
        let pdf = build_pdf(&["Quarterly results", "Revenue grew"]);

        let text = summarizer(&model).prepare_document(&pdf).unwrap();
        assert!(text.contains("Quarterly results"));
        assert!(text.contains("Revenue grew"));
        assert!(model.requests().is_empty());
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let model = RecordingModel::failing();
        let err = summarizer(&model).summarize("Body").await.unwrap_err();
        assert!(matches!(err, Error::ModelInference(_)));
    }
}
