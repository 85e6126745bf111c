//! Model handles and the provider that loads them.
//!
//! A [`ModelHandle`] is a loaded model+tokenizer pair living behind the
//! [`Seq2SeqModel`] trait. The translator and summarizer only ever see the
//! trait, so the inference backend can be swapped without touching them.

mod provider;
mod remote;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Result;

pub use provider::{ModelLoader, ModelProvider};
pub use remote::{InferenceModel, RemoteModelLoader};

/// Shared, process-wide handle to a loaded model.
pub type ModelHandle = Arc<dyn Seq2SeqModel>;

/// Which pretrained model a handle serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Translation,
    Summarization,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Translation => f.write_str("translation"),
            ModelKind::Summarization => f.write_str("summarization"),
        }
    }
}

/// Identifies the model to load for a given kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub kind: ModelKind,
    pub model_id: String,
}

impl ModelSpec {
    pub fn new(kind: ModelKind, model_id: impl Into<String>) -> Self {
        Self {
            kind,
            model_id: model_id.into(),
        }
    }
}

/// Decoding parameters. `None` leaves the model's own default in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub num_beams: Option<usize>,
    pub length_penalty: Option<f32>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub early_stopping: Option<bool>,
}

/// Everything a model needs to encode, generate and decode one input.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub text: String,
    /// Encoder input is truncated to this many tokens
    pub max_input_tokens: usize,
    /// Language the tokenizer should treat the input as
    pub source_language: Option<String>,
    /// Language the decoder's first output token is forced to
    pub forced_target_language: Option<String>,
    pub params: GenerationParams,
}

impl GenerationRequest {
    pub fn new(text: impl Into<String>, max_input_tokens: usize) -> Self {
        Self {
            text: text.into(),
            max_input_tokens,
            source_language: None,
            forced_target_language: None,
            params: GenerationParams::default(),
        }
    }

    pub fn with_source_language(mut self, code: impl Into<String>) -> Self {
        self.source_language = Some(code.into());
        self
    }

    pub fn with_forced_target_language(mut self, code: impl Into<String>) -> Self {
        self.forced_target_language = Some(code.into());
        self
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }
}

/// A loaded sequence-to-sequence model.
///
/// Implementations return the decoded output with special tokens stripped,
/// or an error; never partial text.
#[async_trait::async_trait]
pub trait Seq2SeqModel: Send + Sync {
    fn model_id(&self) -> &str;

    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}
