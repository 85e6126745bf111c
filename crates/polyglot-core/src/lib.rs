pub mod config;
pub mod error;
pub mod language;
pub mod model;
pub mod request;
pub mod translator;
pub mod summarizer;
pub mod document;
pub mod handlers;
pub mod services;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use config::AppConfig;
pub use error::{Error, ExtractionError, Result, ValidationError};
pub use handlers::{on_summarize_click, on_summarize_document_click, on_translate_click, ActionOutcome};
pub use language::Language;
pub use model::{ModelHandle, ModelProvider};
pub use services::Services;
pub use summarizer::Summarizer;
pub use translator::Translator;
