use thiserror::Error;

/// Input problems detected before any model call.
///
/// These are surfaced to the user as warnings; the requested operation is
/// simply not performed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter {0}.")]
    EmptyInput(&'static str),

    #[error("Source and target languages must be different.")]
    InvalidLanguagePair(String),

    #[error("Unsupported language: {0}")]
    UnknownLanguage(String),

    #[error("Invalid summary length bounds: min {min} is greater than max {max}")]
    InvalidLengthBounds { min: usize, max: usize },
}

/// Failures turning an uploaded document into text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Extraction produced no text")]
    NoText,

    #[error("Could not read document: {0}")]
    Unreadable(String),

    #[error("Unsupported document format, only PDF files are accepted")]
    UnsupportedFormat,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Model inference error: {0}")]
    ModelInference(String),

    #[error("Model load error: {0}")]
    ModelLoad(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error should be shown to the user as a warning rather
    /// than a failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
