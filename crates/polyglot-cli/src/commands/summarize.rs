use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};

use polyglot_core::{on_summarize_click, on_summarize_document_click, AppConfig, Services};

pub async fn run(config: &AppConfig, file: Option<PathBuf>, text: Option<String>) -> Result<ExitCode> {
    let services = Services::from_config(config)?;

    let outcome = match file {
        Some(path) => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            on_summarize_document_click(&services, &bytes).await?
        }
        None => {
            let text = super::text_or_stdin(text)?;
            on_summarize_click(&services, &text).await?
        }
    };

    super::report(outcome)
}
