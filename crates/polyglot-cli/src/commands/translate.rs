use std::process::ExitCode;

use anyhow::Result;

use polyglot_core::{on_translate_click, AppConfig, Services};

pub async fn run(
    config: &AppConfig,
    from: Option<String>,
    to: Option<String>,
    text: Option<String>,
) -> Result<ExitCode> {
    let text = super::text_or_stdin(text)?;
    let source = from.unwrap_or_else(|| config.translation.default_source.clone());
    let target = to.unwrap_or_else(|| config.translation.default_target.clone());

    let services = Services::from_config(config)?;
    let outcome = on_translate_click(&services, &text, &source, &target).await?;
    super::report(outcome)
}
