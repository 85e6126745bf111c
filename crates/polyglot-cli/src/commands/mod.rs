pub mod config;
pub mod languages;
pub mod serve;
pub mod summarize;
pub mod translate;

use std::io::Read;
use std::process::ExitCode;

use anyhow::{bail, Result};

use polyglot_core::ActionOutcome;

/// Print an action's result. Warnings go to stderr with a non-zero exit.
pub fn report(outcome: ActionOutcome) -> Result<ExitCode> {
    match outcome {
        ActionOutcome::Success { output, message } => {
            println!("{}", output);
            tracing::info!("{}", message);
            Ok(ExitCode::SUCCESS)
        }
        ActionOutcome::Warning { message } => {
            eprintln!("Warning: {}", message);
            Ok(ExitCode::from(2))
        }
        ActionOutcome::Failure { message } => bail!(message),
    }
}

/// Use the argument when present, otherwise read all of stdin.
pub fn text_or_stdin(text: Option<String>) -> Result<String> {
    match text {
        Some(text) if text != "-" => Ok(text),
        _ => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(exit: ExitCode) -> String {
        format!("{:?}", exit)
    }

    #[test]
    fn test_report_exit_codes() {
        let ok = report(ActionOutcome::success("Hallo", "Translation Complete!")).unwrap();
        assert_eq!(code(ok), code(ExitCode::SUCCESS));

        let warned = report(ActionOutcome::warning("Please enter text to translate.")).unwrap();
        assert_eq!(code(warned), code(ExitCode::from(2)));

        let err = report(ActionOutcome::failure("Could not extract text")).unwrap_err();
        assert_eq!(err.to_string(), "Could not extract text");
    }

    #[test]
    fn test_text_argument_used_verbatim() {
        assert_eq!(text_or_stdin(Some("Hello".to_string())).unwrap(), "Hello");
    }
}
