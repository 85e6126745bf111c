use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use polyglot_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "polyglot")]
#[command(author, version, about = "Translate and summarize text or PDFs with pretrained seq2seq models")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web interface (default)
    Serve {
        /// Address to bind, overrides server.host
        #[arg(long)]
        host: Option<String>,
        /// Port to bind, overrides server.port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Translate text between two languages
    Translate {
        /// Source language code or name
        #[arg(short, long = "from")]
        from: Option<String>,
        /// Target language code or name
        #[arg(short, long = "to")]
        to: Option<String>,
        /// Text to translate; read from stdin when omitted
        text: Option<String>,
    },
    /// Summarize text or a PDF document
    Summarize {
        /// PDF file to summarize instead of text
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Text to summarize; read from stdin when neither text nor --file is given
        text: Option<String>,
    },
    /// List supported languages
    Languages,
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// `config path` and `config init` must work even when the existing file is invalid.
fn needs_config(command: &Option<Commands>) -> bool {
    !matches!(
        command,
        Some(Commands::Config {
            action: ConfigAction::Path | ConfigAction::Init { .. }
        })
    )
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if !needs_config(&cli.command) {
        if let Some(Commands::Config { action }) = cli.command {
            match action {
                ConfigAction::Init { force } => commands::config::init(force)?,
                _ => commands::config::path(),
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging; RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = Arc::new(config);

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            commands::serve::run(config, host, port).await?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            commands::serve::run(config, None, None).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Translate { from, to, text }) => {
            commands::translate::run(&config, from, to, text).await
        }
        Some(Commands::Summarize { file, text }) => {
            commands::summarize::run(&config, file, text).await
        }
        Some(Commands::Languages) => {
            commands::languages::run();
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Config { action }) => {
            match action {
                ConfigAction::Show => commands::config::show(&config)?,
                ConfigAction::Path => commands::config::path(),
                ConfigAction::Init { force } => commands::config::init(force)?,
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
