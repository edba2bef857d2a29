use anyhow::Result;
use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod chat;
pub mod history;

use crate::core::{AppConfig, ModelName};

// Long enough for the "working" line to show before the request
// blocks the loop
const DISPATCH_DELAY: Duration = Duration::from_millis(100);

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a chat session
    Chat {
        /// Model name shown to the user
        #[arg(long, value_enum, alias = "given_model")]
        given_model: ModelName,

        /// Model that actually answers
        #[arg(long, value_enum, alias = "true_model")]
        true_model: ModelName,

        /// OpenAI API key, defaults to OPENAI_API_KEY
        #[arg(long, alias = "openai_key")]
        openai_key: Option<String>,

        /// Anyscale API key, defaults to ANYSCALE_API_KEY
        #[arg(long, alias = "anyscale_key")]
        anyscale_key: Option<String>,

        /// Anthropic API key, defaults to ANTHROPIC_API_KEY
        #[arg(long, alias = "anthropic_key")]
        anthropic_key: Option<String>,

        /// Where to save the chat history on exit
        #[arg(long)]
        history_path: Option<String>,

        /// Prefix each turn in the prompt with who said it
        #[arg(long, action, default_value = "false")]
        label_turns: bool,
    },
    /// Print a saved chat history
    History {
        #[arg(long)]
        history_path: Option<String>,
    },
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

fn init_tracing() {
    // Logs go to stderr so they don't interleave with the chat
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn build_config(command: Command) -> Option<AppConfig> {
    let Command::Chat {
        given_model,
        true_model,
        openai_key,
        anyscale_key,
        anthropic_key,
        history_path,
        label_turns,
    } = command
    else {
        return None;
    };

    let mut config = AppConfig::from_env(given_model, true_model);
    if openai_key.is_some() {
        config.openai_api_key = openai_key;
    }
    if anyscale_key.is_some() {
        config.anyscale_api_key = anyscale_key;
    }
    if anthropic_key.is_some() {
        config.anthropic_api_key = anthropic_key;
    }
    if let Some(path) = history_path {
        config.history_path = path;
    }
    config.label_turns = label_turns;
    config.dispatch_delay = DISPATCH_DELAY;
    Some(config)
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    init_tracing();

    match args.command {
        Some(Command::History { history_path }) => {
            let path = history_path
                .or_else(|| std::env::var("CHATLOG_HISTORY_PATH").ok())
                .unwrap_or_else(|| crate::core::config::DEFAULT_HISTORY_PATH.to_string());
            history::run(&path)?;
        }
        Some(command) => {
            if let Some(config) = build_config(command) {
                chat::run(config).await?;
            }
        }
        None => {}
    }

    Ok(())
}
