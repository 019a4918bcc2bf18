//! CLI module for LocalRAG
//!
//! - `serve`: HTTP API
//! - `ask`: answer one question and exit
//! - `collections`: list the backend's collections

pub mod ask;
pub mod collections;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// LocalRAG - corrective RAG over RAGFlow and an OpenAI-compatible model
#[derive(Parser)]
#[command(name = "localrag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Answer a single question
    Ask(ask::AskArgs),

    /// List available collections
    Collections(collections::CollectionsArgs),
}

/// Load `.env`, then layered config, then install logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_with_collections() {
        let cli = Cli::try_parse_from([
            "localrag",
            "ask",
            "What is the return policy?",
            "--collection",
            "kb-1",
            "--collection",
            "kb-2",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Command::Ask(args) => {
                assert_eq!(args.question, "What is the return policy?");
                assert_eq!(args.collection, vec!["kb-1", "kb-2"]);
                assert!(args.json);
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["localrag", "serve"]).unwrap();

        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_ask_requires_question() {
        assert!(Cli::try_parse_from(["localrag", "ask"]).is_err());
    }
}
