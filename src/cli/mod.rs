//! CLI command definitions and parsing
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "recollect",
    version,
    author = "neur0map",
    about = "Ask questions about your meeting and document summaries",
    long_about = "Recollect classifies a free-text question, extracts dates, people and topics, \
                  filters your summary corpus accordingly, ranks what is left and answers \
                  conversationally with follow-up suggestions."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/recollect/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a question about a user's summaries
    Ask {
        /// Question to ask
        question: String,

        /// User whose summaries are searched
        #[arg(short, long)]
        user: String,

        /// JSON corpus file: {"<user id>": [summary, ...]}
        #[arg(long, value_name = "FILE")]
        corpus: PathBuf,

        /// Resolve relative dates against this day instead of today
        #[arg(long, value_name = "YYYY-MM-DD")]
        today: Option<NaiveDate>,

        /// Show the response in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Suggest questions based on a user's summaries
    Suggest {
        /// User whose summaries are analysed
        #[arg(short, long)]
        user: String,

        /// JSON corpus file
        #[arg(long, value_name = "FILE")]
        corpus: PathBuf,
    },

    /// Show how a question is parsed (intent, entities, filters)
    Parse {
        /// Question to parse
        question: String,

        /// Resolve relative dates against this day instead of today
        #[arg(long, value_name = "YYYY-MM-DD")]
        today: Option<NaiveDate>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the default configuration path
    Path,

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from([
            "recollect",
            "ask",
            "What did we decide?",
            "--user",
            "alice",
            "--corpus",
            "corpus.json",
            "--today",
            "2024-03-13",
        ])
        .unwrap();

        match cli.command {
            Commands::Ask {
                question,
                user,
                today,
                json,
                ..
            } => {
                assert_eq!(question, "What did we decide?");
                assert_eq!(user, "alice");
                assert_eq!(today, NaiveDate::from_ymd_opt(2024, 3, 13));
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
