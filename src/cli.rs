//! Command-line interface definition for Casebench
//!
//! This module defines the CLI structure using clap's derive API. Every
//! invocation works on a freshly seeded in-memory workbench.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Casebench - AI-assisted test case workbench
///
/// Browse generated test cases, chat with the (simulated) assistant to
/// revise them, and export them as a spreadsheet.
#[derive(Parser, Debug, Clone)]
#[command(name = "casebench")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Skip simulated delays (progress completes in one tick)
    #[arg(long, env = "CASEBENCH_INSTANT")]
    pub instant: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Casebench
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the task history
    Tasks {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the versions of a task
    Versions {
        /// Task id
        #[arg(short, long)]
        task: String,
    },

    /// List the test cases of a task
    Cases {
        #[command(flatten)]
        selection: CaseSelection,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Export test cases to a CSV spreadsheet
    Export {
        #[command(flatten)]
        selection: CaseSelection,

        /// Output file (defaults to `<prefix>-<task title>-<date>.csv`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate test cases from PRD input
    Generate {
        /// PRD text
        #[arg(long)]
        text: Option<String>,

        /// PRD URL
        #[arg(long)]
        url: Option<String>,

        /// PRD file name
        #[arg(long)]
        file: Option<String>,
    },

    /// Send a chat message to the assistant about a task
    Chat {
        /// Task id
        #[arg(short, long)]
        task: String,

        /// Message text
        message: String,
    },

    /// Sign in with the mock authenticator
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long, env = "CASEBENCH_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

/// Which task, version and filters a case listing applies to
#[derive(clap::Args, Debug, Clone)]
pub struct CaseSelection {
    /// Task id
    #[arg(short, long)]
    pub task: String,

    /// Version id (defaults to the active version)
    #[arg(long)]
    pub version: Option<String>,

    /// Only cases whose title contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only cases of this priority (high, medium, low)
    #[arg(short, long)]
    pub priority: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            instant: false,
            command: Commands::Tasks { json: false },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::Tasks { json: false }));
    }

    #[test]
    fn test_parse_cases_with_filters() {
        let cli = Cli::try_parse_from([
            "casebench",
            "cases",
            "--task",
            "1",
            "--version",
            "1-v1",
            "--priority",
            "high",
            "--search",
            "login",
        ])
        .unwrap();

        match cli.command {
            Commands::Cases { selection, json } => {
                assert_eq!(selection.task, "1");
                assert_eq!(selection.version.as_deref(), Some("1-v1"));
                assert_eq!(selection.priority.as_deref(), Some("high"));
                assert_eq!(selection.search.as_deref(), Some("login"));
                assert!(!json);
            }
            other => panic!("Expected Cases command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_chat_message() {
        let cli = Cli::try_parse_from([
            "casebench",
            "--instant",
            "chat",
            "--task",
            "2",
            "Add a refund case",
        ])
        .unwrap();

        assert!(cli.instant);
        match cli.command {
            Commands::Chat { task, message } => {
                assert_eq!(task, "2");
                assert_eq!(message, "Add a refund case");
            }
            other => panic!("Expected Chat command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_generate_requires_no_flags() {
        let cli = Cli::try_parse_from(["casebench", "generate", "--url", "https://x.test/prd"])
            .unwrap();
        match cli.command {
            Commands::Generate { text, url, file } => {
                assert!(text.is_none());
                assert_eq!(url.as_deref(), Some("https://x.test/prd"));
                assert!(file.is_none());
            }
            other => panic!("Expected Generate command, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["casebench"]).is_err());
    }
}
