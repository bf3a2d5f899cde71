//! Casebench - AI-assisted test case workbench library
//!
//! This library provides the in-memory state behind the Casebench
//! workbench: task history with chat transcripts, per-task version
//! history, test case sets per version, and the simulated progress timer
//! that gates generation and AI modification.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `store`: task, version and test case stores
//! - `progress`: cancellable simulated progress runs
//! - `workbench`: the context object tying the stores together
//! - `generator`, `assistant`: mock collaborators producing cases and replies
//! - `export`: CSV spreadsheet export
//! - `auth`: mock authentication
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use casebench::{Config, Workbench};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let mut workbench = Workbench::seeded(&config)?;
//!     workbench.select_version("1", "1-v1")?;
//!     workbench.send_chat("1", "Add a lockout case").await?;
//!     Ok(())
//! }
//! ```

pub mod assistant;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod fixtures;
pub mod generator;
pub mod model;
pub mod progress;
pub mod store;
pub mod workbench;

// Re-export commonly used types
pub use config::Config;
pub use error::{CasebenchError, Result, StoreResult};
pub use model::{CaseFilter, Message, Priority, Sender, Task, TestCase, TestCasePatch, Version};
pub use progress::ProgressEmitter;
pub use workbench::{ChatOutcome, Workbench};

#[cfg(test)]
pub mod test_utils;
