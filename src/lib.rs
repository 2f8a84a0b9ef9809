//! rusty-tc - turn a natural-language request into a shell command.
//!
//! This library provides the decision pipeline behind the `tc` binary:
//! - Prompt construction from a configurable template
//! - A single chat-completion call to the configured provider
//! - Strict parsing of the reply into a command/explanation pair
//! - Two-stage suspicious-command screening
//! - Execution gating and shell spawning
//!
//! # Example
//!
//! ```no_run
//! use rusty_tc::ai::{LlmClient, fetch_command, parse_command_proposal};
//! use rusty_tc::config::Config;
//! use rusty_tc::security::detect_suspicious_command;
//! use rusty_tc::shell::{GateDecision, gate_command, run_command};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let client = LlmClient::new();
//!
//!     let raw = fetch_command(&client, &config, "list all files").await;
//!     let proposal = parse_command_proposal(&raw)?;
//!
//!     let suspicious = detect_suspicious_command(&client, &config, &proposal.command).await;
//!     if gate_command(true, suspicious) == GateDecision::Execute {
//!         run_command(&proposal.command).await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod ai;
pub mod cli;
pub mod config;
pub mod output;
pub mod security;
pub mod shell;
pub mod utils;

// Re-export commonly used types
pub use ai::{ChatBackend, CommandProposal, LlmClient, LlmError};
pub use config::Config;
pub use shell::{ExecutionOutcome, GateDecision, SkipReason};
