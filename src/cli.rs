//! Command-line argument parsing.
//!
//! Kept separate from the pipeline so `main` stays a thin driver. The
//! surface is deliberately small: the query tokens and one flag.

use clap::Parser;

/// terminal-command (tc): suggests and executes shell commands using AI.
#[derive(Parser, Debug)]
#[command(name = "tc")]
#[command(about = "A CLI tool that suggests and executes shell commands using AI")]
pub struct Cli {
    /// The natural language description of what you want to do
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Automatically execute the returned command
    #[arg(short, long)]
    pub execute: bool,
}

impl Cli {
    /// The query tokens joined into a single request string.
    pub fn joined_query(&self) -> String {
        self.query.join(" ")
    }
}
