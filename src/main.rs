//! Main entry point for the tc binary.
//!
//! Parses arguments, loads the configuration once, and drives the
//! pipeline: prompt → inference → parse → safety check → execution
//! gate. Exit codes are structured per failure class: 0 for a completed
//! invocation (including skipped execution), 1 when the executed
//! command failed, 2 when the model reply could not be parsed, 3 when
//! the configuration file could not be loaded.

use std::process::ExitCode;

use clap::Parser;

use rusty_tc::ai::{LlmClient, fetch_command, parse_command_proposal};
use rusty_tc::cli::Cli;
use rusty_tc::config::{self, Config};
use rusty_tc::output::Reporter;
use rusty_tc::security::detect_suspicious_command;
use rusty_tc::shell::{GateDecision, SkipReason, gate_command, run_command};
use rusty_tc::utils;

const EXIT_BAD_RESPONSE: u8 = 2;
const EXIT_BAD_CONFIG: u8 = 3;

#[tokio::main]
async fn main() -> ExitCode {
    utils::logger::init_logging();

    let cli = Cli::parse();

    let config = match config::load(&config::default_config_path()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::from(EXIT_BAD_CONFIG);
        }
    };

    run(cli, config).await
}

async fn run(cli: Cli, config: Config) -> ExitCode {
    let reporter = Reporter::new(config.verbosity());
    let client = LlmClient::new();
    let user_query = cli.joined_query();

    let raw = fetch_command(&client, &config, &user_query).await;

    let proposal = match parse_command_proposal(&raw) {
        Ok(proposal) => proposal,
        Err(err) => {
            reporter.detail(format!("Error: Could not parse LLM response as JSON: {err}"));
            reporter.detail(format!("Raw response: {raw}"));
            return ExitCode::from(EXIT_BAD_RESPONSE);
        }
    };

    let suspicious = detect_suspicious_command(&client, &config, &proposal.command).await;
    let threat_level = if suspicious { "suspicious" } else { "safe" };

    reporter.status(format!("Command ({threat_level}): {}", proposal.command));
    reporter.detail(format!("Explanation: {}", proposal.explanation));
    if suspicious {
        reporter.status("WARNING: The command is detected as potentially dangerous.");
    }

    match gate_command(cli.execute, suspicious) {
        GateDecision::Execute => {
            reporter.detail("Executing command...");
            match run_command(&proposal.command).await {
                Ok(outcome) if outcome.success => ExitCode::SUCCESS,
                Ok(outcome) => {
                    let code = outcome
                        .exit_code
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "signal".to_string());
                    reporter.detail(format!("Command failed: exit status {code}"));
                    ExitCode::FAILURE
                }
                Err(err) => {
                    reporter.detail(format!("Command failed: {err:#}"));
                    ExitCode::FAILURE
                }
            }
        }
        GateDecision::Skip(SkipReason::FlaggedSuspicious) => {
            reporter.detail("Skipping execution: command flagged as dangerous.");
            ExitCode::SUCCESS
        }
        GateDecision::Skip(SkipReason::NotRequested) => ExitCode::SUCCESS,
    }
}
