//! Execution gating and shell command spawning.
//!
//! The gate is the single place that decides whether a proposed command
//! runs. Execution hands the full command string to the user's shell as
//! one `-c` argument: deliberately full shell execution, gated entirely
//! by the safety verdict rather than a sandbox.

use tokio::process::Command;

/// Outcome of the execute/skip decision for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Run the command now.
    Execute,
    /// Do not run the command; not an error.
    Skip(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The execute flag was not given.
    NotRequested,
    /// The safety check flagged the command.
    FlaggedSuspicious,
}

/// Single entrypoint for all execution decisions.
///
/// A command runs only when execution was requested and the verdict is
/// clean; every other combination skips.
pub fn gate_command(execute: bool, suspicious: bool) -> GateDecision {
    match (execute, suspicious) {
        (true, false) => GateDecision::Execute,
        (true, true) => GateDecision::Skip(SkipReason::FlaggedSuspicious),
        (false, _) => GateDecision::Skip(SkipReason::NotRequested),
    }
}

/// Exit information for a command that was actually spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub success: bool,
    /// Exit code, when the process exited normally.
    pub exit_code: Option<i32>,
}

fn default_shell() -> String {
    // Prefer the user's configured shell, but keep a safe fallback.
    std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
}

/// Run the command through the shell and wait for it to finish.
///
/// Stdio is inherited so the command talks to the terminal directly.
/// A non-zero exit is reported in the outcome, not as an error; `Err`
/// means the shell itself could not be spawned.
pub async fn run_command(command: &str) -> anyhow::Result<ExecutionOutcome> {
    let shell = default_shell();
    let status = Command::new(shell).arg("-c").arg(command).status().await?;

    Ok(ExecutionOutcome {
        success: status.success(),
        exit_code: status.code(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_executes_only_when_requested_and_clean() {
        assert_eq!(gate_command(true, false), GateDecision::Execute);
        assert_eq!(
            gate_command(true, true),
            GateDecision::Skip(SkipReason::FlaggedSuspicious)
        );
        assert_eq!(
            gate_command(false, false),
            GateDecision::Skip(SkipReason::NotRequested)
        );
        assert_eq!(
            gate_command(false, true),
            GateDecision::Skip(SkipReason::NotRequested)
        );
    }

    #[tokio::test]
    async fn test_run_command_success() {
        let outcome = run_command("true").await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.exit_code, Some(0));
    }

    #[tokio::test]
    async fn test_run_command_nonzero_exit_is_not_an_error() {
        let outcome = run_command("exit 3").await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, Some(3));
    }

    #[tokio::test]
    async fn test_run_command_goes_through_a_shell() {
        // Shell-only syntax must work, since the whole string is handed
        // to the shell as a single -c argument.
        let outcome = run_command("x=42; test \"$x\" = 42").await.unwrap();
        assert!(outcome.success);
    }
}
