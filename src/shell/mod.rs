//! Shell module for gated command execution.

mod exec;

pub use exec::{ExecutionOutcome, GateDecision, SkipReason, gate_command, run_command};
