//! Parser for model replies.
//!
//! The reply is expected to be a JSON object with a `command` and an
//! `explanation`. Decoding is strict: anything that is not valid JSON
//! of that shape is an error, and the caller treats it as terminal for
//! the invocation. Missing fields inside a well-formed object fall
//! back to documented defaults instead.

use serde::Deserialize;

/// Explanation used when the model omits one.
pub const DEFAULT_EXPLANATION: &str = "No explanation provided.";

/// The structured (command, explanation) pair derived from a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandProposal {
    pub command: String,
    pub explanation: String,
}

#[derive(Deserialize)]
struct RawProposal {
    #[serde(default)]
    command: String,
    explanation: Option<String>,
}

/// Strict JSON decode of a reply into a [`CommandProposal`].
///
/// Extra keys are tolerated; a missing `command` decodes to the empty
/// string and a missing `explanation` to [`DEFAULT_EXPLANATION`].
pub fn parse_command_proposal(raw: &str) -> Result<CommandProposal, serde_json::Error> {
    let parsed: RawProposal = serde_json::from_str(raw)?;
    Ok(CommandProposal {
        command: parsed.command,
        explanation: parsed
            .explanation
            .unwrap_or_else(|| DEFAULT_EXPLANATION.to_string()),
    })
}
