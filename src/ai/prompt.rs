//! Prompt building for inference requests.
//!
//! The user prompt comes from a configurable template with named
//! placeholders; the system prompts are fixed strings that pin the
//! reply format the rest of the pipeline relies on.

use crate::config::Config;

/// System prompt for command generation. The reply must be a JSON
/// object holding exactly `command` and `explanation`.
pub const COMMAND_SYSTEM_PROMPT: &str = "You are an AI that returns JSON with the following keys:\n\
     command (the final command to run) and explanation (a brief summary). \
     Do not include extra keys.";

/// System prompt for the second-stage safety check. The reply must be
/// the literal word True or False.
pub const DETECTION_SYSTEM_PROMPT: &str =
    "You are an expert in shell command safety analysis. \
     Answer strictly with 'True' if a command is dangerous, else 'False'.";

/// Substitute named `{placeholder}` values into a template.
///
/// Plain string replacement: placeholders absent from the template are
/// simply unused, and unknown text in the template passes through.
pub fn render_template(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (name, value) in substitutions {
        rendered = rendered.replace(&format!("{{{name}}}"), value);
    }
    rendered
}

/// Build the user prompt from the configured template, the query, and
/// the local operating system name.
///
/// An absent template renders to the empty string, which is still a
/// valid (if useless) inference input.
pub fn build_user_prompt(config: &Config, user_query: &str) -> String {
    let template = config.prompt_template.as_deref().unwrap_or("");
    render_template(
        template,
        &[("user_query", user_query), ("os", std::env::consts::OS)],
    )
}
