//! Provider resolution for command generation.
//!
//! Resolves the configured default provider, builds the chat request,
//! and delegates to the [`ChatBackend`]. Every failure mode along the
//! way collapses to a command/explanation payload, so the caller always
//! receives reply text in the same shape.

use tracing::{debug, warn};

use crate::ai::client::{ChatBackend, ChatRequest};
use crate::ai::prompt::{self, COMMAND_SYSTEM_PROMPT};
use crate::config::Config;

/// Payload returned when the resolved provider is not configured.
fn unknown_provider_payload(name: &str) -> String {
    serde_json::json!({
        "command": "echo 'Unknown provider'",
        "explanation": format!("Provider '{name}' is not configured."),
    })
    .to_string()
}

/// Ask the configured provider for a command answering `user_query`.
///
/// Returns reply text that is expected (but not guaranteed) to be a
/// JSON command/explanation object. An unconfigured provider yields the
/// unknown-provider payload without any network call; a transport
/// failure yields the echo fallback payload.
pub async fn fetch_command(
    backend: &dyn ChatBackend,
    config: &Config,
    user_query: &str,
) -> String {
    let provider_name = config.default_provider();
    let Some(provider) = config.provider(provider_name) else {
        debug!(provider = provider_name, "provider not configured");
        return unknown_provider_payload(provider_name);
    };

    let user_prompt = prompt::build_user_prompt(config, user_query);
    let request = ChatRequest::new(provider.model(), COMMAND_SYSTEM_PROMPT, user_prompt);

    match backend
        .complete(provider.api_url(), provider.api_key(), &request)
        .await
    {
        Ok(content) => content,
        Err(err) => {
            warn!(provider = provider_name, error = %err, "command request failed");
            err.fallback_payload()
        }
    }
}
