//! Two-stage suspicious-command detection.
//!
//! Stage 1 scans the candidate for configured substrings; the first hit
//! classifies it as suspicious and nothing else runs. Stage 2, when
//! enabled, asks a provider for a True/False verdict. An unconfigured
//! detection provider classifies as suspicious; any reply other than a
//! case-insensitive "true" classifies as not suspicious. The two
//! branches deliberately default in opposite directions; do not align
//! them without revisiting every deployment that relies on it.

use tracing::{debug, warn};

use crate::ai::client::{ChatBackend, ChatRequest};
use crate::ai::prompt::{DETECTION_SYSTEM_PROMPT, render_template};
use crate::config::Config;

/// Detection prompt used when the config does not supply one.
pub const DEFAULT_DETECTION_TEMPLATE: &str = "Analyze command: {command}";

/// Classify a candidate command as suspicious (`true`) or not.
pub async fn detect_suspicious_command(
    backend: &dyn ChatBackend,
    config: &Config,
    command: &str,
) -> bool {
    let detection = &config.suspicious_command_detection;

    // Stage 1: case-sensitive substring containment, configured order.
    for substring in &detection.suspicious_substrings {
        if command.contains(substring.as_str()) {
            debug!(%substring, "command matched suspicious substring");
            return true;
        }
    }

    let provider_detection = &detection.provider_detection;
    if !provider_detection.enabled {
        return false;
    }

    // Stage 2: provider verdict. No configured provider means no way to
    // decide, so the command is treated as suspicious.
    let provider_name = provider_detection.provider();
    let Some(provider) = config.provider(provider_name) else {
        warn!(
            provider = provider_name,
            "detection provider not configured, treating command as suspicious"
        );
        return true;
    };

    let template = provider_detection
        .prompt_template
        .as_deref()
        .unwrap_or(DEFAULT_DETECTION_TEMPLATE);
    let detection_prompt = render_template(template, &[("command", command)]);
    let request = ChatRequest::new(provider.model(), DETECTION_SYSTEM_PROMPT, detection_prompt);

    let answer = match backend
        .complete(provider.api_url(), provider.api_key(), &request)
        .await
    {
        Ok(answer) => answer,
        Err(err) => {
            warn!(provider = provider_name, error = %err, "detection request failed");
            // The fallback payload never compares equal to "true", so a
            // failed detection call classifies as not suspicious.
            err.fallback_payload()
        }
    };

    answer.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::client::LlmError;
    use async_trait::async_trait;

    /// Backend returning a fixed reply, or an error when `reply` is None.
    struct FixedBackend {
        reply: Option<String>,
    }

    impl FixedBackend {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
            }
        }

        fn failing() -> Self {
            Self { reply: None }
        }
    }

    #[async_trait]
    impl ChatBackend for FixedBackend {
        async fn complete(
            &self,
            _api_url: &str,
            _api_key: &str,
            _request: &ChatRequest,
        ) -> Result<String, LlmError> {
            self.reply.clone().ok_or(LlmError::MissingContent)
        }
    }

    /// Backend that panics if reached; used to prove short-circuits.
    struct UnreachableBackend;

    #[async_trait]
    impl ChatBackend for UnreachableBackend {
        async fn complete(
            &self,
            _api_url: &str,
            _api_key: &str,
            _request: &ChatRequest,
        ) -> Result<String, LlmError> {
            panic!("no remote call expected");
        }
    }

    fn config(yaml: &str) -> Config {
        serde_yaml::from_str(yaml).unwrap()
    }

    const DETECTION_ENABLED: &str = r#"
providers:
  openai:
    api_key: sk-test
suspicious_command_detection:
  provider_detection:
    enabled: true
"#;

    #[tokio::test]
    async fn test_substring_match_is_suspicious() {
        let config = config(
            r#"
suspicious_command_detection:
  suspicious_substrings: ["rm -rf /"]
"#,
        );

        assert!(detect_suspicious_command(&UnreachableBackend, &config, "rm -rf /").await);
        assert!(
            detect_suspicious_command(&UnreachableBackend, &config, "sudo rm -rf / --no-preserve-root")
                .await
        );
    }

    #[tokio::test]
    async fn test_substring_match_is_case_sensitive() {
        let config = config(
            r#"
suspicious_command_detection:
  suspicious_substrings: ["rm -rf /"]
"#,
        );

        assert!(!detect_suspicious_command(&UnreachableBackend, &config, "RM -RF /tmp/x").await);
    }

    #[tokio::test]
    async fn test_substring_short_circuits_provider_detection() {
        // Detection is enabled but stage 1 hits first, so the panicking
        // backend must never be reached.
        let config = config(
            r#"
providers:
  openai:
    api_key: sk-test
suspicious_command_detection:
  suspicious_substrings: ["mkfs"]
  provider_detection:
    enabled: true
"#,
        );

        assert!(detect_suspicious_command(&UnreachableBackend, &config, "mkfs.ext4 /dev/sda").await);
    }

    #[tokio::test]
    async fn test_detection_disabled_is_not_suspicious() {
        let config = config("{}");
        assert!(!detect_suspicious_command(&UnreachableBackend, &config, "rm -rf /").await);
    }

    #[tokio::test]
    async fn test_unconfigured_detection_provider_fails_closed() {
        let config = config(
            r#"
suspicious_command_detection:
  provider_detection:
    enabled: true
    provider: missing
"#,
        );

        assert!(detect_suspicious_command(&UnreachableBackend, &config, "ls").await);
    }

    #[tokio::test]
    async fn test_provider_says_true_is_suspicious() {
        let config = config(DETECTION_ENABLED);

        assert!(detect_suspicious_command(&FixedBackend::replying("True"), &config, "ls").await);
        assert!(detect_suspicious_command(&FixedBackend::replying("true"), &config, "ls").await);
        assert!(detect_suspicious_command(&FixedBackend::replying("TRUE"), &config, "ls").await);
    }

    #[tokio::test]
    async fn test_provider_says_anything_else_is_not_suspicious() {
        let config = config(DETECTION_ENABLED);

        assert!(!detect_suspicious_command(&FixedBackend::replying("False"), &config, "ls").await);
        assert!(!detect_suspicious_command(&FixedBackend::replying(""), &config, "ls").await);
        assert!(
            !detect_suspicious_command(&FixedBackend::replying("True."), &config, "ls").await
        );
        assert!(
            !detect_suspicious_command(
                &FixedBackend::replying("maybe? hard to say"),
                &config,
                "ls"
            )
            .await
        );
    }

    #[tokio::test]
    async fn test_failed_detection_call_is_not_suspicious() {
        let config = config(DETECTION_ENABLED);

        assert!(!detect_suspicious_command(&FixedBackend::failing(), &config, "ls").await);
    }

    #[tokio::test]
    async fn test_detection_uses_custom_template() {
        // A template without the placeholder still works; the command
        // text is simply unused.
        let config = config(
            r#"
providers:
  openai:
    api_key: sk-test
suspicious_command_detection:
  provider_detection:
    enabled: true
    prompt_template: "Is this safe to run?"
"#,
        );

        assert!(detect_suspicious_command(&FixedBackend::replying("True"), &config, "ls").await);
    }
}
