use std::env;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use agent_chat_rest_client::{RestConfig, RestConfigBuilder};

const ENV_BASE_URL: &str = "AGENT_CHAT_BASE_URL";
const ENV_WEBHOOK_PATH: &str = "AGENT_CHAT_WEBHOOK_PATH";
const ENV_SENDER_ID: &str = "AGENT_CHAT_SENDER_ID";
const ENV_TIMEOUT_SECS: &str = "AGENT_CHAT_TIMEOUT_SECS";
const ENV_GREETING: &str = "AGENT_CHAT_GREETING";

/// An invalid configuration value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The timeout is not a positive number of seconds.
    InvalidTimeout(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTimeout(value) => write!(
                f,
                "{ENV_TIMEOUT_SECS} must be a positive number of seconds, got {value:?}"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Settings of one chat session.
///
/// Unset fields fall back to the defaults of the REST client and the
/// widget.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Base URL of the agent server.
    pub base_url: Option<String>,
    /// Path of the REST webhook on the agent server.
    pub webhook_path: Option<String>,
    /// Sender id of this session.
    pub sender_id: Option<String>,
    /// Timeout of each request.
    pub timeout: Option<Duration>,
    /// Message shown by the bot when the session starts.
    pub greeting: Option<String>,
}

impl SessionConfig {
    /// Reads the configuration from `AGENT_CHAT_*` environment variables.
    #[inline]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable
    /// name to its value. Empty values count as unset.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout = match get(ENV_TIMEOUT_SECS) {
            Some(value) => {
                let timeout = value
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|secs| *secs > 0.0)
                    .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                    .ok_or_else(|| ConfigError::InvalidTimeout(value.clone()))?;
                Some(timeout)
            }
            None => None,
        };

        Ok(Self {
            base_url: get(ENV_BASE_URL),
            webhook_path: get(ENV_WEBHOOK_PATH),
            sender_id: get(ENV_SENDER_ID),
            timeout,
            greeting: get(ENV_GREETING),
        })
    }

    /// Returns the REST client configuration for this session.
    pub fn rest_config(&self) -> RestConfig {
        let mut builder = RestConfigBuilder::new();
        if let Some(base_url) = &self.base_url {
            builder = builder.with_base_url(base_url);
        }
        if let Some(path) = &self.webhook_path {
            builder = builder.with_webhook_path(path);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.with_timeout(timeout);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(
        vars: &[(&str, &str)],
    ) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SessionConfig::from_lookup(lookup_in(&[])).unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(
            config.rest_config().endpoint(),
            "http://localhost:5005/webhooks/rest/webhook"
        );
    }

    #[test]
    fn test_all_values() {
        let config = SessionConfig::from_lookup(lookup_in(&[
            ("AGENT_CHAT_BASE_URL", "http://bot.internal:8080"),
            ("AGENT_CHAT_WEBHOOK_PATH", "/webhooks/custom/webhook"),
            ("AGENT_CHAT_SENDER_ID", "alice"),
            ("AGENT_CHAT_TIMEOUT_SECS", "2.5"),
            ("AGENT_CHAT_GREETING", "Hello! How can I help you today?"),
        ]))
        .unwrap();

        assert_eq!(config.sender_id.as_deref(), Some("alice"));
        assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
        assert_eq!(
            config.greeting.as_deref(),
            Some("Hello! How can I help you today?")
        );
        assert_eq!(
            config.rest_config().endpoint(),
            "http://bot.internal:8080/webhooks/custom/webhook"
        );
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = SessionConfig::from_lookup(lookup_in(&[
            ("AGENT_CHAT_SENDER_ID", "  "),
            ("AGENT_CHAT_TIMEOUT_SECS", ""),
        ]))
        .unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_invalid_timeout() {
        for value in ["soon", "0", "-3", "NaN", "inf", "1e300"] {
            let err = SessionConfig::from_lookup(lookup_in(&[(
                "AGENT_CHAT_TIMEOUT_SECS",
                value,
            )]))
            .unwrap_err();
            assert_eq!(err, ConfigError::InvalidTimeout(value.to_owned()));
        }
    }
}
