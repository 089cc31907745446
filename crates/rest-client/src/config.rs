use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:5005";
const DEFAULT_WEBHOOK_PATH: &str = "/webhooks/rest/webhook";

/// Builder for [`RestConfig`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RestConfigBuilder {
    base_url: Option<String>,
    webhook_path: Option<String>,
    timeout: Option<Duration>,
}

impl RestConfigBuilder {
    /// Creates a builder with every option left at its default.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom base URL, e.g. `http://localhost:5005`.
    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets a custom webhook path.
    #[inline]
    pub fn with_webhook_path<S: Into<String>>(mut self, path: S) -> Self {
        self.webhook_path = Some(path.into());
        self
    }

    /// Sets a timeout for each request. Requests have no timeout by
    /// default.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> RestConfig {
        RestConfig {
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            webhook_path: self
                .webhook_path
                .unwrap_or_else(|| DEFAULT_WEBHOOK_PATH.to_string()),
            timeout: self.timeout,
        }
    }
}

/// Configuration for the REST webhook client.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RestConfig {
    pub(crate) base_url: String,
    pub(crate) webhook_path: String,
    pub(crate) timeout: Option<Duration>,
}

impl RestConfig {
    /// Returns the full URL that messages are posted to.
    pub fn endpoint(&self) -> String {
        let base_url = self.base_url.trim_end_matches('/');
        if self.webhook_path.starts_with('/') {
            format!("{base_url}{}", self.webhook_path)
        } else {
            format!("{base_url}/{}", self.webhook_path)
        }
    }
}

impl Default for RestConfig {
    #[inline]
    fn default() -> Self {
        RestConfigBuilder::new().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let config = RestConfig::default();
        assert_eq!(
            config.endpoint(),
            "http://localhost:5005/webhooks/rest/webhook"
        );
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_custom_endpoint() {
        let config = RestConfigBuilder::new()
            .with_base_url("https://bot.example.com/")
            .with_webhook_path("webhooks/custom/webhook")
            .with_timeout(Duration::from_secs(5))
            .build();
        assert_eq!(
            config.endpoint(),
            "https://bot.example.com/webhooks/custom/webhook"
        );
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }
}
