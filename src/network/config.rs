use bon::Builder;

/// Topic served by the network manager unless configured otherwise.
pub const DEFAULT_NETWORK_TOPIC: &str = "network";

/// Environment variable that overrides the network topic.
pub const NETWORK_TOPIC_ENV: &str = "NETWORK_TOPIC";

/// Configuration for the network RPC client.
#[derive(Debug, Clone, Builder)]
pub struct NetworkApiConfig {
    /// Base topic the network managers consume (e.g., "network").
    /// Host-scoped messages go to `{topic}.{host}`.
    /// An empty topic falls back to [`DEFAULT_NETWORK_TOPIC`].
    #[builder(default = DEFAULT_NETWORK_TOPIC.to_string())]
    pub topic: String,
}

impl NetworkApiConfig {
    /// Build the configuration from the process environment.
    ///
    /// Reads [`NETWORK_TOPIC_ENV`], falling back to [`DEFAULT_NETWORK_TOPIC`].
    pub fn from_env() -> Self {
        let topic = std::env::var(NETWORK_TOPIC_ENV)
            .unwrap_or_else(|_| DEFAULT_NETWORK_TOPIC.to_string());

        Self { topic }
    }

    /// The topic to use, with an empty value treated as unset.
    pub fn topic(&self) -> &str {
        if self.topic.is_empty() {
            DEFAULT_NETWORK_TOPIC
        } else {
            &self.topic
        }
    }
}

impl Default for NetworkApiConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
