use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 30;
pub const DEFAULT_TEMPERATURE: f32 = 0.9;
pub const DEFAULT_STATIC_DELAY: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid endpoint {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("API key is empty")]
    EmptyApiKey,
}

/// Where the celebration message comes from. Fixed for the lifetime of a
/// build; nothing switches it at runtime.
#[derive(Debug)]
pub enum MessageSource {
    Static { delay: Duration },
    Remote(RemoteConfig),
}

#[derive(Debug)]
pub struct RemoteConfig {
    endpoint: Url,
    api_key: SecretString,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl RemoteConfig {
    pub fn new(endpoint: &str, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }

        let endpoint = Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        if endpoint.scheme() != "https" {
            return Err(ConfigError::InvalidEndpoint {
                url: endpoint.to_string(),
                reason: "only https endpoints are allowed".into(),
            });
        }

        Ok(Self {
            endpoint,
            api_key: SecretString::new(api_key),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

#[derive(Debug)]
pub struct Config {
    pub message_source: MessageSource,
}

impl Config {
    pub fn static_messages() -> Self {
        Self {
            message_source: MessageSource::Static {
                delay: DEFAULT_STATIC_DELAY,
            },
        }
    }

    pub fn remote(remote: RemoteConfig) -> Self {
        Self {
            message_source: MessageSource::Remote(remote),
        }
    }

    /// Picks the message source baked in at build time.
    ///
    /// The remote source needs both the `remote-message` feature and a
    /// `VALENTINE_API_KEY` env var when compiling. Anything missing or
    /// invalid falls back to the static list.
    pub fn from_build_env() -> Self {
        if !cfg!(feature = "remote-message") {
            return Self::static_messages();
        }

        let Some(api_key) = option_env!("VALENTINE_API_KEY") else {
            tracing::warn!("remote-message enabled without VALENTINE_API_KEY, using static notes");
            return Self::static_messages();
        };
        let endpoint = option_env!("VALENTINE_ENDPOINT").unwrap_or(DEFAULT_ENDPOINT);

        match RemoteConfig::new(endpoint, api_key) {
            Ok(remote) => Self::remote(remote),
            Err(e) => {
                tracing::warn!(error = %e, "invalid remote message config, using static notes");
                Self::static_messages()
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_build_env()
    }
}
