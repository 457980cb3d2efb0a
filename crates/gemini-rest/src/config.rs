//! Client configuration

use gemini_auth::{AuthError, Credentials, API_KEY_ENV, API_SECRET_ENV};
use std::time::Duration;

use crate::error::{RestError, RestResult};

/// Production REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.gemini.com/v1";

/// Sandbox REST endpoint
pub const SANDBOX_BASE_URL: &str = "https://api.sandbox.gemini.com/v1";

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default user agent
pub const DEFAULT_USER_AGENT: &str = concat!("gemini-rest/", env!("CARGO_PKG_VERSION"));

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "GEMINI_API_BASE_URL";

/// Environment variable overriding the timeout (milliseconds)
pub const TIMEOUT_ENV: &str = "GEMINI_TIMEOUT_MS";

/// Client configuration
///
/// Validated when the client is built; the client keeps its own copy, so
/// later changes to a config value do not affect existing clients.
#[derive(Clone)]
pub struct ClientConfig {
    /// API key
    pub api_key: String,
    /// API secret
    pub api_secret: String,
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Create a configuration with default base URL and timeout
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            user_agent: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Requires `GEMINI_API_KEY` and `GEMINI_API_SECRET`; `GEMINI_API_BASE_URL`
    /// and `GEMINI_TIMEOUT_MS` are optional.
    pub fn from_env() -> RestResult<Self> {
        let api_key = required_env(API_KEY_ENV)?;
        let api_secret = required_env(API_SECRET_ENV)?;
        let mut config = Self::new(api_key, api_secret);

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        if let Ok(timeout) = std::env::var(TIMEOUT_ENV) {
            let millis = timeout.trim().parse::<u64>().map_err(|_| {
                RestError::Configuration(format!("{} must be milliseconds, got {:?}", TIMEOUT_ENV, timeout))
            })?;
            config = config.with_timeout_ms(millis);
        }

        Ok(config)
    }

    /// Point the client at the sandbox
    pub fn sandbox(mut self) -> Self {
        self.base_url = SANDBOX_BASE_URL.to_string();
        self
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set timeout in milliseconds
    pub fn with_timeout_ms(self, millis: u64) -> Self {
        self.with_timeout(Duration::from_millis(millis))
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Check the configuration and produce signing credentials
    pub(crate) fn validate(&self) -> RestResult<Credentials> {
        let credentials = Credentials::new(self.api_key.as_str(), &self.api_secret).map_err(|e| match e {
            AuthError::MissingCredential(field) => {
                RestError::Configuration(format!("{} is required and must not be empty", field))
            }
            other => RestError::Configuration(other.to_string()),
        })?;

        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(RestError::Configuration("base_url must not be empty".to_string()));
        }
        reqwest::Url::parse(base_url)
            .map_err(|e| RestError::Configuration(format!("invalid base_url {:?}: {}", base_url, e)))?;

        if self.timeout.is_zero() {
            return Err(RestError::Configuration("timeout must be greater than zero".to_string()));
        }

        Ok(credentials)
    }

    /// Base URL without a trailing slash
    pub(crate) fn normalized_base_url(&self) -> String {
        self.base_url.trim().trim_end_matches('/').to_string()
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible: String = self.api_key.chars().take(8).collect();
        f.debug_struct("ClientConfig")
            .field("api_key", &format!("{}...", visible))
            .field("api_secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn required_env(name: &str) -> RestResult<String> {
    std::env::var(name)
        .map_err(|_| RestError::Configuration(format!("Environment variable not set: {}", name)))
}
