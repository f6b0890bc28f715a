//! Client configuration.

use crate::token::RefreshCallback;
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default base URL for the HighLevel API.
pub const DEFAULT_BASE_URL: &str = "https://services.leadconnectorhq.com";

/// Default total timeout for the built-in HTTP client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a HighLevel API client.
///
/// Everything is optional: a client built from an empty config can serve
/// requests once an access token is set manually, while the OAuth grant
/// operations additionally need `client_id` and `client_secret`.
#[derive(Clone)]
pub struct ClientConfig {
    /// OAuth client id; required only for token-fetching flows.
    pub client_id: Option<String>,
    /// OAuth client secret; required only for token-fetching flows.
    pub client_secret: Option<String>,
    /// Custom API base URL.
    pub base_url: Option<String>,
    /// Custom token endpoint; defaults to `{base_url}/oauth/token`.
    pub token_url: Option<String>,
    /// Injected HTTP transport; a default client is built when absent.
    pub http_client: Option<Client>,
    /// Total timeout for the built-in client.
    pub timeout: Option<Duration>,
    /// Initial access token.
    pub access_token: Option<String>,
    /// Initial refresh token.
    pub refresh_token: Option<String>,
    /// Attempt one token refresh and retry when a request is rejected
    /// with 401.
    pub auto_refresh: bool,
    /// Invoked after every successful automatic refresh.
    pub on_token_refresh: Option<RefreshCallback>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            base_url: None,
            token_url: None,
            http_client: None,
            timeout: None,
            access_token: None,
            refresh_token: None,
            auto_refresh: true,
            on_token_refresh: None,
        }
    }
}

impl ClientConfig {
    /// Create a new empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the OAuth client credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Set the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the OAuth token endpoint URL.
    #[must_use]
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    /// Inject a pre-configured HTTP client.
    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set the timeout for the built-in HTTP client.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set an initial access token.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set an initial refresh token.
    #[must_use]
    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }

    /// Enable or disable the automatic refresh-and-retry on 401.
    #[must_use]
    pub fn with_auto_refresh(mut self, enabled: bool) -> Self {
        self.auto_refresh = enabled;
        self
    }

    /// Register a callback invoked with the new
    /// `(access_token, refresh_token, expires_in_secs)` after every
    /// successful automatic refresh.
    #[must_use]
    pub fn with_refresh_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str, Option<&str>, Option<u64>) + Send + Sync + 'static,
    {
        self.on_token_refresh = Some(Arc::new(callback));
        self
    }

    /// Load from environment variables with the given prefix.
    ///
    /// Looks for:
    /// - `{PREFIX}_CLIENT_ID`
    /// - `{PREFIX}_CLIENT_SECRET`
    /// - `{PREFIX}_BASE_URL`
    /// - `{PREFIX}_ACCESS_TOKEN`
    /// - `{PREFIX}_REFRESH_TOKEN`
    pub fn from_env(prefix: &str) -> Self {
        Self {
            client_id: std::env::var(format!("{}_CLIENT_ID", prefix)).ok(),
            client_secret: std::env::var(format!("{}_CLIENT_SECRET", prefix)).ok(),
            base_url: std::env::var(format!("{}_BASE_URL", prefix)).ok(),
            access_token: std::env::var(format!("{}_ACCESS_TOKEN", prefix)).ok(),
            refresh_token: std::env::var(format!("{}_REFRESH_TOKEN", prefix)).ok(),
            ..Self::default()
        }
    }

    /// Build an HTTP client with this config, unless one was injected.
    pub fn build_client(&self) -> Client {
        if let Some(client) = &self.http_client {
            return client.clone();
        }

        Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .unwrap_or_default()
    }
}

// Secrets and tokens stay out of Debug output.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("client_id", &self.client_id)
            .field("base_url", &self.base_url)
            .field("token_url", &self.token_url)
            .field("timeout", &self.timeout)
            .field("auto_refresh", &self.auto_refresh)
            .field("has_client_secret", &self.client_secret.is_some())
            .field("has_access_token", &self.access_token.is_some())
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("has_refresh_callback", &self.on_token_refresh.is_some())
            .finish()
    }
}
