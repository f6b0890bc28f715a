//! The HighLevel API client and its token store.

use highlevel_core::{ClientConfig, RefreshCallback, TokenState, DEFAULT_BASE_URL};
use parking_lot::RwLock;
use reqwest::Client;
use std::fmt;

use crate::contacts::ContactsService;

/// Thread-safe holder of the current token triple.
///
/// The only place token state is mutated. Reads take the shared lock, writes
/// replace the whole triple under the exclusive lock, so a reader never
/// observes a partially updated triple. The lock is never held across an
/// await point.
#[derive(Debug, Default)]
pub(crate) struct TokenStore {
    state: RwLock<TokenState>,
}

impl TokenStore {
    fn new(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self {
            state: RwLock::new(TokenState {
                access_token: access_token.unwrap_or_default(),
                refresh_token,
                expires_at: None,
            }),
        }
    }

    pub(crate) fn snapshot(&self) -> TokenState {
        self.state.read().clone()
    }

    pub(crate) fn access_token(&self) -> String {
        self.state.read().access_token.clone()
    }

    pub(crate) fn refresh_token(&self) -> Option<String> {
        self.state.read().refresh_token.clone()
    }

    pub(crate) fn set_access_token(&self, token: impl Into<String>) {
        self.state.write().access_token = token.into();
    }

    pub(crate) fn set_tokens(
        &self,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_in: Option<u64>,
    ) {
        self.state.write().apply(access_token, refresh_token, expires_in);
    }
}

/// Client for the HighLevel API.
///
/// Each instance owns an independent token store; cloneable handles are the
/// caller's concern (wrap in an `Arc` to share one token store across tasks).
///
/// Requests carry the current access token as a bearer header. When a request
/// comes back 401 and [`ClientConfig::auto_refresh`] is on, the client trades
/// the stored refresh token for a new triple, notifies the registered
/// callback, and retries the request exactly once.
///
/// ```rust,ignore
/// use highlevel::{ClientConfig, HighLevelClient};
///
/// let client = HighLevelClient::new(
///     ClientConfig::new()
///         .with_credentials("client-id", "client-secret")
///         .with_access_token("stored-access-token")
///         .with_refresh_token("stored-refresh-token")
///         .with_refresh_callback(|access, refresh, expires_in| {
///             // persist rotated tokens
///         }),
/// );
///
/// let contact = client.contacts().get("ocQHyuzHvysMo5N5VsXc").await?;
/// ```
pub struct HighLevelClient {
    pub(crate) http: Client,
    pub(crate) base_url: String,
    pub(crate) token_url: String,
    pub(crate) client_id: Option<String>,
    pub(crate) client_secret: Option<String>,
    pub(crate) auto_refresh: bool,
    pub(crate) tokens: TokenStore,
    pub(crate) on_token_refresh: Option<RefreshCallback>,
}

impl HighLevelClient {
    /// Create a client from configuration.
    pub fn new(config: ClientConfig) -> Self {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim_end_matches('/').to_string();
        let token_url = config
            .token_url
            .clone()
            .unwrap_or_else(|| format!("{}/oauth/token", base_url));

        Self {
            http: config.build_client(),
            base_url,
            token_url,
            client_id: config.client_id,
            client_secret: config.client_secret,
            auto_refresh: config.auto_refresh,
            tokens: TokenStore::new(config.access_token, config.refresh_token),
            on_token_refresh: config.on_token_refresh,
        }
    }

    /// Create a client from `HIGHLEVEL_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env("HIGHLEVEL"))
    }

    /// The API base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The OAuth token endpoint used by the grant operations.
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// The current access token; empty when unauthenticated.
    pub fn access_token(&self) -> String {
        self.tokens.access_token()
    }

    /// The current refresh token, when one is stored.
    pub fn refresh_token(&self) -> Option<String> {
        self.tokens.refresh_token()
    }

    /// A consistent snapshot of the whole token triple.
    pub fn token_state(&self) -> TokenState {
        self.tokens.snapshot()
    }

    /// True when an access token is present.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.snapshot().is_authenticated()
    }

    /// Overwrite the access token, leaving the refresh token and expiry
    /// untouched.
    pub fn set_access_token(&self, token: impl Into<String>) {
        self.tokens.set_access_token(token);
    }

    /// Overwrite the whole token triple, e.g. with tokens restored from
    /// storage. `expires_in` is the remaining lifetime in seconds.
    pub fn set_tokens(
        &self,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_in: Option<u64>,
    ) {
        self.tokens.set_tokens(access_token, refresh_token, expires_in);
    }

    /// Operations on the Contacts resource.
    pub fn contacts(&self) -> ContactsService<'_> {
        ContactsService::new(self)
    }
}

// The refresh callback has no Debug impl; report presence only.
impl fmt::Debug for HighLevelClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HighLevelClient")
            .field("base_url", &self.base_url)
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("auto_refresh", &self.auto_refresh)
            .field("authenticated", &self.is_authenticated())
            .field("has_refresh_callback", &self.on_token_refresh.is_some())
            .finish()
    }
}
