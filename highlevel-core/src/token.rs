//! OAuth token state and wire types.

use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Notification hook invoked after every successful automatic token refresh.
///
/// Receives `(access_token, refresh_token, expires_in_secs)`. The callback
/// runs synchronously on the refreshing call's task; keep it cheap and
/// non-blocking (persist-to-disk, channel send, etc.).
pub type RefreshCallback = Arc<dyn Fn(&str, Option<&str>, Option<u64>) + Send + Sync>;

/// The token triple owned by a client instance.
///
/// An empty access token means "unauthenticated". The expiry instant is
/// informational only: requests are attempted regardless and healed on 401.
#[derive(Debug, Clone, Default)]
pub struct TokenState {
    /// Current bearer token; empty when unauthenticated.
    pub access_token: String,
    /// Token for the `refresh_token` grant, when one was issued.
    pub refresh_token: Option<String>,
    /// Instant the access token expires, when the server reported a lifetime.
    pub expires_at: Option<SystemTime>,
}

impl TokenState {
    /// True when an access token is present.
    pub fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// Overwrite the whole triple.
    ///
    /// A zero or absent `expires_in` clears the stored expiry — no stale
    /// instant survives an overwrite.
    pub fn apply(
        &mut self,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_in: Option<u64>,
    ) {
        self.access_token = access_token.into();
        self.refresh_token = refresh_token;
        self.expires_at = expires_in
            .filter(|secs| *secs > 0)
            .map(|secs| SystemTime::now() + Duration::from_secs(secs));
    }

    /// True when the server-reported expiry has passed.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= SystemTime::now())
    }
}

/// Response body of the OAuth token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// New bearer token.
    pub access_token: String,
    /// New refresh token, when the grant rotates it.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Token type, typically `Bearer`.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Space-separated scopes granted.
    #[serde(default)]
    pub scope: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_apply_overwrites_triple() {
        let mut state = TokenState::default();
        state.apply("a1", Some("r1".to_string()), Some(3600));

        assert_eq!(state.access_token, "a1");
        assert_eq!(state.refresh_token.as_deref(), Some("r1"));
        assert!(state.expires_at.is_some());
        assert!(!state.is_expired());

        // A second apply without expiry must not keep the old instant.
        state.apply("a2", None, None);
        assert_eq!(state.access_token, "a2");
        assert_eq!(state.refresh_token, None);
        assert_eq!(state.expires_at, None);
    }

    #[test]
    fn test_apply_zero_expiry_clears() {
        let mut state = TokenState::default();
        state.apply("a1", Some("r1".to_string()), Some(3600));
        state.apply("a2", Some("r2".to_string()), Some(0));
        assert_eq!(state.expires_at, None);
    }

    #[test]
    fn test_is_authenticated() {
        let mut state = TokenState::default();
        assert!(!state.is_authenticated());

        state.access_token = "token".to_string();
        assert!(state.is_authenticated());
    }

    #[test]
    fn test_expiry_in_future() {
        let mut state = TokenState::default();
        state.apply("a1", None, Some(3600));

        let at = state.expires_at.unwrap();
        let left = at.duration_since(SystemTime::now()).unwrap();
        assert!(left <= Duration::from_secs(3600));
        assert!(left > Duration::from_secs(3500));
    }

    #[test]
    fn test_token_response_full() {
        let resp: TokenResponse = serde_json::from_str(
            r#"{
                "access_token": "a1",
                "refresh_token": "r1",
                "token_type": "Bearer",
                "expires_in": 86400,
                "scope": "contacts.readonly contacts.write"
            }"#,
        )
        .unwrap();

        assert_eq!(resp.access_token, "a1");
        assert_eq!(resp.refresh_token.as_deref(), Some("r1"));
        assert_eq!(resp.token_type.as_deref(), Some("Bearer"));
        assert_eq!(resp.expires_in, Some(86400));
    }

    #[test]
    fn test_token_response_minimal() {
        let resp: TokenResponse = serde_json::from_str(r#"{"access_token": "a1"}"#).unwrap();

        assert_eq!(resp.access_token, "a1");
        assert_eq!(resp.refresh_token, None);
        assert_eq!(resp.expires_in, None);
        assert_eq!(resp.scope, None);
    }
}
