//! OAuth 2.0 grant operations against the token endpoint.

use highlevel_core::TokenResponse;
use reqwest::StatusCode;

use crate::client::HighLevelClient;
use crate::error::{HighLevelError, Result};

impl HighLevelClient {
    /// Exchange an authorization code for a token triple
    /// (`authorization_code` grant) and store it.
    pub async fn authorize_with_code(
        &self,
        code: &str,
        redirect_uri: Option<&str>,
    ) -> Result<()> {
        let mut params = self.grant_params("authorization_code")?;
        params.push(("code", code.to_string()));
        if let Some(uri) = redirect_uri {
            params.push(("redirect_uri", uri.to_string()));
        }

        let response = self.fetch_token(&params).await?;
        self.store_token_response(&response);
        Ok(())
    }

    /// Trade a refresh token for a new token triple (`refresh_token` grant)
    /// and store it. Does not invoke the refresh callback; the caller drove
    /// this refresh and already knows about it.
    pub async fn authorize_with_refresh_token(&self, refresh_token: &str) -> Result<()> {
        let response = self.refresh_grant(refresh_token).await?;
        self.store_token_response(&response);
        Ok(())
    }

    /// Refresh driven by the automatic 401 heal: stores the new triple and
    /// notifies the registered callback so the caller can persist it.
    pub(crate) async fn refresh_and_notify(&self, refresh_token: &str) -> Result<()> {
        let response = self.refresh_grant(refresh_token).await?;
        self.store_token_response(&response);

        if let Some(callback) = &self.on_token_refresh {
            callback(
                &response.access_token,
                response.refresh_token.as_deref(),
                response.expires_in,
            );
        }
        Ok(())
    }

    async fn refresh_grant(&self, refresh_token: &str) -> Result<TokenResponse> {
        let mut params = self.grant_params("refresh_token")?;
        params.push(("refresh_token", refresh_token.to_string()));
        self.fetch_token(&params).await
    }

    fn grant_params(&self, grant_type: &str) -> Result<Vec<(&'static str, String)>> {
        let client_id = self
            .client_id
            .as_ref()
            .ok_or_else(|| HighLevelError::config("client_id is required for OAuth grants"))?;
        let client_secret = self
            .client_secret
            .as_ref()
            .ok_or_else(|| HighLevelError::config("client_secret is required for OAuth grants"))?;

        Ok(vec![
            ("client_id", client_id.clone()),
            ("client_secret", client_secret.clone()),
            ("grant_type", grant_type.to_string()),
        ])
    }

    /// Single form-encoded POST against the token endpoint. Never retried;
    /// failure surfaces immediately.
    async fn fetch_token(&self, params: &[(&'static str, String)]) -> Result<TokenResponse> {
        tracing::debug!(url = %self.token_url, "requesting OAuth token");

        let response = self.http.post(&self.token_url).form(&params).send().await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HighLevelError::network(format!("failed to read token response: {}", e)))?;

        if status != StatusCode::OK {
            return Err(HighLevelError::protocol(format!(
                "token request failed with status {}: {}",
                status.as_u16(),
                body
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            HighLevelError::protocol(format!("failed to parse token response: {}", e))
        })
    }

    pub(crate) fn store_token_response(&self, response: &TokenResponse) {
        self.tokens.set_tokens(
            response.access_token.clone(),
            response.refresh_token.clone(),
            response.expires_in,
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::client::HighLevelClient;
    use crate::error::HighLevelError;
    use highlevel_core::ClientConfig;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HighLevelClient {
        HighLevelClient::new(
            ClientConfig::new()
                .with_base_url(server.uri())
                .with_credentials("id-123", "secret-456"),
        )
    }

    fn token_body() -> serde_json::Value {
        json!({
            "access_token": "a1",
            "refresh_token": "r1",
            "token_type": "Bearer",
            "expires_in": 86400,
            "scope": "contacts.readonly contacts.write"
        })
    }

    #[tokio::test]
    async fn test_authorize_with_code_stores_triple() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=abc-123"))
            .and(body_string_contains("client_id=id-123"))
            .and(body_string_contains("client_secret=secret-456"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.authorize_with_code("abc-123", None).await.unwrap();

        let state = client.token_state();
        assert_eq!(state.access_token, "a1");
        assert_eq!(state.refresh_token.as_deref(), Some("r1"));
        assert!(state.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_authorize_with_code_sends_redirect_uri() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("redirect_uri="))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .authorize_with_code("abc-123", Some("https://app.example.com/callback"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_refresh_grant_sends_refresh_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=r0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.authorize_with_refresh_token("r0").await.unwrap();

        assert_eq!(client.access_token(), "a1");
    }

    #[tokio::test]
    async fn test_missing_credentials_is_config_error() {
        let server = MockServer::start().await;
        // No token endpoint mounted: the call must fail before any HTTP.
        let client =
            HighLevelClient::new(ClientConfig::new().with_base_url(server.uri()));

        let err = client.authorize_with_code("abc", None).await.unwrap_err();
        assert!(matches!(err, HighLevelError::Config(_)));

        let err = client
            .authorize_with_refresh_token("r0")
            .await
            .unwrap_err();
        assert!(matches!(err, HighLevelError::Config(_)));
        assert_eq!(server.received_requests().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_non_200_token_response_is_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.authorize_with_refresh_token("bad").await.unwrap_err();

        match err {
            HighLevelError::Protocol(message) => {
                assert!(message.contains("400"));
                assert!(message.contains("invalid_grant"));
            }
            other => panic!("expected Protocol error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unparseable_token_response_is_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.authorize_with_refresh_token("r0").await.unwrap_err();
        assert!(matches!(err, HighLevelError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_manual_refresh_does_not_notify_callback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
            .mount(&server)
            .await;

        let notified = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&notified);
        let client = HighLevelClient::new(
            ClientConfig::new()
                .with_base_url(server.uri())
                .with_credentials("id-123", "secret-456")
                .with_refresh_callback(move |access, refresh, expires_in| {
                    log.lock().push((
                        access.to_string(),
                        refresh.map(str::to_string),
                        expires_in,
                    ));
                }),
        );

        client.authorize_with_refresh_token("r0").await.unwrap();
        assert!(notified.lock().is_empty());

        client.refresh_and_notify("r0").await.unwrap();
        let calls = notified.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], ("a1".to_string(), Some("r1".to_string()), Some(86400)));
    }
}
