//! Authenticated request execution with automatic 401 healing.

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::HighLevelClient;
use crate::error::{HighLevelError, Result};

impl HighLevelClient {
    /// Perform an authenticated call and deserialize the response body.
    /// Returns `None` when the server sent an empty body.
    pub(crate) async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<T>> {
        let raw = self.dispatch(method, path, body.as_ref()).await?;
        if raw.is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| HighLevelError::protocol(format!("failed to parse response: {}", e)))
    }

    /// Perform an authenticated call, discarding the response body.
    pub(crate) async fn request_no_content(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<()> {
        self.dispatch(method, path, body.as_ref()).await.map(|_| ())
    }

    /// One logical API call.
    ///
    /// Sends the request with the current bearer token. When the response is
    /// a 401 and the refresh preconditions hold, trades the refresh token for
    /// a new triple and repeats the request exactly once; no further retries
    /// regardless of the second outcome. Per call: zero or one refresh, one
    /// or two requests on the wire.
    async fn dispatch(&self, method: Method, path: &str, body: Option<&Value>) -> Result<String> {
        let token = self.tokens.access_token();
        if token.is_empty() {
            return Err(HighLevelError::auth(
                "no access token available, authorize first",
            ));
        }

        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "dispatching API request");

        let response = self.send_once(method.clone(), &url, &token, body).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            if let Some(refresh_token) = self.refresh_eligibility() {
                let rejection = response.text().await.unwrap_or_default();
                tracing::debug!(%url, "access token rejected, refreshing");

                if let Err(err) = self.refresh_and_notify(&refresh_token).await {
                    return Err(HighLevelError::refresh_failed(
                        StatusCode::UNAUTHORIZED.as_u16(),
                        rejection,
                        err,
                    ));
                }

                let token = self.tokens.access_token();
                let retried = self.send_once(method, &url, &token, body).await?;
                return Self::read_body(retried).await;
            }
        }

        Self::read_body(response).await
    }

    /// The refresh token to heal a 401 with, when every precondition holds:
    /// auto-refresh is on, client credentials are configured, and a
    /// non-empty refresh token is stored.
    fn refresh_eligibility(&self) -> Option<String> {
        if !self.auto_refresh || self.client_id.is_none() || self.client_secret.is_none() {
            return None;
        }
        self.tokens.refresh_token().filter(|token| !token.is_empty())
    }

    async fn send_once(
        &self,
        method: Method,
        url: &str,
        token: &str,
        body: Option<&Value>,
    ) -> Result<Response> {
        let mut request = self
            .http
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    async fn read_body(response: Response) -> Result<String> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HighLevelError::network(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(HighLevelError::api(status.as_u16(), body));
        }

        Ok(body)
    }
}
