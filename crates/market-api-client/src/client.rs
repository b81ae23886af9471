//! The request choke point: header composition and response normalisation.

use crate::error::{ApiError, ApiResult};
use crate::request::RequestDescriptor;
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use market_config_and_utils::Config;
use market_storage::Session;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// Client for the marketplace REST API.
///
/// Every call goes through [`ApiClient::request`], which attaches the
/// session's bearer token (if any) and maps the outcome onto [`ApiError`].
/// Cloning is cheap and clones share the session.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<Session>,
    base_url: String,
    timeout: Option<Duration>,
}

impl ApiClient {
    /// Create a client that sends through reqwest.
    ///
    /// # Arguments
    /// * `base_url` - API base every path is appended to (e.g., `http://localhost:5000/api`)
    /// * `session` - Session whose token is attached to requests
    pub fn new(base_url: impl Into<String>, session: Arc<Session>) -> Self {
        Self::with_transport(base_url, session, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(
        base_url: impl Into<String>,
        session: Arc<Session>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            transport,
            session,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    /// Create a reqwest-backed client from configuration.
    pub fn from_config(config: &Config, session: Arc<Session>) -> Self {
        Self::new(config.api_base(), session).with_timeout(config.request_timeout())
    }

    /// Fail requests that take longer than `timeout`. `None` disables it.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the wire request for `descriptor`.
    ///
    /// The token is read here, once; changing the session afterwards does
    /// not affect a request that has already been built.
    pub fn build_request(&self, descriptor: &RequestDescriptor) -> ApiResult<HttpRequest> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = self.session.token() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        let body = descriptor
            .body()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Protocol(format!("Failed to encode request body: {}", e)))?;

        Ok(HttpRequest {
            method: descriptor.method(),
            url: format!("{}{}", self.base_url, descriptor.path()),
            headers,
            body,
        })
    }

    /// Send `descriptor` and return the parsed JSON body.
    ///
    /// Never retries. Times out only if a timeout was configured.
    pub async fn request(&self, descriptor: RequestDescriptor) -> ApiResult<serde_json::Value> {
        let request = self.build_request(&descriptor)?;

        tracing::debug!(method = %request.method, path = %descriptor.path(), "API request");

        let sent = self.transport.send(request);
        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, sent).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    tracing::warn!(path = %descriptor.path(), timeout_ms = limit.as_millis() as u64, "API request timed out");
                    return Err(ApiError::Network("Request timed out".to_string()));
                }
            },
            None => sent.await,
        };

        let response = outcome.map_err(|e| {
            tracing::warn!(path = %descriptor.path(), error = %e, "API transport failure");
            ApiError::Network(e.to_string())
        })?;

        normalize_response(descriptor.path(), response)
    }

    /// Like [`ApiClient::request`], but gives up as soon as `cancel` fires.
    ///
    /// Dropping the sender without sending does not cancel.
    pub async fn request_cancellable(
        &self,
        descriptor: RequestDescriptor,
        cancel: oneshot::Receiver<()>,
    ) -> ApiResult<serde_json::Value> {
        let path = descriptor.path().to_string();
        let cancelled = async move {
            if cancel.await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = self.request(descriptor) => result,
            _ = cancelled => {
                tracing::debug!(path = %path, "API request cancelled");
                Err(ApiError::Network("Request cancelled".to_string()))
            }
        }
    }

    /// [`ApiClient::request`] followed by deserialization into `T`.
    pub async fn request_as<T: DeserializeOwned>(&self, descriptor: RequestDescriptor) -> ApiResult<T> {
        let path = descriptor.path().to_string();
        let value = self.request(descriptor).await?;
        serde_json::from_value(value).map_err(|e| {
            tracing::warn!(path = %path, error = %e, "unexpected response shape");
            ApiError::invalid_response()
        })
    }
}

/// Map a raw response onto the result shape.
///
/// The body is parsed before the status is looked at, so a non-JSON error
/// page is a protocol error rather than an API error.
fn normalize_response(path: &str, response: HttpResponse) -> ApiResult<serde_json::Value> {
    let data: serde_json::Value = serde_json::from_str(&response.body).map_err(|e| {
        tracing::warn!(path = %path, status = response.status, error = %e, "response body is not JSON");
        ApiError::invalid_response()
    })?;

    if !response.is_success() {
        let message = data
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .map(String::from)
            .unwrap_or_else(|| format!("Request failed with status {}", response.status));

        tracing::warn!(path = %path, status = response.status, message = %message, "API error response");
        return Err(ApiError::Api {
            status: response.status,
            message,
        });
    }

    tracing::debug!(path = %path, status = response.status, "API response");
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::request::HttpMethod;
    use async_trait::async_trait;
    use crate::transport::TransportError;

    struct FixedTransport(HttpResponse);

    #[async_trait]
    impl Transport for FixedTransport {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            Ok(self.0.clone())
        }
    }

    struct SlowTransport;

    #[async_trait]
    impl Transport for SlowTransport {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(HttpResponse::new(200, "{}"))
        }
    }

    fn client_with(transport: impl Transport + 'static) -> ApiClient {
        ApiClient::with_transport(
            "http://localhost:5000/api/",
            Arc::new(Session::in_memory()),
            Arc::new(transport),
        )
    }

    #[test]
    fn headers_without_token() {
        let client = client_with(FixedTransport(HttpResponse::new(200, "{}")));
        let request = client.build_request(&RequestDescriptor::get("/products")).unwrap();

        assert_eq!(request.url, "http://localhost:5000/api/products");
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.header("Authorization"), None);
        assert_eq!(request.body, None);
    }

    #[test]
    fn headers_with_token_are_snapshotted() {
        let client = client_with(FixedTransport(HttpResponse::new(200, "{}")));
        client.session().set_token("T").unwrap();

        let descriptor = RequestDescriptor::put("/cart/4", &serde_json::json!({ "quantity": 2 })).unwrap();
        let request = client.build_request(&descriptor).unwrap();
        client.session().clear_token().unwrap();

        assert_eq!(request.header("Authorization"), Some("Bearer T"));
        assert_eq!(request.body.as_deref(), Some(r#"{"quantity":2}"#));
    }

    #[test]
    fn normalize_success() {
        let value = normalize_response("/cart", HttpResponse::new(200, "[]")).unwrap();
        assert_eq!(value, serde_json::json!([]));
    }

    #[test]
    fn normalize_non_json_is_protocol_error_even_on_failure_status() {
        for status in [200, 500] {
            let err = normalize_response("/cart", HttpResponse::new(status, "<html>")).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ProtocolError);
            assert_eq!(err.message(), "Invalid response from server");
        }
    }

    #[test]
    fn normalize_failure_uses_server_message_or_status() {
        let err = normalize_response("/auth/login", HttpResponse::new(401, r#"{"message":"bad creds"}"#))
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Api {
                status: 401,
                message: "bad creds".to_string()
            }
        );

        let err = normalize_response("/cart", HttpResponse::new(404, r#"{"error":"x"}"#)).unwrap_err();
        assert_eq!(err.message(), "Request failed with status 404");

        let err = normalize_response("/cart", HttpResponse::new(500, r#"{"message":""}"#)).unwrap_err();
        assert_eq!(err.message(), "Request failed with status 500");

        let err = normalize_response("/cart", HttpResponse::new(502, "[1]")).unwrap_err();
        assert_eq!(err.message(), "Request failed with status 502");
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_is_a_network_error() {
        let client = client_with(SlowTransport).with_timeout(Some(Duration::from_secs(5)));
        let err = client.request(RequestDescriptor::get("/products")).await.unwrap_err();
        assert_eq!(err, ApiError::Network("Request timed out".to_string()));
    }

    #[tokio::test]
    async fn cancellation_aborts_request() {
        let client = client_with(SlowTransport);
        let (tx, rx) = oneshot::channel();
        tx.send(()).unwrap();

        let err = client
            .request_cancellable(RequestDescriptor::get("/products"), rx)
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Network("Request cancelled".to_string()));
    }

    #[tokio::test]
    async fn dropped_cancel_sender_does_not_cancel() {
        let client = client_with(FixedTransport(HttpResponse::new(200, r#"{"ok":true}"#)));
        let (tx, rx) = oneshot::channel::<()>();
        drop(tx);

        let value = client
            .request_cancellable(RequestDescriptor::get("/products"), rx)
            .await
            .unwrap();
        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn request_as_rejects_wrong_shape() {
        let client = client_with(FixedTransport(HttpResponse::new(200, r#"{"not":"a list"}"#)));
        let err = client
            .request_as::<Vec<serde_json::Value>>(RequestDescriptor::get("/cart"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProtocolError);
    }
}
