use crate::config::Config;
use crate::megaport::error::MegaportError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, Response, StatusCode};
use std::fmt::Write;
use tracing::{debug, error, warn};

/// Authenticated Megaport API client
///
/// Owns the base URL, the bearer token and HTTP-level error classification.
/// Higher layers only ever see a [`Response`] that already passed
/// [`MegaportClient::is_error_response`], or a [`MegaportError`].
#[derive(Debug, Clone)]
pub struct MegaportClient {
    base_url: String,
    client: reqwest::Client,
}

impl MegaportClient {
    /// Create a new Megaport client
    pub fn new(config: &Config) -> Result<Self, MegaportError> {
        let base_url = config.megaport_url.trim_end_matches('/').to_string();
        let token = &config.megaport_token;

        if token.is_empty() {
            return Err(MegaportError::AuthenticationError(
                "Megaport token is required".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).map_err(|e| {
                MegaportError::AuthenticationError(format!("Invalid token format: {}", e))
            })?,
        );
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert("Accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { base_url, client })
    }

    /// Build the absolute URL for an API path such as `/v2/product/{id}`
    fn build_url(&self, path: &str) -> Result<String, MegaportError> {
        let mut url = self.base_url.clone();
        let sep = if path.starts_with('/') { "" } else { "/" };
        write!(url, "{}{}", sep, path)
            .map_err(|e| MegaportError::InvalidUrl(format!("Failed to build URL: {}", e)))?;
        Ok(url)
    }

    /// Issue a raw API call. The body, when present, must already be JSON.
    pub async fn make_api_call(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Response, MegaportError> {
        let url = self.build_url(path)?;
        debug!("Megaport API call: {} {}", method, url);

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.body(body);
        }

        Ok(request.send().await?)
    }

    /// Classify a response against the expected status code.
    ///
    /// On a match the response is handed back untouched so the caller can
    /// decode its body; otherwise the body is consumed into a parsed
    /// [`MegaportError`].
    pub async fn is_error_response(
        &self,
        response: Response,
        expected: StatusCode,
    ) -> Result<Response, MegaportError> {
        let status = response.status();
        if status == expected {
            return Ok(response);
        }

        let reason = status.canonical_reason().unwrap_or("no response body");
        let text = match response.text().await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => reason.to_string(),
            Err(e) => {
                warn!("Failed to read Megaport error body for {}: {}", status, e);
                reason.to_string()
            }
        };
        error!("Megaport API error: {} - {}", status, text);
        Err(MegaportError::from_response_body(status.as_u16(), &text))
    }

    /// Convenience wrapper: call, classify against `expected`, return the body
    pub async fn call_expecting(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        expected: StatusCode,
    ) -> Result<Vec<u8>, MegaportError> {
        let response = self.make_api_call(method, path, body).await?;
        let response = self.is_error_response(response, expected).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn create_test_config(base_url: String, token: String) -> Config {
        Config {
            megaport_url: base_url,
            megaport_token: token,
            ..Config::from_lookup(|_| None)
        }
    }

    #[tokio::test]
    async fn test_client_creation_success() {
        let config = create_test_config("http://localhost:8000".to_string(), "test-token".to_string());
        assert!(MegaportClient::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_client_creation_no_token() {
        let config = create_test_config("http://localhost:8000".to_string(), "".to_string());
        match MegaportClient::new(&config) {
            Err(MegaportError::AuthenticationError(_)) => {}
            _ => panic!("Expected AuthenticationError"),
        }
    }

    #[test]
    fn test_build_url_handles_slashes() {
        let config = create_test_config("http://localhost:8000/".to_string(), "t".to_string());
        let client = MegaportClient::new(&config).unwrap();
        assert_eq!(
            client.build_url("/v2/product/abc").unwrap(),
            "http://localhost:8000/v2/product/abc"
        );
        assert_eq!(
            client.build_url("v2/product/abc").unwrap(),
            "http://localhost:8000/v2/product/abc"
        );
    }

    #[tokio::test]
    async fn test_make_api_call_sends_auth_and_body() {
        let mock_server = MockServer::start().await;
        let config = create_test_config(mock_server.uri(), "test-token".to_string());
        let client = MegaportClient::new(&config).unwrap();

        Mock::given(method("POST"))
            .and(path("/v3/echo"))
            .and(header("Authorization", "Bearer test-token"))
            .and(body_json(json!({"hello": "world"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let body = serde_json::to_vec(&json!({"hello": "world"})).unwrap();
        let response = client
            .make_api_call(Method::POST, "/v3/echo", Some(body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_is_error_response_parses_remote_error() {
        let mock_server = MockServer::start().await;
        let config = create_test_config(mock_server.uri(), "test-token".to_string());
        let client = MegaportClient::new(&config).unwrap();

        Mock::given(method("GET"))
            .and(path("/v2/product/missing"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "message": "Invalid product UID"
            })))
            .mount(&mock_server)
            .await;

        let response = client
            .make_api_call(Method::GET, "/v2/product/missing", None)
            .await
            .unwrap();
        match client.is_error_response(response, StatusCode::OK).await {
            Err(MegaportError::ApiError { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid product UID");
            }
            other => panic!("Expected ApiError, got {:?}", other.map(|r| r.status())),
        }
    }

    #[tokio::test]
    async fn test_empty_error_body_uses_reason_phrase() {
        let mock_server = MockServer::start().await;
        let config = create_test_config(mock_server.uri(), "test-token".to_string());
        let client = MegaportClient::new(&config).unwrap();

        Mock::given(method("GET"))
            .and(path("/v2/product/mcr-1"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let result = client
            .call_expecting(Method::GET, "/v2/product/mcr-1", None, StatusCode::OK)
            .await;
        match result {
            Err(MegaportError::ApiError { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_call_expecting_returns_body() {
        let mock_server = MockServer::start().await;
        let config = create_test_config(mock_server.uri(), "test-token".to_string());
        let client = MegaportClient::new(&config).unwrap();

        Mock::given(method("GET"))
            .and(path("/v2/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
            .mount(&mock_server)
            .await;

        let body = client
            .call_expecting(Method::GET, "/v2/ping", None, StatusCode::OK)
            .await
            .unwrap();
        assert_eq!(body, b"pong");
    }

    #[tokio::test]
    async fn test_unexpected_success_code_is_an_error() {
        let mock_server = MockServer::start().await;
        let config = create_test_config(mock_server.uri(), "test-token".to_string());
        let client = MegaportClient::new(&config).unwrap();

        Mock::given(method("GET"))
            .and(path("/v2/ping"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&mock_server)
            .await;

        let result = client
            .call_expecting(Method::GET, "/v2/ping", None, StatusCode::OK)
            .await;
        assert!(matches!(result, Err(MegaportError::ApiError { status: 202, .. })));
    }
}
