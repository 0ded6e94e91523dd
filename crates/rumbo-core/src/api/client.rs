//! HTTP request gateway for the rumbo travel API.
//!
//! This module provides the `ApiClient` for talking to the booking
//! service: URL assembly against one configured base, bearer-token
//! decoration from secure storage, JSON request/response handling, and
//! uniform error extraction. One attempt per call: no retries, no backoff,
//! no response caching.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header, Client, Method};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{RegisterData, Trip};
use crate::storage::{SecureStore, StoreKey};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 15s allows for slow mobile links while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Options for a single gateway request.
///
/// `include_auth` defaults to true: most endpoints want the bearer token,
/// and its absence from storage is not an error (the server answers 401).
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: header::HeaderMap,
    pub body: Option<Value>,
    pub include_auth: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: header::HeaderMap::new(),
            body: None,
            include_auth: true,
        }
    }
}

/// A response body, classified by Content-Type.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `application/json` body, parsed.
    Json(Value),
    /// Anything else, kept as opaque text.
    Text(String),
}

/// Body of a successful `POST /clientes/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginReply {
    /// Bearer token. The session layer treats its absence as a hard error.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Body of a successful `POST /clientes/registrar`. The service echoes the
/// registered email plus whatever else it wants the client to show.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// The authentication endpoints the session layer depends on.
///
/// `ApiClient` is the production implementation; tests substitute scripted
/// stubs.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /clientes/login`. Never decorated with a stored token.
    async fn login(&self, email: &str, password: &str) -> Result<LoginReply, ApiError>;

    /// `POST /clientes/registrar`. Side call, no session involvement.
    async fn register(&self, data: &RegisterData) -> Result<RegisterReply, ApiError>;

    /// `POST /auth/logout` with an explicit bearer token. The caller
    /// decides how much it cares about the outcome.
    async fn logout(&self, token: &str) -> Result<(), ApiError>;
}

/// HTTP client for the rumbo service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<dyn SecureStore>,
}

impl ApiClient {
    /// Create a client against the given base URL (origin plus `/api`).
    pub fn new(base_url: impl Into<String>, store: Arc<dyn SecureStore>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            client,
            base_url,
            store,
        })
    }

    /// Join the base URL and a path, tolerating a missing leading slash.
    fn join_url(base_url: &str, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", base_url, path)
        } else {
            format!("{}/{}", base_url, path)
        }
    }

    /// JSON bodies are parsed; everything else stays opaque text.
    fn classify_body(content_type: &str, text: String) -> Result<Payload, ApiError> {
        if content_type.contains("application/json") {
            match serde_json::from_str(&text) {
                Ok(value) => Ok(Payload::Json(value)),
                Err(e) => Err(ApiError::InvalidResponse(format!(
                    "Body declared JSON but did not parse: {}",
                    e
                ))),
            }
        } else {
            Ok(Payload::Text(text))
        }
    }

    /// Perform a request and classify the response body by Content-Type.
    ///
    /// Success is any 2xx status. Anything else comes back as
    /// `ApiError::Status` carrying the most useful message the body offers.
    pub async fn request_raw(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Payload, ApiError> {
        let url = Self::join_url(&self.base_url, path);
        let RequestOptions {
            method,
            headers,
            body,
            include_auth,
        } = options;

        let mut request_headers = header::HeaderMap::new();
        request_headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        request_headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        request_headers.extend(headers);

        if include_auth {
            if let Some(token) = self.store.get(StoreKey::Token).await {
                match header::HeaderValue::from_str(&format!("Bearer {}", token)) {
                    Ok(value) => {
                        request_headers.insert(header::AUTHORIZATION, value);
                    }
                    Err(_) => {
                        // Unusable stored token; the request goes out
                        // unauthenticated and the server answers 401.
                        warn!("Stored token is not a valid header value");
                    }
                }
            }
        }

        debug!(method = %method, url = %url, "Sending API request");

        let mut request = self.client.request(method, &url).headers(request_headers);
        if let Some(ref body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let text = response.text().await?;

        let payload = Self::classify_body(&content_type, text)?;

        if status.is_success() {
            Ok(payload)
        } else {
            debug!(status = %status, url = %url, "API request failed");
            Err(ApiError::from_status(status, &payload))
        }
    }

    /// Perform a request and deserialize the JSON response body.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        match self.request_raw(path, options).await? {
            Payload::Json(value) => Ok(serde_json::from_value(value)?),
            Payload::Text(_) => Err(ApiError::InvalidResponse(
                "Expected a JSON response body".to_string(),
            )),
        }
    }

    // ===== Convenience Methods =====

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(path, RequestOptions::default()).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(
            path,
            RequestOptions {
                method: Method::POST,
                body: Some(serde_json::to_value(body)?),
                ..RequestOptions::default()
            },
        )
        .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(
            path,
            RequestOptions {
                method: Method::PUT,
                body: Some(serde_json::to_value(body)?),
                ..RequestOptions::default()
            },
        )
        .await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(
            path,
            RequestOptions {
                method: Method::PATCH,
                body: Some(serde_json::to_value(body)?),
                ..RequestOptions::default()
            },
        )
        .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(
            path,
            RequestOptions {
                method: Method::DELETE,
                ..RequestOptions::default()
            },
        )
        .await
    }

    // ===== Data Fetching Methods =====

    /// Fetch the bookable trips shown on the home screen.
    pub async fn available_trips(&self) -> Result<Vec<Trip>, ApiError> {
        self.get("/viajes/disponibles").await
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginReply, ApiError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });
        self.request(
            "/clientes/login",
            RequestOptions {
                method: Method::POST,
                body: Some(body),
                include_auth: false,
                ..RequestOptions::default()
            },
        )
        .await
    }

    async fn register(&self, data: &RegisterData) -> Result<RegisterReply, ApiError> {
        self.request(
            "/clientes/registrar",
            RequestOptions {
                method: Method::POST,
                body: Some(serde_json::to_value(data)?),
                include_auth: false,
                ..RequestOptions::default()
            },
        )
        .await
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let url = Self::join_url(&self.base_url, "/auth/logout");
        debug!(url = %url, "Sending logout request");

        let response = self.client.post(&url).bearer_auth(token).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let content_type = response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let text = response.text().await.unwrap_or_default();
            let payload =
                Self::classify_body(&content_type, text).unwrap_or(Payload::Text(String::new()));
            Err(ApiError::from_status(status, &payload))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
