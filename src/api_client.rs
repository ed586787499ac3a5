//! HTTP request wrapper with normalized failures
//!
//! Every request resolves to either decoded JSON or a `RequestError`,
//! and every failure is announced through the notification center
//! before it is returned. The caller still gets the error for its own
//! handling; neither channel replaces the other.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::HttpConfig;
use crate::notifications::NotificationCenter;

/// Message shown to the user whenever a request fails.
const REQUEST_FAILED_MESSAGE: &str = "Network request failed";

/// The verbs the client issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl Default for Method {
    fn default() -> Self {
        Method::Get
    }
}

/// Per-request options layered over the client defaults.
///
/// The default request is a GET with a `Content-Type: application/json`
/// header and no body. Caller-supplied header keys win over that
/// default on a per-key basis.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Normalized request failure: either the server answered with a
/// non-acceptable status, or the exchange itself broke down
/// (connectivity, timeout, undecodable body).
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("server returned HTTP status {status}")]
    Status { status: u16 },
    #[error("transport failure: {message}")]
    Transport { message: String },
}

/// Issues HTTP calls and normalizes their outcomes.
///
/// Holds no state between calls beyond the underlying connection pool;
/// deduplication of bursts is the caller's business (see
/// [`crate::rate_control`]).
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    notifications: NotificationCenter,
}

impl ApiClient {
    /// Build a client reporting failures to `notifications`.
    pub fn new(notifications: NotificationCenter) -> Self {
        Self {
            client: reqwest::Client::new(),
            notifications,
        }
    }

    /// Build a client with the configured request timeout.
    pub fn from_config(config: &HttpConfig, notifications: NotificationCenter) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            client,
            notifications,
        })
    }

    /// Issue a request and decode the response as JSON.
    ///
    /// Statuses outside 2xx/3xx fail without a body parse attempt. Any
    /// failure emits exactly one danger notification and is then
    /// returned to the caller.
    pub async fn request(&self, url: &str, options: RequestOptions) -> Result<Value, RequestError> {
        match self.execute(url, options).await {
            Ok(payload) => Ok(payload),
            Err(err) => {
                self.report_failure(url, &err);
                Err(err)
            }
        }
    }

    pub async fn get(&self, url: &str) -> Result<Value, RequestError> {
        self.request(url, RequestOptions::default()).await
    }

    pub async fn post<B: Serialize>(&self, url: &str, body: &B) -> Result<Value, RequestError> {
        self.send_with_body(Method::Post, url, body).await
    }

    pub async fn put<B: Serialize>(&self, url: &str, body: &B) -> Result<Value, RequestError> {
        self.send_with_body(Method::Put, url, body).await
    }

    pub async fn delete(&self, url: &str) -> Result<Value, RequestError> {
        self.request(url, RequestOptions::default().method(Method::Delete))
            .await
    }

    async fn send_with_body<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: &B,
    ) -> Result<Value, RequestError> {
        let payload = match serde_json::to_value(body) {
            Ok(payload) => payload,
            Err(err) => {
                let err = RequestError::Transport {
                    message: format!("request body serialization failed: {err}"),
                };
                self.report_failure(url, &err);
                return Err(err);
            }
        };
        self.request(url, RequestOptions::default().method(method).body(payload))
            .await
    }

    async fn execute(&self, url: &str, options: RequestOptions) -> Result<Value, RequestError> {
        let mut builder = self.client.request(options.method.as_reqwest(), url);
        // Caller header keys win over the default; reqwest's header()
        // appends rather than replaces, so the default is only added
        // when the caller did not supply that key.
        let caller_sets_content_type = options
            .headers
            .keys()
            .any(|name| name.eq_ignore_ascii_case("content-type"));
        if !caller_sets_content_type {
            builder = builder.header(reqwest::header::CONTENT_TYPE, "application/json");
        }
        for (name, value) in &options.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| RequestError::Transport {
            message: err.to_string(),
        })?;

        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(RequestError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| RequestError::Transport {
                message: format!("response body is not valid JSON: {err}"),
            })
    }

    fn report_failure(&self, url: &str, err: &RequestError) {
        tracing::error!(target: "api_client", "request to {} failed: {}", url, err);
        self.notifications.danger(REQUEST_FAILED_MESSAGE);
    }
}
