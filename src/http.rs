//! GraphQL-over-HTTP executor.
//!
//! Posts each request as `{ "query", "variables" }` to a single endpoint and
//! hands the response body back unchanged. Any transport failure, non-success
//! status, or GraphQL `errors` entry is reported as an execution failure.

use crate::config::EndpointConfig;
use crate::error::LoadError;
use crate::loader::{Executor, Request, Response};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
struct GraphQlBody<'a> {
    query: &'a str,
    variables: &'a serde_json::Value,
}

fn map_http_error(error: reqwest::Error) -> LoadError {
    if let Some(status) = error.status() {
        LoadError::Status {
            status: status.as_u16(),
            body: error.to_string(),
        }
    } else if error.is_timeout() {
        LoadError::Transport(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        LoadError::Transport(format!("Connection error: {}", error))
    } else {
        LoadError::Transport(format!("HTTP error: {}", error))
    }
}

/// Reject responses that report GraphQL errors or carry no data.
pub fn check_graphql_response(body: Response) -> Result<Response, LoadError> {
    if let Some(errors) = body.get("errors").and_then(serde_json::Value::as_array) {
        if !errors.is_empty() {
            let messages = errors
                .iter()
                .map(|e| {
                    e.get("message")
                        .and_then(serde_json::Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| e.to_string())
                })
                .collect();
            return Err(LoadError::GraphQl(messages));
        }
    }
    match body.get("data") {
        Some(data) if !data.is_null() => Ok(body),
        _ => Err(LoadError::Execution(
            "Response contains neither data nor errors".to_string(),
        )),
    }
}

fn default_headers(config: &EndpointConfig) -> Result<HeaderMap, LoadError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(token) = &config.token {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| LoadError::Config(format!("Invalid endpoint token: {}", e)))?;
        headers.insert(AUTHORIZATION, value);
    }
    for (name, value) in &config.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| LoadError::Config(format!("Invalid header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| LoadError::Config(format!("Invalid value for header '{}': {}", name, e)))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Executor backed by a GraphQL HTTP endpoint.
pub struct HttpExecutor {
    client: Client,
    url: String,
}

impl HttpExecutor {
    pub fn new(config: &EndpointConfig) -> Result<Self, LoadError> {
        let url = config
            .url
            .clone()
            .ok_or_else(|| LoadError::Config("Endpoint URL is not configured".to_string()))?;
        let client = Client::builder()
            .default_headers(default_headers(config)?)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| LoadError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Executor for HttpExecutor {
    async fn execute(&self, request: &Request) -> Result<Response, LoadError> {
        let body = GraphQlBody {
            query: request.mutation(),
            variables: request.variables(),
        };
        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LoadError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Response = response
            .json()
            .await
            .map_err(|e| LoadError::Execution(format!("Failed to parse response: {}", e)))?;
        debug!(operation = %request.operation(), url = %self.url, "Received response");
        check_graphql_response(body)
    }
}
