use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, Url};
use tracing::debug;

use crate::domain::{AccessToken, DomainError};

/// Trait for HTTP client operations (for mocking)
///
/// Every call carries the bearer token and asks for JSON. A non-2xx status
/// maps to `DomainError::Remote`; an empty 2xx body decodes to `Value::Null`.
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn get_json(&self, url: &Url, token: &AccessToken)
        -> Result<serde_json::Value, DomainError>;

    async fn post_json(
        &self,
        url: &Url,
        token: &AccessToken,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;

    async fn put_json(
        &self,
        url: &Url,
        token: &AccessToken,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: std::time::Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    async fn send(
        &self,
        method: Method,
        url: &Url,
        token: &AccessToken,
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, DomainError> {
        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(AUTHORIZATION, token.bearer_header())
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("Request failed: {}", e.without_url())))?;

        let status = response.status();
        debug!(method = %method, path = url.path(), status = status.as_u16(), "Directory API call");

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::remote(status.as_u16(), error_body));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DomainError::transport(format!("Failed to read response: {}", e)))?;

        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }

        serde_json::from_str(&text)
            .map_err(|e| DomainError::transport(format!("Failed to parse response: {}", e)))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn get_json(
        &self,
        url: &Url,
        token: &AccessToken,
    ) -> Result<serde_json::Value, DomainError> {
        self.send(Method::GET, url, token, None).await
    }

    async fn post_json(
        &self,
        url: &Url,
        token: &AccessToken,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        self.send(Method::POST, url, token, Some(body)).await
    }

    async fn put_json(
        &self,
        url: &Url,
        token: &AccessToken,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        self.send(Method::PUT, url, token, Some(body)).await
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// A request seen by the mock client
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedRequest {
        pub method: Method,
        pub url: String,
        pub authorization: String,
        pub body: Option<serde_json::Value>,
    }

    #[derive(Debug)]
    pub struct MockHttpClient {
        responses: RwLock<HashMap<String, serde_json::Value>>,
        errors: RwLock<HashMap<String, u16>>,
        requests: RwLock<Vec<RecordedRequest>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self {
                responses: RwLock::new(HashMap::new()),
                errors: RwLock::new(HashMap::new()),
                requests: RwLock::new(Vec::new()),
            }
        }

        pub fn with_response(self, url: impl Into<String>, response: serde_json::Value) -> Self {
            self.responses.write().unwrap().insert(url.into(), response);
            self
        }

        pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
            self.errors.write().unwrap().insert(url.into(), status);
            self
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.read().unwrap().clone()
        }

        fn respond(
            &self,
            method: Method,
            url: &Url,
            token: &AccessToken,
            body: Option<&serde_json::Value>,
        ) -> Result<serde_json::Value, DomainError> {
            let url = url.to_string();
            self.requests.write().unwrap().push(RecordedRequest {
                method,
                url: url.clone(),
                authorization: token.bearer_header(),
                body: body.cloned(),
            });

            if let Some(status) = self.errors.read().unwrap().get(&url) {
                return Err(DomainError::remote(*status, "mock rejection"));
            }

            self.responses
                .read()
                .unwrap()
                .get(&url)
                .cloned()
                .ok_or_else(|| DomainError::transport(format!("No mock response for {}", url)))
        }
    }

    impl Default for MockHttpClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl HttpClientTrait for MockHttpClient {
        async fn get_json(
            &self,
            url: &Url,
            token: &AccessToken,
        ) -> Result<serde_json::Value, DomainError> {
            self.respond(Method::GET, url, token, None)
        }

        async fn post_json(
            &self,
            url: &Url,
            token: &AccessToken,
            body: &serde_json::Value,
        ) -> Result<serde_json::Value, DomainError> {
            self.respond(Method::POST, url, token, Some(body))
        }

        async fn put_json(
            &self,
            url: &Url,
            token: &AccessToken,
            body: &serde_json::Value,
        ) -> Result<serde_json::Value, DomainError> {
            self.respond(Method::PUT, url, token, Some(body))
        }
    }
}
