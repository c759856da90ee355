//! HTTP client for Rebrandly API communication.
//!
//! This module provides the [`HttpClient`] type, the transport every resource
//! endpoint sends its requests through, and the [`ClientContext`] holding the
//! credential and active workspace that are attached to every request.

use std::collections::HashMap;

use reqwest::Url;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{ApiHost, HttpMethod, HttpRequest};
use crate::clients::http_response::{HttpResponse, RequestInfo};
use crate::config::{ApiKey, HostUrl, RebrandlyConfig, WorkspaceId, API_BASE_PATH};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Session state sent with every request: the API key and, optionally, the
/// workspace all calls are scoped to.
///
/// One context is owned by one [`HttpClient`]; every endpoint built from that
/// client reads the same instance, so changing it changes the headers of all
/// subsequent calls made through any of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientContext {
    api_key: ApiKey,
    workspace: Option<WorkspaceId>,
}

impl ClientContext {
    /// Creates a context for the given credential and workspace.
    #[must_use]
    pub const fn new(api_key: ApiKey, workspace: Option<WorkspaceId>) -> Self {
        Self { api_key, workspace }
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the active workspace, if any.
    #[must_use]
    pub const fn workspace(&self) -> Option<&WorkspaceId> {
        self.workspace.as_ref()
    }

    /// Replaces the API key.
    pub fn set_api_key(&mut self, api_key: ApiKey) {
        self.api_key = api_key;
    }

    /// Replaces the active workspace. `None` returns to the account default.
    pub fn set_workspace(&mut self, workspace: Option<WorkspaceId>) {
        self.workspace = workspace;
    }
}

/// HTTP client for making requests to the Rebrandly API.
///
/// The client handles:
/// - URL construction for the standard and enterprise hosts
/// - Default headers: `apikey`, `workspace`, `Accept`, `Content-Type`, `User-Agent`
/// - Capturing the originating request alongside each response
///
/// Non-2xx responses are returned as ordinary [`HttpResponse`] values; only
/// transport failures are errors here.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`.
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Host for standard endpoints.
    api_host: HostUrl,
    /// Host for enterprise endpoints.
    enterprise_host: HostUrl,
    /// Base path (e.g., "/v1").
    base_path: String,
    /// Value of the `User-Agent` header.
    user_agent: String,
    /// Credential and workspace attached to every request.
    context: ClientContext,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the SDK configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &RebrandlyConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Rebrandly API Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            api_host: config.api_host().clone(),
            enterprise_host: config.enterprise_host().clone(),
            base_path: API_BASE_PATH.to_string(),
            user_agent,
            context: ClientContext::new(config.api_key().clone(), config.workspace().cloned()),
        })
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the shared session context.
    #[must_use]
    pub const fn context(&self) -> &ClientContext {
        &self.context
    }

    /// Returns the shared session context for modification.
    pub fn context_mut(&mut self) -> &mut ClientContext {
        &mut self.context
    }

    /// Returns the headers sent with every request, built from the current context.
    #[must_use]
    pub fn default_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("User-Agent".to_string(), self.user_agent.clone());
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert(
            "apikey".to_string(),
            self.context.api_key().as_ref().to_string(),
        );
        if let Some(workspace) = self.context.workspace() {
            headers.insert("workspace".to_string(), workspace.as_ref().to_string());
        }
        headers
    }

    /// Builds the absolute URL of an endpoint path (without query string).
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if the result is not a valid URL.
    pub fn endpoint_url(&self, host: ApiHost, path: &str) -> Result<Url, HttpError> {
        let host = match host {
            ApiHost::Standard => &self.api_host,
            ApiHost::Enterprise => &self.enterprise_host,
        };
        let raw = format!(
            "{}{}/{}",
            host.as_ref(),
            self.base_path,
            path.trim_start_matches('/')
        );
        Url::parse(&raw).map_err(|e| HttpError::InvalidUrl {
            url: raw,
            reason: e.to_string(),
        })
    }

    /// Sends an HTTP request to the Rebrandly API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails validation, its URL cannot
    /// be built, or a network error occurs.
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let mut url = self.endpoint_url(request.host, &request.path)?;
        if let Some(query) = request.query.as_ref().filter(|q| !q.is_empty()) {
            url.query_pairs_mut().extend_pairs(query.iter());
        }

        self.execute(request.http_method, url, request.body.as_ref())
            .await
    }

    /// Sends a GET request to an absolute URL, as produced by a previous
    /// response's [`RequestInfo`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if a network error occurs.
    pub async fn get_url(&self, url: Url) -> Result<HttpResponse, HttpError> {
        self.execute(HttpMethod::Get, url, None).await
    }

    async fn execute(
        &self,
        method: HttpMethod,
        url: Url,
        body: Option<&serde_json::Value>,
    ) -> Result<HttpResponse, HttpError> {
        tracing::debug!("Sending {} request to {}", method.as_str(), url);

        let mut req_builder = match method {
            HttpMethod::Get => self.client.get(url.clone()),
            HttpMethod::Post => self.client.post(url.clone()),
            HttpMethod::Put => self.client.put(url.clone()),
            HttpMethod::Delete => self.client.delete(url.clone()),
        };

        for (key, value) in self.default_headers() {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = body {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let raw_body = res.text().await?;

        tracing::debug!(
            "Received status {} for {} request to {}",
            code,
            method.as_str(),
            url
        );

        Ok(HttpResponse::new(
            code,
            headers,
            raw_body,
            RequestInfo::new(method, url),
        ))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
