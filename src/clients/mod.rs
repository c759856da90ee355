//! HTTP client types for Rebrandly API communication.
//!
//! This module provides the transport layer used by every resource endpoint.
//! It handles URL construction, session headers and request/response capture;
//! interpreting status codes is left to the [`rest`](crate::rest) layer.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`ClientContext`]: The API key and workspace attached to every request
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A completed exchange, including its [`RequestInfo`]
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`ApiHost`]: Standard or enterprise host
//!
//! # Example
//!
//! ```rust,ignore
//! use rebrandly_api::{RebrandlyConfig, ApiKey};
//! use rebrandly_api::clients::{HttpClient, HttpRequest, HttpMethod};
//!
//! let config = RebrandlyConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = HttpClient::new(&config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "links")
//!     .query_param("limit", "10")
//!     .build()
//!     .unwrap();
//!
//! let response = client.request(request).await?;
//! println!("{} -> {}", response.request.url, response.code);
//! ```
//!
//! # Retry Behavior
//!
//! The client never retries. Every request is sent exactly once and its
//! outcome is returned to the caller.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, InvalidHttpRequestError};
pub use http_client::{ClientContext, HttpClient, SDK_VERSION};
pub use http_request::{ApiHost, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, RequestInfo};
