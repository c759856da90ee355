//! # Rebrandly API Rust SDK
//!
//! An async Rust client for the Rebrandly URL-shortening API: links, branded
//! domains, workspaces, routing rules, deep links and Open Graph metadata.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`RebrandlyConfig`] and [`RebrandlyConfigBuilder`]
//! - Validated newtypes for the API key, workspace ids and hosts
//! - [`RebrandlyClient`], holding the session context shared by all endpoints
//! - Response classification into typed [`ResourceError`] outcomes
//! - Cursor-based pagination over the links list via [`PaginatedCursor`]
//! - Local validation of bulk link creation payloads
//!
//! ## Quick Start
//!
//! ```rust
//! use rebrandly_api::{RebrandlyConfig, ApiKey, WorkspaceId};
//!
//! let config = RebrandlyConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .workspace(WorkspaceId::new("your-workspace").unwrap())
//!     .build()
//!     .unwrap();
//! # let _ = config;
//! ```
//!
//! ## Working with Links
//!
//! ```rust,ignore
//! use rebrandly_api::{RebrandlyClient, ResourceError};
//! use rebrandly_api::rest::resources::{LinkListParams, LinkUpdate, NewLink};
//!
//! let client = RebrandlyClient::with_api_key("your-api-key")?;
//! let links = client.links();
//!
//! let created = links.create(&NewLink::new("https://rebrandly.com")).await?;
//! let id = created.id().unwrap().to_string();
//!
//! links
//!     .update(&id, &LinkUpdate {
//!         destination: "https://rebrandly.com/pricing".to_string(),
//!         title: "Pricing".to_string(),
//!         favourite: Some(true),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! match links.create(&NewLink::new("not a url")).await {
//!     Err(ResourceError::InvalidInput { reason, .. }) => println!("rejected: {reason}"),
//!     other => println!("unexpected: {other:?}"),
//! }
//! ```
//!
//! ## Pagination
//!
//! Listing links returns a [`PaginatedCursor`] over the first page. Iterating
//! the cursor yields the current page; `next_page` fetches the following one.
//!
//! ```rust,ignore
//! let mut cursor = client
//!     .links()
//!     .list(&LinkListParams { limit: Some(100), ..Default::default() })
//!     .await?
//!     .expect("links are listed as an array");
//!
//! while !cursor.is_exhausted() {
//!     for link in &cursor {
//!         println!("{}", link["shortUrl"]);
//!     }
//!     cursor.next_page().await?;
//! }
//! ```
//!
//! ## Logging
//!
//! The SDK emits [`tracing`](https://docs.rs/tracing) events (requests at
//! `debug`, abandoned pagination and locally rejected payloads at `warn`) and
//! never installs a subscriber.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: The client is `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime
//! - **No retries**: Every request is sent once and its outcome reported

mod client;

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

pub use client::RebrandlyClient;
pub use config::{ApiKey, HostUrl, RebrandlyConfig, RebrandlyConfigBuilder, WorkspaceId};
pub use error::{ClientError, ConfigError};

// Re-export HTTP client types
pub use clients::{
    ApiHost, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError,
};

// Re-export REST types
pub use rest::{Decoded, PaginatedCursor, RequestLabel, ResourceError, ValidationError};
