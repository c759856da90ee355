//! REST layer for the Rebrandly API.
//!
//! This module turns raw HTTP exchanges into typed outcomes:
//!
//! - **Classification**: [`classify`], [`classify_count`] and
//!   [`classify_workspace`] map a response onto a [`Decoded`] value or a
//!   [`ResourceError`], recognising the business errors the API hides inside
//!   generic 403/404 statuses
//! - **Pagination**: [`PaginatedCursor`] walks the links list one page at a
//!   time with the `last=<id>` convention
//! - **Validation**: [`validate_bulk_link`] checks bulk-create payloads before
//!   they are sent
//! - **Endpoints**: the [`resources`] submodule holds the links, domains and
//!   workspaces operation sets
//!
//! # Example
//!
//! ```rust,ignore
//! use rebrandly_api::rest::{Decoded, ResourceError};
//! use rebrandly_api::rest::resources::LinkListParams;
//!
//! let mut cursor = client
//!     .links()
//!     .list(&LinkListParams { limit: Some(25), ..Default::default() })
//!     .await?
//!     .expect("links are listed as an array");
//!
//! loop {
//!     for link in &cursor {
//!         println!("{}", link["id"]);
//!     }
//!     cursor.next_page().await?;
//!     if cursor.is_exhausted() {
//!         break;
//!     }
//! }
//! ```

mod classify;
mod cursor;
mod errors;
mod validation;

pub mod resources;

pub use classify::{classify, classify_count, classify_workspace, Decoded};
pub use cursor::PaginatedCursor;
pub use errors::{RequestLabel, ResourceError};
pub use validation::{validate_bulk_link, validate_bulk_links, ValidationError};
