//! Rebrandly resource endpoints.
//!
//! Each endpoint set is a lightweight handle borrowing the [`HttpClient`]:
//!
//! - [`Links`]: links, routing rules, deep links and Open Graph metadata
//! - [`Domains`]: branded domains
//! - [`Workspaces`]: workspaces and their domain associations
//!
//! Handles are obtained from [`RebrandlyClient`](crate::RebrandlyClient) and
//! are cheap to create and copy. [`Links`] and [`Domains`] can be scoped to a
//! workspace other than the client's active one with `in_workspace`, which
//! sends the `workspace` query parameter on every call made through that
//! handle.
//!
//! # Example
//!
//! ```rust,ignore
//! use rebrandly_api::rest::resources::{LinkListParams, NewLink, OrderDir};
//!
//! let links = client.links();
//!
//! let created = links.create(&NewLink::new("https://rebrandly.com")).await?;
//! let fetched = links.get(created.id().unwrap()).await?;
//!
//! let params = LinkListParams {
//!     order_dir: Some(OrderDir::Desc),
//!     limit: Some(25),
//!     ..Default::default()
//! };
//! if let Some(cursor) = links.list(&params).await? {
//!     println!("first page has {} links", cursor.current_count());
//! }
//! ```

mod domains;
mod links;
mod workspaces;

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::clients::{HttpClient, HttpError, HttpRequestBuilder, HttpResponse};
use crate::config::WorkspaceId;
use crate::rest::{Decoded, PaginatedCursor, RequestLabel, ResourceError};

pub use domains::{DomainCountParams, DomainListParams, DomainOrderBy, DomainType, Domains};
pub use links::{
    DomainRef, LinkCountParams, LinkListParams, LinkOrderBy, LinkUpdate, Links, NewLink, OpenGraph,
};
pub use workspaces::{WorkspaceType, Workspaces};

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderDir {
    /// Ascending order.
    Asc,
    /// Descending order.
    #[default]
    Desc,
}

/// The client and workspace a resource handle sends its requests with.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Scope<'a> {
    pub(crate) client: &'a HttpClient,
    pub(crate) workspace: Option<&'a WorkspaceId>,
}

impl<'a> Scope<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self {
            client,
            workspace: None,
        }
    }

    pub(crate) fn in_workspace(self, workspace: &'a WorkspaceId) -> Self {
        tracing::debug!("Scoping requests to workspace {}", workspace);
        Self {
            workspace: Some(workspace),
            ..self
        }
    }

    /// The workspace requests are scoped to: the handle override, else the
    /// client's active workspace.
    pub(crate) fn effective_workspace(&self) -> Option<&WorkspaceId> {
        self.workspace.or_else(|| self.client.context().workspace())
    }

    /// Adds the workspace override, builds and sends the request.
    pub(crate) async fn send(
        &self,
        request: HttpRequestBuilder,
    ) -> Result<HttpResponse, ResourceError> {
        let request = match self.workspace {
            Some(workspace) => request.query_param("workspace", workspace.to_string()),
            None => request,
        };
        let request = request.build().map_err(HttpError::from)?;
        Ok(self.client.request(request).await?)
    }

    /// Wraps a list-shaped result in a cursor; anything else yields `None`.
    pub(crate) fn cursor(
        &self,
        response: &HttpResponse,
        decoded: Decoded,
    ) -> Option<PaginatedCursor<'a>> {
        decoded
            .into_list()
            .map(|items| PaginatedCursor::new(self.client, items, &response.request))
    }
}

/// Percent-encodes a caller-supplied id for use as a path segment.
pub(crate) fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

/// Serializes a request payload into a JSON body.
pub(crate) fn to_body<T: Serialize>(
    payload: &T,
    label: &RequestLabel,
) -> Result<Value, ResourceError> {
    serde_json::to_value(payload).map_err(|e| ResourceError::InvalidInput {
        label: label.clone(),
        reason: format!("Failed to serialize body: {e}"),
    })
}

/// Serializes a parameter struct into query parameters.
///
/// `None` fields are skipped; scalars are rendered as their plain string form.
pub(crate) fn to_query<T: Serialize>(
    params: &T,
    label: &RequestLabel,
) -> Result<BTreeMap<String, String>, ResourceError> {
    let value = serde_json::to_value(params).map_err(|e| ResourceError::InvalidInput {
        label: label.clone(),
        reason: format!("Failed to serialize params: {e}"),
    })?;

    let mut query = BTreeMap::new();

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(_) | Value::Object(_) => {
                    query.insert(key, val.to_string());
                }
            }
        }
    }

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_to_query_skips_none_and_renames_keys() {
        let params = LinkListParams {
            order_by: Some(LinkOrderBy::CreatedAt),
            order_dir: Some(OrderDir::Asc),
            limit: Some(2),
            favourite: Some(true),
            domain_id: Some("d1".to_string()),
            date_from: NaiveDate::from_ymd_opt(2024, 1, 31),
            ..Default::default()
        };
        let query = to_query(&params, &RequestLabel::new("List", "links", "all_links")).unwrap();

        assert_eq!(query.get("orderBy"), Some(&"createdAt".to_string()));
        assert_eq!(query.get("orderDir"), Some(&"asc".to_string()));
        assert_eq!(query.get("limit"), Some(&"2".to_string()));
        assert_eq!(query.get("favourite"), Some(&"true".to_string()));
        assert_eq!(query.get("domain.id"), Some(&"d1".to_string()));
        assert_eq!(query.get("dateFrom"), Some(&"2024-01-31".to_string()));
        assert!(!query.contains_key("dateTo"));
        assert!(!query.contains_key("slashtag"));
        assert_eq!(query.len(), 6);
    }

    #[test]
    fn test_to_query_of_defaults_is_empty() {
        let query = to_query(
            &DomainListParams::default(),
            &RequestLabel::new("List", "domains", "all"),
        )
        .unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn test_segment_percent_encodes_ids() {
        assert_eq!(segment("abc123"), "abc123");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }
}
