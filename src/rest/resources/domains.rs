//! Branded domain endpoints.
//!
//! Domains are read-only through this API. The domain list does not support
//! the `last=` convention, so its cursor always holds a single page.

use serde::Serialize;

use crate::clients::{HttpMethod, HttpRequest};
use crate::config::WorkspaceId;
use crate::rest::classify::{classify, classify_count};
use crate::rest::{Decoded, PaginatedCursor, RequestLabel, ResourceError};

use super::{segment, to_query, OrderDir, Scope};

/// Kind of domain.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DomainType {
    /// A domain the account owns.
    User,
    /// A shared service domain such as `rebrand.ly`.
    Service,
}

/// Sort field for [`Domains::list`].
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DomainOrderBy {
    /// Creation time.
    CreatedAt,
    /// Last update time.
    UpdatedAt,
    /// Domain name.
    FullName,
}

/// Parameters for listing domains.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DomainListParams {
    /// Return only active (or only inactive) domains.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    /// Filter by kind.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub domain_type: Option<DomainType>,

    /// Sort field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<DomainOrderBy>,

    /// Sort direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_dir: Option<OrderDir>,

    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Parameters for counting domains.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct DomainCountParams {
    /// Count only active (or only inactive) domains.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    /// Count only domains of this kind.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub domain_type: Option<DomainType>,
}

/// Operations on branded domains.
#[derive(Clone, Copy, Debug)]
pub struct Domains<'a> {
    scope: Scope<'a>,
}

impl<'a> Domains<'a> {
    pub(crate) const fn new(scope: Scope<'a>) -> Self {
        Self { scope }
    }

    /// Returns a handle whose calls are scoped to `workspace`.
    #[must_use]
    pub fn in_workspace(self, workspace: &'a WorkspaceId) -> Self {
        Self {
            scope: self.scope.in_workspace(workspace),
        }
    }

    /// Lists domains.
    ///
    /// Returns `Ok(None)` if the service answers with something other than a
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn list(
        &self,
        params: &DomainListParams,
    ) -> Result<Option<PaginatedCursor<'a>>, ResourceError> {
        let label = RequestLabel::new("List", "domains", "all");
        let query = to_query(params, &label)?;
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Get, "domains").query(query))
            .await?;
        let decoded = classify(&response, label)?;
        Ok(self.scope.cursor(&response, decoded))
    }

    /// Retrieves a domain.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn get(&self, domain_id: &str) -> Result<Decoded, ResourceError> {
        let path = format!("domains/{}", segment(domain_id));
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Get, path))
            .await?;
        classify(&response, RequestLabel::new("Get", "domain", domain_id))
    }

    /// Counts domains.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Unauthorized`] if the API key is rejected.
    pub async fn count(&self, params: &DomainCountParams) -> Result<u64, ResourceError> {
        let label = RequestLabel::new("Count", "domains", "");
        let query = to_query(params, &label)?;
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Get, "domains/count").query(query))
            .await?;
        classify_count(&response, label)
    }
}
