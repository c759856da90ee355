//! Workspace endpoints.
//!
//! Workspace calls report their failures differently from the other
//! resources and are classified with
//! [`classify_workspace`](crate::rest::classify_workspace).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{json, Value};

use crate::clients::{HttpMethod, HttpRequest};
use crate::rest::classify::classify_workspace;
use crate::rest::validation::ValidationError;
use crate::rest::{Decoded, PaginatedCursor, RequestLabel, ResourceError};

use super::{segment, Scope};

/// The kind of a workspace.
///
/// Parsing is case-insensitive:
///
/// ```rust
/// use rebrandly_api::rest::resources::WorkspaceType;
///
/// assert_eq!("Extended".parse::<WorkspaceType>(), Ok(WorkspaceType::Extended));
/// assert!("premium".parse::<WorkspaceType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceType {
    /// A classic workspace.
    #[default]
    Classic,
    /// An extended workspace. Extended workspaces cannot be deleted.
    Extended,
}

impl WorkspaceType {
    /// Returns the wire name of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Extended => "extended",
        }
    }
}

impl fmt::Display for WorkspaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkspaceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "extended" => Ok(Self::Extended),
            _ => Err(ValidationError::InvalidWorkspaceType {
                value: s.to_string(),
            }),
        }
    }
}

/// Operations on workspaces.
#[derive(Clone, Copy, Debug)]
pub struct Workspaces<'a> {
    scope: Scope<'a>,
}

impl<'a> Workspaces<'a> {
    pub(crate) const fn new(scope: Scope<'a>) -> Self {
        Self { scope }
    }

    /// Creates a workspace and associates the given domains with it.
    ///
    /// Domains are associated one at a time after the workspace exists; the
    /// first failing association aborts the rest and is returned as the error.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidInput`] if the service rejects the
    /// workspace or a domain id, and [`ResourceError::MalformedResponse`] if
    /// domains were given but the created workspace carries no id.
    pub async fn create(
        &self,
        name: &str,
        workspace_type: WorkspaceType,
        domain_ids: &[&str],
    ) -> Result<Decoded, ResourceError> {
        let label = RequestLabel::new("Create", "workspace", "");
        let response = self
            .scope
            .send(
                HttpRequest::builder(HttpMethod::Post, "workspaces")
                    .body(json!({ "name": name, "type": workspace_type })),
            )
            .await?;
        let workspace = classify_workspace(&response, label.clone())?;

        if domain_ids.is_empty() {
            return Ok(workspace);
        }

        let workspace_id = workspace
            .as_item()
            .and_then(|item| item.get("id"))
            .and_then(Value::as_str)
            .ok_or_else(|| ResourceError::MalformedResponse {
                label,
                reason: "created workspace has no id".to_string(),
            })?;

        for domain_id in domain_ids {
            self.add_domain(workspace_id, domain_id).await?;
        }

        Ok(workspace)
    }

    /// Retrieves a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidInput`] if the workspace does not exist.
    pub async fn get(&self, workspace_id: &str) -> Result<Decoded, ResourceError> {
        let path = format!("workspaces/{}", segment(workspace_id));
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Get, path))
            .await?;
        classify_workspace(&response, RequestLabel::new("Get", "workspace", workspace_id))
    }

    /// Lists workspaces.
    ///
    /// Returns `Ok(None)` if the service answers with something other than a
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn list(&self) -> Result<Option<PaginatedCursor<'a>>, ResourceError> {
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Get, "workspaces"))
            .await?;
        let decoded = classify_workspace(&response, RequestLabel::new("List", "workspace", "all"))?;
        Ok(self.scope.cursor(&response, decoded))
    }

    /// Renames a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidInput`] if the name is rejected.
    pub async fn update(&self, workspace_id: &str, name: &str) -> Result<Decoded, ResourceError> {
        let path = format!("workspaces/{}", segment(workspace_id));
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Post, path).body(json!({ "name": name })))
            .await?;
        classify_workspace(&response, RequestLabel::new("Update", "workspace", workspace_id))
    }

    /// Deletes a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidInput`] for extended workspaces, which
    /// cannot be deleted.
    pub async fn delete(&self, workspace_id: &str) -> Result<Decoded, ResourceError> {
        let path = format!("workspaces/{}", segment(workspace_id));
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Delete, path))
            .await?;
        classify_workspace(&response, RequestLabel::new("Delete", "workspace", workspace_id))
    }

    /// Lists the domains associated with a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn get_domains(&self, workspace_id: &str) -> Result<Decoded, ResourceError> {
        let path = format!("workspaces/{}/domains", segment(workspace_id));
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Get, path))
            .await?;
        classify_workspace(
            &response,
            RequestLabel::new("Get domains", "workspace", workspace_id),
        )
    }

    /// Associates a domain with a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidInput`] if either id is unknown.
    pub async fn add_domain(
        &self,
        workspace_id: &str,
        domain_id: &str,
    ) -> Result<Decoded, ResourceError> {
        let path = format!(
            "workspaces/{}/domains/{}",
            segment(workspace_id),
            segment(domain_id)
        );
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Post, path).body(json!({})))
            .await?;
        classify_workspace(
            &response,
            RequestLabel::new("Associate domains", "workspace", workspace_id),
        )
    }
}
