//! Resource-level error types for Rebrandly API operations.
//!
//! The Rebrandly API embeds business-error semantics inside otherwise generic
//! HTTP error codes, so the REST layer maps each failed exchange onto one of
//! a small set of outcomes:
//!
//! - [`ResourceError::InvalidInput`]: caller-supplied data was rejected, by the
//!   service or by local validation before any request was sent
//! - [`ResourceError::PermissionDenied`]: the account lacks the feature
//! - [`ResourceError::Unauthorized`]: the API key is invalid or revoked
//! - [`ResourceError::RequestFailed`]: any other non-2xx outcome
//! - [`ResourceError::MalformedResponse`]: a 200 whose body could not be used
//! - [`ResourceError::Http`]: the transport itself failed
//!
//! Every variant produced from an exchange carries a [`RequestLabel`] naming
//! the operation, the entity type and the entity id.
//!
//! # Example
//!
//! ```rust,ignore
//! use rebrandly_api::rest::ResourceError;
//!
//! match client.links().delete("abc123").await {
//!     Ok(confirmation) => println!("deleted {:?}", confirmation.id()),
//!     Err(ResourceError::RequestFailed { status: 404, .. }) => println!("already gone"),
//!     Err(ResourceError::InvalidInput { reason, .. }) => println!("fix input: {reason}"),
//!     Err(e) => println!("other error: {e}"),
//! }
//! ```

use std::fmt;

use crate::clients::HttpError;
use crate::rest::validation::ValidationError;
use thiserror::Error;

/// Names the request a failure belongs to.
///
/// Displays as `"{operation} request failed for {entity_type} with id {entity_id}"`.
/// `entity_id` is empty when the id is not known yet, e.g. on create.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestLabel {
    /// The logical operation, e.g. `"Delete"` or `"Bulk create"`.
    pub operation: &'static str,
    /// The entity type, e.g. `"link"` or `"workspace"`.
    pub entity_type: &'static str,
    /// The id of the targeted entity.
    pub entity_id: String,
}

impl RequestLabel {
    /// Creates a label.
    #[must_use]
    pub fn new(
        operation: &'static str,
        entity_type: &'static str,
        entity_id: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            entity_type,
            entity_id: entity_id.into(),
        }
    }
}

impl fmt::Display for RequestLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} request failed for {} with id {}",
            self.operation, self.entity_type, self.entity_id
        )
    }
}

/// Error type for Rebrandly resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Caller-supplied data was rejected.
    ///
    /// Returned for malformed destination URLs, missing or duplicated domain
    /// references, unknown workspace types, and similar input mistakes.
    #[error("{label}: {reason}")]
    InvalidInput {
        /// The failed request.
        label: RequestLabel,
        /// What was wrong with the input.
        reason: String,
    },

    /// The account is authenticated but not entitled to the feature.
    #[error("{label} due to missing permission: {permission}.")]
    PermissionDenied {
        /// The failed request.
        label: RequestLabel,
        /// The missing permission, as reported by the API.
        permission: String,
    },

    /// The API key is invalid or revoked (HTTP 401).
    #[error("{label}. Please ensure a valid api key is set.")]
    Unauthorized {
        /// The failed request.
        label: RequestLabel,
    },

    /// Any other non-2xx outcome.
    #[error("{label} (HTTP {status}): {body}")]
    RequestFailed {
        /// The failed request.
        label: RequestLabel,
        /// The HTTP status code.
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// A successful response whose body could not be interpreted.
    #[error("{label}: unexpected response body: {reason}")]
    MalformedResponse {
        /// The failed request.
        label: RequestLabel,
        /// Why the body was rejected.
        reason: String,
    },

    /// The transport failed before a response was received.
    #[error(transparent)]
    Http(#[from] HttpError),
}

/// Local validation failures are [`InvalidInput`](ResourceError::InvalidInput)
/// for the request they would have been sent with: a workspace type belongs
/// to workspace creation, every other check to bulk link creation.
impl From<ValidationError> for ResourceError {
    fn from(error: ValidationError) -> Self {
        let label = match &error {
            ValidationError::InvalidWorkspaceType { .. } => {
                RequestLabel::new("Create", "workspace", "")
            }
            _ => RequestLabel::new("Bulk create", "links", ""),
        };
        Self::InvalidInput {
            label,
            reason: error.to_string(),
        }
    }
}

impl ResourceError {
    /// Returns the label of the failed request, if the error came from one.
    #[must_use]
    pub const fn label(&self) -> Option<&RequestLabel> {
        match self {
            Self::InvalidInput { label, .. }
            | Self::PermissionDenied { label, .. }
            | Self::Unauthorized { label }
            | Self::RequestFailed { label, .. }
            | Self::MalformedResponse { label, .. } => Some(label),
            Self::Http(_) => None,
        }
    }

    /// Returns the HTTP status of a [`RequestFailed`](Self::RequestFailed) error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }

    /// Returns `true` for [`InvalidInput`](Self::InvalidInput).
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}
