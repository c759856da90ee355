//! Local validation of request payloads.
//!
//! Some payload mistakes are cheaper to catch before anything is sent. Bulk
//! link creation in particular goes to the enterprise host and is rejected as
//! a whole, so every link spec is checked here first.

use serde_json::Value;
use thiserror::Error;

/// A payload rejected before any request was sent.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A link spec has no `destination`, or one that is not a non-empty string.
    #[error("Destination must be specified for every link.")]
    MissingDestination,

    /// A link spec names its domain both as `domain` and as `domainId`.
    #[error("Specify the domain only once per link.")]
    DuplicateDomain,

    /// A link spec has neither `domain` nor `domainId`.
    #[error("A key specifying the domain or domainId must exist for every link.")]
    MissingDomain,

    /// `domainId` is present but not a non-empty string.
    #[error("domainId key must have a valid value specified.")]
    EmptyDomainId,

    /// `domain` is present but has no `id`.
    #[error("Domain object must have id key specified.")]
    MissingDomainObjectId,

    /// `domain.id` is present but not a non-empty string.
    #[error("Domain object must have a valid value for id key.")]
    EmptyDomainObjectId,

    /// A link spec is not a JSON object.
    #[error("Every link must be a JSON object.")]
    NotAnObject,

    /// A workspace type other than `classic` or `extended`.
    #[error("Workspace type must be one of the following: classic, extended (got '{value}')")]
    InvalidWorkspaceType {
        /// The rejected value.
        value: String,
    },
}

/// Checks one link spec of a bulk create.
///
/// A spec needs a non-empty string `destination` and exactly one domain
/// reference: either a non-empty string `domainId`, or a `domain` object with
/// a non-empty string `id`.
///
/// # Errors
///
/// Returns the first [`ValidationError`] the spec violates.
pub fn validate_bulk_link(link: &Value) -> Result<(), ValidationError> {
    let Some(link) = link.as_object() else {
        return Err(ValidationError::NotAnObject);
    };

    if !link.get("destination").is_some_and(is_non_empty_string) {
        return Err(ValidationError::MissingDestination);
    }

    match (link.get("domainId"), link.get("domain")) {
        (Some(_), Some(_)) => Err(ValidationError::DuplicateDomain),
        (Some(domain_id), None) if is_non_empty_string(domain_id) => Ok(()),
        (Some(_), None) => Err(ValidationError::EmptyDomainId),
        (None, Some(domain)) => match domain.get("id") {
            Some(id) if is_non_empty_string(id) => Ok(()),
            Some(_) => Err(ValidationError::EmptyDomainObjectId),
            None => Err(ValidationError::MissingDomainObjectId),
        },
        (None, None) => Err(ValidationError::MissingDomain),
    }
}

/// Checks every link spec of a bulk create, stopping at the first failure.
///
/// # Errors
///
/// Returns the index of the offending spec and its [`ValidationError`].
pub fn validate_bulk_links(links: &[Value]) -> Result<(), (usize, ValidationError)> {
    links
        .iter()
        .enumerate()
        .try_for_each(|(index, link)| validate_bulk_link(link).map_err(|e| (index, e)))
}

fn is_non_empty_string(value: &Value) -> bool {
    matches!(value, Value::String(s) if !s.is_empty())
}
