//! Response classification.
//!
//! Maps a completed [`HttpResponse`] onto either a [`Decoded`] value or a
//! typed [`ResourceError`]. The Rebrandly API reports several caller mistakes
//! through generic 403/404 statuses, so the body is inspected before falling
//! back to [`ResourceError::RequestFailed`].
//!
//! Three entry points exist:
//!
//! - [`classify`] for object- and list-returning endpoints
//! - [`classify_count`] for endpoints answering `{"count": n}`
//! - [`classify_workspace`] for workspace endpoints, which report errors differently

use std::num::FpCategory;

use serde_json::Value;

use crate::clients::{HttpMethod, HttpResponse};
use crate::rest::{RequestLabel, ResourceError};

/// The successful outcome of a classified response.
///
/// "No content" and "empty collection" are distinct: a GET answering `[]`
/// yields `ItemList(vec![])`, while a GET answering an empty body yields
/// [`Decoded::Empty`].
#[derive(Clone, Debug, PartialEq)]
pub enum Decoded {
    /// A single JSON value, normally an object.
    Item(Value),
    /// A JSON array.
    ItemList(Vec<Value>),
    /// A GET returned no content (empty body or `null`).
    Empty,
    /// A non-GET returned no content; holds the id of the targeted entity.
    Confirmation(String),
}

impl Decoded {
    /// Returns the id of the decoded entity: the `id` field of an item, or
    /// the echoed id of a confirmation.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Item(value) => value.get("id").and_then(Value::as_str),
            Self::Confirmation(id) => Some(id.as_str()),
            Self::ItemList(_) | Self::Empty => None,
        }
    }

    /// Returns the item, if this is [`Decoded::Item`].
    #[must_use]
    pub const fn as_item(&self) -> Option<&Value> {
        match self {
            Self::Item(value) => Some(value),
            _ => None,
        }
    }

    /// Consumes `self`, returning the item if this is [`Decoded::Item`].
    #[must_use]
    pub fn into_item(self) -> Option<Value> {
        match self {
            Self::Item(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the items, if this is [`Decoded::ItemList`].
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::ItemList(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Consumes `self`, returning the items if this is [`Decoded::ItemList`].
    #[must_use]
    pub fn into_list(self) -> Option<Vec<Value>> {
        match self {
            Self::ItemList(items) => Some(items),
            _ => None,
        }
    }
}

/// Classifies the response of an object- or list-returning endpoint.
///
/// - `200`: the body is decoded. Non-empty values are returned as
///   [`Decoded::Item`] or [`Decoded::ItemList`]. Empty values are returned
///   as-is for GET requests (`null` and an empty body become
///   [`Decoded::Empty`]); for other methods they become
///   [`Decoded::Confirmation`] carrying `label.entity_id`.
/// - `403` with `code: "OwnerFeatureNotIncluded"`: [`ResourceError::PermissionDenied`]
///   naming the body's `source`.
/// - `403` whose first `errors` entry is an `InvalidFormat` on `destination`:
///   [`ResourceError::InvalidInput`].
/// - `404` with `code: "NotFound", source: "domain"`: [`ResourceError::InvalidInput`].
/// - Anything else: [`ResourceError::RequestFailed`].
///
/// # Errors
///
/// Returns the [`ResourceError`] the response maps to.
pub fn classify(response: &HttpResponse, label: RequestLabel) -> Result<Decoded, ResourceError> {
    let rejection = match response.code {
        200 => return decode_success(response, label),
        403 => error_body(response).and_then(|body| forbidden(&body)),
        404 => error_body(response).and_then(|body| not_found(&body)),
        _ => None,
    };

    Err(reject(response, label, rejection))
}

/// Classifies the response of a count-returning endpoint.
///
/// `200` yields the body's integer `count`, `401` yields
/// [`ResourceError::Unauthorized`], anything else
/// [`ResourceError::RequestFailed`].
///
/// # Errors
///
/// Returns the [`ResourceError`] the response maps to, or
/// [`ResourceError::MalformedResponse`] when a 200 body has no integer `count`.
pub fn classify_count(response: &HttpResponse, label: RequestLabel) -> Result<u64, ResourceError> {
    match response.code {
        200 => {
            let body = match response.json() {
                Ok(body) => body,
                Err(e) => return Err(malformed(label, e.to_string())),
            };
            body.as_ref()
                .and_then(|b| b.get("count"))
                .and_then(Value::as_u64)
                .ok_or_else(|| malformed(label, "missing integer 'count' field".to_string()))
        }
        401 => Err(Rejection::Unauthorized.into_error(label)),
        _ => Err(reject(response, label, None)),
    }
}

/// Classifies the response of a workspace endpoint.
///
/// `200` is handled as in [`classify`]. Otherwise:
/// - `401`: [`ResourceError::Unauthorized`]
/// - `403` on DELETE with `code: "CouldNotDeleteExtendedWorkspace"`: [`ResourceError::InvalidInput`]
/// - `403` on other methods with both a `code` and an `errors` list: [`ResourceError::InvalidInput`]
/// - `404`: [`ResourceError::InvalidInput`], one of the given ids is wrong
/// - anything else: [`ResourceError::RequestFailed`]
///
/// # Errors
///
/// Returns the [`ResourceError`] the response maps to.
pub fn classify_workspace(
    response: &HttpResponse,
    label: RequestLabel,
) -> Result<Decoded, ResourceError> {
    let rejection = match response.code {
        200 => return decode_success(response, label),
        401 => Some(Rejection::Unauthorized),
        403 => error_body(response)
            .and_then(|body| workspace_forbidden(response.request.method, &body)),
        404 => Some(Rejection::InvalidInput(
            "the resource was not found. Please ensure all ids specified are correct.".to_string(),
        )),
        _ => None,
    };

    Err(reject(response, label, rejection))
}

/// A specific failure recognised from an error body.
#[derive(Debug, PartialEq, Eq)]
enum Rejection {
    InvalidInput(String),
    PermissionDenied(String),
    Unauthorized,
}

impl Rejection {
    fn into_error(self, label: RequestLabel) -> ResourceError {
        match self {
            Self::InvalidInput(reason) => ResourceError::InvalidInput { label, reason },
            Self::PermissionDenied(permission) => {
                ResourceError::PermissionDenied { label, permission }
            }
            Self::Unauthorized => ResourceError::Unauthorized { label },
        }
    }
}

/// Turns a recognised rejection into its error, or falls back to `RequestFailed`.
fn reject(
    response: &HttpResponse,
    label: RequestLabel,
    rejection: Option<Rejection>,
) -> ResourceError {
    match rejection {
        Some(rejection) => rejection.into_error(label),
        None => ResourceError::RequestFailed {
            label,
            status: response.code,
            body: response.raw_body.clone(),
        },
    }
}

fn decode_success(response: &HttpResponse, label: RequestLabel) -> Result<Decoded, ResourceError> {
    let value = response
        .json()
        .map_err(|e| malformed(label.clone(), e.to_string()))?;
    let is_get = response.request.method == HttpMethod::Get;

    Ok(match value {
        Some(value) if is_truthy(&value) => into_decoded(value),
        Some(value) if is_get && !value.is_null() => into_decoded(value),
        _ if is_get => Decoded::Empty,
        _ => Decoded::Confirmation(label.entity_id),
    })
}

fn into_decoded(value: Value) -> Decoded {
    match value {
        Value::Array(items) => Decoded::ItemList(items),
        other => Decoded::Item(other),
    }
}

/// Returns `false` for `null`, `false`, zero, and empty strings, arrays and objects.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n
            .as_f64()
            .map_or(true, |f| f.classify() != FpCategory::Zero),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Error bodies that are missing or not JSON carry no specific meaning.
fn error_body(response: &HttpResponse) -> Option<Value> {
    response.json().ok().flatten()
}

fn str_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}

fn forbidden(body: &Value) -> Option<Rejection> {
    if str_field(body, "code") == Some("OwnerFeatureNotIncluded") {
        let permission = str_field(body, "source").unwrap_or("unknown");
        return Some(Rejection::PermissionDenied(permission.to_string()));
    }

    let first_error = body
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())?;
    if str_field(first_error, "property") == Some("destination")
        && str_field(first_error, "code") == Some("InvalidFormat")
    {
        return Some(Rejection::InvalidInput(
            "invalid destination URL".to_string(),
        ));
    }

    None
}

fn not_found(body: &Value) -> Option<Rejection> {
    // Creating a link in a workspace without naming one of its domains
    if str_field(body, "code") == Some("NotFound") && str_field(body, "source") == Some("domain") {
        return Some(Rejection::InvalidInput(
            "Please ensure appropriate domain is specified.".to_string(),
        ));
    }
    None
}

fn workspace_forbidden(method: HttpMethod, body: &Value) -> Option<Rejection> {
    let code = str_field(body, "code")?;

    if method == HttpMethod::Delete {
        return (code == "CouldNotDeleteExtendedWorkspace").then(|| {
            Rejection::InvalidInput("extended workspaces cannot be deleted.".to_string())
        });
    }

    body.get("errors").map(|errors| {
        Rejection::InvalidInput(format!("error code: {code}. Errors: {errors}"))
    })
}

fn malformed(label: RequestLabel, reason: String) -> ResourceError {
    ResourceError::MalformedResponse { label, reason }
}
