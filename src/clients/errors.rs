//! HTTP-specific error types for the Rebrandly API SDK.
//!
//! These errors describe failures of the transport itself: a request that
//! failed validation before being sent, a URL that could not be built, or a
//! network error. Non-2xx responses are *not* transport errors; they are
//! returned as [`HttpResponse`](crate::clients::HttpResponse) values and
//! classified by the REST layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use rebrandly_api::clients::{HttpClient, HttpRequest, HttpMethod, HttpError};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Status {}", response.code),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::InvalidUrl { url, reason }) => println!("Bad URL {url}: {reason}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request fails validation.
///
/// # Example
///
/// ```rust
/// use rebrandly_api::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "post".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use post without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all transport-level failures.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The request URL could not be constructed.
    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// Why it failed.
        reason: String,
    },

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_error_missing_body() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "put".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use put without specifying data.");
    }

    #[test]
    fn test_http_error_wraps_invalid_request_transparently() {
        let error: HttpError = InvalidHttpRequestError::MissingBody {
            method: "post".to_string(),
        }
        .into();

        assert!(matches!(error, HttpError::InvalidRequest(_)));
        assert_eq!(error.to_string(), "Cannot use post without specifying data.");
    }

    #[test]
    fn test_invalid_url_message_names_url() {
        let error = HttpError::InvalidUrl {
            url: "http://[bad".to_string(),
            reason: "invalid IPv6 address".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("http://[bad"));
        assert!(message.contains("invalid IPv6 address"));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let invalid: &dyn std::error::Error = &InvalidHttpRequestError::MissingBody {
            method: "post".to_string(),
        };
        let _ = invalid;
    }
}
