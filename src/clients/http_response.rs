//! HTTP response types for the Rebrandly API SDK.
//!
//! An [`HttpResponse`] is a completed exchange: status code, headers, the raw
//! body text and a description of the request that produced it. The request
//! metadata is what the pagination cursor uses to re-issue a list call.

use std::collections::HashMap;

use reqwest::Url;

use crate::clients::HttpMethod;

/// The request that produced an [`HttpResponse`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestInfo {
    /// The method the request was sent with.
    pub method: HttpMethod,
    /// The full URL, including the query string.
    pub url: Url,
    /// The URL path, without the query string.
    pub path: String,
}

impl RequestInfo {
    /// Describes a request sent to `url` with `method`.
    #[must_use]
    pub fn new(method: HttpMethod, url: Url) -> Self {
        let path = url.path().to_string();
        Self { method, url, path }
    }
}

/// An HTTP response from the Rebrandly API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lower-cased name (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The body exactly as received.
    pub raw_body: String,
    /// The request this response answers.
    pub request: RequestInfo,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        raw_body: String,
        request: RequestInfo,
    ) -> Self {
        Self {
            code,
            headers,
            raw_body,
            request,
        }
    }

    /// Decodes the body as JSON.
    ///
    /// Returns `Ok(None)` when the body is empty (no content), which is
    /// distinct from a body holding JSON `null` or an empty collection.
    ///
    /// # Errors
    ///
    /// Returns the decoder error if the body is non-empty and not valid JSON.
    pub fn json(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        if self.raw_body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&self.raw_body).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(code: u16, body: &str) -> HttpResponse {
        let url = Url::parse("https://api.rebrandly.com/v1/links?limit=2").unwrap();
        HttpResponse::new(
            code,
            HashMap::new(),
            body.to_string(),
            RequestInfo::new(HttpMethod::Get, url),
        )
    }

    #[test]
    fn test_request_info_splits_path_from_query() {
        let info = response(200, "").request;
        assert_eq!(info.path, "/v1/links");
        assert_eq!(info.url.query(), Some("limit=2"));
        assert_eq!(info.method, HttpMethod::Get);
    }

    #[test]
    fn test_json_distinguishes_no_content_from_empty_collection() {
        assert_eq!(response(200, "").json().unwrap(), None);
        assert_eq!(response(200, "  \n").json().unwrap(), None);
        assert_eq!(response(200, "[]").json().unwrap(), Some(json!([])));
        assert_eq!(response(200, "null").json().unwrap(), Some(json!(null)));
    }

    #[test]
    fn test_json_reports_invalid_body() {
        assert!(response(200, "<html>").json().is_err());
    }
}
