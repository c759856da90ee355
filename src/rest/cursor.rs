//! Page-by-page traversal of list endpoints.
//!
//! The Rebrandly API exposes no page token or total count on its list
//! endpoints. The next page is requested by re-sending the original request
//! with `last=<id of the final item seen>` appended to its query string, and
//! an empty page marks the end of the result set.
//!
//! [`PaginatedCursor`] holds one page at a time. Iterating a cursor yields the
//! items of the current page only; [`PaginatedCursor::next_page`] replaces
//! them with the following page.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut cursor = client.links().list(&LinkListParams::default()).await?;
//!
//! while !cursor.is_exhausted() {
//!     for link in &cursor {
//!         println!("{}", link["shortUrl"]);
//!     }
//!     cursor.next_page().await?;
//! }
//! println!("{} links in {} pages", cursor.total_count(), cursor.pages_fetched());
//! ```

use reqwest::Url;
use serde_json::Value;

use crate::clients::{HttpClient, HttpMethod, RequestInfo};
use crate::rest::{RequestLabel, ResourceError};

/// The only collection that honours the `last=` convention.
const PAGINATED_COLLECTION: &str = "links";

/// A stateful cursor over a list endpoint.
///
/// Only cursors built from a GET on the links collection ever fetch further
/// pages; for every other list the first page is all there is and
/// [`next_page`](Self::next_page) does nothing.
///
/// The cursor borrows the [`HttpClient`] it was created from, so the session
/// context cannot change while a traversal is in progress.
#[derive(Debug)]
pub struct PaginatedCursor<'a> {
    client: &'a HttpClient,
    request_url: Url,
    http_method: HttpMethod,
    path: String,
    paginates: bool,
    items: Vec<Value>,
    total_count: usize,
    pages_fetched: usize,
    last_item_id: Option<String>,
    exhausted: bool,
}

impl<'a> PaginatedCursor<'a> {
    /// Creates a cursor from the first page of a list response.
    #[must_use]
    pub fn new(client: &'a HttpClient, items: Vec<Value>, request: &RequestInfo) -> Self {
        let path = request.path.to_lowercase();
        let links_path = format!("{}/{PAGINATED_COLLECTION}", client.base_path()).to_lowercase();
        let paginates = request.method == HttpMethod::Get && path == links_path;

        Self {
            client,
            request_url: request.url.clone(),
            http_method: request.method,
            path,
            paginates,
            total_count: items.len(),
            pages_fetched: 1,
            last_item_id: last_id_of(&items),
            exhausted: items.is_empty(),
            items,
        }
    }

    /// Returns the items of the current page.
    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Returns the number of items on the current page.
    #[must_use]
    pub fn current_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of items seen across all fetched pages.
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns the number of non-empty pages fetched, counting the first page.
    #[must_use]
    pub const fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Returns the id of the final item on the most recent non-empty page.
    #[must_use]
    pub fn last_item_id(&self) -> Option<&str> {
        self.last_item_id.as_deref()
    }

    /// Returns the URL of the original list request.
    #[must_use]
    pub const fn request_url(&self) -> &Url {
        &self.request_url
    }

    /// Returns the method of the original list request.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        self.http_method
    }

    /// Returns the lowercased path of the original list request.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns `true` if this cursor follows the `last=` protocol.
    #[must_use]
    pub const fn paginates(&self) -> bool {
        self.paginates
    }

    /// Returns `true` once an empty page has been reached.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Returns an iterator over the items of the current page.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Advances to the next page.
    ///
    /// Does nothing if the cursor does not paginate or is exhausted. When the
    /// next page is empty the cursor becomes exhausted: the current page is
    /// cleared while [`total_count`](Self::total_count) and
    /// [`pages_fetched`](Self::pages_fetched) keep their values.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RequestFailed`] if the page request does not
    /// answer 200, [`ResourceError::MalformedResponse`] if its body is not a
    /// JSON array, and [`ResourceError::Http`] on transport failure. The
    /// cursor is left unchanged in every error case.
    pub async fn next_page(&mut self) -> Result<(), ResourceError> {
        if !self.paginates || self.exhausted {
            return Ok(());
        }

        let Some(last_id) = self.last_item_id.clone() else {
            tracing::warn!(
                "Cannot continue pagination of {}: last item has no id",
                self.request_url
            );
            self.exhaust();
            return Ok(());
        };

        let mut url = self.request_url.clone();
        url.query_pairs_mut().append_pair("last", &last_id);

        let response = self.client.get_url(url).await?;
        let label = RequestLabel::new("Next page", PAGINATED_COLLECTION, last_id);

        if response.code != 200 {
            return Err(ResourceError::RequestFailed {
                label,
                status: response.code,
                body: response.raw_body,
            });
        }

        let items = match response.json() {
            Ok(Some(Value::Array(items))) => items,
            Ok(Some(Value::Null) | None) => Vec::new(),
            Ok(Some(other)) => {
                return Err(ResourceError::MalformedResponse {
                    label,
                    reason: format!("expected a list of items, got {other}"),
                })
            }
            Err(e) => {
                return Err(ResourceError::MalformedResponse {
                    label,
                    reason: e.to_string(),
                })
            }
        };

        if items.is_empty() {
            tracing::debug!(
                "Pagination of {} exhausted after {} pages ({} items)",
                self.request_url,
                self.pages_fetched,
                self.total_count
            );
            self.exhaust();
            return Ok(());
        }

        self.total_count += items.len();
        self.pages_fetched += 1;
        self.last_item_id = last_id_of(&items);
        self.items = items;

        tracing::debug!(
            "Fetched page {} of {} ({} items so far)",
            self.pages_fetched,
            self.request_url,
            self.total_count
        );

        Ok(())
    }

    fn exhaust(&mut self) {
        self.items.clear();
        self.exhausted = true;
    }
}

impl<'c, 'a> IntoIterator for &'c PaginatedCursor<'a> {
    type Item = &'c Value;
    type IntoIter = std::slice::Iter<'c, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn last_id_of(items: &[Value]) -> Option<String> {
    items
        .last()
        .and_then(|item| item.get("id"))
        .and_then(Value::as_str)
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{ApiHost, HttpRequest};
    use crate::config::{ApiKey, HostUrl, RebrandlyConfig};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_client(host: &str) -> HttpClient {
        let config = RebrandlyConfig::builder()
            .api_key(ApiKey::new("test-key").unwrap())
            .api_host(HostUrl::new(host).unwrap())
            .build()
            .unwrap();
        HttpClient::new(&config).unwrap()
    }

    fn links(ids: &[&str]) -> Value {
        Value::Array(ids.iter().map(|id| json!({"id": id})).collect())
    }

    fn request_info(client: &HttpClient, method: HttpMethod, path: &str) -> RequestInfo {
        let url = client.endpoint_url(ApiHost::Standard, path).unwrap();
        RequestInfo::new(method, url)
    }

    async fn mount_links_pages(server: &MockServer) {
        // five links, two per page; the first page mock is mounted last so
        // requests carrying `last` match their own page first
        Mock::given(method("GET"))
            .and(path("/v1/links"))
            .and(query_param("limit", "2"))
            .and(query_param("last", "l2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(links(&["l3", "l4"])))
            .expect(1)
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/links"))
            .and(query_param("limit", "2"))
            .and(query_param("last", "l4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(links(&["l5"])))
            .expect(1)
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/links"))
            .and(query_param("limit", "2"))
            .and(query_param("last", "l5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/links"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(links(&["l1", "l2"])))
            .mount(server)
            .await;
    }

    async fn first_page<'a>(client: &'a HttpClient) -> PaginatedCursor<'a> {
        let request = HttpRequest::builder(HttpMethod::Get, "links")
            .query_param("limit", "2")
            .build()
            .unwrap();
        let response = client.request(request).await.unwrap();
        let items = match response.json().unwrap() {
            Some(Value::Array(items)) => items,
            other => panic!("Expected a list, got {other:?}"),
        };
        PaginatedCursor::new(client, items, &response.request)
    }

    #[tokio::test]
    async fn test_walks_all_pages_until_exhausted() {
        let server = MockServer::start().await;
        mount_links_pages(&server).await;
        let client = create_client(&server.uri());

        let mut cursor = first_page(&client).await;
        assert!(cursor.paginates());

        let mut current = vec![cursor.current_count()];
        let mut totals = vec![cursor.total_count()];
        let mut seen: Vec<String> = cursor
            .iter()
            .map(|item| item["id"].as_str().unwrap().to_string())
            .collect();

        for _ in 0..4 {
            cursor.next_page().await.unwrap();
            current.push(cursor.current_count());
            totals.push(cursor.total_count());
            for item in &cursor {
                seen.push(item["id"].as_str().unwrap().to_string());
            }
        }

        assert_eq!(current, vec![2, 2, 1, 0, 0]);
        assert_eq!(totals, vec![2, 4, 5, 5, 5]);
        assert_eq!(seen, vec!["l1", "l2", "l3", "l4", "l5"]);
        assert_eq!(cursor.pages_fetched(), 3);
        assert_eq!(cursor.last_item_id(), Some("l5"));
        assert!(cursor.is_exhausted());
        assert!(cursor.items().is_empty());
    }

    #[tokio::test]
    async fn test_preserves_original_query_when_appending_last() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/links"))
            .and(query_param("orderBy", "createdAt"))
            .and(query_param("limit", "1"))
            .and(query_param("last", "a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        let client = create_client(&server.uri());

        let mut url = client.endpoint_url(ApiHost::Standard, "links").unwrap();
        url.query_pairs_mut()
            .append_pair("orderBy", "createdAt")
            .append_pair("limit", "1");
        let info = RequestInfo::new(HttpMethod::Get, url);

        let mut cursor = PaginatedCursor::new(&client, vec![json!({"id": "a"})], &info);
        cursor.next_page().await.unwrap();

        assert!(cursor.is_exhausted());
        assert_eq!(cursor.total_count(), 1);
        assert_eq!(cursor.pages_fetched(), 1);
    }

    #[tokio::test]
    async fn test_non_links_path_never_paginates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(links(&["x"])))
            .expect(0)
            .mount(&server)
            .await;
        let client = create_client(&server.uri());

        let info = request_info(&client, HttpMethod::Get, "domains");
        let items = links(&["d1", "d2"]).as_array().unwrap().clone();
        let mut cursor = PaginatedCursor::new(&client, items, &info);
        cursor.next_page().await.unwrap();

        assert!(!cursor.paginates());
        assert_eq!(cursor.current_count(), 2);
        assert_eq!(cursor.total_count(), 2);
        assert_eq!(cursor.pages_fetched(), 1);
        assert_eq!(cursor.path(), "/v1/domains");
    }

    #[tokio::test]
    async fn test_non_get_never_paginates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(links(&["x"])))
            .expect(0)
            .mount(&server)
            .await;
        let client = create_client(&server.uri());

        let info = request_info(&client, HttpMethod::Put, "links");
        let mut cursor = PaginatedCursor::new(&client, vec![json!({"id": "a"})], &info);
        cursor.next_page().await.unwrap();

        assert!(!cursor.paginates());
        assert_eq!(cursor.http_method(), HttpMethod::Put);
        assert_eq!(cursor.current_count(), 1);
    }

    #[test]
    fn test_links_path_gate_is_case_insensitive() {
        let client = create_client("https://api.rebrandly.com");
        let url = Url::parse("https://api.rebrandly.com/V1/Links").unwrap();
        let info = RequestInfo::new(HttpMethod::Get, url);

        let cursor = PaginatedCursor::new(&client, Vec::new(), &info);
        assert!(cursor.paginates());
        assert_eq!(cursor.path(), "/v1/links");
    }

    #[tokio::test]
    async fn test_empty_first_page_is_exhausted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;
        let client = create_client(&server.uri());

        let info = request_info(&client, HttpMethod::Get, "links");
        let mut cursor = PaginatedCursor::new(&client, Vec::new(), &info);
        cursor.next_page().await.unwrap();

        assert!(cursor.is_exhausted());
        assert_eq!(cursor.total_count(), 0);
        assert_eq!(cursor.pages_fetched(), 1);
    }

    #[tokio::test]
    async fn test_missing_last_id_stops_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;
        let client = create_client(&server.uri());

        let info = request_info(&client, HttpMethod::Get, "links");
        let mut cursor = PaginatedCursor::new(&client, vec![json!({"title": "no id"})], &info);
        cursor.next_page().await.unwrap();

        assert!(cursor.is_exhausted());
        assert_eq!(cursor.total_count(), 1);
    }

    #[tokio::test]
    async fn test_non_200_page_is_request_failed_and_keeps_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/links"))
            .and(query_param("last", "a"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        let client = create_client(&server.uri());

        let info = request_info(&client, HttpMethod::Get, "links");
        let mut cursor = PaginatedCursor::new(&client, vec![json!({"id": "a"})], &info);

        match cursor.next_page().await {
            Err(ResourceError::RequestFailed {
                status,
                body,
                label,
            }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
                assert_eq!(label.operation, "Next page");
                assert_eq!(label.entity_id, "a");
            }
            other => panic!("Expected RequestFailed, got {other:?}"),
        }

        assert!(!cursor.is_exhausted());
        assert_eq!(cursor.current_count(), 1);
        assert_eq!(cursor.last_item_id(), Some("a"));
    }
}
