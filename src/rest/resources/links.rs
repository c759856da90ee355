//! Link endpoints.
//!
//! Besides plain CRUD, a link owns several nested resources that are managed
//! through the same handle:
//!
//! - routing rules (`/links/{id}/rules`), opaque JSON condition/destination payloads
//! - deep links, also called native routes (`/links/{id}/apps/{app}`)
//! - Open Graph metadata (`/links/{id}/opengraph`)
//!
//! Bulk creation is served by the enterprise host and every link spec is
//! validated locally before the request is sent.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};

use crate::clients::{ApiHost, HttpMethod, HttpRequest};
use crate::config::WorkspaceId;
use crate::rest::classify::{classify, classify_count};
use crate::rest::validation::validate_bulk_links;
use crate::rest::{Decoded, PaginatedCursor, RequestLabel, ResourceError};

use super::{segment, to_body, to_query, OrderDir, Scope};

/// Sort field for [`Links::list`].
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LinkOrderBy {
    /// Creation time.
    CreatedAt,
    /// Last update time.
    UpdatedAt,
    /// Link title.
    Title,
    /// Slashtag.
    Slashtag,
}

/// Parameters for listing links.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LinkListParams {
    /// Sort field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<LinkOrderBy>,

    /// Sort direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_dir: Option<OrderDir>,

    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Return only favourite (or only non-favourite) links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favourite: Option<bool>,

    /// Filter by domain id.
    #[serde(rename = "domain.id", skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,

    /// Filter by domain name, e.g. `rebrand.ly`.
    #[serde(rename = "domain.fullName", skip_serializing_if = "Option::is_none")]
    pub domain_full_name: Option<String>,

    /// Filter by creator id.
    #[serde(rename = "creator.id", skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,

    /// Filter by slashtag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slashtag: Option<String>,

    /// Links created on or after this day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,

    /// Links created on or before this day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
}

/// Parameters for counting links.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct LinkCountParams {
    /// Count only favourite (or only non-favourite) links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favourite: Option<bool>,

    /// Count links of this domain id.
    #[serde(rename = "domain.id", skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,

    /// Count links of this domain name.
    #[serde(rename = "domain.fullName", skip_serializing_if = "Option::is_none")]
    pub domain_full_name: Option<String>,
}

/// A reference to the branded domain of a link.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DomainRef {
    /// Domain id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Domain name, e.g. `rebrand.ly`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// A link to create.
///
/// Only `destination` is required; the account default domain and a random
/// slashtag are used otherwise.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct NewLink {
    /// The URL the short link redirects to.
    pub destination: String,

    /// The short-path segment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slashtag: Option<String>,

    /// Link title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Branded domain to create the link on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<DomainRef>,

    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewLink {
    /// Creates a link spec with only a destination.
    #[must_use]
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            ..Default::default()
        }
    }
}

/// Changes to an existing link.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct LinkUpdate {
    /// The new destination URL.
    pub destination: String,

    /// The new title.
    pub title: String,

    /// The new description; left unchanged when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Favourite flag, applied through [`Links::favourite`] before the update.
    #[serde(skip)]
    pub favourite: Option<bool>,
}

/// Open Graph metadata of a link.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct OpenGraph {
    /// Preview title.
    pub title: String,

    /// Preview description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Preview image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Object type, e.g. `website`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    /// Locale, e.g. `en_US`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Operations on links.
#[derive(Clone, Copy, Debug)]
pub struct Links<'a> {
    scope: Scope<'a>,
}

impl<'a> Links<'a> {
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

    /// Retrieves a link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails; a missing link is
    /// [`ResourceError::RequestFailed`] with status 404.
    pub async fn get(&self, link_id: &str) -> Result<Decoded, ResourceError> {
        let path = format!("links/{}", segment(link_id));
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Get, path))
            .await?;
        classify(&response, RequestLabel::new("Get", "link", link_id))
    }

    /// Lists links, returning a cursor over the first page.
    ///
    /// Returns `Ok(None)` if the service answers with something other than a
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn list(
        &self,
        params: &LinkListParams,
    ) -> Result<Option<PaginatedCursor<'a>>, ResourceError> {
        let label = RequestLabel::new("List", "links", "all_links");
        let query = to_query(params, &label)?;
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Get, "links").query(query))
            .await?;
        let decoded = classify(&response, label)?;
        Ok(self.scope.cursor(&response, decoded))
    }

    /// Creates a link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidInput`] for an invalid destination or,
    /// when creating inside a workspace, a missing domain.
    pub async fn create(&self, link: &NewLink) -> Result<Decoded, ResourceError> {
        let label = RequestLabel::new("Create", "link", "");
        let body = to_body(link, &label)?;
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Post, "links").body(body))
            .await?;
        classify(&response, label)
    }

    /// Updates a link's destination, title and description.
    ///
    /// When `update.favourite` is set the favourite flag is changed first, and
    /// a failure there aborts the update.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidInput`] for an invalid destination.
    pub async fn update(&self, link_id: &str, update: &LinkUpdate) -> Result<Decoded, ResourceError> {
        if let Some(favourite) = update.favourite {
            self.favourite(link_id, favourite).await?;
        }

        let label = RequestLabel::new("Update", "link", link_id);
        let body = to_body(update, &label)?;
        let path = format!("links/{}", segment(link_id));
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Post, path).body(body))
            .await?;
        classify(&response, label)
    }

    /// Marks or unmarks a link as favourite.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn favourite(&self, link_id: &str, favourite: bool) -> Result<Decoded, ResourceError> {
        let path = format!("links/{}/favourite", segment(link_id));
        let response = self
            .scope
            .send(
                HttpRequest::builder(HttpMethod::Post, path)
                    .body(json!({ "favourite": favourite })),
            )
            .await?;
        classify(&response, RequestLabel::new("Favourite", "link", link_id))
    }

    /// Counts links.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Unauthorized`] if the API key is rejected.
    pub async fn count(&self, params: &LinkCountParams) -> Result<u64, ResourceError> {
        let label = RequestLabel::new("Count", "links", "");
        let query = to_query(params, &label)?;
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Get, "links/count").query(query))
            .await?;
        classify_count(&response, label)
    }

    /// Deletes a link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RequestFailed`] with status 404 if the link
    /// does not exist (including when it was already deleted).
    pub async fn delete(&self, link_id: &str) -> Result<Decoded, ResourceError> {
        let path = format!("links/{}", segment(link_id));
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Delete, path))
            .await?;
        classify(&response, RequestLabel::new("Delete", "link", link_id))
    }

    /// Creates many links at once through the enterprise host.
    ///
    /// Every spec needs a non-empty `destination` and exactly one domain
    /// reference (`domainId`, or `domain` with an `id`). Specs are checked
    /// before anything is sent; on success the created links are returned in
    /// the same order.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidInput`] without sending a request if
    /// any spec is invalid.
    pub async fn bulk_create(&self, links: &[Value]) -> Result<Decoded, ResourceError> {
        let label = RequestLabel::new("Bulk create", "links", "");

        if let Err((index, error)) = validate_bulk_links(links) {
            tracing::warn!("Rejected bulk create: link {} is invalid: {}", index, error);
            return Err(ResourceError::InvalidInput {
                label,
                reason: format!("link {index}: {error}"),
            });
        }

        let response = self
            .scope
            .send(
                HttpRequest::builder(HttpMethod::Put, "links")
                    .host(ApiHost::Enterprise)
                    .body(Value::Array(links.to_vec())),
            )
            .await?;
        classify(&response, label)
    }

    /// Deletes many links at once, returning how many were deleted.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Unauthorized`] if the API key is rejected.
    pub async fn bulk_delete(&self, link_ids: &[&str]) -> Result<u64, ResourceError> {
        let workspace = self
            .scope
            .effective_workspace()
            .map(ToString::to_string)
            .unwrap_or_default();
        let response = self
            .scope
            .send(
                HttpRequest::builder(HttpMethod::Delete, "links")
                    .body(json!({ "links": link_ids })),
            )
            .await?;
        classify_count(&response, RequestLabel::new("Bulk delete", "workspace", workspace))
    }

    /// Adds a routing rule to a link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PermissionDenied`] if the account has no
    /// routing feature.
    pub async fn create_route(&self, link_id: &str, route: &Value) -> Result<Decoded, ResourceError> {
        let path = format!("links/{}/rules", segment(link_id));
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Post, path).body(route.clone()))
            .await?;
        classify(&response, RequestLabel::new("Create route", "link", link_id))
    }

    /// Replaces a routing rule of a link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn update_route(
        &self,
        link_id: &str,
        route_id: &str,
        route: &Value,
    ) -> Result<Decoded, ResourceError> {
        let path = format!("links/{}/rules/{}", segment(link_id), segment(route_id));
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Post, path).body(route.clone()))
            .await?;
        classify(&response, RequestLabel::new("Update route", "link", link_id))
    }

    /// Lists the routing rules of a link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn list_routes(&self, link_id: &str) -> Result<Decoded, ResourceError> {
        let path = format!("links/{}/rules", segment(link_id));
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Get, path))
            .await?;
        classify(&response, RequestLabel::new("Get routes", "link", link_id))
    }

    /// Deletes a routing rule of a link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn delete_route(&self, link_id: &str, route_id: &str) -> Result<Decoded, ResourceError> {
        let path = format!("links/{}/rules/{}", segment(link_id), segment(route_id));
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Delete, path))
            .await?;
        classify(&response, RequestLabel::new("Delete route", "link", link_id))
    }

    /// Lists the apps configured on the account, needed to set up deep links.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn get_apps(&self) -> Result<Decoded, ResourceError> {
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Get, "apps"))
            .await?;
        classify(&response, RequestLabel::new("Get", "apps", "any"))
    }

    /// Lists the deep links of a link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn list_deep_links(&self, link_id: &str) -> Result<Decoded, ResourceError> {
        let path = format!("links/{}/apps", segment(link_id));
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Get, path))
            .await?;
        classify(&response, RequestLabel::new("List deep links", "link", link_id))
    }

    /// Creates a deep link opening `path` in the app `app_id`.
    ///
    /// Deep links cannot be updated; delete and re-create instead.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn create_deep_link(
        &self,
        link_id: &str,
        app_id: &str,
        path: &str,
    ) -> Result<Decoded, ResourceError> {
        let url_path = format!("links/{}/apps/{}", segment(link_id), segment(app_id));
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Post, url_path).body(json!({ "path": path })))
            .await?;
        classify(&response, RequestLabel::new("Create deep link", "link", link_id))
    }

    /// Deletes the deep link of a link for one app.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn delete_deep_link(&self, link_id: &str, app_id: &str) -> Result<Decoded, ResourceError> {
        let path = format!("links/{}/apps/{}", segment(link_id), segment(app_id));
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Delete, path))
            .await?;
        classify(&response, RequestLabel::new("Delete deep link", "link", link_id))
    }

    /// Deletes every deep link of a link, returning how many were removed.
    ///
    /// Deep links are listed first and then deleted one at a time; the first
    /// failure aborts the remaining deletions.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MalformedResponse`] if a listed deep link has
    /// no id, or any error of the list or delete calls.
    pub async fn delete_deep_links(&self, link_id: &str) -> Result<usize, ResourceError> {
        let Some(apps) = self.list_deep_links(link_id).await?.into_list() else {
            return Ok(0);
        };

        for app in &apps {
            let app_id = app.get("id").and_then(Value::as_str).ok_or_else(|| {
                ResourceError::MalformedResponse {
                    label: RequestLabel::new("Delete deep links", "link", link_id),
                    reason: format!("deep link without id: {app}"),
                }
            })?;
            self.delete_deep_link(link_id, app_id).await?;
        }

        Ok(apps.len())
    }

    /// Retrieves the Open Graph metadata of a link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn get_opengraph(&self, link_id: &str) -> Result<Decoded, ResourceError> {
        let path = format!("links/{}/opengraph", segment(link_id));
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Get, path))
            .await?;
        classify(&response, RequestLabel::new("Get opengraph", "link", link_id))
    }

    /// Sets the Open Graph metadata of a link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn set_opengraph(
        &self,
        link_id: &str,
        opengraph: &OpenGraph,
    ) -> Result<Decoded, ResourceError> {
        let label = RequestLabel::new("Update opengraph", "link", link_id);
        let body = to_body(opengraph, &label)?;
        let path = format!("links/{}/opengraph", segment(link_id));
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Post, path).body(body))
            .await?;
        classify(&response, label)
    }

    /// Removes the Open Graph metadata of a link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn delete_opengraph(&self, link_id: &str) -> Result<Decoded, ResourceError> {
        let path = format!("links/{}/opengraph", segment(link_id));
        let response = self
            .scope
            .send(HttpRequest::builder(HttpMethod::Delete, path))
            .await?;
        classify(&response, RequestLabel::new("Delete opengraph", "link", link_id))
    }
}

// Verify Links is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Links<'static>>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpClient;
    use crate::config::{ApiKey, HostUrl, RebrandlyConfig};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_client(host: &str) -> HttpClient {
        let config = RebrandlyConfig::builder()
            .api_key(ApiKey::new("test-key").unwrap())
            .api_host(HostUrl::new(host).unwrap())
            .enterprise_host(HostUrl::new(host).unwrap())
            .build()
            .unwrap();
        HttpClient::new(&config).unwrap()
    }

    #[test]
    fn test_new_link_serializes_only_set_fields() {
        let link = NewLink {
            slashtag: Some("promo".to_string()),
            domain: Some(DomainRef {
                full_name: Some("rebrand.ly".to_string()),
                ..Default::default()
            }),
            ..NewLink::new("https://rebrandly.com")
        };

        assert_eq!(
            json!(link),
            json!({
                "destination": "https://rebrandly.com",
                "slashtag": "promo",
                "domain": {"fullName": "rebrand.ly"}
            })
        );
    }

    #[test]
    fn test_link_update_omits_favourite_from_body() {
        let update = LinkUpdate {
            destination: "https://rb.gy".to_string(),
            title: "t".to_string(),
            description: None,
            favourite: Some(true),
        };
        assert_eq!(json!(update), json!({"destination": "https://rb.gy", "title": "t"}));
    }

    #[test]
    fn test_opengraph_type_field_name() {
        let opengraph = OpenGraph {
            title: "Title".to_string(),
            object_type: Some("website".to_string()),
            ..Default::default()
        };
        assert_eq!(json!(opengraph), json!({"title": "Title", "type": "website"}));
    }

    #[tokio::test]
    async fn test_update_sets_favourite_before_update() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/links/l1/favourite"))
            .and(body_json(json!({"favourite": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "l1"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/links/l1"))
            .and(body_json(json!({"destination": "https://rb.gy", "title": "New"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": "l1", "title": "New", "favourite": true})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = create_client(&server.uri());
        let links = Links::new(Scope::new(&client));
        let update = LinkUpdate {
            destination: "https://rb.gy".to_string(),
            title: "New".to_string(),
            description: None,
            favourite: Some(true),
        };

        let updated = links.update("l1", &update).await.unwrap();
        assert_eq!(updated.as_item().unwrap()["favourite"], true);
    }

    #[tokio::test]
    async fn test_bulk_create_rejects_locally_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let client = create_client(&server.uri());
        let links = Links::new(Scope::new(&client));

        let specs = [
            json!({"destination": "https://a.com", "domainId": "d1"}),
            json!({"destination": "https://b.com", "domainId": "d1", "domain": {"id": "d1"}}),
        ];
        let error = links.bulk_create(&specs).await.unwrap_err();

        assert!(error.is_invalid_input());
        assert!(error.to_string().contains("link 1"));
        assert!(error.to_string().contains("Specify the domain only once per link."));
    }

    #[tokio::test]
    async fn test_workspace_override_is_sent_as_query_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/links/l1"))
            .and(query_param("workspace", "ws-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "l1"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_client(&server.uri());
        let workspace = WorkspaceId::new("ws-2").unwrap();
        let links = Links::new(Scope::new(&client)).in_workspace(&workspace);

        assert_eq!(links.get("l1").await.unwrap().id(), Some("l1"));
    }

    #[tokio::test]
    async fn test_bulk_delete_labels_failures_with_workspace() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/links"))
            .and(body_json(json!({"links": ["a", "b"]})))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = create_client(&server.uri());
        let workspace = WorkspaceId::new("ws-3").unwrap();
        let links = Links::new(Scope::new(&client)).in_workspace(&workspace);

        let error = links.bulk_delete(&["a", "b"]).await.unwrap_err();
        let label = error.label().unwrap();
        assert_eq!(label.operation, "Bulk delete");
        assert_eq!(label.entity_type, "workspace");
        assert_eq!(label.entity_id, "ws-3");
    }
}
