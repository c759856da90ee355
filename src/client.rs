//! The Rebrandly API client.
//!
//! [`RebrandlyClient`] owns the HTTP transport and its session context (API
//! key and active workspace) and hands out the resource endpoint sets.
//!
//! Endpoint handles and cursors borrow the client. Changing the API key or
//! the workspace takes `&mut self`, so it can only happen once no handle or
//! cursor is alive, and every request made afterwards, through any endpoint,
//! carries the new values.

use crate::clients::HttpClient;
use crate::config::{ApiKey, RebrandlyConfig, WorkspaceId};
use crate::error::ClientError;
use crate::rest::resources::{Domains, Links, Scope, Workspaces};

/// Client for the Rebrandly API.
///
/// # Example
///
/// ```rust,ignore
/// use rebrandly_api::{RebrandlyClient, WorkspaceId};
/// use rebrandly_api::rest::resources::{NewLink, LinkCountParams};
///
/// let mut client = RebrandlyClient::with_api_key("your-api-key")?;
///
/// let link = client.links().create(&NewLink::new("https://rebrandly.com")).await?;
/// println!("created {:?}", link.id());
///
/// client.set_workspace(Some(WorkspaceId::new("team-workspace")?));
/// let total = client.links().count(&LinkCountParams::default()).await?;
/// println!("{total} links in the team workspace");
/// ```
#[derive(Debug)]
pub struct RebrandlyClient {
    http: HttpClient,
}

// Verify RebrandlyClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RebrandlyClient>();
};

impl RebrandlyClient {
    /// Creates a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying HTTP client cannot be
    /// created.
    pub fn new(config: &RebrandlyConfig) -> Result<Self, ClientError> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Creates a client for the default hosts with only an API key.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the key is empty.
    pub fn with_api_key(api_key: &str) -> Result<Self, ClientError> {
        let config = RebrandlyConfig::builder()
            .api_key(ApiKey::new(api_key)?)
            .build()?;
        Self::new(&config)
    }

    /// Returns the link endpoints.
    #[must_use]
    pub const fn links(&self) -> Links<'_> {
        Links::new(Scope::new(&self.http))
    }

    /// Returns the domain endpoints.
    #[must_use]
    pub const fn domains(&self) -> Domains<'_> {
        Domains::new(Scope::new(&self.http))
    }

    /// Returns the workspace endpoints.
    #[must_use]
    pub const fn workspaces(&self) -> Workspaces<'_> {
        Workspaces::new(Scope::new(&self.http))
    }

    /// Replaces the API key sent with every subsequent request.
    pub fn set_api_key(&mut self, api_key: ApiKey) {
        tracing::debug!("API key replaced");
        self.http.context_mut().set_api_key(api_key);
    }

    /// Sets the workspace every subsequent request is scoped to. `None`
    /// returns to the account's default workspace.
    pub fn set_workspace(&mut self, workspace: Option<WorkspaceId>) {
        match &workspace {
            Some(id) => tracing::debug!("Active workspace set to {}", id),
            None => tracing::debug!("Active workspace cleared"),
        }
        self.http.context_mut().set_workspace(workspace);
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http
    }
}
