//! Configuration types for the Rebrandly API SDK.
//!
//! This module provides the configuration used to construct a
//! [`RebrandlyClient`](crate::RebrandlyClient).
//!
//! # Overview
//!
//! - [`RebrandlyConfig`]: The main configuration struct holding all SDK settings
//! - [`RebrandlyConfigBuilder`]: A builder for constructing [`RebrandlyConfig`] instances
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`WorkspaceId`]: A validated workspace id
//! - [`HostUrl`]: A validated API host URL
//!
//! # Example
//!
//! ```rust
//! use rebrandly_api::{RebrandlyConfig, ApiKey, WorkspaceId};
//!
//! let config = RebrandlyConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .workspace(WorkspaceId::new("my-workspace").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_host().as_ref(), "https://api.rebrandly.com");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, HostUrl, WorkspaceId};

use crate::error::ConfigError;

/// Host serving the standard API.
pub const DEFAULT_API_HOST: &str = "https://api.rebrandly.com";

/// Host serving enterprise-only endpoints such as bulk link creation.
pub const DEFAULT_ENTERPRISE_HOST: &str = "https://enterprise-api.rebrandly.com";

/// Path prefix shared by every API endpoint.
pub const API_BASE_PATH: &str = "/v1";

/// Configuration for the Rebrandly API SDK.
///
/// # Thread Safety
///
/// `RebrandlyConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Example
///
/// ```rust
/// use rebrandly_api::{RebrandlyConfig, ApiKey, HostUrl};
///
/// let config = RebrandlyConfig::builder()
///     .api_key(ApiKey::new("key").unwrap())
///     .api_host(HostUrl::new("http://localhost:8080").unwrap())
///     .user_agent_prefix("MyApp/1.0")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
/// ```
#[derive(Clone, Debug)]
pub struct RebrandlyConfig {
    api_key: ApiKey,
    workspace: Option<WorkspaceId>,
    api_host: HostUrl,
    enterprise_host: HostUrl,
    user_agent_prefix: Option<String>,
}

impl RebrandlyConfig {
    /// Creates a new builder for constructing a `RebrandlyConfig`.
    #[must_use]
    pub fn builder() -> RebrandlyConfigBuilder {
        RebrandlyConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the workspace all calls are scoped to, if configured.
    #[must_use]
    pub const fn workspace(&self) -> Option<&WorkspaceId> {
        self.workspace.as_ref()
    }

    /// Returns the host of the standard API.
    #[must_use]
    pub const fn api_host(&self) -> &HostUrl {
        &self.api_host
    }

    /// Returns the host of the enterprise API.
    #[must_use]
    pub const fn enterprise_host(&self) -> &HostUrl {
        &self.enterprise_host
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify RebrandlyConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RebrandlyConfig>();
};

/// Builder for constructing [`RebrandlyConfig`] instances.
///
/// `api_key` is required. All other fields have defaults.
///
/// # Defaults
///
/// - `workspace`: `None` (the account's default workspace)
/// - `api_host`: [`DEFAULT_API_HOST`]
/// - `enterprise_host`: [`DEFAULT_ENTERPRISE_HOST`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct RebrandlyConfigBuilder {
    api_key: Option<ApiKey>,
    workspace: Option<WorkspaceId>,
    api_host: Option<HostUrl>,
    enterprise_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
}

impl RebrandlyConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Scopes every call to the given workspace.
    #[must_use]
    pub fn workspace(mut self, workspace: WorkspaceId) -> Self {
        self.workspace = Some(workspace);
        self
    }

    /// Overrides the standard API host.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Overrides the enterprise API host.
    #[must_use]
    pub fn enterprise_host(mut self, host: HostUrl) -> Self {
        self.enterprise_host = Some(host);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`RebrandlyConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` is not set.
    pub fn build(self) -> Result<RebrandlyConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        let api_host = match self.api_host {
            Some(host) => host,
            None => HostUrl::new(DEFAULT_API_HOST)?,
        };
        let enterprise_host = match self.enterprise_host {
            Some(host) => host,
            None => HostUrl::new(DEFAULT_ENTERPRISE_HOST)?,
        };

        Ok(RebrandlyConfig {
            api_key,
            workspace: self.workspace,
            api_host,
            enterprise_host,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_api_key() {
        let result = RebrandlyConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_key" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = RebrandlyConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.api_host().as_ref(), DEFAULT_API_HOST);
        assert_eq!(config.enterprise_host().as_ref(), DEFAULT_ENTERPRISE_HOST);
        assert!(config.workspace().is_none());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = RebrandlyConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .workspace(WorkspaceId::new("ws-1").unwrap())
            .api_host(HostUrl::new("http://localhost:3000").unwrap())
            .enterprise_host(HostUrl::new("http://localhost:3001").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        assert_eq!(config.workspace().map(AsRef::as_ref), Some("ws-1"));
        assert_eq!(config.api_host().as_ref(), "http://localhost:3000");
        assert_eq!(config.enterprise_host().as_ref(), "http://localhost:3001");
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }

    #[test]
    fn test_config_is_clone_and_debug_masks_key() {
        let config = RebrandlyConfig::builder()
            .api_key(ApiKey::new("secret-key").unwrap())
            .build()
            .unwrap();

        let cloned = config.clone();
        assert_eq!(cloned.api_key(), config.api_key());

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("RebrandlyConfig"));
        assert!(!debug_str.contains("secret-key"));
    }
}
