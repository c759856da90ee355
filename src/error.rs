//! Error types for the Rebrandly API SDK.
//!
//! This module contains the error types used for configuration and
//! credential validation, and [`ClientError`] for client construction.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use rebrandly_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

use crate::clients::HttpError;

/// Errors that can occur during SDK configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Rebrandly API key.")]
    EmptyApiKey,

    /// Workspace id cannot be empty.
    #[error("Workspace id cannot be empty. Omit the workspace to use the account's default workspace.")]
    EmptyWorkspaceId,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.rebrandly.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}

/// Errors that can occur while constructing a
/// [`RebrandlyClient`](crate::RebrandlyClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configuration or a credential was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The underlying HTTP client could not be created.
    #[error(transparent)]
    Http(#[from] HttpError),
}
