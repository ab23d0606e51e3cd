//! Error types for the catalog data-access layer.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `Http` with the raw status
//! code and body for debugging.
//!
//! Validation failures carry their own type so calling code can suppress
//! generic error reporting for them — the UI has already surfaced them as
//! inline field messages. `RepositoryError` wraps everything in a
//! method-specific message, which is what reaches the user.

use thiserror::Error;

use crate::http::TransportError;

/// Errors produced by `CatalogClient` build/parse methods and the transport.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 — the requested resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A client-side validation failure, surfaced inline rather than as a
    /// blocking notification.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The transport could not complete the round-trip at all.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ApiError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

/// Client-side validation failures for create/update payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("{0} must be a positive number")]
    NonPositive(&'static str),

    #[error("missing image: {0}")]
    MissingImage(&'static str),
}

/// Errors surfaced by the repository layer.
///
/// Every repository method wraps lower-layer failures in its own variant so
/// the caller always sees a message naming the operation that failed. There
/// are no partial-success semantics — each operation is a single request
/// (update being a fetch followed by a put, which still fails atomically
/// from the caller's perspective).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("failed to list products")]
    ListFailed(#[source] ApiError),

    #[error("failed to fetch product {id}")]
    FetchFailed {
        id: String,
        #[source]
        source: ApiError,
    },

    #[error("failed to create product")]
    CreateFailed(#[source] ApiError),

    #[error("failed to update product {id}")]
    UpdateFailed {
        id: String,
        #[source]
        source: ApiError,
    },

    #[error("failed to delete product {id}")]
    DeleteFailed {
        id: String,
        #[source]
        source: ApiError,
    },

    #[error("login request failed")]
    LoginFailed(#[source] ApiError),

    #[error("failed to upload image")]
    UploadFailed(#[source] ApiError),
}

impl RepositoryError {
    /// Whether the underlying cause is a client-side validation failure.
    ///
    /// Callers use this to skip the blocking error notification: validation
    /// problems have already been shown next to the offending field.
    pub fn is_validation(&self) -> bool {
        self.api_source().is_some_and(ApiError::is_validation)
    }

    fn api_source(&self) -> Option<&ApiError> {
        match self {
            RepositoryError::ListFailed(source)
            | RepositoryError::CreateFailed(source)
            | RepositoryError::LoginFailed(source)
            | RepositoryError::UploadFailed(source) => Some(source),
            RepositoryError::FetchFailed { source, .. }
            | RepositoryError::UpdateFailed { source, .. }
            | RepositoryError::DeleteFailed { source, .. } => Some(source),
        }
    }
}
