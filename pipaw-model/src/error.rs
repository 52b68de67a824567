//! Error types for the entity model.

use pipaw_client::ClientError;
use pipaw_types::Pk;
use std::fmt;
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Why an entity could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("primary key not found")]
    MissingPk,

    #[error("primary key is not a valid integer: {0}")]
    InvalidPk(String),

    #[error("given primary key {given} doesn't match initial data ({embedded})")]
    PkMismatch { given: Pk, embedded: Pk },
}

/// Which rendition list a selection ran over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenditionKind {
    Image,
    Video,
}

impl fmt::Display for RenditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenditionKind::Image => f.write_str("image"),
            RenditionKind::Video => f.write_str("video"),
        }
    }
}

/// Errors surfaced by entities and media values.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Transport failure, passed through untouched.
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("no {kind} renditions available")]
    NoRenditions { kind: RenditionKind },

    #[error("missing field: {0}")]
    MissingField(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ModelError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        ModelError::Malformed(message.into())
    }
}
