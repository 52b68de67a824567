//! Core identifier types for pipaw.
//!
//! This crate defines the value types shared by the transport capability and
//! the entity model:
//! - [`Pk`], the primary key every remote record is identified by
//! - [`RankToken`], the correlation token kept constant across one feed sweep

mod ids;

pub use ids::{Pk, RankToken};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid primary key: {0}")]
    InvalidPk(String),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
