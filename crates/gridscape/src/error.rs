//! Error types for the entity layer.

use thiserror::Error;

use crate::entity::EntityId;

/// Errors raised by entities and the visibility manager.
///
/// Every variant is a precondition violation detected synchronously at the
/// offending call. None of them are transient, and the operation that
/// returned the error has left all state exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    /// The entity's appearance mode does not match the requested operation,
    /// or the supplied appearance data is empty.
    #[error("invalid entity state: {reason}")]
    InvalidState { reason: &'static str },

    /// The manager is already attached to a host surface.
    #[error("manager is already attached to a host surface")]
    AlreadyAttached,

    /// The host surface does not expose a render pipeline.
    #[error("host surface does not expose a render pipeline")]
    UnsupportedHost,

    /// The entity is not tracked by this manager.
    #[error("entity {0} is not managed by this manager")]
    NotManaged(EntityId),
}

/// Result type for entity and manager operations.
pub type EntityResult<T> = Result<T, EntityError>;
