//! Domain errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Missing required role: {0}")]
    MissingRole(&'static str),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Board games unavailable: {0:?}")]
    GamesUnavailable(Vec<i32>),

    #[error("Category {0} still has board games assigned")]
    CategoryHasBoardGames(i32),

    #[error("Reservation access denied")]
    ReservationAccessDenied,

    #[error("Illegal reservation item transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Shorthand for the common by-id lookup failure.
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
