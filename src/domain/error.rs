//! Domain errors

use thiserror::Error;

/// Domain-level error types.
///
/// The message of every variant is the client-facing detail text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Room id out of range or inverted date range
    #[error("{0}")]
    InvalidArgument(String),

    /// Room unavailable for the range, or duplicate reservation
    #[error("{0}")]
    Conflict(String),

    /// No stored reservation matches the given tuple
    #[error("{0}")]
    NotFound(String),

    /// Storage/database error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn invalid_room_id() -> Self {
        Self::InvalidArgument("Room id must be between 1 and 10".to_string())
    }

    pub fn room_id_not_integer(raw: &str) -> Self {
        Self::InvalidArgument(format!("Room id must be an integer, got '{}'", raw))
    }

    pub fn invalid_date_range() -> Self {
        Self::InvalidArgument("Start date must be before end date".to_string())
    }

    pub fn date_out_of_range() -> Self {
        Self::InvalidArgument("Date year must be between 1 and 9999".to_string())
    }

    pub fn room_not_available() -> Self {
        Self::Conflict("Room not avaliable".to_string())
    }

    pub fn already_exists() -> Self {
        Self::Conflict("Reservation already exists".to_string())
    }

    pub fn not_found() -> Self {
        Self::NotFound("Reservation not found".to_string())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
