//! # Error Types
//!
//! Typed error handling for the roamstay backend.
//! All fallible operations return `Result<T, TravelError>`.

use thiserror::Error;
use uuid::Uuid;

/// Core error type for booking and payment operations
#[derive(Debug, Error)]
pub enum TravelError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Missing or invalid request data
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Entity lookup failed
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    /// A booking already has a pending or completed payment
    #[error("Booking {booking_id} already has an active payment")]
    ActivePaymentExists { booking_id: Uuid },

    /// Gateway accepted the request but refused the transaction
    #[error("Payment declined [{provider}]: {message}")]
    Declined { provider: String, message: String },

    /// Gateway HTTP failure or malformed gateway response
    #[error("Gateway error [{provider}]: {message}")]
    Gateway { provider: String, message: String },

    /// Network error reaching the gateway
    #[error("Network error: {0}")]
    Network(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TravelError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            TravelError::Configuration(_) => 500,
            TravelError::Validation(_) => 400,
            TravelError::NotFound { .. } => 404,
            TravelError::ActivePaymentExists { .. } => 409,
            TravelError::Declined { .. } => 400,
            TravelError::Gateway { .. } => 502,
            TravelError::Network(_) => 502,
            TravelError::Internal(_) => 500,
        }
    }

    /// Shorthand for a not-found error
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        TravelError::NotFound { entity, id }
    }
}

/// Result type alias for booking and payment operations
pub type TravelResult<T> = Result<T, TravelError>;
