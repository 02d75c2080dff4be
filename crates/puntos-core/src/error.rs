//! # Error Types
//!
//! Domain-specific error types for puntos-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  puntos-core errors (this file)                                        │
//! │  ├── CoreError        - Scan / points rule violations                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  puntos-client errors (separate crate)                                 │
//! │  └── ClientError      - Backend, network and session failures          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → operator notice     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant here is raised BEFORE any network call is made.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations of the cashier flow.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The scanner text did not contain a `CLI:<id>` payload.
    ///
    /// ## When This Occurs
    /// - A product barcode was scanned instead of a loyalty QR
    /// - The scanner dropped the digits
    /// - The customer id is zero or does not fit an i64
    #[error("Invalid QR format. Expected: CLI:<customer id>")]
    InvalidQr { raw: String },

    /// An action needs a scanned customer and there is none.
    #[error("Scan a valid customer QR first")]
    NoCustomer,

    /// Redemption exceeds what the customer has available.
    ///
    /// ## User Workflow
    /// ```text
    /// Balance: 10 pts, operator types 25
    ///      │
    ///      ▼
    /// ExceedsBalance { requested: 25, available: 10 }
    ///      │
    ///      ▼
    /// Nothing is sent to the backend
    /// ```
    #[error("Points to redeem ({requested}) exceed the available balance ({available})")]
    ExceedsBalance { requested: i64, available: i64 },

    /// Redemption exceeds one point per whole currency unit of the ticket.
    #[error("For this ticket the maximum redeemable is {max} pts (requested {requested})")]
    ExceedsTicket { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparsable amount, malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ExceedsTicket {
            requested: 40,
            max: 30,
        };
        assert_eq!(
            err.to_string(),
            "For this ticket the maximum redeemable is 30 pts (requested 40)"
        );

        let err = CoreError::InvalidQr {
            raw: "7501234567890".into(),
        };
        assert!(err.to_string().contains("CLI:<customer id>"));
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "reference".to_string(),
        };
        assert_eq!(err.to_string(), "reference is required");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        };
        assert_eq!(err.to_string(), "password must be at least 6 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "points".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "points must be greater than 0");
    }
}
