//! # Validation Module
//!
//! Field rules checked before anything is sent to the backend.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (client, before any request)                     │
//! │  ├── Required fields, lengths, positive amounts                        │
//! │  └── Immediate operator feedback, nothing leaves the register          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Backend                                                       │
//! │  ├── Customer exists (404)                                             │
//! │  ├── Reference unique per customer (409)                               │
//! │  └── Balance sufficient (400)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lengths mirror the backend's column limits so a request that passes here
//! is not bounced for size.

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum reference length accepted by the backend.
pub const MAX_REFERENCE_LEN: usize = 64;

/// Maximum description length accepted by the backend.
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Minimum customer password length.
pub const MIN_PASSWORD_LEN: usize = 6;

// =============================================================================
// Ticket Fields
// =============================================================================

/// Validates a ticket reference and returns it trimmed.
///
/// ```rust
/// use puntos_core::validation::validate_reference;
///
/// assert_eq!(validate_reference("  F123 ").unwrap(), "F123");
/// assert!(validate_reference("   ").is_err());
/// ```
pub fn validate_reference(reference: &str) -> ValidationResult<String> {
    let reference = reference.trim();

    if reference.is_empty() {
        return Err(ValidationError::Required {
            field: "reference".to_string(),
        });
    }

    if reference.chars().count() > MAX_REFERENCE_LEN {
        return Err(ValidationError::TooLong {
            field: "reference".to_string(),
            max: MAX_REFERENCE_LEN,
        });
    }

    Ok(reference.to_string())
}

/// Normalizes an optional description: blank becomes `None`.
pub fn validate_description(description: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(None);
    };

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(Some(description.to_string()))
}

/// The ticket amount must be greater than zero to earn or redeem.
pub fn validate_ticket_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "ticket amount".to_string(),
        });
    }

    Ok(())
}

/// Points in a movement must be greater than zero.
pub fn validate_points(points: i64, field: &str) -> ValidationResult<()> {
    if points <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Customer Account Fields
// =============================================================================

/// Light email check and normalization (trimmed, lowercase).
///
/// The backend does full validation; this catches typos like a missing `@`.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "expected name@domain".to_string(),
        });
    }

    Ok(email.to_lowercase())
}

/// Customer passwords need at least six characters.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}
