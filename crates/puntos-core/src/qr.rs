//! # QR Normalizer
//!
//! Turns raw scanner text into the canonical customer payload `CLI:<id>`.
//!
//! ## Why Normalize?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HID scanners type the QR as if it were a keyboard. With a Spanish     │
//! │  layout active, ':' comes out as 'Ñ', and every read ends with Enter:  │
//! │                                                                         │
//! │    customer QR:   CLI:123                                               │
//! │    scanner text:  CLIÑ123\r\n                                           │
//! │                                                                         │
//! │  normalize()  ──►  ScanResult { normalized: "CLI:123", id: Some(123) } │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any run of non-digits between the `CLI` prefix and the digits is treated
//! as the separator, so `CLI;123`, `CLI-123` and `cli 123` all resolve.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Prefix every customer payload starts with.
pub const QR_PREFIX: &str = "CLI";

/// Characters keyboard-wedge scanners emit in place of ':'.
const MANGLED_SEPARATORS: [char; 2] = ['Ñ', 'ñ'];

/// The outcome of one scanner read.
///
/// Recreated on every scan; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScanResult {
    /// Text exactly as the scanner delivered it.
    pub raw: String,

    /// `CLI:<digits>` when the scan parsed, otherwise the cleaned text.
    pub normalized: String,

    /// Parsed customer id, absent when the scan is malformed.
    pub customer_id: Option<i64>,
}

impl ScanResult {
    /// Normalizes a raw scanner read.
    ///
    /// ```rust
    /// use puntos_core::qr::ScanResult;
    ///
    /// let scan = ScanResult::normalize("CLIÑ123\r\n");
    /// assert_eq!(scan.normalized, "CLI:123");
    /// assert_eq!(scan.customer_id, Some(123));
    ///
    /// let bad = ScanResult::normalize("7501055300075");
    /// assert_eq!(bad.customer_id, None);
    /// ```
    pub fn normalize(raw: &str) -> Self {
        let cleaned: String = raw
            .chars()
            .filter(|c| *c != '\r' && *c != '\n')
            .map(|c| if MANGLED_SEPARATORS.contains(&c) { ':' } else { c })
            .collect::<String>()
            .trim()
            .to_uppercase();

        match parse_customer_digits(&cleaned) {
            Some((digits, id)) => ScanResult {
                raw: raw.to_string(),
                normalized: format!("{}:{}", QR_PREFIX, digits),
                customer_id: Some(id),
            },
            None => ScanResult {
                raw: raw.to_string(),
                normalized: cleaned,
                customer_id: None,
            },
        }
    }

    /// Returns true if a customer id was recognized.
    pub fn is_valid(&self) -> bool {
        self.customer_id.is_some()
    }

    /// Returns the customer id or the invalid-format error the operator sees.
    pub fn require_customer(&self) -> CoreResult<i64> {
        self.customer_id.ok_or_else(|| CoreError::InvalidQr {
            raw: self.raw.clone(),
        })
    }
}

/// Extracts the trailing digits after the `CLI` prefix.
///
/// Returns the digits as scanned and their value; the value must be a
/// positive i64.
fn parse_customer_digits(cleaned: &str) -> Option<(&str, i64)> {
    let rest = cleaned.strip_prefix(QR_PREFIX)?;
    let digits_start = rest.find(|c: char| c.is_ascii_digit())?;
    let digits = &rest[digits_start..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let id: i64 = digits.parse().ok()?;
    (id > 0).then_some((digits, id))
}

/// The payload a customer's "my QR" screen encodes.
///
/// ```rust
/// use puntos_core::qr::customer_qr_payload;
///
/// assert_eq!(customer_qr_payload(42), "CLI:42");
/// ```
pub fn customer_qr_payload(customer_id: i64) -> String {
    format!("{}:{}", QR_PREFIX, customer_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_scan() {
        let scan = ScanResult::normalize("CLI:123");
        assert_eq!(scan.normalized, "CLI:123");
        assert_eq!(scan.customer_id, Some(123));
        assert!(scan.is_valid());
    }

    #[test]
    fn test_mangled_separator_and_line_endings() {
        for raw in ["CLIÑ55\r\n", "cliñ55\n", "  CLI:55  \r", "CLI\r\n:55"] {
            let scan = ScanResult::normalize(raw);
            assert_eq!(scan.normalized, "CLI:55", "raw = {:?}", raw);
            assert_eq!(scan.customer_id, Some(55));
            assert!(!scan.normalized.contains('\n'));
            assert!(!scan.normalized.contains('\r'));
        }
    }

    #[test]
    fn test_tolerant_separators() {
        for raw in ["CLI;9", "CLI-9", "CLI 9", "CLI=9", "CLI9", "cli_'9"] {
            assert_eq!(ScanResult::normalize(raw).customer_id, Some(9), "raw = {:?}", raw);
        }
    }

    #[test]
    fn test_digits_kept_as_scanned() {
        let scan = ScanResult::normalize("CLI:0042");
        assert_eq!(scan.normalized, "CLI:0042");
        assert_eq!(scan.customer_id, Some(42));
    }

    #[test]
    fn test_malformed_scans() {
        for raw in [
            "",
            "CLI:",
            "CLI:abc",
            "CLI:12ab",
            "XCLI:12",
            "7501055300075",
            "CLI:0",
            "CLI:99999999999999999999",
        ] {
            let scan = ScanResult::normalize(raw);
            assert_eq!(scan.customer_id, None, "raw = {:?}", raw);
            assert!(matches!(
                scan.require_customer(),
                Err(CoreError::InvalidQr { .. })
            ));
        }
    }

    #[test]
    fn test_malformed_keeps_cleaned_text() {
        let scan = ScanResult::normalize("prodñ1x\n");
        assert_eq!(scan.normalized, "PROD:1X");
        assert_eq!(scan.raw, "prodñ1x\n");
    }

    #[test]
    fn test_payload_round_trips_through_normalizer() {
        let payload = customer_qr_payload(1234);
        assert_eq!(ScanResult::normalize(&payload).customer_id, Some(1234));
    }
}
