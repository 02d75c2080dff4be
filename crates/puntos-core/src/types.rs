//! # Domain Types
//!
//! Wire and view types of the loyalty program.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ CustomerBalance │   │    Movement     │   │  TicketContext  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  cliente        │   │  id             │   │  amount (cents) │       │
//! │  │  acumulados     │   │  tipo           │   │  reference      │       │
//! │  │  canjeados      │   │  puntos         │   │  description    │       │
//! │  │  disponibles    │   │  referencia     │   └─────────────────┘       │
//! │  └─────────────────┘   │  fecha          │                              │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    Customer     │   │  PointsRequest  │  body of both caja POSTs    │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names on the wire are Spanish (the backend's); Rust names are not.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Balance
// =============================================================================

/// Balance summary from `GET /movimientos/resumen/{id}`.
///
/// Superseded by every fetch; the client never adjusts it locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerBalance {
    /// Customer display name.
    #[serde(rename = "cliente", default)]
    pub customer_name: String,

    #[serde(rename = "puntos_acumulados", default)]
    pub accumulated: i64,

    #[serde(rename = "puntos_canjeados", default)]
    pub redeemed: i64,

    /// Points the customer can spend right now.
    #[serde(rename = "puntos_disponibles")]
    pub available: i64,
}

// =============================================================================
// Movement
// =============================================================================

/// Kind of a committed movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MovementKind {
    #[serde(rename = "acumulado")]
    Accumulated,
    #[serde(rename = "canjeado")]
    Redeemed,
}

impl MovementKind {
    /// Sign shown next to the points.
    pub fn sign(&self) -> char {
        match self {
            MovementKind::Accumulated => '+',
            MovementKind::Redeemed => '-',
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementKind::Accumulated => write!(f, "accumulated"),
            MovementKind::Redeemed => write!(f, "redeemed"),
        }
    }
}

/// A committed accumulate or redeem record.
///
/// The authoritative copy lives on the backend; the client only shows the
/// last response and the history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Movement {
    pub id: i64,

    /// Present on caja responses, absent on some history payloads.
    #[serde(rename = "id_cliente", default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,

    #[serde(rename = "tipo")]
    pub kind: MovementKind,

    /// Unsigned point count; `kind` gives the direction.
    #[serde(rename = "puntos")]
    pub points: i64,

    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    #[serde(rename = "referencia", default)]
    pub reference: Option<String>,

    #[serde(rename = "fecha", deserialize_with = "deserialize_timestamp")]
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

impl Movement {
    /// Points with the direction applied (redemptions negative).
    pub fn signed_points(&self) -> i64 {
        match self.kind {
            MovementKind::Accumulated => self.points,
            MovementKind::Redeemed => -self.points,
        }
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {}{} pts · {} · Ref: {} · {}",
            self.id,
            self.kind,
            self.kind.sign(),
            self.points,
            self.description.as_deref().unwrap_or("—"),
            self.reference.as_deref().unwrap_or("—"),
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
        )
    }
}

/// Accepts RFC 3339 timestamps and the backend's naive ISO-8601 (read as UTC).
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

// =============================================================================
// Customer
// =============================================================================

/// A program member as returned by the customer app endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    #[serde(rename = "id_cliente")]
    pub id: i64,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "correo")]
    pub email: String,

    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,

    #[serde(rename = "codigo_sap", default)]
    pub sap_code: Option<String>,

    #[serde(rename = "fecha_registro", default)]
    pub registered_at: Option<String>,
}

// =============================================================================
// Ticket
// =============================================================================

/// What the cashier typed about the current ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TicketContext {
    /// Ticket total.
    pub amount: Money,

    /// Folio / ticket number; the backend rejects duplicates.
    pub reference: String,

    pub description: Option<String>,
}

/// Body of `POST /caja/acumular-qr` and `POST /caja/canjear-qr`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PointsRequest {
    /// Normalized `CLI:<id>` payload.
    pub qr_data: String,

    pub puntos: i64,

    /// Sent as `null` when empty.
    pub descripcion: Option<String>,

    pub referencia: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_balance_from_wire() {
        let json = r#"{"cliente":"Ana","puntos_acumulados":120,"puntos_canjeados":20,"puntos_disponibles":100}"#;
        let balance: CustomerBalance = serde_json::from_str(json).unwrap();
        assert_eq!(balance.customer_name, "Ana");
        assert_eq!(balance.available, 100);
        assert_eq!(balance.accumulated, 120);
        assert_eq!(balance.redeemed, 20);
    }

    #[test]
    fn test_movement_naive_timestamp() {
        let json = r#"{"id":7,"id_cliente":3,"tipo":"canjeado","puntos":30,"descripcion":null,"referencia":"F1","fecha":"2024-05-01T12:30:15.123456"}"#;
        let mov: Movement = serde_json::from_str(json).unwrap();
        assert_eq!(mov.kind, MovementKind::Redeemed);
        assert_eq!(mov.signed_points(), -30);
        assert_eq!(mov.customer_id, Some(3));
        assert_eq!(mov.timestamp.month(), 5);
        assert_eq!(mov.timestamp.hour(), 12);
    }

    #[test]
    fn test_movement_rfc3339_and_missing_optionals() {
        let json = r#"{"id":1,"tipo":"acumulado","puntos":15,"fecha":"2024-05-01T12:30:00-06:00"}"#;
        let mov: Movement = serde_json::from_str(json).unwrap();
        assert_eq!(mov.kind, MovementKind::Accumulated);
        assert_eq!(mov.signed_points(), 15);
        assert_eq!(mov.timestamp.hour(), 18);
        assert_eq!(mov.description, None);
        assert_eq!(mov.customer_id, None);
    }

    #[test]
    fn test_movement_rejects_unknown_kind() {
        let json = r#"{"id":1,"tipo":"ajuste","puntos":15,"fecha":"2024-05-01T12:30:00"}"#;
        assert!(serde_json::from_str::<Movement>(json).is_err());
    }

    #[test]
    fn test_movement_display() {
        let json = r#"{"id":9,"tipo":"acumulado","puntos":15,"referencia":"F9","fecha":"2024-05-01T08:00:00"}"#;
        let mov: Movement = serde_json::from_str(json).unwrap();
        assert_eq!(
            mov.to_string(),
            "#9 accumulated +15 pts · — · Ref: F9 · 2024-05-01 08:00:00"
        );
    }

    #[test]
    fn test_points_request_sends_null_description() {
        let req = PointsRequest {
            qr_data: "CLI:3".into(),
            puntos: 15,
            descripcion: None,
            referencia: "F1".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["descripcion"], serde_json::Value::Null);
        assert_eq!(value["qr_data"], "CLI:3");
    }

    #[test]
    fn test_customer_from_wire() {
        let json = r#"{"id_cliente":5,"nombre":"Luis","correo":"luis@example.com","telefono":null,"fecha_registro":"2024-01-02T00:00:00"}"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.id, 5);
        assert_eq!(customer.email, "luis@example.com");
        assert_eq!(customer.sap_code, None);
    }
}
