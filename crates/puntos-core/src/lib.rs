//! # puntos-core: Pure Loyalty Logic
//!
//! Everything the cashier register decides on its own, before the backend
//! is asked anything.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Puntos Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 puntos-caja (terminal app)                      │   │
//! │  │     scanner loop ──► ticket fields ──► accumulate / redeem      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          puntos-client (HTTP client + register state)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ puntos-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐  │   │
//! │  │   │   qr    │ │ points  │ │  money  │ │submission│ │ types  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`qr`] - Scanner text → `CLI:<id>`
//! - [`points`] - Accumulation and redemption suggestions
//! - [`money`] - Integer-cent ticket amounts
//! - [`submission`] - Guards that must pass before a request is sent
//! - [`validation`] - Field rules
//! - [`types`] - Wire types (balance, movement, customer)
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use puntos_core::{AccrualRate, Money, ScanResult};
//! use puntos_core::points::suggested_redemption;
//!
//! let scan = ScanResult::normalize("CLIÑ123\n");
//! assert_eq!(scan.customer_id, Some(123));
//!
//! let ticket = Money::parse("1500.50").unwrap();
//! assert_eq!(AccrualRate::STANDARD.points_for(ticket), 15);
//! assert_eq!(suggested_redemption(Some(200), ticket), 200);
//! ```

pub mod error;
pub mod money;
pub mod points;
pub mod qr;
pub mod submission;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use points::AccrualRate;
pub use qr::ScanResult;
pub use types::*;
