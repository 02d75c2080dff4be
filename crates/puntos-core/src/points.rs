//! # Points Calculator
//!
//! Suggested accumulation and redemption amounts for a ticket.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ACCUMULATION                                                           │
//! │    points = round(ticket × rate)          rate defaults to 1%           │
//! │    never negative; 0 is a valid suggestion but cannot be submitted     │
//! │                                                                         │
//! │  REDEMPTION                                                             │
//! │    ceiling   = min(available balance, floor(ticket))                    │
//! │    suggested = ceiling                    1 point = 1 currency unit     │
//! │    operator may type any value in 1..=ceiling                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! These are suggestions only. The backend remains the authority on the
//! balance and may still reject a redemption.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

/// Basis points in 100%.
const BPS_SCALE: i128 = 10_000;

/// Accrual rate in basis points (100 bps = 1%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AccrualRate(u32);

impl AccrualRate {
    /// The program's standard rate: 1% of the ticket.
    pub const STANDARD: AccrualRate = AccrualRate(100);

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        AccrualRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Points earned for a ticket, rounded half up.
    ///
    /// Works in cents with a single division:
    /// `points = (cents × bps + 500000) / 1000000`.
    ///
    /// ```rust
    /// use puntos_core::money::Money;
    /// use puntos_core::points::AccrualRate;
    ///
    /// // 1500.50 × 1% = 15.005 → 15
    /// let ticket = Money::from_cents(150050);
    /// assert_eq!(AccrualRate::STANDARD.points_for(ticket), 15);
    /// ```
    pub fn points_for(&self, ticket: Money) -> i64 {
        if !ticket.is_positive() {
            return 0;
        }
        // cents * bps / (10000 * 100), rounded half up
        let denominator = BPS_SCALE * 100;
        let points = (ticket.cents() as i128 * self.0 as i128 + denominator / 2) / denominator;
        points.clamp(0, i64::MAX as i128) as i64
    }
}

impl Default for AccrualRate {
    fn default() -> Self {
        AccrualRate::STANDARD
    }
}

// =============================================================================
// Redemption
// =============================================================================

/// Most points redeemable on a ticket: one per whole currency unit.
#[inline]
pub fn ticket_redemption_cap(ticket: Money) -> i64 {
    ticket.whole_units().max(0)
}

/// Suggested redemption: `min(available, floor(ticket))`.
///
/// With no balance loaded yet the suggestion is 0.
///
/// ```rust
/// use puntos_core::money::Money;
/// use puntos_core::points::suggested_redemption;
///
/// assert_eq!(suggested_redemption(Some(50), Money::from_cents(3000)), 30);
/// assert_eq!(suggested_redemption(Some(10), Money::from_cents(3000)), 10);
/// assert_eq!(suggested_redemption(None, Money::from_cents(3000)), 0);
/// ```
pub fn suggested_redemption(available: Option<i64>, ticket: Money) -> i64 {
    match available {
        Some(balance) if balance > 0 => balance.min(ticket_redemption_cap(ticket)).max(0),
        _ => 0,
    }
}

/// Checks an operator-entered redemption against both ceilings.
///
/// `available` is `None` when the balance could not be loaded; the
/// ticket ceiling still applies and the backend checks the balance.
pub fn check_redemption(points: i64, available: Option<i64>, ticket: Money) -> CoreResult<()> {
    if points <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "points to redeem".to_string(),
        }
        .into());
    }

    if let Some(available) = available {
        if points > available {
            return Err(CoreError::ExceedsBalance {
                requested: points,
                available,
            });
        }
    }

    let max = ticket_redemption_cap(ticket);
    if points > max {
        return Err(CoreError::ExceedsTicket {
            requested: points,
            max,
        });
    }

    Ok(())
}
