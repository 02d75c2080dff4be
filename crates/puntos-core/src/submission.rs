//! # Submission Guards
//!
//! Builds the body of an accumulate or redeem call, or says why it cannot
//! be sent. Nothing in here talks to the network: if one of these returns
//! an error, no request is made.
//!
//! ## Check Order
//! ```text
//! scanned customer ──► reference ──► ticket amount ──► points ──► ceilings
//!        │                 │               │              │           │
//!   InvalidQr/NoCustomer  Required    MustBePositive  MustBePositive  Exceeds*
//! ```
//! The order matches what the operator fixes first at the register.

use crate::error::{CoreError, CoreResult};
use crate::points::{check_redemption, AccrualRate};
use crate::qr::ScanResult;
use crate::types::{PointsRequest, TicketContext};
use crate::validation::{
    validate_description, validate_points, validate_reference, validate_ticket_amount,
};

/// Validates the scan and ticket fields shared by both operations.
fn common_fields(
    scan: Option<&ScanResult>,
    ticket: &TicketContext,
) -> CoreResult<(String, String, Option<String>)> {
    let scan = scan.ok_or(CoreError::NoCustomer)?;
    scan.require_customer()?;
    let reference = validate_reference(&ticket.reference)?;
    validate_ticket_amount(ticket.amount)?;
    let description = validate_description(ticket.description.as_deref())?;
    Ok((scan.normalized.clone(), reference, description))
}

/// Builds an accumulation for the ticket at the given rate.
///
/// Points are always derived from the amount; a ticket too small to earn
/// a point is rejected here rather than sent as zero.
pub fn prepare_accumulation(
    scan: Option<&ScanResult>,
    ticket: &TicketContext,
    rate: AccrualRate,
) -> CoreResult<PointsRequest> {
    let (qr_data, referencia, descripcion) = common_fields(scan, ticket)?;
    let puntos = rate.points_for(ticket.amount);
    validate_points(puntos, "points to accumulate")?;

    Ok(PointsRequest {
        qr_data,
        puntos,
        descripcion,
        referencia,
    })
}

/// Builds a redemption of `points` after checking both ceilings.
///
/// `available` is the last balance fetched from the backend, if any.
pub fn prepare_redemption(
    scan: Option<&ScanResult>,
    ticket: &TicketContext,
    points: i64,
    available: Option<i64>,
) -> CoreResult<PointsRequest> {
    let (qr_data, referencia, descripcion) = common_fields(scan, ticket)?;
    check_redemption(points, available, ticket.amount)?;

    Ok(PointsRequest {
        qr_data,
        puntos: points,
        descripcion,
        referencia,
    })
}
