//! Well-known order status constants.
//!
//! These must match the values stored in the `orders.status` column and
//! accepted by the admin review endpoint. New orders always start as
//! [`ORDER_UNHANDLED`] (the column default).

use crate::error::CoreError;

/// Nobody has looked at the order yet.
pub const ORDER_UNHANDLED: &str = "unhandled";

/// An admin is actively working the order.
pub const ORDER_IN_PROGRESS: &str = "in_progress";

/// The order has been handled to completion.
pub const ORDER_DONE: &str = "done";

/// All valid order statuses.
pub const VALID_ORDER_STATUSES: &[&str] = &[ORDER_UNHANDLED, ORDER_IN_PROGRESS, ORDER_DONE];

/// Validate that a status string is one of the known statuses.
///
/// Statuses form a flat set, not a workflow: any valid status may be
/// written over any other.
pub fn validate_order_status(status: &str) -> Result<(), CoreError> {
    if VALID_ORDER_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown order status: '{status}'. Valid statuses: {}",
            VALID_ORDER_STATUSES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
