//! Domain logic for the eventworks order-intake backend.
//!
//! Pure types and functions with no I/O: submission normalization and
//! required-field validation, the order status set, notification display
//! tables, and paging clamps. Everything here is usable from the API layer,
//! the notifier, and tests without a database or network connection.

pub mod error;
pub mod intake;
pub mod labels;
pub mod order_status;
pub mod paging;
pub mod types;
