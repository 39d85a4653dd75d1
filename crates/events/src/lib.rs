//! Order event bus and notification infrastructure.
//!
//! Building blocks for the post-commit notification flow:
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`OrderCreated`] — the message the intake handler publishes after an
//!   order is committed.
//! - [`OrderNotifier`] — background task that consumes the bus and pushes
//!   a text summary to the LINE broadcast channel.
//! - [`delivery`] — the LINE delivery client itself.
//!
//! Notification is at-most-once: a full bus drops the oldest messages and
//! a failed delivery is logged and abandoned. Admins catch anything missed
//! from the dashboard.

pub mod bus;
pub mod delivery;
pub mod notifier;

pub use bus::{EventBus, OrderCreated};
pub use delivery::line::{LineConfig, LineDelivery};
pub use notifier::OrderNotifier;
