//! Background order-notification service.
//!
//! [`OrderNotifier`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! broadcast channel, composes a text summary for every [`OrderCreated`]
//! it receives, and pushes it to the LINE broadcast channel. It runs as a
//! long-lived task and shuts down gracefully when the bus sender is
//! dropped. Delivery failures are logged and abandoned; they never reach
//! the submitter's request.

use tokio::sync::broadcast;

use eventworks_core::labels::{format_budget, format_deadline};

use crate::bus::OrderCreated;
use crate::delivery::line::LineDelivery;

/// Background service that notifies admins of new orders.
pub struct OrderNotifier {
    delivery: Option<LineDelivery>,
}

impl OrderNotifier {
    /// Create a notifier. Pass `None` to run with delivery disabled; the
    /// bus is still drained so lag warnings stay meaningful.
    pub fn new(delivery: Option<LineDelivery>) -> Self {
        Self { delivery }
    }

    /// Run the notification loop.
    ///
    /// Consumes events via the provided `receiver` until the channel is
    /// closed (i.e. the [`EventBus`](crate::bus::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<OrderCreated>) {
        tracing::info!(
            delivery_enabled = self.delivery.is_some(),
            "Order notifier started"
        );

        loop {
            match receiver.recv().await {
                Ok(event) => self.notify(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Order notifier lagged, notifications were dropped"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, order notifier shutting down");
                    break;
                }
            }
        }
    }

    /// Deliver a single notification, at most once.
    async fn notify(&self, event: &OrderCreated) {
        let Some(delivery) = &self.delivery else {
            tracing::debug!(
                order_id = %event.order_id,
                "LINE delivery disabled, skipping notification"
            );
            return;
        };

        let text = compose_message(event);
        match delivery.broadcast_text(&text).await {
            Ok(()) => {
                tracing::info!(order_id = %event.order_id, "Order notification sent");
            }
            Err(e) => {
                tracing::error!(
                    order_id = %event.order_id,
                    error = %e,
                    "Order notification failed"
                );
            }
        }
    }
}

/// Compose the broadcast text for a new order.
///
/// Budget and deadline codes are rendered through the display tables;
/// empty name/type render as `-` like the other placeholders.
fn compose_message(event: &OrderCreated) -> String {
    let name = if event.name.is_empty() {
        "-"
    } else {
        &event.name
    };
    let request_type = if event.request_type.is_empty() {
        "-"
    } else {
        &event.request_type
    };

    format!(
        "📩 新しい注文が入りました\n\n\
         名前：{name}\n\
         種別：{request_type}\n\
         予算：{}\n\
         納期：{}\n",
        format_budget(&event.budget_range),
        format_deadline(&event.deadline),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
