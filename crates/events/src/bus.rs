//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`OrderCreated`] messages.
//! It is designed to be shared via `Arc<EventBus>` across the application.

use eventworks_core::types::{OrderId, Timestamp};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// OrderCreated
// ---------------------------------------------------------------------------

/// Message published after an order has been committed to the store.
///
/// Carries only what the notifier needs to compose its summary; consumers
/// wanting the full row read it back by id.
#[derive(Debug, Clone)]
pub struct OrderCreated {
    /// Store-assigned order id.
    pub order_id: OrderId,
    /// Submitter's name.
    pub name: String,
    /// Requested work type (free text from the form).
    pub request_type: String,
    /// Budget-range code, unformatted.
    pub budget_range: String,
    /// Deadline code, unformatted.
    pub deadline: String,
    /// When the store committed the order (UTC).
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`OrderCreated`].
///
/// # Usage
///
/// ```ignore
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(event);
/// ```
pub struct EventBus {
    sender: broadcast::Sender<OrderCreated>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// the order itself is already committed, so nothing is lost but the
    /// notification.
    pub fn publish(&self, event: OrderCreated) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<OrderCreated> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
