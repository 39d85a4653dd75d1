//! External delivery channels for order notifications.
//!
//! Currently a single channel: the LINE Messaging API broadcast endpoint.

pub mod line;
