//! Request handlers.
//!
//! - [`intake`] -- the public order submission endpoint.
//! - [`admin_orders`] -- authenticated order review endpoints. These delegate
//!   to [`OrderRepo`](eventworks_db::repositories::OrderRepo) and map errors
//!   via [`AppError`](crate::error::AppError).

pub mod admin_orders;
pub mod intake;
