//! Authentication and authorization middleware extractors.
//!
//! - [`auth`] -- Extracts and verifies the Bearer token from the
//!   `Authorization` header, yielding a `VerifiedIdentity`.
//! - [`admin::RequireAdmin`] -- Additionally requires the subject to be on
//!   the admin allow-list.

pub mod admin;
pub mod auth;
