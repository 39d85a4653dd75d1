//! Abuse scoring for order intake.
//!
//! [`AbuseScorer`] is the seam the intake handler calls through one
//! verification per submission. [`RecaptchaVerifier`] is the production
//! implementation backed by the reCAPTCHA v3 `siteverify` endpoint; tests
//! substitute scripted implementations.

pub mod scorer;
pub mod verifier;

pub use scorer::{AbuseScorer, ScorerError, VerifyOutcome};
pub use verifier::{RecaptchaConfig, RecaptchaVerifier};
