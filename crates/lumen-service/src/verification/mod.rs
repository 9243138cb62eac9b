//! Payment verification engine.
//!
//! Drives the manual (QR/bank-transfer) half of the payment state
//! machine: evidence submission by the payer and the admin review that
//! finalizes a registration.

pub mod service;

pub use service::{ProofSubmission, VerificationService};
