//! Card payments through the external processor.
//!
//! The browser confirms a payment intent directly with the processor;
//! this system treats that as a UI hint only. The registration is
//! approved exclusively from the processor's signed webhook.

pub mod client;
pub mod service;
pub mod webhook;

pub use client::HttpPaymentProcessor;
pub use service::{CardIntent, PaymentService};
