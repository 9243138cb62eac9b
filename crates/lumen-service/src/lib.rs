//! # lumen-service
//!
//! Business services for the Lumen platform: the event catalog, the
//! registration ledger, the payment-verification engine, card payments,
//! and the notification dispatcher.

pub mod account;
pub mod catalog;
pub mod context;
pub mod notification;
pub mod payment;
pub mod registration;
pub mod verification;

#[cfg(test)]
pub(crate) mod testing;
