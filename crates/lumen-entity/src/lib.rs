//! # lumen-entity
//!
//! Domain entity models shared across the Lumen platform: users and
//! approval status, events, registrations and their payment lifecycle,
//! and card-payment records.

pub mod event;
pub mod payment;
pub mod registration;
pub mod user;
