//! HTTP request handlers, organized by domain.

pub mod admin;
pub mod auth;
pub mod events;
pub mod health;
pub mod payments;
pub mod registrations;
