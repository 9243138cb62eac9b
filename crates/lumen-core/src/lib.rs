//! # lumen-core
//!
//! Core crate for the Lumen events platform. Contains configuration
//! schemas, the unified error system, and the trait seams to external
//! collaborators (file storage, card processor, mailer).
//!
//! This crate has **no** internal dependencies on other Lumen crates.

pub mod config;
pub mod error;
pub mod traits;

pub use error::{AppError, AppResult};
