//! # lumen-storage
//!
//! Local-filesystem implementation of the [`StorageProvider`] trait,
//! plus the path conventions for payment proofs and QR codes.
//!
//! [`StorageProvider`]: lumen_core::traits::StorageProvider

pub mod local;
pub mod paths;

pub use local::LocalStorageProvider;
