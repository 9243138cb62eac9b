//! # lumen-database
//!
//! PostgreSQL access layer: connection pool management, migration
//! runner, and one repository per entity.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;
