//! Registration ledger service.

pub mod service;

pub use service::RegistrationService;
