//! Account lifecycle: signup, login, and admin user management.

pub mod service;

pub use service::{AccountService, AuthSession, SignupRequest};
