//! Notification dispatch for approved registrations.

pub mod dispatcher;
pub mod smtp;

pub use dispatcher::{EventConfirmation, NotificationDispatcher};
pub use smtp::SmtpMailer;
