//! Trait seams to external collaborators.
//!
//! Traits are defined here in `lumen-core` and implemented in the
//! infrastructure crates so that services depend only on the contract.

pub mod mailer;
pub mod processor;
pub mod storage;

pub use mailer::{MailMessage, Mailer};
pub use processor::{CreateIntentRequest, PaymentIntent, PaymentProcessor};
pub use storage::StorageProvider;
