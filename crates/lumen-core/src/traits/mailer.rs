//! Outbound mail trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// A single outbound email message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailMessage {
    /// Recipient address.
    pub to_address: String,
    /// Recipient display name.
    pub to_name: Option<String>,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Trait for outbound mail delivery.
///
/// Delivery is fire-and-forget from the caller's perspective; failures
/// are logged by the dispatcher and never affect committed state.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug + 'static {
    /// Send a single message.
    async fn send(&self, message: MailMessage) -> AppResult<()>;
}
