//! SMTP mailer implementation (lettre).

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use lumen_core::config::email::EmailConfig;
use lumen_core::error::AppError;
use lumen_core::error::AppResult;
use lumen_core::traits::mailer::{MailMessage, Mailer};

/// Mailer that delivers through an SMTP relay.
///
/// When email is disabled in configuration, messages are logged instead
/// of sent, which is useful in development and tests.
pub struct SmtpMailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("enabled", &self.transport.is_some())
            .field("from", &self.from)
            .finish()
    }
}

impl SmtpMailer {
    /// Builds a mailer from email configuration.
    pub fn new(config: &EmailConfig) -> AppResult<Self> {
        let from = format!("{} <{}>", config.from_name, config.from_address)
            .parse::<Mailbox>()
            .map_err(|e| {
                AppError::configuration(format!("Invalid from address: {e}"))
            })?;

        if !config.enabled {
            return Ok(Self {
                transport: None,
                from,
            });
        }

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                .map_err(|e| {
                    AppError::configuration(format!("Invalid SMTP relay config: {e}"))
                })?
                .port(config.smtp_port);

        if let (Some(username), Some(password)) =
            (&config.smtp_username, &config.smtp_password)
        {
            builder = builder.credentials(Credentials::new(
                username.clone(),
                password.clone(),
            ));
        }

        Ok(Self {
            transport: Some(builder.build()),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        let Some(transport) = &self.transport else {
            info!(
                to = %message.to_address,
                subject = %message.subject,
                "Email disabled; logging message instead of sending"
            );
            return Ok(());
        };

        let to = match &message.to_name {
            Some(name) => format!("{name} <{}>", message.to_address),
            None => message.to_address.clone(),
        }
        .parse::<Mailbox>()
        .map_err(|e| AppError::validation(format!("Invalid recipient address: {e}")))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject)
            .body(message.body)
            .map_err(|e| AppError::internal(format!("Failed to build email: {e}")))?;

        transport
            .send(email)
            .await
            .map_err(|e| AppError::external_service(format!("SMTP delivery failed: {e}")))?;

        Ok(())
    }
}
