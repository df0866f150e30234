//! Outbound invitation email over SMTP.
//!
//! Delivery is best-effort: the invitation row is the source of truth and
//! a failed send only logs. Sends are spawned so handlers never block on
//! SMTP.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use timewheel_core::types::Timestamp;

use crate::config::MailConfig;

/// SMTP mailer for invitation delivery.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    app_base_url: String,
}

impl Mailer {
    /// Build a mailer from SMTP configuration.
    ///
    /// Fails when the host or `From:` address is malformed; callers treat
    /// that as a startup error.
    pub fn new(config: &MailConfig) -> Result<Self, String> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| format!("invalid SMTP host '{}': {e}", config.smtp_host))?
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        let from: Mailbox = config
            .from_address
            .parse()
            .map_err(|e| format!("invalid MAIL_FROM '{}': {e}", config.from_address))?;

        Ok(Self {
            transport,
            from,
            app_base_url: config.app_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send an invitation email with the accept link.
    pub async fn send_invitation(
        &self,
        to: &str,
        organization_name: &str,
        token: &str,
        expires_at: Timestamp,
    ) -> Result<(), String> {
        let to: Mailbox = to
            .parse()
            .map_err(|e| format!("invalid recipient '{to}': {e}"))?;

        let accept_url = format!("{}/sign-up?token={token}", self.app_base_url);
        let body = format!(
            "You have been invited to join {organization_name} on Timewheel.\n\n\
             Accept the invitation here: {accept_url}\n\n\
             This invitation expires on {}.",
            expires_at.format("%Y-%m-%d %H:%M UTC"),
        );

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(format!("You're invited to {organization_name} on Timewheel"))
            .body(body)
            .map_err(|e| format!("failed to build message: {e}"))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("SMTP send failed: {e}"))?;
        Ok(())
    }
}
