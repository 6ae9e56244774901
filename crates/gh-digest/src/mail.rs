//! Email delivery over SMTP.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::{MailConfig, SmtpSecurity};
use crate::digest::DigestMessage;
use crate::error::MailError;

/// Connection timeout for the SMTP session.
pub const SMTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Delivers a rendered digest.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver the message. An `Ok` means the server accepted it.
    async fn send(&self, message: &DigestMessage) -> Result<(), MailError>;
}

/// Email sender for notification digests.
pub struct EmailSender {
    config: MailConfig,
}

impl EmailSender {
    /// Create a new email sender with the given configuration.
    #[must_use]
    pub const fn new(config: MailConfig) -> Self {
        Self { config }
    }

    /// `From` mailbox: the configured display name and the SMTP user.
    fn from_mailbox(&self) -> Result<Mailbox, MailError> {
        let address: Address = self.config.smtp_username.parse()?;
        Ok(Mailbox::new(Some(self.config.from_name.clone()), address))
    }

    /// Assemble the multipart message with plain-text and HTML parts.
    fn build_message(&self, message: &DigestMessage) -> Result<Message, MailError> {
        let to: Mailbox = self.config.to_email.parse()?;

        let email = Message::builder()
            .from(self.from_mailbox()?)
            .to(to)
            .subject(message.subject.as_str())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(message.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(message.html_body.clone()),
                    ),
            )?;

        Ok(email)
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let creds = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );

        let builder = match self.config.security {
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)?,
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
            }
        };

        Ok(builder
            .port(self.config.smtp_port)
            .credentials(creds)
            .timeout(Some(SMTP_TIMEOUT))
            .build())
    }

    /// Send a short fixed message to verify the SMTP settings.
    pub async fn send_test(&self) -> Result<(), MailError> {
        let text_body = "gh-digest - Test Email\n\n\
            ✅ Email configuration is working!\n\n\
            If you're seeing this, SMTP is configured correctly.\n";

        let message = DigestMessage {
            subject: "gh-digest - Test Email".to_string(),
            text_body: text_body.to_string(),
            html_body: crate::digest::render_html(&[text_body.to_string()]),
        };

        self.send(&message).await
    }
}

#[async_trait]
impl MailTransport for EmailSender {
    async fn send(&self, message: &DigestMessage) -> Result<(), MailError> {
        let email = self.build_message(message)?;
        let mailer = self.transport()?;

        mailer.send(email).await?;

        tracing::info!(
            to = %self.config.to_email,
            host = %self.config.smtp_host,
            subject = %message.subject,
            "Email sent successfully"
        );

        Ok(())
    }
}
