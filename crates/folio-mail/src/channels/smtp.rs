//! SMTP relay channel

use async_trait::async_trait;
use folio_core::SmtpSettings;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParametersBuilder},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

use super::traits::{ChannelKind, Envelope, MailChannel};
use crate::errors::MailError;

/// Fallback channel: a plain SMTP relay with STARTTLS when available.
///
/// The transport is built once at startup even when the relay is not fully
/// configured; an unconfigured or unreachable relay shows up as a send-time
/// failure, not a startup error.
pub struct SmtpChannel {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    username: Option<String>,
    from_name: Option<String>,
}

impl SmtpChannel {
    pub fn new(settings: &SmtpSettings, from_name: Option<String>) -> Result<Self, MailError> {
        let host = settings.host.clone().unwrap_or_default();

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&host).port(settings.port);

        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            if !username.is_empty() {
                builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
            }
        }

        let mailer = if host.is_empty() {
            // No relay configured; connecting will fail at send time.
            builder.build()
        } else {
            // Opportunistic STARTTLS, self-signed certificates allowed for
            // local relays only.
            let local = host == "localhost" || host == "127.0.0.1";
            let tls = TlsParametersBuilder::new(host.clone())
                .dangerous_accept_invalid_certs(local)
                .dangerous_accept_invalid_hostnames(local)
                .build()
                .map_err(|e| MailError::Smtp(e.to_string()))?;
            builder.tls(Tls::Opportunistic(tls)).build()
        };

        Ok(Self {
            mailer,
            username: settings.username.clone(),
            from_name,
        })
    }

    fn from_mailbox(&self) -> Result<Mailbox, MailError> {
        let address = self.username.as_deref().unwrap_or_default();
        let mailbox = match &self.from_name {
            Some(name) => format!("{} <{}>", name, address).parse(),
            None => address.parse(),
        };
        mailbox.map_err(|e| MailError::Smtp(format!("Invalid sender mailbox {:?}: {}", address, e)))
    }
}

#[async_trait]
impl MailChannel for SmtpChannel {
    async fn send(&self, envelope: &Envelope) -> Result<(), MailError> {
        debug!("Sending email via SMTP to: {}", envelope.to);

        let to: Mailbox = envelope
            .to
            .parse()
            .map_err(|e| MailError::Smtp(format!("Invalid recipient {:?}: {}", envelope.to, e)))?;

        let message = Message::builder()
            .from(self.from_mailbox()?)
            .to(to)
            .subject(envelope.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                envelope.text.clone(),
                envelope.html.clone(),
            ))
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        self.mailer
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        debug!("Email sent via SMTP");

        Ok(())
    }

    fn kind(&self) -> ChannelKind {
        ChannelKind::Smtp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relay_settings() -> SmtpSettings {
        SmtpSettings {
            host: Some("smtp.example.com".to_string()),
            port: 587,
            username: Some("sender@example.com".to_string()),
            password: Some("secret".to_string()),
        }
    }

    #[tokio::test]
    async fn test_builds_without_any_configuration() {
        // Missing host is a send-time failure, not a constructor error.
        let channel = SmtpChannel::new(&SmtpSettings::default(), None);
        assert!(channel.is_ok());
    }

    #[tokio::test]
    async fn test_from_mailbox_uses_display_name() {
        let channel =
            SmtpChannel::new(&relay_settings(), Some("Portfolio".to_string())).unwrap();
        let mailbox = channel.from_mailbox().unwrap();
        assert_eq!(mailbox.to_string(), "Portfolio <sender@example.com>");
    }

    #[tokio::test]
    async fn test_from_mailbox_without_display_name() {
        let channel = SmtpChannel::new(&relay_settings(), None).unwrap();
        let mailbox = channel.from_mailbox().unwrap();
        assert_eq!(mailbox.to_string(), "sender@example.com");
    }

    #[tokio::test]
    async fn test_from_mailbox_fails_without_username() {
        let settings = SmtpSettings {
            host: Some("smtp.example.com".to_string()),
            ..Default::default()
        };
        let channel = SmtpChannel::new(&settings, None).unwrap();
        assert!(matches!(
            channel.from_mailbox().unwrap_err(),
            MailError::Smtp(_)
        ));
    }

    #[tokio::test]
    async fn test_channel_kind() {
        let channel = SmtpChannel::new(&SmtpSettings::default(), None).unwrap();
        assert_eq!(channel.kind(), ChannelKind::Smtp);
    }
}
