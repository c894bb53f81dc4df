use clap::Args;
use folio_core::ContactMessage;
use folio_mail::DeliveryOutcome;
use tracing::info;

use super::MailArgs;

/// Manual delivery check: runs the same channels and fallback order as the
/// server, with a fixed test message.
#[derive(Args)]
pub struct TestMailCommand {
    #[command(flatten)]
    pub mail: MailArgs,
}

impl TestMailCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.run())
    }

    async fn run(self) -> anyhow::Result<()> {
        let settings = self.mail.into_settings();

        let Some(recipient) = settings.resolve_recipient() else {
            anyhow::bail!(
                "No recipient configured: set FOLIO_MAIL_TO or FOLIO_MAIL_USER first"
            );
        };
        info!("Sending test message to {}", recipient);

        let dispatcher = folio_mail::build_dispatcher(&settings)?;
        let message = ContactMessage::new(
            "Folio",
            settings
                .smtp
                .username
                .clone()
                .unwrap_or_else(|| "folio@localhost".to_string()),
            "If you received this email, mail delivery is working.",
        )?;

        match dispatcher.dispatch(&message).await {
            DeliveryOutcome::Delivered(channel) => {
                info!(%channel, "Test message delivered");
                Ok(())
            }
            DeliveryOutcome::NotConfigured => {
                anyhow::bail!("Mail delivery is not configured")
            }
            DeliveryOutcome::Failed { last_error } => {
                anyhow::bail!("Test message failed on every channel: {}", last_error)
            }
        }
    }
}
