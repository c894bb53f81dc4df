//! Fallback dispatcher
//!
//! Delivery runs as a small state machine:
//! `TryPrimary -> TrySecondary -> Succeeded | ExhaustedFailed`, with an
//! early `NotConfigured` exit when no recipient resolves. One attempt per
//! channel per request; the only retry is the single fallback hop.

use std::sync::Arc;
use std::time::Duration;

use folio_core::{ContactMessage, MailSettings};
use tracing::{debug, error, info};

use crate::channels::{ChannelKind, Envelope, MailChannel, ResendChannel, SmtpChannel};
use crate::errors::MailError;

const CONTACT_SUBJECT: &str = "New contact message from the portfolio";

/// Terminal result of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Exactly one channel accepted the message.
    Delivered(ChannelKind),
    /// No recipient is configured; the message was logged but not sent.
    NotConfigured,
    /// Every channel in the fallback order failed; carries the last
    /// channel's error.
    Failed { last_error: String },
}

enum DispatchState {
    TryPrimary,
    TrySecondary,
    Done(DeliveryOutcome),
}

/// Orders the channels and absorbs every failure except the last one.
///
/// `primary` is `None` when the API channel is not configured: that is a
/// skip, not a failure, and the fallback still runs.
pub struct Dispatcher {
    primary: Option<Arc<dyn MailChannel>>,
    secondary: Arc<dyn MailChannel>,
    recipient: Option<String>,
    send_timeout: Duration,
}

impl Dispatcher {
    pub fn new(
        primary: Option<Arc<dyn MailChannel>>,
        secondary: Arc<dyn MailChannel>,
        recipient: Option<String>,
        send_timeout: Duration,
    ) -> Self {
        Self {
            primary,
            secondary,
            recipient,
            send_timeout,
        }
    }

    /// Attempt delivery of one contact message. Never returns an error:
    /// every outcome, including total failure, is a `DeliveryOutcome`.
    pub async fn dispatch(&self, message: &ContactMessage) -> DeliveryOutcome {
        // Start state: without a resolvable recipient there is nothing to
        // attempt, and that is reported as accepted-but-unconfigured.
        let Some(to) = self.recipient.as_deref() else {
            info!("No notification recipient configured, message accepted without delivery");
            return DeliveryOutcome::NotConfigured;
        };

        let envelope = notification_envelope(message, to);
        let mut state = DispatchState::TryPrimary;
        loop {
            state = match state {
                DispatchState::TryPrimary => self.on_try_primary(&envelope).await,
                DispatchState::TrySecondary => self.on_try_secondary(&envelope).await,
                DispatchState::Done(outcome) => return outcome,
            };
        }
    }

    async fn on_try_primary(&self, envelope: &Envelope) -> DispatchState {
        let Some(channel) = &self.primary else {
            debug!("Primary channel not configured, skipping to fallback");
            return DispatchState::TrySecondary;
        };

        match self.attempt(channel.as_ref(), envelope).await {
            Ok(()) => DispatchState::Done(DeliveryOutcome::Delivered(channel.kind())),
            Err(e) => {
                // Swallowed: a primary failure only forces the fallback.
                error!(channel = %channel.kind(), "Primary channel failed, falling back: {}", e);
                DispatchState::TrySecondary
            }
        }
    }

    async fn on_try_secondary(&self, envelope: &Envelope) -> DispatchState {
        match self.attempt(self.secondary.as_ref(), envelope).await {
            Ok(()) => DispatchState::Done(DeliveryOutcome::Delivered(self.secondary.kind())),
            Err(e) => {
                error!(channel = %self.secondary.kind(), "Last channel failed: {}", e);
                DispatchState::Done(DeliveryOutcome::Failed {
                    last_error: e.to_string(),
                })
            }
        }
    }

    async fn attempt(
        &self,
        channel: &dyn MailChannel,
        envelope: &Envelope,
    ) -> Result<(), MailError> {
        match tokio::time::timeout(self.send_timeout, channel.send(envelope)).await {
            Ok(result) => result,
            Err(_) => Err(MailError::Timeout(self.send_timeout.as_secs())),
        }
    }
}

/// Build the dispatcher from the startup settings snapshot: Resend first
/// when configured, SMTP always as the fallback.
pub fn build_dispatcher(settings: &MailSettings) -> Result<Dispatcher, MailError> {
    let primary = settings.api.configured().map(|(api_key, from_address)| {
        Arc::new(ResendChannel::new(
            api_key,
            from_address,
            settings.from_name.clone(),
        )) as Arc<dyn MailChannel>
    });

    let secondary =
        Arc::new(SmtpChannel::new(&settings.smtp, settings.from_name.clone())?) as Arc<dyn MailChannel>;

    Ok(Dispatcher::new(
        primary,
        secondary,
        settings.resolve_recipient(),
        Duration::from_secs(settings.send_timeout_secs),
    ))
}

/// The operator notification for one contact message.
pub(crate) fn notification_envelope(message: &ContactMessage, to: &str) -> Envelope {
    Envelope {
        to: to.to_string(),
        subject: CONTACT_SUBJECT.to_string(),
        text: format!(
            "Name: {}\nEmail: {}\nMessage:\n{}",
            message.name, message.email, message.message
        ),
        html: format!(
            "<p><strong>Name:</strong> {}</p>\n<p><strong>Email:</strong> {}</p>\n<p><strong>Message:</strong><br/>{}</p>",
            message.name, message.email, message.message
        ),
    }
}
