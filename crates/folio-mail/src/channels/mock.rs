//! Mock mail channel for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::traits::{ChannelKind, Envelope, MailChannel};
use crate::errors::MailError;

/// Mock channel recording every send. Clones share the same counters, so a
/// handle kept by a test keeps observing a clone handed to the dispatcher.
#[derive(Debug, Clone)]
pub struct MockChannel {
    kind: ChannelKind,
    send_count: Arc<AtomicUsize>,
    sent: Arc<Mutex<Vec<Envelope>>>,
    should_fail: bool,
    failure: String,
}

impl MockChannel {
    pub fn new(kind: ChannelKind) -> Self {
        Self {
            kind,
            send_count: Arc::new(AtomicUsize::new(0)),
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail: false,
            failure: "Mock send failure".to_string(),
        }
    }

    pub fn with_failure(mut self, failure: impl Into<String>) -> Self {
        self.should_fail = true;
        self.failure = failure.into();
        self
    }

    pub fn send_call_count(&self) -> usize {
        self.send_count.load(Ordering::SeqCst)
    }

    pub fn sent_envelopes(&self) -> Vec<Envelope> {
        self.sent.lock().expect("mock envelope lock poisoned").clone()
    }
}

#[async_trait]
impl MailChannel for MockChannel {
    async fn send(&self, envelope: &Envelope) -> Result<(), MailError> {
        self.send_count.fetch_add(1, Ordering::SeqCst);
        self.sent
            .lock()
            .expect("mock envelope lock poisoned")
            .push(envelope.clone());

        if self.should_fail {
            return Err(MailError::Channel(self.failure.clone()));
        }

        Ok(())
    }

    fn kind(&self) -> ChannelKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_envelope() -> Envelope {
        Envelope {
            to: "ops@example.com".to_string(),
            subject: "Test".to_string(),
            text: "text".to_string(),
            html: "<p>text</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_records_sends() {
        let channel = MockChannel::new(ChannelKind::Resend);

        channel.send(&test_envelope()).await.unwrap();
        channel.send(&test_envelope()).await.unwrap();

        assert_eq!(channel.send_call_count(), 2);
        assert_eq!(channel.sent_envelopes().len(), 2);
        assert_eq!(channel.sent_envelopes()[0].to, "ops@example.com");
    }

    #[tokio::test]
    async fn test_mock_failure_still_counts() {
        let channel = MockChannel::new(ChannelKind::Smtp).with_failure("relay down");

        let err = channel.send(&test_envelope()).await.unwrap_err();

        assert!(err.to_string().contains("relay down"));
        assert_eq!(channel.send_call_count(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_counters() {
        let channel = MockChannel::new(ChannelKind::Smtp);
        let clone = channel.clone();

        clone.send(&test_envelope()).await.unwrap();

        assert_eq!(channel.send_call_count(), 1);
    }
}
