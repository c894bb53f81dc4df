//! Mail channel trait definitions

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::MailError;

/// The configured outbound transports, in preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    /// Resend transactional email API
    Resend,
    /// Direct SMTP relay
    Smtp,
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelKind::Resend => write!(f, "resend"),
            ChannelKind::Smtp => write!(f, "smtp"),
        }
    }
}

/// One outbound email. The sender address is the channel's own concern:
/// the API channel uses its verified sender, SMTP uses its mailbox.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// A single-operation capability: deliver one envelope, or say why not.
#[async_trait]
pub trait MailChannel: Send + Sync {
    async fn send(&self, envelope: &Envelope) -> Result<(), MailError>;

    fn kind(&self) -> ChannelKind;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_kind_display() {
        assert_eq!(ChannelKind::Resend.to_string(), "resend");
        assert_eq!(ChannelKind::Smtp.to_string(), "smtp");
    }

    #[test]
    fn test_channel_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&ChannelKind::Resend).unwrap(),
            "\"resend\""
        );
        assert_eq!(serde_json::to_string(&ChannelKind::Smtp).unwrap(), "\"smtp\"");
    }
}
