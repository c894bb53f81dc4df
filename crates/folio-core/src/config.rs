//! Mail delivery configuration
//!
//! One immutable snapshot loaded at process startup and shared read-only by
//! every request. Nothing here is re-read from the environment at call time.

use serde::{Deserialize, Serialize};

fn default_smtp_port() -> u16 {
    587
}

fn default_send_timeout_secs() -> u64 {
    20
}

/// SMTP relay settings.
///
/// Presence is not validated at startup: a missing host or missing
/// credentials surface as a send-time failure, matching how an unreachable
/// relay would behave.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpSettings {
    pub host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: None,
            port: default_smtp_port(),
            username: None,
            password: None,
        }
    }
}

/// Transactional email API settings (Resend-style).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiChannelSettings {
    pub api_key: Option<String>,
    /// Sender address verified with the API provider.
    pub from_address: Option<String>,
}

impl ApiChannelSettings {
    /// The channel is usable only when both the key and a verified sender
    /// address are present.
    pub fn configured(&self) -> Option<(&str, &str)> {
        match (self.api_key.as_deref(), self.from_address.as_deref()) {
            (Some(key), Some(from)) if !key.is_empty() && !from.is_empty() => Some((key, from)),
            _ => None,
        }
    }
}

/// Process-wide mail settings, read once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MailSettings {
    pub smtp: SmtpSettings,
    pub api: ApiChannelSettings,
    /// Display name used in the From header of notification emails.
    pub from_name: Option<String>,
    /// Where operator notifications go. Falls back to the SMTP username.
    pub recipient_override: Option<String>,
    /// Upper bound for a single channel send attempt.
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,
}

impl MailSettings {
    /// Resolve the notification recipient: the configured override, else the
    /// SMTP sender mailbox. `None` means delivery is not configured at all.
    pub fn resolve_recipient(&self) -> Option<String> {
        self.recipient_override
            .clone()
            .filter(|addr| !addr.is_empty())
            .or_else(|| self.smtp.username.clone().filter(|addr| !addr.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smtp_defaults() {
        let settings = SmtpSettings::default();
        assert_eq!(settings.port, 587);
        assert!(settings.host.is_none());
        assert!(settings.username.is_none());
    }

    #[test]
    fn test_api_channel_requires_both_values() {
        let mut api = ApiChannelSettings::default();
        assert!(api.configured().is_none());

        api.api_key = Some("re_123".to_string());
        assert!(api.configured().is_none());

        api.from_address = Some("noreply@example.com".to_string());
        assert_eq!(api.configured(), Some(("re_123", "noreply@example.com")));
    }

    #[test]
    fn test_api_channel_empty_strings_do_not_count() {
        let api = ApiChannelSettings {
            api_key: Some(String::new()),
            from_address: Some("noreply@example.com".to_string()),
        };
        assert!(api.configured().is_none());
    }

    #[test]
    fn test_recipient_prefers_override() {
        let settings = MailSettings {
            smtp: SmtpSettings {
                username: Some("sender@example.com".to_string()),
                ..Default::default()
            },
            recipient_override: Some("ops@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(
            settings.resolve_recipient(),
            Some("ops@example.com".to_string())
        );
    }

    #[test]
    fn test_recipient_falls_back_to_smtp_username() {
        let settings = MailSettings {
            smtp: SmtpSettings {
                username: Some("sender@example.com".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            settings.resolve_recipient(),
            Some("sender@example.com".to_string())
        );
    }

    #[test]
    fn test_recipient_unresolvable_when_nothing_configured() {
        let settings = MailSettings::default();
        assert!(settings.resolve_recipient().is_none());

        let settings = MailSettings {
            recipient_override: Some(String::new()),
            ..Default::default()
        };
        assert!(settings.resolve_recipient().is_none());
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: MailSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.smtp.port, 587);
        assert_eq!(settings.send_timeout_secs, 20);
        assert!(settings.resolve_recipient().is_none());
    }
}
