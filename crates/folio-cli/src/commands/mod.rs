mod serve;
mod test_mail;

pub use serve::ServeCommand;
pub use test_mail::TestMailCommand;

use clap::Args;
use folio_core::{ApiChannelSettings, MailSettings, SmtpSettings};

/// Mail configuration shared by `serve` and `test-mail`. Read once at
/// startup into an immutable settings snapshot.
#[derive(Args, Clone)]
pub struct MailArgs {
    /// SMTP relay host
    #[arg(long, env = "FOLIO_MAIL_HOST")]
    pub mail_host: Option<String>,

    /// SMTP relay port
    #[arg(long, default_value_t = 587, env = "FOLIO_MAIL_PORT")]
    pub mail_port: u16,

    /// SMTP username, also the sender mailbox and default recipient
    #[arg(long, env = "FOLIO_MAIL_USER")]
    pub mail_user: Option<String>,

    /// SMTP password
    #[arg(long, env = "FOLIO_MAIL_PASS")]
    pub mail_pass: Option<String>,

    /// Where operator notifications go (defaults to the SMTP username)
    #[arg(long, env = "FOLIO_MAIL_TO")]
    pub mail_to: Option<String>,

    /// Display name used in the From header
    #[arg(long, env = "FOLIO_MAIL_FROM_NAME")]
    pub mail_from_name: Option<String>,

    /// Resend API key (enables the transactional API channel)
    #[arg(long, env = "FOLIO_RESEND_API_KEY")]
    pub resend_api_key: Option<String>,

    /// Sender address verified with Resend
    #[arg(long, env = "FOLIO_MAIL_FROM")]
    pub mail_from: Option<String>,

    /// Timeout for a single channel send attempt, in seconds
    #[arg(long, default_value_t = 20, env = "FOLIO_SEND_TIMEOUT_SECS")]
    pub send_timeout_secs: u64,
}

impl MailArgs {
    pub fn into_settings(self) -> MailSettings {
        MailSettings {
            smtp: SmtpSettings {
                host: self.mail_host,
                port: self.mail_port,
                username: self.mail_user,
                password: self.mail_pass,
            },
            api: ApiChannelSettings {
                api_key: self.resend_api_key,
                from_address: self.mail_from,
            },
            from_name: self.mail_from_name,
            recipient_override: self.mail_to,
            send_timeout_secs: self.send_timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> MailArgs {
        MailArgs {
            mail_host: Some("smtp.example.com".to_string()),
            mail_port: 2525,
            mail_user: Some("sender@example.com".to_string()),
            mail_pass: Some("secret".to_string()),
            mail_to: None,
            mail_from_name: Some("Portfolio".to_string()),
            resend_api_key: Some("re_123".to_string()),
            mail_from: Some("noreply@example.com".to_string()),
            send_timeout_secs: 20,
        }
    }

    #[test]
    fn test_args_map_into_settings() {
        let settings = args().into_settings();

        assert_eq!(settings.smtp.host.as_deref(), Some("smtp.example.com"));
        assert_eq!(settings.smtp.port, 2525);
        assert!(settings.api.configured().is_some());
        assert_eq!(
            settings.resolve_recipient().as_deref(),
            Some("sender@example.com")
        );
    }
}
