//! Error types for mail delivery

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Resend error: {0}")]
    Resend(String),

    #[error("SMTP error: {0}")]
    Smtp(String),

    #[error("Channel error: {0}")]
    Channel(String),

    #[error("Send attempt timed out after {0}s")]
    Timeout(u64),
}
