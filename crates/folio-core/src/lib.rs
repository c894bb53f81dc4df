//! Core configuration and domain types shared across all Folio crates

pub mod config;
pub mod contact;

// Re-export commonly used types
pub use config::{ApiChannelSettings, MailSettings, SmtpSettings};
pub use contact::{ContactMessage, MissingFields};
