//! Mail delivery for the Folio backend
//!
//! Two independently configured channels (Resend transactional API, SMTP
//! relay) behind one dispatcher with deterministic API-first fallback, and
//! the axum handler that feeds it.

pub mod channels;
pub mod dispatch;
pub mod errors;
pub mod handlers;

// Re-export commonly used types
pub use channels::{ChannelKind, Envelope, MailChannel, MockChannel, ResendChannel, SmtpChannel};
pub use dispatch::{build_dispatcher, DeliveryOutcome, Dispatcher};
pub use errors::MailError;
