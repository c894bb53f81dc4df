//! Outbound mail channels
//!
//! Each channel is an independently configured transport with a single
//! `send` capability. The dispatcher decides which one runs and in which
//! order; channels know nothing about each other.

pub mod mock;
pub mod resend;
pub mod smtp;
pub mod traits;

pub use mock::MockChannel;
pub use resend::ResendChannel;
pub use smtp::SmtpChannel;
pub use traits::{ChannelKind, Envelope, MailChannel};
