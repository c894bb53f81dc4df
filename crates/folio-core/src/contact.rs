//! Validated contact messages

use thiserror::Error;

/// Rejection for a contact submission with a missing or empty field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Required fields: name, email, message.")]
pub struct MissingFields;

/// A contact message that passed validation: all three fields present and
/// non-empty. This is the only shape the dispatcher accepts.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    /// Validate raw field values. Values are checked as-is: no trimming and
    /// no email format check beyond non-emptiness.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, MissingFields> {
        let (name, email, message) = (name.into(), email.into(), message.into());
        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(MissingFields);
        }
        Ok(Self {
            name,
            email,
            message,
        })
    }
}
