//! Wire types for the contact endpoint

use std::sync::Arc;

use folio_core::{ContactMessage, MissingFields};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dispatch::Dispatcher;

/// Shared state for the contact routes.
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}

/// Raw contact submission. Fields are optional so that a missing field is
/// a validation rejection (400) rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ContactForm {
    /// The sole gate before any channel is touched.
    pub fn validate(self) -> Result<ContactMessage, MissingFields> {
        ContactMessage::new(
            self.name.unwrap_or_default(),
            self.email.unwrap_or_default(),
            self.message.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Message sent. Thanks for reaching out!")]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Required fields: name, email, message.")]
    pub error: String,
    /// Diagnostic context, present only for delivery failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
