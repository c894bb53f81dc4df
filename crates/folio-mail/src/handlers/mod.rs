//! HTTP handlers for the contact endpoint

mod contact;
mod types;

pub use contact::{routes, submit_contact};
pub use types::{AppState, ContactForm, ErrorResponse, MessageResponse};

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(contact::submit_contact),
    components(schemas(ContactForm, MessageResponse, ErrorResponse))
)]
pub struct ContactApiDoc;
