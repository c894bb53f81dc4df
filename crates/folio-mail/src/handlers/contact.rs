//! Contact submission handler

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use tracing::{error, info};

use super::types::{AppState, ContactForm, ErrorResponse, MessageResponse};
use crate::dispatch::DeliveryOutcome;

/// Configure contact routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/contact", post(submit_contact))
}

/// Accept a visitor's contact message and deliver the operator notification
#[utoipa::path(
    tag = "Contact",
    post,
    path = "/contact",
    request_body = ContactForm,
    responses(
        (status = 201, description = "Message accepted", body = MessageResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 500, description = "Delivery failed on every channel", body = ErrorResponse)
    )
)]
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ContactForm>,
) -> Response {
    let message = match form.validate() {
        Ok(message) => message,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                    details: None,
                }),
            )
                .into_response();
        }
    };

    // Audit trail for every validated submission, independent of delivery.
    info!(
        name = %message.name,
        email = %message.email,
        message = %message.message,
        received_at = %Utc::now().to_rfc3339(),
        "New contact message"
    );

    match state.dispatcher.dispatch(&message).await {
        DeliveryOutcome::Delivered(channel) => {
            info!(%channel, "Contact notification delivered");
            (
                StatusCode::CREATED,
                Json(MessageResponse {
                    message: "Message sent. Thanks for reaching out!".to_string(),
                }),
            )
                .into_response()
        }
        DeliveryOutcome::NotConfigured => (
            StatusCode::CREATED,
            Json(MessageResponse {
                message: "Message received, but email delivery is not configured yet.".to_string(),
            }),
        )
            .into_response(),
        DeliveryOutcome::Failed { last_error } => {
            error!("Contact notification failed on every channel: {}", last_error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Your message was received, but the notification email could not be \
                            sent. Please try again later."
                        .to_string(),
                    details: Some(last_error),
                }),
            )
                .into_response()
        }
    }
}
