use std::sync::Arc;

use axum::{routing::get, Json, Router};
use clap::Args;
use folio_mail::handlers::{self, AppState, ContactApiDoc, MessageResponse};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use utoipa::OpenApi;

use super::MailArgs;

#[derive(Args)]
pub struct ServeCommand {
    /// Address to bind the server to
    #[arg(long, default_value = "0.0.0.0:3333", env = "FOLIO_ADDRESS")]
    pub address: String,

    #[command(flatten)]
    pub mail: MailArgs,
}

impl ServeCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.run())
    }

    async fn run(self) -> anyhow::Result<()> {
        let settings = self.mail.into_settings();
        if settings.resolve_recipient().is_none() {
            warn!("No notification recipient configured; contact messages will only be logged");
        }

        let dispatcher = folio_mail::build_dispatcher(&settings)?;
        let app = router(AppState::new(dispatcher));

        let listener = tokio::net::TcpListener::bind(&self.address).await?;
        info!("Folio backend listening on {}", self.address);
        axum::serve(listener, app).await?;

        Ok(())
    }
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/openapi.json", get(openapi))
        .merge(handlers::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Static readiness payload
async fn health() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Folio backend is running".to_string(),
    })
}

/// OpenAPI document for the contact API
async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ContactApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use folio_core::MailSettings;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let dispatcher = folio_mail::build_dispatcher(&MailSettings::default()).unwrap();
        router(AppState::new(dispatcher))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = test_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["message"].as_str().unwrap().contains("running"));
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["paths"]["/contact"]["post"].is_object());
    }

    #[tokio::test]
    async fn test_contact_route_is_mounted() {
        // Delivery is unconfigured here, so a valid submission is accepted
        // without any send being attempted.
        let request = Request::builder()
            .method("POST")
            .uri("/contact")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"name":"Ana","email":"a@x.com","message":"Hi"}"#,
            ))
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
