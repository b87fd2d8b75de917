//! Application route configuration.

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::account_routes;
use super::openapi::ApiDoc;
use super::AppState;
use crate::services::HealthStatus;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness endpoints
        .route("/", get(health))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Account provisioning routes
        .nest("/auth", account_routes())
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: HealthStatus,
    server: &'static str,
    database: &'static str,
}

/// Health check endpoint with store connectivity check.
///
/// Always answers with a response body; a store outage is reported as
/// `unhealthy`, never as a failed request.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let status = state.liveness.check().await;

    let response = HealthResponse {
        status,
        server: "running",
        database: if status.is_healthy() {
            "connected"
        } else {
            "disconnected"
        },
    };

    let status_code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
