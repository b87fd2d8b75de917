//! Account provisioning handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::AccountResponse;
use crate::errors::AppResult;

/// Account signup request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    /// Account email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Account password
    #[validate(length(min = 1, message = "Password must not be empty"))]
    #[schema(example = "SecurePass123!", min_length = 1)]
    pub password: String,
}

/// Create account routes
pub fn account_routes() -> Router<AppState> {
    Router::new().route("/signup", post(signup))
}

/// Provision a new account
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "Accounts",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account provisioned successfully", body = AccountResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Account already exists")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    let account = state
        .provisioning
        .provision(payload.email, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}
