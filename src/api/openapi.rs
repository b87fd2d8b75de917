//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::account_handler;
use crate::domain::AccountResponse;
use crate::services::HealthStatus;

/// OpenAPI documentation for the Keymint account service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Keymint Account Service",
        version = "0.1.0",
        description = "Account provisioning for the Keymint API key platform",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        account_handler::signup,
    ),
    components(
        schemas(
            AccountResponse,
            HealthStatus,
            account_handler::SignupRequest,
        )
    ),
    tags(
        (name = "Accounts", description = "Account provisioning")
    )
)]
pub struct ApiDoc;
