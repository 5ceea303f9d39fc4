//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{OrderPayload, OrderStatusPayload, OrderView};
use crate::models::{OrderSize, OrderStatus};
use crate::user_auth::service::{AuthResponse, LoginRequest, SignupRequest, UserView};

/// Bearer JWT security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_jwt",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Order Service API",
        version = "1.0.0",
        description = "Place, track and manage food orders.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::user_auth::handlers::signup,
        crate::user_auth::handlers::login,
        crate::gateway::handlers::orders::list_orders,
        crate::gateway::handlers::orders::create_order,
        crate::gateway::handlers::orders::get_order,
        crate::gateway::handlers::orders::update_order,
        crate::gateway::handlers::orders::delete_order,
        crate::gateway::handlers::orders::update_order_status,
        crate::gateway::handlers::user_orders::get_user_order,
        crate::gateway::handlers::user_orders::list_user_orders,
    ),
    components(
        schemas(
            HealthResponse,
            OrderSize,
            OrderStatus,
            OrderPayload,
            OrderStatusPayload,
            OrderView,
            SignupRequest,
            LoginRequest,
            UserView,
            AuthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Signup and token issuance"),
        (name = "Orders", description = "Order management (auth required)"),
        (name = "User Orders", description = "Orders of one user (auth required)"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;
