//! HTTP API Layer
//!
//! REST API for team account invitations and venue submission checks,
//! built on Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Thin request handlers over `AccountInvitationsService`
//! - **Middleware**: Bearer-token authentication and audit logging
//! - **DTOs**: Request validation and response shapes
//! - **Error Handling**: `ApiError` maps domain errors to status codes
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let service = AccountInvitationsService::new(Arc::new(adapter));
//! let app = create_router(service, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use domain_team::AccountInvitationsService;

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, audit_middleware};
use crate::handlers::{health, invitations, venues};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub invitations: Arc<AccountInvitationsService>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `service` - Invitation service over the configured storage port
/// * `config` - API configuration
pub fn create_router(service: AccountInvitationsService, config: ApiConfig) -> Router {
    let state = AppState {
        invitations: Arc::new(service),
        config,
    };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let account_routes = Router::new()
        .route("/:slug/members", get(invitations::list_members))
        .route(
            "/:slug/invitations",
            get(invitations::list_invitations).post(invitations::send_invitations),
        );

    let invitation_routes = Router::new()
        .route("/accept", post(invitations::accept_invitation))
        .route(
            "/:id",
            put(invitations::update_invitation).delete(invitations::delete_invitation),
        )
        .route("/:id/renew", post(invitations::renew_invitation));

    let venue_routes = Router::new()
        .route("/submissions/validate", post(venues::validate_submission));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/accounts", account_routes)
        .nest("/invitations", invitation_routes)
        .nest("/venues", venue_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
