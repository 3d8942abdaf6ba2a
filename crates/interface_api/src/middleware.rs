//! Request middleware: bearer authentication and the audit log

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use crate::auth::{validate_token, Claims};
use crate::error::ApiError;
use crate::AppState;

/// Rejects requests without a valid bearer token
///
/// The decoded [`Claims`] go into the request extensions, where the
/// `AuthUser` extractor and [`audit_middleware`] pick them up.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = bearer_token(&request) else {
        warn!(uri = %request.uri(), "Request without bearer token");
        return Err(ApiError::Unauthorized);
    };

    let claims = validate_token(token, &state.config.jwt_secret).map_err(|e| {
        warn!(error = %e, "Token validation failed");
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

fn bearer_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Logs one line per API request with the caller and outcome
///
/// Runs inside [`auth_middleware`], so the caller is always known.
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let caller = request
        .extensions()
        .get::<Claims>()
        .map_or_else(|| "anonymous".to_owned(), |claims| claims.sub.clone());

    let started = Instant::now();
    let response = next.run(request).await;

    info!(
        %method,
        path = %path,
        user = %caller,
        status = response.status().as_u16(),
        duration_ms = started.elapsed().as_millis() as u64,
        "API request"
    );

    response
}
