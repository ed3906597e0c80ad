// SPDX-License-Identifier: MIT

//! Trigger authentication middleware.
//!
//! The sync triggers are machine-called (Cloud Scheduler or an
//! operator), not user-facing: the caller presents a shared secret as
//! a bearer token. There is no per-user principal to extract.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Middleware that requires the sync trigger token.
///
/// Rejections go through [`AppError`] so the caller sees the same JSON
/// error body the handlers produce.
pub async fn require_sync_token(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(h) if h.starts_with("Bearer ") => &h[7..],
        _ => return Err(AppError::Unauthorized),
    };

    if token != state.config.sync_trigger_token {
        tracing::warn!("Rejected sync trigger with invalid token");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
