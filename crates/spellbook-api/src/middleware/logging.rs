//! Access log middleware.
//!
//! Runs outside every route group, so it sees the final response.
//! `authenticate` copies the validated [`AuthContext`] onto the response,
//! which lets each log line name the caller.

use std::time::Instant;

use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};

use spellbook_auth::AuthContext;

/// Logs one line per request with the caller's identity, if any.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let has_bearer = request.headers().contains_key(AUTHORIZATION);
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();
    let caller = caller_of(&response);

    if response.status().is_server_error() {
        warn!(%method, %path, status, elapsed_ms, has_bearer, caller = %caller, "Request failed");
    } else {
        info!(%method, %path, status, elapsed_ms, has_bearer, caller = %caller, "Request served");
    }

    response
}

/// The authenticated account behind a response, or `anonymous`.
fn caller_of(response: &Response) -> String {
    match response.extensions().get::<AuthContext>() {
        Some(ctx) => format!("{}:{}", ctx.account_id, ctx.role),
        None => "anonymous".to_string(),
    }
}
