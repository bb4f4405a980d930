use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use guidegate_core::{auth::AuthError, AppState};

use crate::error::ApiError;

/// A request whose bearer token passed the configured verifier.
pub struct AuthUser {
    pub subject: String,
}

fn extract_bearer(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?
        .strip_prefix("Bearer ")
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let result = extract_bearer(parts)
            .ok_or(AuthError::MissingCredentials)
            .and_then(|token| state.verifier.verify(token));

        match result {
            Ok(principal) => Ok(AuthUser {
                subject: principal.subject,
            }),
            Err(e) => {
                tracing::warn!(path = %parts.uri.path(), "Rejected request: {}", e);
                Err(ApiError::Unauthorized)
            }
        }
    }
}

const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    ("cache-control", "public, max-age=3600"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
];

fn apply_security_headers(response: &mut Response) {
    let headers = response.headers_mut();
    for (name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(*name),
            HeaderValue::from_static(*value),
        );
    }
}

/// Rejects directory-style paths and stamps security headers on every
/// response.
pub async fn security_headers(req: Request, next: Next) -> Response {
    let mut response = if req.uri().path().ends_with('/') {
        tracing::debug!(path = %req.uri().path(), "Rejected trailing-slash path");
        (StatusCode::NOT_FOUND, "404 page not found").into_response()
    } else {
        next.run(req).await
    };
    apply_security_headers(&mut response);
    response
}
