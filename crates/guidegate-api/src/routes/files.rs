use std::path::Path;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use guidegate_core::{guides::GuideError, AppState};
use guidegate_util::content::{attachment_disposition, content_type_for};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Name of the fixed document behind the public endpoint, inside the static
/// directory.
pub const PUBLIC_GUIDE_FILENAME: &str = "user-guide.pdf";

/// Hand `path` to `ServeFile` and label the result as a download of
/// `filename`. Conditional and range requests are answered by `ServeFile`.
async fn send_file(path: &Path, filename: &str, req: Request) -> Result<Response, ApiError> {
    let response = ServeFile::new(path)
        .oneshot(req)
        .await
        .unwrap_or_else(|never| match never {});

    if response.status() == StatusCode::NOT_FOUND {
        tracing::warn!("File vanished before it could be served: {}", path.display());
        return Err(ApiError::NotFound);
    }

    let mut response = response.map(Body::new);
    if response.status().is_success() {
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(content_type_for(filename)),
        );
        let disposition = HeaderValue::from_str(&attachment_disposition(filename))
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("bad disposition header: {e}")))?;
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }
    Ok(response)
}

/// Serves the operator-managed public guide. The location is fixed, so the
/// filename validator is not involved.
pub async fn public_download(
    State(state): State<AppState>,
    req: Request,
) -> Result<Response, ApiError> {
    let path = state.config.static_path.join(PUBLIC_GUIDE_FILENAME);
    tracing::debug!("Public user guide download: {}", path.display());
    send_file(&path, PUBLIC_GUIDE_FILENAME, req).await
}

/// Serves the configured user guide after validation and containment checks.
pub async fn download_user_guide(
    State(state): State<AppState>,
    auth: AuthUser,
    req: Request,
) -> Result<Response, ApiError> {
    // Pipeline rejections are logged by `GuideService::locate`.
    let guide = state.guides.resolve().await.map_err(|e| {
        if let GuideError::Internal(_) = e {
            tracing::error!("User guide lookup failed: {}", e);
        }
        ApiError::NotFound
    })?;

    tracing::debug!(
        subject = %auth.subject,
        "Serving user guide: {}",
        guide.filename
    );
    send_file(&guide.path, guide.filename.as_str(), req).await
}
