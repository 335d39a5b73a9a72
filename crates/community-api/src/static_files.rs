use std::path::{Component, Path as FsPath, PathBuf};

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Served for `GET /`.
pub const LANDING_DOCUMENT: &str = "community.html";

pub async fn landing(State(state): State<AppState>) -> Result<Response, ApiError> {
    serve(&state.static_root, LANDING_DOCUMENT).await
}

/// GET /{*path} — `path` arrives percent-decoded.
pub async fn asset(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    let relative = path.trim_start_matches('/');
    if relative == "api" || relative.starts_with("api/") {
        return Err(ApiError::NotFound);
    }
    serve(&state.static_root, relative).await
}

/// Join `requested` onto `root`, refusing anything that could climb out of it.
pub fn resolve(root: &FsPath, requested: &str) -> Result<PathBuf, ApiError> {
    let relative = FsPath::new(requested.trim_start_matches('/'));

    for component in relative.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                warn!("Rejected static path '{}'", requested);
                return Err(ApiError::Forbidden);
            }
        }
    }

    Ok(root.join(relative))
}

pub fn content_type(path: &FsPath) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "json" => "application/json",
        "txt" => "text/plain; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

async fn serve(root: &FsPath, requested: &str) -> Result<Response, ApiError> {
    let candidate = resolve(root, requested)?;

    let root = tokio::fs::canonicalize(root)
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("static root {}: {}", root.display(), e)))?;

    // Missing files fail to canonicalize.
    let file = tokio::fs::canonicalize(&candidate)
        .await
        .map_err(|_| ApiError::NotFound)?;

    // A symlink inside the root may still point outside it.
    if !file.starts_with(&root) {
        warn!("Static path '{}' resolves outside the root", requested);
        return Err(ApiError::Forbidden);
    }

    let metadata = tokio::fs::metadata(&file).await.map_err(|_| ApiError::NotFound)?;
    if !metadata.is_file() {
        return Err(ApiError::NotFound);
    }

    let data = tokio::fs::read(&file)
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("reading {}: {}", file.display(), e)))?;

    Ok(([(header::CONTENT_TYPE, content_type(&file))], data).into_response())
}
