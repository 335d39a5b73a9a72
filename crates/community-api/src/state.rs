use std::path::PathBuf;
use std::sync::Arc;

use axum::http::StatusCode;
use tracing::{error, info, warn};

use community_db::{Database, Resource, StoreError};

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    /// Directory served for non-API GET requests.
    pub static_root: PathBuf,
}

/// Run a store operation on the blocking pool. The store lock is held only
/// inside `f`.
pub(crate) async fn run_blocking<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(anyhow::anyhow!("blocking task failed: {}", e))
        })?
        .map_err(ApiError::from)
}

/// Shared DELETE behaviour: 204 when a row went away, 404 otherwise.
pub(crate) async fn delete_resource(
    state: &AppState,
    resource: Resource,
    id: String,
) -> Result<StatusCode, ApiError> {
    let target = id.clone();
    let removed = run_blocking(state, move |db| db.delete_by_id(resource, &target)).await?;

    if removed == 0 {
        warn!("Delete of unknown {} id '{}'", resource.table(), id);
        return Err(ApiError::NotFound);
    }

    info!("Deleted {} '{}'", resource.table(), id);
    Ok(StatusCode::NO_CONTENT)
}
