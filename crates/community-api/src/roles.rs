use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{debug, info};

use community_db::Resource;
use community_types::Role;

use crate::body::parse_fields;
use crate::error::ApiError;
use crate::state::{AppState, delete_resource, run_blocking};
use crate::validate;

pub async fn list_roles(State(state): State<AppState>) -> Result<Json<Vec<Role>>, ApiError> {
    let roles = run_blocking(&state, |db| db.list_roles()).await?;
    debug!("Listed {} roles", roles.len());
    Ok(Json(roles))
}

/// `project` is stored as given; it need not name an existing project.
pub async fn create_role(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let fields = parse_fields(&body)?;
    let role = validate::role(&fields)?;

    let row = role.clone();
    run_blocking(&state, move |db| db.insert_role(&row)).await?;

    info!("Created role '{}' for {}", role.id, role.project);
    Ok((StatusCode::CREATED, Json(role)))
}

pub async fn delete_role(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    delete_resource(&state, Resource::Roles, role_id).await
}
