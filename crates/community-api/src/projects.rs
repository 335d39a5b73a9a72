use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{debug, info};

use community_db::Resource;
use community_types::Project;

use crate::body::parse_fields;
use crate::error::ApiError;
use crate::state::{AppState, delete_resource, run_blocking};
use crate::validate;

pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, ApiError> {
    let projects = run_blocking(&state, |db| db.list_projects()).await?;
    debug!("Listed {} projects", projects.len());
    Ok(Json(projects))
}

pub async fn create_project(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let fields = parse_fields(&body)?;
    let project = validate::project(&fields)?;

    let row = project.clone();
    run_blocking(&state, move |db| db.insert_project(&row)).await?;

    info!("Created project '{}' ({})", project.id, project.title);
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    delete_resource(&state, Resource::Projects, project_id).await
}
