use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{debug, info, warn};

use community_db::Resource;
use community_types::Post;

use crate::body::parse_fields;
use crate::error::ApiError;
use crate::state::{AppState, delete_resource, run_blocking};
use crate::validate;

pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = run_blocking(&state, |db| db.list_posts()).await?;
    debug!("Listed {} posts", posts.len());
    Ok(Json(posts))
}

pub async fn create_post(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let fields = parse_fields(&body)?;
    let post = validate::post(&fields)?;

    let row = post.clone();
    run_blocking(&state, move |db| db.insert_post(&row)).await?;

    info!("Created post '{}' in {}", post.id, post.category);
    Ok((StatusCode::CREATED, Json(post)))
}

/// POST /api/posts/{id}/upvote — the body, if any, is ignored.
pub async fn upvote_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let id = post_id.clone();
    let post = run_blocking(&state, move |db| db.upvote_post(&id))
        .await?
        .ok_or_else(|| {
            warn!("Upvote of unknown post '{}'", post_id);
            ApiError::NotFound
        })?;

    debug!("Post '{}' now has {} votes", post.id, post.votes);
    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    delete_resource(&state, Resource::Posts, post_id).await
}
