use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::error::ApiError;
use crate::state::AppState;
use crate::{posts, projects, roles, static_files};

/// The full HTTP surface: the JSON API plus static assets for every other GET.
///
/// Each API path is registered with and without a trailing slash. A path that
/// exists under another method answers 404, same as an unknown path.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Posts
        .route("/api/posts", get(posts::list_posts).post(posts::create_post))
        .route("/api/posts/", get(posts::list_posts).post(posts::create_post))
        .route("/api/posts/{id}", delete(posts::delete_post))
        .route("/api/posts/{id}/", delete(posts::delete_post))
        .route("/api/posts/{id}/upvote", post(posts::upvote_post))
        .route("/api/posts/{id}/upvote/", post(posts::upvote_post))
        // Projects
        .route("/api/projects", get(projects::list_projects).post(projects::create_project))
        .route("/api/projects/", get(projects::list_projects).post(projects::create_project))
        .route("/api/projects/{id}", delete(projects::delete_project))
        .route("/api/projects/{id}/", delete(projects::delete_project))
        // Roles
        .route("/api/roles", get(roles::list_roles).post(roles::create_role))
        .route("/api/roles/", get(roles::list_roles).post(roles::create_role))
        .route("/api/roles/{id}", delete(roles::delete_role))
        .route("/api/roles/{id}/", delete(roles::delete_role))
        // Static assets
        .route("/", get(static_files::landing))
        .route("/{*path}", get(static_files::asset))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
