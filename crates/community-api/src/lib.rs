pub mod body;
pub mod error;
pub mod posts;
pub mod projects;
pub mod roles;
pub mod routes;
pub mod state;
pub mod static_files;
pub mod validate;

pub use error::ApiError;
pub use routes::router;
pub use state::{AppState, AppStateInner};
