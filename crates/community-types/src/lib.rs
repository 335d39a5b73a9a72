pub mod models;

pub use models::{Post, Project, Role};
