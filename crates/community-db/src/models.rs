//! Row mapping between SQLite and the community-types models.
//! Column lists here must stay in the order the mappers read them.
use community_types::{Post, Project, Role};
use rusqlite::Row;

/// The three stored collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Posts,
    Projects,
    Roles,
}

impl Resource {
    pub fn table(self) -> &'static str {
        match self {
            Resource::Posts => "posts",
            Resource::Projects => "projects",
            Resource::Roles => "roles",
        }
    }
}

pub(crate) const POST_COLUMNS: &str = "id, title, category, body, createdAt, votes";
pub(crate) const PROJECT_COLUMNS: &str = "id, title, description, tech, github, demo, createdAt";
pub(crate) const ROLE_COLUMNS: &str =
    "id, role, duration, project, skills, contact, notes, createdAt";

pub(crate) fn post_from_row(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        body: row.get(3)?,
        created_at: row.get(4)?,
        votes: row.get(5)?,
    })
}

pub(crate) fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        tech: row.get(3)?,
        github: row.get(4)?,
        demo: row.get(5)?,
        created_at: row.get(6)?,
    })
}

pub(crate) fn role_from_row(row: &Row<'_>) -> rusqlite::Result<Role> {
    Ok(Role {
        id: row.get(0)?,
        role: row.get(1)?,
        duration: row.get(2)?,
        project: row.get(3)?,
        skills: row.get(4)?,
        contact: row.get(5)?,
        notes: row.get(6)?,
        created_at: row.get(7)?,
    })
}
