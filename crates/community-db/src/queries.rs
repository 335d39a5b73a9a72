use community_types::{Post, Project, Role};
use rusqlite::{Connection, OptionalExtension, Row};

use crate::models::{
    POST_COLUMNS, PROJECT_COLUMNS, ROLE_COLUMNS, Resource, post_from_row, project_from_row,
    role_from_row,
};
use crate::{Database, StoreError};

type Result<T> = std::result::Result<T, StoreError>;

impl Database {
    // -- Posts --

    pub fn list_posts(&self) -> Result<Vec<Post>> {
        self.with_conn(|conn| query_all(conn, Resource::Posts, POST_COLUMNS, post_from_row))
    }

    pub fn insert_post(&self, post: &Post) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO posts (id, title, category, body, createdAt, votes) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    post.id,
                    post.title,
                    post.category,
                    post.body,
                    post.created_at,
                    post.votes
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_post(&self, id: &str) -> Result<Option<Post>> {
        self.with_conn(|conn| query_by_id(conn, Resource::Posts, POST_COLUMNS, id, post_from_row))
    }

    /// Add one vote. Returns the number of rows touched (0 when the id is unknown).
    pub fn increment_votes(&self, id: &str) -> Result<usize> {
        self.with_conn(|conn| increment_votes(conn, id))
    }

    /// Add one vote and read the post back in the same critical section, so
    /// the returned count includes this vote and no later one.
    pub fn upvote_post(&self, id: &str) -> Result<Option<Post>> {
        self.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            if increment_votes(&tx, id)? == 0 {
                return Ok(None);
            }
            let post = query_by_id(&tx, Resource::Posts, POST_COLUMNS, id, post_from_row)?;
            tx.commit()?;
            Ok(post)
        })
    }

    // -- Projects --

    pub fn list_projects(&self) -> Result<Vec<Project>> {
        self.with_conn(|conn| query_all(conn, Resource::Projects, PROJECT_COLUMNS, project_from_row))
    }

    pub fn insert_project(&self, project: &Project) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO projects (id, title, description, tech, github, demo, createdAt)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    project.id,
                    project.title,
                    project.description,
                    project.tech,
                    project.github,
                    project.demo,
                    project.created_at
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_project(&self, id: &str) -> Result<Option<Project>> {
        self.with_conn(|conn| {
            query_by_id(conn, Resource::Projects, PROJECT_COLUMNS, id, project_from_row)
        })
    }

    // -- Roles --

    pub fn list_roles(&self) -> Result<Vec<Role>> {
        self.with_conn(|conn| query_all(conn, Resource::Roles, ROLE_COLUMNS, role_from_row))
    }

    pub fn insert_role(&self, role: &Role) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO roles (id, role, duration, project, skills, contact, notes, createdAt)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                rusqlite::params![
                    role.id,
                    role.role,
                    role.duration,
                    role.project,
                    role.skills,
                    role.contact,
                    role.notes,
                    role.created_at
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_role(&self, id: &str) -> Result<Option<Role>> {
        self.with_conn(|conn| query_by_id(conn, Resource::Roles, ROLE_COLUMNS, id, role_from_row))
    }

    // -- Any resource --

    /// Remove a row. Returns the number of rows deleted (0 or 1).
    pub fn delete_by_id(&self, resource: Resource, id: &str) -> Result<usize> {
        self.with_conn(|conn| {
            let sql = format!("DELETE FROM {} WHERE id = ?1", resource.table());
            Ok(conn.execute(&sql, [id])?)
        })
    }
}

fn increment_votes(conn: &Connection, id: &str) -> Result<usize> {
    Ok(conn.execute("UPDATE posts SET votes = votes + 1 WHERE id = ?1", [id])?)
}

// Newest first; rows sharing a timestamp fall back to insertion order, newest first.
fn query_all<T>(
    conn: &Connection,
    resource: Resource,
    columns: &str,
    map: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Vec<T>> {
    let sql = format!(
        "SELECT {} FROM {} ORDER BY createdAt DESC, rowid DESC",
        columns,
        resource.table()
    );
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt
        .query_map([], map)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn query_by_id<T>(
    conn: &Connection,
    resource: Resource,
    columns: &str,
    id: &str,
    map: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Option<T>> {
    let sql = format!("SELECT {} FROM {} WHERE id = ?1", columns, resource.table());
    let mut stmt = conn.prepare(&sql)?;

    Ok(stmt.query_row([id], map).optional()?)
}
