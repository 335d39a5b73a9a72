use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

/// Create the schema if it is absent. Safe to run against an existing file.
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS posts (
            id          TEXT PRIMARY KEY,
            title       TEXT NOT NULL,
            category    TEXT NOT NULL,
            body        TEXT NOT NULL,
            createdAt   TEXT NOT NULL,
            votes       INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_posts_created
            ON posts(createdAt);

        CREATE TABLE IF NOT EXISTS projects (
            id          TEXT PRIMARY KEY,
            title       TEXT NOT NULL,
            description TEXT NOT NULL,
            tech        TEXT NOT NULL DEFAULT '',
            github      TEXT NOT NULL DEFAULT '',
            demo        TEXT NOT NULL DEFAULT '',
            createdAt   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_projects_created
            ON projects(createdAt);

        CREATE TABLE IF NOT EXISTS roles (
            id          TEXT PRIMARY KEY,
            role        TEXT NOT NULL,
            duration    TEXT NOT NULL DEFAULT '',
            project     TEXT NOT NULL,
            skills      TEXT NOT NULL DEFAULT '',
            contact     TEXT NOT NULL,
            notes       TEXT NOT NULL DEFAULT '',
            createdAt   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_roles_created
            ON roles(createdAt);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
