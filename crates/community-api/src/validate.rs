//! Normalization of inbound field maps into stored entities.
//!
//! Values are coerced loosely: missing or `null` becomes `""`, strings are
//! taken as-is, any other JSON value is used as its JSON text. Everything is
//! trimmed. Required fields are checked in a fixed order and the first empty
//! one is reported.

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use community_types::{Post, Project, Role};

pub type Fields = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} is required")]
pub struct ValidationError {
    pub field: &'static str,
}

pub fn post(fields: &Fields) -> Result<Post, ValidationError> {
    let title = required(fields, "title")?;
    let category = required(fields, "category")?;
    let body = required(fields, "body")?;

    Ok(Post {
        id: new_id(),
        title,
        category,
        body,
        created_at: created_at(fields),
        votes: 0,
    })
}

pub fn project(fields: &Fields) -> Result<Project, ValidationError> {
    let title = required(fields, "title")?;
    let description = required(fields, "description")?;

    Ok(Project {
        id: new_id(),
        title,
        description,
        tech: text(fields, "tech"),
        github: text(fields, "github"),
        demo: text(fields, "demo"),
        created_at: created_at(fields),
    })
}

pub fn role(fields: &Fields) -> Result<Role, ValidationError> {
    let role = required(fields, "role")?;
    let project = required(fields, "project")?;
    let contact = required(fields, "contact")?;

    Ok(Role {
        id: new_id(),
        role,
        duration: text(fields, "duration"),
        project,
        skills: text(fields, "skills"),
        contact,
        notes: text(fields, "notes"),
        created_at: created_at(fields),
    })
}

/// Server-assigned identifier: UUID v7, a millisecond timestamp followed by
/// 74 random bits.
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

/// Current UTC time, whole seconds, e.g. `2024-05-01T12:00:00+00:00`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

fn text(fields: &Fields, name: &str) -> String {
    match fields.get(name) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

fn required(fields: &Fields, name: &'static str) -> Result<String, ValidationError> {
    let value = text(fields, name);
    if value.is_empty() {
        return Err(ValidationError { field: name });
    }
    Ok(value)
}

// Client timestamps are trusted verbatim; no format check.
fn created_at(fields: &Fields) -> String {
    let supplied = text(fields, "createdAt");
    if supplied.is_empty() { now_iso() } else { supplied }
}
