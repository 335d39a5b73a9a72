use serde::{Deserialize, Serialize};

/// A forum post. `votes` only ever grows through upvotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub category: String,
    pub body: String,
    pub created_at: String,
    pub votes: i64,
}

/// A showcased project. `tech`, `github` and `demo` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tech: String,
    pub github: String,
    pub demo: String,
    pub created_at: String,
}

/// A role posting for a project.
///
/// `project` is free text naming a project; it is not checked against
/// the projects table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub role: String,
    pub duration: String,
    pub project: String,
    pub skills: String,
    pub contact: String,
    pub notes: String,
    pub created_at: String,
}
