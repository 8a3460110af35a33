//! Directory entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use dirhub_core::types::{DirectoryId, ProjectId, TaskId};

/// A directory in the filing hierarchy.
///
/// Children are not stored on the node; they are whatever rows carry this
/// directory's id in `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Directory {
    /// Unique directory identifier.
    pub id: DirectoryId,
    /// Directory name.
    pub name: String,
    /// Parent directory ID (None for root directories).
    pub parent_id: Option<DirectoryId>,
    /// Project this directory is the root of, if any.
    pub project_id: Option<ProjectId>,
    /// Task this directory belongs to, if any.
    pub task_id: Option<TaskId>,
    /// Soft-delete flag. Deleted rows are invisible to every read.
    pub deleted: bool,
    /// When the directory was created.
    pub created_at: DateTime<Utc>,
    /// When the directory was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Directory {
    /// Check if this is a root directory (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check if the directory has not been soft-deleted.
    pub fn is_active(&self) -> bool {
        !self.deleted
    }

    /// Replace the name in place. The change still has to be saved.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }
}

/// Data required to create a new directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDirectory {
    /// Directory name.
    pub name: String,
    /// Parent directory (None for root).
    pub parent_id: Option<DirectoryId>,
    /// Linked project.
    pub project_id: Option<ProjectId>,
    /// Linked task.
    pub task_id: Option<TaskId>,
}

impl CreateDirectory {
    /// Build a child directory of `parent` with optional project/task links.
    ///
    /// No combination of links is rejected here; callers decide which
    /// association applies.
    pub fn new(
        name: impl Into<String>,
        parent: DirectoryId,
        project_id: Option<ProjectId>,
        task_id: Option<TaskId>,
    ) -> Self {
        Self {
            name: name.into(),
            parent_id: Some(parent),
            project_id,
            task_id,
        }
    }

    /// Build a root directory with no parent and no links.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_id: None,
            project_id: None,
            task_id: None,
        }
    }

    /// Materialize the row the store persists for this payload.
    pub fn into_directory(self, id: DirectoryId, now: DateTime<Utc>) -> Directory {
        Directory {
            id,
            name: self.name,
            parent_id: self.parent_id,
            project_id: self.project_id,
            task_id: self.task_id,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}
