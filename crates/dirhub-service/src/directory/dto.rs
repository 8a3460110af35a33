//! Request and result shapes of the directory service.

use std::fmt;

use serde::{Deserialize, Serialize};

use dirhub_core::types::{DirectoryId, GrantId, ProjectId, TaskId, UserId};
use dirhub_entity::directory::Directory;
use dirhub_entity::grant::DirectoryGrant;

/// Outcome marker of operations that return no entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    /// The operation committed.
    Success,
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
        }
    }
}

/// Request to create a directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDirectoryRequest {
    /// Directory name.
    pub name: String,
}

impl CreateDirectoryRequest {
    /// Build a request from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Request to rename a directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameDirectoryRequest {
    /// New directory name.
    pub name: String,
}

impl RenameDirectoryRequest {
    /// Build a request from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One entry of an authority assignment batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAuthority {
    /// User to grant authority to.
    pub user_id: UserId,
}

/// Flat view of a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySummary {
    /// Directory ID.
    pub id: DirectoryId,
    /// Directory name.
    pub name: String,
    /// Parent directory.
    pub parent_id: Option<DirectoryId>,
    /// Linked project.
    pub project_id: Option<ProjectId>,
    /// Linked task.
    pub task_id: Option<TaskId>,
}

impl From<&Directory> for DirectorySummary {
    fn from(dir: &Directory) -> Self {
        Self {
            id: dir.id,
            name: dir.name.clone(),
            parent_id: dir.parent_id,
            project_id: dir.project_id,
            task_id: dir.task_id,
        }
    }
}

/// Flat view of an access grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantSummary {
    /// Grant ID.
    pub id: GrantId,
    /// User holding the grant.
    pub user_id: UserId,
    /// Directory the grant applies to.
    pub directory_id: DirectoryId,
}

impl From<&DirectoryGrant> for GrantSummary {
    fn from(grant: &DirectoryGrant) -> Self {
        Self {
            id: grant.id,
            user_id: grant.user_id,
            directory_id: grant.directory_id,
        }
    }
}

/// A user's grant together with the directory it opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDirectoryGrant {
    /// Grant ID.
    pub grant_id: GrantId,
    /// User holding the grant.
    pub user_id: UserId,
    /// The granted directory.
    pub directory: DirectorySummary,
}
