//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use dirhub_core::types::DirectoryId;

/// Create a root or child directory.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDirectoryBody {
    /// Directory name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Create the directory of a project.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProjectDirectoryBody {
    /// Directory name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Parent directory.
    pub parent_id: DirectoryId,
}

/// Rename a directory.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameDirectoryBody {
    /// New name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}
