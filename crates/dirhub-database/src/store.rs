//! Store contract consumed by the service layer.
//!
//! A service operation opens exactly one [`UnitOfWork`], performs all of its
//! reads and writes through it, and either commits or lets it drop. Dropping
//! an uncommitted unit of work discards every write made through it.
//!
//! Every read on a unit of work hides soft-deleted rows.

use async_trait::async_trait;

use dirhub_core::result::AppResult;
use dirhub_core::types::{DirectoryId, ProjectId, TaskId, UserId};
use dirhub_entity::directory::{CreateDirectory, Directory};
use dirhub_entity::grant::{CreateDirectoryGrant, DirectoryGrant};

/// Source of units of work.
#[async_trait]
pub trait DirectoryStore: Send + Sync + 'static {
    /// The unit of work type handed out by [`DirectoryStore::begin`].
    type Work: UnitOfWork;

    /// Open a new unit of work.
    async fn begin(&self) -> AppResult<Self::Work>;

    /// Confirm the backing storage answers.
    async fn health_check(&self) -> AppResult<()>;
}

/// One atomic scope of reads and writes.
#[async_trait]
pub trait UnitOfWork: Send {
    /// Find a live directory by ID.
    async fn find_directory(&mut self, id: DirectoryId) -> AppResult<Option<Directory>>;

    /// List every live directory ordered by ID.
    async fn list_directories(&mut self) -> AppResult<Vec<Directory>>;

    /// List the live direct children of a directory ordered by ID.
    async fn list_children(&mut self, parent_id: DirectoryId) -> AppResult<Vec<Directory>>;

    /// List every live directory below a live `root`, nearest levels first.
    ///
    /// The walk stops at deleted rows. `root` itself is not included.
    async fn find_descendants(&mut self, root: DirectoryId) -> AppResult<Vec<Directory>>;

    /// Find the live directory linked to a project.
    async fn find_by_project(&mut self, project_id: ProjectId) -> AppResult<Option<Directory>>;

    /// Persist a new directory and return the stored row.
    async fn insert_directory(&mut self, data: &CreateDirectory) -> AppResult<Directory>;

    /// Save the mutable fields of a loaded directory.
    async fn update_directory(&mut self, dir: &Directory) -> AppResult<Directory>;

    /// Flag the given directories as deleted. Returns the number newly flagged.
    async fn soft_delete_directories(&mut self, ids: &[DirectoryId]) -> AppResult<u64>;

    /// Flag the documents filed under the given directories as deleted.
    async fn soft_delete_documents(&mut self, directory_ids: &[DirectoryId]) -> AppResult<u64>;

    /// Persist a new access grant.
    async fn insert_grant(&mut self, data: &CreateDirectoryGrant) -> AppResult<DirectoryGrant>;

    /// List every grant on a live directory ordered by ID.
    async fn list_grants(&mut self) -> AppResult<Vec<DirectoryGrant>>;

    /// List the grants held by one user ordered by ID.
    async fn list_grants_for_user(&mut self, user_id: UserId) -> AppResult<Vec<DirectoryGrant>>;

    /// Remove the grants attached to the given directories.
    async fn delete_grants_for_directories(
        &mut self,
        directory_ids: &[DirectoryId],
    ) -> AppResult<u64>;

    /// Whether a live user with this ID exists.
    async fn user_exists(&mut self, user_id: UserId) -> AppResult<bool>;

    /// Whether a live project with this ID exists.
    async fn project_exists(&mut self, project_id: ProjectId) -> AppResult<bool>;

    /// Whether a live task with this ID exists.
    async fn task_exists(&mut self, task_id: TaskId) -> AppResult<bool>;

    /// Make every write durable.
    async fn commit(self) -> AppResult<()>;

    /// Discard every write.
    async fn rollback(self) -> AppResult<()>;
}
