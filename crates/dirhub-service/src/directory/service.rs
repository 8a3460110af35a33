//! Directory CRUD operations, one unit of work per call.

use tracing::{info, warn};

use dirhub_core::error::AppError;
use dirhub_core::result::AppResult;
use dirhub_core::types::{DirectoryId, ProjectId, TaskId};
use dirhub_database::store::{DirectoryStore, UnitOfWork};
use dirhub_entity::directory::{CreateDirectory, Directory};

use super::cascade::{self, CascadeSummary};
use super::dto::{
    CreateDirectoryRequest, DirectorySummary, OperationStatus, RenameDirectoryRequest,
};

/// Manages the directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryService<S> {
    /// Backing store.
    store: S,
}

impl<S: DirectoryStore> DirectoryService<S> {
    /// Creates a new directory service.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Checks that the backing store answers.
    pub async fn health_check(&self) -> AppResult<()> {
        self.store.health_check().await
    }

    /// Lists every live directory.
    pub async fn list_all(&self) -> AppResult<Vec<DirectorySummary>> {
        let mut work = self.store.begin().await?;
        let result = work
            .list_directories()
            .await
            .map(|dirs| dirs.iter().map(DirectorySummary::from).collect());
        finish(work, result).await
    }

    /// Gets a live directory by ID.
    pub async fn get(&self, directory_id: DirectoryId) -> AppResult<Directory> {
        let mut work = self.store.begin().await?;
        let result = require_directory(&mut work, directory_id).await;
        finish(work, result).await
    }

    /// Lists the live direct children of a directory.
    ///
    /// An unknown or deleted parent simply has no children.
    pub async fn list_children(&self, parent_id: DirectoryId) -> AppResult<Vec<DirectorySummary>> {
        let mut work = self.store.begin().await?;
        let result = work
            .list_children(parent_id)
            .await
            .map(|dirs| dirs.iter().map(DirectorySummary::from).collect());
        finish(work, result).await
    }

    /// Creates a root directory with no parent, project, or task.
    pub async fn create_root(&self, req: CreateDirectoryRequest) -> AppResult<Directory> {
        validate_name(&req.name)?;

        let mut work = self.store.begin().await?;
        let result = work.insert_directory(&CreateDirectory::root(req.name)).await;
        let dir = finish(work, result).await?;

        info!(directory_id = %dir.id, name = %dir.name, "Root directory created");
        Ok(dir)
    }

    /// Creates a plain child directory under an existing parent.
    pub async fn create(
        &self,
        req: CreateDirectoryRequest,
        parent_id: DirectoryId,
    ) -> AppResult<OperationStatus> {
        validate_name(&req.name)?;

        let mut work = self.store.begin().await?;
        let result = create_child_in(&mut work, req.name, parent_id).await;
        let dir = finish(work, result).await?;

        info!(
            directory_id = %dir.id,
            parent_id = %parent_id,
            name = %dir.name,
            "Directory created"
        );
        Ok(OperationStatus::Success)
    }

    /// Creates the directory of a project under an existing parent.
    pub async fn create_for_project(
        &self,
        req: CreateDirectoryRequest,
        parent_id: DirectoryId,
        project_id: ProjectId,
    ) -> AppResult<Directory> {
        validate_name(&req.name)?;

        let mut work = self.store.begin().await?;
        let result = create_for_project_in(&mut work, req.name, parent_id, project_id).await;
        let dir = finish(work, result).await?;

        info!(
            directory_id = %dir.id,
            parent_id = %parent_id,
            project_id = %project_id,
            "Project directory created"
        );
        Ok(dir)
    }

    /// Creates a task directory under the directory of the task's project.
    pub async fn create_for_task(
        &self,
        req: CreateDirectoryRequest,
        task_id: TaskId,
        project_id: ProjectId,
    ) -> AppResult<Directory> {
        validate_name(&req.name)?;

        let mut work = self.store.begin().await?;
        let result = create_for_task_in(&mut work, req.name, task_id, project_id).await;
        let dir = finish(work, result).await?;

        info!(
            directory_id = %dir.id,
            task_id = %task_id,
            project_id = %project_id,
            "Task directory created"
        );
        Ok(dir)
    }

    /// Renames a directory and saves it.
    pub async fn rename(
        &self,
        req: RenameDirectoryRequest,
        directory_id: DirectoryId,
    ) -> AppResult<OperationStatus> {
        validate_name(&req.name)?;

        let mut work = self.store.begin().await?;
        let result = rename_in(&mut work, req.name, directory_id).await;
        let dir = finish(work, result).await?;

        info!(directory_id = %dir.id, new_name = %dir.name, "Directory renamed");
        Ok(OperationStatus::Success)
    }

    /// Soft-deletes a directory together with its subtree, documents, and grants.
    pub async fn remove(&self, directory_id: DirectoryId) -> AppResult<OperationStatus> {
        let mut work = self.store.begin().await?;
        let result = remove_in(&mut work, directory_id).await;
        let summary = finish(work, result).await?;

        info!(
            directory_id = %directory_id,
            directories = summary.directories,
            documents = summary.documents,
            grants = summary.grants,
            "Directory removed"
        );
        Ok(OperationStatus::Success)
    }
}

/// Commit on success, roll back on error.
///
/// A failed rollback is logged and the original error is returned.
pub(crate) async fn finish<W: UnitOfWork, T>(work: W, result: AppResult<T>) -> AppResult<T> {
    match result {
        Ok(value) => {
            work.commit().await?;
            Ok(value)
        }
        Err(err) => {
            warn!(error = %err, "Rolling back unit of work");
            if let Err(rollback_err) = work.rollback().await {
                warn!(error = %rollback_err, "Rollback failed");
            }
            Err(err)
        }
    }
}

/// Reject blank names before anything is written.
pub(crate) fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Directory name cannot be empty"));
    }
    Ok(())
}

/// Resolve a live directory or fail with `NotFound`.
pub(crate) async fn require_directory<W: UnitOfWork>(
    work: &mut W,
    directory_id: DirectoryId,
) -> AppResult<Directory> {
    work.find_directory(directory_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Directory {directory_id} not found")))
}

async fn create_child_in<W: UnitOfWork>(
    work: &mut W,
    name: String,
    parent_id: DirectoryId,
) -> AppResult<Directory> {
    let parent = resolve_parent(work, parent_id).await?;
    work.insert_directory(&CreateDirectory::new(name, parent.id, None, None))
        .await
}

async fn resolve_parent<W: UnitOfWork>(work: &mut W, parent_id: DirectoryId) -> AppResult<Directory> {
    work.find_directory(parent_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Parent directory {parent_id} not found")))
}

async fn create_for_project_in<W: UnitOfWork>(
    work: &mut W,
    name: String,
    parent_id: DirectoryId,
    project_id: ProjectId,
) -> AppResult<Directory> {
    if !work.project_exists(project_id).await? {
        return Err(AppError::not_found(format!("Project {project_id} not found")));
    }
    let parent = resolve_parent(work, parent_id).await?;
    if work.find_by_project(project_id).await?.is_some() {
        return Err(AppError::conflict(format!(
            "Project {project_id} already has a directory"
        )));
    }

    work.insert_directory(&CreateDirectory::new(name, parent.id, Some(project_id), None))
        .await
}

async fn create_for_task_in<W: UnitOfWork>(
    work: &mut W,
    name: String,
    task_id: TaskId,
    project_id: ProjectId,
) -> AppResult<Directory> {
    let parent = work.find_by_project(project_id).await?.ok_or_else(|| {
        AppError::not_found(format!("No directory exists for project {project_id}"))
    })?;
    if !work.task_exists(task_id).await? {
        return Err(AppError::not_found(format!("Task {task_id} not found")));
    }

    work.insert_directory(&CreateDirectory::new(name, parent.id, None, Some(task_id)))
        .await
}

async fn rename_in<W: UnitOfWork>(
    work: &mut W,
    name: String,
    directory_id: DirectoryId,
) -> AppResult<Directory> {
    let mut dir = require_directory(work, directory_id).await?;
    dir.rename(name);
    work.update_directory(&dir).await
}

async fn remove_in<W: UnitOfWork>(
    work: &mut W,
    directory_id: DirectoryId,
) -> AppResult<CascadeSummary> {
    require_directory(work, directory_id).await?;
    cascade::soft_delete_subtree(work, directory_id).await
}
