//! PostgreSQL-backed store: one `sqlx` transaction per unit of work.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use dirhub_core::error::{AppError, ErrorKind};
use dirhub_core::result::AppResult;
use dirhub_core::types::{DirectoryId, ProjectId, TaskId, UserId};
use dirhub_entity::directory::{CreateDirectory, Directory};
use dirhub_entity::grant::{CreateDirectoryGrant, DirectoryGrant};

use crate::repositories::{DirectoryRepository, GrantRepository, ReferenceRepository};
use crate::store::{DirectoryStore, UnitOfWork};

/// Store that opens a database transaction for every unit of work.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a store on an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DirectoryStore for PgStore {
    type Work = PgUnitOfWork;

    async fn begin(&self) -> AppResult<PgUnitOfWork> {
        let tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;
        debug!("Transaction opened");
        Ok(PgUnitOfWork { tx })
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}

/// A unit of work bound to one open transaction.
///
/// `sqlx` rolls the transaction back when it is dropped uncommitted.
#[derive(Debug)]
pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl PgUnitOfWork {
    fn directories(&mut self) -> DirectoryRepository<'_> {
        DirectoryRepository::new(&mut self.tx)
    }

    fn grants(&mut self) -> GrantRepository<'_> {
        GrantRepository::new(&mut self.tx)
    }

    fn references(&mut self) -> ReferenceRepository<'_> {
        ReferenceRepository::new(&mut self.tx)
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn find_directory(&mut self, id: DirectoryId) -> AppResult<Option<Directory>> {
        self.directories().find_by_id(id).await
    }

    async fn list_directories(&mut self) -> AppResult<Vec<Directory>> {
        self.directories().find_all().await
    }

    async fn list_children(&mut self, parent_id: DirectoryId) -> AppResult<Vec<Directory>> {
        self.directories().find_children(parent_id).await
    }

    async fn find_descendants(&mut self, root: DirectoryId) -> AppResult<Vec<Directory>> {
        self.directories().find_descendants(root).await
    }

    async fn find_by_project(&mut self, project_id: ProjectId) -> AppResult<Option<Directory>> {
        self.directories().find_by_project(project_id).await
    }

    async fn insert_directory(&mut self, data: &CreateDirectory) -> AppResult<Directory> {
        self.directories().create(data).await
    }

    async fn update_directory(&mut self, dir: &Directory) -> AppResult<Directory> {
        self.directories().update(dir).await
    }

    async fn soft_delete_directories(&mut self, ids: &[DirectoryId]) -> AppResult<u64> {
        self.directories().soft_delete(ids).await
    }

    async fn soft_delete_documents(&mut self, directory_ids: &[DirectoryId]) -> AppResult<u64> {
        self.directories().soft_delete_documents(directory_ids).await
    }

    async fn insert_grant(&mut self, data: &CreateDirectoryGrant) -> AppResult<DirectoryGrant> {
        self.grants().create(data).await
    }

    async fn list_grants(&mut self) -> AppResult<Vec<DirectoryGrant>> {
        self.grants().find_all().await
    }

    async fn list_grants_for_user(&mut self, user_id: UserId) -> AppResult<Vec<DirectoryGrant>> {
        self.grants().find_by_user(user_id).await
    }

    async fn delete_grants_for_directories(
        &mut self,
        directory_ids: &[DirectoryId],
    ) -> AppResult<u64> {
        self.grants().delete_for_directories(directory_ids).await
    }

    async fn user_exists(&mut self, user_id: UserId) -> AppResult<bool> {
        self.references().user_exists(user_id).await
    }

    async fn project_exists(&mut self, project_id: ProjectId) -> AppResult<bool> {
        self.references().project_exists(project_id).await
    }

    async fn task_exists(&mut self, task_id: TaskId) -> AppResult<bool> {
        self.references().task_exists(task_id).await
    }

    async fn commit(self) -> AppResult<()> {
        self.tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;
        debug!("Transaction committed");
        Ok(())
    }

    async fn rollback(self) -> AppResult<()> {
        self.tx.rollback().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
        })?;
        debug!("Transaction rolled back");
        Ok(())
    }
}
