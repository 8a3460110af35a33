//! Directory repository implementation.

use sqlx::PgConnection;

use dirhub_core::error::{AppError, ErrorKind};
use dirhub_core::result::AppResult;
use dirhub_core::types::{DirectoryId, ProjectId};
use dirhub_entity::directory::{CreateDirectory, Directory};

use super::raw_ids;

/// Unique index guarding one live directory per project.
const PROJECT_LIVE_KEY: &str = "directories_project_live_key";

/// Repository for directory CRUD and tree queries.
#[derive(Debug)]
pub struct DirectoryRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> DirectoryRepository<'c> {
    /// Create a repository on a borrowed transaction connection.
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Find a live directory by ID.
    pub async fn find_by_id(&mut self, id: DirectoryId) -> AppResult<Option<Directory>> {
        sqlx::query_as::<_, Directory>(
            "SELECT * FROM directories WHERE id = $1 AND deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find directory", e))
    }

    /// List every live directory.
    pub async fn find_all(&mut self) -> AppResult<Vec<Directory>> {
        sqlx::query_as::<_, Directory>(
            "SELECT * FROM directories WHERE deleted = FALSE ORDER BY id ASC",
        )
        .fetch_all(&mut *self.conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list directories", e))
    }

    /// List live direct children of a directory.
    pub async fn find_children(&mut self, parent_id: DirectoryId) -> AppResult<Vec<Directory>> {
        sqlx::query_as::<_, Directory>(
            "SELECT * FROM directories WHERE parent_id = $1 AND deleted = FALSE ORDER BY id ASC",
        )
        .bind(parent_id)
        .fetch_all(&mut *self.conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    /// Recursive query for the live subtree below a directory.
    pub async fn find_descendants(&mut self, root: DirectoryId) -> AppResult<Vec<Directory>> {
        sqlx::query_as::<_, Directory>(
            "WITH RECURSIVE tree AS ( \
                SELECT d.*, 0 AS depth FROM directories d \
                 WHERE d.id = $1 AND d.deleted = FALSE \
                UNION ALL \
                SELECT c.*, t.depth + 1 FROM directories c \
                 INNER JOIN tree t ON c.parent_id = t.id \
                 WHERE c.deleted = FALSE \
             ) SELECT * FROM tree WHERE id <> $1 ORDER BY depth ASC, id ASC",
        )
        .bind(root)
        .fetch_all(&mut *self.conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list descendants", e))
    }

    /// Find the live directory linked to a project.
    pub async fn find_by_project(&mut self, project_id: ProjectId) -> AppResult<Option<Directory>> {
        sqlx::query_as::<_, Directory>(
            "SELECT * FROM directories WHERE project_id = $1 AND deleted = FALSE",
        )
        .bind(project_id)
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find project directory", e)
        })
    }

    /// Create a new directory.
    pub async fn create(&mut self, data: &CreateDirectory) -> AppResult<Directory> {
        sqlx::query_as::<_, Directory>(
            "INSERT INTO directories (name, parent_id, project_id, task_id) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.parent_id)
        .bind(data.project_id)
        .bind(data.task_id)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(PROJECT_LIVE_KEY) => {
                AppError::conflict(format!(
                    "Project {} already has a directory",
                    data.project_id.map(|p| p.to_string()).unwrap_or_default()
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create directory", e),
        })
    }

    /// Save the mutable fields of a directory.
    pub async fn update(&mut self, dir: &Directory) -> AppResult<Directory> {
        sqlx::query_as::<_, Directory>(
            "UPDATE directories SET name = $2, parent_id = $3, project_id = $4, task_id = $5, \
             updated_at = $6 WHERE id = $1 AND deleted = FALSE RETURNING *",
        )
        .bind(dir.id)
        .bind(&dir.name)
        .bind(dir.parent_id)
        .bind(dir.project_id)
        .bind(dir.task_id)
        .bind(dir.updated_at)
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update directory", e))?
        .ok_or_else(|| AppError::not_found(format!("Directory {} not found", dir.id)))
    }

    /// Flag directories as deleted.
    pub async fn soft_delete(&mut self, ids: &[DirectoryId]) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE directories SET deleted = TRUE, updated_at = NOW() \
             WHERE id = ANY($1) AND deleted = FALSE",
        )
        .bind(raw_ids(ids))
        .execute(&mut *self.conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete directories", e))?;
        Ok(result.rows_affected())
    }

    /// Flag the documents filed under directories as deleted.
    pub async fn soft_delete_documents(&mut self, ids: &[DirectoryId]) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE documents SET deleted = TRUE WHERE directory_id = ANY($1) AND deleted = FALSE",
        )
        .bind(raw_ids(ids))
        .execute(&mut *self.conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete documents", e))?;
        Ok(result.rows_affected())
    }
}
