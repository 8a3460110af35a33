//! Directory grant repository implementation.

use sqlx::PgConnection;

use dirhub_core::error::{AppError, ErrorKind};
use dirhub_core::result::AppResult;
use dirhub_core::types::{DirectoryId, UserId};
use dirhub_entity::grant::{CreateDirectoryGrant, DirectoryGrant};

use super::raw_ids;

/// Repository for directory access grants.
#[derive(Debug)]
pub struct GrantRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> GrantRepository<'c> {
    /// Create a repository on a borrowed transaction connection.
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Create a new grant.
    pub async fn create(&mut self, data: &CreateDirectoryGrant) -> AppResult<DirectoryGrant> {
        sqlx::query_as::<_, DirectoryGrant>(
            "INSERT INTO directory_grants (user_id, directory_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.directory_id)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create grant", e))
    }

    /// List all grants on live directories.
    pub async fn find_all(&mut self) -> AppResult<Vec<DirectoryGrant>> {
        sqlx::query_as::<_, DirectoryGrant>(
            "SELECT g.* FROM directory_grants g \
             INNER JOIN directories d ON d.id = g.directory_id \
             WHERE d.deleted = FALSE ORDER BY g.id ASC",
        )
        .fetch_all(&mut *self.conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list grants", e))
    }

    /// List the grants of one user on live directories.
    pub async fn find_by_user(&mut self, user_id: UserId) -> AppResult<Vec<DirectoryGrant>> {
        sqlx::query_as::<_, DirectoryGrant>(
            "SELECT g.* FROM directory_grants g \
             INNER JOIN directories d ON d.id = g.directory_id \
             WHERE g.user_id = $1 AND d.deleted = FALSE ORDER BY g.id ASC",
        )
        .bind(user_id)
        .fetch_all(&mut *self.conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list user grants", e))
    }

    /// Remove every grant attached to the given directories.
    pub async fn delete_for_directories(&mut self, ids: &[DirectoryId]) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM directory_grants WHERE directory_id = ANY($1)")
            .bind(raw_ids(ids))
            .execute(&mut *self.conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete grants", e))?;
        Ok(result.rows_affected())
    }
}
