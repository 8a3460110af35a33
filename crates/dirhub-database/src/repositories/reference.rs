//! Existence checks against tables owned by other domains.

use sqlx::PgConnection;

use dirhub_core::error::{AppError, ErrorKind};
use dirhub_core::result::AppResult;
use dirhub_core::types::{ProjectId, TaskId, UserId};

/// Looks up users, projects and tasks by ID.
#[derive(Debug)]
pub struct ReferenceRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> ReferenceRepository<'c> {
    /// Create a repository on a borrowed transaction connection.
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Whether a live user exists.
    pub async fn user_exists(&mut self, id: UserId) -> AppResult<bool> {
        self.exists(
            "SELECT EXISTS (SELECT 1 FROM users WHERE id = $1 AND deleted = FALSE)",
            id.get(),
            "user",
        )
        .await
    }

    /// Whether a live project exists.
    pub async fn project_exists(&mut self, id: ProjectId) -> AppResult<bool> {
        self.exists(
            "SELECT EXISTS (SELECT 1 FROM projects WHERE id = $1 AND deleted = FALSE)",
            id.get(),
            "project",
        )
        .await
    }

    /// Whether a live task exists.
    pub async fn task_exists(&mut self, id: TaskId) -> AppResult<bool> {
        self.exists(
            "SELECT EXISTS (SELECT 1 FROM tasks WHERE id = $1 AND deleted = FALSE)",
            id.get(),
            "task",
        )
        .await
    }

    async fn exists(&mut self, sql: &'static str, id: i64, what: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&mut *self.conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Failed to look up {what}"), e)
            })
    }
}
