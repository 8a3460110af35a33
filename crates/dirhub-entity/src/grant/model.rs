//! Directory access grant entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use dirhub_core::types::{DirectoryId, GrantId, UserId};

/// An authority record giving a user access to a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DirectoryGrant {
    /// Unique grant identifier.
    pub id: GrantId,
    /// User holding the grant.
    pub user_id: UserId,
    /// Directory the grant applies to.
    pub directory_id: DirectoryId,
    /// When the grant was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDirectoryGrant {
    /// User receiving authority.
    pub user_id: UserId,
    /// Target directory.
    pub directory_id: DirectoryId,
}

impl CreateDirectoryGrant {
    /// Pair a user with a directory.
    pub fn new(user_id: UserId, directory_id: DirectoryId) -> Self {
        Self {
            user_id,
            directory_id,
        }
    }

    /// Materialize the row the store persists for this payload.
    pub fn into_grant(self, id: GrantId, now: DateTime<Utc>) -> DirectoryGrant {
        DirectoryGrant {
            id,
            user_id: self.user_id,
            directory_id: self.directory_id,
            created_at: now,
        }
    }
}
