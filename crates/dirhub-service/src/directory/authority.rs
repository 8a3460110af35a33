//! Directory access grants.

use tracing::info;

use dirhub_core::error::AppError;
use dirhub_core::result::AppResult;
use dirhub_core::types::{DirectoryId, UserId};
use dirhub_database::store::{DirectoryStore, UnitOfWork};
use dirhub_entity::grant::{CreateDirectoryGrant, DirectoryGrant};

use super::dto::{DirectorySummary, GrantSummary, OperationStatus, UserAuthority, UserDirectoryGrant};
use super::service::{DirectoryService, finish, require_directory};

impl<S: DirectoryStore> DirectoryService<S> {
    /// Grants every listed user authority over a directory.
    ///
    /// The batch is atomic: one unknown user leaves no grant behind.
    pub async fn assign_authority(
        &self,
        entries: &[UserAuthority],
        directory_id: DirectoryId,
    ) -> AppResult<OperationStatus> {
        let mut work = self.store().begin().await?;
        let result = assign_in(&mut work, entries, directory_id).await;
        let grants = finish(work, result).await?;

        info!(
            directory_id = %directory_id,
            granted = grants.len(),
            "Directory authority assigned"
        );
        Ok(OperationStatus::Success)
    }

    /// Lists every access grant.
    pub async fn list_directory_users(&self) -> AppResult<Vec<GrantSummary>> {
        let mut work = self.store().begin().await?;
        let result = work
            .list_grants()
            .await
            .map(|grants| grants.iter().map(GrantSummary::from).collect());
        finish(work, result).await
    }

    /// Lists the grants held by a user, each with its directory.
    pub async fn list_authority_directories_for_user(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<UserDirectoryGrant>> {
        let mut work = self.store().begin().await?;
        let result = user_grants_in(&mut work, user_id).await;
        finish(work, result).await
    }
}

async fn assign_in<W: UnitOfWork>(
    work: &mut W,
    entries: &[UserAuthority],
    directory_id: DirectoryId,
) -> AppResult<Vec<DirectoryGrant>> {
    let dir = require_directory(work, directory_id).await?;

    let mut grants = Vec::with_capacity(entries.len());
    for entry in entries {
        if !work.user_exists(entry.user_id).await? {
            return Err(AppError::not_found(format!("User {} not found", entry.user_id)));
        }
        grants.push(
            work.insert_grant(&CreateDirectoryGrant::new(entry.user_id, dir.id))
                .await?,
        );
    }
    Ok(grants)
}

async fn user_grants_in<W: UnitOfWork>(
    work: &mut W,
    user_id: UserId,
) -> AppResult<Vec<UserDirectoryGrant>> {
    let grants = work.list_grants_for_user(user_id).await?;

    let mut out = Vec::with_capacity(grants.len());
    for grant in grants {
        // Grants on deleted directories are omitted.
        if let Some(dir) = work.find_directory(grant.directory_id).await? {
            out.push(UserDirectoryGrant {
                grant_id: grant.id,
                user_id: grant.user_id,
                directory: DirectorySummary::from(&dir),
            });
        }
    }
    Ok(out)
}
