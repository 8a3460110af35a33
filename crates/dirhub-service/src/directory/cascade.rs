//! Explicit soft-delete fan-out over a directory subtree.
//!
//! Nothing is left to store-level cascades: the subtree is walked, then
//! grants are removed and documents and directories are flagged, all on the
//! caller's unit of work.

use serde::{Deserialize, Serialize};
use tracing::debug;

use dirhub_core::result::AppResult;
use dirhub_core::types::DirectoryId;
use dirhub_database::store::UnitOfWork;

/// Rows touched by one cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeSummary {
    /// Directories flagged deleted, the subtree root included.
    pub directories: u64,
    /// Documents flagged deleted.
    pub documents: u64,
    /// Grants removed.
    pub grants: u64,
}

/// IDs of `root` and every live directory below it, breadth-first.
pub async fn subtree_ids<W: UnitOfWork>(work: &mut W, root: DirectoryId) -> AppResult<Vec<DirectoryId>> {
    let mut ids = vec![root];
    ids.extend(work.find_descendants(root).await?.iter().map(|d| d.id));
    Ok(ids)
}

/// Soft-delete `root` and its whole subtree.
///
/// The root must already have been resolved by the caller.
pub async fn soft_delete_subtree<W: UnitOfWork>(
    work: &mut W,
    root: DirectoryId,
) -> AppResult<CascadeSummary> {
    let ids = subtree_ids(work, root).await?;
    debug!(root = %root, subtree_size = ids.len(), "Cascading soft delete");

    let grants = work.delete_grants_for_directories(&ids).await?;
    let documents = work.soft_delete_documents(&ids).await?;
    let directories = work.soft_delete_directories(&ids).await?;

    Ok(CascadeSummary {
        directories,
        documents,
        grants,
    })
}
