//! Directory tree traversal and building.

use std::collections::BTreeMap;

use dirhub_core::error::AppError;
use dirhub_core::result::AppResult;
use dirhub_core::types::DirectoryId;
use dirhub_database::store::{DirectoryStore, UnitOfWork};
use dirhub_entity::directory::{Directory, DirectoryNode};

use super::service::{DirectoryService, finish};

/// Assemble the nested view of `root` from a flat list of its descendants.
pub fn build_tree(root: &Directory, all: &[Directory]) -> DirectoryNode {
    let mut by_parent: BTreeMap<DirectoryId, Vec<&Directory>> = BTreeMap::new();
    for dir in all {
        if let Some(parent) = dir.parent_id {
            by_parent.entry(parent).or_default().push(dir);
        }
    }
    build_node(root, &by_parent)
}

fn build_node(dir: &Directory, by_parent: &BTreeMap<DirectoryId, Vec<&Directory>>) -> DirectoryNode {
    let children = by_parent
        .get(&dir.id)
        .map(|kids| kids.iter().map(|kid| build_node(kid, by_parent)).collect())
        .unwrap_or_default();
    DirectoryNode::new(dir, children)
}

impl<S: DirectoryStore> DirectoryService<S> {
    /// Builds the live subtree rooted at a directory.
    pub async fn tree(&self, directory_id: DirectoryId) -> AppResult<DirectoryNode> {
        let mut work = self.store().begin().await?;
        let result = tree_in(&mut work, directory_id).await;
        finish(work, result).await
    }
}

async fn tree_in<W: UnitOfWork>(work: &mut W, directory_id: DirectoryId) -> AppResult<DirectoryNode> {
    let root = work
        .find_directory(directory_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Directory {directory_id} not found")))?;
    let below = work.find_descendants(directory_id).await?;
    Ok(build_tree(&root, &below))
}
