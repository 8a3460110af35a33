//! Mutex-guarded in-memory store.
//!
//! A unit of work owns the state lock from `begin` until it is committed or
//! dropped, so units of work run one at a time. The state is cloned when the
//! unit of work opens and put back on rollback or drop.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use dirhub_core::result::AppResult;
use dirhub_core::types::{DirectoryId, DocumentId, GrantId, ProjectId, TaskId, UserId};
use dirhub_entity::directory::{CreateDirectory, Directory};
use dirhub_entity::grant::{CreateDirectoryGrant, DirectoryGrant};

use super::arena::DirectoryArena;
use crate::store::{DirectoryStore, UnitOfWork};

/// A document row, reduced to what the delete cascade touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DocumentRow {
    directory_id: DirectoryId,
    deleted: bool,
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    directories: DirectoryArena,
    grants: BTreeMap<GrantId, DirectoryGrant>,
    last_grant_id: i64,
    documents: BTreeMap<DocumentId, DocumentRow>,
    last_document_id: i64,
    users: BTreeSet<UserId>,
    projects: BTreeSet<ProjectId>,
    tasks: BTreeSet<TaskId>,
}

impl MemoryState {
    fn grant_is_visible(&self, grant: &DirectoryGrant) -> bool {
        self.directories.get(grant.directory_id).is_some()
    }
}

/// Process-local store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a live user.
    pub async fn add_user(&self, id: UserId) {
        self.state.lock().await.users.insert(id);
    }

    /// Register a live project.
    pub async fn add_project(&self, id: ProjectId) {
        self.state.lock().await.projects.insert(id);
    }

    /// Register a live task.
    pub async fn add_task(&self, id: TaskId) {
        self.state.lock().await.tasks.insert(id);
    }

    /// File a document under a directory.
    pub async fn add_document(&self, directory_id: DirectoryId) -> DocumentId {
        let mut state = self.state.lock().await;
        state.last_document_id += 1;
        let id = DocumentId::new(state.last_document_id);
        state.documents.insert(
            id,
            DocumentRow {
                directory_id,
                deleted: false,
            },
        );
        id
    }

    /// Read a directory row including soft-deleted ones.
    pub async fn raw_directory(&self, id: DirectoryId) -> Option<Directory> {
        self.state.lock().await.directories.get_raw(id).cloned()
    }

    /// The delete flag of a document, if the document exists.
    pub async fn document_deleted(&self, id: DocumentId) -> Option<bool> {
        self.state.lock().await.documents.get(&id).map(|d| d.deleted)
    }

    /// Number of stored grant rows.
    pub async fn grant_count(&self) -> usize {
        self.state.lock().await.grants.len()
    }

    /// Number of stored directory rows, deleted ones included.
    pub async fn directory_count(&self) -> usize {
        self.state.lock().await.directories.len()
    }
}

#[async_trait]
impl DirectoryStore for MemoryStore {
    type Work = MemoryUnitOfWork;

    async fn begin(&self) -> AppResult<MemoryUnitOfWork> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let snapshot = guard.clone();
        debug!("Memory unit of work opened");
        Ok(MemoryUnitOfWork {
            guard,
            snapshot: Some(snapshot),
        })
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Unit of work over the in-memory state.
///
/// Holds the state lock. Restores the opening snapshot unless committed.
#[derive(Debug)]
pub struct MemoryUnitOfWork {
    guard: OwnedMutexGuard<MemoryState>,
    snapshot: Option<MemoryState>,
}

impl Drop for MemoryUnitOfWork {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            *self.guard = snapshot;
            debug!("Memory unit of work rolled back");
        }
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn find_directory(&mut self, id: DirectoryId) -> AppResult<Option<Directory>> {
        Ok(self.guard.directories.get(id).cloned())
    }

    async fn list_directories(&mut self) -> AppResult<Vec<Directory>> {
        Ok(self.guard.directories.active().cloned().collect())
    }

    async fn list_children(&mut self, parent_id: DirectoryId) -> AppResult<Vec<Directory>> {
        Ok(self
            .guard
            .directories
            .children_of(parent_id)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn find_descendants(&mut self, root: DirectoryId) -> AppResult<Vec<Directory>> {
        Ok(self
            .guard
            .directories
            .descendants(root)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn find_by_project(&mut self, project_id: ProjectId) -> AppResult<Option<Directory>> {
        Ok(self.guard.directories.find_by_project(project_id).cloned())
    }

    async fn insert_directory(&mut self, data: &CreateDirectory) -> AppResult<Directory> {
        self.guard.directories.insert(data, Utc::now())
    }

    async fn update_directory(&mut self, dir: &Directory) -> AppResult<Directory> {
        self.guard.directories.update(dir)
    }

    async fn soft_delete_directories(&mut self, ids: &[DirectoryId]) -> AppResult<u64> {
        Ok(self.guard.directories.mark_deleted(ids, Utc::now()))
    }

    async fn soft_delete_documents(&mut self, directory_ids: &[DirectoryId]) -> AppResult<u64> {
        let mut flagged = 0;
        for doc in self.guard.documents.values_mut() {
            if !doc.deleted && directory_ids.contains(&doc.directory_id) {
                doc.deleted = true;
                flagged += 1;
            }
        }
        Ok(flagged)
    }

    async fn insert_grant(&mut self, data: &CreateDirectoryGrant) -> AppResult<DirectoryGrant> {
        let state = &mut *self.guard;
        state.last_grant_id += 1;
        let grant = data.into_grant(GrantId::new(state.last_grant_id), Utc::now());
        state.grants.insert(grant.id, grant.clone());
        Ok(grant)
    }

    async fn list_grants(&mut self) -> AppResult<Vec<DirectoryGrant>> {
        let state = &*self.guard;
        Ok(state
            .grants
            .values()
            .filter(|g| state.grant_is_visible(g))
            .cloned()
            .collect())
    }

    async fn list_grants_for_user(&mut self, user_id: UserId) -> AppResult<Vec<DirectoryGrant>> {
        let state = &*self.guard;
        Ok(state
            .grants
            .values()
            .filter(|g| g.user_id == user_id && state.grant_is_visible(g))
            .cloned()
            .collect())
    }

    async fn delete_grants_for_directories(
        &mut self,
        directory_ids: &[DirectoryId],
    ) -> AppResult<u64> {
        let grants = &mut self.guard.grants;
        let before = grants.len();
        grants.retain(|_, g| !directory_ids.contains(&g.directory_id));
        Ok((before - grants.len()) as u64)
    }

    async fn user_exists(&mut self, user_id: UserId) -> AppResult<bool> {
        Ok(self.guard.users.contains(&user_id))
    }

    async fn project_exists(&mut self, project_id: ProjectId) -> AppResult<bool> {
        Ok(self.guard.projects.contains(&project_id))
    }

    async fn task_exists(&mut self, task_id: TaskId) -> AppResult<bool> {
        Ok(self.guard.tasks.contains(&task_id))
    }

    async fn commit(mut self) -> AppResult<()> {
        self.snapshot = None;
        debug!("Memory unit of work committed");
        Ok(())
    }

    async fn rollback(self) -> AppResult<()> {
        drop(self);
        Ok(())
    }
}
