//! Arena of directory rows keyed by ID with a parent index.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use chrono::{DateTime, Utc};

use dirhub_core::error::AppError;
use dirhub_core::result::AppResult;
use dirhub_core::types::{DirectoryId, ProjectId};
use dirhub_entity::directory::{CreateDirectory, Directory};

/// Directory rows plus a `parent_id -> children` index.
///
/// Rows are never removed; soft-deleted rows stay in both maps and are
/// filtered out by every read that is not explicitly raw.
#[derive(Debug, Clone, Default)]
pub struct DirectoryArena {
    rows: BTreeMap<DirectoryId, Directory>,
    children: BTreeMap<DirectoryId, BTreeSet<DirectoryId>>,
    last_id: i64,
}

impl DirectoryArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of rows, deleted ones included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the arena holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Live row by ID.
    pub fn get(&self, id: DirectoryId) -> Option<&Directory> {
        self.rows.get(&id).filter(|d| d.is_active())
    }

    /// Row by ID regardless of the delete flag.
    pub fn get_raw(&self, id: DirectoryId) -> Option<&Directory> {
        self.rows.get(&id)
    }

    /// Live rows in ID order.
    pub fn active(&self) -> impl Iterator<Item = &Directory> {
        self.rows.values().filter(|d| d.is_active())
    }

    /// Live direct children of `parent` in ID order.
    pub fn children_of(&self, parent: DirectoryId) -> Vec<&Directory> {
        self.children
            .get(&parent)
            .into_iter()
            .flatten()
            .filter_map(|id| self.get(*id))
            .collect()
    }

    /// Live rows below a live `root`, breadth-first, `root` excluded.
    ///
    /// A deleted row hides its whole subtree.
    pub fn descendants(&self, root: DirectoryId) -> Vec<&Directory> {
        if self.get(root).is_none() {
            return Vec::new();
        }

        let mut found = Vec::new();
        let mut queue = VecDeque::from([root]);
        while let Some(id) = queue.pop_front() {
            for child in self.children_of(id) {
                queue.push_back(child.id);
                found.push(child);
            }
        }
        found
    }

    /// Live row linked to `project`.
    pub fn find_by_project(&self, project: ProjectId) -> Option<&Directory> {
        self.active().find(|d| d.project_id == Some(project))
    }

    /// Insert a new row and index it under its parent.
    pub fn insert(&mut self, data: &CreateDirectory, now: DateTime<Utc>) -> AppResult<Directory> {
        if let Some(parent) = data.parent_id {
            if !self.rows.contains_key(&parent) {
                return Err(AppError::database(format!(
                    "Parent directory {parent} does not exist"
                )));
            }
        }
        if let Some(project) = data.project_id {
            if self.find_by_project(project).is_some() {
                return Err(AppError::conflict(format!(
                    "Project {project} already has a directory"
                )));
            }
        }

        self.last_id += 1;
        let id = DirectoryId::new(self.last_id);
        let dir = data.clone().into_directory(id, now);

        if let Some(parent) = dir.parent_id {
            self.children.entry(parent).or_default().insert(id);
        }
        self.rows.insert(id, dir.clone());
        Ok(dir)
    }

    /// Replace the mutable fields of a live row, re-indexing on parent change.
    pub fn update(&mut self, dir: &Directory) -> AppResult<Directory> {
        let previous_parent = self
            .get(dir.id)
            .map(|d| d.parent_id)
            .ok_or_else(|| AppError::not_found(format!("Directory {} not found", dir.id)))?;

        if let Some(project) = dir.project_id {
            if self
                .find_by_project(project)
                .is_some_and(|other| other.id != dir.id)
            {
                return Err(AppError::conflict(format!(
                    "Project {project} already has a directory"
                )));
            }
        }

        if previous_parent != dir.parent_id {
            if let Some(old) = previous_parent {
                if let Some(set) = self.children.get_mut(&old) {
                    set.remove(&dir.id);
                }
            }
            if let Some(new) = dir.parent_id {
                self.children.entry(new).or_default().insert(dir.id);
            }
        }

        let row = self
            .rows
            .get_mut(&dir.id)
            .ok_or_else(|| AppError::not_found(format!("Directory {} not found", dir.id)))?;
        row.name.clone_from(&dir.name);
        row.parent_id = dir.parent_id;
        row.project_id = dir.project_id;
        row.task_id = dir.task_id;
        row.updated_at = dir.updated_at;
        Ok(row.clone())
    }

    /// Flag live rows as deleted. Returns how many changed state.
    pub fn mark_deleted(&mut self, ids: &[DirectoryId], now: DateTime<Utc>) -> u64 {
        let mut flagged = 0;
        for id in ids {
            if let Some(row) = self.rows.get_mut(id).filter(|d| d.is_active()) {
                row.deleted = true;
                row.updated_at = now;
                flagged += 1;
            }
        }
        flagged
    }
}
