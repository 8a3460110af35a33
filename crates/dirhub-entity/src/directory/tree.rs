//! Directory tree structures for hierarchical display.

use serde::{Deserialize, Serialize};

use dirhub_core::types::{DirectoryId, ProjectId, TaskId};

use super::model::Directory;

/// A node in a directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    /// Directory ID.
    pub id: DirectoryId,
    /// Directory name.
    pub name: String,
    /// Linked project.
    pub project_id: Option<ProjectId>,
    /// Linked task.
    pub task_id: Option<TaskId>,
    /// Number of direct child directories.
    pub child_count: u64,
    /// Child directory nodes.
    pub children: Vec<DirectoryNode>,
}

impl DirectoryNode {
    /// Create a node for `dir` with the given children.
    pub fn new(dir: &Directory, children: Vec<DirectoryNode>) -> Self {
        Self {
            id: dir.id,
            name: dir.name.clone(),
            project_id: dir.project_id,
            task_id: dir.task_id,
            child_count: children.len() as u64,
            children,
        }
    }

    /// Count this node and every node below it.
    pub fn total_nodes(&self) -> u64 {
        1 + self.children.iter().map(DirectoryNode::total_nodes).sum::<u64>()
    }
}
