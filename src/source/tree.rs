//! In-memory folder hierarchy.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use futures::FutureExt;
use tracing::debug;

use super::{FetchFn, FetchResult, Folder, FolderId};
use crate::error::FetchError;

// == Folder Tree ==
/// Folder hierarchy indexed by id and by parent.
#[derive(Debug, Default, Clone)]
pub struct FolderTree {
    folders: HashMap<FolderId, Folder>,
    children: HashMap<FolderId, Vec<FolderId>>,
}

impl FolderTree {
    /// Builds a tree from a flat folder list. Later duplicates replace earlier ones.
    pub fn from_folders(folders: impl IntoIterator<Item = Folder>) -> Self {
        let folders: HashMap<FolderId, Folder> =
            folders.into_iter().map(|folder| (folder.id, folder)).collect();

        let mut children: HashMap<FolderId, Vec<FolderId>> = HashMap::new();
        for folder in folders.values() {
            if let Some(mother_id) = folder.mother_id {
                children.entry(mother_id).or_default().push(folder.id);
            }
        }
        for ids in children.values_mut() {
            ids.sort_unstable();
        }

        Self { folders, children }
    }

    /// Loads a tree from a JSON array of folders.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading folder tree {}", path.display()))?;
        let folders: Vec<Folder> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing folder tree {}", path.display()))?;
        Ok(Self::from_folders(folders))
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    pub fn get(&self, id: FolderId) -> Option<&Folder> {
        self.folders.get(&id)
    }

    // == Descendants ==
    /// Returns every folder below `parent_id`, breadth first, excluding the parent.
    ///
    /// Cycles in the mother links are tolerated; each folder is reported once.
    pub fn descendants(&self, parent_id: FolderId) -> FetchResult {
        if !self.folders.contains_key(&parent_id) {
            return Err(FetchError::NotFound(parent_id));
        }

        let mut seen = HashSet::from([parent_id]);
        let mut queue = VecDeque::from([parent_id]);
        let mut found = Vec::new();

        while let Some(current) = queue.pop_front() {
            for child in self.children.get(&current).into_iter().flatten() {
                if seen.insert(*child) {
                    if let Some(folder) = self.folders.get(child) {
                        found.push(folder.clone());
                    }
                    queue.push_back(*child);
                }
            }
        }

        debug!(parent_id, count = found.len(), "Resolved folder descendants");
        Ok(found)
    }

    // == Fetch Function ==
    /// Wraps the tree as a fetch function for the folder cache.
    pub fn fetch_fn(self: Arc<Self>) -> FetchFn {
        Arc::new(move |parent_id| {
            let tree = Arc::clone(&self);
            async move { tree.descendants(parent_id) }.boxed()
        })
    }
}
