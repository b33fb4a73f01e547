//! Folder Source Module
//!
//! Types describing the fetch function the cache memoizes, plus an
//! in-memory folder hierarchy that can serve as one.

mod tree;

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

pub use tree::FolderTree;

/// Identifier of a folder
pub type FolderId = u64;

/// Result of one fetch function call
pub type FetchResult = std::result::Result<Vec<Folder>, FetchError>;

/// Future returned by a fetch function
pub type FetchFuture = BoxFuture<'static, FetchResult>;

/// Type-erased fetch function: parent id to its descendant folders
pub type FetchFn = Arc<dyn Fn(FolderId) -> FetchFuture + Send + Sync>;

// == Folder ==
/// A folder as reported by the fetch source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: FolderId,
    #[serde(default)]
    pub name: String,
    /// Parent folder, None for a root
    #[serde(default)]
    pub mother_id: Option<FolderId>,
}

impl Folder {
    pub fn new(id: FolderId, name: impl Into<String>, mother_id: Option<FolderId>) -> Self {
        Self {
            id,
            name: name.into(),
            mother_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_json_uses_mother_id() {
        let folder: Folder =
            serde_json::from_str(r#"{"id":3,"name":"News","motherId":1}"#).unwrap();
        assert_eq!(folder, Folder::new(3, "News", Some(1)));

        let root: Folder = serde_json::from_str(r#"{"id":1}"#).unwrap();
        assert_eq!(root.mother_id, None);
        assert!(root.name.is_empty());
    }
}
