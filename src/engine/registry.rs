//! Node Registry - tag to scene node lookup.
//!
//! Maps bridge tags to [`NodeId`] handles:
//! - O(1) lookup by tag
//! - Handles are non-owning; the scene graph owns the nodes
//! - Registering a tag that is already taken is refused
//!
//! Removal from the registry and scheduling the node's destruction happen
//! together in the UI manager, so a removed tag never resolves to a node
//! that is about to go away.

use std::collections::HashMap;

use crate::error::UiError;
use crate::scene::NodeId;
use crate::types::Tag;

/// Tag → node handle mapping.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    views: HashMap<Tag, NodeId>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `tag → node`.
    ///
    /// Re-registering the same node under the same tag is a no-op; binding a
    /// taken tag to a different node is [`UiError::DuplicateTag`].
    pub fn register(&mut self, tag: Tag, node: NodeId) -> Result<(), UiError> {
        match self.views.get(&tag) {
            Some(&existing) if existing == node => Ok(()),
            Some(_) => Err(UiError::DuplicateTag { tag }),
            None => {
                self.views.insert(tag, node);
                Ok(())
            }
        }
    }

    /// Look up the node registered under `tag`.
    pub fn lookup(&self, tag: Tag) -> Option<NodeId> {
        self.views.get(&tag).copied()
    }

    /// Erase the mapping. Does not destroy the node.
    pub fn remove(&mut self, tag: Tag) -> Option<NodeId> {
        self.views.remove(&tag)
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.views.contains_key(&tag)
    }

    /// Number of registered views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
