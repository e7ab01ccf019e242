//! Root views: tag allocation, registration and root geometry changes.

use std::rc::Rc;

use spark_signals::{effect, flush_sync};
use tracing::{debug, trace};

use super::UiManager;
use crate::error::UiError;
use crate::scene::{NodeId, RootSurface, SceneNode, ViewMeta};
use crate::types::Tag;

impl UiManager {
    /// Next root tag (1, 11, 21, ... by default).
    pub fn allocate_root_tag(&mut self) -> Result<Tag, UiError> {
        let tag = self.root_tags.allocate().ok_or(UiError::RootTagsExhausted)?;
        debug!(tag, "allocateRootTag");
        Ok(tag)
    }

    /// Register a root node under the tag already attached to it.
    pub fn register_root_view(&mut self, root: NodeId) -> Result<Tag, UiError> {
        let tag = self
            .scene
            .node(root)
            .and_then(SceneNode::tag)
            .ok_or(UiError::UnmanagedNode {
                context: "registerRootView",
            })?;

        match self.lookup(tag) {
            Some(existing) if existing == root => return Ok(tag),
            Some(_) => return Err(UiError::DuplicateTag { tag }),
            None => {}
        }

        self.registry.remove(tag);
        self.registry.register(tag, root)?;
        debug!(tag, "registerRootView");
        Ok(tag)
    }

    /// Bind the visual parent as a root view: allocate a tag, attach it to
    /// the node and the surface, and register it.
    ///
    /// Mounting twice returns the tag from the first mount.
    pub fn mount_root_view(&mut self) -> Result<Tag, UiError> {
        let surface = self.surface().cloned().ok_or(UiError::NotAttached)?;
        let root = self.visual_parent.ok_or(UiError::NotAttached)?;

        if let Some(tag) = surface.attached_tag() {
            return Ok(tag);
        }

        let tag = self.allocate_root_tag()?;
        if let Some(node) = self.scene.node_mut(root) {
            node.meta = Some(ViewMeta::root(tag));
        }
        self.register_root_view(root)?;

        surface.attach_tag(tag);
        surface.polish();
        Ok(tag)
    }
}

/// Request layout whenever the surface's width, height or scale changes.
///
/// Changes before a root tag is attached are ignored: the bridge is not
/// ready for layout yet. Returns the function that stops watching.
pub(super) fn watch_root_geometry(surface: Rc<RootSurface>) -> Box<dyn FnOnce()> {
    let stop = effect(move || {
        let width = surface.width();
        let height = surface.height();
        let scale = surface.scale();

        match surface.attached_tag() {
            Some(tag) => {
                debug!(tag, width, height, scale, "root geometry changed");
                surface.polish();
            }
            None => trace!(width, height, scale, "root geometry changed before mount"),
        }
    });
    flush_sync();
    Box::new(stop)
}
