//! createView / updateView.

use std::rc::Rc;

use tracing::debug;

use super::UiManager;
use crate::error::UiError;
use crate::scene::{NodeId, ViewMeta};
use crate::types::{PropMap, Tag};

impl UiManager {
    /// Create a detached view of type `view_name` and register it under
    /// `tag`.
    ///
    /// The node stays out of the hierarchy (and layout clean) until a
    /// `manage_children` call adds it somewhere. `root_tag` is bookkeeping
    /// only.
    pub fn create_view(
        &mut self,
        tag: Tag,
        view_name: &str,
        root_tag: Tag,
        props: &PropMap,
    ) -> Result<NodeId, UiError> {
        debug!(tag, view_name, root_tag, props = props.len(), "createView");

        if self.lookup(tag).is_some() {
            return Err(UiError::DuplicateTag { tag });
        }

        let descriptor = self
            .components
            .resolve(view_name)
            .ok_or_else(|| UiError::UnknownViewType {
                name: view_name.to_string(),
            })?;
        let manager = Rc::clone(descriptor.manager());

        let node = descriptor
            .create_view(&mut self.scene, props)
            .ok_or_else(|| UiError::ViewCreationFailed {
                name: view_name.to_string(),
            })?;

        if let Some(created) = self.scene.node_mut(node) {
            created.meta = Some(ViewMeta::new(tag, Some(manager)));
        }
        self.scene.clear_layout_dirty(node);

        // Whatever is left under this tag points at a freed node.
        self.registry.remove(tag);
        self.registry.register(tag, node)?;

        Ok(node)
    }

    /// Apply `props` to the view registered under `tag` through the manager
    /// that created it, then request layout.
    ///
    /// `view_name` is informational; the node already knows its manager.
    pub fn update_view(&mut self, tag: Tag, view_name: &str, props: &PropMap) -> Result<(), UiError> {
        debug!(tag, view_name, props = props.len(), "updateView");

        let node = self.lookup(tag).ok_or(UiError::UnknownView { tag })?;
        let meta = self
            .scene
            .node(node)
            .and_then(|n| n.meta.as_ref())
            .ok_or(UiError::UnmanagedNode {
                context: "updateView",
            })?;
        let manager = meta
            .manager
            .as_ref()
            .map(Rc::clone)
            .ok_or(UiError::NoViewManager { tag })?;

        manager.apply_properties(&mut self.scene, node, props);
        self.request_layout();
        Ok(())
    }
}
