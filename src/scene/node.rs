//! SceneNode - one live node of the scene graph.
//!
//! A node is a positioned rectangle with a flex style, z-order, flags and the
//! view metadata the UI manager attaches when it creates the node. Structure
//! (parent/children) is owned by [`SceneGraph`](super::SceneGraph) and only
//! readable from here.

use std::fmt;
use std::rc::Rc;

use crate::components::ViewManager;
use crate::layout::FlexStyle;
use crate::types::{Frame, PropMap, Tag};

slotmap::new_key_type! {
    /// Generational handle to a scene node.
    ///
    /// Handles never keep a node alive: once the node is destroyed the handle
    /// resolves to nothing, even if the slot is reused.
    pub struct NodeId;
}

bitflags::bitflags! {
    /// Per-node state bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NodeFlags: u8 {
        /// Participates in hit-testing and layout.
        const VISIBLE = 1 << 0;
        /// Accepts descent during hit-testing.
        const ENABLED = 1 << 1;
        /// Layout must be recomputed for this node.
        const LAYOUT_DIRTY = 1 << 2;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::ENABLED
    }
}

/// Metadata the UI manager attaches to nodes it manages.
///
/// Nodes without it (decorations added by a view manager, for example) have
/// no logical identity on the JavaScript side.
#[derive(Clone)]
pub struct ViewMeta {
    /// Tag the node is registered under.
    pub tag: Tag,
    /// Manager that created the node and applies its property updates.
    /// Root views have none.
    pub manager: Option<Rc<dyn ViewManager>>,
}

impl ViewMeta {
    pub fn new(tag: Tag, manager: Option<Rc<dyn ViewManager>>) -> Self {
        Self { tag, manager }
    }

    /// Metadata for a root view: a tag and no view manager.
    pub fn root(tag: Tag) -> Self {
        Self { tag, manager: None }
    }
}

impl fmt::Debug for ViewMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewMeta")
            .field("tag", &self.tag)
            .field("manager", &self.manager.as_ref().map(|m| m.name().to_string()))
            .finish()
    }
}

/// A node in the scene graph.
#[derive(Debug, Default)]
pub struct SceneNode {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,

    /// Position relative to the parent, plus size.
    pub frame: Frame,
    /// Stacking order among siblings; higher is on top.
    pub z: i32,
    pub flags: NodeFlags,
    /// Flex input for the layout pass.
    pub style: FlexStyle,
    /// Last applied property values, keyed by property name.
    pub props: PropMap,
    pub meta: Option<ViewMeta>,
}

impl SceneNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order (not stacking order).
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Tag from the attached metadata, if any.
    pub fn tag(&self) -> Option<Tag> {
        self.meta.as_ref().map(|meta| meta.tag)
    }

    pub fn is_visible(&self) -> bool {
        self.flags.contains(NodeFlags::VISIBLE)
    }

    pub fn is_enabled(&self) -> bool {
        self.flags.contains(NodeFlags::ENABLED)
    }

    pub fn is_layout_dirty(&self) -> bool {
        self.flags.contains(NodeFlags::LAYOUT_DIRTY)
    }
}
