//! SceneGraph - the live node tree the UI manager mutates.
//!
//! Nodes live in a generational arena and are addressed by [`NodeId`].
//! The graph owns node lifetime; anything else holding a `NodeId` holds a
//! non-owning handle that stops resolving once the node is destroyed.
//!
//! Destruction is deferred: [`SceneGraph::schedule_destroy`] only queues a
//! node, and [`SceneGraph::collect_garbage`] frees queued nodes (with their
//! current descendants) at the end of a processing turn.

use slotmap::SlotMap;

use super::node::{NodeFlags, NodeId, SceneNode};
use crate::types::{Frame, Point};

/// Arena-backed scene graph.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, SceneNode>,
    pending_destroy: Vec<NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Node lifecycle
    // =========================================================================

    /// Create a detached node with default state.
    pub fn create_node(&mut self) -> NodeId {
        self.nodes.insert(SceneNode::default())
    }

    /// Whether the handle still refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    /// Number of live nodes, including nodes scheduled for destruction.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Queue a node for destruction at the next [`collect_garbage`](Self::collect_garbage).
    pub fn schedule_destroy(&mut self, id: NodeId) {
        if self.contains(id) && !self.pending_destroy.contains(&id) {
            self.pending_destroy.push(id);
        }
    }

    pub fn pending_destroy_count(&self) -> usize {
        self.pending_destroy.len()
    }

    /// Free every queued node together with its current descendants.
    ///
    /// Returns the number of nodes freed.
    pub fn collect_garbage(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending_destroy);
        let mut freed = 0;

        for id in pending {
            if !self.contains(id) {
                continue;
            }
            self.set_parent(id, None);

            let mut doomed = self.descendants(id);
            doomed.push(id);
            for node in doomed {
                if self.nodes.remove(node).is_some() {
                    freed += 1;
                }
            }
        }

        freed
    }

    // =========================================================================
    // Structure
    // =========================================================================

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Children in insertion order. Empty for unknown nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Children sorted ascending by z-order. Equal z keeps insertion order.
    ///
    /// Position in this list is what batch commands call "index".
    pub fn children_by_z(&self, id: NodeId) -> Vec<NodeId> {
        let mut children = self.children(id).to_vec();
        children.sort_by_key(|&child| self.nodes.get(child).map(|node| node.z).unwrap_or(0));
        children
    }

    /// All descendants of `id` in pre-order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();

        while let Some(next) = stack.pop() {
            result.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }

        result
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Reparent `child`. `None` detaches it.
    ///
    /// Moving a node under a new parent appends it to that parent's children.
    /// Setting the current parent again is a no-op. Returns false (and changes
    /// nothing) if either node is unknown or the move would create a cycle.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> bool {
        if !self.contains(child) {
            return false;
        }
        if let Some(parent) = parent {
            if !self.contains(parent) || self.is_ancestor_or_self(child, parent) {
                return false;
            }
        }

        let old_parent = self.parent(child);
        if old_parent == parent {
            return true;
        }

        if let Some(old) = old_parent.and_then(|old| self.nodes.get_mut(old)) {
            old.children.retain(|&c| c != child);
        }
        if let Some(new) = parent.and_then(|new| self.nodes.get_mut(new)) {
            new.children.push(child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = parent;
        }

        true
    }

    // =========================================================================
    // Node state
    // =========================================================================

    pub fn set_z(&mut self, id: NodeId, z: i32) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.z = z;
        }
    }

    pub fn set_frame(&mut self, id: NodeId, frame: Frame) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.frame = frame;
        }
    }

    pub fn frame(&self, id: NodeId) -> Option<Frame> {
        self.nodes.get(id).map(|node| node.frame)
    }

    pub fn set_flag(&mut self, id: NodeId, flag: NodeFlags, on: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.flags.set(flag, on);
        }
    }

    /// Mark a node and its whole subtree as needing layout.
    pub fn mark_layout_dirty(&mut self, id: NodeId) {
        let mut targets = self.descendants(id);
        targets.push(id);
        for target in targets {
            self.set_flag(target, NodeFlags::LAYOUT_DIRTY, true);
        }
    }

    /// Clear the dirty bit on one node (not its subtree).
    pub fn clear_layout_dirty(&mut self, id: NodeId) {
        self.set_flag(id, NodeFlags::LAYOUT_DIRTY, false);
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Map a point from `id`'s coordinates into `ancestor`'s coordinates by
    /// adding frame origins on the way up.
    ///
    /// With `ancestor == None`, or an ancestor that is not on the path, the
    /// walk stops at the topmost ancestor and the result is in its space.
    pub fn map_to_ancestor(&self, id: NodeId, point: Point, ancestor: Option<NodeId>) -> Point {
        let mut mapped = point;
        let mut current = id;

        while Some(current) != ancestor {
            let Some(node) = self.nodes.get(current) else {
                break;
            };
            let Some(parent) = node.parent else {
                break;
            };
            mapped = mapped.offset(node.frame.x, node.frame.y);
            current = parent;
        }

        mapped
    }

    /// Map a point from a parent's coordinates into `child`'s coordinates.
    pub fn map_to_child(&self, child: NodeId, point: Point) -> Point {
        match self.nodes.get(child) {
            Some(node) => point.offset(-node.frame.x, -node.frame.y),
            None => point,
        }
    }

    /// Topmost visible child of `id` containing `point` (in `id`'s
    /// coordinates). Higher z wins; among equal z the later child wins.
    ///
    /// Enabled state is not considered here; callers decide whether a
    /// disabled hit stops them.
    pub fn child_at(&self, id: NodeId, point: Point) -> Option<NodeId> {
        self.children_by_z(id).into_iter().rev().find(|&child| {
            self.nodes.get(child).is_some_and(|node| {
                node.is_visible() && node.frame.contains_local(self.map_to_child(child, point))
            })
        })
    }
}
