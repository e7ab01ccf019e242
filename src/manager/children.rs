//! manageChildren - structural batches on one container.
//!
//! A batch is validated in full before anything is touched; any error leaves
//! the tree, the registry and the destruction queue exactly as they were.
//!
//! Index semantics:
//! - remove indices address the container's children sorted by z-order
//!   before the batch
//! - add indices are destination positions in the final child list; an added
//!   child's z-order is its destination index
//! - surviving children fill the remaining positions in their old order and
//!   take their new position as z-order

use std::collections::HashSet;

use tracing::debug;

use super::UiManager;
use crate::bridge::ChildrenUpdate;
use crate::error::UiError;
use crate::scene::{NodeId, SceneNode};
use crate::types::Tag;

/// A validated batch, ready to apply.
struct BatchPlan {
    container: NodeId,
    removed: Vec<NodeId>,
    added: Vec<NodeId>,
    /// Final children in stacking order.
    order: Vec<NodeId>,
}

impl UiManager {
    /// Apply a structural batch to the container registered under
    /// `container_tag`.
    ///
    /// Removed children lose their registry entries (with their whole
    /// subtree) and are destroyed at the end of the turn. Move lists are not
    /// acted on.
    pub fn manage_children(&mut self, container_tag: Tag, update: &ChildrenUpdate) -> Result<(), UiError> {
        debug!(
            container_tag,
            add_tags = ?update.add_child_tags,
            add_at = ?update.add_at_indices,
            remove_at = ?update.remove_at_indices,
            "manageChildren"
        );
        if !update.move_from.is_empty() || !update.move_to.is_empty() {
            debug!(
                move_from = ?update.move_from,
                move_to = ?update.move_to,
                "move lists ignored"
            );
        }

        let plan = self.plan_batch(container_tag, update)?;
        self.apply_batch(plan);
        Ok(())
    }

    /// Remove every child of the container registered under `container_tag`.
    pub fn remove_subviews_from_container(&mut self, container_tag: Tag) -> Result<(), UiError> {
        let container = self
            .lookup(container_tag)
            .ok_or(UiError::UnknownView { tag: container_tag })?;
        let count = self.scene.children(container).len();
        self.manage_children(container_tag, &ChildrenUpdate::remove_all(count))
    }

    fn plan_batch(&self, container_tag: Tag, update: &ChildrenUpdate) -> Result<BatchPlan, UiError> {
        let container = self
            .lookup(container_tag)
            .ok_or(UiError::UnknownView { tag: container_tag })?;
        let current = self.scene.children_by_z(container);

        // Removals
        let mut removed = Vec::with_capacity(update.remove_at_indices.len());
        let mut seen = HashSet::new();
        for &index in &update.remove_at_indices {
            let &child = current.get(index).ok_or(UiError::IndexOutOfRange {
                index,
                len: current.len(),
            })?;
            if !seen.insert(index) {
                return Err(UiError::DuplicateIndex { index });
            }
            if self.scene.node(child).and_then(SceneNode::tag).is_none() {
                return Err(UiError::UnmanagedNode {
                    context: "manageChildren",
                });
            }
            removed.push(child);
        }

        // Everything whose registry entry the removals will purge
        let doomed: HashSet<NodeId> = removed
            .iter()
            .flat_map(|&child| {
                let mut subtree = self.scene.descendants(child);
                subtree.push(child);
                subtree
            })
            .collect();

        // Additions
        if update.add_child_tags.len() != update.add_at_indices.len() {
            return Err(UiError::MismatchedBatch {
                tags: update.add_child_tags.len(),
                indices: update.add_at_indices.len(),
            });
        }

        let mut additions = Vec::with_capacity(update.add_child_tags.len());
        let mut seen_indices = HashSet::new();
        let mut seen_children = HashSet::new();
        for (&tag, &index) in update.add_child_tags.iter().zip(&update.add_at_indices) {
            let child = self
                .lookup(tag)
                .filter(|child| !doomed.contains(child))
                .ok_or(UiError::UnknownView { tag })?;
            if self.scene.is_ancestor_or_self(child, container) {
                return Err(UiError::CyclicHierarchy {
                    tag,
                    container: container_tag,
                });
            }
            if !seen_indices.insert(index) {
                return Err(UiError::DuplicateIndex { index });
            }
            if !seen_children.insert(child) {
                return Err(UiError::BadArguments {
                    method: "manageChildren".to_string(),
                    reason: format!("view {tag} added twice"),
                });
            }
            additions.push((index, child));
        }

        // Final order: survivors keep their relative order, additions land on
        // their destination index
        let mut order: Vec<NodeId> = current
            .iter()
            .copied()
            .filter(|child| !doomed.contains(child) && !seen_children.contains(child))
            .collect();
        additions.sort_by_key(|&(index, _)| index);
        for &(index, child) in &additions {
            if index > order.len() {
                return Err(UiError::IndexOutOfRange {
                    index,
                    len: order.len(),
                });
            }
            order.insert(index, child);
        }

        Ok(BatchPlan {
            container,
            removed,
            added: additions.into_iter().map(|(_, child)| child).collect(),
            order,
        })
    }

    fn apply_batch(&mut self, plan: BatchPlan) {
        let changed = !plan.removed.is_empty() || !plan.added.is_empty();

        for child in plan.removed {
            self.release_subtree(child);
            self.scene.set_parent(child, None);
            self.scene.schedule_destroy(child);
        }

        for &child in &plan.added {
            self.scene.set_parent(child, Some(plan.container));
            self.scene.mark_layout_dirty(child);
        }

        for (position, &child) in plan.order.iter().enumerate() {
            self.scene.set_z(child, position as i32);
        }

        if changed {
            self.request_layout();
        }
    }

    /// Drop the registry entries of `node` and everything below it.
    fn release_subtree(&mut self, node: NodeId) {
        let mut subtree = self.scene.descendants(node);
        subtree.push(node);

        for id in subtree {
            let Some(tag) = self.scene.node(id).and_then(SceneNode::tag) else {
                continue;
            };
            if self.registry.lookup(tag) == Some(id) {
                self.registry.remove(tag);
                debug!(tag, "released view");
            }
        }
    }
}
