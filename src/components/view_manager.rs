//! ViewManager - per view type behavior.
//!
//! One implementation per view type (`RCTView`, ...). A manager builds nodes
//! for its type and applies property maps to them; the UI manager routes
//! every later update for a node to the manager recorded in the node's
//! metadata.

use crate::scene::{NodeId, SceneGraph};
use crate::types::PropMap;

/// Static description of a view type, exported to the JavaScript side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewConfig {
    /// Property name → JavaScript type name.
    pub prop_types: PropMap,
    /// Events delivered only to the target (source names, e.g. `topLayout`).
    pub direct_events: Vec<String>,
    /// Events with capture and bubble phases (source names).
    pub bubbling_events: Vec<String>,
}

impl ViewConfig {
    pub fn is_empty(&self) -> bool {
        self.prop_types.is_empty() && self.direct_events.is_empty() && self.bubbling_events.is_empty()
    }
}

/// Factory and property applier for one view type.
pub trait ViewManager {
    /// Type name views of this kind are created under.
    fn name(&self) -> &str;

    /// Exported configuration. Queried once when the component table is built.
    fn view_config(&self) -> ViewConfig {
        ViewConfig::default()
    }

    /// Build a detached node with the initial properties applied.
    ///
    /// Returning `None` reports a creation failure.
    fn create_view(&self, scene: &mut SceneGraph, props: &PropMap) -> Option<NodeId> {
        let node = scene.create_node();
        self.apply_properties(scene, node, props);
        Some(node)
    }

    /// Apply a property mapping to an existing node.
    fn apply_properties(&self, scene: &mut SceneGraph, node: NodeId, props: &PropMap);
}
