//! RCTView - the base container view type.
//!
//! Applies flex layout properties to the node's FlexStyle, `pointerEvents`
//! to the enabled bit and `display` to visibility. Every value is also kept
//! in the node's property map (null removes it).

use serde_json::json;

use super::view_manager::{ViewConfig, ViewManager};
use crate::layout::FlexStyle;
use crate::scene::{NodeFlags, NodeId, SceneGraph};
use crate::types::{PropMap, Value};

/// Manager for plain `RCTView` containers.
#[derive(Debug, Default, Clone, Copy)]
pub struct BaseViewManager;

impl BaseViewManager {
    pub const NAME: &'static str = "RCTView";
}

impl ViewManager for BaseViewManager {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn view_config(&self) -> ViewConfig {
        let mut prop_types = PropMap::new();
        for (name, ty) in FlexStyle::prop_types() {
            prop_types.insert((*name).to_string(), json!(ty));
        }
        prop_types.insert("pointerEvents".to_string(), json!("String"));

        ViewConfig {
            prop_types,
            direct_events: vec!["topLayout".to_string()],
            bubbling_events: vec![
                "topTouchStart".to_string(),
                "topTouchMove".to_string(),
                "topTouchEnd".to_string(),
                "topTouchCancel".to_string(),
            ],
        }
    }

    fn apply_properties(&self, scene: &mut SceneGraph, node: NodeId, props: &PropMap) {
        let mut layout_changed = false;

        {
            let Some(target) = scene.node_mut(node) else {
                return;
            };

            for (key, value) in props {
                match key.as_str() {
                    "pointerEvents" => {
                        let enabled = !matches!(value, Value::String(s) if s == "none");
                        target.flags.set(NodeFlags::ENABLED, enabled);
                    }
                    _ => {
                        if target.style.apply_prop(key, value) {
                            layout_changed = true;
                        }
                    }
                }

                if value.is_null() {
                    target.props.remove(key);
                } else {
                    target.props.insert(key.clone(), value.clone());
                }
            }

            let visible = !target.style.display_none;
            target.flags.set(NodeFlags::VISIBLE, visible);
        }

        if layout_changed {
            scene.mark_layout_dirty(node);
        }
    }
}
