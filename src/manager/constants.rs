//! Constants exported to the JavaScript side once, at startup.

use serde_json::{json, Map};

use super::UiManager;
use crate::error::UiError;
use crate::types::Value;

impl UiManager {
    /// Per view type native props, custom event tables, root dimensions and
    /// the fullscreen modal size.
    ///
    /// ```text
    /// {
    ///   "RCTView": { "NativeProps": { "width": "number", ... } },
    ///   "customDirectEventTypes":   { "topLayout": { "registrationName": "onLayout" } },
    ///   "customBubblingEventTypes": { "topTouchStart": { "phasedRegistrationNames":
    ///                                   { "bubbled": "onTouchStart",
    ///                                     "captured": "onTouchStartCapture" } } },
    ///   "Dimensions": { "width": .., "height": .., "scale": .. },
    ///   "modalFullscreenView": { "width": .., "height": .. }
    /// }
    /// ```
    ///
    /// When two view types declare the same event, the first declaration is
    /// exported.
    pub fn constants_to_export(&self) -> Result<Value, UiError> {
        let surface = self.surface().ok_or(UiError::NotAttached)?;
        let prefix_len = self.config.event_prefix_len;

        let mut constants = Map::new();
        let mut direct_events = Map::new();
        let mut bubbling_events = Map::new();

        for descriptor in self.components.iter() {
            let config = descriptor.view_config();

            let mut manager_info = Map::new();
            if !config.is_empty() {
                manager_info.insert("NativeProps".to_string(), Value::Object(config.prop_types.clone()));
            }

            for event in &config.direct_events {
                direct_events.entry(event.clone()).or_insert_with(|| {
                    json!({ "registrationName": registration_name(event, prefix_len) })
                });
            }

            for event in &config.bubbling_events {
                bubbling_events.entry(event.clone()).or_insert_with(|| {
                    let bubbled = registration_name(event, prefix_len);
                    json!({
                        "phasedRegistrationNames": {
                            "captured": format!("{bubbled}Capture"),
                            "bubbled": bubbled,
                        }
                    })
                });
            }

            constants.insert(descriptor.name().to_string(), Value::Object(manager_info));
        }

        constants.insert("customBubblingEventTypes".to_string(), Value::Object(bubbling_events));
        constants.insert("customDirectEventTypes".to_string(), Value::Object(direct_events));
        constants.insert(
            "Dimensions".to_string(),
            json!({
                "width": surface.width(),
                "height": surface.height(),
                "scale": surface.scale(),
            }),
        );
        constants.insert(
            "modalFullscreenView".to_string(),
            json!({
                "width": surface.width(),
                "height": surface.height(),
            }),
        );

        Ok(Value::Object(constants))
    }
}

/// `topChange` → `onChange`: the source prefix becomes `on`.
fn registration_name(event: &str, prefix_len: usize) -> String {
    let rest = event
        .char_indices()
        .nth(prefix_len)
        .map_or("", |(index, _)| &event[index..]);
    format!("on{rest}")
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::super::test_support::attached;
    use super::*;
    use crate::bridge::{Bridge, ModuleData, QueuedResponses};
    use crate::components::{ViewConfig, ViewManager};
    use crate::scene::{NodeId, RootSurface, SceneGraph};
    use crate::types::PropMap;

    struct Slider;

    impl ViewManager for Slider {
        fn name(&self) -> &str {
            "RCTSlider"
        }

        fn view_config(&self) -> ViewConfig {
            ViewConfig {
                direct_events: vec!["topLayout".to_string(), "topSlidingComplete".to_string()],
                bubbling_events: vec!["topChange".to_string()],
                ..ViewConfig::default()
            }
        }

        fn apply_properties(&self, _scene: &mut SceneGraph, _node: NodeId, _props: &PropMap) {}
    }

    struct Bare;

    impl ViewManager for Bare {
        fn name(&self) -> &str {
            "RCTBare"
        }

        fn apply_properties(&self, _scene: &mut SceneGraph, _node: NodeId, _props: &PropMap) {}
    }

    #[test]
    fn test_registration_name() {
        assert_eq!(registration_name("topChange", 3), "onChange");
        assert_eq!(registration_name("to", 3), "on");
        assert_eq!(registration_name("xChange", 1), "onChange");
    }

    #[test]
    fn test_constants_shape() {
        let (manager, _surface, _queue) = attached();
        let constants = manager.constants_to_export().unwrap();

        assert!(constants["RCTView"]["NativeProps"]["flexDirection"].is_string());
        assert_eq!(
            constants["customBubblingEventTypes"]["topTouchStart"]["phasedRegistrationNames"],
            json!({ "bubbled": "onTouchStart", "captured": "onTouchStartCapture" })
        );
        assert_eq!(
            constants["customDirectEventTypes"]["topLayout"]["registrationName"],
            json!("onLayout")
        );
        assert_eq!(constants["Dimensions"], json!({ "width": 400.0, "height": 300.0, "scale": 2.0 }));
        assert_eq!(constants["modalFullscreenView"], json!({ "width": 400.0, "height": 300.0 }));
    }

    #[test]
    fn test_custom_view_manager_constants() {
        let bridge = Bridge::new(RootSurface::new(10.0, 10.0, 1.0), Rc::new(QueuedResponses::new()))
            .with_module(ModuleData::with_view_manager(Rc::new(Slider)))
            .with_module(ModuleData::with_view_manager(Rc::new(Bare)));
        let mut manager = UiManager::new();
        manager.set_bridge(bridge).unwrap();

        let constants = manager.constants_to_export().unwrap();
        assert_eq!(
            constants["customDirectEventTypes"]["topSlidingComplete"]["registrationName"],
            json!("onSlidingComplete")
        );
        assert_eq!(
            constants["customBubblingEventTypes"]["topChange"]["phasedRegistrationNames"]["captured"],
            json!("onChangeCapture")
        );
        assert!(constants["RCTSlider"]["NativeProps"].is_object());
        assert_eq!(constants["RCTBare"], json!({}));
    }

    #[test]
    fn test_constants_require_bridge() {
        assert_eq!(UiManager::new().constants_to_export(), Err(UiError::NotAttached));
    }
}
