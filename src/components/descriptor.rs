//! Component Factory Table - view type name → descriptor.
//!
//! Built once when the bridge attaches, from every module that exposes a view
//! manager. Immutable afterwards.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, warn};

use super::view_manager::{ViewConfig, ViewManager};
use crate::bridge::ModuleData;
use crate::scene::{NodeId, SceneGraph};
use crate::types::PropMap;

/// A registered view type: its manager plus the cached view configuration.
#[derive(Clone)]
pub struct ComponentDescriptor {
    name: String,
    manager: Rc<dyn ViewManager>,
    config: ViewConfig,
}

impl ComponentDescriptor {
    pub fn new(manager: Rc<dyn ViewManager>) -> Self {
        let name = manager.name().to_string();
        let config = manager.view_config();
        Self {
            name,
            manager,
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn manager(&self) -> &Rc<dyn ViewManager> {
        &self.manager
    }

    pub fn view_config(&self) -> &ViewConfig {
        &self.config
    }

    /// Ask the manager for a new node with `props` applied.
    pub fn create_view(&self, scene: &mut SceneGraph, props: &PropMap) -> Option<NodeId> {
        self.manager.create_view(scene, props)
    }
}

impl std::fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("name", &self.name)
            .field("config", &self.config)
            .finish()
    }
}

/// Name-keyed table of component descriptors, in module registration order.
#[derive(Debug, Default, Clone)]
pub struct ComponentTable {
    descriptors: Vec<ComponentDescriptor>,
    by_name: HashMap<String, usize>,
}

impl ComponentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect one descriptor per module exposing a view manager.
    ///
    /// A second manager declaring an already registered name is ignored.
    pub fn from_modules(modules: &[ModuleData]) -> Self {
        let mut table = Self::new();
        for module in modules {
            if let Some(manager) = module.view_manager() {
                table.insert(Rc::clone(manager));
            }
        }
        table
    }

    /// Register a manager. Returns false if its name is already taken.
    pub fn insert(&mut self, manager: Rc<dyn ViewManager>) -> bool {
        let descriptor = ComponentDescriptor::new(manager);
        if self.by_name.contains_key(descriptor.name()) {
            warn!(name = descriptor.name(), "duplicate view manager ignored");
            return false;
        }

        debug!(name = descriptor.name(), "registered view manager");
        self.by_name
            .insert(descriptor.name().to_string(), self.descriptors.len());
        self.descriptors.push(descriptor);
        true
    }

    pub fn resolve(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.by_name.get(name).map(|&i| &self.descriptors[i])
    }

    /// Descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentDescriptor> {
        self.descriptors.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::BaseViewManager;

    struct Named(&'static str);

    impl ViewManager for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn apply_properties(&self, _scene: &mut SceneGraph, _node: NodeId, _props: &PropMap) {}
    }

    #[test]
    fn test_from_modules_skips_plain_modules() {
        let modules = vec![
            ModuleData::new("Timing"),
            ModuleData::with_view_manager(Rc::new(BaseViewManager)),
            ModuleData::with_view_manager(Rc::new(Named("RCTSlider"))),
        ];

        let table = ComponentTable::from_modules(&modules);
        assert_eq!(table.names(), vec!["RCTView", "RCTSlider"]);
        assert!(table.resolve("RCTSlider").is_some());
        assert!(table.resolve("Timing").is_none());
    }

    #[test]
    fn test_first_registration_wins() {
        let mut table = ComponentTable::new();
        assert!(table.insert(Rc::new(BaseViewManager)));
        assert!(!table.insert(Rc::new(Named("RCTView"))));

        assert_eq!(table.len(), 1);
        let descriptor = table.resolve("RCTView").unwrap();
        assert!(!descriptor.view_config().is_empty());
    }

    #[test]
    fn test_descriptor_creates_view() {
        let table = ComponentTable::from_modules(&[ModuleData::with_view_manager(Rc::new(
            Named("RCTBox"),
        ))]);
        let mut scene = SceneGraph::new();

        let node = table
            .resolve("RCTBox")
            .and_then(|d| d.create_view(&mut scene, &PropMap::new()));
        assert!(node.is_some_and(|n| scene.contains(n)));
    }
}
