//! Bridge - the transport side the UI manager attaches to.
//!
//! The bridge supplies three things:
//! - the module list, read once at attach time to build the component table
//! - the root surface (visual parent) the view tree hangs off
//! - a response sink for callback results
//!
//! Incoming calls arrive as a method name plus positional JSON arguments and
//! are decoded into [`Command`]s.

mod command;
mod response;

pub use command::*;
pub use response::*;

use std::rc::Rc;

use crate::components::ViewManager;
use crate::scene::RootSurface;

/// A module registered with the bridge, optionally exposing a view manager.
#[derive(Clone)]
pub struct ModuleData {
    name: String,
    view_manager: Option<Rc<dyn ViewManager>>,
}

impl ModuleData {
    /// A module with no view manager capability.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            view_manager: None,
        }
    }

    /// A module exposing `manager`. The module takes the manager's name.
    pub fn with_view_manager(manager: Rc<dyn ViewManager>) -> Self {
        Self {
            name: manager.name().to_string(),
            view_manager: Some(manager),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn view_manager(&self) -> Option<&Rc<dyn ViewManager>> {
        self.view_manager.as_ref()
    }
}

impl std::fmt::Debug for ModuleData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleData")
            .field("name", &self.name)
            .field("view_manager", &self.view_manager.as_ref().map(|m| m.name()))
            .finish()
    }
}

/// Everything the UI manager consumes from the transport.
#[derive(Clone)]
pub struct Bridge {
    modules: Vec<ModuleData>,
    surface: Rc<RootSurface>,
    responses: Rc<dyn ResponseSink>,
}

impl Bridge {
    pub fn new(surface: Rc<RootSurface>, responses: Rc<dyn ResponseSink>) -> Self {
        Self {
            modules: Vec::new(),
            surface,
            responses,
        }
    }

    /// Builder: register another module.
    pub fn with_module(mut self, module: ModuleData) -> Self {
        self.modules.push(module);
        self
    }

    pub fn modules(&self) -> &[ModuleData] {
        &self.modules
    }

    /// The root surface every root view is parented to.
    pub fn visual_parent(&self) -> &Rc<RootSurface> {
        &self.surface
    }

    pub fn responses(&self) -> &Rc<dyn ResponseSink> {
        &self.responses
    }

    /// Response block for one accepted callback.
    pub fn response_block(&self, callback: CallbackId) -> ResponseBlock {
        ResponseBlock::new(callback, Rc::clone(&self.responses))
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("modules", &self.modules)
            .field("surface", &self.surface.size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::BaseViewManager;

    #[test]
    fn test_module_takes_manager_name() {
        let module = ModuleData::with_view_manager(Rc::new(BaseViewManager));
        assert_eq!(module.name(), "RCTView");
        assert!(module.view_manager().is_some());
        assert!(ModuleData::new("Timing").view_manager().is_none());
    }

    #[test]
    fn test_response_block_uses_bridge_sink() {
        let queue = Rc::new(QueuedResponses::new());
        let bridge = Bridge::new(RootSurface::new(100.0, 100.0, 1.0), queue.clone())
            .with_module(ModuleData::new("Timing"));

        assert_eq!(bridge.modules().len(), 1);
        bridge.response_block(9).respond(vec![serde_json::json!(1)]);

        let delivered = queue.drain();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].callback, 9);
    }
}
