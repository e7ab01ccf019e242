//! UI Manager - applies bridge commands to the scene graph.
//!
//! # Lifecycle
//!
//! ```text
//! UiManager::new()            unattached: no component table, no surface
//!     │
//!     ▼ set_bridge(bridge)    build component table, create visual parent,
//!     │                       watch root width/height/scale
//!     ▼
//! attached ──► set_bridge again → DoubleAttach, nothing changes
//! ```
//!
//! # Turns
//!
//! Commands mutate the scene immediately and only *request* layout through
//! the root surface. [`UiManager::end_turn`] runs at most one layout pass
//! for everything requested during the turn, then frees removed nodes.
//!
//! All methods assume a single owning thread; nothing here locks.

mod children;
mod constants;
mod dispatch;
mod geometry;
mod roots;
mod views;

pub use geometry::{HitTarget, Measurement};

use std::rc::Rc;

use tracing::{debug, error, info};

use crate::bridge::{Bridge, Call};
use crate::components::ComponentTable;
use crate::config::UiManagerConfig;
use crate::engine::{NodeRegistry, RootTagAllocator};
use crate::error::UiError;
use crate::layout::compute_layout;
use crate::scene::{NodeId, RootSurface, SceneGraph};
use crate::types::Tag;

/// What [`UiManager::end_turn`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnSummary {
    /// A layout pass ran (at most one per turn).
    pub layout_ran: bool,
    /// Nodes laid out by that pass.
    pub nodes_laid_out: usize,
    /// Removed nodes freed at the end of the turn.
    pub nodes_destroyed: usize,
}

/// The native UI manager.
pub struct UiManager {
    config: UiManagerConfig,
    bridge: Option<Bridge>,
    components: ComponentTable,
    registry: NodeRegistry,
    root_tags: RootTagAllocator,
    scene: SceneGraph,
    /// Scene node standing for the root surface; created at attach.
    visual_parent: Option<NodeId>,
    stop_root_watch: Option<Box<dyn FnOnce()>>,
}

impl UiManager {
    /// Module name the manager is exported under.
    pub const MODULE_NAME: &'static str = "RCTUIManager";

    pub fn new() -> Self {
        Self::from_valid_config(UiManagerConfig::default())
    }

    /// Create a manager with custom tunables.
    pub fn with_config(config: UiManagerConfig) -> Result<Self, UiError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: UiManagerConfig) -> Self {
        Self {
            root_tags: RootTagAllocator::new(config.first_root_tag, config.root_tag_stride),
            config,
            bridge: None,
            components: ComponentTable::new(),
            registry: NodeRegistry::new(),
            scene: SceneGraph::new(),
            visual_parent: None,
            stop_root_watch: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &UiManagerConfig {
        &self.config
    }

    pub fn is_attached(&self) -> bool {
        self.bridge.is_some()
    }

    pub fn bridge(&self) -> Option<&Bridge> {
        self.bridge.as_ref()
    }

    pub fn components(&self) -> &ComponentTable {
        &self.components
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Mutable scene access for embedders (decorations, manual frames).
    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    /// Scene node for the root surface, once attached.
    pub fn visual_parent(&self) -> Option<NodeId> {
        self.visual_parent
    }

    pub fn surface(&self) -> Option<&Rc<RootSurface>> {
        self.bridge.as_ref().map(Bridge::visual_parent)
    }

    /// Node registered under `tag`, if it is still alive.
    pub fn lookup(&self, tag: Tag) -> Option<NodeId> {
        self.registry
            .lookup(tag)
            .filter(|&node| self.scene.contains(node))
    }

    // =========================================================================
    // Attach
    // =========================================================================

    /// Attach the bridge. Only the first call has any effect.
    pub fn set_bridge(&mut self, bridge: Bridge) -> Result<(), UiError> {
        if self.bridge.is_some() {
            error!("bridge already set, UI manager already initialised");
            return Err(UiError::DoubleAttach);
        }

        self.components = ComponentTable::from_modules(bridge.modules());
        self.visual_parent = Some(self.scene.create_node());
        self.stop_root_watch = Some(roots::watch_root_geometry(Rc::clone(bridge.visual_parent())));

        info!(
            modules = bridge.modules().len(),
            view_managers = self.components.len(),
            "UI manager attached"
        );
        self.bridge = Some(bridge);
        Ok(())
    }

    // =========================================================================
    // Turns
    // =========================================================================

    /// Ask for a layout pass at the end of the current turn. Repeated
    /// requests collapse into one.
    pub fn request_layout(&self) {
        if let Some(surface) = self.surface() {
            surface.polish();
        }
    }

    /// Finish a processing turn: run the requested layout pass, if any, and
    /// free nodes removed during the turn.
    pub fn end_turn(&mut self) -> Result<TurnSummary, UiError> {
        let layout = self.layout_if_requested();
        let nodes_destroyed = self.scene.collect_garbage();
        let nodes_laid_out = layout?;

        let summary = TurnSummary {
            layout_ran: nodes_laid_out.is_some(),
            nodes_laid_out: nodes_laid_out.unwrap_or(0),
            nodes_destroyed,
        };
        debug!(?summary, "turn ended");
        Ok(summary)
    }

    /// Dispatch a batch of bridge calls, then end the turn.
    pub fn run_turn<I>(&mut self, calls: I) -> Result<TurnSummary, UiError>
    where
        I: IntoIterator<Item = Call>,
    {
        for call in calls {
            self.dispatch_call(&call);
        }
        self.end_turn()
    }

    fn layout_if_requested(&mut self) -> Result<Option<usize>, UiError> {
        let (Some(surface), Some(root)) = (self.surface().cloned(), self.visual_parent) else {
            return Ok(None);
        };
        if !surface.take_polish() {
            return Ok(None);
        }

        let laid_out = compute_layout(&mut self.scene, root, surface.size())?;
        Ok(Some(laid_out))
    }
}

impl Default for UiManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for UiManager {
    fn drop(&mut self) {
        if let Some(stop) = self.stop_root_watch.take() {
            stop();
        }
    }
}

impl std::fmt::Debug for UiManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiManager")
            .field("attached", &self.is_attached())
            .field("components", &self.components.names())
            .field("views", &self.registry.len())
            .field("nodes", &self.scene.len())
            .finish()
    }
}
