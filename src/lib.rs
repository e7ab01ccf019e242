//! # spark-ui-manager
//!
//! Native UI manager for a JavaScript-driven view tree.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! root surface reactivity and [Taffy](https://github.com/DioxusLabs/taffy)
//! for flexbox layout.
//!
//! ## Architecture
//!
//! The JavaScript side describes views by integer tags and sends commands
//! (create, update, manage children, measure, hit-test). The manager applies
//! them to a scene graph it owns and answers queries through the bridge.
//!
//! ```text
//! bridge call → Command → UiManager ─┬─ NodeRegistry   (tag → NodeId)
//!                                    ├─ ComponentTable (type name → ViewManager)
//!                                    └─ SceneGraph     (nodes, z-order, frames)
//!                                            │
//!                 end_turn: one layout pass ─┘→ frames → measure / findSubviewIn
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Tags, geometry, property maps, flex enums
//! - [`scene`] - Scene graph and root surface
//! - [`engine`] - Node registry and root tag allocation
//! - [`components`] - View managers and the component table
//! - [`layout`] - Flex style parsing and the Taffy layout pass
//! - [`bridge`] - Modules, responses and command decoding
//! - [`manager`] - The UI manager itself

pub mod bridge;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod logging;
pub mod manager;
pub mod scene;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use bridge::{
    Bridge, Call, CallbackId, ChannelResponses, ChildrenUpdate, Command, ModuleData,
    QueuedResponses, Response, ResponseBlock, ResponseSink,
};

pub use components::{BaseViewManager, ComponentDescriptor, ComponentTable, ViewConfig, ViewManager};

pub use config::{ConfigError, UiManagerConfig};

pub use engine::{NodeRegistry, RootTagAllocator};

pub use error::UiError;

pub use layout::{compute_layout, FlexStyle};

pub use manager::{HitTarget, Measurement, TurnSummary, UiManager};

pub use scene::{NodeFlags, NodeId, RootSurface, SceneGraph, SceneNode, ViewMeta};
