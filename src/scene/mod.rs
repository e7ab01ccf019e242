//! Scene graph - the live visual tree the UI manager drives.
//!
//! - SceneGraph: generational node arena, structure, deferred destruction,
//!   coordinate mapping and child hit-testing
//! - SceneNode: frame, z-order, flags, flex style and attached view metadata
//! - RootSurface: the visual parent (size/scale signals, coalesced polish)
//!
//! All of it is single-threaded: the scene belongs to the thread that owns
//! the rendering surface.

mod graph;
mod node;
mod surface;

pub use graph::*;
pub use node::*;
pub use surface::*;
