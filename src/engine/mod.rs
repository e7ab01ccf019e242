//! UI Engine - view bookkeeping.
//!
//! - NodeRegistry: tag → scene node handles
//! - RootTagAllocator: root tag counter (1, 11, 21, ...)
//!
//! # Architecture
//!
//! Views are NOT owned here. The registry holds generational handles into
//! the scene graph:
//!
//! ```text
//! tag 2  → NodeId(3v1)   RCTView, parent = root 1
//! tag 3  → NodeId(4v1)   RCTView, parent = tag 2
//! tag 1  → NodeId(1v1)   root view (visual parent)
//! ```
//!
//! Removing a tag from the registry and destroying its node are done as one
//! step by the UI manager, so a lookup never returns a handle to a node that
//! is on its way out.

mod registry;
mod root_tags;

pub use registry::*;
pub use root_tags::*;
