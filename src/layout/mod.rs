//! Layout Module
//!
//! Flexbox layout for the scene graph using Taffy.
//!
//! # Architecture
//!
//! The layout module uses [Taffy](https://github.com/DioxusLabs/taffy) for
//! W3C-compliant flexbox computation. The bridge:
//!
//! 1. Converts each node's FlexStyle → Taffy style
//! 2. Builds the Taffy tree from the visual parent's subtree, children in
//!    ascending z-order
//! 3. Writes computed frames back onto scene nodes and clears their
//!    layout-dirty bits
//!
//! The UI manager runs one pass per processing turn, and only when a
//! layout was requested (the coalesced polish on the root surface).

mod style;
mod taffy_bridge;

pub use style::*;
pub use taffy_bridge::compute_layout;
