//! Components - view types known to the UI manager.
//!
//! - ViewManager: factory + property applier, one per view type
//! - ComponentDescriptor / ComponentTable: name-keyed lookup built at attach
//! - BaseViewManager: the built-in `RCTView` container

mod descriptor;
mod view;
mod view_manager;

pub use descriptor::*;
pub use view::*;
pub use view_manager::*;
