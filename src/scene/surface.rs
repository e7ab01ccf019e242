//! Root surface - the top-level visual parent.
//!
//! Provides reactive signals for the surface dimensions and scale, the tag
//! the embedder attached to the surface, and the coalesced "polish" request
//! that asks for a layout/repaint pass before the next frame.

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::{flush_sync, signal, Signal};

use crate::types::{Size, Tag};

/// The visual parent every root view hangs off.
///
/// Width, height and scale are signals so observers (the UI manager's
/// resize subscription) re-run whenever any of them changes.
pub struct RootSurface {
    width: Signal<f32>,
    height: Signal<f32>,
    scale: Signal<f32>,
    attached_tag: Cell<Option<Tag>>,
    polish_pending: Cell<bool>,
    polish_requests: Cell<u64>,
}

impl RootSurface {
    /// Create a surface with the given geometry. No tag is attached yet.
    pub fn new(width: f32, height: f32, scale: f32) -> Rc<Self> {
        Rc::new(Self {
            width: signal(width),
            height: signal(height),
            scale: signal(scale),
            attached_tag: Cell::new(None),
            polish_pending: Cell::new(false),
            polish_requests: Cell::new(0),
        })
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    pub fn width(&self) -> f32 {
        self.width.get()
    }

    pub fn height(&self) -> f32 {
        self.height.get()
    }

    pub fn scale(&self) -> f32 {
        self.scale.get()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Set the surface size (called by the windowing side on resize).
    /// Observers have run by the time this returns.
    pub fn resize(&self, width: f32, height: f32) {
        self.width.set(width);
        self.height.set(height);
        flush_sync();
    }

    pub fn set_scale(&self, scale: f32) {
        self.scale.set(scale);
        flush_sync();
    }

    // =========================================================================
    // Attached tag
    // =========================================================================

    /// Root tag attached to the surface, `None` until the embedder sets one.
    pub fn attached_tag(&self) -> Option<Tag> {
        self.attached_tag.get()
    }

    pub fn attach_tag(&self, tag: Tag) {
        self.attached_tag.set(Some(tag));
    }

    // =========================================================================
    // Polish (coalesced layout request)
    // =========================================================================

    /// Request a layout/repaint pass. Repeated requests before the pass runs
    /// collapse into one.
    pub fn polish(&self) {
        self.polish_requests.set(self.polish_requests.get() + 1);
        self.polish_pending.set(true);
    }

    pub fn is_polish_pending(&self) -> bool {
        self.polish_pending.get()
    }

    /// Consume the pending request. True at most once per burst of
    /// [`polish`](Self::polish) calls.
    pub fn take_polish(&self) -> bool {
        self.polish_pending.replace(false)
    }

    /// Total number of raw polish calls (including coalesced ones).
    pub fn polish_requests(&self) -> u64 {
        self.polish_requests.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_geometry() {
        let surface = RootSurface::new(800.0, 600.0, 1.0);
        assert_eq!(surface.size(), Size::new(800.0, 600.0));

        surface.resize(1024.0, 768.0);
        surface.set_scale(2.0);
        assert_eq!(surface.width(), 1024.0);
        assert_eq!(surface.height(), 768.0);
        assert_eq!(surface.scale(), 2.0);
    }

    #[test]
    fn test_polish_coalesces() {
        let surface = RootSurface::new(10.0, 10.0, 1.0);
        assert!(!surface.take_polish());

        surface.polish();
        surface.polish();
        surface.polish();
        assert_eq!(surface.polish_requests(), 3);
        assert!(surface.take_polish());
        assert!(!surface.take_polish());
    }

    #[test]
    fn test_attached_tag_starts_unset() {
        let surface = RootSurface::new(10.0, 10.0, 1.0);
        assert_eq!(surface.attached_tag(), None);
        surface.attach_tag(1);
        assert_eq!(surface.attached_tag(), Some(1));
    }
}
