//! measure / findSubviewIn.
//!
//! Both queries answer through a [`ResponseBlock`]: a known view gets the
//! values, anything else gets the empty response. Either way exactly one
//! response is delivered.

use serde_json::json;
use tracing::debug;

use super::UiManager;
use crate::bridge::ResponseBlock;
use crate::error::UiError;
use crate::scene::SceneNode;
use crate::types::{Frame, Point, Tag, Value};

/// Result of `measure`: the local frame plus the origin in root coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub frame: Frame,
    pub page: Point,
}

impl Measurement {
    /// `[x, y, width, height, pageX, pageY]`
    pub fn to_values(&self) -> Vec<Value> {
        vec![
            json!(self.frame.x),
            json!(self.frame.y),
            json!(self.frame.width),
            json!(self.frame.height),
            json!(self.page.x),
            json!(self.page.y),
        ]
    }
}

/// Result of `findSubviewIn`: the deepest view under the point and its frame
/// in the starting view's coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTarget {
    pub tag: Tag,
    pub frame: Frame,
}

impl HitTarget {
    /// `[tag, x, y, width, height]`
    pub fn to_values(&self) -> Vec<Value> {
        vec![
            json!(self.tag),
            json!(self.frame.x),
            json!(self.frame.y),
            json!(self.frame.width),
            json!(self.frame.height),
        ]
    }
}

impl UiManager {
    /// Frame of the view under `tag` and its origin mapped into the visual
    /// parent. Detached views report their frame and a page origin of 0,0.
    pub fn measure_frame(&self, tag: Tag) -> Result<Measurement, UiError> {
        let node = self.lookup(tag).ok_or(UiError::UnknownView { tag })?;
        let frame = self.scene.frame(node).unwrap_or_default();
        let page = self.scene.map_to_ancestor(node, Point::ZERO, self.visual_parent);

        Ok(Measurement { frame, page })
    }

    pub fn measure(&self, tag: Tag, response: ResponseBlock) -> Result<(), UiError> {
        debug!(tag, callback = response.callback(), "measure");
        match self.measure_frame(tag) {
            Ok(measurement) => {
                response.respond(measurement.to_values());
                Ok(())
            }
            Err(err) => {
                response.respond_empty();
                Err(err)
            }
        }
    }

    /// Deepest view under `point` (in the coordinates of the view under
    /// `tag`).
    ///
    /// Descends into the topmost visible child containing the point until
    /// none does. A disabled topmost child stops the descent. The view
    /// reached must be a managed view.
    pub fn hit_test(&self, tag: Tag, point: Point) -> Result<HitTarget, UiError> {
        let start = self.lookup(tag).ok_or(UiError::UnknownView { tag })?;

        let mut target = start;
        let mut local = point;
        while let Some(child) = self.scene.child_at(target, local) {
            if !self.scene.node(child).is_some_and(SceneNode::is_enabled) {
                break;
            }
            local = self.scene.map_to_child(child, local);
            target = child;
        }

        let found = self
            .scene
            .node(target)
            .and_then(SceneNode::tag)
            .ok_or(UiError::UnmanagedNode {
                context: "findSubviewIn",
            })?;
        let size = self.scene.frame(target).unwrap_or_default().size();
        let origin = self.scene.map_to_ancestor(target, Point::ZERO, Some(start));

        Ok(HitTarget {
            tag: found,
            frame: Frame::from_origin_size(origin, size),
        })
    }

    pub fn find_subview_in(&self, tag: Tag, point: Point, response: ResponseBlock) -> Result<(), UiError> {
        debug!(tag, x = point.x, y = point.y, callback = response.callback(), "findSubviewIn");
        match self.hit_test(tag, point) {
            Ok(target) => {
                response.respond(target.to_values());
                Ok(())
            }
            Err(err) => {
                response.respond_empty();
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::attached;
    use super::*;
    use crate::bridge::ChildrenUpdate;
    use crate::types::PropMap;
    use serde_json::json;

    fn framed(manager: &mut UiManager, tag: Tag, frame: Frame) {
        manager.create_view(tag, "RCTView", 1, &PropMap::new()).unwrap();
        let node = manager.lookup(tag).unwrap();
        manager.scene_mut().set_frame(node, frame);
    }

    /// root(visual parent) ─ 2 @ (10,20) ─ 3 @ (5,5)
    fn nested() -> UiManager {
        let (mut manager, _surface, _queue) = attached();
        manager.mount_root_view().unwrap();
        framed(&mut manager, 2, Frame::new(10.0, 20.0, 100.0, 100.0));
        framed(&mut manager, 3, Frame::new(5.0, 5.0, 30.0, 40.0));
        manager.manage_children(1, &ChildrenUpdate::new().add(2, 0)).unwrap();
        manager.manage_children(2, &ChildrenUpdate::new().add(3, 0)).unwrap();
        manager
    }

    #[test]
    fn test_measure_page_coordinates() {
        let manager = nested();
        let measurement = manager.measure_frame(3).unwrap();

        assert_eq!(measurement.frame, Frame::new(5.0, 5.0, 30.0, 40.0));
        assert_eq!(measurement.page, Point::new(15.0, 25.0));
    }

    #[test]
    fn test_measure_responds_once() {
        let (mut manager, _surface, queue) = attached();
        framed(&mut manager, 2, Frame::new(1.0, 2.0, 3.0, 4.0));
        let bridge = manager.bridge().unwrap();

        manager.measure(2, bridge.response_block(1)).unwrap();
        assert!(manager.measure(9, bridge.response_block(2)).is_err());

        let delivered = queue.drain();
        assert_eq!(delivered.len(), 2);
        assert_eq!(
            delivered[0].values,
            vec![json!(1.0), json!(2.0), json!(3.0), json!(4.0), json!(0.0), json!(0.0)]
        );
        assert!(delivered[1].is_empty());
    }

    #[test]
    fn test_hit_test_descends() {
        let manager = nested();
        let target = manager.hit_test(1, Point::new(20.0, 30.0)).unwrap();

        assert_eq!(target.tag, 3);
        assert_eq!(target.frame, Frame::new(15.0, 25.0, 30.0, 40.0));
    }

    #[test]
    fn test_hit_test_outside_children_returns_start() {
        let manager = nested();
        let target = manager.hit_test(2, Point::new(90.0, 90.0)).unwrap();

        assert_eq!(target.tag, 2);
        assert_eq!(target.frame, Frame::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_disabled_child_stops_descent() {
        let mut manager = nested();
        let child = manager.lookup(3).unwrap();
        manager
            .scene_mut()
            .set_flag(child, crate::scene::NodeFlags::ENABLED, false);

        assert_eq!(manager.hit_test(2, Point::new(10.0, 10.0)).unwrap().tag, 2);
    }

    #[test]
    fn test_unmanaged_target_is_error() {
        let mut manager = nested();
        let parent = manager.lookup(3).unwrap();
        let decoration = manager.scene_mut().create_node();
        manager.scene_mut().set_frame(decoration, Frame::new(0.0, 0.0, 10.0, 10.0));
        manager.scene_mut().set_parent(decoration, Some(parent));

        assert_eq!(
            manager.hit_test(3, Point::new(1.0, 1.0)),
            Err(UiError::UnmanagedNode { context: "findSubviewIn" })
        );
    }
}
