//! Core types for spark-ui-manager.
//!
//! These types cross the bridge boundary (tags, property maps, geometry) or
//! describe flex layout input parsed from view properties.

use serde::{Deserialize, Serialize};

pub use serde_json::Value;

// =============================================================================
// Identifiers and property maps
// =============================================================================

/// Opaque view identifier shared with the JavaScript side.
///
/// Root tags come from [`RootTagAllocator`](crate::engine::RootTagAllocator);
/// every other tag is chosen by the caller and assumed unique.
pub type Tag = u32;

/// Property mapping delivered with `createView` / `updateView`.
pub type PropMap = serde_json::Map<String, Value>;

// =============================================================================
// Geometry
// =============================================================================

/// A point in some node's local coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Translate by the given offset.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A node's frame: position relative to its parent plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Frame at the given origin with the given size.
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check whether a point expressed in this frame's *own* coordinates
    /// (origin at 0,0) lies inside it. Right and bottom edges are exclusive.
    #[inline]
    pub fn contains_local(&self, point: Point) -> bool {
        point.x >= 0.0 && point.y >= 0.0 && point.x < self.width && point.y < self.height
    }
}

// =============================================================================
// Dimension
// =============================================================================

/// A layout length as written in view properties.
///
/// ```
/// use spark_ui_manager::types::Dimension;
///
/// let width = Dimension::Points(50.0);
/// let height = Dimension::Percent(100.0);
/// let auto = Dimension::Auto;
/// # let _ = (width, height, auto);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// Content or flex determined.
    #[default]
    Auto,
    /// Absolute length in scene units.
    Points(f32),
    /// Percentage of the parent (0-100).
    Percent(f32),
}

impl Dimension {
    /// Parse a property value: numbers are points, `"NN%"` strings are
    /// percentages, `"auto"` is auto. Anything else is rejected.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(|v| Self::Points(v as f32)),
            Value::String(s) => {
                let s = s.trim();
                if s == "auto" {
                    Some(Self::Auto)
                } else if let Some(pct) = s.strip_suffix('%') {
                    pct.trim().parse::<f32>().ok().map(Self::Percent)
                } else {
                    s.parse::<f32>().ok().map(Self::Points)
                }
            }
            _ => None,
        }
    }
}

impl From<f32> for Dimension {
    fn from(value: f32) -> Self {
        Self::Points(value)
    }
}

// =============================================================================
// Flex Enums - For layout
// =============================================================================

/// Flex direction for container layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Column,
    Row,
    ColumnReverse,
    RowReverse,
}

impl FlexDirection {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "column" => Self::Column,
            "row" => Self::Row,
            "column-reverse" => Self::ColumnReverse,
            "row-reverse" => Self::RowReverse,
            _ => return None,
        })
    }
}

/// Flex wrap behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
    WrapReverse,
}

impl FlexWrap {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "nowrap" => Self::NoWrap,
            "wrap" => Self::Wrap,
            "wrap-reverse" => Self::WrapReverse,
            _ => return None,
        })
    }
}

/// Justify content (main axis alignment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JustifyContent {
    #[default]
    FlexStart,
    Center,
    FlexEnd,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl JustifyContent {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "flex-start" => Self::FlexStart,
            "center" => Self::Center,
            "flex-end" => Self::FlexEnd,
            "space-between" => Self::SpaceBetween,
            "space-around" => Self::SpaceAround,
            "space-evenly" => Self::SpaceEvenly,
            _ => return None,
        })
    }
}

/// Align items (cross axis alignment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignItems {
    #[default]
    Stretch,
    FlexStart,
    Center,
    FlexEnd,
    Baseline,
}

impl AlignItems {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "stretch" => Self::Stretch,
            "flex-start" => Self::FlexStart,
            "center" => Self::Center,
            "flex-end" => Self::FlexEnd,
            "baseline" => Self::Baseline,
            _ => return None,
        })
    }
}

/// Align self (item override for align items).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignSelf {
    #[default]
    Auto,
    Stretch,
    FlexStart,
    Center,
    FlexEnd,
    Baseline,
}

impl AlignSelf {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "auto" => Self::Auto,
            "stretch" => Self::Stretch,
            "flex-start" => Self::FlexStart,
            "center" => Self::Center,
            "flex-end" => Self::FlexEnd,
            "baseline" => Self::Baseline,
            _ => return None,
        })
    }
}

/// Align content (multi-line cross axis alignment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignContent {
    Stretch,
    #[default]
    FlexStart,
    Center,
    FlexEnd,
    SpaceBetween,
    SpaceAround,
}

impl AlignContent {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "stretch" => Self::Stretch,
            "flex-start" => Self::FlexStart,
            "center" => Self::Center,
            "flex-end" => Self::FlexEnd,
            "space-between" => Self::SpaceBetween,
            "space-around" => Self::SpaceAround,
            _ => return None,
        })
    }
}

/// Overflow behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
}

impl Overflow {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "visible" => Self::Visible,
            "hidden" => Self::Hidden,
            "scroll" => Self::Scroll,
            _ => return None,
        })
    }
}

/// Position mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Relative,
    Absolute,
}

impl Position {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "relative" => Self::Relative,
            "absolute" => Self::Absolute,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_frame_contains_local() {
        let frame = Frame::new(10.0, 10.0, 20.0, 5.0);

        assert!(frame.contains_local(Point::new(0.0, 0.0)));
        assert!(frame.contains_local(Point::new(19.5, 4.5)));
        assert!(!frame.contains_local(Point::new(20.0, 1.0)));
        assert!(!frame.contains_local(Point::new(1.0, 5.0)));
        assert!(!frame.contains_local(Point::new(-0.1, 1.0)));
    }

    #[test]
    fn test_dimension_from_value() {
        assert_eq!(Dimension::from_value(&json!(42)), Some(Dimension::Points(42.0)));
        assert_eq!(Dimension::from_value(&json!("50%")), Some(Dimension::Percent(50.0)));
        assert_eq!(Dimension::from_value(&json!("auto")), Some(Dimension::Auto));
        assert_eq!(Dimension::from_value(&json!(true)), None);
        assert_eq!(Dimension::from_value(&json!("wide")), None);
    }

    #[test]
    fn test_flex_names() {
        assert_eq!(FlexDirection::from_name("row"), Some(FlexDirection::Row));
        assert_eq!(JustifyContent::from_name("space-evenly"), Some(JustifyContent::SpaceEvenly));
        assert_eq!(AlignSelf::from_name("sideways"), None);
        assert_eq!(Position::from_name("absolute"), Some(Position::Absolute));
    }
}
