//! FlexStyle - flex layout input for one scene node.
//!
//! Each node carries one FlexStyle for its whole lifetime. View managers
//! update it from property maps with [`FlexStyle::apply_prop`]; the layout
//! pass converts it to a taffy style.
//!
//! Property names follow the React Native style vocabulary (`flexDirection`,
//! `marginHorizontal`, `borderWidth`, ...). A `null` value resets the
//! property to its default.

use crate::types::{
    AlignContent, AlignItems, AlignSelf, Dimension, FlexDirection, FlexWrap, JustifyContent,
    Overflow, Position, Value,
};

/// Four-sided value in top, right, bottom, left order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T: Copy> Edges<T> {
    pub const fn all(value: T) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Flex layout properties of a node.
///
/// # Property Categories
///
/// - **Container**: flexDirection, flexWrap, justifyContent, alignItems, alignContent
/// - **Item**: flexGrow, flexShrink, flexBasis, alignSelf
/// - **Dimensions**: width, height, min/max
/// - **Position**: position, top/right/bottom/left
/// - **Spacing**: margin, padding, borderWidth
/// - **Other**: overflow, display
#[derive(Debug, Clone, PartialEq)]
pub struct FlexStyle {
    // Container
    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub align_content: AlignContent,

    // Item
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_basis: Dimension,
    pub align_self: AlignSelf,

    // Dimensions
    pub width: Dimension,
    pub height: Dimension,
    pub min_width: Dimension,
    pub max_width: Dimension,
    pub min_height: Dimension,
    pub max_height: Dimension,

    // Position
    pub position: Position,
    pub inset: Edges<Dimension>,

    // Spacing
    pub margin: Edges<Dimension>,
    pub padding: Edges<Dimension>,
    pub border: Edges<f32>,

    pub overflow: Overflow,
    /// `display: none` removes the node from layout and hit-testing.
    pub display_none: bool,
}

impl Default for FlexStyle {
    fn default() -> Self {
        Self {
            flex_direction: FlexDirection::Column,
            flex_wrap: FlexWrap::NoWrap,
            justify_content: JustifyContent::FlexStart,
            align_items: AlignItems::Stretch,
            align_content: AlignContent::FlexStart,

            flex_grow: 0.0,
            flex_shrink: 0.0, // React Native default, unlike CSS
            flex_basis: Dimension::Auto,
            align_self: AlignSelf::Auto,

            width: Dimension::Auto,
            height: Dimension::Auto,
            min_width: Dimension::Auto,
            max_width: Dimension::Auto,
            min_height: Dimension::Auto,
            max_height: Dimension::Auto,

            position: Position::Relative,
            inset: Edges::all(Dimension::Auto),

            margin: Edges::all(Dimension::Points(0.0)),
            padding: Edges::all(Dimension::Points(0.0)),
            border: Edges::all(0.0),

            overflow: Overflow::Visible,
            display_none: false,
        }
    }
}

/// Parse a keyword property (`"row"`, `"center"`, ...). Null means default.
fn keyword<T: Default>(value: &Value, parse: fn(&str) -> Option<T>) -> Option<T> {
    match value {
        Value::Null => Some(T::default()),
        Value::String(s) => parse(s),
        _ => None,
    }
}

/// Parse a dimension. Null resets to `default`.
fn dimension(value: &Value, default: Dimension) -> Option<Dimension> {
    match value {
        Value::Null => Some(default),
        other => Dimension::from_value(other),
    }
}

/// Parse a plain number. Null resets to `default`.
fn number(value: &Value, default: f32) -> Option<f32> {
    match value {
        Value::Null => Some(default),
        other => other.as_f64().map(|v| v as f32),
    }
}

impl FlexStyle {
    /// Apply one property. Returns true if `key` is a layout property and the
    /// value was understood; unknown keys and malformed values leave the
    /// style untouched and return false.
    pub fn apply_prop(&mut self, key: &str, value: &Value) -> bool {
        let zero = Dimension::Points(0.0);
        let auto = Dimension::Auto;

        macro_rules! set {
            ($field:expr, $parsed:expr) => {
                match $parsed {
                    Some(v) => {
                        $field = v;
                        true
                    }
                    None => false,
                }
            };
        }

        match key {
            "flexDirection" => set!(self.flex_direction, keyword(value, FlexDirection::from_name)),
            "flexWrap" => set!(self.flex_wrap, keyword(value, FlexWrap::from_name)),
            "justifyContent" => set!(self.justify_content, keyword(value, JustifyContent::from_name)),
            "alignItems" => set!(self.align_items, keyword(value, AlignItems::from_name)),
            "alignContent" => set!(self.align_content, keyword(value, AlignContent::from_name)),
            "alignSelf" => set!(self.align_self, keyword(value, AlignSelf::from_name)),
            "position" => set!(self.position, keyword(value, Position::from_name)),
            "overflow" => set!(self.overflow, keyword(value, Overflow::from_name)),

            "flex" => match number(value, 0.0) {
                Some(flex) if flex > 0.0 => {
                    self.flex_grow = flex;
                    self.flex_shrink = 1.0;
                    self.flex_basis = zero;
                    true
                }
                Some(_) => {
                    self.flex_grow = 0.0;
                    self.flex_shrink = 0.0;
                    self.flex_basis = auto;
                    true
                }
                None => false,
            },
            "flexGrow" => set!(self.flex_grow, number(value, 0.0)),
            "flexShrink" => set!(self.flex_shrink, number(value, 0.0)),
            "flexBasis" => set!(self.flex_basis, dimension(value, auto)),

            "width" => set!(self.width, dimension(value, auto)),
            "height" => set!(self.height, dimension(value, auto)),
            "minWidth" => set!(self.min_width, dimension(value, auto)),
            "maxWidth" => set!(self.max_width, dimension(value, auto)),
            "minHeight" => set!(self.min_height, dimension(value, auto)),
            "maxHeight" => set!(self.max_height, dimension(value, auto)),

            "top" => set!(self.inset.top, dimension(value, auto)),
            "right" => set!(self.inset.right, dimension(value, auto)),
            "bottom" => set!(self.inset.bottom, dimension(value, auto)),
            "left" => set!(self.inset.left, dimension(value, auto)),

            "margin" => set!(self.margin, dimension(value, zero).map(Edges::all)),
            "marginTop" => set!(self.margin.top, dimension(value, zero)),
            "marginRight" => set!(self.margin.right, dimension(value, zero)),
            "marginBottom" => set!(self.margin.bottom, dimension(value, zero)),
            "marginLeft" => set!(self.margin.left, dimension(value, zero)),
            "marginHorizontal" => match dimension(value, zero) {
                Some(v) => {
                    self.margin.left = v;
                    self.margin.right = v;
                    true
                }
                None => false,
            },
            "marginVertical" => match dimension(value, zero) {
                Some(v) => {
                    self.margin.top = v;
                    self.margin.bottom = v;
                    true
                }
                None => false,
            },

            "padding" => set!(self.padding, dimension(value, zero).map(Edges::all)),
            "paddingTop" => set!(self.padding.top, dimension(value, zero)),
            "paddingRight" => set!(self.padding.right, dimension(value, zero)),
            "paddingBottom" => set!(self.padding.bottom, dimension(value, zero)),
            "paddingLeft" => set!(self.padding.left, dimension(value, zero)),
            "paddingHorizontal" => match dimension(value, zero) {
                Some(v) => {
                    self.padding.left = v;
                    self.padding.right = v;
                    true
                }
                None => false,
            },
            "paddingVertical" => match dimension(value, zero) {
                Some(v) => {
                    self.padding.top = v;
                    self.padding.bottom = v;
                    true
                }
                None => false,
            },

            "borderWidth" => set!(self.border, number(value, 0.0).map(Edges::all)),
            "borderTopWidth" => set!(self.border.top, number(value, 0.0)),
            "borderRightWidth" => set!(self.border.right, number(value, 0.0)),
            "borderBottomWidth" => set!(self.border.bottom, number(value, 0.0)),
            "borderLeftWidth" => set!(self.border.left, number(value, 0.0)),

            "display" => match value {
                Value::Null => {
                    self.display_none = false;
                    true
                }
                Value::String(s) if s == "none" || s == "flex" => {
                    self.display_none = s == "none";
                    true
                }
                _ => false,
            },

            _ => false,
        }
    }

    /// Names of every property [`apply_prop`](Self::apply_prop) understands,
    /// with the JavaScript-side type used for the exported prop schema.
    pub fn prop_types() -> &'static [(&'static str, &'static str)] {
        &[
            ("flexDirection", "String"),
            ("flexWrap", "String"),
            ("justifyContent", "String"),
            ("alignItems", "String"),
            ("alignContent", "String"),
            ("alignSelf", "String"),
            ("position", "String"),
            ("overflow", "String"),
            ("display", "String"),
            ("flex", "number"),
            ("flexGrow", "number"),
            ("flexShrink", "number"),
            ("flexBasis", "number"),
            ("width", "number"),
            ("height", "number"),
            ("minWidth", "number"),
            ("maxWidth", "number"),
            ("minHeight", "number"),
            ("maxHeight", "number"),
            ("top", "number"),
            ("right", "number"),
            ("bottom", "number"),
            ("left", "number"),
            ("margin", "number"),
            ("marginTop", "number"),
            ("marginRight", "number"),
            ("marginBottom", "number"),
            ("marginLeft", "number"),
            ("marginHorizontal", "number"),
            ("marginVertical", "number"),
            ("padding", "number"),
            ("paddingTop", "number"),
            ("paddingRight", "number"),
            ("paddingBottom", "number"),
            ("paddingLeft", "number"),
            ("paddingHorizontal", "number"),
            ("paddingVertical", "number"),
            ("borderWidth", "number"),
            ("borderTopWidth", "number"),
            ("borderRightWidth", "number"),
            ("borderBottomWidth", "number"),
            ("borderLeftWidth", "number"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_match_react_native() {
        let style = FlexStyle::default();
        assert_eq!(style.flex_direction, FlexDirection::Column);
        assert_eq!(style.flex_shrink, 0.0);
        assert_eq!(style.width, Dimension::Auto);
        assert!(!style.display_none);
    }

    #[test]
    fn test_apply_keyword_and_dimension() {
        let mut style = FlexStyle::default();
        assert!(style.apply_prop("flexDirection", &json!("row")));
        assert!(style.apply_prop("width", &json!(120)));
        assert!(style.apply_prop("height", &json!("50%")));

        assert_eq!(style.flex_direction, FlexDirection::Row);
        assert_eq!(style.width, Dimension::Points(120.0));
        assert_eq!(style.height, Dimension::Percent(50.0));
    }

    #[test]
    fn test_null_resets() {
        let mut style = FlexStyle::default();
        style.apply_prop("width", &json!(10));
        style.apply_prop("justifyContent", &json!("center"));

        assert!(style.apply_prop("width", &Value::Null));
        assert!(style.apply_prop("justifyContent", &Value::Null));
        assert_eq!(style.width, Dimension::Auto);
        assert_eq!(style.justify_content, JustifyContent::FlexStart);
    }

    #[test]
    fn test_shorthands() {
        let mut style = FlexStyle::default();
        style.apply_prop("margin", &json!(4));
        style.apply_prop("paddingHorizontal", &json!(2));
        style.apply_prop("flex", &json!(1));

        assert_eq!(style.margin, Edges::all(Dimension::Points(4.0)));
        assert_eq!(style.padding.left, Dimension::Points(2.0));
        assert_eq!(style.padding.top, Dimension::Points(0.0));
        assert_eq!(style.flex_grow, 1.0);
        assert_eq!(style.flex_basis, Dimension::Points(0.0));
    }

    #[test]
    fn test_unknown_and_malformed_rejected() {
        let mut style = FlexStyle::default();
        assert!(!style.apply_prop("backgroundColor", &json!("red")));
        assert!(!style.apply_prop("flexDirection", &json!("diagonal")));
        assert!(!style.apply_prop("width", &json!(true)));
        assert_eq!(style, FlexStyle::default());
    }

    #[test]
    fn test_display_none() {
        let mut style = FlexStyle::default();
        assert!(style.apply_prop("display", &json!("none")));
        assert!(style.display_none);
        assert!(style.apply_prop("display", &json!("flex")));
        assert!(!style.display_none);
    }
}
