//! Taffy Bridge - Integration with Taffy layout engine
//!
//! Converts node FlexStyles to Taffy styles, runs layout computation over the
//! visual parent's subtree, and writes the resulting frames back onto the
//! scene nodes.

use std::collections::HashMap;

use taffy::{
    AvailableSpace, Dimension as TaffyDimension, Display, FlexDirection as TaffyFlexDirection,
    FlexWrap as TaffyFlexWrap, JustifyContent as TaffyJustifyContent,
    AlignItems as TaffyAlignItems, AlignContent as TaffyAlignContent,
    AlignSelf as TaffyAlignSelf, LengthPercentage, LengthPercentageAuto, NodeId as TaffyNodeId,
    Overflow as TaffyOverflow, Position as TaffyPosition, Rect, Size as TaffySize, Style,
    TaffyTree,
};

use crate::error::UiError;
use crate::scene::{NodeId, SceneGraph};
use crate::types::{
    AlignContent, AlignItems, AlignSelf, Dimension, FlexDirection, FlexWrap, Frame,
    JustifyContent, Overflow, Position, Size,
};

use super::style::{Edges, FlexStyle};

// =============================================================================
// DIMENSION CONVERSION
// =============================================================================

/// Convert our Dimension to Taffy's Dimension.
fn to_taffy_dimension(dim: Dimension) -> TaffyDimension {
    match dim {
        Dimension::Auto => TaffyDimension::Auto,
        Dimension::Points(n) => TaffyDimension::Length(n),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

/// Convert our Dimension to Taffy's LengthPercentageAuto.
fn to_taffy_lpa(dim: Dimension) -> LengthPercentageAuto {
    match dim {
        Dimension::Auto => LengthPercentageAuto::Auto,
        Dimension::Points(n) => LengthPercentageAuto::Length(n),
        Dimension::Percent(p) => LengthPercentageAuto::Percent(p / 100.0),
    }
}

/// Convert our Dimension to Taffy's LengthPercentage (auto becomes zero).
fn to_taffy_lp(dim: Dimension) -> LengthPercentage {
    match dim {
        Dimension::Auto => LengthPercentage::Length(0.0),
        Dimension::Points(n) => LengthPercentage::Length(n),
        Dimension::Percent(p) => LengthPercentage::Percent(p / 100.0),
    }
}

fn lpa_rect(edges: Edges<Dimension>) -> Rect<LengthPercentageAuto> {
    Rect {
        top: to_taffy_lpa(edges.top),
        right: to_taffy_lpa(edges.right),
        bottom: to_taffy_lpa(edges.bottom),
        left: to_taffy_lpa(edges.left),
    }
}

fn lp_rect(edges: Edges<Dimension>) -> Rect<LengthPercentage> {
    Rect {
        top: to_taffy_lp(edges.top),
        right: to_taffy_lp(edges.right),
        bottom: to_taffy_lp(edges.bottom),
        left: to_taffy_lp(edges.left),
    }
}

// =============================================================================
// ENUM CONVERSIONS
// =============================================================================

fn to_taffy_flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::Row => TaffyFlexDirection::Row,
        FlexDirection::ColumnReverse => TaffyFlexDirection::ColumnReverse,
        FlexDirection::RowReverse => TaffyFlexDirection::RowReverse,
    }
}

fn to_taffy_flex_wrap(wrap: FlexWrap) -> TaffyFlexWrap {
    match wrap {
        FlexWrap::NoWrap => TaffyFlexWrap::NoWrap,
        FlexWrap::Wrap => TaffyFlexWrap::Wrap,
        FlexWrap::WrapReverse => TaffyFlexWrap::WrapReverse,
    }
}

fn to_taffy_justify_content(justify: JustifyContent) -> Option<TaffyJustifyContent> {
    Some(match justify {
        JustifyContent::FlexStart => TaffyJustifyContent::FlexStart,
        JustifyContent::Center => TaffyJustifyContent::Center,
        JustifyContent::FlexEnd => TaffyJustifyContent::FlexEnd,
        JustifyContent::SpaceBetween => TaffyJustifyContent::SpaceBetween,
        JustifyContent::SpaceAround => TaffyJustifyContent::SpaceAround,
        JustifyContent::SpaceEvenly => TaffyJustifyContent::SpaceEvenly,
    })
}

fn to_taffy_align_items(align: AlignItems) -> Option<TaffyAlignItems> {
    Some(match align {
        AlignItems::Stretch => TaffyAlignItems::Stretch,
        AlignItems::FlexStart => TaffyAlignItems::FlexStart,
        AlignItems::Center => TaffyAlignItems::Center,
        AlignItems::FlexEnd => TaffyAlignItems::FlexEnd,
        AlignItems::Baseline => TaffyAlignItems::Baseline,
    })
}

fn to_taffy_align_content(align: AlignContent) -> Option<TaffyAlignContent> {
    Some(match align {
        AlignContent::Stretch => TaffyAlignContent::Stretch,
        AlignContent::FlexStart => TaffyAlignContent::FlexStart,
        AlignContent::Center => TaffyAlignContent::Center,
        AlignContent::FlexEnd => TaffyAlignContent::FlexEnd,
        AlignContent::SpaceBetween => TaffyAlignContent::SpaceBetween,
        AlignContent::SpaceAround => TaffyAlignContent::SpaceAround,
    })
}

fn to_taffy_align_self(align: AlignSelf) -> Option<TaffyAlignSelf> {
    match align {
        AlignSelf::Auto => None, // inherit from parent
        AlignSelf::Stretch => Some(TaffyAlignSelf::Stretch),
        AlignSelf::FlexStart => Some(TaffyAlignSelf::FlexStart),
        AlignSelf::Center => Some(TaffyAlignSelf::Center),
        AlignSelf::FlexEnd => Some(TaffyAlignSelf::FlexEnd),
        AlignSelf::Baseline => Some(TaffyAlignSelf::Baseline),
    }
}

fn to_taffy_overflow(overflow: Overflow) -> TaffyOverflow {
    match overflow {
        Overflow::Visible => TaffyOverflow::Visible,
        Overflow::Hidden => TaffyOverflow::Clip,
        Overflow::Scroll => TaffyOverflow::Scroll,
    }
}

fn to_taffy_position(position: Position) -> TaffyPosition {
    match position {
        Position::Relative => TaffyPosition::Relative,
        Position::Absolute => TaffyPosition::Absolute,
    }
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

/// Build a Taffy Style from a node's FlexStyle.
fn build_style(style: &FlexStyle) -> Style {
    let overflow = to_taffy_overflow(style.overflow);

    Style {
        display: if style.display_none { Display::None } else { Display::Flex },
        position: to_taffy_position(style.position),
        inset: lpa_rect(style.inset),

        // Flex container properties
        flex_direction: to_taffy_flex_direction(style.flex_direction),
        flex_wrap: to_taffy_flex_wrap(style.flex_wrap),
        justify_content: to_taffy_justify_content(style.justify_content),
        align_items: to_taffy_align_items(style.align_items),
        align_content: to_taffy_align_content(style.align_content),

        // Flex item properties
        flex_grow: style.flex_grow,
        flex_shrink: style.flex_shrink,
        flex_basis: to_taffy_dimension(style.flex_basis),
        align_self: to_taffy_align_self(style.align_self),

        // Dimensions
        size: TaffySize {
            width: to_taffy_dimension(style.width),
            height: to_taffy_dimension(style.height),
        },
        min_size: TaffySize {
            width: to_taffy_dimension(style.min_width),
            height: to_taffy_dimension(style.min_height),
        },
        max_size: TaffySize {
            width: to_taffy_dimension(style.max_width),
            height: to_taffy_dimension(style.max_height),
        },

        margin: lpa_rect(style.margin),
        padding: lp_rect(style.padding),
        border: Rect {
            top: LengthPercentage::Length(style.border.top),
            right: LengthPercentage::Length(style.border.right),
            bottom: LengthPercentage::Length(style.border.bottom),
            left: LengthPercentage::Length(style.border.left),
        },

        overflow: taffy::Point { x: overflow, y: overflow },

        ..Default::default()
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

fn layout_error(err: impl std::fmt::Debug) -> UiError {
    UiError::Layout(format!("{err:?}"))
}

/// Compute layout for the subtree under `root` and write frames back.
///
/// `root` is the visual parent: it is sized to `available` exactly and keeps
/// its own origin. Children are laid out in ascending z-order. Every node
/// reached gets a fresh frame and its layout-dirty bit cleared.
///
/// Returns the number of nodes laid out.
pub fn compute_layout(
    scene: &mut SceneGraph,
    root: NodeId,
    available: Size,
) -> Result<usize, UiError> {
    if !scene.contains(root) {
        return Ok(0);
    }

    let mut tree: TaffyTree<()> = TaffyTree::new();

    // Maps: scene node → Taffy NodeId, in pre-order
    let mut order: Vec<(NodeId, TaffyNodeId)> = Vec::new();
    let mut index_to_node: HashMap<NodeId, TaffyNodeId> = HashMap::new();

    // First pass: create every node, parents before children
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let Some(node) = scene.node(id) else {
            continue;
        };

        let mut style = build_style(&node.style);
        if id == root {
            style.size = TaffySize {
                width: TaffyDimension::Length(available.width),
                height: TaffyDimension::Length(available.height),
            };
            style.position = TaffyPosition::Relative;
            style.inset = Rect {
                top: LengthPercentageAuto::Auto,
                right: LengthPercentageAuto::Auto,
                bottom: LengthPercentageAuto::Auto,
                left: LengthPercentageAuto::Auto,
            };
        }

        let taffy_id = tree.new_leaf(style).map_err(layout_error)?;
        index_to_node.insert(id, taffy_id);
        order.push((id, taffy_id));

        let children = scene.children_by_z(id);
        stack.extend(children.into_iter().rev());
    }

    // Second pass: parent-child relationships in stacking order
    for &(id, taffy_id) in &order {
        let children: Vec<TaffyNodeId> = scene
            .children_by_z(id)
            .iter()
            .filter_map(|child| index_to_node.get(child).copied())
            .collect();
        if !children.is_empty() {
            tree.set_children(taffy_id, &children).map_err(layout_error)?;
        }
    }

    let Some(&root_taffy) = index_to_node.get(&root) else {
        return Ok(0);
    };

    tree.compute_layout(
        root_taffy,
        TaffySize {
            width: AvailableSpace::Definite(available.width),
            height: AvailableSpace::Definite(available.height),
        },
    )
    .map_err(layout_error)?;

    // Extract results
    for &(id, taffy_id) in &order {
        let layout = tree.layout(taffy_id).map_err(layout_error)?;
        let Some(node) = scene.node_mut(id) else {
            continue;
        };

        if id == root {
            node.frame.width = layout.size.width;
            node.frame.height = layout.size.height;
        } else {
            node.frame = Frame::new(
                layout.location.x,
                layout.location.y,
                layout.size.width,
                layout.size.height,
            );
        }
        node.flags.remove(crate::scene::NodeFlags::LAYOUT_DIRTY);
    }

    Ok(order.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn styled_child(scene: &mut SceneGraph, parent: NodeId, z: i32, props: serde_json::Value) -> NodeId {
        let id = scene.create_node();
        if let Some(node) = scene.node_mut(id) {
            for (key, value) in props.as_object().unwrap() {
                assert!(node.style.apply_prop(key, value), "prop {key}");
            }
        }
        scene.set_parent(id, Some(parent));
        scene.set_z(id, z);
        id
    }

    #[test]
    fn test_root_fills_available_space() {
        let mut scene = SceneGraph::new();
        let root = scene.create_node();
        scene.set_frame(root, Frame::new(3.0, 4.0, 0.0, 0.0));

        let count = compute_layout(&mut scene, root, Size::new(320.0, 240.0)).unwrap();
        assert_eq!(count, 1);
        assert_eq!(scene.frame(root), Some(Frame::new(3.0, 4.0, 320.0, 240.0)));
    }

    #[test]
    fn test_column_stacks_in_z_order() {
        let mut scene = SceneGraph::new();
        let root = scene.create_node();
        // Inserted first but stacked second.
        let second = styled_child(&mut scene, root, 1, json!({ "height": 30 }));
        let first = styled_child(&mut scene, root, 0, json!({ "height": 20 }));

        compute_layout(&mut scene, root, Size::new(100.0, 100.0)).unwrap();

        assert_eq!(scene.frame(first), Some(Frame::new(0.0, 0.0, 100.0, 20.0)));
        assert_eq!(scene.frame(second), Some(Frame::new(0.0, 20.0, 100.0, 30.0)));
    }

    #[test]
    fn test_absolute_position() {
        let mut scene = SceneGraph::new();
        let root = scene.create_node();
        let child = styled_child(
            &mut scene,
            root,
            0,
            json!({ "position": "absolute", "left": 10, "top": 15, "width": 40, "height": 25 }),
        );

        compute_layout(&mut scene, root, Size::new(200.0, 200.0)).unwrap();
        assert_eq!(scene.frame(child), Some(Frame::new(10.0, 15.0, 40.0, 25.0)));
    }

    #[test]
    fn test_layout_clears_dirty_bits() {
        let mut scene = SceneGraph::new();
        let root = scene.create_node();
        let child = styled_child(&mut scene, root, 0, json!({ "flex": 1 }));
        scene.mark_layout_dirty(root);

        compute_layout(&mut scene, root, Size::new(50.0, 50.0)).unwrap();
        assert!(!scene.node(root).unwrap().is_layout_dirty());
        assert!(!scene.node(child).unwrap().is_layout_dirty());
        assert_eq!(scene.frame(child), Some(Frame::new(0.0, 0.0, 50.0, 50.0)));
    }

    #[test]
    fn test_detached_nodes_untouched() {
        let mut scene = SceneGraph::new();
        let root = scene.create_node();
        let loose = scene.create_node();
        scene.set_frame(loose, Frame::new(1.0, 2.0, 3.0, 4.0));
        scene.mark_layout_dirty(loose);

        compute_layout(&mut scene, root, Size::new(10.0, 10.0)).unwrap();
        assert_eq!(scene.frame(loose), Some(Frame::new(1.0, 2.0, 3.0, 4.0)));
        assert!(scene.node(loose).unwrap().is_layout_dirty());
    }
}
