//! Bridge-level behavior: raw calls in, responses out.
//!
//! Every query must produce exactly one response, whatever happens to the
//! view it names.

use std::rc::Rc;
use std::sync::mpsc;

use serde_json::{json, Value};
use spark_ui_manager::{
    BaseViewManager, Bridge, Call, ChannelResponses, ModuleData, QueuedResponses, Response,
    RootSurface, UiError, UiManager,
};

fn attached() -> (UiManager, Rc<QueuedResponses>) {
    let queue = Rc::new(QueuedResponses::new());
    let bridge = Bridge::new(RootSurface::new(320.0, 480.0, 2.0), queue.clone())
        .with_module(ModuleData::new("Timing"))
        .with_module(ModuleData::with_view_manager(Rc::new(BaseViewManager)));

    let mut manager = UiManager::new();
    manager.set_bridge(bridge).unwrap();
    (manager, queue)
}

fn create(tag: u32, props: Value) -> Call {
    Call::new("createView", vec![json!(tag), json!("RCTView"), json!(1), props])
}

fn add(container: u32, tags: &[u32], at: &[usize]) -> Call {
    Call::new(
        "manageChildren",
        vec![json!(container), Value::Null, Value::Null, json!(tags), json!(at), Value::Null],
    )
}

fn numbers(response: &Response) -> Vec<f64> {
    response.values.iter().filter_map(Value::as_f64).collect()
}

#[test]
fn test_allocate_root_tags() {
    let mut manager = UiManager::new();
    let tags: Vec<u32> = (0..4).map(|_| manager.allocate_root_tag().unwrap()).collect();
    assert_eq!(tags, vec![1, 11, 21, 31]);
    assert!(tags.windows(2).all(|pair| pair[1] - pair[0] == 10));
}

#[test]
fn test_measure_unknown_tag_responds_empty_once() {
    let (mut manager, queue) = attached();
    manager
        .run_turn([Call::new("measure", vec![json!(1234), json!(5)])])
        .unwrap();

    let delivered = queue.drain();
    assert_eq!(delivered, vec![Response { callback: 5, values: Vec::new() }]);
}

#[test]
fn test_measure_known_tag() {
    let (mut manager, queue) = attached();
    let root = manager.mount_root_view().unwrap();

    manager
        .run_turn([
            create(2, json!({ "position": "absolute", "left": 30, "top": 40, "width": 50, "height": 60 })),
            create(3, json!({ "position": "absolute", "left": 5, "top": 6, "width": 10, "height": 10 })),
            add(root, &[2], &[0]),
            add(2, &[3], &[0]),
        ])
        .unwrap();
    manager
        .run_turn([Call::new("measure", vec![json!(3), json!(1)])])
        .unwrap();

    let delivered = queue.drain();
    assert_eq!(delivered.len(), 1);
    assert_eq!(numbers(&delivered[0]), vec![5.0, 6.0, 10.0, 10.0, 35.0, 46.0]);
}

#[test]
fn test_measure_before_attach_to_tree() {
    let (mut manager, queue) = attached();
    manager
        .run_turn([
            create(2, json!({ "width": 10 })),
            Call::new("measure", vec![json!(2), json!(3)]),
        ])
        .unwrap();

    let delivered = queue.drain();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].values.len(), 6);
}

#[test]
fn test_find_subview_in() {
    let (mut manager, queue) = attached();
    let root = manager.mount_root_view().unwrap();

    manager
        .run_turn([
            create(2, json!({ "position": "absolute", "left": 0, "top": 0, "width": 100, "height": 100 })),
            create(3, json!({ "position": "absolute", "left": 20, "top": 20, "width": 10, "height": 10 })),
            add(root, &[2], &[0]),
            add(2, &[3], &[0]),
        ])
        .unwrap();
    manager
        .run_turn([
            Call::new("findSubviewIn", vec![json!(root), json!([25, 25]), json!(1)]),
            Call::new("findSubviewIn", vec![json!(2), json!([90, 90]), json!(2)]),
            Call::new("findSubviewIn", vec![json!(99), json!([1, 1]), json!(3)]),
        ])
        .unwrap();

    let delivered = queue.drain();
    assert_eq!(delivered.len(), 3);
    assert_eq!(numbers(&delivered[0]), vec![3.0, 20.0, 20.0, 10.0, 10.0]);
    assert_eq!(numbers(&delivered[1]), vec![2.0, 0.0, 0.0, 100.0, 100.0]);
    assert!(delivered[2].is_empty());
}

#[test]
fn test_pointer_events_none_occludes() {
    let (mut manager, queue) = attached();
    let root = manager.mount_root_view().unwrap();

    manager
        .run_turn([
            create(2, json!({ "position": "absolute", "width": 100, "height": 100 })),
            create(3, json!({ "position": "absolute", "width": 50, "height": 50 })),
            create(4, json!({ "position": "absolute", "width": 50, "height": 50, "pointerEvents": "none" })),
            add(root, &[2], &[0]),
            add(2, &[3, 4], &[0, 1]),
        ])
        .unwrap();
    manager
        .run_turn([Call::new("findSubviewIn", vec![json!(2), json!({ "x": 10, "y": 10 }), json!(1)])])
        .unwrap();

    let delivered = queue.drain();
    assert_eq!(delivered[0].values.first(), Some(&json!(2)));
}

#[test]
fn test_double_attach() {
    let (mut manager, queue) = attached();
    let before: Vec<String> = manager.components().names().into_iter().map(str::to_string).collect();

    let other = Bridge::new(RootSurface::new(1.0, 1.0, 1.0), queue)
        .with_module(ModuleData::new("Other"));
    assert_eq!(manager.set_bridge(other), Err(UiError::DoubleAttach));

    let after: Vec<String> = manager.components().names().into_iter().map(str::to_string).collect();
    assert_eq!(before, after);
    assert_eq!(manager.surface().unwrap().width(), 320.0);
}

#[test]
fn test_bad_calls_do_not_poison_the_manager() {
    let (mut manager, _queue) = attached();
    let root = manager.mount_root_view().unwrap();

    manager
        .run_turn([
            Call::new("nonsense", vec![]),
            Call::new("createView", vec![json!("two")]),
            add(404, &[2], &[0]),
            create(2, json!({})),
            add(root, &[2], &[0]),
        ])
        .unwrap();

    let child = manager.lookup(2).unwrap();
    assert_eq!(manager.scene().parent(child), manager.visual_parent());
}

#[test]
fn test_malformed_query_still_responds() {
    let (mut manager, queue) = attached();
    manager.mount_root_view().unwrap();

    manager.dispatch_call(&Call::new("measure", vec![json!(-1), json!(8)]));
    manager.dispatch_call(&Call::new("findSubviewIn", vec![json!(2), json!("oops"), json!(9)]));
    manager.dispatch_call(&Call::new("measure", vec![json!(2), json!("later")]));

    let delivered = queue.drain();
    assert_eq!(
        delivered,
        vec![
            Response { callback: 8, values: Vec::new() },
            Response { callback: 9, values: Vec::new() },
        ]
    );
}

#[test]
fn test_calls_deserialize_from_json() {
    let (mut manager, _queue) = attached();
    let calls: Vec<Call> = serde_json::from_value(json!([
        { "method": "createView", "args": [2, "RCTView", 1, { "width": 10 }] },
        { "method": "updateView", "args": [2, "RCTView", { "width": 20 }] },
        { "method": "blur", "args": [2] },
    ]))
    .unwrap();

    manager.run_turn(calls).unwrap();
    let node = manager.lookup(2).unwrap();
    assert_eq!(manager.scene().node(node).unwrap().props.get("width"), Some(&json!(20)));
}

#[test]
fn test_channel_responses() {
    let (tx, rx) = mpsc::channel();
    let bridge = Bridge::new(RootSurface::new(10.0, 10.0, 1.0), Rc::new(ChannelResponses::new(tx)))
        .with_module(ModuleData::with_view_manager(Rc::new(BaseViewManager)));
    let mut manager = UiManager::new();
    manager.set_bridge(bridge).unwrap();

    manager.dispatch_call(&Call::new("measure", vec![json!(7), json!(70)]));

    let response = rx.recv().unwrap();
    assert_eq!(response.callback, 70);
    assert!(response.is_empty());
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_exported_constants() {
    let (manager, _queue) = attached();
    let constants = manager.constants_to_export().unwrap();

    assert_eq!(constants["Dimensions"]["scale"], json!(2.0));
    assert!(constants["RCTView"]["NativeProps"].is_object());
    assert!(constants.get("Timing").is_none());
}
