mod common;

use std::sync::Arc;

use common::{prop, recorder, MockStore, RenderLog};
use parking_lot::Mutex;
use serde_json::{json, Value};
use storebind::connect::{Connector, StateMapper};
use storebind::host::{component_fn, Element, Host, Provider};
use storebind::props::Props;

type CallLog = Arc<Mutex<Vec<String>>>;

struct Tree {
    host: Host,
    store: Arc<MockStore>,
    calls: CallLog,
    child_log: RenderLog,
}

/// Provider → Connect(ParentView) → Connect(Child) → recorder.
///
/// The parent maps `current`; the child maps `values[from_parent]`, where
/// `from_parent` is handed down by the parent. The child's mapper fails
/// when `values` has no entry for its key.
fn mount_tree(initial: Value) -> Tree {
    let store = MockStore::new(initial);
    let calls: CallLog = Arc::default();
    let child_log = RenderLog::new();

    let child_calls = Arc::clone(&calls);
    let child = Connector::<Value>::new()
        .state_mapper(StateMapper::try_with_props(move |state: &Value, own: &Props| {
            let key = own.value("from_parent").and_then(Value::as_str).unwrap_or_default();
            child_calls.lock().push(format!("child:{key}"));
            let value = &state["values"][key];
            if value.is_null() {
                anyhow::bail!("no value for '{key}'");
            }
            Ok(Props::new().with("value", value.clone()))
        }))
        .wrap(recorder("Child", &child_log));

    let parent_view = component_fn("ParentView", move |props, _children| {
        vec![Element::new(
            child.clone(),
            Props::new().with("from_parent", prop(props, "current")),
        )]
    });

    let parent_calls = Arc::clone(&calls);
    let parent = Connector::<Value>::new()
        .map_state(move |state| {
            parent_calls.lock().push("parent".to_string());
            Props::new().with("current", state["current"].clone())
        })
        .wrap(parent_view);

    let mut host = Host::new();
    host.mount(Provider::element(
        store.handle(),
        Element::new(parent, Props::new()),
    ))
    .unwrap();

    Tree {
        host,
        store,
        calls,
        child_log,
    }
}

fn initial_state() -> Value {
    json!({ "current": "a", "values": { "a": 1, "b": 2 } })
}

#[test]
fn parent_subscribes_before_child() {
    let tree = mount_tree(initial_state());

    assert_eq!(tree.store.subscribe_count(), 2);
    assert_eq!(*tree.calls.lock(), vec!["parent", "child:a"]);
    assert_eq!(prop(&tree.child_log.last(), "value"), json!(1));
}

#[test]
fn child_mapper_waits_for_parent_render() {
    let mut tree = mount_tree(initial_state());
    tree.calls.lock().clear();

    tree.store
        .set_state_and_notify(json!({ "current": "b", "values": { "a": 1, "b": 2 } }));
    assert_eq!(*tree.calls.lock(), vec!["parent"]);

    tree.host.flush().unwrap();
    assert_eq!(*tree.calls.lock(), vec!["parent", "child:b"]);
}

#[test]
fn child_sees_props_from_updated_parent() {
    let mut tree = mount_tree(initial_state());

    tree.store
        .set_state_and_notify(json!({ "current": "b", "values": { "a": 1, "b": 2 } }));
    assert_eq!(tree.host.pending(), 2);

    assert_eq!(tree.host.flush().unwrap(), 1);

    let last = tree.child_log.last();
    assert_eq!(prop(&last, "from_parent"), json!("b"));
    assert_eq!(prop(&last, "value"), json!(2));
    assert_eq!(tree.child_log.count(), 2);
}

#[test]
fn child_renders_once_when_both_levels_change() {
    let mut tree = mount_tree(initial_state());
    tree.calls.lock().clear();

    tree.store
        .set_state_and_notify(json!({ "current": "b", "values": { "a": 10, "b": 2 } }));
    assert_eq!(tree.host.pending(), 2);

    assert_eq!(tree.host.flush().unwrap(), 1);

    let renders = tree.child_log.all();
    assert_eq!(renders.len(), 2);
    let last = &renders[1];
    assert_eq!(prop(last, "from_parent"), json!("b"));
    assert_eq!(prop(last, "value"), json!(2));
    assert_eq!(*tree.calls.lock(), vec!["parent", "child:b"]);
}

#[test]
fn child_is_never_mapped_with_outdated_parent_props() {
    let mut tree = mount_tree(json!({ "current": "a", "values": { "a": 1 } }));
    tree.calls.lock().clear();

    tree.store
        .set_state_and_notify(json!({ "current": "b", "values": { "b": 2 } }));

    assert_eq!(tree.host.flush().unwrap(), 1);
    assert_eq!(tree.host.pending(), 0);
    assert_eq!(tree.child_log.count(), 2);
    assert_eq!(prop(&tree.child_log.last(), "value"), json!(2));
    assert_eq!(*tree.calls.lock(), vec!["parent", "child:b"]);
}

#[test]
fn child_queued_alone_renders_without_parent() {
    let mut tree = mount_tree(initial_state());

    tree.store
        .set_state_and_notify(json!({ "current": "a", "values": { "a": 5, "b": 2 } }));
    assert_eq!(tree.host.pending(), 1);
    assert_eq!(tree.host.flush().unwrap(), 1);

    let parent = tree.host.find_by_name("Connect(ParentView)")[0];
    assert_eq!(tree.host.render_count(parent), Some(1));
    assert_eq!(prop(&tree.child_log.last(), "value"), json!(5));
}

#[test]
fn unrelated_change_leaves_child_unrendered() {
    let mut tree = mount_tree(initial_state());

    tree.store.set_state_and_notify(
        json!({ "current": "a", "values": { "a": 1, "b": 2 }, "other": true }),
    );

    assert_eq!(tree.host.flush().unwrap(), 0);
    assert_eq!(tree.child_log.count(), 1);
}

#[test]
fn unmount_releases_every_level() {
    let mut tree = mount_tree(initial_state());
    tree.host.unmount();

    assert_eq!(tree.store.unsubscribe_count(), 2);
    assert_eq!(tree.store.listener_count(), 0);
}
