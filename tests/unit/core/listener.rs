use super::*;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<String>>>;

fn recorder(log: &Log, tag: &'static str) -> Listener {
    let log = Rc::clone(log);
    Box::new(move |args: &ListenerArgs<'_>| -> ListenerResult {
        let entry = match args.key() {
            Some(key) => format!("{tag}:{key}"),
            None => tag.to_string(),
        };
        log.borrow_mut().push(entry);
        Ok(())
    })
}

#[test]
fn test_generic_listeners_run_before_key_listeners() {
    let log = Log::default();
    let mut registry = ListenerRegistry::new();
    registry.on(ListenerEvent::update_key("a"), recorder(&log, "M"));
    registry.on(ListenerEvent::update(), recorder(&log, "L"));

    let value = json!(1);
    registry.dispatch_binding(Phase::Before, "a", &value).unwrap();
    registry.dispatch_binding(Phase::Before, "c", &value).unwrap();

    assert_eq!(*log.borrow(), vec!["L:a", "M:a", "L:c"]);
}

#[test]
fn test_phases_are_separate() {
    let log = Log::default();
    let mut registry = ListenerRegistry::new();
    registry.on(ListenerEvent::update(), recorder(&log, "before"));
    registry.on(ListenerEvent::update_key_after("a"), recorder(&log, "after"));

    let value = json!("x");
    registry.dispatch_binding(Phase::After, "a", &value).unwrap();
    assert_eq!(*log.borrow(), vec!["after:a"]);
}

#[test]
fn test_off_preserves_order_of_remaining_listeners() {
    let log = Log::default();
    let mut registry = ListenerRegistry::new();
    registry.on(ListenerEvent::update(), recorder(&log, "1"));
    let second = registry.on(ListenerEvent::update(), recorder(&log, "2"));
    registry.on(ListenerEvent::update(), recorder(&log, "3"));

    assert!(registry.off(&ListenerEvent::update(), second));
    assert_eq!(registry.len(&ListenerEvent::update()), 2);

    registry
        .dispatch_binding(Phase::Before, "k", &json!(null))
        .unwrap();
    assert_eq!(*log.borrow(), vec!["1:k", "3:k"]);
}

#[test]
fn test_off_unknown_listener_is_noop() {
    let log = Log::default();
    let mut registry = ListenerRegistry::new();
    let id = registry.on(ListenerEvent::update_key("save"), recorder(&log, "s"));

    assert!(!registry.off(&ListenerEvent::update_key("find"), id));
    assert!(!registry.off(&ListenerEvent::Reset, id));
    assert!(registry.off(&ListenerEvent::update_key("save"), id));
    assert!(!registry.off(&ListenerEvent::update_key("save"), id));
    assert!(registry.is_empty());
}

#[test]
fn test_failing_listener_stops_dispatch() {
    let log = Log::default();
    let mut registry = ListenerRegistry::new();
    registry.on(
        ListenerEvent::update(),
        |_: &ListenerArgs<'_>| -> ListenerResult { Err("boom".into()) },
    );
    registry.on(ListenerEvent::update_key("a"), recorder(&log, "M"));

    let err = registry
        .dispatch_binding(Phase::Before, "a", &json!(1))
        .unwrap_err();
    assert_eq!(err.event, ListenerEvent::update());
    assert_eq!(err.to_string(), "Listener for 'update' failed: boom");
    assert!(log.borrow().is_empty());
}

#[test]
fn test_reset_listeners_receive_whole_mapping() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut registry = ListenerRegistry::new();
    let sink = Rc::clone(&seen);
    registry.on(
        ListenerEvent::Reset,
        move |args: &ListenerArgs<'_>| {
            if let Some(bindings) = args.bindings() {
                sink.borrow_mut().push(bindings.len());
            }
            Ok(())
        },
    );

    let mut bindings = BindingMap::new();
    bindings.insert("a".into(), json!(1));
    bindings.insert("b".into(), json!(2));
    registry.dispatch_reset(&bindings).unwrap();

    assert_eq!(*seen.borrow(), vec![2]);
}
