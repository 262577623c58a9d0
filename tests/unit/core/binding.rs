use super::*;
use serde_json::json;

fn map(value: Value) -> BindingMap {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn test_changed_keys_nested_object() {
    let baseline = map(json!({"a": 1, "b": {"x": 1}}));
    let current = map(json!({"a": 1, "b": {"x": 2}}));

    assert_eq!(changed_keys(Some(&baseline), &current), vec!["b".to_string()]);
}

#[test]
fn test_changed_keys_without_baseline_is_empty() {
    let current = map(json!({"a": 1}));
    assert!(changed_keys(None, &current).is_empty());
}

#[test]
fn test_changed_keys_follow_baseline_order() {
    let baseline = map(json!({"c": 1, "a": 1, "b": 1}));
    let current = map(json!({"a": 2, "b": 1, "c": 2}));

    assert_eq!(
        changed_keys(Some(&baseline), &current),
        vec!["c".to_string(), "a".to_string()]
    );
}

#[test]
fn test_changed_keys_ignores_keys_missing_from_baseline() {
    let baseline = map(json!({"a": 1}));
    let current = map(json!({"a": 1, "b": 2}));
    assert!(changed_keys(Some(&baseline), &current).is_empty());
}

#[test]
fn test_shape_distinguishes_array_and_object() {
    assert!(same_shape(&json!({"x": 1}), &json!({})));
    assert!(!same_shape(&json!([]), &json!({})));
    assert!(!same_shape(&Value::Null, &json!({})));
    assert!(same_shape(&json!(1), &json!(2.5)));
}

#[test]
fn heal_document_replaces_absent_and_mismatched_entries() {
    let defaults = map(json!({
        "save": {"bindKey": {"win": "Ctrl-S", "mac": "Command-S"}},
        "find": {"bindKey": {"win": "Ctrl-F", "mac": "Command-F"}},
        "wrap": true,
    }));
    let document = map(json!({
        "save": {"bindKey": {"win": "Alt-S", "mac": "Option-S"}},
        "wrap": "yes",
        "stale": {"bindKey": "F9"},
    }));

    let (healed, replaced) = heal_document(&defaults, &document);

    assert_eq!(healed["save"], json!({"bindKey": {"win": "Alt-S", "mac": "Option-S"}}));
    assert_eq!(healed["find"], defaults["find"]);
    assert_eq!(healed["wrap"], json!(true));
    assert!(!healed.contains_key("stale"));
    assert_eq!(replaced, vec!["find".to_string(), "wrap".to_string()]);
    assert_eq!(healed.keys().collect::<Vec<_>>(), defaults.keys().collect::<Vec<_>>());
}

#[test]
fn apply_patch_skips_unknown_keys() {
    let mut target = map(json!({"save": "Ctrl-S"}));
    let patch = map(json!({"save": "Ctrl-Shift-S", "zzz": 1}));

    let ignored = apply_patch(&mut target, &patch);

    assert_eq!(ignored, vec!["zzz".to_string()]);
    assert_eq!(target, map(json!({"save": "Ctrl-Shift-S"})));
}
