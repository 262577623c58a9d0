use super::*;
use serde_json::json;

fn record(value: Value) -> CommandRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn test_normalize_rewrites_legacy_key() {
    let descriptor = json!({"key": "Ctrl-G", "readOnly": true});

    let normalized = normalize_shortcut(&descriptor).unwrap();

    assert_eq!(
        Value::Object(normalized),
        json!({"readOnly": true, "bindKey": {"win": "Ctrl-G", "mac": "Ctrl-G"}})
    );
    // source descriptor is left alone
    assert_eq!(descriptor, json!({"key": "Ctrl-G", "readOnly": true}));
}

#[test]
fn test_normalize_keeps_platform_binding() {
    let descriptor = json!({"bindKey": {"win": "Ctrl-S", "mac": "Command-S"}});
    let normalized = normalize_shortcut(&descriptor).unwrap();
    assert_eq!(Value::Object(normalized), descriptor);
}

#[test]
fn test_normalize_string_descriptor() {
    let normalized = normalize_shortcut(&json!("F3")).unwrap();
    assert_eq!(
        Value::Object(normalized),
        json!({"bindKey": {"win": "F3", "mac": "F3"}})
    );
}

#[test]
fn test_normalize_rejects_other_primitives() {
    assert!(normalize_shortcut(&Value::Null).is_none());
    assert!(normalize_shortcut(&json!(true)).is_none());
    assert!(normalize_shortcut(&json!(3)).is_none());
}

#[test]
fn test_merge_prefers_shortcut_fields() {
    let command = record(json!({
        "name": "save",
        "bindKey": {"win": "Ctrl-S", "mac": "Command-S"},
        "readOnly": false,
    }));
    let shortcut = record(json!({"bindKey": {"win": "Alt-S", "mac": "Option-S"}}));

    let merged = merge_command(&command, shortcut);

    assert_eq!(command_name(&merged), Some("save"));
    assert_eq!(merged["bindKey"], json!({"win": "Alt-S", "mac": "Option-S"}));
    assert_eq!(merged["readOnly"], json!(false));
    assert_eq!(command["bindKey"], json!({"win": "Ctrl-S", "mac": "Command-S"}));
}
