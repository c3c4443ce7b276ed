use super::constants::{LEGACY_V1_JSON, SKIRMISH_V2_JSON};
use map_lib::loader::read_version;
use map_lib::{deserialize, migrate};
use serde_json::{Value, json};

#[test]
fn test_migrate_v1_scenario() {
    let tiles = json!([
        [{"t": "floor", "v": 0}, {"t": "wall", "v": 0}, {"t": "floor", "v": 0}],
        [{"t": "forest", "v": 0}, {"t": "floor", "v": 0}, {"t": "floor", "v": 0}],
    ]);
    let raw = json!({"version": 1, "name": "x", "w": 3, "h": 2, "tiles": tiles.clone()});

    let migrated = migrate(raw);

    assert_eq!(migrated["version"], json!(2));
    assert_eq!(migrated["name"], json!("x"));
    assert_eq!(migrated["w"], json!(3));
    assert_eq!(migrated["h"], json!(2));
    assert_eq!(migrated["tiles"], tiles);
    assert_eq!(migrated["units"], json!([]));
    assert_eq!(migrated["forts"], json!([]));
    assert_eq!(migrated["reinforcements"], json!([]));
}

#[test]
fn test_migrate_is_idempotent() {
    let samples: Vec<Value> = vec![
        serde_json::from_str(LEGACY_V1_JSON).unwrap(),
        serde_json::from_str(SKIRMISH_V2_JSON).unwrap(),
        json!({}),
        json!(null),
        json!([1, 2, 3]),
        json!({"version": "2", "w": 1}),
        json!({"version": 0, "name": "", "units": [{"id": "P1"}]}),
        json!({"version": 5, "forts": null, "extra": {"kept": true}}),
    ];

    for raw in samples {
        let once = migrate(raw.clone());
        let twice = migrate(once.clone());
        assert_eq!(once, twice, "migrate 不是冪等: {raw}");
    }
}

#[test]
fn test_future_version_is_kept() {
    let migrated = migrate(json!({"version": 7, "custom": 1}));
    assert_eq!(migrated["version"], json!(7));
    assert_eq!(migrated["custom"], json!(1));
    assert_eq!(read_version(&migrated), 7);
}

#[test]
fn test_legacy_file_imports_as_v2() {
    let doc = deserialize(LEGACY_V1_JSON).unwrap();

    assert_eq!(doc.version(), 2);
    assert_eq!(doc.name, "old_keep");
    assert_eq!((doc.width(), doc.height()), (3, 2));
    assert_eq!(doc.tiles()[1][0].v.as_i64(), Some(2));
    assert!(doc.units().is_empty());
    assert!(doc.forts().is_empty());
    assert!(doc.reinforcements().is_empty());
}

#[test]
fn test_legacy_without_name_gets_placeholder() {
    let raw = json!({"w": 1, "h": 1, "tiles": [[{"t": "floor", "v": 0}]]});
    let doc = deserialize(&raw.to_string()).unwrap();
    assert_eq!(doc.name, "map_001");
}
