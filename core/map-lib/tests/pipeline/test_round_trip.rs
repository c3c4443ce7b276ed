use super::constants::SKIRMISH_V2_JSON;
use crate::test_helpers::map_builder::map_from_ascii;
use map_lib::{MapDocument, Pos, Team, Terrain, UnitClass, deserialize, serialize};
use serde_json::{Value, json};

fn edited_map() -> MapDocument {
    let mut doc = map_from_ascii(
        r#"
. . T T ^
. # . ~ ~
W . . . .
        "#,
    );
    doc.name = "河岸".to_string();
    doc.place_unit(Pos::new(0, 0), Team::Player, UnitClass::Sword, 10)
        .unwrap();
    doc.place_unit(Pos::new(4, 2), Team::Enemy, UnitClass::Mage, 70)
        .unwrap();
    doc.place_fort(Pos::new(0, 2), Team::Player).unwrap();
    doc.place_fort(Pos::new(4, 2), Team::Enemy).unwrap();
    doc.move_unit("P1", Pos::new(1, 0)).unwrap();
    doc
}

#[test]
fn test_round_trip_fresh_map() {
    let doc = MapDocument::create(7, 3).unwrap();
    let text = serialize(&doc).unwrap();
    assert_eq!(deserialize(&text).unwrap(), doc);
}

#[test]
fn test_round_trip_edited_map() {
    let doc = edited_map();
    let text = serialize(&doc).unwrap();
    let loaded = deserialize(&text).unwrap();

    assert_eq!(loaded, doc);
    assert_eq!(serialize(&loaded).unwrap(), text);
}

#[test]
fn test_round_trip_keeps_reinforcement_fields() {
    let doc = deserialize(SKIRMISH_V2_JSON).unwrap();
    assert_eq!(doc.units().len(), 2);
    assert_eq!(doc.forts().len(), 2);
    assert_eq!(doc.tiles()[2][0].t, Terrain::Throne);

    let exported: Value = serde_json::from_str(&serialize(&doc).unwrap()).unwrap();
    let original: Value = serde_json::from_str(SKIRMISH_V2_JSON).unwrap();
    assert_eq!(exported, original);
    assert_eq!(
        exported["reinforcements"][0],
        json!({"id": "R1", "fortId": "F1", "turn": 4, "units": ["sword", "priest"]})
    );
    assert_eq!(deserialize(&exported.to_string()).unwrap(), doc);
}

#[test]
fn test_export_is_pretty_printed() {
    let doc = MapDocument::create(1, 1).unwrap();
    let text = serialize(&doc).unwrap();
    let expected = r#"{
  "version": 2,
  "name": "map_001",
  "w": 1,
  "h": 1,
  "tiles": [
    [
      {
        "t": "floor",
        "v": 0
      }
    ]
  ],
  "units": [],
  "forts": [],
  "reinforcements": []
}"#;
    assert_eq!(text, expected);
}

#[test]
fn test_validated_entities_are_in_bounds() {
    for text in [SKIRMISH_V2_JSON.to_string(), serialize(&edited_map()).unwrap()] {
        let doc = deserialize(&text).unwrap();
        let positions = doc
            .units()
            .iter()
            .map(|u| u.pos())
            .chain(doc.forts().iter().map(|f| f.pos()));
        for pos in positions {
            assert!(pos.x < doc.width() && pos.y < doc.height());
        }
    }
}

#[test]
fn test_round_trip_keeps_fractional_payload() {
    let raw = json!({
        "version": 2, "name": "沼澤", "w": 2, "h": 1,
        "tiles": [[{"t": "water", "v": 1.5}, {"t": "floor", "v": -3}]],
    });
    let doc = deserialize(&raw.to_string()).unwrap();
    assert_eq!(doc.tiles()[0][0].v.as_f64(), Some(1.5));

    let exported: Value = serde_json::from_str(&serialize(&doc).unwrap()).unwrap();
    assert_eq!(exported["tiles"], raw["tiles"]);
}

#[test]
fn test_future_version_keeps_unknown_fields() {
    let raw = json!({
        "version": 3, "name": "雨夜", "w": 1, "h": 1,
        "tiles": [[{"t": "floor", "v": 0}]],
        "units": [], "forts": [], "reinforcements": [],
        "weather": {"kind": "rain", "turns": 3},
    });
    let doc = deserialize(&raw.to_string()).unwrap();
    assert_eq!(doc.version(), 3);
    assert_eq!(doc.extra().get("weather"), Some(&raw["weather"]));

    let text = serialize(&doc).unwrap();
    let exported: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(exported, raw);
    // 未知欄位排在已知欄位之後
    assert!(text.find("\"reinforcements\"").unwrap() < text.find("\"weather\"").unwrap());
    assert_eq!(deserialize(&text).unwrap(), doc);
}

#[test]
fn test_integral_float_dimensions_import() {
    let raw = r#"{"version":2,"w":2.0,"h":1.0,"tiles":[[{"t":"floor"},{"t":"wall"}]]}"#;
    let doc = deserialize(raw).unwrap();
    assert_eq!((doc.width(), doc.height()), (2, 1));
    assert!(doc.extra().is_empty());
}
