use super::constants::SKIRMISH_V2_JSON;
use map_lib::{LoadError, MapDocument, deserialize, export_file_name, load_file, save_file};
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("map-lib-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_save_then_load() {
    let dir = scratch_dir("save");
    let doc = deserialize(SKIRMISH_V2_JSON).unwrap();
    let path = dir.join("nested").join(export_file_name(&doc));

    save_file(&path, &doc).unwrap();
    assert!(path.ends_with("skirmish.json"));
    assert_eq!(load_file(&path).unwrap(), doc);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_load_missing_file() {
    let dir = scratch_dir("missing");
    let err = load_file(dir.join("nope.json")).unwrap_err();

    assert!(err.is_import_failed());
    assert!(matches!(err.load_error(), Some(LoadError::Io(_))));
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn test_load_invalid_file() {
    let dir = scratch_dir("invalid");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("broken.json");
    fs::write(&path, r#"{"version": 2, "w": 2, "h": 1, "tiles": [[{"t": "floor"}]]}"#).unwrap();

    // 匯入失敗時 UI 繼續使用目前的地圖
    let current = MapDocument::create(5, 5).unwrap();
    let err = load_file(&path).unwrap_err();
    assert!(err.is_import_failed());
    assert!(matches!(
        err.load_error(),
        Some(LoadError::InvalidWidth { row: 0, width: 2 })
    ));
    assert_eq!(current.width(), 5);

    let _ = fs::remove_dir_all(&dir);
}
