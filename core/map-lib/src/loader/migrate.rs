//! 舊版地圖升級
//!
//! 只會往新版本升級，沒有降級路徑。

use super::{ENTITY_FIELDS, is_falsy};
use crate::domain::alias::FormatVersion;
use crate::domain::constants::{CURRENT_VERSION, DEFAULT_MAP_NAME, LEGACY_VERSION};
use serde_json::{Map, Value};
use tracing::debug;

/// 讀取版本號，缺少或無法辨識時視為舊版
pub fn read_version(raw: &Value) -> FormatVersion {
    let number = match raw.get("version") {
        Some(value) if !is_falsy(value) => match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        },
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() && n >= 1.0 => {
            n.trunc().min(FormatVersion::MAX as f64) as FormatVersion
        }
        _ => LEGACY_VERSION,
    }
}

/// 將原始 JSON 升級為目前版本的結構（尚未驗證）
pub fn migrate(raw: Value) -> Value {
    let version = read_version(&raw);
    match raw {
        Value::Object(mut map) if version >= CURRENT_VERSION => {
            map.insert("version".to_string(), Value::from(version));
            for field in ENTITY_FIELDS {
                if map.get(field).is_none_or(is_falsy) {
                    map.insert(field.to_string(), Value::Array(Vec::new()));
                }
            }
            Value::Object(map)
        }
        raw => {
            debug!(from = version, to = CURRENT_VERSION, "migrating legacy map");
            upgrade_legacy(raw)
        }
    }
}

// v1 沒有任何實體，只保留地形
fn upgrade_legacy(raw: Value) -> Value {
    let mut legacy = match raw {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let mut map = Map::new();
    map.insert("version".to_string(), Value::from(CURRENT_VERSION));
    let name = match legacy.remove("name") {
        Some(name) if !is_falsy(&name) => name,
        _ => Value::from(DEFAULT_MAP_NAME),
    };
    map.insert("name".to_string(), name);
    for field in ["w", "h", "tiles"] {
        if let Some(value) = legacy.remove(field) {
            map.insert(field.to_string(), value);
        }
    }
    for field in ENTITY_FIELDS {
        map.insert(field.to_string(), Value::Array(Vec::new()));
    }
    Value::Object(map)
}
