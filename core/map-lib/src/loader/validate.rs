//! 地圖結構驗證
//!
//! 依序檢查，遇到第一個錯誤即回傳。自動修正只有三種：
//! 格子的 `v` 不是數字時設為 0、實體陣列缺少時補空陣列，
//! 以及 `w`、`h` 寫成整數值的小數（`3.0`）時轉為整數。

use super::{ENTITY_FIELDS, is_falsy};
use crate::domain::alias::{Coord, EntityId};
use crate::domain::constants::{DEFAULT_TILE_PAYLOAD, MAX_LEVEL, MIN_LEVEL};
use crate::domain::document::{Fort, Pos, Unit};
use crate::domain::registry::Terrain;
use crate::error::{Error, LoadError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use tracing::debug;

fn base_error(reason: &str) -> LoadError {
    LoadError::InvalidBaseMap {
        reason: reason.to_string(),
    }
}

// 超過此值的小數無法精確表示整數
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_991.0;

fn positive_coord(value: Option<&Value>) -> Option<Coord> {
    let Some(Value::Number(n)) = value else {
        return None;
    };
    let n = match n.as_u64() {
        Some(n) => n,
        None => n
            .as_f64()
            .filter(|f| f.fract() == 0.0 && (1.0..=MAX_EXACT_FLOAT).contains(f))
            .map(|f| f as u64)?,
    };
    Coord::try_from(n).ok().filter(|n| *n > 0)
}

/// 驗證（並就地修正）已遷移的地圖 JSON
pub fn validate(raw: &mut Value) -> Result<()> {
    let map = raw
        .as_object_mut()
        .ok_or_else(|| base_error("地圖不是物件"))?;

    // 1. 基本欄位
    let (Some(width), Some(height)) = (positive_coord(map.get("w")), positive_coord(map.get("h")))
    else {
        return Err(base_error("w、h 必須是正整數").into());
    };
    if !map.get("tiles").is_some_and(Value::is_array) {
        return Err(base_error("tiles 不是陣列").into());
    }
    if map.get("name").is_some_and(|name| !name.is_null() && !name.is_string()) {
        return Err(base_error("name 不是字串").into());
    }
    map.insert("w".to_string(), Value::from(width));
    map.insert("h".to_string(), Value::from(height));

    // 2. 版本
    match map.get("version") {
        None => return Err(LoadError::MissingVersion.into()),
        Some(version) if is_falsy(version) => return Err(LoadError::MissingVersion.into()),
        Some(version) if version.as_u64().is_none_or(|v| u32::try_from(v).is_err()) => {
            return Err(base_error("version 不是正整數").into());
        }
        Some(_) => {}
    }

    // 3 ~ 5. 格子
    if let Some(Value::Array(rows)) = map.get_mut("tiles") {
        validate_tiles(rows, width, height)?;
    }

    // 6. 實體陣列
    for field in ENTITY_FIELDS {
        if map.get(field).is_none_or(is_falsy) {
            map.insert(field.to_string(), Value::Array(Vec::new()));
        }
        if !map.get(field).is_some_and(Value::is_array) {
            return Err(LoadError::InvalidArrays { field }.into());
        }
    }

    // 7 ~ 10. 實體內容
    validate_entities(map, width, height)
}

fn validate_tiles(rows: &mut [Value], width: Coord, height: Coord) -> Result<()> {
    if rows.len() != height {
        return Err(LoadError::InvalidHeight {
            rows: rows.len(),
            height,
        }
        .into());
    }

    let mut repaired = 0usize;
    for (y, row) in rows.iter_mut().enumerate() {
        let cells = match row {
            Value::Array(cells) if cells.len() == width => cells,
            _ => return Err(LoadError::InvalidWidth { row: y, width }.into()),
        };
        for (x, cell) in cells.iter_mut().enumerate() {
            let Some(cell) = cell.as_object_mut() else {
                return Err(LoadError::InvalidTile { x, y }.into());
            };
            let known = cell
                .get("t")
                .and_then(Value::as_str)
                .is_some_and(|key| !key.is_empty() && Terrain::from_str(key).is_ok());
            if !known {
                return Err(LoadError::InvalidTile { x, y }.into());
            }
            if repair_payload(cell) {
                repaired += 1;
            }
        }
    }

    if repaired > 0 {
        debug!(repaired, "reset non-numeric tile payloads to 0");
    }
    Ok(())
}

// 回傳是否有修正
fn repair_payload(cell: &mut Map<String, Value>) -> bool {
    if cell.get("v").is_some_and(Value::is_number) {
        return false;
    }
    cell.insert("v".to_string(), Value::from(DEFAULT_TILE_PAYLOAD));
    true
}

fn entity_error(collection: &'static str, index: usize, reason: impl ToString) -> LoadError {
    LoadError::InvalidEntity {
        collection,
        index,
        reason: reason.to_string(),
    }
}

fn parse_entities<'a, T: Deserialize<'a>>(
    map: &'a Map<String, Value>,
    collection: &'static str,
) -> Result<Vec<T>> {
    let Some(Value::Array(items)) = map.get(collection) else {
        return Err(LoadError::InvalidArrays { field: collection }.into());
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            T::deserialize(item).map_err(|e| Error::from(entity_error(collection, index, e)))
        })
        .collect()
}

fn validate_entities(map: &Map<String, Value>, width: Coord, height: Coord) -> Result<()> {
    // 7. 格式
    let units: Vec<Unit> = parse_entities(map, "units")?;
    let forts: Vec<Fort> = parse_entities(map, "forts")?;
    if let Some((index, unit)) = units
        .iter()
        .enumerate()
        .find(|(_, u)| !(MIN_LEVEL..=MAX_LEVEL).contains(&u.lvl))
    {
        return Err(entity_error("units", index, format!("lvl {} 超出範圍", unit.lvl)).into());
    }

    // 8. 邊界
    let positions = units
        .iter()
        .map(|u| (&u.id, u.pos()))
        .chain(forts.iter().map(|f| (&f.id, f.pos())));
    for (id, pos) in positions {
        if pos.x >= width || pos.y >= height {
            return Err(LoadError::EntityOutOfBounds {
                id: id.clone(),
                x: pos.x,
                y: pos.y,
            }
            .into());
        }
    }

    // 9. ID 唯一
    let reinforcement_ids = map
        .get("reinforcements")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|r| r.get("id").and_then(Value::as_str));
    let mut seen = HashSet::new();
    let ids = units
        .iter()
        .map(|u| u.id.as_str())
        .chain(forts.iter().map(|f| f.id.as_str()))
        .chain(reinforcement_ids);
    for id in ids {
        if !seen.insert(id) {
            return Err(LoadError::DuplicateId { id: id.to_string() }.into());
        }
    }

    // 10. 每層每格最多一個
    check_occupancy(units.iter().map(|u| (&u.id, u.pos())))?;
    check_occupancy(forts.iter().map(|f| (&f.id, f.pos())))
}

fn check_occupancy<'a>(layer: impl Iterator<Item = (&'a EntityId, Pos)>) -> Result<()> {
    let mut occupants: HashMap<Pos, &EntityId> = HashMap::new();
    for (id, pos) in layer {
        if let Some(first) = occupants.insert(pos, id) {
            return Err(LoadError::CellOccupied {
                first: first.clone(),
                second: id.clone(),
                x: pos.x,
                y: pos.y,
            }
            .into());
        }
    }
    Ok(())
}
