//! 地圖文件結構
//!
//! 欄位順序即序列化順序，不可任意調整。

use crate::domain::alias::{Coord, EntityId, FormatVersion, Level, TilePayload};
use crate::domain::constants::{CURRENT_VERSION, DEFAULT_MAP_NAME, DEFAULT_TILE_PAYLOAD};
use crate::domain::registry::{Team, Terrain, UnitClass};
use crate::error::{MapError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 格子座標
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Pos {
    pub x: Coord,
    pub y: Coord,
}

impl Pos {
    pub fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }
}

fn default_payload() -> TilePayload {
    TilePayload::from(DEFAULT_TILE_PAYLOAD)
}

/// 單一格子
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub t: Terrain,
    #[serde(default = "default_payload")]
    pub v: TilePayload,
}

impl Tile {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            t: terrain,
            v: default_payload(),
        }
    }
}

/// 單位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: EntityId,
    pub team: Team,
    pub class: UnitClass,
    pub x: Coord,
    pub y: Coord,
    pub lvl: Level,
}

impl Unit {
    pub fn pos(&self) -> Pos {
        Pos::new(self.x, self.y)
    }
}

/// 據點
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fort {
    pub id: EntityId,
    pub x: Coord,
    pub y: Coord,
    pub owner: Team,
}

impl Fort {
    pub fn pos(&self) -> Pos {
        Pos::new(self.x, self.y)
    }
}

/// 援軍紀錄
///
/// 除了 `id` 與 `fortId` 以外的內容不解讀，原樣保存。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reinforcement(Value);

impl Reinforcement {
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// 所屬據點 ID
    pub fn fort_id(&self) -> Option<&str> {
        self.0.get("fortId").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Reinforcement {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<Map<String, Value>> for Reinforcement {
    fn from(map: Map<String, Value>) -> Self {
        Self(Value::Object(map))
    }
}

fn default_name() -> String {
    DEFAULT_MAP_NAME.to_string()
}

// null 與缺少欄位一樣使用預設名稱
fn name_or_default<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_name))
}

/// 地圖文件（匯出、匯入的單位）
///
/// `w`、`h` 建立後不可變；只能透過 `logic` 中的操作修改內容。
/// 不認得的頂層欄位保存在 `extra`，匯出時接在已知欄位之後。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    pub(crate) version: FormatVersion,
    #[serde(default = "default_name", deserialize_with = "name_or_default")]
    pub name: String,
    pub(crate) w: Coord,
    pub(crate) h: Coord,
    pub(crate) tiles: Vec<Vec<Tile>>,
    #[serde(default)]
    pub(crate) units: Vec<Unit>,
    #[serde(default)]
    pub(crate) forts: Vec<Fort>,
    #[serde(default)]
    pub(crate) reinforcements: Vec<Reinforcement>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

impl MapDocument {
    /// 建立全部為指定地形的空白地圖，呼叫端需保證尺寸為正
    ///
    /// 格子總數溢位或無法配置時回傳 `InvalidDimensions`，不會 panic。
    pub(crate) fn filled(width: Coord, height: Coord, terrain: Terrain) -> Result<Self> {
        let invalid = || MapError::InvalidDimensions { width, height };
        let bytes = width
            .checked_mul(height)
            .and_then(|cells| cells.checked_mul(size_of::<Tile>()))
            .ok_or_else(invalid)?;
        if isize::try_from(bytes).is_err() {
            return Err(invalid().into());
        }

        let mut tiles = Vec::new();
        tiles.try_reserve_exact(height).map_err(|_| invalid())?;
        for _ in 0..height {
            let mut row = Vec::new();
            row.try_reserve_exact(width).map_err(|_| invalid())?;
            row.resize(width, Tile::new(terrain));
            tiles.push(row);
        }

        Ok(Self {
            version: CURRENT_VERSION,
            name: default_name(),
            w: width,
            h: height,
            tiles,
            units: Vec::new(),
            forts: Vec::new(),
            reinforcements: Vec::new(),
            extra: Map::new(),
        })
    }

    pub fn version(&self) -> FormatVersion {
        self.version
    }

    pub fn width(&self) -> Coord {
        self.w
    }

    pub fn height(&self) -> Coord {
        self.h
    }

    pub fn tiles(&self) -> &[Vec<Tile>] {
        &self.tiles
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn forts(&self) -> &[Fort] {
        &self.forts
    }

    pub fn reinforcements(&self) -> &[Reinforcement] {
        &self.reinforcements
    }

    /// 不認得的頂層欄位（較新版本的格式）
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.w && pos.y < self.h
    }

    pub fn get_tile(&self, pos: Pos) -> Option<&Tile> {
        let Pos { x, y } = pos;
        self.tiles.get(y)?.get(x)
    }

    pub(crate) fn get_tile_mut(&mut self, pos: Pos) -> Option<&mut Tile> {
        let Pos { x, y } = pos;
        self.tiles.get_mut(y)?.get_mut(x)
    }

    pub fn get_unit(&self, id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn get_fort(&self, id: &str) -> Option<&Fort> {
        self.forts.iter().find(|f| f.id == id)
    }

    /// 所有已使用的 ID（單位、據點、援軍）
    pub fn used_ids(&self) -> impl Iterator<Item = &str> {
        self.units
            .iter()
            .map(|u| u.id.as_str())
            .chain(self.forts.iter().map(|f| f.id.as_str()))
            .chain(self.reinforcements.iter().filter_map(Reinforcement::id))
    }
}
