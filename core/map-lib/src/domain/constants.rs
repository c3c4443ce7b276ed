//! 地圖常數定義

use crate::domain::alias::{FormatVersion, Level};

/// 目前的地圖格式版本
pub const CURRENT_VERSION: FormatVersion = 2;

/// 缺少版本號時視為的版本
pub const LEGACY_VERSION: FormatVersion = 1;

/// 未命名地圖的預設名稱
pub const DEFAULT_MAP_NAME: &str = "map_001";

/// 名稱為空時的匯出檔名
pub const FALLBACK_EXPORT_NAME: &str = "map";

pub const MIN_LEVEL: Level = 1;
pub const MAX_LEVEL: Level = 50;

/// 新格子的附加數值
pub const DEFAULT_TILE_PAYLOAD: i64 = 0;

// ID 前綴
pub const PLAYER_UNIT_PREFIX: &str = "P";
pub const ENEMY_UNIT_PREFIX: &str = "E";
pub const FORT_PREFIX: &str = "F";
