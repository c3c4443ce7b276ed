//! 編輯器設定（TOML）

use crate::domain::alias::Coord;
use crate::domain::constants::DEFAULT_MAP_NAME;
use crate::domain::document::MapDocument;
use crate::domain::registry::Terrain;
use crate::error::{Context, Error, LoadError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_MIN_SIZE: Coord = 5;
pub const DEFAULT_MAX_SIZE: Coord = 64;

/// 新地圖的預設值與尺寸範圍
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub default_name: String,
    pub min_size: Coord,
    pub max_size: Coord,
    pub default_terrain: Terrain,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_name: DEFAULT_MAP_NAME.to_string(),
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            default_terrain: Terrain::default(),
        }
    }
}

impl EditorSettings {
    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content).map_err(|err| LoadError::Deserialize {
            format: "TOML".to_string(),
            reason: err.to_string(),
        })?;
        settings.check()?;
        Ok(settings)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(LoadError::Io)
            .map_err(Error::from)
            .context(format!("讀取設定 {}", path.display()))?;
        Self::from_toml(&content).context(format!("解析設定 {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| {
            LoadError::Serialize {
                format: "TOML".to_string(),
                reason: err.to_string(),
            }
            .into()
        })
    }

    fn check(&self) -> Result<()> {
        if self.min_size == 0 || self.min_size > self.max_size {
            return Err(LoadError::InvalidSettings {
                reason: format!("尺寸範圍無效: {} ~ {}", self.min_size, self.max_size),
            }
            .into());
        }
        Ok(())
    }

    /// 將 UI 輸入的尺寸限制在設定範圍內
    pub fn clamp_size(&self, size: i64) -> Coord {
        let min = i64::try_from(self.min_size).unwrap_or(i64::MAX);
        let max = i64::try_from(self.max_size).unwrap_or(i64::MAX);
        // min <= max 已由 check 保證
        size.clamp(min, max.max(min)) as Coord
    }

    /// 依設定建立新地圖
    pub fn new_map(&self, width: i64, height: i64) -> Result<MapDocument> {
        let mut doc = MapDocument::create(self.clamp_size(width), self.clamp_size(height))?;
        doc.name = self.default_name.clone();
        doc.fill_all(self.default_terrain);
        Ok(doc)
    }
}
