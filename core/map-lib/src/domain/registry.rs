//! 固定登錄表：地形、兵種、陣營
//!
//! JSON 與 UI 都以 snake_case 字串作為 key。

use crate::domain::constants::{ENEMY_UNIT_PREFIX, PLAYER_UNIT_PREFIX};
use crate::error::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// 地形
#[derive(
    Debug,
    Deserialize,
    Serialize,
    Clone,
    Copy,
    Default,
    Display,
    EnumIter,
    EnumString,
    PartialEq,
    Eq,
    Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Terrain {
    #[default]
    Floor,
    Wall,
    Forest,
    Water,
    Mountain,
    Throne,
}

impl Terrain {
    /// 從 key 解析地形
    pub fn from_key(key: &str) -> Result<Self> {
        Self::from_str(key).map_err(|_| {
            MapError::UnknownTerrain {
                key: key.to_string(),
            }
            .into()
        })
    }

    /// 繪製用的顏色（CSS 色碼）
    pub fn color(self) -> &'static str {
        match self {
            Terrain::Floor => "#5b8c5a",
            Terrain::Wall => "#444",
            Terrain::Forest => "#2f6b3c",
            Terrain::Water => "#2a5f9e",
            Terrain::Mountain => "#7a7a7a",
            Terrain::Throne => "#c9a24d",
        }
    }

    /// 單位能否站上（編輯器本身不檢查）
    pub fn walkable(self) -> bool {
        matches!(self, Terrain::Floor | Terrain::Forest | Terrain::Throne)
    }
}

/// 兵種
#[derive(
    Debug, Deserialize, Serialize, Clone, Copy, Display, EnumIter, EnumString, PartialEq, Eq, Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UnitClass {
    Sword,
    Archer,
    Mage,
    Priest,
    Lance,
    Axe,
}

impl UnitClass {
    pub fn from_key(key: &str) -> Result<Self> {
        Self::from_str(key).map_err(|_| {
            MapError::UnknownClass {
                key: key.to_string(),
            }
            .into()
        })
    }

    /// 顯示名稱
    pub fn label(self) -> &'static str {
        match self {
            UnitClass::Sword => "劍士",
            UnitClass::Archer => "弓手",
            UnitClass::Mage => "法師",
            UnitClass::Priest => "祭司",
            UnitClass::Lance => "槍兵",
            UnitClass::Axe => "斧兵",
        }
    }

    /// 棋盤上顯示的單一字元
    pub fn glyph(self) -> char {
        match self {
            UnitClass::Sword => 'S',
            UnitClass::Archer => 'A',
            UnitClass::Mage => 'M',
            UnitClass::Priest => 'P',
            UnitClass::Lance => 'L',
            UnitClass::Axe => 'H',
        }
    }
}

/// 陣營（單位的 team、據點的 owner）
#[derive(
    Debug,
    Deserialize,
    Serialize,
    Clone,
    Copy,
    Default,
    Display,
    EnumIter,
    EnumString,
    PartialEq,
    Eq,
    Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Team {
    #[default]
    Player,
    Enemy,
}

impl Team {
    pub fn from_key(key: &str) -> Result<Self> {
        Self::from_str(key).map_err(|_| {
            MapError::UnknownTeam {
                key: key.to_string(),
            }
            .into()
        })
    }

    /// 單位 ID 前綴
    pub fn unit_prefix(self) -> &'static str {
        match self {
            Team::Player => PLAYER_UNIT_PREFIX,
            Team::Enemy => ENEMY_UNIT_PREFIX,
        }
    }
}
