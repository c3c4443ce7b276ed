//! 建立地圖與地形繪製

use crate::domain::alias::Coord;
use crate::domain::document::{MapDocument, Pos, Tile};
use crate::domain::registry::Terrain;
use crate::error::{MapError, Result};

impl MapDocument {
    /// 建立 `width` x `height` 的空白地圖（全部為預設地形）
    pub fn create(width: Coord, height: Coord) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MapError::InvalidDimensions { width, height }.into());
        }
        Self::filled(width, height, Terrain::default())
    }

    /// 位置在地圖外時回傳 `OutOfBounds`
    pub fn check_bounds(&self, pos: Pos) -> Result<()> {
        if self.contains(pos) {
            return Ok(());
        }
        Err(MapError::OutOfBounds {
            x: pos.x,
            y: pos.y,
            width: self.w,
            height: self.h,
        }
        .into())
    }

    /// 設定單一格子的地形，附加數值歸零
    pub fn set_tile(&mut self, pos: Pos, terrain: Terrain) -> Result<()> {
        self.check_bounds(pos)?;
        if let Some(tile) = self.get_tile_mut(pos) {
            *tile = Tile::new(terrain);
        }
        Ok(())
    }

    /// 以地形 key 設定格子，key 不在登錄表時回傳 `UnknownTerrain`
    pub fn set_tile_by_key(&mut self, pos: Pos, key: &str) -> Result<()> {
        let terrain = Terrain::from_key(key)?;
        self.set_tile(pos, terrain)
    }

    pub fn fill_all(&mut self, terrain: Terrain) {
        for tile in self.tiles.iter_mut().flatten() {
            *tile = Tile::new(terrain);
        }
    }

    /// 全部還原為預設地形
    pub fn clear_all(&mut self) {
        self.fill_all(Terrain::default());
    }
}
