//! 單位與據點的放置、移動、刪除
//!
//! 單位與據點是兩個獨立的佔據層：同一格可同時有一個單位與一個據點。

use crate::domain::alias::Level;
use crate::domain::constants::{FORT_PREFIX, MAX_LEVEL, MIN_LEVEL};
use crate::domain::document::{Fort, MapDocument, Pos, Unit};
use crate::domain::registry::{Team, UnitClass};
use crate::error::{MapError, Result};
use tracing::debug;

/// 將任意等級限制在合法範圍
pub fn clamp_level(lvl: i64) -> Level {
    // 先 clamp 再轉型，不會溢位
    lvl.clamp(MIN_LEVEL.into(), MAX_LEVEL.into()) as Level
}

fn occupied(pos: Pos, occupant: &str) -> MapError {
    MapError::Occupied {
        x: pos.x,
        y: pos.y,
        occupant: occupant.to_string(),
    }
}

fn not_found(id: &str) -> MapError {
    MapError::NotFound { id: id.to_string() }
}

impl MapDocument {
    pub fn find_unit_at(&self, pos: Pos) -> Option<&Unit> {
        self.units.iter().find(|u| u.pos() == pos)
    }

    pub fn find_fort_at(&self, pos: Pos) -> Option<&Fort> {
        self.forts.iter().find(|f| f.pos() == pos)
    }

    // ------------------------------------------------------------------
    // 單位
    // ------------------------------------------------------------------

    /// 放置單位，等級超出範圍時自動 clamp
    pub fn place_unit(
        &mut self,
        pos: Pos,
        team: Team,
        class: UnitClass,
        lvl: i64,
    ) -> Result<&Unit> {
        self.check_bounds(pos)?;
        if let Some(unit) = self.find_unit_at(pos) {
            return Err(occupied(pos, &unit.id).into());
        }

        let unit = Unit {
            id: self.allocate_id(team.unit_prefix()),
            team,
            class,
            x: pos.x,
            y: pos.y,
            lvl: clamp_level(lvl),
        };
        self.units.push(unit);
        let index = self.units.len() - 1;
        Ok(&self.units[index])
    }

    /// 以兵種 key 放置單位，key 不在登錄表時回傳 `UnknownClass`
    pub fn place_unit_by_key(
        &mut self,
        pos: Pos,
        team: Team,
        class_key: &str,
        lvl: i64,
    ) -> Result<&Unit> {
        let class = UnitClass::from_key(class_key)?;
        self.place_unit(pos, team, class, lvl)
    }

    /// 移動單位；目的地有其他單位時回傳 `Occupied`
    pub fn move_unit(&mut self, unit_id: &str, pos: Pos) -> Result<()> {
        let index = self
            .units
            .iter()
            .position(|u| u.id == unit_id)
            .ok_or_else(|| not_found(unit_id))?;
        self.check_bounds(pos)?;
        if let Some(other) = self.find_unit_at(pos).filter(|u| u.id != unit_id) {
            return Err(occupied(pos, &other.id).into());
        }

        let unit = &mut self.units[index];
        unit.x = pos.x;
        unit.y = pos.y;
        Ok(())
    }

    /// 刪除單位並回傳
    pub fn delete_unit(&mut self, unit_id: &str) -> Result<Unit> {
        let index = self
            .units
            .iter()
            .position(|u| u.id == unit_id)
            .ok_or_else(|| not_found(unit_id))?;
        Ok(self.units.remove(index))
    }

    // ------------------------------------------------------------------
    // 據點
    // ------------------------------------------------------------------

    pub fn place_fort(&mut self, pos: Pos, owner: Team) -> Result<&Fort> {
        self.check_bounds(pos)?;
        if let Some(fort) = self.find_fort_at(pos) {
            return Err(occupied(pos, &fort.id).into());
        }

        let fort = Fort {
            id: self.allocate_id(FORT_PREFIX),
            x: pos.x,
            y: pos.y,
            owner,
        };
        self.forts.push(fort);
        let index = self.forts.len() - 1;
        Ok(&self.forts[index])
    }

    /// 移動據點；目的地有其他據點時回傳 `Occupied`
    pub fn move_fort(&mut self, fort_id: &str, pos: Pos) -> Result<()> {
        let index = self
            .forts
            .iter()
            .position(|f| f.id == fort_id)
            .ok_or_else(|| not_found(fort_id))?;
        self.check_bounds(pos)?;
        if let Some(other) = self.find_fort_at(pos).filter(|f| f.id != fort_id) {
            return Err(occupied(pos, &other.id).into());
        }

        let fort = &mut self.forts[index];
        fort.x = pos.x;
        fort.y = pos.y;
        Ok(())
    }

    /// 刪除據點，並一併移除 `fortId` 指向它的援軍紀錄
    pub fn delete_fort(&mut self, fort_id: &str) -> Result<Fort> {
        let index = self
            .forts
            .iter()
            .position(|f| f.id == fort_id)
            .ok_or_else(|| not_found(fort_id))?;
        let fort = self.forts.remove(index);

        let before = self.reinforcements.len();
        self.reinforcements
            .retain(|r| r.fort_id() != Some(fort.id.as_str()));
        debug!(
            fort = %fort.id,
            removed = before - self.reinforcements.len(),
            "deleted fort and its reinforcements"
        );
        Ok(fort)
    }
}
