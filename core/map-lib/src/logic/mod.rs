//! 地圖編輯邏輯（所有操作失敗時不修改文件）

pub mod entities;
pub mod id_allocator;
pub mod terrain;
