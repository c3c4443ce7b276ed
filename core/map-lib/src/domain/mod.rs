//! 地圖資料型別（不含操作邏輯）

pub mod alias;
pub mod constants;
pub mod document;
pub mod registry;
