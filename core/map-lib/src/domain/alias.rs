//! 型別別名

/// 格子座標
pub type Coord = usize;
/// 單位、據點、援軍的 ID
pub type EntityId = String;
/// 單位等級
pub type Level = u8;
/// 格子的附加數值，保留原始數字（可為小數）
pub type TilePayload = serde_json::Number;
/// 地圖格式版本
pub type FormatVersion = u32;
