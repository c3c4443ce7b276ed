//! 唯一 ID 產生邏輯

use crate::domain::alias::EntityId;
use crate::domain::document::MapDocument;
use std::collections::HashSet;

/// 回傳 `{prefix}{n}` 中 n 最小（從 1 開始）且未被使用的 ID
pub fn allocate_id<'a>(used_ids: impl IntoIterator<Item = &'a str>, prefix: &str) -> EntityId {
    let used_ids: HashSet<&str> = used_ids.into_iter().collect();
    (1..)
        .map(|n: usize| format!("{prefix}{n}"))
        .find(|candidate| !used_ids.contains(candidate.as_str()))
        .unwrap_or_default()
}

impl MapDocument {
    /// 分配在單位、據點、援軍之間皆唯一的 ID
    pub fn allocate_id(&self, prefix: &str) -> EntityId {
        allocate_id(self.used_ids(), prefix)
    }
}
