//! 地圖匯入、匯出
//!
//! 匯入流程：解析 JSON → 升級舊版 → 驗證 → 轉成 `MapDocument`。
//! 任一步失敗都回傳 `ImportFailed`，不會產生部分結果。

pub mod migrate;
pub mod validate;

use crate::domain::constants::FALLBACK_EXPORT_NAME;
use crate::domain::document::MapDocument;
use crate::error::{Context, Error, LoadError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub use migrate::{migrate, read_version};
pub use validate::validate;

/// 會自動補上空陣列的實體欄位
pub(crate) const ENTITY_FIELDS: [&str; 3] = ["units", "forts", "reinforcements"];

/// 對應 JSON 的 falsy 值：null、false、0、空字串
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f == 0.0 || f.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// 序列化為縮排 2 格的 JSON
pub fn serialize(doc: &MapDocument) -> Result<String> {
    serde_json::to_string_pretty(doc).map_err(|err| {
        LoadError::Serialize {
            format: "JSON".to_string(),
            reason: err.to_string(),
        }
        .into()
    })
}

/// 從不可信任的 JSON 文字建立地圖
pub fn deserialize(text: &str) -> Result<MapDocument> {
    import(text).map_err(|err| {
        warn!(%err, "map import rejected");
        err.into_import_failed()
    })
}

fn import(text: &str) -> Result<MapDocument> {
    let raw: Value = serde_json::from_str(text).map_err(LoadError::MalformedJson)?;
    let mut raw = migrate(raw);
    validate(&mut raw).context("驗證地圖")?;
    let doc: MapDocument = serde_json::from_value(raw).map_err(|err| LoadError::Deserialize {
        format: "JSON".to_string(),
        reason: err.to_string(),
    })?;
    debug!(name = %doc.name, w = doc.width(), h = doc.height(), "map imported");
    Ok(doc)
}

/// 匯出檔名：`{name}.json`，名稱為空時使用 `map.json`
pub fn export_file_name(doc: &MapDocument) -> String {
    let name = match doc.name.as_str() {
        "" => FALLBACK_EXPORT_NAME,
        name => name,
    };
    format!("{name}.json")
}

/// 讀取地圖檔
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<MapDocument> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|err| Error::from(LoadError::Io(err)).into_import_failed())
        .context(format!("讀取 {}", path.display()))?;
    deserialize(&text).context(format!("匯入 {}", path.display()))
}

/// 寫入地圖檔，必要時建立目錄
pub fn save_file<P: AsRef<Path>>(path: P, doc: &MapDocument) -> Result<()> {
    let path = path.as_ref();
    let content = serialize(doc)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(LoadError::Io)
            .map_err(Error::from)
            .context(format!("建立目錄 {}", parent.display()))?;
    }
    fs::write(path, content)
        .map_err(LoadError::Io)
        .map_err(Error::from)
        .context(format!("寫入 {}", path.display()))?;
    debug!(path = %path.display(), "map exported");
    Ok(())
}
