//! 戰棋地圖編輯器核心
//!
//! - `domain`：地圖文件與固定登錄表（地形、兵種、陣營）
//! - `logic`：保持不變量的編輯操作
//! - `loader`：JSON 匯出、匯入、版本升級與驗證
//! - `settings`：編輯器的 TOML 設定
//!
//! 本函式庫不持有「目前的地圖」，由 UI 持有 `MapDocument` 並傳入各操作。

pub mod domain;
pub mod error;
pub mod loader;
pub mod logic;
pub mod settings;

pub use domain::alias;
pub use domain::constants;
pub use domain::document::{Fort, MapDocument, Pos, Reinforcement, Tile, Unit};
pub use domain::registry::{Team, Terrain, UnitClass};
pub use error::{Context, Error, ErrorKind, LoadError, MapError, Result};
pub use loader::{deserialize, export_file_name, load_file, migrate, save_file, serialize, validate};
pub use settings::EditorSettings;
