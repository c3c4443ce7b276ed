//! 錯誤處理系統
//!
//! 與棋盤核心相同的結構：
//! - `MapError`：地圖模型操作失敗
//! - `LoadError`：序列化、遷移、驗證失敗
//! - `ImportFailed`：匯入邊界把任何 `LoadError` 包成單一結果

use crate::domain::alias::{Coord, EntityId};
use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// 頂層錯誤，包含原始錯誤和 context 鏈
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    contexts: Vec<String>,
}

/// 錯誤種類
#[derive(Debug, ThisError)]
pub enum ErrorKind {
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("匯入地圖失敗: {0}")]
    ImportFailed(#[source] LoadError),
}

/// 地圖模型錯誤
#[derive(Debug, ThisError, PartialEq)]
pub enum MapError {
    #[error("地圖尺寸無效: {width} x {height}")]
    InvalidDimensions { width: Coord, height: Coord },
    #[error("位置超出地圖邊界: ({x}, {y}) 邊界 ({width}, {height})")]
    OutOfBounds {
        x: Coord,
        y: Coord,
        width: Coord,
        height: Coord,
    },
    #[error("未知的地形: {key}")]
    UnknownTerrain { key: String },
    #[error("未知的兵種: {key}")]
    UnknownClass { key: String },
    #[error("未知的陣營: {key}")]
    UnknownTeam { key: String },
    #[error("位置 ({x}, {y}) 已被 {occupant} 佔據")]
    Occupied { x: Coord, y: Coord, occupant: EntityId },
    #[error("找不到 {id}")]
    NotFound { id: EntityId },
}

/// 格式載入錯誤
#[derive(Debug, ThisError)]
pub enum LoadError {
    #[error("JSON 解析失敗: {0}")]
    MalformedJson(#[source] serde_json::Error),
    #[error("地圖基本欄位無效: {reason}")]
    InvalidBaseMap { reason: String },
    #[error("缺少版本號")]
    MissingVersion,
    #[error("高度不符: tiles 有 {rows} 列，h 為 {height}")]
    InvalidHeight { rows: usize, height: Coord },
    #[error("寬度不符: 第 {row} 列長度不是 {width}")]
    InvalidWidth { row: usize, width: Coord },
    #[error("地形無效: ({x}, {y})")]
    InvalidTile { x: Coord, y: Coord },
    #[error("{field} 不是陣列")]
    InvalidArrays { field: &'static str },
    #[error("{collection}[{index}] 格式錯誤: {reason}")]
    InvalidEntity {
        collection: &'static str,
        index: usize,
        reason: String,
    },
    #[error("{id} 位置超出地圖邊界: ({x}, {y})")]
    EntityOutOfBounds { id: EntityId, x: Coord, y: Coord },
    #[error("ID 重複: {id}")]
    DuplicateId { id: EntityId },
    #[error("{first} 與 {second} 佔據同一格 ({x}, {y})")]
    CellOccupied {
        first: EntityId,
        second: EntityId,
        x: Coord,
        y: Coord,
    },
    #[error("{format} 序列化失敗: {reason}")]
    Serialize { format: String, reason: String },
    #[error("{format} 反序列化失敗: {reason}")]
    Deserialize { format: String, reason: String },
    #[error("設定無效: {reason}")]
    InvalidSettings { reason: String },
    #[error("讀寫檔案失敗: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// 取出模型錯誤（若是）
    pub fn map_error(&self) -> Option<&MapError> {
        match &self.kind {
            ErrorKind::Map(err) => Some(err),
            _ => None,
        }
    }

    /// 取出載入錯誤，匯入失敗時回傳其原因
    pub fn load_error(&self) -> Option<&LoadError> {
        match &self.kind {
            ErrorKind::Load(err) | ErrorKind::ImportFailed(err) => Some(err),
            ErrorKind::Map(_) => None,
        }
    }

    pub fn is_import_failed(&self) -> bool {
        matches!(self.kind, ErrorKind::ImportFailed(_))
    }

    /// 將載入錯誤轉為匯入失敗，保留 context
    pub(crate) fn into_import_failed(self) -> Self {
        let kind = match self.kind {
            ErrorKind::Load(err) => ErrorKind::ImportFailed(err),
            other => other,
        };
        Self {
            kind,
            contexts: self.contexts,
        }
    }

    /// 添加錯誤上下文，自動記錄呼叫位置
    #[track_caller]
    pub fn context<C: Into<String>>(mut self, context: C) -> Self {
        let loc = std::panic::Location::caller();
        let msg = format!("{} [{}:{}]", context.into(), loc.file(), loc.line());
        self.contexts.push(msg);
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        for ctx in &self.contexts {
            write!(f, "\n  {}", ctx)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

impl<E: Into<ErrorKind>> From<E> for Error {
    fn from(error: E) -> Self {
        Self {
            kind: error.into(),
            contexts: Vec::new(),
        }
    }
}

/// Result 擴展 trait，用於添加錯誤上下文
pub trait Context<T> {
    fn context<C: Into<String>>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Result<T> {
    #[track_caller]
    fn context<C: Into<String>>(self, context: C) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(e) => Err(e.context(context)),
        }
    }
}
