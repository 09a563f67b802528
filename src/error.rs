//! 全局错误类型定义
use rsudger_engine::{DatasetError, LookupError};
use serde_json::Error as SerdeJsonError;
use std::{io::Error as IoError, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RsudgerError {
    // 数据集相关错误
    #[error("Dataset file not found: {}", .0.display())]
    DatasetNotFound(PathBuf),
    #[error("Dataset build failed: {0}")]
    Dataset(#[from] DatasetError),

    // 识别相关错误
    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    // 检测器相关错误
    #[error("Detector not initialized: {0}")]
    DetectorNotInitialized(String),
    #[error("Detector initialization failed: {0}")]
    DetectorInitError(String),
    #[error("Feature disabled: {0}")]
    FeatureDisabled(String),

    // 序列化/存储错误
    #[error("JSON parse failed: {0}")]
    JsonError(#[from] SerdeJsonError),
    #[cfg(feature = "sqlite")]
    #[error("SQLite operation failed: {0}")]
    SqliteError(#[from] rusqlite::Error),

    // 基础错误
    #[error("IO operation failed: {0}")]
    IoError(#[from] IoError),
}

// 全局Result类型
pub type RsuResult<T> = Result<T, RsudgerError>;
