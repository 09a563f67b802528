//! 数据集配置管理

use std::path::{Path, PathBuf};

use rsudger_engine::{EngineOptions, FallbackPolicy};

use crate::error::{RsuResult, RsudgerError};

/// 默认数据集路径（udger v3 SQLite 文件）
pub const DEFAULT_DATASET_PATH: &str = "udgerdb_v3.dat";

/// 数据集来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetOrigin {
    SqliteFile(PathBuf), // udger v3 SQLite 数据库文件
    JsonFile(PathBuf),   // 八张表的 JSON 文档
}

impl DatasetOrigin {
    pub fn path(&self) -> &Path {
        match self {
            Self::SqliteFile(path) | Self::JsonFile(path) => path,
        }
    }
}

/// 完整数据集配置
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetConfig {
    pub origin: DatasetOrigin,
    pub engine: EngineOptions,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self::sqlite(DEFAULT_DATASET_PATH)
    }
}

impl DatasetConfig {
    /// udger v3 SQLite 数据库
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: DatasetOrigin::SqliteFile(path.into()),
            engine: EngineOptions::default(),
        }
    }

    /// JSON 数据集文档
    pub fn json(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: DatasetOrigin::JsonFile(path.into()),
            engine: EngineOptions::default(),
        }
    }

    /// 数据集文件必须存在，缺失时在任何解析之前失败
    pub fn ensure_exists(&self) -> RsuResult<()> {
        let path = self.origin.path();
        if path.is_file() {
            Ok(())
        } else {
            Err(RsudgerError::DatasetNotFound(path.to_path_buf()))
        }
    }
}

/// 自定义构建器（链式 API）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: DatasetConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, origin: DatasetOrigin) -> Self {
        self.config.origin = origin;
        self
    }

    pub fn backtrack_limit(mut self, limit: usize) -> Self {
        self.config.engine.backtrack_limit = limit;
        self
    }

    /// 替换移动浏览器 class 集合
    pub fn mobile_classes(mut self, classes: impl IntoIterator<Item = u32>) -> Self {
        let non_physical = self.config.engine.fallback.non_physical_classes().clone();
        self.config.engine.fallback = FallbackPolicy::new(classes, non_physical);
        self
    }

    /// 替换非实体设备 class 集合
    pub fn non_physical_classes(mut self, classes: impl IntoIterator<Item = u32>) -> Self {
        let mobile = self.config.engine.fallback.mobile_classes().clone();
        self.config.engine.fallback = FallbackPolicy::new(mobile, classes);
        self
    }

    pub fn build(self) -> DatasetConfig {
        self.config
    }
}
