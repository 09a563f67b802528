//! JSON 数据集文档
//! 文档结构与 MemoryDataset 一致：八张表各为一个数组，缺省数组视为空表

use std::path::Path;

use rsudger_engine::{
    AgentPlatformLink, AgentRow, ClassRow, DatasetProvider, DatasetResult, DeviceRow,
    MemoryDataset, PlatformRow, RuleRow,
};

use crate::error::{RsuResult, RsudgerError};

/// JSON 数据集
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonDataset {
    tables: MemoryDataset,
}

impl JsonDataset {
    /// 从 JSON 字符串解析
    pub fn from_json_str(json: &str) -> RsuResult<Self> {
        let tables: MemoryDataset = serde_json::from_str(json)?;
        Ok(Self::from(tables))
    }

    /// 从字节解析
    pub fn from_slice(bytes: &[u8]) -> RsuResult<Self> {
        let tables: MemoryDataset = serde_json::from_slice(bytes)?;
        Ok(Self::from(tables))
    }

    /// 从文件加载，文件不存在时返回 DatasetNotFound
    pub fn from_path(path: impl AsRef<Path>) -> RsuResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(RsudgerError::DatasetNotFound(path.to_path_buf()));
        }
        let bytes = std::fs::read(path)?;
        let dataset = Self::from_slice(&bytes)?;
        log::debug!(
            "JSON dataset loaded from {} | Rules: agent={} platform={} device={}",
            path.display(),
            dataset.tables.agent_rules.len(),
            dataset.tables.platform_rules.len(),
            dataset.tables.device_rules.len()
        );
        Ok(dataset)
    }

    pub fn tables(&self) -> &MemoryDataset {
        &self.tables
    }

    pub fn into_inner(self) -> MemoryDataset {
        self.tables
    }
}

impl From<MemoryDataset> for JsonDataset {
    fn from(tables: MemoryDataset) -> Self {
        Self { tables }
    }
}

impl DatasetProvider for JsonDataset {
    fn load_agent_rules(&self) -> DatasetResult<Vec<RuleRow>> {
        self.tables.load_agent_rules()
    }

    fn load_platform_rules(&self) -> DatasetResult<Vec<RuleRow>> {
        self.tables.load_platform_rules()
    }

    fn load_device_rules(&self) -> DatasetResult<Vec<RuleRow>> {
        self.tables.load_device_rules()
    }

    fn load_agent_records(&self) -> DatasetResult<Vec<AgentRow>> {
        self.tables.load_agent_records()
    }

    fn load_platform_records(&self) -> DatasetResult<Vec<PlatformRow>> {
        self.tables.load_platform_records()
    }

    fn load_device_records(&self) -> DatasetResult<Vec<DeviceRow>> {
        self.tables.load_device_records()
    }

    fn load_class_names(&self) -> DatasetResult<Vec<ClassRow>> {
        self.tables.load_class_names()
    }

    fn load_agent_platform_links(&self) -> DatasetResult<Vec<AgentPlatformLink>> {
        self.tables.load_agent_platform_links()
    }
}
