use serde::{Deserialize, Serialize};

/// 原始规则行（数据源按评估顺序给出）
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RuleRow {
    pub id: u32,
    pub pattern: String,
}

impl RuleRow {
    pub fn new(id: u32, pattern: impl Into<String>) -> Self {
        Self {
            id,
            pattern: pattern.into(),
        }
    }
}

/// agent 元信息
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct AgentRecord {
    #[serde(default)]
    pub family: String,
    #[serde(default)]
    pub engine: String,
    #[serde(default)]
    pub class_id: u32,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub icon: String,
}

/// 平台元信息
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct PlatformRecord {
    #[serde(default)]
    pub family: String,
    /// 具体版本/变体名，例如 "OS X 10.11 El Capitan"
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub icon: String,
}

/// 设备类别信息
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct DeviceRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

impl DeviceRecord {
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AgentRow {
    pub id: u32,
    #[serde(flatten)]
    pub record: AgentRecord,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PlatformRow {
    pub id: u32,
    #[serde(flatten)]
    pub record: PlatformRecord,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DeviceRow {
    pub id: u32,
    #[serde(flatten)]
    pub record: DeviceRecord,
}

/// agent class 名称行（class_id → 可读标签）
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClassRow {
    pub id: u32,
    pub name: String,
}

/// agent → platform 显式关联
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct AgentPlatformLink {
    pub agent_id: u32,
    pub platform_id: u32,
}
