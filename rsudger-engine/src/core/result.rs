//! 识别结果结构，每次查询新建，调用方独占

use serde::{Deserialize, Serialize};

use super::enums::{DeviceOrigin, PlatformOrigin};
use super::record::{DeviceRecord, PlatformRecord};

/// 识别结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassificationResult {
    pub agent: Option<AgentView>,
    pub platform: Option<PlatformView>,
    pub device: DeviceView,
}

impl std::fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let agent = self.agent.as_ref().map_or("unknown", |a| a.name.as_str());
        let platform = self.platform.as_ref().map_or("unknown", |p| p.record.name.as_str());
        write!(f, "{} | {} | {}", agent, platform, self.device.record.name)
    }
}

/// agent 视图：记录 + 解析出的版本与展示名
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentView {
    pub id: u32,
    /// family + " " + version；无版本时等于 family
    pub name: String,
    pub family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub engine: String,
    pub class_id: u32,
    /// class 表中的可读标签，例如 "Browser"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub vendor: String,
    pub icon: String,
}

impl AgentView {
    /// 拼接展示名
    pub fn display_name(family: &str, version: Option<&str>) -> String {
        match version {
            Some(v) if !v.is_empty() => format!("{} {}", family, v),
            _ => family.to_string(),
        }
    }
}

impl std::fmt::Display for AgentView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlatformView {
    pub id: u32,
    #[serde(flatten)]
    pub record: PlatformRecord,
    pub origin: PlatformOrigin,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceView {
    #[serde(flatten)]
    pub record: DeviceRecord,
    pub origin: DeviceOrigin,
}
