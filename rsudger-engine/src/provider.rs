//! 数据集提供者 Trait
//! 内核只消费这八张表，不关心底层存储（SQLite / JSON / 内存）

use serde::{Deserialize, Serialize};

use crate::core::{
    AgentPlatformLink, AgentRecord, AgentRow, ClassRow, DeviceRecord, DeviceRow, PlatformRecord,
    PlatformRow, RuleRow,
};
use crate::error::DatasetResult;

/// 数据集提供者
/// 规则类表必须按数据源期望的评估顺序返回
pub trait DatasetProvider {
    fn load_agent_rules(&self) -> DatasetResult<Vec<RuleRow>>;
    fn load_platform_rules(&self) -> DatasetResult<Vec<RuleRow>>;
    fn load_device_rules(&self) -> DatasetResult<Vec<RuleRow>>;

    fn load_agent_records(&self) -> DatasetResult<Vec<AgentRow>>;
    fn load_platform_records(&self) -> DatasetResult<Vec<PlatformRow>>;
    fn load_device_records(&self) -> DatasetResult<Vec<DeviceRow>>;

    fn load_class_names(&self) -> DatasetResult<Vec<ClassRow>>;
    fn load_agent_platform_links(&self) -> DatasetResult<Vec<AgentPlatformLink>>;
}

/// 内存数据集：八张表的直接持有者，可由 serde 反序列化
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct MemoryDataset {
    #[serde(default)]
    pub agent_rules: Vec<RuleRow>,
    #[serde(default)]
    pub platform_rules: Vec<RuleRow>,
    #[serde(default)]
    pub device_rules: Vec<RuleRow>,
    #[serde(default)]
    pub agents: Vec<AgentRow>,
    #[serde(default)]
    pub platforms: Vec<PlatformRow>,
    #[serde(default)]
    pub devices: Vec<DeviceRow>,
    #[serde(default)]
    pub classes: Vec<ClassRow>,
    #[serde(default)]
    pub agent_platform_links: Vec<AgentPlatformLink>,
}

impl MemoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    // 链式添加，规则按调用顺序即评估顺序
    pub fn agent_rule(mut self, id: u32, pattern: &str) -> Self {
        self.agent_rules.push(RuleRow::new(id, pattern));
        self
    }

    pub fn platform_rule(mut self, id: u32, pattern: &str) -> Self {
        self.platform_rules.push(RuleRow::new(id, pattern));
        self
    }

    pub fn device_rule(mut self, id: u32, pattern: &str) -> Self {
        self.device_rules.push(RuleRow::new(id, pattern));
        self
    }

    pub fn agent(mut self, id: u32, record: AgentRecord) -> Self {
        self.agents.push(AgentRow { id, record });
        self
    }

    pub fn platform(mut self, id: u32, record: PlatformRecord) -> Self {
        self.platforms.push(PlatformRow { id, record });
        self
    }

    pub fn device(mut self, id: u32, record: DeviceRecord) -> Self {
        self.devices.push(DeviceRow { id, record });
        self
    }

    pub fn class(mut self, id: u32, name: &str) -> Self {
        self.classes.push(ClassRow {
            id,
            name: name.to_string(),
        });
        self
    }

    pub fn link(mut self, agent_id: u32, platform_id: u32) -> Self {
        self.agent_platform_links.push(AgentPlatformLink {
            agent_id,
            platform_id,
        });
        self
    }
}

impl DatasetProvider for MemoryDataset {
    fn load_agent_rules(&self) -> DatasetResult<Vec<RuleRow>> {
        Ok(self.agent_rules.clone())
    }

    fn load_platform_rules(&self) -> DatasetResult<Vec<RuleRow>> {
        Ok(self.platform_rules.clone())
    }

    fn load_device_rules(&self) -> DatasetResult<Vec<RuleRow>> {
        Ok(self.device_rules.clone())
    }

    fn load_agent_records(&self) -> DatasetResult<Vec<AgentRow>> {
        Ok(self.agents.clone())
    }

    fn load_platform_records(&self) -> DatasetResult<Vec<PlatformRow>> {
        Ok(self.platforms.clone())
    }

    fn load_device_records(&self) -> DatasetResult<Vec<DeviceRow>> {
        Ok(self.devices.clone())
    }

    fn load_class_names(&self) -> DatasetResult<Vec<ClassRow>> {
        Ok(self.classes.clone())
    }

    fn load_agent_platform_links(&self) -> DatasetResult<Vec<AgentPlatformLink>> {
        Ok(self.agent_platform_links.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_dataset_keeps_rule_order() {
        let dataset = MemoryDataset::new()
            .agent_rule(2, "/opera mini/si")
            .agent_rule(1, "/opera/si");
        let ids: Vec<u32> = dataset.load_agent_rules().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_memory_dataset_from_json() {
        let json = r#"{
            "agent_rules": [{"id": 1, "pattern": "/chrome\\/([\\d.]+)/si"}],
            "agents": [{
                "id": 1, "family": "Chrome", "engine": "WebKit/Blink",
                "class_id": 1, "vendor": "Google Inc.", "icon": "chrome.png"
            }],
            "classes": [{"id": 1, "name": "Browser"}],
            "agent_platform_links": [{"agent_id": 1, "platform_id": 2}]
        }"#;
        let dataset: MemoryDataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.agent_rules[0].pattern, "/chrome\\/([\\d.]+)/si");
        assert_eq!(dataset.agents[0].record.engine, "WebKit/Blink");
        assert_eq!(dataset.agent_platform_links[0].platform_id, 2);
        assert!(dataset.device_rules.is_empty());
    }
}
