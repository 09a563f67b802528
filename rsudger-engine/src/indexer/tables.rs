use rustc_hash::FxHashMap;

use crate::core::{
    AgentPlatformLink, AgentRecord, AgentRow, ClassRow, DeviceRecord, DeviceRow, DeviceTier,
    PlatformRecord, PlatformRow,
};
use crate::error::{DatasetError, DatasetResult};
use crate::options::FallbackPolicy;

/// 索引后的 agent 条目：记录 + 加载期解析好的 class 标签与兜底层级
#[derive(Debug, Clone, PartialEq)]
pub struct AgentEntry {
    pub record: AgentRecord,
    pub class_name: Option<String>,
    pub tier: DeviceTier,
}

/// agent class 条目
#[derive(Debug, Clone, PartialEq)]
pub struct AgentClass {
    pub name: String,
    pub tier: DeviceTier,
}

/// 参考表 - 纯静态结构，构建后只读
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    agents: FxHashMap<u32, AgentEntry>,
    platforms: FxHashMap<u32, PlatformRecord>,
    devices: FxHashMap<u32, DeviceRecord>,
    classes: FxHashMap<u32, AgentClass>,
    agent_platform: FxHashMap<u32, u32>,
}

impl ReferenceTables {
    /// 建立所有 id 索引
    /// class 层级在此一次性推导；关联指向缺失平台视为数据集错误
    pub fn build(
        agents: Vec<AgentRow>,
        platforms: Vec<PlatformRow>,
        devices: Vec<DeviceRow>,
        classes: Vec<ClassRow>,
        links: Vec<AgentPlatformLink>,
        policy: &FallbackPolicy,
    ) -> DatasetResult<Self> {
        let classes: FxHashMap<u32, AgentClass> = classes
            .into_iter()
            .map(|row| {
                let tier = policy.tier_of(row.id);
                (row.id, AgentClass { name: row.name, tier })
            })
            .collect();

        let agents = agents
            .into_iter()
            .map(|row| {
                let class = classes.get(&row.record.class_id);
                let entry = AgentEntry {
                    class_name: class.map(|c| c.name.clone()),
                    // class 表缺行时仍按策略表推导
                    tier: class.map_or_else(|| policy.tier_of(row.record.class_id), |c| c.tier),
                    record: row.record,
                };
                (row.id, entry)
            })
            .collect();

        let platforms: FxHashMap<u32, PlatformRecord> =
            platforms.into_iter().map(|row| (row.id, row.record)).collect();
        let devices = devices.into_iter().map(|row| (row.id, row.record)).collect();

        let mut agent_platform = FxHashMap::default();
        for link in links {
            if !platforms.contains_key(&link.platform_id) {
                return Err(DatasetError::DanglingLink {
                    agent_id: link.agent_id,
                    platform_id: link.platform_id,
                });
            }
            agent_platform.insert(link.agent_id, link.platform_id);
        }

        Ok(Self {
            agents,
            platforms,
            devices,
            classes,
            agent_platform,
        })
    }

    #[inline(always)]
    pub fn agent(&self, id: u32) -> Option<&AgentEntry> {
        self.agents.get(&id)
    }

    #[inline(always)]
    pub fn platform(&self, id: u32) -> Option<&PlatformRecord> {
        self.platforms.get(&id)
    }

    #[inline(always)]
    pub fn device(&self, id: u32) -> Option<&DeviceRecord> {
        self.devices.get(&id)
    }

    pub fn class(&self, id: u32) -> Option<&AgentClass> {
        self.classes.get(&id)
    }

    /// agent 显式关联的平台 id
    #[inline(always)]
    pub fn linked_platform(&self, agent_id: u32) -> Option<u32> {
        self.agent_platform.get(&agent_id).copied()
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn platform_count(&self) -> usize {
        self.platforms.len()
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn link_count(&self) -> usize {
        self.agent_platform.len()
    }
}
