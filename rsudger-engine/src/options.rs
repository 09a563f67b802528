//! 引擎构建选项与设备兜底策略表

use rustc_hash::FxHashSet;

use crate::core::{DeviceRecord, DeviceTier};

/// 默认回溯上限（与 fancy-regex 默认值一致）
pub const DEFAULT_BACKTRACK_LIMIT: usize = 1_000_000;

/// udger v3 数据集约定：移动浏览器 class
pub const UDGER_MOBILE_CLASSES: &[u32] = &[3];
/// udger v3 数据集约定：非实体设备 agent class（库、爬虫、服务等）
pub const UDGER_NON_PHYSICAL_CLASSES: &[u32] = &[5, 10, 20, 50];

/// 设备兜底策略
/// class_id 集合属于数据集版本约定，可整体替换；两集合重叠时 mobile 优先
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackPolicy {
    mobile_classes: FxHashSet<u32>,
    non_physical_classes: FxHashSet<u32>,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self::new(
            UDGER_MOBILE_CLASSES.iter().copied(),
            UDGER_NON_PHYSICAL_CLASSES.iter().copied(),
        )
    }
}

impl FallbackPolicy {
    pub fn new(
        mobile_classes: impl IntoIterator<Item = u32>,
        non_physical_classes: impl IntoIterator<Item = u32>,
    ) -> Self {
        Self {
            mobile_classes: mobile_classes.into_iter().collect(),
            non_physical_classes: non_physical_classes.into_iter().collect(),
        }
    }

    pub fn mobile_classes(&self) -> &FxHashSet<u32> {
        &self.mobile_classes
    }

    pub fn non_physical_classes(&self) -> &FxHashSet<u32> {
        &self.non_physical_classes
    }

    /// class_id → 兜底层级
    pub fn tier_of(&self, class_id: u32) -> DeviceTier {
        if self.mobile_classes.contains(&class_id) {
            DeviceTier::Mobile
        } else if self.non_physical_classes.contains(&class_id) {
            DeviceTier::NonPhysical
        } else {
            DeviceTier::PersonalComputer
        }
    }

    /// 层级 → 合成设备记录
    pub fn device_for(tier: DeviceTier) -> DeviceRecord {
        match tier {
            DeviceTier::Mobile => DeviceRecord::new("Smartphone", "phone.png"),
            DeviceTier::NonPhysical => DeviceRecord::new("Other", "other.png"),
            DeviceTier::PersonalComputer => DeviceRecord::new("Personal computer", "desktop.png"),
        }
    }
}

/// 引擎构建选项
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    /// 单次匹配的回溯步数上限，超限即 MatchingFault
    pub backtrack_limit: usize,
    pub fallback: FallbackPolicy,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            backtrack_limit: DEFAULT_BACKTRACK_LIMIT,
            fallback: FallbackPolicy::default(),
        }
    }
}
