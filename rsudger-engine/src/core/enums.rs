use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// 分类维度枚举，三个相互独立的识别轴
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Agent,
    Platform,
    Device,
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Agent => write!(f, "agent"),
            Category::Platform => write!(f, "platform"),
            Category::Device => write!(f, "device"),
        }
    }
}

/// 设备兜底层级，加载期由 agent class 推导（封闭枚举）
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeviceTier {
    /// 移动浏览器 → Smartphone
    Mobile,
    /// 非实体设备 agent（爬虫、库、服务等）→ Other
    NonPhysical,
    /// 普通桌面浏览器及未知 → Personal computer
    #[default]
    PersonalComputer,
}

/// 平台结果来源
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformOrigin {
    /// agent→platform 显式关联
    Link,
    /// 平台规则扫描命中
    Rule,
}

/// 设备结果来源
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceOrigin {
    /// 设备规则命中（记录 id）
    Rule(u32),
    /// 无设备规则命中，按层级合成
    Fallback(DeviceTier),
}
