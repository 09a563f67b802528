// 核心公共结构体+枚举
pub mod core;
// 错误定义
pub mod error;
// 规则编译+有序规则集+参考表索引
pub mod indexer;
// 构建选项+设备兜底策略
pub mod options;
// 数据集提供者抽象
pub mod provider;
// 识别引擎
pub mod engine;
// 工具函数
pub mod utils;

// 顶层导出常用类型
pub use core::{
    AgentPlatformLink, AgentRecord, AgentRow, AgentView, Category, ClassRow, ClassificationResult,
    DeviceOrigin, DeviceRecord, DeviceRow, DeviceTier, DeviceView, PlatformOrigin, PlatformRecord,
    PlatformRow, PlatformView, RuleRow,
};
pub use engine::{AgentResolution, ClassificationEngine};
pub use error::{BoxError, DatasetError, DatasetResult, LookupError, LookupResult, MatchingFault};
pub use indexer::{PatternRule, ReferenceTables, RuleSet, ScanHit};
pub use options::{
    EngineOptions, FallbackPolicy, DEFAULT_BACKTRACK_LIMIT, UDGER_MOBILE_CLASSES,
    UDGER_NON_PHYSICAL_CLASSES,
};
pub use provider::{DatasetProvider, MemoryDataset};
