//! rsudger - udger 兼容的 User-Agent 签名串识别库

pub mod config;
pub mod detector;
pub mod error;
pub mod source;

// 导出全局错误类型
pub use self::error::{RsuResult, RsudgerError};

// 导出配置模块核心结构体与构建器
pub use crate::config::{CustomConfigBuilder, DatasetConfig, DatasetOrigin};

// 导出数据集来源
pub use crate::source::JsonDataset;
#[cfg(feature = "sqlite")]
pub use crate::source::SqliteDataset;

// 导出检测模块核心接口
pub use crate::detector::{
    detect, get_global_detector, init_global_detector, init_global_detector_with_provider,
    UaDetector,
};

// 引擎常用类型直接透出，调用方无需单独依赖 rsudger-engine
pub use rsudger_engine::{
    AgentView, ClassificationEngine, ClassificationResult, DatasetProvider, DeviceOrigin,
    DeviceTier, DeviceView, EngineOptions, FallbackPolicy, MemoryDataset, PlatformOrigin,
    PlatformView,
};
