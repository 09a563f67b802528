//! 检测模块：识别引擎外层封装
pub mod detector;
pub mod global;

// 导出核心接口
pub use self::detector::UaDetector;
pub use self::global::{
    detect, get_global_detector, init_global_detector, init_global_detector_with_provider,
};
