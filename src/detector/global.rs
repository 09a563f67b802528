//! 全局检测器单例管理
//! 核心职责：
//! 1. 维护进程生命周期内唯一的UaDetector实例
//! 2. 支持按配置初始化和手动注入数据集
//! 3. 提供无需传递实例的识别接口

use once_cell::sync::OnceCell;
use rsudger_engine::{ClassificationResult, DatasetProvider, EngineOptions};

use super::detector::UaDetector;
use crate::config::DatasetConfig;
use crate::error::{RsuResult, RsudgerError};

/// 全局检测器实例 - 线程安全单例，仅初始化一次
static GLOBAL_DETECTOR: OnceCell<UaDetector> = OnceCell::new();

/// 按配置初始化全局检测器
/// 幂等：已初始化则直接返回Ok(())，并发初始化只有一个会真正构建
pub fn init_global_detector(config: DatasetConfig) -> RsuResult<()> {
    init_with(|| UaDetector::new(config))
}

/// 手动注入数据集，初始化全局检测器
pub fn init_global_detector_with_provider<P: DatasetProvider + ?Sized>(
    provider: &P,
    options: &EngineOptions,
) -> RsuResult<()> {
    init_with(|| UaDetector::with_provider(provider, options))
}

fn init_with<F>(create: F) -> RsuResult<()>
where
    F: FnOnce() -> RsuResult<UaDetector>,
{
    if GLOBAL_DETECTOR.get().is_some() {
        log::debug!("Global detector already initialized, skip reinitialization");
        return Ok(());
    }

    GLOBAL_DETECTOR
        .get_or_try_init(create)
        .map_err(|e| {
            RsudgerError::DetectorInitError(format!("Failed to create UaDetector instance: {}", e))
        })?;

    log::info!("Global UaDetector initialized successfully");
    Ok(())
}

/// 获取全局检测器实例（无自动初始化）
pub fn get_global_detector() -> RsuResult<&'static UaDetector> {
    GLOBAL_DETECTOR.get().ok_or_else(|| {
        RsudgerError::DetectorNotInitialized(
            "Global UaDetector not initialized! Please call init_global_detector first".to_string(),
        )
    })
}

/// 使用全局检测器识别签名串
pub fn detect(signature: &str) -> RsuResult<ClassificationResult> {
    get_global_detector()?.detect(signature)
}
