//! User-agent detector core module
//! 签名串检测器
//! 核心职责：
//! 1. 按配置加载数据集（SQLite / JSON）并构建识别引擎
//! 2. 支持注入自定义数据集提供者或已构建的引擎
//! 3. 提供单次识别接口与加载统计

use std::sync::Arc;
use std::time::Instant;

use rsudger_engine::{ClassificationEngine, ClassificationResult, DatasetProvider, EngineOptions};

use crate::config::{DatasetConfig, DatasetOrigin};
use crate::error::RsuResult;
#[cfg(not(feature = "sqlite"))]
use crate::error::RsudgerError;
use crate::source::JsonDataset;
#[cfg(feature = "sqlite")]
use crate::source::SqliteDataset;

/// 检测器
/// engine 以 Arc 共享，克隆检测器不会复制规则集
#[derive(Debug, Clone)]
pub struct UaDetector {
    engine: Arc<ClassificationEngine>,
}

impl UaDetector {
    /// 按配置创建检测器
    /// 数据集文件缺失时在解析前返回 DatasetNotFound
    pub fn new(config: DatasetConfig) -> RsuResult<Self> {
        config.ensure_exists()?;
        let start = Instant::now();

        let detector = match &config.origin {
            #[cfg(feature = "sqlite")]
            DatasetOrigin::SqliteFile(path) => {
                let dataset = SqliteDataset::open(path)?;
                Self::with_provider(&dataset, &config.engine)?
            }
            #[cfg(not(feature = "sqlite"))]
            DatasetOrigin::SqliteFile(_) => {
                return Err(RsudgerError::FeatureDisabled(
                    "sqlite feature is disabled, cannot open udger SQLite database. Please enable this feature or use a JSON dataset.".to_string(),
                ));
            }
            DatasetOrigin::JsonFile(path) => {
                let dataset = JsonDataset::from_path(path)?;
                Self::with_provider(&dataset, &config.engine)?
            }
        };

        log::info!(
            "UaDetector ready | Source: {} | Time: {}ms",
            config.origin.path().display(),
            start.elapsed().as_millis()
        );
        Ok(detector)
    }

    /// 使用任意数据集提供者创建检测器
    pub fn with_provider<P: DatasetProvider + ?Sized>(
        provider: &P,
        options: &EngineOptions,
    ) -> RsuResult<Self> {
        let engine = ClassificationEngine::build_with_options(provider, options)?;
        Ok(Self::with_engine(engine))
    }

    /// 使用已构建的引擎创建检测器
    pub fn with_engine(engine: ClassificationEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// 识别一个签名串
    pub fn detect(&self, signature: &str) -> RsuResult<ClassificationResult> {
        Ok(self.engine.classify(signature)?)
    }

    pub fn engine(&self) -> &ClassificationEngine {
        &self.engine
    }

    pub fn agent_count(&self) -> usize {
        self.engine.agent_count()
    }

    pub fn platform_count(&self) -> usize {
        self.engine.platform_count()
    }

    pub fn device_count(&self) -> usize {
        self.engine.device_count()
    }
}
