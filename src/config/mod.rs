//! 配置模块
pub mod dataset;

pub use self::dataset::{CustomConfigBuilder, DatasetConfig, DatasetOrigin, DEFAULT_DATASET_PATH};
