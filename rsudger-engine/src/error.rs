//! rsudger-engine 内核错误定义
//! 构建期错误（DatasetError）与查询期错误（MatchingFault / LookupError）严格分离，基于thiserror实现
use thiserror::Error;

use crate::core::Category;

/// 数据源层的底层错误（类型擦除，由各 DatasetProvider 实现自行封装）
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// 数据集错误：只在构建引擎时出现，致命，不在内核内部恢复
#[derive(Error, Debug)]
pub enum DatasetError {
    /// 数据源读取某张表失败（文件缺失/查询失败/格式错误）
    #[error("Dataset table `{table}` is unavailable: {source}")]
    Unavailable {
        table: &'static str,
        #[source]
        source: BoxError,
    },

    /// 规则正则编译失败，整个构建失败，不允许静默跳过
    #[error("Invalid {category} pattern for id {category_id}: {raw:?} ({source})")]
    InvalidPattern {
        category: Category,
        category_id: u32,
        raw: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    /// 规则引用了不存在的记录行
    #[error("{category} rule references missing record id {category_id}")]
    MissingRecord { category: Category, category_id: u32 },

    /// agent→platform 关联指向了不存在的平台记录
    #[error("Agent {agent_id} is linked to missing platform {platform_id}")]
    DanglingLink { agent_id: u32, platform_id: u32 },
}

impl DatasetError {
    /// 包装数据源错误
    pub fn unavailable(table: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Unavailable {
            table,
            source: source.into(),
        }
    }
}

/// 匹配期运行时故障（回溯超限等），仅在 agent 版本扫描中被恢复一次
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Matching fault in {category} rule {category_id} (order {order}): {reason}")]
pub struct MatchingFault {
    pub category: Category,
    pub category_id: u32,
    pub order: u32,
    pub reason: String,
}

/// 查询错误：单个分类无匹配不是错误，只有完全无法求值才是
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// 版本扫描故障后，唯一一次无版本重试也故障
    #[error("Agent scan failed after one retry: first {first}; retry {retry}")]
    RetryExhausted {
        first: MatchingFault,
        retry: MatchingFault,
    },

    /// platform/device 扫描故障（无重试路径）
    #[error(transparent)]
    Fault(#[from] MatchingFault),
}

/// 构建期 Result 别名
pub type DatasetResult<T> = Result<T, DatasetError>;

/// 查询期 Result 别名
pub type LookupResult<T> = Result<T, LookupError>;
