use std::sync::Arc;

use crate::core::{Category, RuleRow};
use crate::error::{DatasetError, DatasetResult, MatchingFault};
use crate::indexer::matcher::{strip_decoration, Matcher};

/// 单条规则的命中结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanHit {
    pub category_id: u32,
    pub version: Option<String>,
}

/// 编译后的模式规则（扫描执行单元）
/// 评估顺序显式存储，不依赖容器迭代顺序
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// 目标分类记录 id
    pub category_id: u32,
    /// 评估顺序（升序评估，首个命中即停止）
    pub order: u32,
    /// 数据源原始正则文本（含装饰）
    pub raw: Arc<str>,
    matcher: Matcher,
}

impl PatternRule {
    /// 清理装饰并编译
    pub fn compile(
        category: Category,
        row: &RuleRow,
        order: u32,
        backtrack_limit: usize,
    ) -> DatasetResult<Self> {
        let cleaned = strip_decoration(&row.pattern);
        let matcher = Matcher::compile(cleaned, backtrack_limit).map_err(|e| {
            DatasetError::InvalidPattern {
                category,
                category_id: row.id,
                raw: row.pattern.clone(),
                source: Box::new(e),
            }
        })?;

        Ok(Self {
            category_id: row.id,
            order,
            raw: Arc::from(row.pattern.as_str()),
            matcher,
        })
    }

    /// 对完整签名串求值
    /// want_version 为 true 且存在捕获组时，取第一个捕获组作为版本
    pub fn evaluate(
        &self,
        category: Category,
        signature: &str,
        want_version: bool,
    ) -> Result<Option<ScanHit>, MatchingFault> {
        let outcome = if want_version && self.matcher.has_groups() {
            self.matcher
                .capture_first(signature)
                .map(|hit| hit.map(|version| self.hit(version)))
        } else {
            self.matcher
                .matches(signature)
                .map(|matched| matched.then(|| self.hit(None)))
        };

        outcome.map_err(|e| MatchingFault {
            category,
            category_id: self.category_id,
            order: self.order,
            reason: e.to_string(),
        })
    }

    #[inline(always)]
    fn hit(&self, version: Option<String>) -> ScanHit {
        ScanHit {
            category_id: self.category_id,
            version,
        }
    }

    /// 清理后的正则（用于日志）
    pub fn describe(&self) -> &str {
        self.matcher.describe()
    }
}
