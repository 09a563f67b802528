use crate::core::{Category, RuleRow};
use crate::error::{DatasetResult, MatchingFault};
use crate::indexer::compiled::{PatternRule, ScanHit};

/// 单一分类的有序规则集（构建后不可变）
#[derive(Debug, Clone)]
pub struct RuleSet {
    category: Category,
    rules: Vec<PatternRule>,
}

impl RuleSet {
    /// 按数据源顺序编译规则，任一正则非法即整体失败
    /// order 取行在数据源中的位置，稳定排序保证同序规则保留插入顺序
    pub fn build(
        category: Category,
        rows: &[RuleRow],
        backtrack_limit: usize,
    ) -> DatasetResult<Self> {
        let mut rules = rows
            .iter()
            .enumerate()
            .map(|(position, row)| {
                PatternRule::compile(category, row, position as u32, backtrack_limit)
            })
            .collect::<DatasetResult<Vec<_>>>()?;
        rules.sort_by_key(|rule| rule.order);

        log::debug!("{} rule set compiled: {} rules", category, rules.len());
        Ok(Self { category, rules })
    }

    /// 由已编译规则构建（按 order 重新排序）
    pub fn from_rules(category: Category, mut rules: Vec<PatternRule>) -> Self {
        rules.sort_by_key(|rule| rule.order);
        Self { category, rules }
    }

    /// 有序扫描，首个命中即返回，后续规则即使也能匹配也不再评估
    /// 全部未命中返回 Ok(None)，属于正常结果
    pub fn scan(
        &self,
        signature: &str,
        want_version: bool,
    ) -> Result<Option<ScanHit>, MatchingFault> {
        for rule in &self.rules {
            if let Some(hit) = rule.evaluate(self.category, signature, want_version)? {
                log::trace!(
                    "{} rule hit | id: {} | order: {} | pattern: {}",
                    self.category,
                    hit.category_id,
                    rule.order,
                    rule.describe()
                );
                return Ok(Some(hit));
            }
        }
        Ok(None)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatternRule> {
        self.rules.iter()
    }
}
