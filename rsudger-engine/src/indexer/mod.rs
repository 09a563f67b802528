pub mod matcher;
mod compiled;
mod rule_set;
mod tables;

// 对外只导出具体内容，不导出模块名
pub use matcher::{strip_decoration, Matcher};
pub use compiled::{PatternRule, ScanHit};
pub use rule_set::RuleSet;
pub use tables::{AgentClass, AgentEntry, ReferenceTables};
