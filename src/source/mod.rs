//! 数据集来源：把外部存储转换成引擎消费的八张表
pub mod json;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use self::json::JsonDataset;
#[cfg(feature = "sqlite")]
pub use self::sqlite::SqliteDataset;
