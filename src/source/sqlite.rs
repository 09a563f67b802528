//! udger v3 SQLite 数据集
//! 只读打开数据库，按引擎需要的八张表逐一查询；规则表按 sequence 升序返回

use std::path::Path;

use rsudger_engine::{
    AgentPlatformLink, AgentRecord, AgentRow, ClassRow, DatasetError, DatasetProvider,
    DatasetResult, DeviceRecord, DeviceRow, PlatformRecord, PlatformRow, RuleRow,
};
use rusqlite::{Connection, OpenFlags, Row};

use crate::error::{RsuResult, RsudgerError};

const AGENT_RULES_SQL: &str =
    "SELECT client_id, regstring FROM udger_client_regex ORDER BY sequence ASC";
const PLATFORM_RULES_SQL: &str =
    "SELECT os_id, regstring FROM udger_os_regex ORDER BY sequence ASC";
const DEVICE_RULES_SQL: &str =
    "SELECT deviceclass_id, regstring FROM udger_deviceclass_regex ORDER BY sequence ASC";
const AGENTS_SQL: &str = "SELECT id, class_id, name, engine, vendor, icon FROM udger_client_list";
const PLATFORMS_SQL: &str = "SELECT id, name, family, vendor, icon FROM udger_os_list";
const DEVICES_SQL: &str = "SELECT id, name, icon FROM udger_deviceclass_list";
const CLASSES_SQL: &str = "SELECT id, client_classification FROM udger_client_class";
const LINKS_SQL: &str = "SELECT client_id, os_id FROM udger_client_os_relation";

/// udger v3 SQLite 数据集
#[derive(Debug)]
pub struct SqliteDataset {
    conn: Connection,
}

impl SqliteDataset {
    /// 只读打开数据库文件，文件不存在时返回 DatasetNotFound
    pub fn open(path: impl AsRef<Path>) -> RsuResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(RsudgerError::DatasetNotFound(path.to_path_buf()));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        log::debug!("SQLite dataset opened: {}", path.display());
        Ok(Self { conn })
    }

    /// 使用已有连接（例如内存数据库）
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    fn query<T, F>(&self, table: &'static str, sql: &str, map: F) -> DatasetResult<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        self.collect_rows(sql, map)
            .map_err(|e| DatasetError::unavailable(table, e))
    }

    fn collect_rows<T, F>(&self, sql: &str, map: F) -> rusqlite::Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], map)?.collect::<rusqlite::Result<Vec<T>>>();
        rows
    }
}

// udger 的文本列允许 NULL，统一按空串处理
fn text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
}

fn rule_row(row: &Row<'_>) -> rusqlite::Result<RuleRow> {
    Ok(RuleRow::new(row.get(0)?, text(row, 1)?))
}

impl DatasetProvider for SqliteDataset {
    fn load_agent_rules(&self) -> DatasetResult<Vec<RuleRow>> {
        self.query("udger_client_regex", AGENT_RULES_SQL, rule_row)
    }

    fn load_platform_rules(&self) -> DatasetResult<Vec<RuleRow>> {
        self.query("udger_os_regex", PLATFORM_RULES_SQL, rule_row)
    }

    fn load_device_rules(&self) -> DatasetResult<Vec<RuleRow>> {
        self.query("udger_deviceclass_regex", DEVICE_RULES_SQL, rule_row)
    }

    fn load_agent_records(&self) -> DatasetResult<Vec<AgentRow>> {
        self.query("udger_client_list", AGENTS_SQL, |row| {
            Ok(AgentRow {
                id: row.get(0)?,
                record: AgentRecord {
                    class_id: row.get(1)?,
                    family: text(row, 2)?,
                    engine: text(row, 3)?,
                    vendor: text(row, 4)?,
                    icon: text(row, 5)?,
                },
            })
        })
    }

    fn load_platform_records(&self) -> DatasetResult<Vec<PlatformRow>> {
        self.query("udger_os_list", PLATFORMS_SQL, |row| {
            Ok(PlatformRow {
                id: row.get(0)?,
                record: PlatformRecord {
                    name: text(row, 1)?,
                    family: text(row, 2)?,
                    vendor: text(row, 3)?,
                    icon: text(row, 4)?,
                },
            })
        })
    }

    fn load_device_records(&self) -> DatasetResult<Vec<DeviceRow>> {
        self.query("udger_deviceclass_list", DEVICES_SQL, |row| {
            Ok(DeviceRow {
                id: row.get(0)?,
                record: DeviceRecord::new(text(row, 1)?, text(row, 2)?),
            })
        })
    }

    fn load_class_names(&self) -> DatasetResult<Vec<ClassRow>> {
        self.query("udger_client_class", CLASSES_SQL, |row| {
            Ok(ClassRow {
                id: row.get(0)?,
                name: text(row, 1)?,
            })
        })
    }

    fn load_agent_platform_links(&self) -> DatasetResult<Vec<AgentPlatformLink>> {
        self.query("udger_client_os_relation", LINKS_SQL, |row| {
            Ok(AgentPlatformLink {
                agent_id: row.get(0)?,
                platform_id: row.get(1)?,
            })
        })
    }
}
