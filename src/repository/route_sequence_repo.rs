// ==========================================
// 送餐服务核心 - 路线顺序仓储
// ==========================================
// 存储: route.client_id_sequence (JSON: {"<date>": [client_id, ...]})
// 红线: 每条路线只保留一份顺序,保存即覆盖 (后写者胜,无锁无历史)
// ==========================================
// 风险: 两个调度员同日保存同一路线时,先保存者的顺序会被静默覆盖
// ==========================================

use crate::domain::route::RouteSequence;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

const SEQUENCE_DATE_FORMAT: &str = "%Y-%m-%d";

// ==========================================
// RouteSequenceRepository - 路线顺序仓储
// ==========================================
pub struct RouteSequenceRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RouteSequenceRepository {
    /// 创建新的 RouteSequenceRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 保存路线客户顺序 (覆盖已有值)
    ///
    /// # 参数
    /// - `route_id`: 路线ID
    /// - `date`: 保存日期
    /// - `client_ids`: 客户访问顺序
    ///
    /// # 返回
    /// - Ok(()): 保存成功
    /// - Err(NotFound): 路线不存在
    pub fn set_sequence(
        &self,
        route_id: i64,
        date: NaiveDate,
        client_ids: &[i64],
    ) -> RepositoryResult<()> {
        let mut stored: BTreeMap<String, Vec<i64>> = BTreeMap::new();
        stored.insert(
            date.format(SEQUENCE_DATE_FORMAT).to_string(),
            client_ids.to_vec(),
        );
        let raw = serde_json::to_string(&stored)?;

        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE route SET client_id_sequence = ?1 WHERE id = ?2",
            params![raw, route_id],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "route".to_string(),
                id: route_id.to_string(),
            });
        }

        info!(
            route_id = route_id,
            date = %date,
            clients = client_ids.len(),
            "保存路线客户顺序"
        );
        Ok(())
    }

    /// 读取路线客户顺序
    ///
    /// # 返回
    /// - Ok(Some(RouteSequence)): 已保存的唯一一份顺序
    /// - Ok(None): 路线不存在或尚未保存
    /// - Err: 数据库错误或存储值无法解析
    pub fn get_sequence(&self, route_id: i64) -> RepositoryResult<Option<RouteSequence>> {
        let conn = self.get_conn()?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT client_id_sequence FROM route WHERE id = ?1",
                params![route_id],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?
            .flatten();

        let raw = match raw {
            Some(v) if !v.trim().is_empty() => v,
            _ => return Ok(None),
        };

        parse_stored_sequence(route_id, &raw)
    }
}

/// 解析存储值 `{"<date>": [ids]}`
///
/// 旧数据可能是空对象或空数组,均视为未保存
fn parse_stored_sequence(route_id: i64, raw: &str) -> RepositoryResult<Option<RouteSequence>> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let map = match value {
        serde_json::Value::Object(map) => map,
        serde_json::Value::Array(ref items) if items.is_empty() => return Ok(None),
        other => {
            return Err(RepositoryError::FieldValueError {
                field: "client_id_sequence".to_string(),
                message: format!("期望 JSON 对象, 实际: {}", other),
            })
        }
    };

    if map.len() > 1 {
        warn!(route_id = route_id, entries = map.len(), "路线顺序存在多条记录,取第一条");
    }

    let Some((date_raw, ids_value)) = map.into_iter().next() else {
        return Ok(None);
    };

    let date = NaiveDate::parse_from_str(&date_raw, SEQUENCE_DATE_FORMAT).map_err(|e| {
        RepositoryError::FieldValueError {
            field: "client_id_sequence.date".to_string(),
            message: format!("{}: {}", date_raw, e),
        }
    })?;
    let client_ids: Vec<i64> = serde_json::from_value(ids_value)?;

    debug!(route_id = route_id, date = %date, clients = client_ids.len(), "读取路线客户顺序");
    Ok(Some(RouteSequence {
        route_id,
        date,
        client_ids,
    }))
}
