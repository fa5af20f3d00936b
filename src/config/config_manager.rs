// ==========================================
// 送餐服务核心 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、写入
// 存储: config_kv 表 (key-value + scope,当前仅 global)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::route::Waypoint;
use rusqlite::{params, Connection};
use std::error::Error;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// 配送起点默认纬度
pub const DEFAULT_DEPOT_LATITUDE: f64 = 45.516564;

/// 配送起点默认经度
pub const DEFAULT_DEPOT_LONGITUDE: f64 = -73.575145;

/// 路线求解默认途经点上限
pub const DEFAULT_ROUTE_SOLVER_MAX_STOPS: usize = 200;

/// 默认排序模式
pub const DEFAULT_SEQUENCING_MODE: &str = "euclidean";

/// 默认界面语言
pub const DEFAULT_UI_LOCALE: &str = "en";

// ==========================================
// RouteSolverConfig - 路线求解参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSolverConfig {
    pub depot: Waypoint,  // 配送起点 (id 为 None)
    pub max_stops: usize, // 单次求解的途经点上限
}

impl Default for RouteSolverConfig {
    fn default() -> Self {
        Self {
            depot: Waypoint::depot(DEFAULT_DEPOT_LATITUDE, DEFAULT_DEPOT_LONGITUDE),
            max_stops: DEFAULT_ROUTE_SOLVER_MAX_STOPS,
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 的配置值 (存在则覆盖)
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        tracing::info!(config_key = key, value = value, "配置已更新");
        Ok(())
    }

    /// 读取并解析配置; 缺失或格式错误时使用默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> Result<T, Box<dyn Error>>
    where
        T: FromStr + Copy,
    {
        let Some(raw) = self.get_config_value(key)? else {
            return Ok(default);
        };
        match raw.trim().parse::<T>() {
            Ok(v) => Ok(v),
            Err(_) => {
                tracing::warn!(config_key = key, raw_value = %raw, "配置格式错误，使用默认值");
                Ok(default)
            }
        }
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_config_value(key)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string()))
    }

    // ===== 路线求解配置 =====

    /// 配送起点
    ///
    /// 坐标非有限值时回退到默认起点
    pub fn get_depot(&self) -> Result<Waypoint, Box<dyn Error>> {
        let latitude = self.get_parsed_or_default(config_keys::DEPOT_LATITUDE, DEFAULT_DEPOT_LATITUDE)?;
        let longitude =
            self.get_parsed_or_default(config_keys::DEPOT_LONGITUDE, DEFAULT_DEPOT_LONGITUDE)?;

        let depot = Waypoint::depot(latitude, longitude);
        if depot.has_finite_coordinates() {
            Ok(depot)
        } else {
            tracing::warn!(latitude, longitude, "配送起点坐标无效，使用默认起点");
            Ok(Waypoint::depot(DEFAULT_DEPOT_LATITUDE, DEFAULT_DEPOT_LONGITUDE))
        }
    }

    /// 单次求解的途经点上限
    pub fn get_route_solver_max_stops(&self) -> Result<usize, Box<dyn Error>> {
        self.get_parsed_or_default(
            config_keys::ROUTE_SOLVER_MAX_STOPS,
            DEFAULT_ROUTE_SOLVER_MAX_STOPS,
        )
    }

    /// 路线求解参数
    pub fn get_route_solver_config(&self) -> Result<RouteSolverConfig, Box<dyn Error>> {
        Ok(RouteSolverConfig {
            depot: self.get_depot()?,
            max_stops: self.get_route_solver_max_stops()?,
        })
    }

    // ===== 界面配置 =====

    /// 默认排序模式 (未经校验的原始字符串)
    pub fn get_default_sequencing_mode(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::DEFAULT_SEQUENCING_MODE, DEFAULT_SEQUENCING_MODE)
    }

    /// 标签与配送单的显示语言
    pub fn get_ui_locale(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::UI_LOCALE, DEFAULT_UI_LOCALE)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 配送起点
    pub const DEPOT_LATITUDE: &str = "depot_latitude";
    pub const DEPOT_LONGITUDE: &str = "depot_longitude";

    // 路线求解
    pub const ROUTE_SOLVER_MAX_STOPS: &str = "route_solver_max_stops";
    pub const DEFAULT_SEQUENCING_MODE: &str = "default_sequencing_mode";

    // 显示语言
    pub const UI_LOCALE: &str = "ui_locale";
}
