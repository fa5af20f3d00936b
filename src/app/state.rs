// ==========================================
// 送餐服务核心 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享连接和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{DeliveryApi, KitchenCountApi, RouteApi};
use crate::config::config_manager::ConfigManager;
use crate::repository::{OrderDataSource, RouteSequenceRepository, SqliteOrderSource};

/// 应用状态
///
/// 所有仓储共享同一个数据库连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 厨房计数API
    pub kitchen_api: Arc<KitchenCountApi>,

    /// 路线配送单API
    pub delivery_api: Arc<DeliveryApi>,

    /// 路线排序API
    pub route_api: Arc<RouteApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开共享连接并建表（幂等）
    /// 2. 读取配置（标签语言、路线求解参数）
    /// 3. 创建所有API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = crate::db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        crate::db::init_schema(&conn).map_err(|e| format!("数据库建表失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let order_source: Arc<dyn OrderDataSource> =
            Arc::new(SqliteOrderSource::from_connection(conn.clone()));
        let sequence_repo = Arc::new(RouteSequenceRepository::from_connection(conn.clone()));

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let label_locale = config_manager
            .get_ui_locale()
            .map_err(|e| format!("读取显示语言失败: {}", e))?;
        let solver_config = config_manager
            .get_route_solver_config()
            .map_err(|e| format!("读取路线求解配置失败: {}", e))?;

        // ==========================================
        // 初始化API层
        // ==========================================
        let kitchen_api = Arc::new(KitchenCountApi::new(order_source.clone(), &label_locale));
        let delivery_api = Arc::new(DeliveryApi::new(order_source.clone(), sequence_repo.clone()));
        let route_api = Arc::new(RouteApi::new(order_source, sequence_repo, solver_config));

        tracing::info!(
            label_locale = %label_locale,
            max_stops = solver_config.max_stops,
            "AppState初始化完成"
        );

        Ok(Self {
            db_path,
            kitchen_api,
            delivery_api,
            route_api,
            config_manager,
        })
    }
}

/// 默认数据库路径
///
/// 优先使用环境变量 MEAL_DELIVERY_DB_PATH,否则位于用户数据目录
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var("MEAL_DELIVERY_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    match dirs::data_dir() {
        Some(data_dir) => {
            let dir = data_dir.join("meal-delivery");
            // best-effort: 目录创建失败时由打开数据库报错
            std::fs::create_dir_all(&dir).ok();
            dir.join("meal_delivery.db").to_string_lossy().to_string()
        }
        None => "./meal_delivery.db".to_string(),
    }
}
