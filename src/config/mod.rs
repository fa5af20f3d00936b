// ==========================================
// 送餐服务核心 - 配置层
// ==========================================
// 职责: 系统配置管理 (配送起点、求解上限、显示语言)
// 存储: config_kv 表
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager, RouteSolverConfig};
