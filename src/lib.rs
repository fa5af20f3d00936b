// ==========================================
// 送餐服务核心 - 核心库
// ==========================================
// 职责: 从订单/忌口数据派生厨房计数报表、餐盒标签、
//       路线配送单与配送路线顺序
// 技术栈: Rust + SQLite
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 聚合、报表、路线排序
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 共享状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{MealSize, OrderStatus, SequencingMode};

// 领域实体
pub use domain::{
    ComponentSummaryLine, DeliveryItem, DeliveryManifest, KitchenCountReport, KitchenItem,
    MealComponent, MealLabel, MealLine, RouteSequence, RouteSummaryLine, Waypoint,
};

// 引擎
pub use engine::{
    DeliveryListBuilder, KitchenAggregator, MealLabelBuilder, ReportLineBuilder, RouteSequencer,
};

// API
pub use api::{ApiError, ApiResult, DeliveryApi, KitchenCountApi, RouteApi, RouteSheet};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "送餐服务核心";
