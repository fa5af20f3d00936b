// ==========================================
// 送餐服务核心 - API 层
// ==========================================
// 职责: 组合仓储与引擎,向展示层/命令行提供业务接口
// ==========================================

pub mod delivery_api;
pub mod error;
pub mod kitchen_api;
pub mod route_api;

// 重导出核心类型
pub use delivery_api::{DeliveryApi, RouteSheet};
pub use error::{ApiError, ApiResult};
pub use kitchen_api::KitchenCountApi;
pub use route_api::RouteApi;
