// ==========================================
// 送餐服务核心 - 领域模型层
// ==========================================
// 职责: 定义领域实体、报表行、数据源行结构
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod delivery;
pub mod kitchen;
pub mod label;
pub mod report;
pub mod route;
pub mod rows;
pub mod types;

// 重导出核心类型
pub use delivery::{DeliveryItem, DeliveryManifest, RouteSummaryLine};
pub use kitchen::{KitchenItem, MealComponent};
pub use label::MealLabel;
pub use report::{
    ComponentSummaryLine, KitchenCountReport, MealLine, MealLineKind, RowSpan, SUBTOTAL_LABEL,
    TOTAL_SPECIALS_LABEL,
};
pub use route::{RouteSequence, Waypoint};
pub use rows::{
    AvoidComponentRow, AvoidIngredientRow, ClashRefs, ClientName, DeliveryAddress,
    DeliveryItemRow, PreparationRow, RestrictionRow, RouteOrderItemRow,
};
pub use types::{MealSize, OrderStatus, SequencingMode};
