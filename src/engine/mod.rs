// ==========================================
// 送餐服务核心 - 引擎层
// ==========================================
// 职责: 厨房条目聚合、报表行、配送清单、标签、路线排序
// 红线: Engine 不拼 SQL, 只通过 OrderDataSource 取数
// ==========================================

pub mod delivery_list;
pub mod error;
pub mod kitchen_aggregator;
pub mod meal_labels;
pub mod report_lines;
pub mod route_sequencer;

#[cfg(test)]
pub(crate) mod fixtures;

// 重导出核心引擎
pub use delivery_list::{manifests_from_rows, route_summary_lines, DeliveryListBuilder};
pub use error::{EngineError, EngineResult};
pub use kitchen_aggregator::{KitchenAggregator, KitchenListBuilder};
pub use meal_labels::{MealLabelBuilder, HANDWRITTEN_DISH_PLACEHOLDER};
pub use report_lines::{meal_lines, ReportLineBuilder};
pub use route_sequencer::{reorder_by_sequence, RouteSequencer};
