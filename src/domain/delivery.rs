// ==========================================
// 送餐服务核心 - 配送清单领域模型
// ==========================================
// 职责: 路线配送单 (每位客户一份清单 + 路线汇总)
// ==========================================

use crate::domain::rows::DeliveryAddress;
use crate::domain::types::{component_group, MealSize};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ==========================================
// DeliveryItem - 配送项
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryItem {
    pub component_group: Option<String>,
    pub total_quantity: i64,
    pub item_type: String,
    pub remark: String,
    pub size: Option<MealSize>,
}

// ==========================================
// DeliveryManifest - 客户配送清单
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryManifest {
    pub client_id: i64,
    pub firstname: String,
    pub lastname: String,
    pub address: DeliveryAddress,
    pub phone: Option<String>,
    pub delivery_note: Option<String>,
    pub delivery_items: Vec<DeliveryItem>,
}

// ==========================================
// RouteSummaryLine - 路线汇总行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSummaryLine {
    pub component_group: String,
    pub regular_qty: i64,
    pub large_qty: i64,
}

/// 配送单上菜品组的排序键
///
/// 主菜 -> 1; 其余非空组 -> 2 + 组名; 空组 -> 3
pub fn component_group_rank(group: Option<&str>) -> (u8, &str) {
    match group {
        Some(g) if component_group::is_main_dish(g) => (1, ""),
        Some(g) if !g.is_empty() => (2, g),
        _ => (3, ""),
    }
}

/// 按配送单顺序比较两个菜品组
pub fn compare_component_groups(a: Option<&str>, b: Option<&str>) -> Ordering {
    component_group_rank(a).cmp(&component_group_rank(b))
}
