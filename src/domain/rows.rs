// ==========================================
// 送餐服务核心 - 订单数据源行结构
// ==========================================
// 职责: 描述订单/菜单存储层按配送日期返回的已连接行
// 红线: 行结构只承载数据,不做分类判断以外的逻辑
// ==========================================

use crate::domain::types::MealSize;
use serde::{Deserialize, Serialize};

// ==========================================
// ClientName - 行中携带的客户标识
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientName {
    pub client_id: i64,
    pub firstname: String,
    pub lastname: String,
}

impl ClientName {
    pub fn new(client_id: i64, firstname: &str, lastname: &str) -> Self {
        Self {
            client_id,
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
        }
    }
}

// ==========================================
// ClashRefs - 冲突判定依据
// ==========================================
// 外连接结果: 订单项引用 + 当日菜单菜品引用
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClashRefs {
    pub order_item_order_id: Option<i64>, // 同组订单项所属订单
    pub menu_component_id: Option<i64>,   // 当日菜单中的菜品
}

impl ClashRefs {
    /// 两个引用都存在的冲突依据
    pub fn clashing(order_id: i64, menu_component_id: i64) -> Self {
        Self {
            order_item_order_id: Some(order_id),
            menu_component_id: Some(menu_component_id),
        }
    }

    /// 判定本行是否构成当日冲突
    pub fn is_clash(&self) -> bool {
        is_clash(self.order_item_order_id, self.menu_component_id)
    }
}

/// 冲突判定
///
/// 行同时携带订单项引用与当日菜单菜品引用时,
/// 该食材/菜品确实出现在客户当日的餐中。
pub fn is_clash(order_item_ref: Option<i64>, menu_component_ref: Option<i64>) -> bool {
    order_item_ref.is_some() && menu_component_ref.is_some()
}

/// 客户忌口食材行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvoidIngredientRow {
    pub client: ClientName,
    pub ingredient: String,
    pub refs: ClashRefs,
}

/// 客户忌口菜品行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvoidComponentRow {
    pub client: ClientName,
    pub component: String,
    pub refs: ClashRefs,
}

/// 饮食限制行
///
/// 限制类别可能没有关联任何不兼容食材,此时 `ingredient` 为 None
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictionRow {
    pub client: ClientName,
    pub restricted_item: String,
    pub ingredient: Option<String>,
    pub refs: ClashRefs,
}

/// 备餐要求行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparationRow {
    pub client: ClientName,
    pub food_prep: String,
}

/// 当日配送菜品行 (订单项 × 当日菜单)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryItemRow {
    pub client: ClientName,
    pub route_name: Option<String>,
    pub component_id: i64,
    pub component_group: String,
    pub component_name: String,
    pub total_quantity: i64,
    pub size: Option<MealSize>,
}

// ==========================================
// 路线配送单行
// ==========================================

/// 配送地址
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub number: Option<String>,
    pub street: Option<String>,
    pub apartment: Option<String>,
    pub floor: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
}

/// 路线订单项行 (某路线某日可配送订单的全部订单项)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOrderItemRow {
    pub client: ClientName,
    pub address: DeliveryAddress,
    pub phone: Option<String>,
    pub delivery_note: Option<String>,
    pub component_group: Option<String>,
    pub total_quantity: Option<i64>,
    pub item_type: String,
    pub remark: String,
    pub size: Option<MealSize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clash_requires_both_refs() {
        assert!(is_clash(Some(1), Some(2)));
        assert!(!is_clash(Some(1), None));
        assert!(!is_clash(None, Some(2)));
        assert!(!is_clash(None, None));
    }

    #[test]
    fn test_clash_refs_helpers() {
        assert!(ClashRefs::clashing(10, 20).is_clash());
        assert!(!ClashRefs::default().is_clash());
        let half = ClashRefs {
            order_item_order_id: None,
            menu_component_id: Some(3),
        };
        assert!(!half.is_clash());
    }
}
