// ==========================================
// 送餐服务核心 - 厨房条目领域模型
// ==========================================
// 职责: 某配送日期下,每位客户一条的备餐需求汇总
// 生命周期: 每次请求按当前订单数据重新计算,不落库
// ==========================================

use crate::domain::types::MealSize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// MealComponent - 当日某菜品组的菜品
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealComponent {
    pub id: i64,      // 菜品ID
    pub name: String, // 菜品名称
    pub qty: i64,     // 最近一次看到的订单项总份数
}

// ==========================================
// KitchenItem - 客户厨房条目
// ==========================================
// 不变量: 同一名称不会同时出现在 incompatible_* 与 other_* 中 (冲突优先)
// 不变量: meal_qty / meal_size 只反映主菜组
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitchenItem {
    pub lastname: String,
    pub firstname: String,
    pub route_name: Option<String>,

    // ===== 主菜 =====
    pub meal_qty: i64,
    pub meal_size: Option<MealSize>,

    // ===== 忌口分类 (均已排序) =====
    pub incompatible_ingredients: Vec<String>, // 当日主菜中出现的忌口食材
    pub other_ingredients: Vec<String>,        // 当日未出现的忌口食材
    pub incompatible_components: Vec<String>,  // 当日出现的忌口菜品
    pub other_components: Vec<String>,         // 当日未出现的忌口菜品
    pub restricted_items: Vec<String>,         // 限制类别 (与冲突无关,始终记录)
    pub preparation: Vec<String>,              // 备餐要求

    // ===== 菜品组 -> 菜品 =====
    pub meal_components: BTreeMap<String, MealComponent>,
}

impl KitchenItem {
    /// 以客户姓名创建空条目
    pub fn new(firstname: &str, lastname: &str) -> Self {
        Self {
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
            ..Default::default()
        }
    }

    /// 报表中的客户标签: "姓, 名前两个字符."
    pub fn client_label(&self) -> String {
        let initials: String = self.firstname.chars().take(2).collect();
        format!("{}, {}.", self.lastname, initials)
    }

    /// 按份量计入 (常规, 大份) 累计值
    ///
    /// 未指定份量按大份处理 (此时主菜份数为 0,不影响合计)
    pub fn cumulate(&self, regular: i64, large: i64) -> (i64, i64) {
        match self.meal_size {
            Some(MealSize::Regular) => (regular + self.meal_qty, large),
            _ => (regular, large + self.meal_qty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_label_uses_two_initials() {
        let item = KitchenItem::new("Marie", "Tremblay");
        assert_eq!(item.client_label(), "Tremblay, Ma.");

        let short = KitchenItem::new("E", "Roy");
        assert_eq!(short.client_label(), "Roy, E.");
    }

    #[test]
    fn test_client_label_multibyte_firstname() {
        let item = KitchenItem::new("Élodie", "Gagnon");
        assert_eq!(item.client_label(), "Gagnon, Él.");
    }

    #[test]
    fn test_cumulate_by_size() {
        let mut item = KitchenItem::new("Jean", "Roy");
        item.meal_qty = 2;
        item.meal_size = Some(MealSize::Regular);
        assert_eq!(item.cumulate(1, 1), (3, 1));

        item.meal_size = Some(MealSize::Large);
        assert_eq!(item.cumulate(1, 1), (1, 3));
    }
}
