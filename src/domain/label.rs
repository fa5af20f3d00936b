// ==========================================
// 送餐服务核心 - 餐盒标签领域模型
// ==========================================
// 每份主菜一张标签; 排版与打印不在本库
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// MealLabel - 餐盒标签内容
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealLabel {
    pub route: String,                   // 路线名 (大写)
    pub name: String,                    // 客户标签
    pub size: String,                    // 仅大份显示
    pub main_dish_name: String,          // 冲突时替换为手写占位线
    pub dish_clashes: Option<String>,    // 冲突食材
    pub ingredients: Option<String>,     // 无冲突时显示当日食材
    pub preparations: Option<String>,    // 备餐要求
    pub other_restrictions: Option<String>,
}

impl MealLabel {
    /// 排序键: 路线 + 客户标签
    pub fn sort_key(&self) -> (&str, &str) {
        (self.route.as_str(), self.name.as_str())
    }
}
