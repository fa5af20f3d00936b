// ==========================================
// 送餐服务核心 - 厨房计数报表行
// ==========================================
// 职责: 可直接交给展示层渲染的报表行 (HTML/PDF 渲染不在本库)
// ==========================================

use crate::domain::label::MealLabel;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 小计行标签
pub const SUBTOTAL_LABEL: &str = "SUBTOTAL";

/// 特殊餐总计行标签
pub const TOTAL_SPECIALS_LABEL: &str = "TOTAL SPECIALS";

// ==========================================
// ComponentSummaryLine - 菜品汇总行
// ==========================================
// 排序: 主菜行在首,其余按组名字母序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSummaryLine {
    pub component_group: String,
    pub regular_qty: i64,
    pub large_qty: i64,
    pub name: String,
    pub ingredients: String, // 当日食材,逗号连接
}

// ==========================================
// RowSpan - 食材冲突分组的合并行数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowSpan {
    Span(usize), // 分组首行,合并 n 行显示冲突食材
    Hidden,      // 分组后续行,不显示冲突食材
}

impl Default for RowSpan {
    fn default() -> Self {
        RowSpan::Span(1)
    }
}

// ==========================================
// MealLineKind - 特殊餐行类型
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MealLineKind {
    #[default]
    Client,    // 客户行
    Separator, // 空白分隔行
    Subtotal,  // 小计行
    Total,     // 特殊餐总计行
}

// ==========================================
// MealLine - 特殊餐行
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealLine {
    pub kind: MealLineKind,
    pub client_label: String,
    pub regular_qty: String,
    pub large_qty: String,
    pub ingredient_clash: String,  // 冲突食材
    pub other_ingredients: String, // 其余忌口食材
    pub restricted_items: String,  // 限制类别
    pub preparation: String,       // 备餐要求
    pub row_span: RowSpan,
}

impl MealLine {
    /// 空白分隔行
    pub fn separator() -> Self {
        Self {
            kind: MealLineKind::Separator,
            ..Default::default()
        }
    }

    /// 小计行
    pub fn subtotal(regular: i64, large: i64) -> Self {
        Self {
            kind: MealLineKind::Subtotal,
            client_label: SUBTOTAL_LABEL.to_string(),
            regular_qty: regular.to_string(),
            large_qty: large.to_string(),
            ..Default::default()
        }
    }

    /// 特殊餐总计行
    pub fn total_specials(regular: i64, large: i64) -> Self {
        Self {
            kind: MealLineKind::Total,
            client_label: TOTAL_SPECIALS_LABEL.to_string(),
            regular_qty: regular.to_string(),
            large_qty: large.to_string(),
            ..Default::default()
        }
    }
}

// ==========================================
// KitchenCountReport - 厨房计数报表
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenCountReport {
    pub delivery_date: NaiveDate,
    pub summary_lines: Vec<ComponentSummaryLine>,
    pub meal_lines: Vec<MealLine>,
    pub labels: Vec<MealLabel>,
}
