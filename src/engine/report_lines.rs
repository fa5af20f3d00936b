// ==========================================
// 送餐服务核心 - 厨房计数报表行构建
// ==========================================
// 输入: client_id -> KitchenItem (已排序的列表字段)
// 输出: (菜品汇总行, 特殊餐行)
// ==========================================
// 特殊餐行分段:
// A. 食材冲突: 按冲突组合排序,相同组合连续成组
//    组内首行 row_span = 组大小,其余 Hidden; 组后空行 + 小计
// B. 仅备餐要求: 按 姓+名 排序,每行后空行; 段末小计
// 末尾固定输出 TOTAL SPECIALS (A+B 合计)
// 无冲突且无备餐要求的客户不进入特殊餐行
// ==========================================

use crate::domain::kitchen::KitchenItem;
use crate::domain::report::{ComponentSummaryLine, MealLine, RowSpan};
use crate::domain::types::{component_group, MealSize};
use crate::repository::error::RepositoryResult;
use crate::repository::order_source::OrderDataSource;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

// ==========================================
// ReportLineBuilder - 报表行构建器
// ==========================================
pub struct ReportLineBuilder<'a> {
    source: &'a dyn OrderDataSource,
}

impl<'a> ReportLineBuilder<'a> {
    pub fn new(source: &'a dyn OrderDataSource) -> Self {
        Self { source }
    }

    /// 构建厨房计数报表行
    ///
    /// # 参数
    /// - kitchen_items: 聚合结果
    /// - delivery_date: 配送日期 (用于查询主菜当日食材)
    ///
    /// # 返回
    /// - (summary_lines, meal_lines); 无条目时均为空
    #[instrument(skip(self, kitchen_items), fields(clients = kitchen_items.len()))]
    pub fn build_lines(
        &self,
        kitchen_items: &BTreeMap<i64, KitchenItem>,
        delivery_date: NaiveDate,
    ) -> RepositoryResult<(Vec<ComponentSummaryLine>, Vec<MealLine>)> {
        if kitchen_items.is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }
        let summary = self.summary_lines(kitchen_items, delivery_date)?;
        let lines = meal_lines(kitchen_items);
        debug!(
            summary_lines = summary.len(),
            meal_lines = lines.len(),
            "报表行构建完成"
        );
        Ok((summary, lines))
    }

    /// 菜品汇总行
    ///
    /// 主菜按客户份量分入常规/大份; 其余菜品组一律计入常规
    pub fn summary_lines(
        &self,
        kitchen_items: &BTreeMap<i64, KitchenItem>,
        delivery_date: NaiveDate,
    ) -> RepositoryResult<Vec<ComponentSummaryLine>> {
        let mut by_group: BTreeMap<&str, ComponentSummaryLine> = BTreeMap::new();

        for item in kitchen_items.values() {
            for (group, component) in &item.meal_components {
                let is_main = component_group::is_main_dish(group);
                let line = by_group
                    .entry(group.as_str())
                    .or_insert_with(|| ComponentSummaryLine {
                        component_group: group.clone(),
                        ..Default::default()
                    });

                if is_main && line.name.is_empty() {
                    line.name = component.name.clone();
                    line.ingredients = self
                        .source
                        .day_ingredients(component.id, delivery_date)?
                        .join(", ");
                }

                if is_main && item.meal_size == Some(MealSize::Large) {
                    line.large_qty += component.qty;
                } else {
                    line.regular_qty += component.qty;
                }
            }
        }

        let main = by_group.remove(component_group::MAIN_DISH);
        Ok(main.into_iter().chain(by_group.into_values()).collect())
    }
}

/// 特殊餐行 (分段 A / B + 总计)
pub fn meal_lines(kitchen_items: &BTreeMap<i64, KitchenItem>) -> Vec<MealLine> {
    let mut lines = Vec::new();
    let (clash_regular, clash_large) = ingredient_clash_section(kitchen_items, &mut lines);
    let (prep_regular, prep_large) = preparation_section(kitchen_items, &mut lines);
    lines.push(MealLine::total_specials(
        clash_regular + prep_regular,
        clash_large + prep_large,
    ));
    lines
}

/// 客户行: 份数按份量填入对应列
fn client_line(item: &KitchenItem) -> MealLine {
    let qty = item.meal_qty.to_string();
    let (regular_qty, large_qty) = match item.meal_size {
        Some(MealSize::Regular) => (qty, String::new()),
        Some(MealSize::Large) => (String::new(), qty),
        None => (String::new(), String::new()),
    };
    MealLine {
        client_label: item.client_label(),
        regular_qty,
        large_qty,
        other_ingredients: item.other_ingredients.join(", "),
        restricted_items: item.restricted_items.join(", "),
        preparation: item.preparation.join(", "),
        ..Default::default()
    }
}

/// 分段 A: 食材冲突
///
/// 只按冲突组合排序 (稳定排序,组内保持 client_id 顺序)
fn ingredient_clash_section(
    kitchen_items: &BTreeMap<i64, KitchenItem>,
    lines: &mut Vec<MealLine>,
) -> (i64, i64) {
    let mut clients: Vec<&KitchenItem> = kitchen_items
        .values()
        .filter(|item| !item.incompatible_ingredients.is_empty())
        .collect();
    clients.sort_by(|a, b| a.incompatible_ingredients.cmp(&b.incompatible_ingredients));

    let (mut total_regular, mut total_large) = (0, 0);
    for run in clients.chunk_by(|a, b| a.incompatible_ingredients == b.incompatible_ingredients) {
        let combination = run[0].incompatible_ingredients.join(", ");
        let (mut regular, mut large) = (0, 0);

        for (i, item) in run.iter().enumerate() {
            let mut line = client_line(item);
            line.ingredient_clash = combination.clone();
            line.row_span = if i == 0 {
                RowSpan::Span(run.len())
            } else {
                RowSpan::Hidden
            };
            lines.push(line);
            (regular, large) = item.cumulate(regular, large);
        }

        lines.push(MealLine::separator());
        if regular != 0 || large != 0 {
            let mut subtotal = MealLine::subtotal(regular, large);
            subtotal.ingredient_clash = combination;
            lines.push(subtotal);
        }
        total_regular += regular;
        total_large += large;
    }
    (total_regular, total_large)
}

/// 分段 B: 无食材冲突但有备餐要求
fn preparation_section(
    kitchen_items: &BTreeMap<i64, KitchenItem>,
    lines: &mut Vec<MealLine>,
) -> (i64, i64) {
    let mut clients: Vec<&KitchenItem> = kitchen_items
        .values()
        .filter(|item| item.incompatible_ingredients.is_empty() && !item.preparation.is_empty())
        .collect();
    clients.sort_by(|a, b| (&a.lastname, &a.firstname).cmp(&(&b.lastname, &b.firstname)));

    let (mut regular, mut large) = (0, 0);
    for item in clients {
        lines.push(client_line(item));
        lines.push(MealLine::separator());
        (regular, large) = item.cumulate(regular, large);
    }
    if regular != 0 || large != 0 {
        lines.push(MealLine::subtotal(regular, large));
    }
    (regular, large)
}
