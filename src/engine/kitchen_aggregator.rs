// ==========================================
// 送餐服务核心 - 厨房条目聚合引擎
// ==========================================
// 输入: 订单数据源的五类行 (忌口食材/忌口菜品/饮食限制/备餐要求/配送菜品)
// 输出: client_id -> KitchenItem
// ==========================================
// 处理顺序影响分类结果:
// 1. 忌口食材: 冲突 -> incompatible; 否则仅当未判为冲突时 -> other
// 2. 忌口菜品: 同上
// 3. 饮食限制: 食材同上分类; 限制类别始终记录
// 4. 备餐要求: 无条件记录
// 5. 配送菜品: 主菜累加份数并记录份量; 每组记录菜品 (后者覆盖)
// 收尾: 冲突优先 (从 other 中剔除已冲突名称),所有列表排序
// ==========================================

use crate::domain::kitchen::{KitchenItem, MealComponent};
use crate::domain::rows::{
    AvoidComponentRow, AvoidIngredientRow, ClientName, DeliveryItemRow, PreparationRow,
    RestrictionRow,
};
use crate::domain::types::component_group;
use crate::repository::error::RepositoryResult;
use crate::repository::order_source::OrderDataSource;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, info};

// ==========================================
// KitchenAggregator - 厨房条目聚合引擎
// ==========================================
// 无状态: 每次 aggregate 使用独立的 KitchenListBuilder
pub struct KitchenAggregator<'a> {
    source: &'a dyn OrderDataSource,
}

impl<'a> KitchenAggregator<'a> {
    pub fn new(source: &'a dyn OrderDataSource) -> Self {
        Self { source }
    }

    /// 聚合某配送日期的厨房条目
    ///
    /// # 返回
    /// - Ok(map): 至少出现在一类行中的客户; 当日无菜单时为空
    /// - Err: 数据源错误
    pub fn aggregate(&self, delivery_date: NaiveDate) -> RepositoryResult<BTreeMap<i64, KitchenItem>> {
        if !self.source.has_menu(delivery_date)? {
            info!(delivery_date = %delivery_date, "当日无菜单,厨房条目为空");
            return Ok(BTreeMap::new());
        }

        let mut builder = KitchenListBuilder::new();

        for row in self.source.avoid_ingredient_rows(delivery_date)? {
            builder.add_avoid_ingredient(&row);
        }
        for row in self.source.avoid_component_rows(delivery_date)? {
            builder.add_avoid_component(&row);
        }
        for row in self.source.restriction_rows(delivery_date)? {
            builder.add_restriction(&row);
        }
        for row in self.source.preparation_rows(delivery_date)? {
            builder.add_preparation(&row);
        }
        for row in self.source.delivery_item_rows(delivery_date)? {
            builder.add_delivery_item(&row);
        }

        let items = builder.finish();
        info!(
            delivery_date = %delivery_date,
            clients = items.len(),
            "厨房条目聚合完成"
        );
        Ok(items)
    }
}

// ==========================================
// KitchenListBuilder - 单次聚合的累积器
// ==========================================
#[derive(Debug, Default)]
pub struct KitchenListBuilder {
    items: BTreeMap<i64, KitchenItem>,
}

impl KitchenListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 首次出现的客户建立空条目
    fn entry(&mut self, client: &ClientName) -> &mut KitchenItem {
        self.items
            .entry(client.client_id)
            .or_insert_with(|| KitchenItem::new(&client.firstname, &client.lastname))
    }

    pub fn add_avoid_ingredient(&mut self, row: &AvoidIngredientRow) {
        let item = self.entry(&row.client);
        classify(
            &mut item.incompatible_ingredients,
            &mut item.other_ingredients,
            &row.ingredient,
            row.refs.is_clash(),
        );
    }

    pub fn add_avoid_component(&mut self, row: &AvoidComponentRow) {
        let item = self.entry(&row.client);
        classify(
            &mut item.incompatible_components,
            &mut item.other_components,
            &row.component,
            row.refs.is_clash(),
        );
    }

    pub fn add_restriction(&mut self, row: &RestrictionRow) {
        let item = self.entry(&row.client);
        if let Some(ingredient) = row.ingredient.as_deref() {
            classify(
                &mut item.incompatible_ingredients,
                &mut item.other_ingredients,
                ingredient,
                row.refs.is_clash(),
            );
        }
        push_unique(&mut item.restricted_items, &row.restricted_item);
    }

    pub fn add_preparation(&mut self, row: &PreparationRow) {
        let item = self.entry(&row.client);
        push_unique(&mut item.preparation, &row.food_prep);
    }

    pub fn add_delivery_item(&mut self, row: &DeliveryItemRow) {
        let item = self.entry(&row.client);
        if component_group::is_main_dish(&row.component_group) {
            item.meal_qty += row.total_quantity;
            item.meal_size = row.size;
        }
        if row.route_name.is_some() {
            item.route_name = row.route_name.clone();
        }
        item.meal_components.insert(
            row.component_group.clone(),
            MealComponent {
                id: row.component_id,
                name: row.component_name.clone(),
                qty: row.total_quantity,
            },
        );
    }

    /// 收尾: 冲突优先并排序
    pub fn finish(mut self) -> BTreeMap<i64, KitchenItem> {
        for (client_id, item) in self.items.iter_mut() {
            let before = item.other_ingredients.len() + item.other_components.len();
            remove_clashing(&mut item.other_ingredients, &item.incompatible_ingredients);
            remove_clashing(&mut item.other_components, &item.incompatible_components);
            let dropped = before - item.other_ingredients.len() - item.other_components.len();
            if dropped > 0 {
                debug!(client_id = client_id, dropped = dropped, "后到的冲突行覆盖了非冲突分类");
            }

            item.incompatible_ingredients.sort();
            item.incompatible_components.sort();
            item.other_ingredients.sort();
            item.other_components.sort();
            item.restricted_items.sort();
            item.preparation.sort();
        }
        self.items
    }
}

/// 冲突/非冲突分类
///
/// 非冲突名称只在尚未判为冲突时记录
fn classify(clashes: &mut Vec<String>, others: &mut Vec<String>, name: &str, is_clash: bool) {
    if is_clash {
        push_unique(clashes, name);
    } else if !clashes.iter().any(|n| n == name) {
        push_unique(others, name);
    }
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|n| n == name) {
        list.push(name.to_string());
    }
}

fn remove_clashing(others: &mut Vec<String>, clashes: &[String]) {
    others.retain(|n| !clashes.contains(n));
}
