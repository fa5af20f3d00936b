// ==========================================
// 送餐服务核心 - 厨房计数 API
// ==========================================
// 职责: 聚合 -> 过滤不可配送客户 -> 报表行 + 餐盒标签
// 过滤: 无路线或未定位的客户不进入报表 (无法配送)
// ==========================================

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::api::error::ApiResult;
use crate::domain::kitchen::KitchenItem;
use crate::domain::report::KitchenCountReport;
use crate::engine::{KitchenAggregator, MealLabelBuilder, ReportLineBuilder};
use crate::repository::order_source::OrderDataSource;

// ==========================================
// KitchenCountApi - 厨房计数 API
// ==========================================
pub struct KitchenCountApi {
    source: Arc<dyn OrderDataSource>,
    label_locale: String,
}

impl KitchenCountApi {
    /// 创建新的KitchenCountApi实例
    ///
    /// # 参数
    /// - source: 订单数据源
    /// - label_locale: 餐盒标签语言
    pub fn new(source: Arc<dyn OrderDataSource>, label_locale: &str) -> Self {
        Self {
            source,
            label_locale: label_locale.to_string(),
        }
    }

    /// 可配送客户的厨房条目
    ///
    /// 聚合结果中去掉无路线或无经纬度的客户
    pub fn deliverable_kitchen_items(
        &self,
        delivery_date: NaiveDate,
    ) -> ApiResult<BTreeMap<i64, KitchenItem>> {
        let mut items = KitchenAggregator::new(self.source.as_ref()).aggregate(delivery_date)?;
        let aggregated = items.len();

        let geolocated = self.source.geolocated_clients()?;
        items.retain(|client_id, item| item.route_name.is_some() && geolocated.contains(client_id));

        info!(
            delivery_date = %delivery_date,
            aggregated = aggregated,
            deliverable = items.len(),
            "过滤不可配送客户"
        );
        Ok(items)
    }

    /// 生成厨房计数报表
    ///
    /// # 返回
    /// - Ok(KitchenCountReport): 当日无订单时各列表为空
    /// - Err(ApiError): 数据源错误
    pub fn kitchen_count(&self, delivery_date: NaiveDate) -> ApiResult<KitchenCountReport> {
        let items = self.deliverable_kitchen_items(delivery_date)?;
        let (summary_lines, meal_lines) =
            ReportLineBuilder::new(self.source.as_ref()).build_lines(&items, delivery_date)?;

        // 标签上的主菜名与食材取自汇总首行
        let labels = match summary_lines.first() {
            Some(main) => MealLabelBuilder::new(&self.label_locale).build(
                &items,
                &main.name,
                &main.ingredients,
            ),
            None => Vec::new(),
        };

        Ok(KitchenCountReport {
            delivery_date,
            summary_lines,
            meal_lines,
            labels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::MealLineKind;
    use crate::domain::types::MealSize;
    use crate::engine::fixtures::*;
    use crate::repository::order_source::{DayRows, InMemoryOrderSource};
    use std::collections::HashMap;

    fn api(source: InMemoryOrderSource) -> KitchenCountApi {
        KitchenCountApi::new(Arc::new(source), "en")
    }

    #[test]
    fn test_undeliverable_clients_dropped() {
        let routed = client(1, "Marie", "Tremblay");
        let no_route = client(2, "Jean", "Roy");
        let not_geolocated = client(3, "Luc", "Gagnon");

        let mut no_route_dish = main_dish(&no_route, "Plateau", 1, MealSize::Regular);
        no_route_dish.route_name = None;

        let source = InMemoryOrderSource::new()
            .with_day(
                test_date(),
                DayRows {
                    delivery_items: vec![
                        main_dish(&routed, "Plateau", 1, MealSize::Regular),
                        no_route_dish,
                        main_dish(&not_geolocated, "Plateau", 1, MealSize::Large),
                    ],
                    ..Default::default()
                },
            )
            .with_geolocated([1, 2]);

        let items = api(source).deliverable_kitchen_items(test_date()).unwrap();
        assert_eq!(items.keys().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_kitchen_count_ginger_pork() {
        let x = client(1, "Marie", "Tremblay");
        let mut day_ingredients = HashMap::new();
        day_ingredients.insert(1, vec!["Ground porc".to_string(), "Ginger".to_string()]);

        let source = InMemoryOrderSource::new()
            .with_day(
                test_date(),
                DayRows {
                    avoid_ingredients: vec![avoid_ingredient(&x, "Ground porc", true)],
                    delivery_items: vec![main_dish(&x, "Plateau", 2, MealSize::Regular)],
                    day_ingredients,
                    ..Default::default()
                },
            )
            .with_geolocated([1]);

        let report = api(source).kitchen_count(test_date()).unwrap();
        assert_eq!(report.summary_lines[0].name, "Ginger pork");
        assert_eq!(report.summary_lines[0].ingredients, "Ginger, Ground porc");
        assert_eq!(report.meal_lines[0].ingredient_clash, "Ground porc");
        assert!(report
            .meal_lines
            .iter()
            .any(|l| l.kind == MealLineKind::Subtotal && l.regular_qty == "2"));
        assert_eq!(report.labels.len(), 2);
        assert!(report.labels[0].dish_clashes.is_some());
    }

    #[test]
    fn test_kitchen_count_without_menu_is_empty() {
        let report = api(InMemoryOrderSource::new()).kitchen_count(test_date()).unwrap();
        assert!(report.summary_lines.is_empty());
        assert!(report.meal_lines.is_empty());
        assert!(report.labels.is_empty());
    }
}
