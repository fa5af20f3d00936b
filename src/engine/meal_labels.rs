// ==========================================
// 送餐服务核心 - 餐盒标签构建
// ==========================================
// 每份主菜一张标签 (meal_qty 张相同标签)
// 有食材冲突: 主菜名替换为手写占位线,列出冲突食材
// 无食材冲突: 列出主菜当日食材
// 排序: 路线 + 客户标签
// ==========================================

use crate::domain::kitchen::KitchenItem;
use crate::domain::label::MealLabel;
use crate::domain::types::MealSize;
use crate::i18n::t_in;
use std::collections::BTreeMap;
use tracing::debug;

/// 冲突时替换主菜名的占位线
pub const HANDWRITTEN_DISH_PLACEHOLDER: &str = "_______________________________________";

// ==========================================
// MealLabelBuilder - 餐盒标签构建器
// ==========================================
pub struct MealLabelBuilder {
    locale: String,
}

impl MealLabelBuilder {
    pub fn new(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
        }
    }

    fn prefixed(&self, key: &str, values: &str) -> String {
        format!("{} : {}", t_in(key, &self.locale), values)
    }

    /// 单个客户的标签内容
    fn label_for(
        &self,
        item: &KitchenItem,
        main_dish_name: &str,
        main_dish_ingredients: &str,
    ) -> MealLabel {
        let mut label = MealLabel {
            route: item.route_name.as_deref().unwrap_or_default().to_uppercase(),
            name: item.client_label(),
            main_dish_name: main_dish_name.to_string(),
            ..Default::default()
        };

        if item.meal_size == Some(MealSize::Large) {
            label.size = t_in("label.large", &self.locale);
        }

        let clashes = &item.incompatible_ingredients;
        if clashes.is_empty() {
            label.ingredients = Some(self.prefixed("label.ingredients", main_dish_ingredients));
        } else {
            label.main_dish_name = HANDWRITTEN_DISH_PLACEHOLDER.to_string();
            label.dish_clashes = Some(self.prefixed("label.restrictions", &clashes.join(", ")));
        }

        if !item.preparation.is_empty() {
            label.preparations =
                Some(self.prefixed("label.preparation", &item.preparation.join(", ")));
        }

        let others: Vec<&str> = item
            .other_ingredients
            .iter()
            .chain(item.restricted_items.iter())
            .filter(|name| !clashes.contains(*name))
            .map(String::as_str)
            .collect();
        if !others.is_empty() {
            label.other_restrictions =
                Some(self.prefixed("label.other_restrictions", &others.join(", ")));
        }
        label
    }

    /// 构建当日全部餐盒标签
    ///
    /// # 参数
    /// - kitchen_items: 已过滤 (有路线且已定位) 的厨房条目
    /// - main_dish_name / main_dish_ingredients: 取自菜品汇总的主菜行
    pub fn build(
        &self,
        kitchen_items: &BTreeMap<i64, KitchenItem>,
        main_dish_name: &str,
        main_dish_ingredients: &str,
    ) -> Vec<MealLabel> {
        let mut labels = Vec::new();
        for item in kitchen_items.values() {
            let copies = usize::try_from(item.meal_qty).unwrap_or(0);
            if copies == 0 {
                continue;
            }
            let label = self.label_for(item, main_dish_name, main_dish_ingredients);
            labels.extend(std::iter::repeat(label).take(copies));
        }

        labels.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        debug!(labels = labels.len(), locale = %self.locale, "餐盒标签构建完成");
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(firstname: &str, lastname: &str, route: &str, qty: i64, size: MealSize) -> KitchenItem {
        let mut item = KitchenItem::new(firstname, lastname);
        item.route_name = Some(route.to_string());
        item.meal_qty = qty;
        item.meal_size = Some(size);
        item
    }

    #[test]
    fn test_one_label_per_serving_sorted() {
        let items = BTreeMap::from([
            (1, item("Marie", "Tremblay", "Plateau", 2, MealSize::Regular)),
            (2, item("Jean", "Roy", "Mile-End", 1, MealSize::Large)),
            (3, item("Luc", "Gagnon", "Plateau", 0, MealSize::Regular)),
        ]);

        let labels = MealLabelBuilder::new("en").build(&items, "Ginger pork", "Ginger, Ground porc");
        let keys: Vec<(&str, &str)> = labels.iter().map(|l| l.sort_key()).collect();
        assert_eq!(
            keys,
            vec![
                ("MILE-END", "Roy, Je."),
                ("PLATEAU", "Tremblay, Ma."),
                ("PLATEAU", "Tremblay, Ma."),
            ]
        );
        assert_eq!(labels[0].size, "LARGE");
        assert_eq!(labels[1].size, "");
    }

    #[test]
    fn test_clash_replaces_dish_name() {
        let mut clashing = item("Marie", "Tremblay", "Plateau", 1, MealSize::Regular);
        clashing.incompatible_ingredients = vec!["Ground porc".to_string()];
        clashing.other_ingredients = vec!["Celery".to_string()];
        clashing.restricted_items = vec!["Low sodium".to_string()];
        clashing.preparation = vec!["Puree".to_string()];
        let items = BTreeMap::from([(1, clashing)]);

        let labels = MealLabelBuilder::new("en").build(&items, "Ginger pork", "Ginger, Ground porc");
        let label = &labels[0];
        assert_eq!(label.main_dish_name, HANDWRITTEN_DISH_PLACEHOLDER);
        assert_eq!(label.dish_clashes.as_deref(), Some("Restrictions : Ground porc"));
        assert_eq!(label.ingredients, None);
        assert_eq!(label.preparations.as_deref(), Some("Preparation : Puree"));
        assert_eq!(
            label.other_restrictions.as_deref(),
            Some("Other restrictions : Celery, Low sodium")
        );
    }

    #[test]
    fn test_no_clash_lists_ingredients_in_locale() {
        let items = BTreeMap::from([(1, item("Marie", "Tremblay", "Plateau", 1, MealSize::Large))]);

        let labels = MealLabelBuilder::new("fr").build(&items, "Ginger pork", "Ginger, Ground porc");
        let label = &labels[0];
        assert_eq!(label.main_dish_name, "Ginger pork");
        assert_eq!(label.size, "GRAND");
        assert_eq!(label.ingredients.as_deref(), Some("Ingrédients : Ginger, Ground porc"));
        assert_eq!(label.dish_clashes, None);
        assert_eq!(label.other_restrictions, None);
    }
}
