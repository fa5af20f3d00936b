// ==========================================
// 引擎层单元测试 - 行数据构造
// ==========================================

use crate::domain::rows::{
    AvoidComponentRow, AvoidIngredientRow, ClashRefs, ClientName, DeliveryAddress,
    DeliveryItemRow, PreparationRow, RestrictionRow, RouteOrderItemRow,
};
use crate::domain::types::{component_group, MealSize};
use chrono::NaiveDate;

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

pub fn client(id: i64, firstname: &str, lastname: &str) -> ClientName {
    ClientName::new(id, firstname, lastname)
}

pub fn refs(clash: bool) -> ClashRefs {
    if clash {
        ClashRefs::clashing(100, 200)
    } else {
        ClashRefs::default()
    }
}

pub fn avoid_ingredient(c: &ClientName, ingredient: &str, clash: bool) -> AvoidIngredientRow {
    AvoidIngredientRow {
        client: c.clone(),
        ingredient: ingredient.to_string(),
        refs: refs(clash),
    }
}

pub fn avoid_component(c: &ClientName, component: &str, clash: bool) -> AvoidComponentRow {
    AvoidComponentRow {
        client: c.clone(),
        component: component.to_string(),
        refs: refs(clash),
    }
}

pub fn restriction(
    c: &ClientName,
    restricted_item: &str,
    ingredient: Option<&str>,
    clash: bool,
) -> RestrictionRow {
    RestrictionRow {
        client: c.clone(),
        restricted_item: restricted_item.to_string(),
        ingredient: ingredient.map(|s| s.to_string()),
        refs: refs(clash),
    }
}

pub fn preparation(c: &ClientName, food_prep: &str) -> PreparationRow {
    PreparationRow {
        client: c.clone(),
        food_prep: food_prep.to_string(),
    }
}

pub fn main_dish(c: &ClientName, route: &str, qty: i64, size: MealSize) -> DeliveryItemRow {
    DeliveryItemRow {
        client: c.clone(),
        route_name: Some(route.to_string()),
        component_id: 1,
        component_group: component_group::MAIN_DISH.to_string(),
        component_name: "Ginger pork".to_string(),
        total_quantity: qty,
        size: Some(size),
    }
}

pub fn side(c: &ClientName, group: &str, component_id: i64, name: &str, qty: i64) -> DeliveryItemRow {
    DeliveryItemRow {
        client: c.clone(),
        route_name: None,
        component_id,
        component_group: group.to_string(),
        component_name: name.to_string(),
        total_quantity: qty,
        size: None,
    }
}

pub fn route_item(
    c: &ClientName,
    group: Option<&str>,
    qty: i64,
    size: Option<MealSize>,
) -> RouteOrderItemRow {
    RouteOrderItemRow {
        client: c.clone(),
        address: DeliveryAddress {
            number: Some("10".to_string()),
            street: Some("Rue Saint-Urbain".to_string()),
            city: Some("Montréal".to_string()),
            postal_code: Some("H2X 2N2".to_string()),
            ..Default::default()
        },
        phone: Some("514-555-0100".to_string()),
        delivery_note: None,
        component_group: group.map(|g| g.to_string()),
        total_quantity: Some(qty),
        item_type: "B component".to_string(),
        remark: String::new(),
        size,
    }
}
