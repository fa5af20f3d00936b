// ==========================================
// 送餐服务核心 - 内存订单数据源
// ==========================================
// 职责: 以预取的行集合实现 OrderDataSource
// 用途: 引擎单元测试、由外部存储层预取后嵌入调用
// ==========================================

use super::OrderDataSource;
use crate::domain::route::Waypoint;
use crate::domain::rows::{
    AvoidComponentRow, AvoidIngredientRow, DeliveryItemRow, PreparationRow, RestrictionRow,
    RouteOrderItemRow,
};
use crate::repository::error::RepositoryResult;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

// ==========================================
// DayRows - 某配送日期的全部行
// ==========================================
// 存在 DayRows 即视为当日有菜单
#[derive(Debug, Clone, Default)]
pub struct DayRows {
    pub avoid_ingredients: Vec<AvoidIngredientRow>,
    pub avoid_components: Vec<AvoidComponentRow>,
    pub restrictions: Vec<RestrictionRow>,
    pub preparations: Vec<PreparationRow>,
    pub delivery_items: Vec<DeliveryItemRow>,
    pub day_ingredients: HashMap<i64, Vec<String>>, // component_id -> 食材
    pub route_items: HashMap<i64, Vec<RouteOrderItemRow>>, // route_id -> 订单项
    pub route_waypoints: HashMap<i64, Vec<Waypoint>>, // route_id -> 途经点
}

// ==========================================
// InMemoryOrderSource
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderSource {
    days: HashMap<NaiveDate, DayRows>,
    geolocated: HashSet<i64>,
}

impl InMemoryOrderSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置某日的行集合 (覆盖)
    pub fn with_day(mut self, delivery_date: NaiveDate, rows: DayRows) -> Self {
        self.days.insert(delivery_date, rows);
        self
    }

    /// 设置已定位客户
    pub fn with_geolocated(mut self, client_ids: impl IntoIterator<Item = i64>) -> Self {
        self.geolocated.extend(client_ids);
        self
    }

    fn day(&self, delivery_date: NaiveDate) -> Option<&DayRows> {
        self.days.get(&delivery_date)
    }
}

impl OrderDataSource for InMemoryOrderSource {
    fn has_menu(&self, delivery_date: NaiveDate) -> RepositoryResult<bool> {
        Ok(self.days.contains_key(&delivery_date))
    }

    fn avoid_ingredient_rows(
        &self,
        delivery_date: NaiveDate,
    ) -> RepositoryResult<Vec<AvoidIngredientRow>> {
        Ok(self
            .day(delivery_date)
            .map(|d| d.avoid_ingredients.clone())
            .unwrap_or_default())
    }

    fn avoid_component_rows(
        &self,
        delivery_date: NaiveDate,
    ) -> RepositoryResult<Vec<AvoidComponentRow>> {
        Ok(self
            .day(delivery_date)
            .map(|d| d.avoid_components.clone())
            .unwrap_or_default())
    }

    fn restriction_rows(&self, delivery_date: NaiveDate) -> RepositoryResult<Vec<RestrictionRow>> {
        Ok(self
            .day(delivery_date)
            .map(|d| d.restrictions.clone())
            .unwrap_or_default())
    }

    fn preparation_rows(&self, delivery_date: NaiveDate) -> RepositoryResult<Vec<PreparationRow>> {
        Ok(self
            .day(delivery_date)
            .map(|d| d.preparations.clone())
            .unwrap_or_default())
    }

    fn delivery_item_rows(
        &self,
        delivery_date: NaiveDate,
    ) -> RepositoryResult<Vec<DeliveryItemRow>> {
        Ok(self
            .day(delivery_date)
            .map(|d| d.delivery_items.clone())
            .unwrap_or_default())
    }

    fn day_ingredients(
        &self,
        component_id: i64,
        delivery_date: NaiveDate,
    ) -> RepositoryResult<Vec<String>> {
        let mut names = self
            .day(delivery_date)
            .and_then(|d| d.day_ingredients.get(&component_id).cloned())
            .unwrap_or_default();
        names.sort();
        Ok(names)
    }

    fn route_order_item_rows(
        &self,
        delivery_date: NaiveDate,
        route_id: i64,
    ) -> RepositoryResult<Vec<RouteOrderItemRow>> {
        Ok(self
            .day(delivery_date)
            .and_then(|d| d.route_items.get(&route_id).cloned())
            .unwrap_or_default())
    }

    fn geolocated_clients(&self) -> RepositoryResult<HashSet<i64>> {
        Ok(self.geolocated.clone())
    }

    fn route_waypoints(
        &self,
        delivery_date: NaiveDate,
        route_id: i64,
    ) -> RepositoryResult<Vec<Waypoint>> {
        Ok(self
            .day(delivery_date)
            .and_then(|d| d.route_waypoints.get(&route_id).cloned())
            .unwrap_or_default())
    }
}
