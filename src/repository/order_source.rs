// ==========================================
// 送餐服务核心 - 订单数据源
// ==========================================
// 职责: 按配送日期 (及路线) 提供已连接的订单/菜单行
// 红线: 数据源只负责取数,分类规则在引擎层
// ==========================================
// 实现:
// - SqliteOrderSource: 订单/菜单 SQLite 存储
// - InMemoryOrderSource: 预取行集合 (测试与嵌入使用)
// ==========================================

mod memory;
mod sqlite;

pub use memory::{DayRows, InMemoryOrderSource};
pub use sqlite::SqliteOrderSource;

use crate::domain::route::Waypoint;
use crate::domain::rows::{
    AvoidComponentRow, AvoidIngredientRow, DeliveryItemRow, PreparationRow, RestrictionRow,
    RouteOrderItemRow,
};
use crate::repository::error::RepositoryResult;
use chrono::NaiveDate;
use std::collections::HashSet;

// ==========================================
// Trait: OrderDataSource
// ==========================================
// 所有查询均为只读; 读取调用时刻已提交的数据
pub trait OrderDataSource: Send + Sync {
    /// 当日是否存在菜单
    fn has_menu(&self, delivery_date: NaiveDate) -> RepositoryResult<bool>;

    /// 当日忌口食材行
    fn avoid_ingredient_rows(
        &self,
        delivery_date: NaiveDate,
    ) -> RepositoryResult<Vec<AvoidIngredientRow>>;

    /// 当日忌口菜品行
    fn avoid_component_rows(
        &self,
        delivery_date: NaiveDate,
    ) -> RepositoryResult<Vec<AvoidComponentRow>>;

    /// 当日饮食限制行
    fn restriction_rows(&self, delivery_date: NaiveDate) -> RepositoryResult<Vec<RestrictionRow>>;

    /// 当日备餐要求行
    fn preparation_rows(&self, delivery_date: NaiveDate) -> RepositoryResult<Vec<PreparationRow>>;

    /// 当日配送菜品行
    fn delivery_item_rows(&self, delivery_date: NaiveDate)
        -> RepositoryResult<Vec<DeliveryItemRow>>;

    /// 某菜品当日使用的食材名称 (已排序)
    fn day_ingredients(
        &self,
        component_id: i64,
        delivery_date: NaiveDate,
    ) -> RepositoryResult<Vec<String>>;

    /// 某路线当日可配送订单的订单项行
    fn route_order_item_rows(
        &self,
        delivery_date: NaiveDate,
        route_id: i64,
    ) -> RepositoryResult<Vec<RouteOrderItemRow>>;

    /// 已有经纬度的客户ID
    fn geolocated_clients(&self) -> RepositoryResult<HashSet<i64>>;

    /// 某路线当日可配送且已定位的客户途经点 (按订单出现顺序)
    fn route_waypoints(
        &self,
        delivery_date: NaiveDate,
        route_id: i64,
    ) -> RepositoryResult<Vec<Waypoint>>;
}
