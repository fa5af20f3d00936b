// ==========================================
// 送餐服务核心 - SQLite 订单数据源
// ==========================================
// 职责: 订单/菜单表的只读连接查询
// 红线: 不含业务逻辑,冲突分类交给 KitchenAggregator
// ==========================================
// 冲突判定依据 (外连接):
//   忌口项 -> 当日食材 -> 菜品 -> 同组订单项 + 当日菜单菜品
//   两者都连上才算当日冲突
// ==========================================

use super::OrderDataSource;
use crate::domain::route::Waypoint;
use crate::domain::rows::{
    AvoidComponentRow, AvoidIngredientRow, ClashRefs, ClientName, DeliveryAddress,
    DeliveryItemRow, PreparationRow, RestrictionRow, RouteOrderItemRow,
};
use crate::domain::types::{MealSize, OrderStatus};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::debug;

// ==========================================
// SqliteOrderSource
// ==========================================
pub struct SqliteOrderSource {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteOrderSource {
    /// 创建新的 SqliteOrderSource 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建数据源
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

fn date_param(delivery_date: NaiveDate) -> String {
    delivery_date.format("%Y-%m-%d").to_string()
}

fn client_name(row: &Row<'_>) -> SqliteResult<ClientName> {
    Ok(ClientName {
        client_id: row.get(0)?,
        firstname: row.get(1)?,
        lastname: row.get(2)?,
    })
}

fn parse_size(raw: Option<String>) -> Option<MealSize> {
    raw.as_deref().and_then(MealSize::from_db_str)
}

impl OrderDataSource for SqliteOrderSource {
    fn has_menu(&self, delivery_date: NaiveDate) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM menu WHERE date = ?1",
            params![date_param(delivery_date)],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn avoid_ingredient_rows(
        &self,
        delivery_date: NaiveDate,
    ) -> RepositoryResult<Vec<AvoidIngredientRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                c.id, m.firstname, m.lastname,
                ing.name,
                oi.order_id, mc.id
            FROM member m
            JOIN client c ON c.member_id = m.id
            JOIN orders o ON o.client_id = c.id
            JOIN menu mn ON mn.date = ?1
            JOIN client_avoid_ingredient cai ON cai.client_id = c.id
            JOIN ingredient ing ON ing.id = cai.ingredient_id
            LEFT JOIN component_ingredient ci
                ON ci.ingredient_id = ing.id AND ci.date = ?1
            LEFT JOIN component comp ON comp.id = ci.component_id
            LEFT JOIN order_item oi
                ON oi.component_group = comp.component_group AND oi.order_id = o.id
            LEFT JOIN menu_component mc
                ON mc.component_id = comp.id AND mc.menu_id = mn.id
            WHERE o.delivery_date = ?1
            ORDER BY c.id
            "#,
        )?;

        let rows = stmt
            .query_map(params![date_param(delivery_date)], |row| {
                Ok(AvoidIngredientRow {
                    client: client_name(row)?,
                    ingredient: row.get(3)?,
                    refs: ClashRefs {
                        order_item_order_id: row.get(4)?,
                        menu_component_id: row.get(5)?,
                    },
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        debug!(delivery_date = %delivery_date, rows = rows.len(), "忌口食材行");
        Ok(rows)
    }

    fn avoid_component_rows(
        &self,
        delivery_date: NaiveDate,
    ) -> RepositoryResult<Vec<AvoidComponentRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                c.id, m.firstname, m.lastname,
                comp.name,
                oi.order_id, mc.id
            FROM member m
            JOIN client c ON c.member_id = m.id
            JOIN orders o ON o.client_id = c.id AND o.delivery_date = ?1
            JOIN menu mn ON mn.date = ?1
            JOIN client_avoid_component cac ON cac.client_id = c.id
            JOIN component comp ON comp.id = cac.component_id
            LEFT JOIN order_item oi
                ON oi.component_group = comp.component_group AND oi.order_id = o.id
            LEFT JOIN menu_component mc
                ON mc.component_id = comp.id AND mc.menu_id = mn.id
            ORDER BY c.id
            "#,
        )?;

        let rows = stmt
            .query_map(params![date_param(delivery_date)], |row| {
                Ok(AvoidComponentRow {
                    client: client_name(row)?,
                    component: row.get(3)?,
                    refs: ClashRefs {
                        order_item_order_id: row.get(4)?,
                        menu_component_id: row.get(5)?,
                    },
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        debug!(delivery_date = %delivery_date, rows = rows.len(), "忌口菜品行");
        Ok(rows)
    }

    fn restriction_rows(&self, delivery_date: NaiveDate) -> RepositoryResult<Vec<RestrictionRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                c.id, m.firstname, m.lastname,
                ri.name, ing.name,
                oi.order_id, mc.id
            FROM member m
            JOIN client c ON c.member_id = m.id
            JOIN orders o ON o.client_id = c.id
            JOIN menu mn ON mn.date = ?1
            JOIN restriction r ON r.client_id = c.id
            JOIN restricted_item ri ON ri.id = r.restricted_item_id
            LEFT JOIN incompatibility inc ON inc.restricted_item_id = r.restricted_item_id
            LEFT JOIN ingredient ing ON ing.id = inc.ingredient_id
            LEFT JOIN component_ingredient ci
                ON ci.ingredient_id = ing.id AND ci.date = ?1
            LEFT JOIN component comp ON comp.id = ci.component_id
            LEFT JOIN order_item oi
                ON oi.component_group = comp.component_group AND oi.order_id = o.id
            LEFT JOIN menu_component mc
                ON mc.component_id = comp.id AND mc.menu_id = mn.id
            WHERE o.delivery_date = ?1
            ORDER BY c.id
            "#,
        )?;

        let rows = stmt
            .query_map(params![date_param(delivery_date)], |row| {
                Ok(RestrictionRow {
                    client: client_name(row)?,
                    restricted_item: row.get(3)?,
                    ingredient: row.get(4)?,
                    refs: ClashRefs {
                        order_item_order_id: row.get(5)?,
                        menu_component_id: row.get(6)?,
                    },
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        debug!(delivery_date = %delivery_date, rows = rows.len(), "饮食限制行");
        Ok(rows)
    }

    fn preparation_rows(&self, delivery_date: NaiveDate) -> RepositoryResult<Vec<PreparationRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                c.id, m.firstname, m.lastname,
                fo.name
            FROM member m
            JOIN client c ON c.member_id = m.id
            JOIN client_option co ON co.client_id = c.id
            JOIN food_option fo ON fo.id = co.option_id
            JOIN orders o ON o.client_id = c.id
            WHERE o.delivery_date = ?1 AND fo.option_group = 'preparation'
            ORDER BY m.lastname, m.firstname
            "#,
        )?;

        let rows = stmt
            .query_map(params![date_param(delivery_date)], |row| {
                Ok(PreparationRow {
                    client: client_name(row)?,
                    food_prep: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        debug!(delivery_date = %delivery_date, rows = rows.len(), "备餐要求行");
        Ok(rows)
    }

    fn delivery_item_rows(
        &self,
        delivery_date: NaiveDate,
    ) -> RepositoryResult<Vec<DeliveryItemRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                c.id, m.firstname, m.lastname,
                rt.name,
                comp.id, comp.component_group, comp.name,
                oi.total_quantity, oi.size
            FROM member m
            JOIN client c ON c.member_id = m.id
            LEFT JOIN route rt ON rt.id = c.route_id
            JOIN menu mn ON mn.date = ?1
            JOIN orders o ON o.client_id = c.id
            JOIN order_item oi ON oi.order_id = o.id
            JOIN menu_component mc ON mc.menu_id = mn.id
            JOIN component comp
                ON comp.id = mc.component_id AND comp.component_group = oi.component_group
            WHERE o.delivery_date = ?1
            ORDER BY c.id, oi.id
            "#,
        )?;

        let rows = stmt
            .query_map(params![date_param(delivery_date)], |row| {
                Ok(DeliveryItemRow {
                    client: client_name(row)?,
                    route_name: row.get(3)?,
                    component_id: row.get(4)?,
                    component_group: row.get(5)?,
                    component_name: row.get(6)?,
                    total_quantity: row.get::<_, Option<i64>>(7)?.unwrap_or(0),
                    size: parse_size(row.get(8)?),
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        debug!(delivery_date = %delivery_date, rows = rows.len(), "配送菜品行");
        Ok(rows)
    }

    fn day_ingredients(
        &self,
        component_id: i64,
        delivery_date: NaiveDate,
    ) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT ing.name
            FROM component_ingredient ci
            JOIN ingredient ing ON ing.id = ci.ingredient_id
            WHERE ci.component_id = ?1 AND ci.date = ?2
            ORDER BY ing.name
            "#,
        )?;

        let names = stmt
            .query_map(params![component_id, date_param(delivery_date)], |row| {
                row.get::<_, String>(0)
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(names)
    }

    fn route_order_item_rows(
        &self,
        delivery_date: NaiveDate,
        route_id: i64,
    ) -> RepositoryResult<Vec<RouteOrderItemRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                c.id, m.firstname, m.lastname,
                a.number, a.street, a.apartment, a.floor, a.city, a.postal_code,
                m.phone, c.delivery_note,
                oi.component_group, oi.total_quantity, oi.order_item_type, oi.remark, oi.size
            FROM orders o
            JOIN client c ON c.id = o.client_id
            JOIN member m ON m.id = c.member_id
            LEFT JOIN address a ON a.id = m.address_id
            JOIN order_item oi ON oi.order_id = o.id
            WHERE o.delivery_date = ?1 AND o.status = ?2 AND c.route_id = ?3
            ORDER BY a.postal_code, m.lastname, m.firstname, oi.id
            "#,
        )?;

        let rows = stmt
            .query_map(
                params![
                    date_param(delivery_date),
                    OrderStatus::Ordered.to_db_str(),
                    route_id
                ],
                |row| {
                    Ok(RouteOrderItemRow {
                        client: client_name(row)?,
                        address: DeliveryAddress {
                            number: row.get(3)?,
                            street: row.get(4)?,
                            apartment: row.get(5)?,
                            floor: row.get(6)?,
                            city: row.get(7)?,
                            postal_code: row.get(8)?,
                        },
                        phone: row.get(9)?,
                        delivery_note: row.get(10)?,
                        component_group: row.get(11)?,
                        total_quantity: row.get(12)?,
                        item_type: row.get(13)?,
                        remark: row.get(14)?,
                        size: parse_size(row.get(15)?),
                    })
                },
            )?
            .collect::<SqliteResult<Vec<_>>>()?;

        debug!(
            delivery_date = %delivery_date,
            route_id = route_id,
            rows = rows.len(),
            "路线订单项行"
        );
        Ok(rows)
    }

    fn geolocated_clients(&self) -> RepositoryResult<HashSet<i64>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT c.id
            FROM client c
            JOIN member m ON m.id = c.member_id
            JOIN address a ON a.id = m.address_id
            WHERE a.latitude IS NOT NULL AND a.longitude IS NOT NULL
            "#,
        )?;

        let ids = stmt
            .query_map([], |row| row.get::<_, i64>(0))?
            .collect::<SqliteResult<HashSet<_>>>()?;
        Ok(ids)
    }

    fn route_waypoints(
        &self,
        delivery_date: NaiveDate,
        route_id: i64,
    ) -> RepositoryResult<Vec<Waypoint>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT c.id, a.latitude, a.longitude
            FROM orders o
            JOIN client c ON c.id = o.client_id
            JOIN member m ON m.id = c.member_id
            JOIN address a ON a.id = m.address_id
            WHERE o.delivery_date = ?1 AND o.status = ?2 AND c.route_id = ?3
              AND a.latitude IS NOT NULL AND a.longitude IS NOT NULL
            GROUP BY c.id, a.latitude, a.longitude
            ORDER BY MIN(o.id)
            "#,
        )?;

        let waypoints = stmt
            .query_map(
                params![
                    date_param(delivery_date),
                    OrderStatus::Ordered.to_db_str(),
                    route_id
                ],
                |row| {
                    Ok(Waypoint::client(
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                    ))
                },
            )?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(waypoints)
    }
}
