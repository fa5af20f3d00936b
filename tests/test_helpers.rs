// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据库 + 一个完整配送日的种子数据
// ==========================================
// 种子配送日 (2024-03-05, 菜单: Ginger pork / Apple pie):
// - 客户1 Tremblay Marie: 路线 Plateau, 已定位, 主菜 2 常规 + 甜点 1
//   忌口 Ground porc (当日主菜含,冲突) / Fish (当日不在菜单)
// - 客户2 Roy Jean: 路线 Plateau, 已定位, 主菜 1 大份 + 甜点 1
//   忌口菜品 Apple pie (冲突), 限制 Diabetes / Peanut allergy, 备餐 Cut up meat
// - 客户3 Gagnon Luc: 路线 Plateau, 未定位, 主菜 1 常规
// - 客户4 Bouchard Anne: 无路线, 已定位, 主菜 1 常规
// - 客户5 Côté Paul: 路线 Mile End, 已定位, 订单在次日
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDate;
use meal_delivery_core::db;
use rusqlite::{params, Connection};
use std::error::Error;
use tempfile::NamedTempFile;

pub const ROUTE_PLATEAU: i64 = 1;
pub const ROUTE_MILE_END: i64 = 2;

pub const GINGER_PORK: i64 = 1;
pub const APPLE_PIE: i64 = 2;
pub const FISH_STEW: i64 = 3;

/// 种子配送日
pub fn delivery_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_test_connection(&db_path)?;
    db::init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开测试连接 (与生产相同的 PRAGMA)
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(db::open_sqlite_connection(db_path)?)
}

/// 创建已写入种子配送日的测试数据库
pub fn create_seeded_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let (temp_file, db_path) = create_test_db()?;
    let conn = open_test_connection(&db_path)?;
    seed_delivery_day(&conn)?;
    Ok((temp_file, db_path))
}

fn insert_client(
    conn: &Connection,
    client_id: i64,
    firstname: &str,
    lastname: &str,
    postal_code: &str,
    coords: Option<(f64, f64)>,
    route_id: Option<i64>,
) -> Result<(), Box<dyn Error>> {
    let (latitude, longitude) = match coords {
        Some((lat, lon)) => (Some(lat), Some(lon)),
        None => (None, None),
    };
    conn.execute(
        r#"
        INSERT INTO address (id, number, street, city, postal_code, latitude, longitude)
        VALUES (?1, ?2, 'Rue Rachel Est', 'Montréal', ?3, ?4, ?5)
        "#,
        params![client_id, format!("{}00", client_id), postal_code, latitude, longitude],
    )?;
    conn.execute(
        "INSERT INTO member (id, firstname, lastname, phone, address_id) VALUES (?1, ?2, ?3, ?4, ?1)",
        params![client_id, firstname, lastname, format!("514-555-000{}", client_id)],
    )?;
    conn.execute(
        "INSERT INTO client (id, member_id, route_id, delivery_note) VALUES (?1, ?1, ?2, NULL)",
        params![client_id, route_id],
    )?;
    Ok(())
}

fn insert_order(
    conn: &Connection,
    order_id: i64,
    client_id: i64,
    date: NaiveDate,
    status: &str,
    items: &[(&str, i64, Option<&str>)],
) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT INTO orders (id, client_id, creation_date, delivery_date, status) VALUES (?1, ?2, ?3, ?3, ?4)",
        params![order_id, client_id, date.to_string(), status],
    )?;
    for (group, qty, size) in items {
        conn.execute(
            r#"
            INSERT INTO order_item (order_id, component_group, total_quantity, size, order_item_type, remark)
            VALUES (?1, ?2, ?3, ?4, 'meal_component', '')
            "#,
            params![order_id, group, qty, size],
        )?;
    }
    Ok(())
}

/// 修改订单状态
pub fn set_order_status(conn: &Connection, order_id: i64, status: &str) -> Result<(), Box<dyn Error>> {
    conn.execute("UPDATE orders SET status = ?1 WHERE id = ?2", params![status, order_id])?;
    Ok(())
}

/// 写入种子配送日
pub fn seed_delivery_day(conn: &Connection) -> Result<(), Box<dyn Error>> {
    let day = delivery_day();
    let day_str = day.to_string();

    conn.execute_batch(
        r#"
        INSERT INTO route (id, name) VALUES (1, 'Plateau'), (2, 'Mile End');

        INSERT INTO component (id, name, component_group) VALUES
            (1, 'Ginger pork', 'main_dish'),
            (2, 'Apple pie', 'dessert'),
            (3, 'Fish stew', 'main_dish');

        INSERT INTO ingredient (id, name) VALUES
            (1, 'Ginger'), (2, 'Ground porc'), (3, 'Fish'), (4, 'Peanuts');

        INSERT INTO restricted_item (id, name) VALUES (1, 'Diabetes'), (2, 'Peanut allergy');
        INSERT INTO incompatibility (restricted_item_id, ingredient_id) VALUES (2, 4);

        INSERT INTO food_option (id, name, option_group) VALUES
            (1, 'Cut up meat', 'preparation'),
            (2, 'Extra napkins', 'other');
        "#,
    )?;

    for (component_id, ingredient_id) in [(GINGER_PORK, 1), (GINGER_PORK, 2), (FISH_STEW, 3)] {
        conn.execute(
            "INSERT INTO component_ingredient (component_id, ingredient_id, date) VALUES (?1, ?2, ?3)",
            params![component_id, ingredient_id, day_str],
        )?;
    }

    conn.execute("INSERT INTO menu (id, date) VALUES (1, ?1)", params![day_str])?;
    conn.execute(
        "INSERT INTO menu_component (menu_id, component_id) VALUES (1, ?1), (1, ?2)",
        params![GINGER_PORK, APPLE_PIE],
    )?;

    insert_client(conn, 1, "Marie", "Tremblay", "H2J 1A1", Some((45.5230, -73.5810)), Some(ROUTE_PLATEAU))?;
    insert_client(conn, 2, "Jean", "Roy", "H2J 1A2", Some((45.5310, -73.5720)), Some(ROUTE_PLATEAU))?;
    insert_client(conn, 3, "Luc", "Gagnon", "H2J 1A3", None, Some(ROUTE_PLATEAU))?;
    insert_client(conn, 4, "Anne", "Bouchard", "H2J 1A4", Some((45.5200, -73.5900)), None)?;
    insert_client(conn, 5, "Paul", "Côté", "H2T 2B1", Some((45.5250, -73.6000)), Some(ROUTE_MILE_END))?;

    conn.execute_batch(
        r#"
        INSERT INTO client_avoid_ingredient (client_id, ingredient_id) VALUES (1, 2), (1, 3);
        INSERT INTO client_avoid_component (client_id, component_id) VALUES (2, 2);
        INSERT INTO restriction (client_id, restricted_item_id) VALUES (2, 1), (2, 2);
        INSERT INTO client_option (client_id, option_id) VALUES (2, 1), (2, 2);
        "#,
    )?;

    insert_order(conn, 1, 1, day, "O", &[("main_dish", 2, Some("R")), ("dessert", 1, None)])?;
    insert_order(conn, 2, 2, day, "O", &[("main_dish", 1, Some("L")), ("dessert", 1, None)])?;
    insert_order(conn, 3, 3, day, "O", &[("main_dish", 1, Some("R"))])?;
    insert_order(conn, 4, 4, day, "O", &[("main_dish", 1, Some("R"))])?;
    let next_day = day.succ_opt().unwrap();
    insert_order(conn, 5, 5, next_day, "O", &[("main_dish", 1, Some("R"))])?;

    Ok(())
}
