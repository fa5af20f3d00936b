// ==========================================
// 送餐服务核心 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout,减少并发写入时的偶发 busy 错误
// - 提供订单/菜单/路线表的建表语句 (幂等)
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

/// 建表 (幂等)
///
/// 表结构与订单/菜单存储层保持一致,本库只读其中的订单数据,
/// 只写 route.client_id_sequence 与 config_kv。
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS address (
            id INTEGER PRIMARY KEY,
            number TEXT,
            street TEXT,
            apartment TEXT,
            floor TEXT,
            city TEXT,
            postal_code TEXT,
            latitude REAL,
            longitude REAL
        );

        CREATE TABLE IF NOT EXISTS member (
            id INTEGER PRIMARY KEY,
            firstname TEXT NOT NULL,
            lastname TEXT NOT NULL,
            phone TEXT,
            address_id INTEGER REFERENCES address(id)
        );

        CREATE TABLE IF NOT EXISTS route (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            client_id_sequence TEXT NOT NULL DEFAULT '{}'
        );

        CREATE TABLE IF NOT EXISTS client (
            id INTEGER PRIMARY KEY,
            member_id INTEGER NOT NULL REFERENCES member(id),
            route_id INTEGER REFERENCES route(id),
            delivery_note TEXT
        );

        CREATE TABLE IF NOT EXISTS component (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            component_group TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS ingredient (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS component_ingredient (
            id INTEGER PRIMARY KEY,
            component_id INTEGER NOT NULL REFERENCES component(id),
            ingredient_id INTEGER NOT NULL REFERENCES ingredient(id),
            date TEXT
        );

        CREATE TABLE IF NOT EXISTS menu (
            id INTEGER PRIMARY KEY,
            date TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS menu_component (
            id INTEGER PRIMARY KEY,
            menu_id INTEGER NOT NULL REFERENCES menu(id),
            component_id INTEGER NOT NULL REFERENCES component(id)
        );

        CREATE TABLE IF NOT EXISTS restricted_item (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS incompatibility (
            restricted_item_id INTEGER NOT NULL REFERENCES restricted_item(id),
            ingredient_id INTEGER NOT NULL REFERENCES ingredient(id),
            PRIMARY KEY (restricted_item_id, ingredient_id)
        );

        CREATE TABLE IF NOT EXISTS restriction (
            client_id INTEGER NOT NULL REFERENCES client(id),
            restricted_item_id INTEGER NOT NULL REFERENCES restricted_item(id),
            PRIMARY KEY (client_id, restricted_item_id)
        );

        CREATE TABLE IF NOT EXISTS client_avoid_ingredient (
            client_id INTEGER NOT NULL REFERENCES client(id),
            ingredient_id INTEGER NOT NULL REFERENCES ingredient(id),
            PRIMARY KEY (client_id, ingredient_id)
        );

        CREATE TABLE IF NOT EXISTS client_avoid_component (
            client_id INTEGER NOT NULL REFERENCES client(id),
            component_id INTEGER NOT NULL REFERENCES component(id),
            PRIMARY KEY (client_id, component_id)
        );

        CREATE TABLE IF NOT EXISTS food_option (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            option_group TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS client_option (
            client_id INTEGER NOT NULL REFERENCES client(id),
            option_id INTEGER NOT NULL REFERENCES food_option(id),
            PRIMARY KEY (client_id, option_id)
        );

        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY,
            client_id INTEGER NOT NULL REFERENCES client(id),
            creation_date TEXT,
            delivery_date TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'O'
        );

        CREATE TABLE IF NOT EXISTS order_item (
            id INTEGER PRIMARY KEY,
            order_id INTEGER NOT NULL REFERENCES orders(id),
            component_group TEXT,
            total_quantity INTEGER,
            size TEXT,
            order_item_type TEXT NOT NULL DEFAULT '',
            remark TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_orders_delivery_date ON orders(delivery_date);
        CREATE INDEX IF NOT EXISTS idx_order_item_order ON order_item(order_id);
        CREATE INDEX IF NOT EXISTS idx_component_ingredient_date ON component_ingredient(date);
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}
