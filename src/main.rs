// ==========================================
// 送餐服务核心 - 命令行入口
// ==========================================
// 用法:
//   meal-delivery-core [db_path] kitchen-count <date>
//   meal-delivery-core [db_path] route-sheet <date> <route_id>
//   meal-delivery-core [db_path] route <date> <route_id> [mode] [--retrieve]
//   meal-delivery-core [db_path] save-sequence <route_id> <date> <client_id,...>
// 日期格式: YYYY-MM-DD; 结果以 JSON 输出到 stdout
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use meal_delivery_core::app::{get_default_db_path, AppState};
use meal_delivery_core::logging;

const COMMANDS: &[&str] = &["kitchen-count", "route-sheet", "route", "save-sequence"];

const USAGE: &str = "用法: meal-delivery-core [db_path] <command> ...
  kitchen-count <date>
  route-sheet <date> <route_id>
  route <date> <route_id> [mode] [--retrieve]
  save-sequence <route_id> <date> <client_id,...>";

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("无效日期: {}", raw))
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.trim().parse::<i64>().with_context(|| format!("无效ID: {}", raw))
}

fn arg<'a>(args: &'a [String], idx: usize, name: &str) -> Result<&'a str> {
    args.get(idx)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("缺少参数 <{}>\n{}", name, USAGE))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    logging::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let db_path = match args.first() {
        Some(first) if !COMMANDS.contains(&first.as_str()) => args.remove(0),
        _ => get_default_db_path(),
    };

    tracing::info!(version = meal_delivery_core::VERSION, db_path = %db_path, "启动");
    let state = AppState::new(db_path).map_err(|e| anyhow!(e))?;

    let command = arg(&args, 0, "command")?;
    match command {
        "kitchen-count" => {
            let date = parse_date(arg(&args, 1, "date")?)?;
            let report = state.kitchen_api.kitchen_count(date)?;
            print_json(&report)
        }
        "route-sheet" => {
            let date = parse_date(arg(&args, 1, "date")?)?;
            let route_id = parse_id(arg(&args, 2, "route_id")?)?;
            let sheet = state.delivery_api.route_sheet(date, route_id)?;
            print_json(&sheet)
        }
        "route" => {
            let date = parse_date(arg(&args, 1, "date")?)?;
            let route_id = parse_id(arg(&args, 2, "route_id")?)?;
            let retrieve = args.iter().skip(3).any(|a| a == "--retrieve");
            // 未指定模式时使用配置的默认模式
            let mode = match args.get(3).filter(|a| a.as_str() != "--retrieve") {
                Some(mode) => mode.clone(),
                None => state
                    .config_manager
                    .get_default_sequencing_mode()
                    .map_err(|e| anyhow!("读取默认排序模式失败: {}", e))?,
            };
            let waypoints = state
                .route_api
                .daily_waypoints(date, route_id, &mode, retrieve)?;
            print_json(&serde_json::json!({ "waypoints": waypoints }))
        }
        "save-sequence" => {
            let route_id = parse_id(arg(&args, 1, "route_id")?)?;
            let date = parse_date(arg(&args, 2, "date")?)?;
            let client_ids = arg(&args, 3, "client_id,...")?
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(parse_id)
                .collect::<Result<Vec<_>>>()?;
            state.route_api.save_sequence(route_id, date, &client_ids)?;
            print_json(&"OK")
        }
        other => bail!("未知命令: {}\n{}", other, USAGE),
    }
}
