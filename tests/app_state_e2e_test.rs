// ==========================================
// AppState 端到端测试
// ==========================================
// 测试目标: 共享连接下各 API 协同工作,配置生效
// ==========================================

mod test_helpers;

use meal_delivery_core::app::AppState;
use meal_delivery_core::config::config_keys;
use test_helpers::*;

#[test]
fn test_app_state_full_flow() {
    let (_temp_file, db_path) = create_seeded_db().expect("Failed to create seeded db");
    let state = AppState::new(db_path.clone()).expect("Failed to create AppState");
    assert_eq!(state.db_path, db_path);

    let report = state.kitchen_api.kitchen_count(delivery_day()).unwrap();
    assert_eq!(report.labels.len(), 3);

    state
        .route_api
        .save_sequence(ROUTE_PLATEAU, delivery_day(), &[2, 3, 1])
        .unwrap();

    let sheet = state
        .delivery_api
        .route_sheet(delivery_day(), ROUTE_PLATEAU)
        .unwrap();
    let ids: Vec<i64> = sheet.manifests.iter().map(|m| m.client_id).collect();
    assert_eq!(ids, vec![2, 3, 1]);

    let waypoints = state
        .route_api
        .daily_waypoints(delivery_day(), ROUTE_PLATEAU, "euclidean", true)
        .unwrap();
    let ids: Vec<Option<i64>> = waypoints.iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![Some(2), Some(1)]);
}

#[test]
fn test_app_state_reads_label_locale() {
    let (_temp_file, db_path) = create_seeded_db().unwrap();
    {
        let state = AppState::new(db_path.clone()).unwrap();
        state
            .config_manager
            .set_global_config_value(config_keys::UI_LOCALE, "fr-CA")
            .unwrap();
    }

    let state = AppState::new(db_path).unwrap();
    let report = state.kitchen_api.kitchen_count(delivery_day()).unwrap();
    assert_eq!(report.labels[0].size, "GRAND");
}

#[test]
fn test_app_state_reads_solver_limit() {
    let (_temp_file, db_path) = create_seeded_db().unwrap();
    {
        let state = AppState::new(db_path.clone()).unwrap();
        state
            .config_manager
            .set_global_config_value(config_keys::ROUTE_SOLVER_MAX_STOPS, "1")
            .unwrap();
    }

    let state = AppState::new(db_path).unwrap();
    let result = state
        .route_api
        .daily_waypoints(delivery_day(), ROUTE_PLATEAU, "euclidean", false);
    assert!(result.is_err());
}
