// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证配置读取/写入与默认值回退
// ==========================================

mod test_helpers;

use meal_delivery_core::config::{config_keys, ConfigManager, RouteSolverConfig};
use meal_delivery_core::config::config_manager::{
    DEFAULT_DEPOT_LATITUDE, DEFAULT_DEPOT_LONGITUDE, DEFAULT_ROUTE_SOLVER_MAX_STOPS,
};
use test_helpers::create_test_db;

#[test]
fn test_config_manager_creation() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    let config_manager = ConfigManager::new(&db_path);
    assert!(
        config_manager.is_ok(),
        "ConfigManager should be created successfully"
    );
}

#[test]
fn test_defaults_on_empty_config() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let config_manager = ConfigManager::new(&db_path).unwrap();

    assert_eq!(
        config_manager.get_route_solver_config().unwrap(),
        RouteSolverConfig::default()
    );
    assert_eq!(config_manager.get_default_sequencing_mode().unwrap(), "euclidean");
    assert_eq!(config_manager.get_ui_locale().unwrap(), "en");
}

#[test]
fn test_set_and_read_route_solver_config() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let config_manager = ConfigManager::new(&db_path).unwrap();

    config_manager
        .set_global_config_value(config_keys::DEPOT_LATITUDE, "45.5")
        .unwrap();
    config_manager
        .set_global_config_value(config_keys::DEPOT_LONGITUDE, " -73.6 ")
        .unwrap();
    config_manager
        .set_global_config_value(config_keys::ROUTE_SOLVER_MAX_STOPS, "50")
        .unwrap();

    let solver = config_manager.get_route_solver_config().unwrap();
    assert_eq!(solver.depot.id, None);
    assert!((solver.depot.latitude - 45.5).abs() < 1e-12);
    assert!((solver.depot.longitude + 73.6).abs() < 1e-12);
    assert_eq!(solver.max_stops, 50);
}

#[test]
fn test_set_global_config_value_overwrites() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let config_manager = ConfigManager::new(&db_path).unwrap();

    config_manager
        .set_global_config_value(config_keys::UI_LOCALE, "fr")
        .unwrap();
    config_manager
        .set_global_config_value(config_keys::UI_LOCALE, "en")
        .unwrap();

    assert_eq!(
        config_manager
            .get_global_config_value(config_keys::UI_LOCALE)
            .unwrap()
            .as_deref(),
        Some("en")
    );
}

#[test]
fn test_malformed_values_fall_back_to_defaults() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let config_manager = ConfigManager::new(&db_path).unwrap();

    config_manager
        .set_global_config_value(config_keys::ROUTE_SOLVER_MAX_STOPS, "many")
        .unwrap();
    config_manager
        .set_global_config_value(config_keys::DEPOT_LATITUDE, "NaN")
        .unwrap();

    assert_eq!(
        config_manager.get_route_solver_max_stops().unwrap(),
        DEFAULT_ROUTE_SOLVER_MAX_STOPS
    );
    let depot = config_manager.get_depot().unwrap();
    assert_eq!(depot.latitude, DEFAULT_DEPOT_LATITUDE);
    assert_eq!(depot.longitude, DEFAULT_DEPOT_LONGITUDE);
}

#[test]
fn test_config_persists_across_managers() {
    let (_temp_file, db_path) = create_test_db().unwrap();

    ConfigManager::new(&db_path)
        .unwrap()
        .set_global_config_value(config_keys::DEFAULT_SEQUENCING_MODE, "Euclidean")
        .unwrap();

    let reopened = ConfigManager::new(&db_path).unwrap();
    assert_eq!(reopened.get_default_sequencing_mode().unwrap(), "Euclidean");
}
