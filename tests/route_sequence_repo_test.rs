// ==========================================
// RouteSequenceRepository 集成测试
// ==========================================
// 测试目标: 每条路线一份顺序,保存即覆盖
// ==========================================

mod test_helpers;

use meal_delivery_core::repository::{RepositoryError, RouteSequenceRepository};
use test_helpers::*;

#[test]
fn test_fresh_route_has_no_sequence() {
    let (_temp_file, db_path) = create_seeded_db().expect("Failed to create seeded db");
    let repo = RouteSequenceRepository::new(&db_path).expect("Failed to open repo");

    // 建表默认值 '{}' 视为未保存
    assert!(repo.get_sequence(ROUTE_PLATEAU).unwrap().is_none());
    // 路线不存在同样返回 None
    assert!(repo.get_sequence(999).unwrap().is_none());
}

#[test]
fn test_set_then_get_sequence() {
    let (_temp_file, db_path) = create_seeded_db().unwrap();
    let repo = RouteSequenceRepository::new(&db_path).unwrap();

    repo.set_sequence(ROUTE_PLATEAU, delivery_day(), &[3, 1, 2])
        .unwrap();

    let stored = repo.get_sequence(ROUTE_PLATEAU).unwrap().unwrap();
    assert_eq!(stored.route_id, ROUTE_PLATEAU);
    assert_eq!(stored.date, delivery_day());
    assert_eq!(stored.client_ids, vec![3, 1, 2]);

    // 其它路线不受影响
    assert!(repo.get_sequence(ROUTE_MILE_END).unwrap().is_none());
}

#[test]
fn test_set_sequence_overwrites_previous_date() {
    let (_temp_file, db_path) = create_seeded_db().unwrap();
    let repo = RouteSequenceRepository::new(&db_path).unwrap();

    repo.set_sequence(ROUTE_PLATEAU, delivery_day(), &[1, 2])
        .unwrap();
    let next_day = delivery_day().succ_opt().unwrap();
    repo.set_sequence(ROUTE_PLATEAU, next_day, &[2]).unwrap();

    let stored = repo.get_sequence(ROUTE_PLATEAU).unwrap().unwrap();
    assert_eq!(stored.date, next_day);
    assert_eq!(stored.client_ids, vec![2]);

    let conn = open_test_connection(&db_path).unwrap();
    let raw: String = conn
        .query_row(
            "SELECT client_id_sequence FROM route WHERE id = ?1",
            [ROUTE_PLATEAU],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(raw, r#"{"2024-03-06":[2]}"#);
}

#[test]
fn test_set_sequence_unknown_route() {
    let (_temp_file, db_path) = create_seeded_db().unwrap();
    let repo = RouteSequenceRepository::new(&db_path).unwrap();

    let result = repo.set_sequence(999, delivery_day(), &[1]);
    assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
}

#[test]
fn test_sequence_visible_to_second_repository() {
    let (_temp_file, db_path) = create_seeded_db().unwrap();
    let writer = RouteSequenceRepository::new(&db_path).unwrap();
    let reader = RouteSequenceRepository::new(&db_path).unwrap();

    writer
        .set_sequence(ROUTE_MILE_END, delivery_day(), &[5])
        .unwrap();

    let stored = reader.get_sequence(ROUTE_MILE_END).unwrap().unwrap();
    assert_eq!(stored.client_ids, vec![5]);
}
