// ==========================================
// 送餐服务核心 - 路线领域模型
// ==========================================
// 职责: 路线途经点与已保存的客户顺序
// 持久化: 每条路线只保存一份顺序 (覆盖写,无历史)
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Waypoint - 途经点
// ==========================================
// id 为客户ID; 配送起点 (depot) 的 id 为 None
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: Option<i64>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Waypoint {
    /// 客户途经点
    pub fn client(id: i64, latitude: f64, longitude: f64) -> Self {
        Self {
            id: Some(id),
            latitude,
            longitude,
        }
    }

    /// 配送起点
    pub fn depot(latitude: f64, longitude: f64) -> Self {
        Self {
            id: None,
            latitude,
            longitude,
        }
    }

    /// 坐标是否为有限值
    pub fn has_finite_coordinates(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

// ==========================================
// RouteSequence - 路线客户顺序
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSequence {
    pub route_id: i64,
    pub date: NaiveDate,      // 保存日期 (仅记录,排序时不使用)
    pub client_ids: Vec<i64>, // 客户访问顺序
}
