// ==========================================
// 送餐服务核心 - 路线排序引擎
// ==========================================
// 职责:
// - optimize: 以配送起点为首点,2-opt 求解客户访问顺序
// - reorder: 按已保存的客户顺序重排途经点
// 红线: 纯计算,不访问数据库; 顺序持久化在 RouteSequenceRepository
// ==========================================

mod sequence;
mod tsp;

pub use sequence::reorder_by_sequence;
pub use tsp::{solve, squared_distance, tour_squared_length, two_opt_neighbors, PlanePoint};

use crate::config::RouteSolverConfig;
use crate::domain::route::{RouteSequence, Waypoint};
use crate::engine::error::{EngineError, EngineResult};
use tracing::{debug, info};

// ==========================================
// RouteSequencer - 路线排序引擎
// ==========================================
pub struct RouteSequencer {
    config: RouteSolverConfig,
}

impl RouteSequencer {
    pub fn new(config: RouteSolverConfig) -> Self {
        Self { config }
    }

    /// 求解客户访问顺序
    ///
    /// 配送起点作为首点参与求解 (回路闭合,任一客户都可能与起点相邻),
    /// 返回结果中不含起点。
    ///
    /// # 错误
    /// - TooManyStops: 途经点数量超过 max_stops
    /// - InvalidCoordinates: 存在非有限坐标
    pub fn optimize(&self, waypoints: &[Waypoint]) -> EngineResult<Vec<Waypoint>> {
        if waypoints.len() > self.config.max_stops {
            return Err(EngineError::TooManyStops {
                stops: waypoints.len(),
                max_stops: self.config.max_stops,
            });
        }
        if let Some(bad) = std::iter::once(&self.config.depot)
            .chain(waypoints.iter())
            .find(|w| !w.has_finite_coordinates())
        {
            return Err(EngineError::InvalidCoordinates { id: bad.id });
        }
        if waypoints.len() < 2 {
            return Ok(waypoints.to_vec());
        }

        let mut tour = Vec::with_capacity(waypoints.len() + 1);
        tour.push(self.config.depot);
        tour.extend_from_slice(waypoints);

        let before = tour_squared_length(&tour);
        let solved = solve(&tour);
        let after = tour_squared_length(&solved);

        info!(
            stops = waypoints.len(),
            before = before,
            after = after,
            "路线 2-opt 求解完成"
        );

        // 起点不参与反转,始终位于首位
        Ok(solved.into_iter().skip(1).collect())
    }

    /// 按已保存的客户顺序重排途经点
    pub fn reorder(&self, waypoints: Vec<Waypoint>, stored: &RouteSequence) -> Vec<Waypoint> {
        let sequence: Vec<Option<i64>> = stored.client_ids.iter().map(|&id| Some(id)).collect();
        let ordered = reorder_by_sequence(waypoints, &sequence, |w| w.id);
        debug!(
            route_id = stored.route_id,
            stored = stored.client_ids.len(),
            waypoints = ordered.len(),
            "按已保存顺序重排途经点"
        );
        ordered
    }
}
