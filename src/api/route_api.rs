// ==========================================
// 送餐服务核心 - 路线排序 API
// ==========================================
// 职责: 当日途经点排序 (已保存顺序 / 2-opt 求解)、保存客户顺序
// ==========================================

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::config::RouteSolverConfig;
use crate::domain::route::{RouteSequence, Waypoint};
use crate::domain::types::SequencingMode;
use crate::engine::RouteSequencer;
use crate::repository::order_source::OrderDataSource;
use crate::repository::route_sequence_repo::RouteSequenceRepository;

// ==========================================
// RouteApi - 路线排序 API
// ==========================================
pub struct RouteApi {
    source: Arc<dyn OrderDataSource>,
    sequence_repo: Arc<RouteSequenceRepository>,
    sequencer: RouteSequencer,
}

impl RouteApi {
    /// 创建新的RouteApi实例
    pub fn new(
        source: Arc<dyn OrderDataSource>,
        sequence_repo: Arc<RouteSequenceRepository>,
        solver_config: RouteSolverConfig,
    ) -> Self {
        Self {
            source,
            sequence_repo,
            sequencer: RouteSequencer::new(solver_config),
        }
    }

    /// 当日路线途经点
    ///
    /// # 参数
    /// - mode: 排序模式 (目前仅 "euclidean")
    /// - retrieve_if_exists: 若已保存顺序则按其重排,否则按 mode 求解
    ///
    /// # 返回
    /// - Err(UnsupportedSequencingMode): 未知排序模式
    /// - Err(Engine): 途经点超过求解上限或坐标无效
    pub fn daily_waypoints(
        &self,
        delivery_date: NaiveDate,
        route_id: i64,
        mode: &str,
        retrieve_if_exists: bool,
    ) -> ApiResult<Vec<Waypoint>> {
        let mode = SequencingMode::parse(mode)
            .ok_or_else(|| ApiError::UnsupportedSequencingMode(mode.to_string()))?;

        let waypoints = self.source.route_waypoints(delivery_date, route_id)?;

        if retrieve_if_exists {
            if let Some(stored) = self.sequence_repo.get_sequence(route_id)? {
                if !stored.client_ids.is_empty() {
                    info!(route_id = route_id, saved_on = %stored.date, "使用已保存的路线顺序");
                    return Ok(self.sequencer.reorder(waypoints, &stored));
                }
            }
        }

        match mode {
            SequencingMode::Euclidean => Ok(self.sequencer.optimize(&waypoints)?),
        }
    }

    /// 保存路线客户顺序 (覆盖已有值)
    pub fn save_sequence(
        &self,
        route_id: i64,
        date: NaiveDate,
        client_ids: &[i64],
    ) -> ApiResult<()> {
        let mut seen = HashSet::with_capacity(client_ids.len());
        if let Some(dup) = client_ids.iter().find(|id| !seen.insert(**id)) {
            return Err(ApiError::InvalidInput(format!("客户顺序中存在重复客户: {}", dup)));
        }
        if client_ids.is_empty() {
            warn!(route_id = route_id, "保存空的路线顺序");
        }

        self.sequence_repo.set_sequence(route_id, date, client_ids)?;
        Ok(())
    }

    /// 读取已保存的路线顺序
    pub fn get_sequence(&self, route_id: i64) -> ApiResult<Option<RouteSequence>> {
        Ok(self.sequence_repo.get_sequence(route_id)?)
    }
}
