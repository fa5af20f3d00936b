// ==========================================
// 送餐服务核心 - 路线配送单 API
// ==========================================
// 职责: 客户配送清单 (按已保存路线顺序) + 路线汇总
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::error::ApiResult;
use crate::domain::delivery::{DeliveryManifest, RouteSummaryLine};
use crate::engine::{reorder_by_sequence, route_summary_lines, DeliveryListBuilder};
use crate::repository::order_source::OrderDataSource;
use crate::repository::route_sequence_repo::RouteSequenceRepository;

// ==========================================
// RouteSheet - 路线配送单
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSheet {
    pub delivery_date: NaiveDate,
    pub route_id: i64,
    pub manifests: Vec<DeliveryManifest>,
    pub summary_lines: Vec<RouteSummaryLine>,
}

// ==========================================
// DeliveryApi - 路线配送单 API
// ==========================================
pub struct DeliveryApi {
    source: Arc<dyn OrderDataSource>,
    sequence_repo: Arc<RouteSequenceRepository>,
}

impl DeliveryApi {
    /// 创建新的DeliveryApi实例
    pub fn new(
        source: Arc<dyn OrderDataSource>,
        sequence_repo: Arc<RouteSequenceRepository>,
    ) -> Self {
        Self {
            source,
            sequence_repo,
        }
    }

    /// 生成路线配送单
    ///
    /// # 参数
    /// - delivery_date: 配送日期
    /// - route_id: 路线ID
    ///
    /// # 返回
    /// - Ok(RouteSheet): 清单按已保存顺序排列; 未保存时按订单出现顺序
    /// - Err(ApiError): 数据源错误或已保存顺序无法解析
    pub fn route_sheet(&self, delivery_date: NaiveDate, route_id: i64) -> ApiResult<RouteSheet> {
        let mut manifests =
            DeliveryListBuilder::new(self.source.as_ref()).build_manifests(delivery_date, route_id)?;

        if let Some(stored) = self.sequence_repo.get_sequence(route_id)? {
            manifests = reorder_by_sequence(manifests, &stored.client_ids, |m| m.client_id);
        }

        let summary_lines = route_summary_lines(&manifests);
        info!(
            delivery_date = %delivery_date,
            route_id = route_id,
            clients = manifests.len(),
            "生成路线配送单"
        );

        Ok(RouteSheet {
            delivery_date,
            route_id,
            manifests,
            summary_lines,
        })
    }
}
