// ==========================================
// 送餐服务核心 - 路线配送清单构建
// ==========================================
// 输入: 某路线某日可配送订单的订单项行
// 输出: 每位客户一份 DeliveryManifest (按首次出现顺序)
// 配送项排序: 主菜 -> 其余非空组 (按组名) -> 空组
// ==========================================

use crate::domain::delivery::{
    compare_component_groups, component_group_rank, DeliveryItem, DeliveryManifest,
    RouteSummaryLine,
};
use crate::domain::rows::RouteOrderItemRow;
use crate::domain::types::{component_group, MealSize};
use crate::repository::error::RepositoryResult;
use crate::repository::order_source::OrderDataSource;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tracing::info;

// ==========================================
// DeliveryListBuilder - 配送清单构建器
// ==========================================
pub struct DeliveryListBuilder<'a> {
    source: &'a dyn OrderDataSource,
}

impl<'a> DeliveryListBuilder<'a> {
    pub fn new(source: &'a dyn OrderDataSource) -> Self {
        Self { source }
    }

    /// 构建某路线某日的客户配送清单
    pub fn build_manifests(
        &self,
        delivery_date: NaiveDate,
        route_id: i64,
    ) -> RepositoryResult<Vec<DeliveryManifest>> {
        let rows = self.source.route_order_item_rows(delivery_date, route_id)?;
        let manifests = manifests_from_rows(&rows);
        info!(
            delivery_date = %delivery_date,
            route_id = route_id,
            rows = rows.len(),
            clients = manifests.len(),
            "配送清单构建完成"
        );
        Ok(manifests)
    }
}

/// 按客户归并订单项行,并对每份清单的配送项排序
pub fn manifests_from_rows(rows: &[RouteOrderItemRow]) -> Vec<DeliveryManifest> {
    let mut manifests: Vec<DeliveryManifest> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let slot = *index.entry(row.client.client_id).or_insert_with(|| {
            manifests.push(DeliveryManifest {
                client_id: row.client.client_id,
                firstname: row.client.firstname.clone(),
                lastname: row.client.lastname.clone(),
                address: row.address.clone(),
                phone: row.phone.clone(),
                delivery_note: row.delivery_note.clone(),
                delivery_items: Vec::new(),
            });
            manifests.len() - 1
        });

        manifests[slot].delivery_items.push(DeliveryItem {
            component_group: row.component_group.clone(),
            total_quantity: row.total_quantity.unwrap_or(0),
            item_type: row.item_type.clone(),
            remark: row.remark.clone(),
            size: row.size,
        });
    }

    for manifest in &mut manifests {
        manifest.delivery_items.sort_by(|a, b| {
            compare_component_groups(a.component_group.as_deref(), b.component_group.as_deref())
        });
    }
    manifests
}

/// 路线汇总行
///
/// 主菜大份计入 large_qty,其余非空组计入 regular_qty; 空组不汇总
pub fn route_summary_lines(manifests: &[DeliveryManifest]) -> Vec<RouteSummaryLine> {
    let mut by_group: BTreeMap<String, RouteSummaryLine> = BTreeMap::new();

    for item in manifests.iter().flat_map(|m| m.delivery_items.iter()) {
        let group = match item.component_group.as_deref() {
            Some(g) if !g.is_empty() => g,
            _ => continue,
        };
        let line = by_group
            .entry(group.to_string())
            .or_insert_with(|| RouteSummaryLine {
                component_group: group.to_string(),
                regular_qty: 0,
                large_qty: 0,
            });
        if component_group::is_main_dish(group) && item.size == Some(MealSize::Large) {
            line.large_qty += item.total_quantity;
        } else {
            line.regular_qty += item.total_quantity;
        }
    }

    let mut lines: Vec<RouteSummaryLine> = by_group.into_values().collect();
    lines.sort_by(|a, b| {
        component_group_rank(Some(&a.component_group))
            .cmp(&component_group_rank(Some(&b.component_group)))
    });
    lines
}
