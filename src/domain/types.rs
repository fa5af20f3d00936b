// ==========================================
// 送餐服务核心 - 领域类型定义
// ==========================================
// 依据: 订单/菜单存储层的编码约定 (size / component_group / status)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 菜品组 (Component Group)
// ==========================================
// 组名按存储层原样使用 (snake_case 字符串,如 dessert / green_salad),只有主菜组单独区分
pub mod component_group {
    /// 主菜组: 唯一区分份量大小的菜品组
    pub const MAIN_DISH: &str = "main_dish";

    /// 是否为主菜组
    pub fn is_main_dish(group: &str) -> bool {
        group == MAIN_DISH
    }
}

// ==========================================
// 份量 (Meal Size)
// ==========================================
// 存储格式: 'R' / 'L' (NULL 或空串表示未指定)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MealSize {
    Regular, // 常规份
    Large,   // 大份
}

impl fmt::Display for MealSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealSize::Regular => write!(f, "REGULAR"),
            MealSize::Large => write!(f, "LARGE"),
        }
    }
}

impl MealSize {
    /// 从数据库字符串解析份量
    ///
    /// # 返回
    /// - Some(MealSize): 'R' / 'L'
    /// - None: 空串或未知编码
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "R" => Some(MealSize::Regular),
            "L" => Some(MealSize::Large),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            MealSize::Regular => "R",
            MealSize::Large => "L",
        }
    }
}

// ==========================================
// 订单状态 (Order Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Ordered,   // 已下单 (可配送)
    Delivered, // 已送达
    NoCharge,  // 免费
    Billed,    // 已开票
    Paid,      // 已付款
}

impl OrderStatus {
    /// 从数据库字符串解析订单状态
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim() {
            "O" => Some(OrderStatus::Ordered),
            "D" => Some(OrderStatus::Delivered),
            "N" => Some(OrderStatus::NoCharge),
            "B" => Some(OrderStatus::Billed),
            "P" => Some(OrderStatus::Paid),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            OrderStatus::Ordered => "O",
            OrderStatus::Delivered => "D",
            OrderStatus::NoCharge => "N",
            OrderStatus::Billed => "B",
            OrderStatus::Paid => "P",
        }
    }
}

// ==========================================
// 路线排序模式 (Sequencing Mode)
// ==========================================
// 目前只支持平面欧氏距离; 路网距离 (骑行/驾车/步行) 尚无数据源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencingMode {
    Euclidean, // 平面欧氏距离 2-opt
}

impl fmt::Display for SequencingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequencingMode::Euclidean => write!(f, "euclidean"),
        }
    }
}

impl SequencingMode {
    /// 从调用方传入的字符串解析排序模式
    ///
    /// # 返回
    /// - Some(SequencingMode): 已支持的模式
    /// - None: 未知模式 (由 API 层转为配置错误)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "euclidean" => Some(SequencingMode::Euclidean),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_size_db_mapping() {
        assert_eq!(MealSize::from_db_str("R"), Some(MealSize::Regular));
        assert_eq!(MealSize::from_db_str("l"), Some(MealSize::Large));
        assert_eq!(MealSize::from_db_str(""), None);
        assert_eq!(MealSize::Large.to_db_str(), "L");
    }

    #[test]
    fn test_sequencing_mode_parse() {
        assert_eq!(SequencingMode::parse("Euclidean"), Some(SequencingMode::Euclidean));
        assert_eq!(SequencingMode::parse("driving"), None);
        assert_eq!(SequencingMode::parse(""), None);
    }

    #[test]
    fn test_order_status_round_trip() {
        assert_eq!(OrderStatus::from_db_str("O"), Some(OrderStatus::Ordered));
        assert_eq!(OrderStatus::Ordered.to_db_str(), "O");
        assert_eq!(OrderStatus::from_db_str("X"), None);
    }
}
