// ==========================================
// 送餐服务核心 - 引擎层错误类型
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("途经点数量超出求解上限: stops={stops}, max_stops={max_stops}")]
    TooManyStops { stops: usize, max_stops: usize },

    #[error("途经点坐标无效: id={id:?}")]
    InvalidCoordinates { id: Option<i64> },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
