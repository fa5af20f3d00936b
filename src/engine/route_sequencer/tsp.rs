// ==========================================
// 2-opt 局部搜索 (平面欧氏距离近似)
// ==========================================
// 闭合回路: 最后一个点隐含返回第一个点
// 邻域: 反转 [start, end] 子段,start >= 1 (首点固定)
// 每轮扫描全部邻域取最优改进 (best-improvement),无改进即停止
// 比较使用距离平方和 (省去开方)
// ==========================================

use crate::domain::route::Waypoint;

/// 可参与平面距离计算的点
pub trait PlanePoint {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
}

impl PlanePoint for Waypoint {
    fn x(&self) -> f64 {
        self.latitude
    }

    fn y(&self) -> f64 {
        self.longitude
    }
}

/// 两点距离的平方
pub fn squared_distance<P: PlanePoint>(a: &P, b: &P) -> f64 {
    let dx = a.x() - b.x();
    let dy = a.y() - b.y();
    dx * dx + dy * dy
}

/// 闭合回路的距离平方和
pub fn tour_squared_length<P: PlanePoint>(tour: &[P]) -> f64 {
    match (tour.first(), tour.last()) {
        (Some(first), Some(last)) => {
            let legs: f64 = tour
                .windows(2)
                .map(|w| squared_distance(&w[0], &w[1]))
                .sum();
            legs + squared_distance(last, first)
        }
        _ => 0.0,
    }
}

// ==========================================
// TwoOptNeighbors - 惰性邻域迭代器
// ==========================================
// 每次只生成一个候选回路; 对同一回路可重新创建以重新扫描
pub struct TwoOptNeighbors<'a, P> {
    tour: &'a [P],
    start: usize,
    end: usize,
}

/// 回路的全部 2-opt 邻居
pub fn two_opt_neighbors<P>(tour: &[P]) -> TwoOptNeighbors<'_, P> {
    TwoOptNeighbors {
        tour,
        start: 1,
        end: 2,
    }
}

impl<'a, P: Clone> Iterator for TwoOptNeighbors<'a, P> {
    type Item = Vec<P>;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.tour.len();
        while self.start + 1 < len {
            if self.end < len {
                let mut candidate = self.tour.to_vec();
                candidate[self.start..=self.end].reverse();
                self.end += 1;
                return Some(candidate);
            }
            self.start += 1;
            self.end = self.start + 1;
        }
        None
    }
}

/// 2-opt 求解
///
/// 返回的回路长度不大于输入; 首点位置不变。
/// 少于 3 个点时没有可反转的子段,原样返回。
pub fn solve<P: PlanePoint + Clone>(tour: &[P]) -> Vec<P> {
    let mut best = tour.to_vec();
    let mut best_value = tour_squared_length(&best);

    loop {
        let mut sweep_best: Option<(Vec<P>, f64)> = None;
        for candidate in two_opt_neighbors(&best) {
            let value = tour_squared_length(&candidate);
            let threshold = sweep_best.as_ref().map_or(best_value, |(_, v)| *v);
            if value < threshold {
                sweep_best = Some((candidate, value));
            }
        }

        match sweep_best {
            Some((candidate, value)) if value < best_value => {
                best = candidate;
                best_value = value;
            }
            _ => break,
        }
    }
    best
}
