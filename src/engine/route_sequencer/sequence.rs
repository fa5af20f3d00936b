// ==========================================
// 按已保存顺序重排
// ==========================================
// 1. 已保存顺序中存在的 id,按保存顺序
// 2. 其余条目按原出现顺序追加
// 已保存但当前不存在的 id 直接跳过
// ==========================================

use std::collections::HashMap;
use std::hash::Hash;

/// 按 key 的已保存顺序重排条目
pub fn reorder_by_sequence<T, K, F>(items: Vec<T>, sequence: &[K], key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut position: HashMap<K, usize> = HashMap::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        position.entry(key(item)).or_insert(i);
    }

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(slots.len());

    for k in sequence {
        if let Some(&i) = position.get(k) {
            if let Some(item) = slots[i].take() {
                ordered.push(item);
            }
        }
    }
    ordered.extend(slots.into_iter().flatten());
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_first_then_remaining() {
        let items = vec!['A', 'B', 'C'];
        let ordered = reorder_by_sequence(items, &['C', 'A'], |c| *c);
        assert_eq!(ordered, vec!['C', 'A', 'B']);
    }

    #[test]
    fn test_missing_and_repeated_ids_skipped() {
        let items = vec![10, 20, 30, 40];
        let ordered = reorder_by_sequence(items, &[99, 30, 30, 10], |n| *n);
        assert_eq!(ordered, vec![30, 10, 20, 40]);
    }

    #[test]
    fn test_empty_sequence_keeps_encounter_order() {
        let items = vec![3, 1, 2];
        assert_eq!(reorder_by_sequence(items, &[], |n| *n), vec![3, 1, 2]);
    }
}
