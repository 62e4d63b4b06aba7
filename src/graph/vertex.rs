//! 顶点定义
//!
//! 顶点标识、边权重以及邻接表条目类型

use smallvec::SmallVec;
use std::fmt::Debug;
use std::hash::Hash;

/// 边权重
///
/// 生成树总权重与路径距离都按饱和加法累加：超出 `i64` 范围时停在
/// `i64::MAX`（或 `i64::MIN`），不会溢出 panic。
pub type Weight = i64;

/// 未指定权重时使用的默认值
pub const DEFAULT_WEIGHT: Weight = 1;

/// 顶点标识
///
/// 任何全序、可哈希、可克隆的值都可以作为顶点：整数、字符串等。
/// 全序决定了邻接表的遍历顺序，进而决定等权边的选择顺序；
/// 哈希用于算法内部的访问集合与优先队列。
pub trait VertexKey: Ord + Hash + Clone + Debug {}

impl<T: Ord + Hash + Clone + Debug> VertexKey for T {}

/// 单个顶点的邻居列表：(邻居, 权重)，保持插入顺序
pub type Neighbors<V> = SmallVec<[(V, Weight); 4]>;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vertex_key<V: VertexKey>() {}

    #[test]
    fn test_common_types_are_vertex_keys() {
        assert_vertex_key::<i32>();
        assert_vertex_key::<u64>();
        assert_vertex_key::<String>();
        assert_vertex_key::<&'static str>();
        assert_vertex_key::<(u8, char)>();
    }

    #[test]
    fn test_neighbors_keep_insertion_order() {
        let mut neighbors: Neighbors<u32> = Neighbors::new();
        neighbors.push((3, 7));
        neighbors.push((1, 2));
        neighbors.push((2, DEFAULT_WEIGHT));

        let order: Vec<u32> = neighbors.iter().map(|(v, _)| *v).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert!(!neighbors.spilled());
    }
}
