//! 图数据结构
//!
//! 基于有序邻接表的加权图，支持增量增删顶点与边

use super::vertex::{Neighbors, VertexKey, Weight, DEFAULT_WEIGHT};
use crate::algorithm::{MstAlgorithm, PathFinder, ShortestPath, SpanningTree, SpanningTreeBuilder};
use crate::error::Result;
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

/// 加权图
///
/// 邻接表以顶点为键有序存储，每个顶点的邻居列表保持插入顺序。
/// 无向图中的边 (u, v, w)（u != v）同时出现在 u 和 v 的邻居列表中；
/// 自环只存储一条，且不参与任何生成树与最短路径计算。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<V: VertexKey> {
    /// 是否为有向图（构造后不可变）
    directed: bool,
    /// 邻接表
    adjacency: BTreeMap<V, Neighbors<V>>,
}

impl<V: VertexKey> Default for Graph<V> {
    fn default() -> Self {
        Self::new(false)
    }
}

impl<V: VertexKey> Graph<V> {
    /// 创建空图
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            adjacency: BTreeMap::new(),
        }
    }

    /// 创建空的有向图
    pub fn directed() -> Self {
        Self::new(true)
    }

    /// 创建空的无向图
    pub fn undirected() -> Self {
        Self::new(false)
    }

    /// 从 (u, v, w) 边序列构建图
    pub fn from_edges<I>(directed: bool, edges: I) -> Self
    where
        I: IntoIterator<Item = (V, V, Weight)>,
    {
        let mut graph = Self::new(directed);
        graph.extend(edges);
        graph
    }

    /// 是否为有向图
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点（已存在时不做任何事）
    pub fn add_vertex(&mut self, v: V) {
        self.adjacency.entry(v).or_default();
    }

    /// 删除顶点及所有指向它的边
    pub fn remove_vertex(&mut self, v: &V) {
        if self.adjacency.remove(v).is_none() {
            trace!(vertex = ?v, "删除的顶点不存在");
            return;
        }

        for neighbors in self.adjacency.values_mut() {
            neighbors.retain(|entry| entry.0 != *v);
        }
    }

    /// 是否包含顶点
    pub fn contains_vertex(&self, v: &V) -> bool {
        self.adjacency.contains_key(v)
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// 图是否为空（没有顶点）
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// 按键顺序遍历所有顶点
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.adjacency.keys()
    }

    // ==================== 边操作 ====================

    /// 添加边，缺失的端点会被自动创建
    pub fn add_edge(&mut self, u: V, v: V, weight: Weight) {
        if self.directed || u == v {
            self.add_vertex(v.clone());
        } else {
            self.adjacency
                .entry(v.clone())
                .or_default()
                .push((u.clone(), weight));
        }
        self.adjacency.entry(u).or_default().push((v, weight));
    }

    /// 添加默认权重的边
    pub fn add_unit_edge(&mut self, u: V, v: V) {
        self.add_edge(u, v, DEFAULT_WEIGHT);
    }

    /// 删除 u 到 v 的所有边（无向图同时删除反向条目），不存在时不做任何事
    pub fn remove_edge(&mut self, u: &V, v: &V) {
        if let Some(neighbors) = self.adjacency.get_mut(u) {
            neighbors.retain(|entry| entry.0 != *v);
        }

        if !self.directed && u != v {
            if let Some(neighbors) = self.adjacency.get_mut(v) {
                neighbors.retain(|entry| entry.0 != *u);
            }
        }
    }

    /// 是否存在 u 到 v 的边
    pub fn contains_edge(&self, u: &V, v: &V) -> bool {
        self.adjacency
            .get(u)
            .map_or(false, |neighbors| neighbors.iter().any(|(to, _)| to == v))
    }

    /// 获取边数量（无向边与自环各计一次）
    pub fn edge_count(&self) -> usize {
        let entries: usize = self.adjacency.values().map(|n| n.len()).sum();
        if self.directed {
            return entries;
        }

        let self_loops = self
            .adjacency
            .iter()
            .map(|(u, neighbors)| neighbors.iter().filter(|(v, _)| v == u).count())
            .sum::<usize>();
        self_loops + (entries - self_loops) / 2
    }

    // ==================== 邻居查询 ====================

    /// 获取顶点的邻居列表
    pub fn neighbors(&self, v: &V) -> Option<&[(V, Weight)]> {
        self.adjacency.get(v).map(|neighbors| neighbors.as_slice())
    }

    /// 获取邻接表的只读快照
    pub fn adjacency(&self) -> &BTreeMap<V, Neighbors<V>> {
        &self.adjacency
    }

    // ==================== 图算法 ====================

    /// Prim 最小生成树
    pub fn mst_prim(&self, verbose: bool) -> SpanningTree<V> {
        SpanningTreeBuilder::new(self).verbose(verbose).prim()
    }

    /// Kruskal 最小生成树
    pub fn mst_kruskal(&self, verbose: bool) -> SpanningTree<V> {
        SpanningTreeBuilder::new(self).verbose(verbose).kruskal()
    }

    /// Borůvka 最小生成树
    pub fn mst_boruvka(&self, verbose: bool) -> SpanningTree<V> {
        SpanningTreeBuilder::new(self).verbose(verbose).boruvka()
    }

    /// 按名称选择最小生成树算法
    pub fn mst(&self, algorithm: MstAlgorithm, verbose: bool) -> SpanningTree<V> {
        SpanningTreeBuilder::new(self).verbose(verbose).build(algorithm)
    }

    /// Dijkstra 最短路径
    ///
    /// 要求所有边权重非负。起点或终点不存在时返回 [`crate::Error::VertexNotFound`]。
    pub fn shortest_path(&self, start: &V, end: &V, verbose: bool) -> Result<ShortestPath<V>> {
        PathFinder::new(self).verbose(verbose).shortest_path(start, end)
    }
}

impl<V: VertexKey> Extend<(V, V, Weight)> for Graph<V> {
    fn extend<I: IntoIterator<Item = (V, V, Weight)>>(&mut self, edges: I) {
        for (u, v, weight) in edges {
            self.add_edge(u, v, weight);
        }
    }
}

impl<V: VertexKey> FromIterator<(V, V, Weight)> for Graph<V> {
    fn from_iter<I: IntoIterator<Item = (V, V, Weight)>>(edges: I) -> Self {
        Self::from_edges(false, edges)
    }
}

impl<V: VertexKey + fmt::Display> fmt::Display for Graph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (vertex, neighbors) in &self.adjacency {
            write!(f, "{} -> ", vertex)?;
            for (to, weight) in neighbors {
                write!(f, "({}, {}) ", to, weight)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
