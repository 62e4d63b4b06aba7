//! 最小生成树算法
//!
//! 实现 Prim、Kruskal 与 Borůvka 三种构造方式。
//! 仅适用于无向图；有向图或空图返回空结果而不是错误。
//! 自环不参与计算。

use super::union_find::UnionFind;
use crate::error::Error;
use crate::graph::{Graph, VertexKey, Weight};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, trace, warn};

/// 最小生成树算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MstAlgorithm {
    Prim,
    Kruskal,
    Boruvka,
}

impl MstAlgorithm {
    /// 全部算法
    pub const ALL: [MstAlgorithm; 3] = [Self::Prim, Self::Kruskal, Self::Boruvka];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Prim => "Prim",
            Self::Kruskal => "Kruskal",
            Self::Boruvka => "Boruvka",
        }
    }
}

impl fmt::Display for MstAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MstAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prim" => Ok(Self::Prim),
            "kruskal" => Ok(Self::Kruskal),
            "boruvka" | "borůvka" => Ok(Self::Boruvka),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// 生成树（森林）结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanningTree<V> {
    /// 按加入顺序排列的树边
    pub edges: Vec<(V, V)>,
    /// 总权重（饱和累加）
    pub total_weight: Weight,
}

impl<V> Default for SpanningTree<V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<V> SpanningTree<V> {
    /// 空结果
    pub fn empty() -> Self {
        Self {
            edges: Vec::new(),
            total_weight: 0,
        }
    }

    /// 边数
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// 拆分为 (边列表, 总权重)
    pub fn into_parts(self) -> (Vec<(V, V)>, Weight) {
        (self.edges, self.total_weight)
    }

    fn push(&mut self, u: V, v: V, weight: Weight) {
        self.edges.push((u, v));
        self.total_weight = self.total_weight.saturating_add(weight);
    }
}

/// 以稠密编号表示的无向边
#[derive(Debug, Clone, Copy)]
struct IndexedEdge {
    weight: Weight,
    src: usize,
    dst: usize,
}

/// 最小生成树构造器
pub struct SpanningTreeBuilder<'g, V: VertexKey> {
    graph: &'g Graph<V>,
    verbose: bool,
}

impl<'g, V: VertexKey> SpanningTreeBuilder<'g, V> {
    /// 创建构造器
    pub fn new(graph: &'g Graph<V>) -> Self {
        Self {
            graph,
            verbose: false,
        }
    }

    /// 设置是否输出过程与结果（info 级别日志）
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// 按指定算法构造
    pub fn build(&self, algorithm: MstAlgorithm) -> SpanningTree<V> {
        match algorithm {
            MstAlgorithm::Prim => self.prim(),
            MstAlgorithm::Kruskal => self.kruskal(),
            MstAlgorithm::Boruvka => self.boruvka(),
        }
    }

    /// Prim 算法
    ///
    /// 从键序最小的顶点出发，只覆盖起点所在的连通分量。
    pub fn prim(&self) -> SpanningTree<V> {
        let mut tree = SpanningTree::empty();
        if !self.accepts(MstAlgorithm::Prim) {
            return tree;
        }

        let adjacency = self.graph.adjacency();
        let Some(start) = adjacency.keys().next() else {
            return tree;
        };

        let mut visited: HashSet<&V> = HashSet::with_capacity(adjacency.len());
        let mut frontier: BinaryHeap<Reverse<(Weight, &V, &V)>> = BinaryHeap::new();

        visited.insert(start);
        if let Some(neighbors) = adjacency.get(start) {
            for (to, weight) in neighbors.iter() {
                if !visited.contains(to) {
                    frontier.push(Reverse((*weight, start, to)));
                }
            }
        }

        while let Some(Reverse((weight, from, to))) = frontier.pop() {
            if !visited.insert(to) {
                continue;
            }

            trace!(from = ?from, to = ?to, weight, "Prim 选中边");
            tree.push(from.clone(), to.clone(), weight);

            if let Some(neighbors) = adjacency.get(to) {
                for (next, w) in neighbors.iter() {
                    if !visited.contains(next) {
                        frontier.push(Reverse((*w, to, next)));
                    }
                }
            }
        }

        if visited.len() < adjacency.len() {
            debug!(
                reached = visited.len(),
                total = adjacency.len(),
                "Prim 未覆盖全部顶点，图不连通"
            );
        }

        self.report(MstAlgorithm::Prim, &tree);
        tree
    }

    /// Kruskal 算法
    ///
    /// 按权重稳定排序后依次加入不成环的边，得到所有分量的生成森林。
    pub fn kruskal(&self) -> SpanningTree<V> {
        let mut tree = SpanningTree::empty();
        if !self.accepts(MstAlgorithm::Kruskal) {
            return tree;
        }

        let vertices: IndexSet<&V> = self.graph.vertices().collect();
        let mut edges = self.indexed_edges(&vertices);
        edges.sort_by_key(|edge| edge.weight);

        let mut components = UnionFind::new(vertices.len());
        for edge in &edges {
            if components.union(edge.src, edge.dst) {
                trace!(src = edge.src, dst = edge.dst, weight = edge.weight, "Kruskal 加入边");
                tree.push(
                    (*vertices[edge.src]).clone(),
                    (*vertices[edge.dst]).clone(),
                    edge.weight,
                );
            }
        }

        self.report(MstAlgorithm::Kruskal, &tree);
        tree
    }

    /// Borůvka 算法
    ///
    /// 每轮为每个分量找到最便宜的外连边并合并，直到只剩一个分量或某轮没有合并发生。
    pub fn boruvka(&self) -> SpanningTree<V> {
        let mut tree = SpanningTree::empty();
        if !self.accepts(MstAlgorithm::Boruvka) {
            return tree;
        }

        let vertices: IndexSet<&V> = self.graph.vertices().collect();
        let edges = self.indexed_edges(&vertices);
        let mut components = UnionFind::new(vertices.len());
        let mut round = 0usize;

        while components.component_count() > 1 {
            round += 1;

            // 每个分量根节点的最便宜外连边下标，同权时保留先出现的边
            let mut cheapest: Vec<Option<usize>> = vec![None; vertices.len()];
            for (i, edge) in edges.iter().enumerate() {
                let root_src = components.find(edge.src);
                let root_dst = components.find(edge.dst);
                if root_src == root_dst {
                    continue;
                }

                for root in [root_src, root_dst] {
                    match cheapest[root] {
                        Some(j) if edges[j].weight <= edge.weight => {}
                        _ => cheapest[root] = Some(i),
                    }
                }
            }

            let mut merged = 0usize;
            for i in cheapest.into_iter().flatten() {
                let edge = edges[i];
                // 同一轮中较早的合并可能已经连通了这两个分量
                if components.union(edge.src, edge.dst) {
                    tree.push(
                        (*vertices[edge.src]).clone(),
                        (*vertices[edge.dst]).clone(),
                        edge.weight,
                    );
                    merged += 1;
                }
            }

            debug!(
                round,
                merged,
                components = components.component_count(),
                "Borůvka 轮次完成"
            );

            if merged == 0 {
                break;
            }
        }

        self.report(MstAlgorithm::Boruvka, &tree);
        tree
    }

    /// 检查算法前提：非空、无向
    fn accepts(&self, algorithm: MstAlgorithm) -> bool {
        if self.graph.is_empty() {
            if self.verbose {
                warn!(%algorithm, "图为空");
            }
            return false;
        }
        if self.graph.is_directed() {
            if self.verbose {
                warn!(%algorithm, "{} 算法仅适用于无向图", algorithm);
            }
            return false;
        }
        true
    }

    /// 去重后的无向边列表（每条边一次，排除自环），按邻接表遍历顺序排列
    fn indexed_edges(&self, vertices: &IndexSet<&V>) -> Vec<IndexedEdge> {
        let mut edges = Vec::new();
        for (u, neighbors) in self.graph.adjacency() {
            let Some(src) = vertices.get_index_of(u) else {
                continue;
            };
            // 无向边在两端各存一份，只从键序较小的一端取
            for (v, weight) in neighbors.iter().filter(|(v, _)| u < v) {
                if let Some(dst) = vertices.get_index_of(v) {
                    edges.push(IndexedEdge {
                        weight: *weight,
                        src,
                        dst,
                    });
                }
            }
        }
        edges
    }

    fn report(&self, algorithm: MstAlgorithm, tree: &SpanningTree<V>) {
        if self.verbose {
            info!(
                %algorithm,
                edges = ?tree.edges,
                total_weight = tree.total_weight,
                "最小生成树构建完成"
            );
        } else {
            debug!(
                %algorithm,
                edge_count = tree.len(),
                total_weight = tree.total_weight,
                "最小生成树构建完成"
            );
        }
    }
}
