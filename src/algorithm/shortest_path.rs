//! 最短路径算法
//!
//! 单源 Dijkstra，要求所有边权重非负（调用方保证，不做运行时检查）

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexKey, Weight};
use priority_queue::PriorityQueue;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info, trace};

/// 不可达时返回的距离
pub const UNREACHABLE: Weight = -1;

/// 最短路径结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPath<V> {
    /// 从起点到终点（含两端）的顶点序列，不可达时为空
    pub vertices: Vec<V>,
    /// 总距离（饱和累加），不可达时为 -1
    pub distance: Weight,
}

impl<V> ShortestPath<V> {
    /// 不可达结果
    pub fn unreachable() -> Self {
        Self {
            vertices: Vec::new(),
            distance: UNREACHABLE,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.distance != UNREACHABLE
    }

    /// 路径经过的边数
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// 拆分为 (顶点序列, 距离)
    pub fn into_parts(self) -> (Vec<V>, Weight) {
        (self.vertices, self.distance)
    }
}

/// Dijkstra 搜索的中间状态
struct Search<'g, V> {
    /// 已发现顶点的当前最短距离
    distances: HashMap<&'g V, Weight>,
    /// 最短路径树中的前驱
    parents: HashMap<&'g V, &'g V>,
}

/// 路径查找器
pub struct PathFinder<'g, V: VertexKey> {
    graph: &'g Graph<V>,
    verbose: bool,
}

impl<'g, V: VertexKey> PathFinder<'g, V> {
    /// 创建路径查找器
    pub fn new(graph: &'g Graph<V>) -> Self {
        Self {
            graph,
            verbose: false,
        }
    }

    /// 设置是否输出结果（info 级别日志）
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// 计算 start 到 end 的最短路径
    ///
    /// 起点或终点不在图中时返回 [`Error::VertexNotFound`]；
    /// 不可达时返回空路径与距离 -1。
    pub fn shortest_path(&self, start: &V, end: &V) -> Result<ShortestPath<V>> {
        let start = self.lookup(start)?;
        let end = self.lookup(end)?;

        if start == end {
            let path = ShortestPath {
                vertices: vec![start.clone()],
                distance: 0,
            };
            self.report(start, end, &path);
            return Ok(path);
        }

        let search = self.search(start, Some(end));
        let path = match search.distances.get(end) {
            Some(&distance) => ShortestPath {
                vertices: Self::reconstruct_path(start, end, &search.parents),
                distance,
            },
            None => ShortestPath::unreachable(),
        };

        self.report(start, end, &path);
        Ok(path)
    }

    /// 计算 start 到所有可达顶点的最短距离
    pub fn distances_from(&self, start: &V) -> Result<BTreeMap<V, Weight>> {
        let start = self.lookup(start)?;
        let search = self.search(start, None);

        Ok(search
            .distances
            .into_iter()
            .map(|(v, d)| (v.clone(), d))
            .collect())
    }

    /// 判断两点是否连通
    pub fn is_reachable(&self, start: &V, end: &V) -> Result<bool> {
        Ok(self.shortest_path(start, end)?.is_reachable())
    }

    /// 获取图中的顶点引用
    fn lookup(&self, v: &V) -> Result<&'g V> {
        self.graph
            .adjacency()
            .get_key_value(v)
            .map(|(key, _)| key)
            .ok_or_else(|| Error::VertexNotFound(format!("{:?}", v)))
    }

    /// Dijkstra 主循环；指定 target 时在其出队后提前结束
    fn search(&self, start: &'g V, target: Option<&'g V>) -> Search<'g, V> {
        let adjacency = self.graph.adjacency();
        let mut distances: HashMap<&'g V, Weight> = HashMap::new();
        let mut parents: HashMap<&'g V, &'g V> = HashMap::new();
        let mut settled: HashSet<&'g V> = HashSet::new();
        let mut frontier: PriorityQueue<&'g V, Reverse<Weight>> = PriorityQueue::new();

        distances.insert(start, 0);
        frontier.push(start, Reverse(0));

        while let Some((u, Reverse(dist_u))) = frontier.pop() {
            settled.insert(u);
            if target == Some(u) {
                break;
            }

            let Some(neighbors) = adjacency.get(u) else {
                continue;
            };
            for (v, weight) in neighbors.iter() {
                if settled.contains(v) {
                    continue;
                }

                let candidate = dist_u.saturating_add(*weight);
                if distances.get(v).map_or(true, |&d| candidate < d) {
                    trace!(from = ?u, to = ?v, distance = candidate, "Dijkstra 松弛");
                    distances.insert(v, candidate);
                    parents.insert(v, u);
                    frontier.push_increase(v, Reverse(candidate));
                }
            }
        }

        debug!(settled = settled.len(), "Dijkstra 搜索结束");
        Search { distances, parents }
    }

    /// 沿前驱指针重构路径
    fn reconstruct_path(start: &V, end: &'g V, parents: &HashMap<&'g V, &'g V>) -> Vec<V> {
        let mut vertices = vec![end.clone()];
        let mut current = end;

        while current != start {
            match parents.get(current) {
                Some(&prev) => {
                    vertices.push(prev.clone());
                    current = prev;
                }
                None => break,
            }
        }

        vertices.reverse();
        vertices
    }

    fn report(&self, start: &V, end: &V, path: &ShortestPath<V>) {
        if !path.is_reachable() {
            if self.verbose {
                info!(start = ?start, end = ?end, "无可达路径");
            } else {
                debug!(start = ?start, end = ?end, "无可达路径");
            }
            return;
        }

        if self.verbose {
            info!(path = ?path.vertices, distance = path.distance, "最短路径");
        } else {
            debug!(hops = path.hops(), distance = path.distance, "最短路径");
        }
    }
}
