//! 图算法模块
//!
//! 包含最小生成树（Prim、Kruskal、Borůvka）和 Dijkstra 最短路径算法

mod shortest_path;
mod spanning_tree;
mod union_find;

pub use shortest_path::{PathFinder, ShortestPath, UNREACHABLE};
pub use spanning_tree::{MstAlgorithm, SpanningTree, SpanningTreeBuilder};
pub use union_find::UnionFind;
