//! RouteGraph - 路线规划加权图引擎
//!
//! 支持增量修改的通用加权图，提供：
//! - 顶点与边的增删（有向 / 无向）
//! - 最小生成树：Prim、Kruskal、Borůvka
//! - Dijkstra 单源最短路径
//! - CSV / JSON Lines 边列表导入

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod import;

// 重导出常用类型
pub use algorithm::{
    MstAlgorithm, PathFinder, ShortestPath, SpanningTree, SpanningTreeBuilder, UnionFind,
    UNREACHABLE,
};
pub use error::{Error, Result};
pub use graph::{Graph, Neighbors, VertexKey, Weight, DEFAULT_WEIGHT};
pub use import::{import_edge_list, EdgeListFormat, EdgeListImporter, ImportOptions, ImportStats};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
