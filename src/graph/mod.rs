//! 图核心模块
//!
//! 定义顶点标识、邻接表和加权图的核心数据结构

mod graph;
mod vertex;

pub use graph::Graph;
pub use vertex::{Neighbors, VertexKey, Weight, DEFAULT_WEIGHT};
