//! 结果打印器
//!
//! 提供表格、垂直和 JSON 格式的算法结果输出

use crate::algorithm::{MstAlgorithm, ShortestPath, SpanningTree};
use crate::error::Result;
use crate::graph::{Graph, VertexKey, Weight};
use colored::Colorize;
use prettytable::{format, row, Cell, Row, Table};
use serde::Serialize;
use std::fmt::Display;

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式
    Vertical,
    /// JSON 模式
    Json,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 打印邻接表
    pub fn print_adjacency<V>(&self, graph: &Graph<V>) -> Result<String>
    where
        V: VertexKey + Display + Serialize,
    {
        if self.mode == PrintMode::Json {
            let adjacency: Vec<(&V, Vec<&(V, Weight)>)> = graph
                .adjacency()
                .iter()
                .map(|(v, neighbors)| (v, neighbors.iter().collect()))
                .collect();
            return Ok(serde_json::to_string_pretty(&adjacency)?);
        }

        let columns = vec!["Vertex".to_string(), "Neighbors (to, weight)".to_string()];
        let rows: Vec<Vec<String>> = graph
            .adjacency()
            .iter()
            .map(|(v, neighbors)| {
                let list = neighbors
                    .iter()
                    .map(|(to, w)| format!("({}, {})", to, w))
                    .collect::<Vec<_>>()
                    .join(" ");
                vec![v.to_string(), list]
            })
            .collect();

        Ok(self.print_result(&columns, &rows, None))
    }

    /// 打印生成树
    pub fn print_tree<V>(
        &self,
        algorithm: MstAlgorithm,
        tree: &SpanningTree<V>,
        elapsed_ms: u64,
    ) -> Result<String>
    where
        V: VertexKey + Display + Serialize,
    {
        if self.mode == PrintMode::Json {
            return Ok(serde_json::to_string_pretty(&serde_json::json!({
                "algorithm": algorithm,
                "edges": tree.edges,
                "total_weight": tree.total_weight,
            }))?);
        }

        let columns = vec!["From".to_string(), "To".to_string()];
        let rows: Vec<Vec<String>> = tree
            .edges
            .iter()
            .map(|(u, v)| vec![u.to_string(), v.to_string()])
            .collect();

        Ok(format!(
            "{}\n{}Total weight = {}\n",
            format!("{} MST edges:", algorithm).bold(),
            self.print_result(&columns, &rows, Some(elapsed_ms)),
            tree.total_weight
        ))
    }

    /// 打印最短路径
    pub fn print_path<V>(
        &self,
        from: &V,
        to: &V,
        path: &ShortestPath<V>,
        elapsed_ms: u64,
    ) -> Result<String>
    where
        V: VertexKey + Display + Serialize,
    {
        if self.mode == PrintMode::Json {
            return Ok(serde_json::to_string_pretty(path)?);
        }

        if !path.is_reachable() {
            return Ok(format!("No path from {} to {} ({} ms)\n", from, to, elapsed_ms));
        }

        let route = path
            .vertices
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");

        Ok(format!(
            "{} {}\nTotal distance: {}\n{} hop(s) ({} ms)\n",
            "Shortest path:".bold(),
            route,
            path.distance,
            path.hops(),
            elapsed_ms
        ))
    }

    /// 打印统计信息
    pub fn print_stats<V: VertexKey>(&self, graph: &Graph<V>) -> Result<String> {
        if self.mode == PrintMode::Json {
            return Ok(serde_json::to_string_pretty(&serde_json::json!({
                "directed": graph.is_directed(),
                "vertex_count": graph.vertex_count(),
                "edge_count": graph.edge_count(),
            }))?);
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Directed", graph.is_directed().to_string()]);
        table.add_row(row!["Vertex Count", graph.vertex_count().to_string()]);
        table.add_row(row!["Edge Count", graph.edge_count().to_string()]);
        Ok(table.to_string())
    }

    /// 打印行列结果
    pub fn print_result(
        &self,
        columns: &[String],
        rows: &[Vec<String>],
        elapsed_ms: Option<u64>,
    ) -> String {
        let timing = elapsed_ms.map(|ms| format!(" ({} ms)", ms)).unwrap_or_default();
        if columns.is_empty() || rows.is_empty() {
            return format!("Empty set{}\n", timing);
        }

        let output = match self.mode {
            PrintMode::Vertical => self.format_vertical(columns, rows),
            _ => self.format_table(columns, rows),
        };

        format!("{}\n{} row(s) in set{}\n", output, rows.len(), timing)
    }

    /// 表格格式
    fn format_table(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 垂直格式
    fn format_vertical(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. row ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }
}
