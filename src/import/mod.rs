//! 边列表导入模块
//!
//! 从 CSV、TSV 或 JSON Lines 文件读取边列表并构建内存图。
//! 只读输入，图不会被写回文件。

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexKey, Weight, DEFAULT_WEIGHT};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, warn};

/// 边列表格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeListFormat {
    Csv,
    /// 制表符分隔，忽略 [`ImportOptions::delimiter`]
    Tsv,
    Jsonl,
}

impl EdgeListFormat {
    /// 按文件扩展名推断格式，无法识别时为 None
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        ext.parse().ok()
    }
}

impl FromStr for EdgeListFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            // 单个 JSON 文档不是逐行记录，不按 JSONL 读取
            "jsonl" | "ndjson" => Ok(Self::Jsonl),
            other => Err(Error::ParseError(format!("不支持的格式: {}", other))),
        }
    }
}

/// 导入选项
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// 按有向图构建
    pub directed: bool,
    /// CSV 分隔符
    pub delimiter: u8,
    /// CSV 首行是否为表头
    pub has_headers: bool,
    /// 跳过无法解析的记录而不是报错
    pub skip_invalid: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            directed: false,
            delimiter: b',',
            has_headers: true,
            skip_invalid: false,
        }
    }
}

impl ImportOptions {
    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    pub fn skip_invalid(mut self, skip_invalid: bool) -> Self {
        self.skip_invalid = skip_invalid;
        self
    }
}

/// 导入统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub edges_imported: usize,
    pub self_loops: usize,
    pub errors: usize,
    pub duration_ms: u64,
}

/// 边记录：缺省权重为 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord<V> {
    pub source: V,
    pub target: V,
    #[serde(default)]
    pub weight: Option<Weight>,
}

impl<V> EdgeRecord<V> {
    pub fn weight(&self) -> Weight {
        self.weight.unwrap_or(DEFAULT_WEIGHT)
    }
}

/// 边列表导入器
#[derive(Debug, Clone, Default)]
pub struct EdgeListImporter {
    options: ImportOptions,
}

impl EdgeListImporter {
    /// 创建导入器
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// 按指定格式导入文件
    pub fn import<V, P>(&self, path: P, format: EdgeListFormat) -> Result<(Graph<V>, ImportStats)>
    where
        V: VertexKey + DeserializeOwned,
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        match format {
            EdgeListFormat::Csv => self.read_csv(file),
            EdgeListFormat::Tsv => self.read_tsv(file),
            EdgeListFormat::Jsonl => self.read_jsonl(BufReader::new(file)),
        }
    }

    /// 从 CSV 读取（列: source,target,weight）
    pub fn read_csv<V, R>(&self, reader: R) -> Result<(Graph<V>, ImportStats)>
    where
        V: VertexKey + DeserializeOwned,
        R: Read,
    {
        self.read_delimited(reader, self.options.delimiter)
    }

    /// 从 TSV 读取，列与 CSV 相同
    pub fn read_tsv<V, R>(&self, reader: R) -> Result<(Graph<V>, ImportStats)>
    where
        V: VertexKey + DeserializeOwned,
        R: Read,
    {
        self.read_delimited(reader, b'\t')
    }

    fn read_delimited<V, R>(&self, reader: R, delimiter: u8) -> Result<(Graph<V>, ImportStats)>
    where
        V: VertexKey + DeserializeOwned,
        R: Read,
    {
        let start = Instant::now();
        let mut graph = Graph::new(self.options.directed);
        let mut stats = ImportStats::default();

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.options.has_headers)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        for (index, record) in csv_reader.deserialize::<EdgeRecord<V>>().enumerate() {
            match record {
                Ok(record) => Self::insert(&mut graph, &mut stats, record),
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(index as u64 + 1);
                    self.reject(&mut stats, line, e.to_string())?;
                }
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        debug!(?stats, delimiter = ?(delimiter as char), "分隔符边列表导入完成");
        Ok((graph, stats))
    }

    /// 从 JSON Lines 读取（每行一个 {"source", "target", "weight"} 对象，空行跳过）
    pub fn read_jsonl<V, R>(&self, reader: R) -> Result<(Graph<V>, ImportStats)>
    where
        V: VertexKey + DeserializeOwned,
        R: BufRead,
    {
        let start = Instant::now();
        let mut graph = Graph::new(self.options.directed);
        let mut stats = ImportStats::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<EdgeRecord<V>>(&line) {
                Ok(record) => Self::insert(&mut graph, &mut stats, record),
                Err(e) => self.reject(&mut stats, index as u64 + 1, e.to_string())?,
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        debug!(?stats, "JSONL 边列表导入完成");
        Ok((graph, stats))
    }

    fn insert<V: VertexKey>(graph: &mut Graph<V>, stats: &mut ImportStats, record: EdgeRecord<V>) {
        let weight = record.weight();
        if record.source == record.target {
            stats.self_loops += 1;
        }
        graph.add_edge(record.source, record.target, weight);
        stats.edges_imported += 1;
    }

    /// 处理无法解析的记录：严格模式报错，否则计数并跳过
    fn reject(&self, stats: &mut ImportStats, line: u64, reason: String) -> Result<()> {
        if !self.options.skip_invalid {
            return Err(Error::ParseError(format!("第 {} 行: {}", line, reason)));
        }
        warn!(line, %reason, "跳过无法解析的边记录");
        stats.errors += 1;
        Ok(())
    }
}

/// 按扩展名推断格式并导入（无法推断时按 CSV 处理）
pub fn import_edge_list<V, P>(path: P, options: ImportOptions) -> Result<(Graph<V>, ImportStats)>
where
    V: VertexKey + DeserializeOwned,
    P: AsRef<Path>,
{
    let format = EdgeListFormat::from_path(&path).unwrap_or(EdgeListFormat::Csv);
    EdgeListImporter::new(options).import(path, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_read_csv() {
        let data = "source,target,weight\n1,2,5\n2,3,\n3,3,4\n";
        let importer = EdgeListImporter::default();
        let (graph, stats) = importer.read_csv::<i32, _>(data.as_bytes()).unwrap();

        assert_eq!(stats.edges_imported, 3);
        assert_eq!(stats.self_loops, 1);
        assert_eq!(graph.neighbors(&1), Some(&[(2, 5)][..]));
        assert_eq!(graph.neighbors(&2), Some(&[(1, 5), (3, 1)][..]));
        assert_eq!(graph.neighbors(&3), Some(&[(2, 1), (3, 4)][..]));
    }

    #[test]
    fn test_read_csv_without_weight_column() {
        let data = "source,target\na,b\nb,c\n";
        let importer = EdgeListImporter::new(ImportOptions::default().directed(true));
        let (graph, _) = importer.read_csv::<String, _>(data.as_bytes()).unwrap();

        assert!(graph.is_directed());
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(
            graph.neighbors(&"a".to_string()),
            Some(&[("b".to_string(), 1)][..])
        );
    }

    #[test]
    fn test_read_csv_invalid_weight() {
        let data = "source,target,weight\n1,2,5\n2,3,heavy\n";
        let importer = EdgeListImporter::default();

        let err = importer.read_csv::<i32, _>(data.as_bytes()).unwrap_err();
        match err {
            Error::ParseError(msg) => assert!(msg.contains("第 3 行"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }

        let lenient = EdgeListImporter::new(ImportOptions::default().skip_invalid(true));
        let (graph, stats) = lenient.read_csv::<i32, _>(data.as_bytes()).unwrap();
        assert_eq!(stats.errors, 1);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_read_jsonl() {
        let data = concat!(
            r#"{"source": "depot", "target": "harbor", "weight": 12}"#,
            "\n\n",
            r#"{"source": "harbor", "target": "airport"}"#,
            "\n"
        );
        let importer = EdgeListImporter::default();
        let (graph, stats) = importer
            .read_jsonl::<String, _>(Cursor::new(data))
            .unwrap();

        assert_eq!(stats.edges_imported, 2);
        assert_eq!(graph.vertex_count(), 3);
        assert!(graph.contains_edge(&"airport".to_string(), &"harbor".to_string()));
    }

    #[test]
    fn test_read_jsonl_invalid_line() {
        let data = "{\"source\": 1, \"target\": 2}\n{\"source\": 1}\n";
        let err = EdgeListImporter::default()
            .read_jsonl::<u32, _>(Cursor::new(data))
            .unwrap_err();
        assert!(matches!(err, Error::ParseError(ref msg) if msg.contains("第 2 行")));
    }

    #[test]
    fn test_import_edge_list_from_file() {
        let mut file = tempfile::Builder::new().suffix(".jsonl").tempfile().unwrap();
        writeln!(file, r#"{{"source": 1, "target": 2, "weight": 3}}"#).unwrap();
        writeln!(file, r#"{{"source": 2, "target": 3, "weight": 4}}"#).unwrap();

        let (graph, stats) = import_edge_list::<u32, _>(file.path(), ImportOptions::default()).unwrap();
        assert_eq!(stats.edges_imported, 2);
        assert_eq!(graph.mst_kruskal(false).total_weight, 7);
    }

    #[test]
    fn test_import_tsv_file() {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        write!(file, "source\ttarget\tweight\n1\t2\t5\n2\t3\t\n").unwrap();

        let (graph, stats) = import_edge_list::<u32, _>(file.path(), ImportOptions::default()).unwrap();
        assert_eq!(stats.edges_imported, 2);
        assert_eq!(graph.neighbors(&1), Some(&[(2, 5)][..]));
        assert_eq!(graph.neighbors(&3), Some(&[(2, 1)][..]));
    }

    #[test]
    fn test_read_tsv_ignores_csv_delimiter() {
        let data = "1\t2\t7\n";
        let importer = EdgeListImporter::new(
            ImportOptions::default().has_headers(false).delimiter(b';'),
        );
        let (graph, _) = importer.read_tsv::<i32, _>(data.as_bytes()).unwrap();
        assert_eq!(graph.neighbors(&2), Some(&[(1, 7)][..]));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(EdgeListFormat::from_path("edges.CSV"), Some(EdgeListFormat::Csv));
        assert_eq!(EdgeListFormat::from_path("edges.tsv"), Some(EdgeListFormat::Tsv));
        assert_eq!(EdgeListFormat::from_path("edges.ndjson"), Some(EdgeListFormat::Jsonl));
        assert_eq!(EdgeListFormat::from_path("edges.json"), None);
        assert!("json".parse::<EdgeListFormat>().is_err());
        assert_eq!(EdgeListFormat::from_path("edges.txt"), None);
        assert_eq!(EdgeListFormat::from_path("edges"), None);
    }
}
