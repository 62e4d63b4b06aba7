//! RouteGraph CLI 工具
//!
//! 加载边列表文件并运行最小生成树或最短路径算法

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use routegraph::cli::{PrintMode, Printer};
use routegraph::{EdgeListFormat, EdgeListImporter, Graph, ImportOptions, MstAlgorithm};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "routegraph-cli")]
#[command(about = "RouteGraph 加权图算法命令行工具", version)]
struct Args {
    /// 边列表文件路径
    #[arg(short, long)]
    input: PathBuf,

    /// 输入格式: csv, tsv, jsonl（默认按扩展名推断）
    #[arg(short, long)]
    format: Option<EdgeListFormat>,

    /// 按有向图加载
    #[arg(short = 'D', long)]
    directed: bool,

    /// CSV 分隔符
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// CSV 文件没有表头
    #[arg(long)]
    no_header: bool,

    /// 跳过无法解析的记录
    #[arg(long)]
    skip_invalid: bool,

    /// 输出算法过程与结果日志
    #[arg(short, long)]
    verbose: bool,

    /// 日志过滤规则（优先于 RUST_LOG）
    #[arg(long)]
    log_level: Option<String>,

    /// 输出模式: table, vertical, json
    #[arg(short, long, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 显示邻接表
    Show,
    /// 显示图统计信息
    Stats,
    /// 计算最小生成树（默认运行全部三种算法）
    Mst {
        /// 算法: prim, kruskal, boruvka
        #[arg(short, long)]
        algorithm: Option<MstAlgorithm>,
    },
    /// 计算最短路径
    Path {
        /// 起点
        from: String,
        /// 终点
        to: String,
    },
}

fn init_logging(args: &Args) {
    let filter = args
        .log_level
        .as_deref()
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| {
            EnvFilter::new(if args.verbose {
                "routegraph=info"
            } else {
                "routegraph=warn"
            })
        });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_mode(output: &str) -> anyhow::Result<PrintMode> {
    match output.to_lowercase().as_str() {
        "table" => Ok(PrintMode::Table),
        "vertical" => Ok(PrintMode::Vertical),
        "json" => Ok(PrintMode::Json),
        other => bail!("不支持的输出模式: {}", other),
    }
}

fn load_graph(args: &Args) -> anyhow::Result<Graph<String>> {
    if !args.delimiter.is_ascii() {
        bail!("分隔符必须是 ASCII 字符: {:?}", args.delimiter);
    }

    let format = args
        .format
        .or_else(|| EdgeListFormat::from_path(&args.input))
        .unwrap_or(EdgeListFormat::Csv);

    let options = ImportOptions::default()
        .directed(args.directed)
        .delimiter(args.delimiter as u8)
        .has_headers(!args.no_header)
        .skip_invalid(args.skip_invalid);

    let (graph, stats) = EdgeListImporter::new(options)
        .import(&args.input, format)
        .with_context(|| format!("无法加载边列表 {:?}", args.input))?;

    info!(
        vertices = graph.vertex_count(),
        edges = stats.edges_imported,
        skipped = stats.errors,
        duration_ms = stats.duration_ms,
        "边列表已加载"
    );
    Ok(graph)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let printer = Printer::new(parse_mode(&args.output)?);
    let graph = load_graph(&args)?;

    match &args.command {
        Command::Show => print!("{}", printer.print_adjacency(&graph)?),

        Command::Stats => print!("{}", printer.print_stats(&graph)?),

        Command::Mst { algorithm } => {
            let algorithms = match algorithm {
                Some(algorithm) => vec![*algorithm],
                None => MstAlgorithm::ALL.to_vec(),
            };
            for algorithm in algorithms {
                let start = Instant::now();
                let tree = graph.mst(algorithm, args.verbose);
                let elapsed_ms = start.elapsed().as_millis() as u64;
                println!("{}", printer.print_tree(algorithm, &tree, elapsed_ms)?);
            }
        }

        Command::Path { from, to } => {
            let start = Instant::now();
            let path = graph.shortest_path(from, to, args.verbose)?;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            print!("{}", printer.print_path(from, to, &path, elapsed_ms)?);
        }
    }

    Ok(())
}
