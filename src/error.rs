//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("顶点不存在: {0}")]
    VertexNotFound(String),

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("未知的算法: {0}")]
    UnknownAlgorithm(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV 错误: {0}")]
    CsvError(#[from] csv::Error),

    #[error("序列化错误: {0}")]
    SerializationError(#[from] serde_json::Error),
}
