//! 命令行界面支持
//!
//! 结果打印与格式化

mod printer;

pub use printer::{PrintMode, Printer};
