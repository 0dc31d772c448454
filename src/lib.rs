//! libntga 是使用 Rust 实现的旅行小偷问题（Traveling Thief Problem）的多目标优化算法。
//!
//! 旅行小偷问题要求同时决定城市的访问顺序（路线）和沿途拿取哪些物品（装包方案），使总用时尽量短、总收益尽量高。本库实现了非支配锦标赛遗传算法（NTGA）：帕累托分层、锦标赛选择、双基因组杂交与变异、防克隆以及世代循环。
//!
//! 问题实例的读取和目标值的计算不属于本库，使用者需要实现 [`problems::Problem`] 特征。

pub mod config;
pub mod individual;
pub mod interfaces;
pub mod operators;
pub mod optimizers;
pub mod problems;
pub mod ranking;

use std::fmt;

/// 错误类型
#[derive(Debug, Clone)]
pub struct Error {
    pub message: String,
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Self { message: value }
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self {
            message: format!("读写文件失败：{value}"),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(value: serde_yaml::Error) -> Self {
        Self {
            message: format!("配置文件格式错误：{value}"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
