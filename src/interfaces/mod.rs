use crate::individual::Individual;
use serde::Serialize;

pub mod command_line;

/// 向用户反馈的消息类型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    Initialized {
        population_size: usize,
        discarded: usize,
    },
    Epoch {
        epoch: usize,
        fronts: usize,
        front_size: usize,
        least_time: f64,
        best_profit: f64,
        /// 每个个体的 `[time, -profit]`
        objectives: Vec<[f64; 2]>,
    },
    Elapsed {
        time: u64,
    },
    CloneRetryLimit {
        retries: usize,
    },
    Finished {
        front: Vec<Individual>,
    },
}

/// 定义了向用户报告消息的接口，用于统一不同的输出方式
///
/// 命令行界面、测试等只需要各自实现 send 方法，就可向用户报告优化过程
pub trait Interface {
    fn send(&self, message: Message);
}

/// 丢弃所有消息
pub struct Silent;

impl Interface for Silent {
    fn send(&self, _message: Message) {}
}
