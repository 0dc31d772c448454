//! 优化方法，目前只有非支配锦标赛遗传算法
//!

use crate::individual::Individual;

pub mod clone_guard;
pub mod genetic;

/// 优化的结果
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// 最后一代的完整种群，已经分层并计算了拥挤距离
    pub population: Vec<Individual>,
    /// 最后一代的非支配前沿，按展示顺序排列
    pub front: Vec<Individual>,
}
