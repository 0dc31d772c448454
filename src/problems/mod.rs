//! 优化问题的整体定义。
//!
//! 旅行小偷问题的实例读取和评测都由使用者提供，本库只通过这个特征来使用它们。
//!

use crate::individual::Objectives;

pub trait Problem {
    /// 城市的个数，城市编号为 `0..cities()`
    fn cities(&self) -> usize;

    /// 可拿取物品的个数
    fn items(&self) -> usize;

    /// 所有路线都从这个城市出发
    fn depot(&self) -> usize {
        0
    }

    /// 对一条路线和一个装包方案打分
    /// 不可行的方案返回 None；strict 为 true 时要求严格满足容量约束
    fn evaluate(&mut self, route: &[usize], packing: &[bool], strict: bool) -> Option<Objectives>;
}
