//! 锦标赛选择

use super::Selection;
use crate::individual::Individual;
use rand::Rng;

/// 有放回地随机抽取 size 个个体，返回前沿序号最小的那个
///
/// 只有严格更小才会替换，所以序号相同时先抽到的获胜；两个亲本可以是同一个个体
#[derive(Debug, Clone, Copy)]
pub struct TournamentSelector {
    pub size: usize,
}

impl TournamentSelector {
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl Selection for TournamentSelector {
    fn select<R: Rng + ?Sized>(&self, population: &[Individual], rng: &mut R) -> usize {
        let rank = |i: usize| population[i].rank.unwrap_or(usize::MAX);
        let mut best = rng.random_range(0..population.len());
        for _ in 1..self.size {
            let challenger = rng.random_range(0..population.len());
            if rank(challenger) < rank(best) {
                best = challenger;
            }
        }
        best
    }
}
