//! 遗传算子接口，以及选择、杂交、变异的默认实现
//!

use crate::individual::{Genotype, Individual};
use crate::Error;
use rand::Rng;

pub mod crossover;
pub mod mutation;
pub mod selection;

pub use crossover::{CrossoverConfig, OrderUniformCrossover};
pub use mutation::{MutationConfig, RouteMutation, SwapOrReversal};
pub use selection::TournamentSelector;

pub trait Selection {
    /// 从已分层的种群中选出一个亲本，返回它在种群中的位置
    fn select<R: Rng + ?Sized>(&self, population: &[Individual], rng: &mut R) -> usize;
}

pub trait Crossover {
    /// 由两个亲本产生两个子代，只做重组，不做变异
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &Genotype,
        parent2: &Genotype,
        rng: &mut R,
    ) -> Result<(Genotype, Genotype), Error>;
}

pub trait Mutation {
    /// 原地扰动一批基因型
    /// 返回这一批共用的路线反转区间 `(start, end)`；交换模式或没有反转时返回 None
    fn mutate<R: Rng + ?Sized>(&self, batch: &mut [Genotype], rng: &mut R) -> Option<(usize, usize)>;
}
