//! 双基因组变异
//!
//! 装包方案总是逐位翻转；路线有两种策略：逐位随机交换，或者整批共用一个区间做反转。

use super::Mutation;
use crate::individual::Genotype;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// 路线变异的策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteMutation {
    /// 每个位置以变异率与另一个随机位置交换
    Swap,
    /// 抽取一个区间，对整批个体反转同一段
    #[default]
    Reversal,
}

#[skip_serializing_none]
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct MutationConfig {
    pub rate: Option<f64>,
    pub route: Option<RouteMutation>,
}

pub const DEFAULT_MUTATE: MutationConfig = MutationConfig {
    rate: Some(0.01),
    route: Some(RouteMutation::Reversal),
};

#[derive(Debug, Clone, Copy)]
pub struct SwapOrReversal {
    pub rate: f64,
    pub route: RouteMutation,
}

impl SwapOrReversal {
    pub fn new(rate: f64, route: RouteMutation) -> Self {
        Self { rate, route }
    }

    fn flip_packing<R: Rng + ?Sized>(&self, packing: &mut [bool], rng: &mut R) {
        for bit in packing.iter_mut() {
            if rng.random_bool(self.rate) {
                *bit = !*bit;
            }
        }
    }

    // 位置 0 是仓库，不参与交换
    fn swap_route<R: Rng + ?Sized>(&self, route: &mut [usize], rng: &mut R) {
        let size = route.len();
        if size < 3 {
            return;
        }
        for i in 1..size {
            if !rng.random_bool(self.rate) {
                continue;
            }
            let mut j = rng.random_range(1..size);
            while j == i {
                j = rng.random_range(1..size);
            }
            route.swap(i, j);
        }
    }

    fn draw_window<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Option<(usize, usize)> {
        if size < 2 {
            return None;
        }
        let start = rng.random_range(1..size);
        let length = (self.rate * size as f64).floor() as usize;
        let end = (start + length).min(size);
        Some((start, end))
    }
}

impl Mutation for SwapOrReversal {
    fn mutate<R: Rng + ?Sized>(&self, batch: &mut [Genotype], rng: &mut R) -> Option<(usize, usize)> {
        for genotype in batch.iter_mut() {
            self.flip_packing(&mut genotype.packing, rng);
        }
        match self.route {
            RouteMutation::Swap => {
                for genotype in batch.iter_mut() {
                    self.swap_route(&mut genotype.route, rng);
                }
                None
            }
            RouteMutation::Reversal => {
                let size = batch.first()?.route.len();
                let (start, end) = self.draw_window(size, rng)?;
                for genotype in batch.iter_mut() {
                    let end = end.min(genotype.route.len());
                    if start < end {
                        genotype.route[start..end].reverse();
                    }
                }
                Some((start, end))
            }
        }
    }
}
