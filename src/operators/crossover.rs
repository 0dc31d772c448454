//! 双基因组杂交：路线用顺序杂交（OX），装包方案用均匀杂交

use super::Crossover;
use crate::individual::Genotype;
use crate::Error;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct CrossoverConfig {
    /// 顺序杂交中直接复制的区间长度为 `round((1 - order_rate) × 城市数)`
    pub order_rate: Option<f64>,
    /// 均匀杂交中每个物品位交换来源的概率
    pub uniform_rate: Option<f64>,
}

pub const DEFAULT_CROSSOVER: CrossoverConfig = CrossoverConfig {
    order_rate: Some(0.5),
    uniform_rate: Some(0.5),
};

#[derive(Debug, Clone, Copy)]
pub struct OrderUniformCrossover {
    pub order_rate: f64,
    pub uniform_rate: f64,
}

impl OrderUniformCrossover {
    pub fn new(order_rate: f64, uniform_rate: f64) -> Self {
        Self {
            order_rate,
            uniform_rate,
        }
    }

    /// 子代保留 keeper 在 `[start, end)` 内的城市，其余位置按 donor 中的先后顺序填入 keeper 区间里没有的城市
    fn order_child(keeper: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
        let size = keeper.len();
        let window = &keeper[start..end];
        let mut in_window = vec![false; size];
        for &city in window {
            in_window[city] = true;
        }
        let mut rest = donor.iter().copied().filter(|&city| !in_window[city]);
        let mut child = Vec::with_capacity(size);
        child.extend(rest.by_ref().take(start));
        child.extend_from_slice(window);
        child.extend(rest);
        child
    }
}

impl Crossover for OrderUniformCrossover {
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &Genotype,
        parent2: &Genotype,
        rng: &mut R,
    ) -> Result<(Genotype, Genotype), Error> {
        let size = parent1.route.len();
        if parent2.route.len() != size || parent1.packing.len() != parent2.packing.len() {
            return Err(format!(
                "亲本的基因组长度不一致：路线 {} 与 {}，装包方案 {} 与 {}",
                size,
                parent2.route.len(),
                parent1.packing.len(),
                parent2.packing.len()
            )
            .into());
        }

        let length = (((1.0 - self.order_rate) * size as f64).round() as usize).min(size);
        let start = if size > length {
            rng.random_range(0..size - length)
        } else {
            0
        };
        let end = start + length;
        let route1 = Self::order_child(&parent1.route, &parent2.route, start, end);
        let route2 = Self::order_child(&parent2.route, &parent1.route, start, end);

        let mut packing1 = parent1.packing.clone();
        let mut packing2 = parent2.packing.clone();
        for (bit1, bit2) in packing1.iter_mut().zip(packing2.iter_mut()) {
            if rng.random_bool(self.uniform_rate) {
                std::mem::swap(bit1, bit2);
            }
        }
        Ok((Genotype::new(route1, packing1), Genotype::new(route2, packing2)))
    }
}
