//! 防克隆：子代的基因型不能与上一代中的任何个体完全相同

use crate::individual::{Genotype, Individual};
use crate::operators::Mutation;
use rand::Rng;
use rustc_hash::FxHashSet;
use tracing::warn;

pub struct CloneGuard<'a> {
    reference: FxHashSet<(&'a [usize], &'a [bool])>,
    retry_limit: usize,
}

impl<'a> CloneGuard<'a> {
    pub fn new(reference: &'a [Individual], retry_limit: usize) -> Self {
        let reference = reference
            .iter()
            .map(|x| (x.route.as_slice(), x.packing.as_slice()))
            .collect();
        Self {
            reference,
            retry_limit,
        }
    }

    /// 路线和装包方案都与参考种群中的某个个体相同
    pub fn is_clone(&self, genotype: &Genotype) -> bool {
        self.reference
            .contains(&(genotype.route.as_slice(), genotype.packing.as_slice()))
    }

    /// 只要子代是克隆，就用同样的变异算子单独再变异一次
    ///
    /// 返回重新变异的次数；达到重试上限仍是克隆时返回 None，子代保持最后一次变异的结果
    pub fn guard<M: Mutation, R: Rng + ?Sized>(
        &self,
        offspring: &mut Genotype,
        mutation: &M,
        rng: &mut R,
    ) -> Option<usize> {
        let mut retries = 0;
        while self.is_clone(offspring) {
            if retries >= self.retry_limit {
                warn!("防克隆重试 {} 次后子代仍是克隆，变异率可能过低", retries);
                return None;
            }
            mutation.mutate(std::slice::from_mut(offspring), rng);
            retries += 1;
        }
        Some(retries)
    }
}
