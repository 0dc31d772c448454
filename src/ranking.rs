//! 帕累托分层与拥挤距离
//!
//! 分层使用快速非支配排序：先算出每个个体被多少个体支配、以及它支配了哪些个体，然后逐层剥离。支配关系用种群中的位置来记录，时间复杂度为 O(MN²)。

use crate::individual::{Individual, Objectives};
use itertools::Itertools;

/// 两个个体之间的支配关系
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Dominates,
    Dominated,
    Incomparable,
}

/// 目标值上的支配关系
///
/// 实现必须满足反自反性和反对称性：没有个体支配自己，两个个体也不能互相支配，这样支配图才没有环
pub trait Dominance {
    fn relation(&self, a: &Objectives, b: &Objectives) -> Relation;
}

impl<F> Dominance for F
where
    F: Fn(&Objectives, &Objectives) -> Relation,
{
    fn relation(&self, a: &Objectives, b: &Objectives) -> Relation {
        self(a, b)
    }
}

/// 旅行小偷问题默认的帕累托支配：用时不多于、收益不少于，并且至少有一项严格更优
#[derive(Debug, Clone, Copy, Default)]
pub struct Pareto;

impl Dominance for Pareto {
    fn relation(&self, a: &Objectives, b: &Objectives) -> Relation {
        let mut better = false;
        let mut worse = false;
        for (x, y) in a.minimized().iter().zip(b.minimized().iter()) {
            if x < y {
                better = true;
            } else if x > y {
                worse = true;
            }
        }
        match (better, worse) {
            (true, false) => Relation::Dominates,
            (false, true) => Relation::Dominated,
            _ => Relation::Incomparable,
        }
    }
}

/// 对种群做非支配排序，给每个个体写入前沿序号，并返回各层前沿（个体在种群中的位置）
///
/// 返回的前沿恰好划分整个种群，序号从 0 开始连续，最后不含空前沿
pub fn rank<D: Dominance + ?Sized>(population: &mut [Individual], dominance: &D) -> Vec<Vec<usize>> {
    let size = population.len();
    // 多少个体支配它
    let mut domination_count = vec![0_usize; size];
    // 它支配了哪些个体
    let mut dominated_set: Vec<Vec<usize>> = vec![vec![]; size];
    for (index, individual) in population.iter_mut().enumerate() {
        individual.index = index;
        individual.rank = None;
    }
    for p in 0..size {
        for q in (p + 1)..size {
            match dominance.relation(&population[p].objectives, &population[q].objectives) {
                Relation::Dominates => {
                    dominated_set[p].push(q);
                    domination_count[q] += 1;
                }
                Relation::Dominated => {
                    dominated_set[q].push(p);
                    domination_count[p] += 1;
                }
                Relation::Incomparable => {}
            }
        }
    }

    let mut fronts = vec![];
    let mut current: Vec<usize> = (0..size).filter(|&i| domination_count[i] == 0).collect();
    while !current.is_empty() {
        let level = fronts.len();
        let mut next = vec![];
        for &p in &current {
            population[p].rank = Some(level);
            for &q in &dominated_set[p] {
                domination_count[q] -= 1;
                if domination_count[q] == 0 {
                    next.push(q);
                }
            }
        }
        fronts.push(current);
        current = next;
    }
    fronts
}

/// 计算每层前沿内部的拥挤距离
///
/// 对每个目标按该目标排序，两端的个体距离为无穷大，中间的个体累加相邻两个体在该目标上的归一化间隔
pub fn crowding_distance(population: &mut [Individual], fronts: &[Vec<usize>]) {
    for front in fronts {
        for &i in front {
            population[i].crowding_distance = 0.0;
        }
        if front.len() <= 2 {
            for &i in front {
                population[i].crowding_distance = f64::INFINITY;
            }
            continue;
        }
        for objective in 0..Objectives::COUNT {
            let sorted: Vec<(usize, f64)> = front
                .iter()
                .map(|&i| (i, population[i].objectives.minimized()[objective]))
                .sorted_by(|a, b| a.1.total_cmp(&b.1))
                .collect();
            let (first, low) = sorted[0];
            let (last, high) = sorted[sorted.len() - 1];
            population[first].crowding_distance = f64::INFINITY;
            population[last].crowding_distance = f64::INFINITY;
            let range = high - low;
            // 跨度为 0、无穷大或 NaN 时该目标不贡献距离
            if !range.is_finite() || range <= 0.0 {
                continue;
            }
            for (prev, middle, next) in sorted.iter().copied().tuple_windows() {
                population[middle.0].crowding_distance += (next.1 - prev.1) / range;
            }
        }
    }
}
