#![allow(dead_code)]

use ntga::individual::{Individual, Objectives};
use ntga::problems::Problem;
use ntga::ranking::{Dominance, Pareto, Relation};

/// 一个很小的旅行小偷问题：物品分布在非仓库城市上，背包越重走得越慢
pub struct ToyThief {
    pub coordinates: Vec<(f64, f64)>,
    /// (所在城市, 重量, 收益)
    pub items: Vec<(usize, f64, f64)>,
    pub capacity: f64,
    pub max_speed: f64,
    pub min_speed: f64,
    pub evaluations: usize,
}

impl ToyThief {
    pub fn new() -> Self {
        Self {
            coordinates: vec![(0.0, 0.0), (3.0, 0.0), (3.0, 4.0), (0.0, 4.0), (1.5, 6.0)],
            items: vec![(1, 2.0, 10.0), (2, 3.0, 25.0), (4, 4.0, 30.0)],
            capacity: 7.0,
            max_speed: 1.0,
            min_speed: 0.1,
            evaluations: 0,
        }
    }

    fn distance(&self, a: usize, b: usize) -> f64 {
        let (x1, y1) = self.coordinates[a];
        let (x2, y2) = self.coordinates[b];
        ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
    }
}

impl Problem for ToyThief {
    fn cities(&self) -> usize {
        self.coordinates.len()
    }

    fn items(&self) -> usize {
        self.items.len()
    }

    fn evaluate(&mut self, route: &[usize], packing: &[bool], strict: bool) -> Option<Objectives> {
        self.evaluations += 1;
        let total: f64 = self
            .items
            .iter()
            .zip(packing)
            .filter(|(_, taken)| **taken)
            .map(|(item, _)| item.1)
            .sum();
        if strict && total > self.capacity {
            return None;
        }
        let mut weight = 0.0;
        let mut time = 0.0;
        let mut profit = 0.0;
        for (position, &city) in route.iter().enumerate() {
            for (item, &taken) in self.items.iter().zip(packing) {
                if taken && item.0 == city {
                    weight += item.1;
                    profit += item.2;
                }
            }
            let next = route[(position + 1) % route.len()];
            let ratio = (weight / self.capacity).min(1.0);
            let speed = self.max_speed - ratio * (self.max_speed - self.min_speed);
            time += self.distance(city, next) / speed;
        }
        Some(Objectives::new(time, profit))
    }
}

/// 所有方案都不可行
pub struct Impossible;

impl Problem for Impossible {
    fn cities(&self) -> usize {
        4
    }

    fn items(&self) -> usize {
        2
    }

    fn evaluate(&mut self, _route: &[usize], _packing: &[bool], _strict: bool) -> Option<Objectives> {
        None
    }
}

/// 仓库编号超出城市范围
pub struct FarDepot;

impl Problem for FarDepot {
    fn cities(&self) -> usize {
        5
    }

    fn items(&self) -> usize {
        3
    }

    fn depot(&self) -> usize {
        5
    }

    fn evaluate(&mut self, _route: &[usize], _packing: &[bool], _strict: bool) -> Option<Objectives> {
        Some(Objectives::new(1.0, 1.0))
    }
}

pub fn is_permutation(route: &[usize], cities: usize) -> bool {
    let mut seen = vec![false; cities];
    route.len() == cities
        && route.iter().all(|&c| {
            if c >= cities || seen[c] {
                false
            } else {
                seen[c] = true;
                true
            }
        })
}

/// 用两两比较直接找出不被任何个体支配的个体
pub fn brute_force_front(population: &[Individual]) -> Vec<usize> {
    (0..population.len())
        .filter(|&i| {
            population.iter().all(|other| {
                Pareto.relation(&other.objectives, &population[i].objectives) != Relation::Dominates
            })
        })
        .collect()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
