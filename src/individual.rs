//! 个体、基因型与目标值
//!

use crate::Error;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 一个候选解的两个目标：总用时越短越好，总收益越高越好
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Objectives {
    pub time: f64,
    pub profit: f64,
}

impl Objectives {
    /// 目标的个数
    pub const COUNT: usize = 2;

    pub fn new(time: f64, profit: f64) -> Self {
        Self { time, profit }
    }

    /// 把两个目标都转换为越小越好的形式，即 `[time, -profit]`
    pub fn minimized(&self) -> [f64; Self::COUNT] {
        [self.time, -self.profit]
    }
}

/// 基因型：路线和装包方案，还没有经过评测
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Genotype {
    pub route: Vec<usize>,
    pub packing: Vec<bool>,
}

impl Genotype {
    pub fn new(route: Vec<usize>, packing: Vec<bool>) -> Self {
        Self { route, packing }
    }

    /// 检查路线是否为 `0..cities` 的一个排列、起点是否为仓库，以及装包方案的长度
    pub fn validate(&self, cities: usize, items: usize, depot: usize) -> Result<(), Error> {
        if self.route.len() != cities {
            return Err(format!(
                "路线长度为 {}，但问题中有 {} 个城市",
                self.route.len(),
                cities
            )
            .into());
        }
        if self.packing.len() != items {
            return Err(format!(
                "装包方案长度为 {}，但问题中有 {} 个物品",
                self.packing.len(),
                items
            )
            .into());
        }
        let mut seen = vec![false; cities];
        for &city in &self.route {
            if city >= cities || seen[city] {
                return Err(format!("路线 {:?} 不是城市集合的一个排列", self.route).into());
            }
            seen[city] = true;
        }
        if self.route.first() != Some(&depot) {
            return Err(format!("路线的第一个城市必须是仓库 {depot}").into());
        }
        Ok(())
    }
}

/// 种群中的一个个体
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Individual {
    pub route: Vec<usize>,
    pub packing: Vec<bool>,
    pub objectives: Objectives,
    /// 帕累托前沿的序号，0 为非支配前沿；分层之前为 None
    pub rank: Option<usize>,
    pub crowding_distance: f64,
    /// 在当前世代中的位置，只用于分层时的簿记
    pub index: usize,
}

impl Individual {
    pub fn new(genotype: Genotype, objectives: Objectives, index: usize) -> Self {
        let Genotype { route, packing } = genotype;
        Self {
            route,
            packing,
            objectives,
            rank: None,
            crowding_distance: 0.0,
            index,
        }
    }

    pub fn genotype(&self) -> Genotype {
        Genotype::new(self.route.clone(), self.packing.clone())
    }

    /// 基因型完全相同（路线和装包方案都相同）
    pub fn same_genotype(&self, genotype: &Genotype) -> bool {
        self.route == genotype.route && self.packing == genotype.packing
    }
}

/// 展示用的排序：先按前沿序号升序，再按拥挤距离升序；未分层的个体排在最后
pub fn presentation_order(a: &Individual, b: &Individual) -> Ordering {
    let rank_a = a.rank.unwrap_or(usize::MAX);
    let rank_b = b.rank.unwrap_or(usize::MAX);
    rank_a
        .cmp(&rank_b)
        .then_with(|| a.crowding_distance.total_cmp(&b.crowding_distance))
}
