use crate::interfaces::Interface;
use crate::optimizers::{genetic::Ntga, OptimizationResult};
use crate::problems::Problem;
use crate::Error;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::Path;

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "algorithm")]
pub enum SolverConfig {
    Ntga(Ntga),
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationConfig {
    pub metaheuristic: SolverConfig,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub info: Option<BTreeMap<String, String>>,
    /// 随机数种子，相同的种子和问题得到相同的结果
    pub seed: Option<u64>,
    pub optimization: OptimizationConfig,
}

impl Config {
    pub fn from_yaml(content: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_path<T: AsRef<Path>>(path: T) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = read_to_string(path)
            .map_err(|e| Error::from(format!("无法读取文件 {}：{e}", path.display())))?;
        Self::from_yaml(&content)
    }

    /// 用同一个随机数生成器完成整个优化过程
    pub fn solve<P: Problem>(
        &self,
        problem: &mut P,
        interface: &dyn Interface,
    ) -> Result<OptimizationResult, Error> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        match &self.optimization.metaheuristic {
            SolverConfig::Ntga(ntga) => ntga.optimize(problem, &mut rng, interface),
        }
    }
}
