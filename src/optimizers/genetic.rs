//! 非支配锦标赛遗传算法（NTGA）
//!
//! 流程为：初始化 → 每一代｛分层 → 繁殖到种群满员 → 整代替换｝ → 结束。上一代的个体不会进入下一代。

use super::clone_guard::CloneGuard;
use super::OptimizationResult;
use crate::individual::{presentation_order, Genotype, Individual};
use crate::interfaces::{Interface, Message};
use crate::operators::crossover::DEFAULT_CROSSOVER;
use crate::operators::mutation::DEFAULT_MUTATE;
use crate::operators::{
    Crossover, CrossoverConfig, Mutation, MutationConfig, OrderUniformCrossover, RouteMutation,
    Selection, SwapOrReversal, TournamentSelector,
};
use crate::problems::Problem;
use crate::ranking::{crowding_distance, rank, Pareto};
use crate::Error;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::{debug, info, warn};
use web_time::Instant;

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ntga {
    pub population_size: usize,
    pub epochs: usize,
    pub tournament_size: Option<usize>,
    pub crossover: Option<CrossoverConfig>,
    pub mutation: Option<MutationConfig>,
    /// 初始种群中每个物品被装入的概率；不提供时每个个体各自随机取一个概率
    pub initial_packing_rate: Option<f64>,
    pub strict_evaluation: Option<bool>,
    pub clone_retry_limit: Option<usize>,
    /// 连续得到多少个不可行解之后放弃
    pub max_infeasible_streak: Option<usize>,
}

/// 补全默认值并检查过的算法参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub population_size: usize,
    pub epochs: usize,
    pub tournament_size: usize,
    pub order_rate: f64,
    pub uniform_rate: f64,
    pub mutation_rate: f64,
    pub route_mutation: RouteMutation,
    pub initial_packing_rate: Option<f64>,
    pub strict_evaluation: bool,
    pub clone_retry_limit: usize,
    pub max_infeasible_streak: usize,
}

const DEFAULT_TOURNAMENT_SIZE: usize = 8;

/// 仓库必须是问题中的一个城市
fn check_problem<P: Problem>(problem: &P) -> Result<(), Error> {
    if problem.depot() >= problem.cities() {
        return Err(format!(
            "仓库 {} 不在城市范围 0..{} 内",
            problem.depot(),
            problem.cities()
        )
        .into());
    }
    Ok(())
}

fn check_rate(name: &str, value: f64) -> Result<f64, Error> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{name} 必须在 0 到 1 之间，当前为 {value}").into())
    }
}

impl Ntga {
    pub fn new(population_size: usize, epochs: usize) -> Self {
        Self {
            population_size,
            epochs,
            tournament_size: None,
            crossover: None,
            mutation: None,
            initial_packing_rate: None,
            strict_evaluation: None,
            clone_retry_limit: None,
            max_infeasible_streak: None,
        }
    }

    pub fn parameters(&self) -> Result<Parameters, Error> {
        if self.population_size == 0 {
            return Err("种群大小必须大于 0".into());
        }
        let tournament_size = self
            .tournament_size
            .unwrap_or(DEFAULT_TOURNAMENT_SIZE.min(self.population_size));
        if tournament_size == 0 || tournament_size > self.population_size {
            return Err(format!(
                "锦标赛大小必须在 1 到种群大小 {} 之间，当前为 {}",
                self.population_size, tournament_size
            )
            .into());
        }
        let crossover = self.crossover.unwrap_or(DEFAULT_CROSSOVER);
        let mutation = self.mutation.unwrap_or(DEFAULT_MUTATE);
        let order_rate = check_rate("order_rate", crossover.order_rate.unwrap_or(0.5))?;
        let uniform_rate = check_rate("uniform_rate", crossover.uniform_rate.unwrap_or(0.5))?;
        let mutation_rate = check_rate("mutation.rate", mutation.rate.unwrap_or(0.01))?;
        if mutation_rate == 0.0 {
            warn!("变异率为 0，防克隆只能依靠重试上限结束");
        }
        let initial_packing_rate = self
            .initial_packing_rate
            .map(|x| check_rate("initial_packing_rate", x))
            .transpose()?;
        Ok(Parameters {
            population_size: self.population_size,
            epochs: self.epochs,
            tournament_size,
            order_rate,
            uniform_rate,
            mutation_rate,
            route_mutation: mutation.route.unwrap_or_default(),
            initial_packing_rate,
            strict_evaluation: self.strict_evaluation.unwrap_or(true),
            clone_retry_limit: self.clone_retry_limit.unwrap_or(1000),
            max_infeasible_streak: self.max_infeasible_streak.unwrap_or(10000),
        })
    }

    /// 从随机初始种群开始优化
    pub fn optimize<P: Problem, R: Rng + ?Sized>(
        &self,
        problem: &mut P,
        rng: &mut R,
        interface: &dyn Interface,
    ) -> Result<OptimizationResult, Error> {
        let parameters = self.parameters()?;
        check_problem(problem)?;
        let population = initialize(problem, &parameters, rng, interface)?;
        run(problem, population, &parameters, rng, interface)
    }

    /// 从给定的初始种群开始优化，初始种群的每个个体都必须合法且可行
    pub fn evolve<P: Problem, R: Rng + ?Sized>(
        &self,
        problem: &mut P,
        initial: Vec<Genotype>,
        rng: &mut R,
        interface: &dyn Interface,
    ) -> Result<OptimizationResult, Error> {
        let parameters = self.parameters()?;
        check_problem(problem)?;
        if initial.len() != parameters.population_size {
            return Err(format!(
                "初始种群有 {} 个个体，但种群大小为 {}",
                initial.len(),
                parameters.population_size
            )
            .into());
        }
        let mut population = Vec::with_capacity(initial.len());
        for (index, genotype) in initial.into_iter().enumerate() {
            genotype.validate(problem.cities(), problem.items(), problem.depot())?;
            let objectives = problem
                .evaluate(&genotype.route, &genotype.packing, parameters.strict_evaluation)
                .ok_or_else(|| Error::from(format!("初始种群中第 {index} 个个体不可行")))?;
            population.push(Individual::new(genotype, objectives, index));
        }
        interface.send(Message::Initialized {
            population_size: population.len(),
            discarded: 0,
        });
        run(problem, population, &parameters, rng, interface)
    }
}

/// 随机生成一条从仓库出发的路线和一个装包方案
pub fn random_genotype<P: Problem, R: Rng + ?Sized>(
    problem: &P,
    packing_rate: Option<f64>,
    rng: &mut R,
) -> Genotype {
    let depot = problem.depot();
    let mut others: Vec<usize> = (0..problem.cities()).filter(|&c| c != depot).collect();
    others.shuffle(rng);
    let mut route = Vec::with_capacity(problem.cities());
    route.push(depot);
    route.extend(others);
    let rate = packing_rate.unwrap_or_else(|| rng.random::<f64>());
    let packing = (0..problem.items()).map(|_| rng.random_bool(rate)).collect();
    Genotype::new(route, packing)
}

fn initialize<P: Problem, R: Rng + ?Sized>(
    problem: &mut P,
    parameters: &Parameters,
    rng: &mut R,
    interface: &dyn Interface,
) -> Result<Vec<Individual>, Error> {
    let mut population = Vec::with_capacity(parameters.population_size);
    let mut discarded = 0;
    let mut streak = 0;
    while population.len() < parameters.population_size {
        let genotype = random_genotype(problem, parameters.initial_packing_rate, rng);
        match problem.evaluate(
            &genotype.route,
            &genotype.packing,
            parameters.strict_evaluation,
        ) {
            Some(objectives) => {
                let index = population.len();
                population.push(Individual::new(genotype, objectives, index));
                streak = 0;
            }
            None => {
                discarded += 1;
                streak += 1;
                if streak > parameters.max_infeasible_streak {
                    return Err(format!(
                        "连续 {streak} 个随机解都不可行，无法生成初始种群"
                    )
                    .into());
                }
            }
        }
    }
    debug!("初始种群生成完成，丢弃了 {} 个不可行解", discarded);
    interface.send(Message::Initialized {
        population_size: population.len(),
        discarded,
    });
    Ok(population)
}

fn run<P: Problem, R: Rng + ?Sized>(
    problem: &mut P,
    mut population: Vec<Individual>,
    parameters: &Parameters,
    rng: &mut R,
    interface: &dyn Interface,
) -> Result<OptimizationResult, Error> {
    for epoch in 0..parameters.epochs {
        let start = Instant::now();
        let fronts = rank(&mut population, &Pareto);
        crowding_distance(&mut population, &fronts);
        report_epoch(epoch, &population, &fronts, interface);
        let next = breed(problem, &population, parameters, rng, interface)?;
        population = next;
        interface.send(Message::Elapsed {
            time: start.elapsed().as_micros() as u64,
        });
    }

    let fronts = rank(&mut population, &Pareto);
    crowding_distance(&mut population, &fronts);
    let mut front: Vec<Individual> = fronts
        .first()
        .map(|f| f.iter().map(|&i| population[i].clone()).collect())
        .unwrap_or_default();
    front.sort_by(presentation_order);
    interface.send(Message::Finished {
        front: front.clone(),
    });
    Ok(OptimizationResult { population, front })
}

fn report_epoch(
    epoch: usize,
    population: &[Individual],
    fronts: &[Vec<usize>],
    interface: &dyn Interface,
) {
    let least_time = population
        .iter()
        .map(|x| x.objectives.time)
        .fold(f64::INFINITY, f64::min);
    let best_profit = population
        .iter()
        .map(|x| x.objectives.profit)
        .fold(f64::NEG_INFINITY, f64::max);
    let front_size = fronts.first().map_or(0, |f| f.len());
    info!(
        "第 {} 代：{} 层前沿，非支配前沿 {} 个，最短用时 {}，最高收益 {}",
        epoch,
        fronts.len(),
        front_size,
        least_time,
        best_profit
    );
    interface.send(Message::Epoch {
        epoch,
        fronts: fronts.len(),
        front_size,
        least_time,
        best_profit,
        objectives: population.iter().map(|x| x.objectives.minimized()).collect(),
    });
}

/// 由已分层的上一代繁殖出完整的下一代
///
/// 子代成对产生；种群大小为奇数时，最后一对中放不下的那个子代直接丢弃。不可行的子代也直接丢弃，继续繁殖。
pub fn breed<P: Problem, R: Rng + ?Sized>(
    problem: &mut P,
    population: &[Individual],
    parameters: &Parameters,
    rng: &mut R,
    interface: &dyn Interface,
) -> Result<Vec<Individual>, Error> {
    let selector = TournamentSelector::new(parameters.tournament_size);
    let crossover = OrderUniformCrossover::new(parameters.order_rate, parameters.uniform_rate);
    let mutation = SwapOrReversal::new(parameters.mutation_rate, parameters.route_mutation);
    let guard = CloneGuard::new(population, parameters.clone_retry_limit);
    let size = parameters.population_size;
    let mut next = Vec::with_capacity(size);
    let mut streak = 0;

    while next.len() < size {
        let parent1 = &population[selector.select(population, rng)];
        let parent2 = &population[selector.select(population, rng)];
        let (child1, child2) = crossover.crossover(&parent1.genotype(), &parent2.genotype(), rng)?;
        let mut pair = [child1, child2];
        mutation.mutate(&mut pair, rng);
        for mut child in pair {
            if next.len() >= size {
                debug!("种群大小 {} 为奇数，丢弃多出的一个子代", size);
                break;
            }
            if guard.guard(&mut child, &mutation, rng).is_none() {
                interface.send(Message::CloneRetryLimit {
                    retries: parameters.clone_retry_limit,
                });
            }
            match problem.evaluate(&child.route, &child.packing, parameters.strict_evaluation) {
                Some(objectives) => {
                    let index = next.len();
                    next.push(Individual::new(child, objectives, index));
                    streak = 0;
                }
                None => {
                    streak += 1;
                    debug!("丢弃一个不可行的子代");
                    if streak > parameters.max_infeasible_streak {
                        return Err(format!("连续 {streak} 个子代都不可行，无法繁殖下一代").into());
                    }
                }
            }
        }
    }
    Ok(next)
}
