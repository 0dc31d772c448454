use criterion::{criterion_group, criterion_main, Criterion};
use ntga::individual::{Genotype, Individual, Objectives};
use ntga::interfaces::Silent;
use ntga::optimizers::genetic::Ntga;
use ntga::problems::Problem;
use ntga::ranking::{crowding_distance, rank, Pareto};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 城市在单位正方形内随机分布，每个非仓库城市上放一个物品
struct RandomThief {
    coordinates: Vec<(f64, f64)>,
    weights: Vec<f64>,
    profits: Vec<f64>,
    capacity: f64,
}

impl RandomThief {
    fn new(cities: usize, rng: &mut StdRng) -> Self {
        let coordinates = (0..cities).map(|_| (rng.random(), rng.random())).collect();
        let weights: Vec<f64> = (1..cities).map(|_| rng.random_range(1.0..10.0)).collect();
        let profits = (1..cities).map(|_| rng.random_range(1.0..100.0)).collect();
        let capacity = weights.iter().sum::<f64>() / 2.0;
        Self {
            coordinates,
            weights,
            profits,
            capacity,
        }
    }
}

impl Problem for RandomThief {
    fn cities(&self) -> usize {
        self.coordinates.len()
    }

    fn items(&self) -> usize {
        self.weights.len()
    }

    fn evaluate(&mut self, route: &[usize], packing: &[bool], strict: bool) -> Option<Objectives> {
        let mut weight = 0.0;
        let mut time = 0.0;
        let mut profit = 0.0;
        for (position, &city) in route.iter().enumerate() {
            if city > 0 && packing[city - 1] {
                weight += self.weights[city - 1];
                profit += self.profits[city - 1];
            }
            if strict && weight > self.capacity {
                return None;
            }
            let (x1, y1) = self.coordinates[city];
            let (x2, y2) = self.coordinates[route[(position + 1) % route.len()]];
            let speed = 1.0 - 0.9 * (weight / self.capacity).min(1.0);
            time += ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt() / speed;
        }
        Some(Objectives::new(time, profit))
    }
}

fn non_dominated_sorting(b: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let population: Vec<Individual> = (0..200)
        .map(|index| {
            let objectives = Objectives::new(rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0));
            Individual::new(Genotype::new(vec![0], vec![]), objectives, index)
        })
        .collect();
    b.bench_function("非支配排序", |b| {
        b.iter(|| {
            let mut population = population.clone();
            let fronts = rank(&mut population, &Pareto);
            crowding_distance(&mut population, &fronts);
        })
    });
}

fn ten_epochs(b: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let mut problem = RandomThief::new(100, &mut rng);
    let mut ntga = Ntga::new(100, 10);
    ntga.initial_packing_rate = Some(0.2);
    b.bench_function("十代进化", |b| {
        b.iter(|| ntga.optimize(&mut problem, &mut rng, &Silent).unwrap())
    });
}

criterion_group!(benches, non_dominated_sorting, ten_epochs);
criterion_main!(benches);
