//! Genetic search over complete assignments.
//!
//! # Generation loop
//!
//! ```text
//! population = greedy seeds + random assignments
//! repeat up to max_generations:
//!   ① Evaluate   every candidate (parallel with the `parallel` feature)
//!   ② Track      best-ever candidate; count generations without improvement
//!   ③ Stop       once stagnation_limit is reached
//!   ④ Breed      elites + tournament / crossover / repair / mutation
//! ```
//!
//! # Ordering
//!
//! Candidates are ranked by [`Cost`]: total clearance time first, then
//! priority inversions, then the sum of responder times.  Fitness is the
//! negation of cost, so "better" always means "lower cost".  The best-ever
//! candidate is never lost, and the greedy seeds are part of the first
//! generation, so the result is never worse than the best greedy assignment.
//!
//! # Determinism
//!
//! Only the sequential breeding step draws from the RNG.  Evaluation is a
//! pure function of each candidate, so the same seed produces the same run
//! with or without the `parallel` feature.

use tracing::{info, trace, warn};

use sweep_core::{ResponderId, RoomId, SearchRng, SimTime};
use sweep_sim::{Assignment, Evaluation, Simulator};

use crate::config::GeneticConfig;
use crate::repair::repair;
use crate::OptResult;

// ── Cost ──────────────────────────────────────────────────────────────────────

/// Lexicographic candidate cost; lower is better.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cost {
    pub total_time:          SimTime,
    pub priority_inversions: usize,
    pub sum_time:            SimTime,
}

impl Cost {
    pub fn of(eval: &Evaluation) -> Self {
        Self {
            total_time:          eval.total_time,
            priority_inversions: eval.priority_inversions,
            sum_time:            eval.sum_time(),
        }
    }

    /// Fitness in seconds: the negated total time.
    pub fn fitness(&self) -> f64 {
        -self.total_time.as_secs_f64()
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} inversions, sum {})", self.total_time, self.priority_inversions, self.sum_time)
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

pub struct GeneticOutcome {
    pub best:        Assignment,
    pub cost:        Cost,
    /// Best cost of each evaluated generation, starting with the seeds.
    pub history:     Vec<Cost>,
    pub generations: usize,
}

// ── Search ────────────────────────────────────────────────────────────────────

/// Run the search starting from `seeds` (typically the greedy results).
pub fn search(
    sim:    &Simulator<'_>,
    config: &GeneticConfig,
    seeds:  Vec<Assignment>,
) -> OptResult<GeneticOutcome> {
    config.validate()?;
    let mut rng = SearchRng::new(config.seed);

    let size = config.population_size.max(seeds.len());
    let mut population = seeds;
    while population.len() < size {
        population.push(random_assignment(sim, &mut rng));
    }

    let mut costs = evaluate_all(sim, &population)?;
    let (first, first_cost) = best_of(&costs);
    let mut best = population[first].clone();
    let mut best_cost = first_cost;
    let seed_cost = first_cost;
    let mut history = vec![first_cost];
    let mut stagnant = 0usize;
    let mut generations = 0usize;

    while generations < config.max_generations && stagnant < config.stagnation_limit {
        population = breed(sim, config, &population, &costs, &mut rng)?;
        costs = evaluate_all(sim, &population)?;
        generations += 1;

        let (i, gen_cost) = best_of(&costs);
        history.push(gen_cost);
        if gen_cost < best_cost {
            best = population[i].clone();
            best_cost = gen_cost;
            stagnant = 0;
        } else {
            stagnant += 1;
        }
        trace!(generation = generations, best = %gen_cost.total_time, stagnant, "genetic generation");
    }

    if best_cost == seed_cost {
        warn!(generations, "genetic search did not improve on its initial population");
    }
    info!(
        generations,
        population = size,
        best = %best_cost.total_time,
        inversions = best_cost.priority_inversions,
        "genetic search finished"
    );
    Ok(GeneticOutcome { best, cost: best_cost, history, generations })
}

fn evaluate(sim: &Simulator<'_>, candidate: &Assignment) -> OptResult<Cost> {
    Ok(Cost::of(&sim.evaluate(candidate)?))
}

/// Costs in population order.
fn evaluate_all(sim: &Simulator<'_>, population: &[Assignment]) -> OptResult<Vec<Cost>> {
    #[cfg(not(feature = "parallel"))]
    {
        population.iter().map(|c| evaluate(sim, c)).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        population.par_iter().map(|c| evaluate(sim, c)).collect()
    }
}

/// Index and cost of the cheapest candidate; ties go to the lowest index.
fn best_of(costs: &[Cost]) -> (usize, Cost) {
    costs
        .iter()
        .copied()
        .enumerate()
        .min_by_key(|&(i, c)| (c, i))
        .unwrap_or_default()
}

fn breed(
    sim:        &Simulator<'_>,
    config:     &GeneticConfig,
    population: &[Assignment],
    costs:      &[Cost],
    rng:        &mut SearchRng,
) -> OptResult<Vec<Assignment>> {
    let mut ranked: Vec<usize> = (0..population.len()).collect();
    ranked.sort_by_key(|&i| (costs[i], i));

    let mut next: Vec<Assignment> = ranked
        .iter()
        .take(config.elite_count)
        .map(|&i| population[i].clone())
        .collect();

    while next.len() < population.len() {
        let a = tournament(costs, config.tournament_size, rng);
        let child = if rng.gen_bool(config.crossover_rate) {
            let b = tournament(costs, config.tournament_size, rng);
            crossover(sim, &population[a], &population[b], rng)?
        } else {
            population[a].clone()
        };
        let child = if rng.gen_bool(config.mutation_rate) {
            mutate(&child, rng)
        } else {
            child
        };
        next.push(child);
    }
    Ok(next)
}

/// Best of `k` uniformly drawn candidates.
fn tournament(costs: &[Cost], k: usize, rng: &mut SearchRng) -> usize {
    let mut best = rng.gen_range(0..costs.len());
    for _ in 1..k {
        let c = rng.gen_range(0..costs.len());
        if (costs[c], c) < (costs[best], best) {
            best = c;
        }
    }
    best
}

// ── Operators ─────────────────────────────────────────────────────────────────

/// Shuffle the rooms and deal each to a random responder.
pub fn random_assignment(sim: &Simulator<'_>, rng: &mut SearchRng) -> Assignment {
    let n = sim.responder_count();
    let mut rooms: Vec<RoomId> = sim.building().room_ids().collect();
    rng.shuffle(&mut rooms);
    let mut a = Assignment::empty(n);
    for room in rooms {
        a.push(ResponderId(rng.gen_range(0..n) as u32), room);
    }
    a
}

/// Responder-mask crossover: each responder's sequence comes whole from one
/// parent, then [`repair`] restores the partition.
pub fn crossover(
    sim: &Simulator<'_>,
    a:   &Assignment,
    b:   &Assignment,
    rng: &mut SearchRng,
) -> OptResult<Assignment> {
    let routes = a
        .routes()
        .iter()
        .zip(b.routes())
        .map(|(ra, rb)| if rng.gen_bool(0.5) { ra.clone() } else { rb.clone() })
        .collect();
    repair(sim, routes)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    /// Exchange one room each between two responders.
    SwapBetween,
    /// Move one room to another responder.
    Move,
    /// Exchange two positions in one sequence.
    SwapWithin,
    /// Reverse a sub-sequence.
    Reverse,
}

/// A mutated copy of `parent`.  Every operator keeps the partition intact.
pub fn mutate(parent: &Assignment, rng: &mut SearchRng) -> Assignment {
    let mut routes = parent.routes().to_vec();
    let filled: Vec<usize> = (0..routes.len()).filter(|&i| !routes[i].is_empty()).collect();
    let long: Vec<usize> = (0..routes.len()).filter(|&i| routes[i].len() >= 2).collect();

    let mut options = Vec::with_capacity(4);
    if filled.len() >= 2 {
        options.push(Mutation::SwapBetween);
    }
    if routes.len() >= 2 && !filled.is_empty() {
        options.push(Mutation::Move);
    }
    if !long.is_empty() {
        options.push(Mutation::SwapWithin);
        options.push(Mutation::Reverse);
    }
    let Some(&op) = rng.choose(&options) else {
        return parent.clone();
    };

    match op {
        Mutation::SwapBetween => {
            if let Some((x, y)) = rng.distinct_pair(filled.len()) {
                let (ra, rb) = (filled[x], filled[y]);
                let ia = rng.gen_range(0..routes[ra].len());
                let ib = rng.gen_range(0..routes[rb].len());
                let tmp = routes[ra][ia];
                routes[ra][ia] = routes[rb][ib];
                routes[rb][ib] = tmp;
            }
        }
        Mutation::Move => {
            let from = filled[rng.gen_range(0..filled.len())];
            let mut to = rng.gen_range(0..routes.len() - 1);
            if to >= from {
                to += 1;
            }
            let pick = rng.gen_range(0..routes[from].len());
            let room = routes[from].remove(pick);
            let at = rng.gen_range(0..=routes[to].len());
            routes[to].insert(at, room);
        }
        Mutation::SwapWithin => {
            let r = long[rng.gen_range(0..long.len())];
            if let Some((i, j)) = rng.distinct_pair(routes[r].len()) {
                routes[r].swap(i, j);
            }
        }
        Mutation::Reverse => {
            let r = long[rng.gen_range(0..long.len())];
            if let Some((i, j)) = rng.distinct_pair(routes[r].len()) {
                let (lo, hi) = (i.min(j), i.max(j));
                routes[r][lo..=hi].reverse();
            }
        }
    }
    Assignment::from_routes(routes)
}
