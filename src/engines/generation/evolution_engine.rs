use crate::config::{auto_tune, ConfigSection, EvolutionConfig};
use crate::data::Dataset;
use crate::engines::evaluation::fitness::{rank_population, FitnessEvaluator};
use crate::engines::generation::{
    individual::Individual,
    operators::{crossover, mutate, tournament_selection},
    progress::{ConsoleProgressCallback, SilentProgressCallback},
    snapshot::GenerationSnapshot,
    tree_builder::TreeBuilder,
};
use crate::error::{Result, SymregError};
use crate::report::HtmlReport;
use crate::types::{RunMode, RunResult};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::time::Instant;

/// Best MSE below which a run counts as an exact fit.
pub const CONVERGENCE_MSE: f64 = 1e-6;
/// Share of each new generation filled with freshly grown trees.
pub const IMMIGRANT_RATE: f64 = 0.02;
/// Consecutive parent pairs allowed to yield no accepted child before breeding gives up.
const MAX_CONSECUTIVE_REJECTIONS: usize = 1_000_000;

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best: &Individual);
}

pub struct EvolutionEngine {
    config: EvolutionConfig,
    builder: TreeBuilder,
    evaluator: FitnessEvaluator,
    history: Vec<GenerationSnapshot>,
    rng: StdRng,
}

impl EvolutionEngine {
    pub fn new(config: EvolutionConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            builder: TreeBuilder::new(config.function_set()?),
            evaluator: FitnessEvaluator::new(config.parsimony_coefficient),
            history: Vec::new(),
            config,
            rng,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Snapshots recorded by the last report-mode run.
    pub fn history(&self) -> &[GenerationSnapshot] {
        &self.history
    }

    /// Plain mode: search and return only the best formula.
    pub fn fit(&mut self, xs: &[f64], ys: &[f64]) -> Result<RunResult> {
        let dataset = Dataset::from_slices(xs, ys)?;
        if self.config.enable_logging {
            self.run(&dataset, RunMode::Plain, ConsoleProgressCallback::new())
        } else {
            self.run(&dataset, RunMode::Plain, SilentProgressCallback)
        }
    }

    /// Report mode: log every generation, keep snapshots and write the HTML report
    /// to `output_path` once the search ends.
    pub fn fit_with_report(&mut self, xs: &[f64], ys: &[f64]) -> Result<RunResult> {
        let dataset = Dataset::from_slices(xs, ys)?;
        let callback = ConsoleProgressCallback::with_breakdown(self.config.parsimony_coefficient);
        let result = self.run(&dataset, RunMode::Report, callback)?;

        HtmlReport::new(&self.history, &dataset, &self.config).write(&self.config.output_path)?;
        info!("Report written to {}", self.config.output_path.display());
        Ok(result)
    }

    /// Derives a configuration from the data and fits with a fresh engine.
    pub fn auto_fit(&self, xs: &[f64], ys: &[f64]) -> Result<RunResult> {
        let dataset = Dataset::from_slices(xs, ys)?;
        let mut tuned = auto_tune(&dataset);
        tuned.seed = self.config.seed;
        tuned.enable_logging = self.config.enable_logging;

        let mut engine = EvolutionEngine::new(tuned)?;
        engine.fit(xs, ys)
    }

    /// Run the evolution process
    pub fn run<C: ProgressCallback>(
        &mut self,
        dataset: &Dataset,
        mode: RunMode,
        mut callback: C,
    ) -> Result<RunResult> {
        let start_time = Instant::now();
        if mode == RunMode::Report {
            self.history.clear();
        }

        // Initialize population
        let mut population = self.builder.initial_population(
            self.config.population_size,
            self.config.max_depth,
            &mut self.rng,
        );

        let mut generation = 0;
        loop {
            callback.on_generation_start(generation);

            self.evaluator.evaluate_population(&mut population, dataset);
            rank_population(&mut population);

            let best = population.first().ok_or_else(|| {
                SymregError::Evolution(format!("Generation {} has no individuals", generation))
            })?;

            if mode == RunMode::Report {
                self.history.push(GenerationSnapshot::capture(
                    generation,
                    &population,
                    self.config.top_solutions_to_track,
                ));
            }

            debug!(
                "Generation {}: best MSE = {:.6}, fitness = {:.6}, formula = {}",
                generation, best.mse, best.fitness, best.tree
            );
            callback.on_generation_complete(generation, best);

            // Check termination
            let converged = best.mse < CONVERGENCE_MSE;
            if converged || generation + 1 >= self.config.max_generations {
                if !best.is_valid() {
                    warn!("No formula with finite predictions was found");
                } else if !converged {
                    warn!(
                        "Stopped at the generation cap ({}) with MSE {:.6}",
                        self.config.max_generations, best.mse
                    );
                }
                return Ok(RunResult::from_best(best, generation + 1, start_time.elapsed()));
            }

            // Create next generation
            population = self.create_next_generation(&population)?;
            generation += 1;
        }
    }

    /// Breeds the next generation from a ranked population: elites, random
    /// immigrants, then offspring until the population is full.
    pub(crate) fn create_next_generation(
        &mut self,
        ranked: &[Individual],
    ) -> Result<Vec<Individual>> {
        let population_size = self.config.population_size;
        let mut next_generation = Vec::with_capacity(population_size);

        // Elitism: copy top performers
        let elite_count = (population_size as f64 * self.config.survival_rate) as usize;
        next_generation.extend(
            ranked
                .iter()
                .take(elite_count.min(population_size))
                .map(|ind| Individual::new(ind.tree.clone())),
        );

        // Random immigrants
        let immigrant_count = (population_size as f64 * IMMIGRANT_RATE) as usize;
        for _ in 0..immigrant_count {
            if next_generation.len() >= population_size {
                break;
            }
            let tree = self
                .builder
                .grow_random_depth(self.config.max_depth, &mut self.rng);
            next_generation.push(Individual::new(tree));
        }

        // Generate offspring
        let mut rejected_in_a_row = 0;
        while next_generation.len() < population_size {
            let parent1 = tournament_selection(ranked, self.config.tournament_size, &mut self.rng);
            let parent2 = tournament_selection(ranked, self.config.tournament_size, &mut self.rng);

            let (mut child1, mut child2) = if self.rng.gen::<f64>() < self.config.crossover_rate {
                crossover(&parent1.tree, &parent2.tree, &mut self.rng)
            } else {
                (parent1.tree.clone(), parent2.tree.clone())
            };

            if self.rng.gen::<f64>() < self.config.mutation_rate {
                mutate(&mut child1, &self.builder, self.config.max_mutation_depth, &mut self.rng);
            }
            if self.rng.gen::<f64>() < self.config.mutation_rate {
                mutate(&mut child2, &self.builder, self.config.max_mutation_depth, &mut self.rng);
            }

            let before = next_generation.len();
            if child1.depth() <= self.config.max_depth {
                next_generation.push(Individual::new(child1));
            }
            if next_generation.len() < population_size && child2.depth() <= self.config.max_depth {
                next_generation.push(Individual::new(child2));
            }

            if next_generation.len() == before {
                rejected_in_a_row += 1;
                if rejected_in_a_row >= MAX_CONSECUTIVE_REJECTIONS {
                    return Err(SymregError::Evolution(format!(
                        "No child within max depth {} after {} attempts",
                        self.config.max_depth, MAX_CONSECUTIVE_REJECTIONS
                    )));
                }
            } else {
                rejected_in_a_row = 0;
            }
        }

        Ok(next_generation)
    }
}
