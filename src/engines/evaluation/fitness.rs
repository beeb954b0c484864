use crate::data::Dataset;
use crate::engines::generation::{ast::ExprNode, individual::Individual, individual::INVALID_SCORE};
use rayon::prelude::*;

/// Scores trees as `mse + parsimony * size`; lower is better.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator {
    parsimony_coefficient: f64,
}

impl FitnessEvaluator {
    pub fn new(parsimony_coefficient: f64) -> Self {
        Self {
            parsimony_coefficient,
        }
    }

    /// Mean squared error over the dataset, `None` when any prediction
    /// (or the accumulated error itself) is not finite.
    pub fn mse(tree: &ExprNode, dataset: &Dataset) -> Option<f64> {
        let mut total = 0.0;
        for (x, y) in dataset.pairs() {
            let prediction = tree.evaluate(x);
            if !prediction.is_finite() {
                return None;
            }
            total += (prediction - y).powi(2);
        }
        let mse = total / dataset.len() as f64;
        mse.is_finite().then_some(mse)
    }

    /// Scores one individual, writing `mse`, `size` and `fitness` back into it.
    pub fn score(&self, individual: &mut Individual, dataset: &Dataset) -> f64 {
        individual.size = individual.tree.size();
        match Self::mse(&individual.tree, dataset) {
            Some(mse) => {
                individual.mse = mse;
                individual.fitness = mse + self.parsimony_coefficient * individual.size as f64;
            }
            None => {
                individual.mse = INVALID_SCORE;
                individual.fitness = INVALID_SCORE;
            }
        }
        individual.fitness
    }

    /// Scores a whole generation in parallel. Each score depends only on its own
    /// tree and the shared dataset.
    pub fn evaluate_population(&self, population: &mut [Individual], dataset: &Dataset) {
        population.par_iter_mut().for_each(|individual| {
            self.score(individual, dataset);
        });
    }
}

/// Stable ascending sort by fitness; invalid individuals end up last.
pub fn rank_population(population: &mut [Individual]) {
    population.sort_by(|a, b| a.fitness.total_cmp(&b.fitness));
}
