use crate::engines::generation::{ast::ExprNode, individual::Individual, individual::INVALID_SCORE};
use std::time::Duration;

/// How a run records its progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Only the final result is kept.
    Plain,
    /// A snapshot of the top solutions is kept for every generation.
    Report,
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub best: ExprNode,
    pub best_formula: String,
    pub fitness: f64,
    pub mse: f64,
    pub size: usize,
    /// Generations consumed, counting the terminal one.
    pub generations: usize,
    pub training_time: Duration,
}

impl RunResult {
    pub fn from_best(best: &Individual, generations: usize, training_time: Duration) -> Self {
        Self {
            best: best.tree.clone(),
            best_formula: best.formula(),
            fitness: best.fitness,
            mse: best.mse,
            size: best.size,
            generations,
            training_time,
        }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.best.evaluate(x)
    }

    /// The best formula as a callable.
    pub fn function(&self) -> impl Fn(f64) -> f64 + '_ {
        move |x| self.best.evaluate(x)
    }

    /// False when the search never found a tree with finite predictions.
    pub fn is_valid(&self) -> bool {
        self.mse < INVALID_SCORE
    }
}
