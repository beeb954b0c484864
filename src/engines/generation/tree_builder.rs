use super::ast::ExprNode;
use super::individual::Individual;
use crate::functions::{FunctionSet, Operator};
use rand::Rng;

/// Chance of stopping early with a leaf while more than one level remains.
const EARLY_LEAF_PROBABILITY: f64 = 0.3;
/// Chance that a generated leaf is the variable rather than a constant.
const VARIABLE_LEAF_PROBABILITY: f64 = 0.7;
/// Constants are drawn uniformly from `[-CONSTANT_BOUND, CONSTANT_BOUND)`.
pub const CONSTANT_BOUND: f64 = 10.0;

/// Random constant, already rounded to rendering precision.
pub fn random_constant<R: Rng>(rng: &mut R) -> ExprNode {
    ExprNode::constant(rng.gen_range(-CONSTANT_BOUND..CONSTANT_BOUND))
}

/// Grows random expression trees from the configured operator set.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    functions: FunctionSet,
}

impl TreeBuilder {
    pub fn new(functions: FunctionSet) -> Self {
        Self { functions }
    }

    pub fn functions(&self) -> &FunctionSet {
        &self.functions
    }

    /// Grows a tree with `depth` levels of operator budget.
    ///
    /// A budget of 0 always yields a leaf, a budget of 1 always yields an operator
    /// over leaves, so the result is at most `depth + 1` deep.
    pub fn grow<R: Rng>(&self, depth: usize, rng: &mut R) -> ExprNode {
        if depth == 0 || (depth > 1 && rng.gen::<f64>() < EARLY_LEAF_PROBABILITY) {
            return self.random_leaf(rng);
        }

        match self.functions.choose(rng) {
            Operator::Unary(op) => ExprNode::unary(op, self.grow(depth - 1, rng)),
            Operator::Binary(op) => {
                let left = self.grow(depth - 1, rng);
                let right = self.grow(depth - 1, rng);
                ExprNode::binary(op, left, right)
            }
        }
    }

    pub fn random_leaf<R: Rng>(&self, rng: &mut R) -> ExprNode {
        if rng.gen::<f64>() < VARIABLE_LEAF_PROBABILITY {
            ExprNode::Variable
        } else {
            random_constant(rng)
        }
    }

    /// Grows a tree whose budget is drawn uniformly from `1..=max_depth`.
    pub fn grow_random_depth<R: Rng>(&self, max_depth: usize, rng: &mut R) -> ExprNode {
        let depth = rng.gen_range(1..=max_depth.max(1));
        self.grow(depth, rng)
    }

    pub fn initial_population<R: Rng>(
        &self,
        population_size: usize,
        max_depth: usize,
        rng: &mut R,
    ) -> Vec<Individual> {
        (0..population_size)
            .map(|_| Individual::new(self.grow_random_depth(max_depth, rng)))
            .collect()
    }
}
