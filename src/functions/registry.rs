use super::operator::{Arity, Operator};
use crate::error::{Result, SymregError};
use rand::Rng;

/// The operator set a run draws from, in configured order.
///
/// Duplicates are kept: listing an operator twice doubles its draw weight,
/// the same as repeating a tag in the configured function list.
#[derive(Debug, Clone)]
pub struct FunctionSet {
    operators: Vec<Operator>,
}

impl FunctionSet {
    pub fn new(operators: Vec<Operator>) -> Result<Self> {
        if operators.is_empty() {
            return Err(SymregError::Configuration(
                "Function set must contain at least one operator".to_string(),
            ));
        }
        Ok(Self { operators })
    }

    /// Uniform draw over the configured operators.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Operator {
        self.operators[rng.gen_range(0..self.operators.len())]
    }

    pub fn contains_arity(&self, arity: Arity) -> bool {
        self.operators.iter().any(|op| op.arity() == arity)
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl Default for FunctionSet {
    fn default() -> Self {
        Self {
            operators: Operator::all(),
        }
    }
}
