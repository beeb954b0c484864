use super::individual::Individual;
use serde::Serialize;

/// The top individuals of one generation, frozen for reporting.
///
/// Solutions are deep copies with their scores, so later breeding on the live
/// population cannot reach them.
#[derive(Debug, Clone)]
pub struct GenerationSnapshot {
    pub generation: usize,
    pub solutions: Vec<Individual>,
}

/// Plain-data view of a snapshot solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionSummary {
    pub formula: String,
    pub mse: f64,
    pub fitness: f64,
    pub size: usize,
}

impl GenerationSnapshot {
    /// Captures the first `top_k` entries of an already ranked population.
    pub fn capture(generation: usize, ranked: &[Individual], top_k: usize) -> Self {
        Self {
            generation,
            solutions: ranked.iter().take(top_k).cloned().collect(),
        }
    }

    pub fn best(&self) -> Option<&Individual> {
        self.solutions.first()
    }

    pub fn summaries(&self) -> Vec<SolutionSummary> {
        self.solutions
            .iter()
            .map(|s| SolutionSummary {
                formula: s.formula(),
                mse: s.mse,
                fitness: s.fitness,
                size: s.size,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::ast::ExprNode;
    use crate::functions::BinaryOp;

    fn ranked() -> Vec<Individual> {
        (0..4)
            .map(|i| {
                let mut ind = Individual::new(ExprNode::binary(
                    BinaryOp::Add,
                    ExprNode::Variable,
                    ExprNode::constant(i as f64),
                ));
                ind.mse = i as f64;
                ind.fitness = i as f64 + 0.03;
                ind.size = 3;
                ind
            })
            .collect()
    }

    #[test]
    fn test_capture_keeps_scores() {
        let population = ranked();
        let snapshot = GenerationSnapshot::capture(7, &population, 2);
        assert_eq!(snapshot.generation, 7);
        assert_eq!(snapshot.solutions.len(), 2);
        assert_eq!(snapshot.solutions[1], population[1]);
        assert_eq!(snapshot.best().map(|b| b.mse), Some(0.0));
    }

    #[test]
    fn test_capture_is_detached() {
        let mut population = ranked();
        let snapshot = GenerationSnapshot::capture(0, &population, 3);
        population[0].tree.replace_subtree(&[], ExprNode::constant(99.0));
        population[0].mse = 42.0;
        assert_eq!(snapshot.solutions[0].formula(), "add(x, 0.0000)");
        assert_eq!(snapshot.solutions[0].mse, 0.0);
    }

    #[test]
    fn test_top_k_larger_than_population() {
        let snapshot = GenerationSnapshot::capture(0, &ranked(), 10);
        assert_eq!(snapshot.solutions.len(), 4);
    }

    #[test]
    fn test_summaries() {
        let snapshot = GenerationSnapshot::capture(0, &ranked(), 1);
        let summaries = snapshot.summaries();
        assert_eq!(
            summaries,
            vec![SolutionSummary {
                formula: "add(x, 0.0000)".to_string(),
                mse: 0.0,
                fitness: 0.03,
                size: 3,
            }]
        );
    }
}
