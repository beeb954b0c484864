use super::traits::ConfigSection;
use crate::engines::generation::ast::VARIABLE_NAME;
use crate::error::{Result, SymregError};
use crate::functions::{FunctionSet, Operator};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameters of one symbolic regression run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub max_generations: usize,
    /// Share of the ranked population copied unchanged into the next generation.
    pub survival_rate: f64,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    /// Depth ceiling for bred children and depth budget of random trees.
    pub max_depth: usize,
    /// Depth budget of subtrees grown by mutation.
    pub max_mutation_depth: usize,
    pub parsimony_coefficient: f64,
    pub tournament_size: usize,
    /// Solutions kept per generation in report mode.
    pub top_solutions_to_track: usize,
    pub enable_logging: bool,
    /// Destination of the HTML report.
    pub output_path: PathBuf,
    pub functions: Vec<Operator>,
    pub terminals: Vec<String>,
    /// Fixed RNG seed; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 2000,
            max_generations: 500,
            survival_rate: 0.05,
            crossover_rate: 0.8,
            mutation_rate: 0.9,
            max_depth: 4,
            max_mutation_depth: 4,
            parsimony_coefficient: 0.01,
            tournament_size: 3,
            top_solutions_to_track: 5,
            enable_logging: false,
            output_path: PathBuf::from("report.html"),
            functions: Operator::all(),
            terminals: vec![VARIABLE_NAME.to_string()],
            seed: None,
        }
    }
}

impl EvolutionConfig {
    pub fn function_set(&self) -> Result<FunctionSet> {
        FunctionSet::new(self.functions.clone())
    }
}

fn check_rate(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SymregError::Configuration(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )));
    }
    Ok(())
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(SymregError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if self.max_generations == 0 {
            return Err(SymregError::Configuration(
                "Max generations must be at least 1".to_string(),
            ));
        }
        check_rate("Survival rate", self.survival_rate)?;
        check_rate("Crossover rate", self.crossover_rate)?;
        check_rate("Mutation rate", self.mutation_rate)?;
        // A grown operator tree is at least two levels deep, so a ceiling of 1
        // would reject every bred child.
        if self.max_depth < 2 {
            return Err(SymregError::Configuration(
                "Max depth must be at least 2".to_string(),
            ));
        }
        if self.max_mutation_depth == 0 {
            return Err(SymregError::Configuration(
                "Max mutation depth must be at least 1".to_string(),
            ));
        }
        if !self.parsimony_coefficient.is_finite() || self.parsimony_coefficient < 0.0 {
            return Err(SymregError::Configuration(
                "Parsimony coefficient must be a non-negative number".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(SymregError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        if self.functions.is_empty() {
            return Err(SymregError::Configuration(
                "At least one function is required".to_string(),
            ));
        }
        if self.terminals.len() != 1 || self.terminals[0] != VARIABLE_NAME {
            return Err(SymregError::Configuration(format!(
                "Terminals must be exactly [\"{}\"], got {:?}",
                VARIABLE_NAME, self.terminals
            )));
        }
        Ok(())
    }
}
