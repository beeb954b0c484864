//! Symbolic regression by genetic programming.
//!
//! Searches for a closed-form formula `f(x)` fitting a set of `(x, y)` samples.
//! Candidate formulas are expression trees over a configurable operator
//! catalogue; the search scores them by mean squared error plus a size penalty
//! and breeds them with tournament selection, subtree crossover and mutation.
//!
//! ```no_run
//! use symreg::{EvolutionConfig, EvolutionEngine};
//!
//! let xs: Vec<f64> = (-3..=6).map(f64::from).collect();
//! let ys: Vec<f64> = xs.iter().map(|x| (x - 1.0).powi(2)).collect();
//!
//! let mut engine = EvolutionEngine::new(EvolutionConfig::default())?;
//! let result = engine.fit(&xs, &ys)?;
//! println!("{} (MSE {:.6})", result.best_formula, result.mse);
//! # Ok::<(), symreg::SymregError>(())
//! ```

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod functions;
pub mod report;
pub mod types;

pub use config::{auto_tune, AppConfig, ConfigManager, DataConfig, EvolutionConfig};
pub use data::{CsvConnector, Dataset};
pub use engines::evaluation::{parse_formula, FitnessEvaluator};
pub use engines::generation::{
    EvolutionEngine, ExprNode, GenerationSnapshot, Individual, ProgressCallback,
};
pub use error::{Result, SymregError};
pub use functions::{BinaryOp, FunctionSet, Operator, UnaryOp};
pub use report::HtmlReport;
pub use types::{RunMode, RunResult};
