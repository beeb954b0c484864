pub mod fitness;
pub mod formula;

pub use fitness::{rank_population, FitnessEvaluator};
pub use formula::{parse_formula, FORMULA_GRAMMAR_VERSION};
