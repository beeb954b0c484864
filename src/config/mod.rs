pub mod autotune;
pub mod data;
pub mod evolution;
pub mod manager;
pub mod traits;

pub use autotune::{auto_tune, ProblemRegime};
pub use data::DataConfig;
pub use evolution::EvolutionConfig;
pub use manager::{AppConfig, ConfigManager};
pub use traits::ConfigSection;
