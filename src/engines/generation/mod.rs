pub mod ast;
pub mod evolution_engine;
pub mod individual;
pub mod operators;
pub mod progress;
pub mod snapshot;
pub mod tree_builder;

pub use ast::{ExprNode, NodePath};
pub use evolution_engine::{EvolutionEngine, ProgressCallback};
pub use individual::{Individual, INVALID_SCORE};
pub use progress::{
    ChannelProgressCallback, ConsoleProgressCallback, ProgressMessage, SilentProgressCallback,
};
pub use snapshot::{GenerationSnapshot, SolutionSummary};
pub use tree_builder::TreeBuilder;
