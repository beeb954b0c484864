pub mod operator;
pub mod primitives;
pub mod registry;

pub use operator::{Arity, BinaryOp, Operator, UnaryOp};
pub use registry::FunctionSet;
