use super::primitives::*;
use crate::error::SymregError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arity class of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Unary,
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Log,
    Log10,
    Sqrt,
    Abs,
    Exp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Min,
    Max,
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 14] = [
        UnaryOp::Sin,
        UnaryOp::Cos,
        UnaryOp::Tan,
        UnaryOp::Asin,
        UnaryOp::Acos,
        UnaryOp::Atan,
        UnaryOp::Sinh,
        UnaryOp::Cosh,
        UnaryOp::Tanh,
        UnaryOp::Log,
        UnaryOp::Log10,
        UnaryOp::Sqrt,
        UnaryOp::Abs,
        UnaryOp::Exp,
    ];

    pub fn apply(self, x: f64) -> f64 {
        match self {
            UnaryOp::Sin => x.sin(),
            UnaryOp::Cos => x.cos(),
            UnaryOp::Tan => safe_tan(x),
            UnaryOp::Asin => safe_asin(x),
            UnaryOp::Acos => safe_acos(x),
            UnaryOp::Atan => x.atan(),
            UnaryOp::Sinh => x.sinh(),
            UnaryOp::Cosh => x.cosh(),
            UnaryOp::Tanh => x.tanh(),
            UnaryOp::Log => safe_log(x),
            UnaryOp::Log10 => safe_log10(x),
            UnaryOp::Sqrt => safe_sqrt(x),
            UnaryOp::Abs => x.abs(),
            UnaryOp::Exp => x.exp(),
        }
    }

    /// Name used both as config tag and in rendered formulas.
    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::Sin => "sin",
            UnaryOp::Cos => "cos",
            UnaryOp::Tan => "tan",
            UnaryOp::Asin => "asin",
            UnaryOp::Acos => "acos",
            UnaryOp::Atan => "atan",
            UnaryOp::Sinh => "sinh",
            UnaryOp::Cosh => "cosh",
            UnaryOp::Tanh => "tanh",
            UnaryOp::Log => "log",
            UnaryOp::Log10 => "log10",
            UnaryOp::Sqrt => "sqrt",
            UnaryOp::Abs => "abs",
            UnaryOp::Exp => "exp",
        }
    }
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 7] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Pow,
        BinaryOp::Min,
        BinaryOp::Max,
    ];

    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => protected_div(a, b),
            BinaryOp::Pow => safe_pow(a, b),
            BinaryOp::Min => nan_min(a, b),
            BinaryOp::Max => nan_max(a, b),
        }
    }

    /// Configuration tag (`+`, `protectedDiv`, ...).
    pub fn tag(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "protectedDiv",
            BinaryOp::Pow => "pow",
            BinaryOp::Min => "min",
            BinaryOp::Max => "max",
        }
    }

    /// Readable name used in rendered formulas.
    pub fn rendered_name(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::Pow => "pow",
            BinaryOp::Min => "min",
            BinaryOp::Max => "max",
        }
    }
}

/// An operator symbol from the closed catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    Unary(UnaryOp),
    Binary(BinaryOp),
}

impl Operator {
    /// Every operator in catalogue order.
    pub fn all() -> Vec<Operator> {
        BinaryOp::ALL
            .iter()
            .take(5)
            .map(|op| Operator::Binary(*op))
            .chain(UnaryOp::ALL.iter().map(|op| Operator::Unary(*op)))
            .chain([Operator::Binary(BinaryOp::Min), Operator::Binary(BinaryOp::Max)])
            .collect()
    }

    pub fn arity(self) -> Arity {
        match self {
            Operator::Unary(_) => Arity::Unary,
            Operator::Binary(_) => Arity::Binary,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Operator::Unary(op) => op.name(),
            Operator::Binary(op) => op.tag(),
        }
    }

    pub fn rendered_name(self) -> &'static str {
        match self {
            Operator::Unary(op) => op.name(),
            Operator::Binary(op) => op.rendered_name(),
        }
    }

    /// Looks up an operator by config tag or by rendered name.
    pub fn from_name(name: &str) -> Option<Operator> {
        if let Some(op) = UnaryOp::ALL.iter().find(|op| op.name() == name) {
            return Some(Operator::Unary(*op));
        }
        BinaryOp::ALL
            .iter()
            .find(|op| op.tag() == name || op.rendered_name() == name)
            .map(|op| Operator::Binary(*op))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl TryFrom<String> for Operator {
    type Error = SymregError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Operator::from_name(&value)
            .ok_or_else(|| SymregError::Configuration(format!("Unknown function: {}", value)))
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.tag().to_string()
    }
}
