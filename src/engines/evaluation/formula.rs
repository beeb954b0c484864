//! Reader for the canonical formula text produced by `ExprNode`'s `Display`.
//!
//! Grammar (version [`FORMULA_GRAMMAR_VERSION`]):
//!
//! ```text
//! expr   := "x" | number | name "(" expr ")" | name "(" expr "," expr ")"
//! number := "-"? digits ("." digits)?
//! ```
//!
//! `name` is a rendered operator name (`add`, `sub`, `mul`, `div`, `pow`,
//! `min`, `max`, or a unary function name). The HTML report's JavaScript
//! helpers understand exactly this text, so any change here bumps the version.

use crate::engines::generation::ast::{ExprNode, VARIABLE_NAME};
use crate::error::{Result, SymregError};
use crate::functions::Operator;

pub const FORMULA_GRAMMAR_VERSION: u32 = 1;

pub fn parse_formula(text: &str) -> Result<ExprNode> {
    let mut parser = Parser { text, pos: 0 };
    let node = parser.expr()?;
    parser.skip_whitespace();
    if parser.pos != text.len() {
        return Err(parser.error("trailing input"));
    }
    Ok(node)
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.text.len() - trimmed.len();
    }

    fn error(&self, message: &str) -> SymregError {
        SymregError::Formula(format!("{} at offset {} in '{}'", message, self.pos, self.text))
    }

    fn expect(&mut self, c: char) -> Result<()> {
        self.skip_whitespace();
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", c)))
        }
    }

    fn take_while<F: Fn(char) -> bool>(&mut self, pred: F) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn expr(&mut self) -> Result<ExprNode> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == '-' || c.is_ascii_digit() => self.number(),
            Some(c) if c.is_ascii_alphabetic() => self.call_or_variable(),
            Some(c) => Err(self.error(&format!("unexpected '{}'", c))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn number(&mut self) -> Result<ExprNode> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.pos += 1;
        }
        self.take_while(|c| c.is_ascii_digit() || c == '.');
        let literal = &self.text[start..self.pos];
        literal
            .parse::<f64>()
            .map(ExprNode::Constant)
            .map_err(|_| self.error(&format!("invalid number '{}'", literal)))
    }

    fn call_or_variable(&mut self) -> Result<ExprNode> {
        let name = self.take_while(|c| c.is_ascii_alphanumeric());
        if name == VARIABLE_NAME {
            return Ok(ExprNode::Variable);
        }
        let op = Operator::from_name(name)
            .ok_or_else(|| self.error(&format!("unknown function '{}'", name)))?;

        self.expect('(')?;
        let left = self.expr()?;
        self.skip_whitespace();
        let right = if self.peek() == Some(',') {
            self.pos += 1;
            Some(self.expr()?)
        } else {
            None
        };
        self.expect(')')?;

        ExprNode::from_operator(op, left, right)
            .ok_or_else(|| self.error(&format!("wrong number of arguments for '{}'", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::tree_builder::TreeBuilder;
    use crate::functions::{BinaryOp, FunctionSet, UnaryOp};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_simple() {
        let tree = parse_formula("mul(sub(x, 1.0000), sub(x, 1.0000))").unwrap();
        assert_eq!(tree.evaluate(4.0), 9.0);
        assert_eq!(tree.size(), 7);
    }

    #[test]
    fn test_parse_raw_tags_and_negatives() {
        let tree = parse_formula("max(-2.5000, log10(x))").unwrap();
        assert_eq!(
            tree,
            ExprNode::binary(
                BinaryOp::Max,
                ExprNode::Constant(-2.5),
                ExprNode::unary(UnaryOp::Log10, ExprNode::Variable)
            )
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_formula("").is_err());
        assert!(parse_formula("foo(x)").is_err());
        assert!(parse_formula("sin(x, x)").is_err());
        assert!(parse_formula("add(x)").is_err());
        assert!(parse_formula("add(x, x) x").is_err());
        assert!(parse_formula("add(x, x").is_err());
        assert!(parse_formula("1.2.3").is_err());
    }

    #[test]
    fn test_render_parse_round_trip() {
        let mut rng = StdRng::seed_from_u64(11);
        let builder = TreeBuilder::new(FunctionSet::default());
        let samples = [-3.0, -1.5, -0.2, 0.0, 0.7, 1.0, 2.5, 6.0];

        for _ in 0..200 {
            let tree = builder.grow(5, &mut rng);
            let parsed = parse_formula(&tree.to_string()).unwrap();
            for x in samples {
                let expected = tree.evaluate(x);
                let actual = parsed.evaluate(x);
                if expected.is_finite() {
                    assert!(
                        (expected - actual).abs() <= 1e-9 * expected.abs().max(1.0),
                        "{} at x={}: {} vs {}",
                        tree,
                        x,
                        expected,
                        actual
                    );
                } else {
                    assert_eq!(expected.is_nan(), actual.is_nan());
                }
            }
        }
    }
}
