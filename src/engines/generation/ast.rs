use crate::functions::{Arity, BinaryOp, Operator, UnaryOp};
use std::fmt;

/// Name of the single input variable.
pub const VARIABLE_NAME: &str = "x";

/// Decimal places kept by constants; rendering and storage agree on it.
pub const CONSTANT_DECIMALS: i32 = 4;

/// Path from the root to a node: each step is a child index (0 = left, 1 = right).
pub type NodePath = Vec<usize>;

/// Expression tree node.
///
/// The arity class lives in the variant, so a unary node can never acquire a
/// second child and an operator swap can only stay within its own class.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprNode {
    Variable,
    Constant(f64),
    Unary(UnaryOp, Box<ExprNode>),
    Binary(BinaryOp, Box<ExprNode>, Box<ExprNode>),
}

/// Rounds to the precision constants are rendered with, so that text and value agree.
pub fn round_constant(value: f64) -> f64 {
    let scale = 10f64.powi(CONSTANT_DECIMALS);
    (value * scale).round() / scale
}

impl ExprNode {
    pub fn constant(value: f64) -> Self {
        ExprNode::Constant(round_constant(value))
    }

    pub fn unary(op: UnaryOp, child: ExprNode) -> Self {
        ExprNode::Unary(op, Box::new(child))
    }

    pub fn binary(op: BinaryOp, left: ExprNode, right: ExprNode) -> Self {
        ExprNode::Binary(op, Box::new(left), Box::new(right))
    }

    /// Builds an operator node from a catalogue symbol and its children.
    pub fn from_operator(op: Operator, left: ExprNode, right: Option<ExprNode>) -> Option<Self> {
        match (op, right) {
            (Operator::Unary(u), None) => Some(ExprNode::unary(u, left)),
            (Operator::Binary(b), Some(right)) => Some(ExprNode::binary(b, left, right)),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ExprNode::Variable | ExprNode::Constant(_))
    }

    /// Operator symbol of an internal node, `None` for leaves.
    pub fn operator(&self) -> Option<Operator> {
        match self {
            ExprNode::Unary(op, _) => Some(Operator::Unary(*op)),
            ExprNode::Binary(op, _, _) => Some(Operator::Binary(*op)),
            _ => None,
        }
    }

    pub fn arity(&self) -> Option<Arity> {
        self.operator().map(Operator::arity)
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            ExprNode::Variable => x,
            ExprNode::Constant(value) => *value,
            ExprNode::Unary(op, child) => op.apply(child.evaluate(x)),
            ExprNode::Binary(op, left, right) => op.apply(left.evaluate(x), right.evaluate(x)),
        }
    }

    pub fn size(&self) -> usize {
        match self {
            ExprNode::Variable | ExprNode::Constant(_) => 1,
            ExprNode::Unary(_, child) => 1 + child.size(),
            ExprNode::Binary(_, left, right) => 1 + left.size() + right.size(),
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            ExprNode::Variable | ExprNode::Constant(_) => 1,
            ExprNode::Unary(_, child) => 1 + child.depth(),
            ExprNode::Binary(_, left, right) => 1 + left.depth().max(right.depth()),
        }
    }

    fn children(&self) -> Vec<&ExprNode> {
        match self {
            ExprNode::Variable | ExprNode::Constant(_) => Vec::new(),
            ExprNode::Unary(_, child) => vec![child.as_ref()],
            ExprNode::Binary(_, left, right) => vec![left.as_ref(), right.as_ref()],
        }
    }

    /// Preorder paths of every node.
    pub fn node_paths(&self) -> Vec<NodePath> {
        let mut paths = Vec::new();
        self.collect_paths(&mut Vec::new(), &mut paths, false);
        paths
    }

    /// Preorder paths of the operator nodes only.
    pub fn internal_paths(&self) -> Vec<NodePath> {
        let mut paths = Vec::new();
        self.collect_paths(&mut Vec::new(), &mut paths, true);
        paths
    }

    fn collect_paths(&self, path: &mut NodePath, paths: &mut Vec<NodePath>, internal_only: bool) {
        if !(internal_only && self.is_leaf()) {
            paths.push(path.clone());
        }
        for (i, child) in self.children().into_iter().enumerate() {
            path.push(i);
            child.collect_paths(path, paths, internal_only);
            path.pop();
        }
    }

    pub fn subtree(&self, path: &[usize]) -> Option<&ExprNode> {
        let Some((first, rest)) = path.split_first() else {
            return Some(self);
        };
        match (self, first) {
            (ExprNode::Unary(_, child), 0) => child.subtree(rest),
            (ExprNode::Binary(_, left, _), 0) => left.subtree(rest),
            (ExprNode::Binary(_, _, right), 1) => right.subtree(rest),
            _ => None,
        }
    }

    pub fn subtree_mut(&mut self, path: &[usize]) -> Option<&mut ExprNode> {
        let Some((first, rest)) = path.split_first() else {
            return Some(self);
        };
        match (self, first) {
            (ExprNode::Unary(_, child), 0) => child.subtree_mut(rest),
            (ExprNode::Binary(_, left, _), 0) => left.subtree_mut(rest),
            (ExprNode::Binary(_, _, right), 1) => right.subtree_mut(rest),
            _ => None,
        }
    }

    /// Overwrites the node at `path` with `replacement`. Returns false for a dangling path.
    pub fn replace_subtree(&mut self, path: &[usize], replacement: ExprNode) -> bool {
        match self.subtree_mut(path) {
            Some(node) => {
                *node = replacement;
                true
            }
            None => false,
        }
    }

    /// Swaps the symbol of an internal node, keeping its children.
    ///
    /// Refused (returns false) when `op` belongs to a different arity class
    /// or the node is a leaf.
    pub fn set_operator(&mut self, op: Operator) -> bool {
        match (self, op) {
            (ExprNode::Unary(current, _), Operator::Unary(new)) => {
                *current = new;
                true
            }
            (ExprNode::Binary(current, _, _), Operator::Binary(new)) => {
                *current = new;
                true
            }
            _ => false,
        }
    }
}

impl fmt::Display for ExprNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprNode::Variable => f.write_str(VARIABLE_NAME),
            ExprNode::Constant(value) => {
                write!(f, "{:.*}", CONSTANT_DECIMALS as usize, value)
            }
            ExprNode::Unary(op, child) => write!(f, "{}({})", op.name(), child),
            ExprNode::Binary(op, left, right) => {
                write!(f, "{}({}, {})", op.rendered_name(), left, right)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> ExprNode {
        ExprNode::Variable
    }

    /// (x - 1) * (x - 1)
    fn square_shift() -> ExprNode {
        ExprNode::binary(
            BinaryOp::Mul,
            ExprNode::binary(BinaryOp::Sub, x(), ExprNode::constant(1.0)),
            ExprNode::binary(BinaryOp::Sub, x(), ExprNode::constant(1.0)),
        )
    }

    #[test]
    fn test_evaluate_basic() {
        let tree = square_shift();
        assert_eq!(tree.evaluate(3.0), 4.0);
        assert_eq!(tree.evaluate(-3.0), 16.0);
        assert_eq!(ExprNode::constant(2.5).evaluate(100.0), 2.5);
        assert_eq!(x().evaluate(-7.25), -7.25);
    }

    #[test]
    fn test_size_and_depth() {
        let tree = square_shift();
        assert_eq!(tree.size(), 7);
        assert_eq!(tree.depth(), 3);
        assert_eq!(x().size(), 1);
        assert_eq!(x().depth(), 1);

        let unary = ExprNode::unary(UnaryOp::Sin, square_shift());
        assert_eq!(unary.size(), 8);
        assert_eq!(unary.depth(), 4);
    }

    #[test]
    fn test_size_is_sum_of_children() {
        let tree = ExprNode::binary(
            BinaryOp::Add,
            ExprNode::unary(UnaryOp::Exp, x()),
            square_shift(),
        );
        if let ExprNode::Binary(_, left, right) = &tree {
            assert_eq!(tree.size(), 1 + left.size() + right.size());
        } else {
            unreachable!();
        }
    }

    #[test]
    fn test_guarded_evaluation() {
        let div = ExprNode::binary(BinaryOp::Div, x(), ExprNode::constant(0.0));
        assert_eq!(div.evaluate(5.0), 1.0);

        let log = ExprNode::unary(UnaryOp::Log, x());
        assert_eq!(log.evaluate(0.0), -10.0);
        assert_eq!(log.evaluate(-1.0), -10.0);

        let sqrt = ExprNode::unary(UnaryOp::Sqrt, x());
        assert_eq!(sqrt.evaluate(-4.0), 0.0);

        let asin = ExprNode::unary(UnaryOp::Asin, x());
        assert_eq!(asin.evaluate(2.0), 1.0_f64.asin());

        let cube_root = ExprNode::binary(
            BinaryOp::Pow,
            ExprNode::constant(-8.0),
            ExprNode::binary(BinaryOp::Div, ExprNode::constant(1.0), ExprNode::constant(3.0)),
        );
        assert_eq!(cube_root.evaluate(0.0), 0.0);
    }

    #[test]
    fn test_min_max_propagate_nan() {
        use crate::data::Dataset;
        use crate::engines::evaluation::fitness::FitnessEvaluator;
        use crate::engines::generation::individual::Individual;

        // exp(exp(8)) overflows, so the sine is NaN
        let inner = ExprNode::unary(
            UnaryOp::Sin,
            ExprNode::unary(UnaryOp::Exp, ExprNode::unary(UnaryOp::Exp, x())),
        );
        assert!(inner.evaluate(8.0).is_nan());

        let min = ExprNode::binary(BinaryOp::Min, inner.clone(), x());
        let max = ExprNode::binary(BinaryOp::Max, x(), inner);
        assert!(min.evaluate(8.0).is_nan());
        assert!(max.evaluate(8.0).is_nan());

        let data = Dataset::new(vec![8.0, 9.0], vec![0.0, 0.0]).unwrap();
        let mut individual = Individual::new(min);
        FitnessEvaluator::new(0.01).score(&mut individual, &data);
        assert!(!individual.is_valid());
    }

    #[test]
    fn test_render() {
        assert_eq!(square_shift().to_string(), "mul(sub(x, 1.0000), sub(x, 1.0000))");
        let tree = ExprNode::binary(
            BinaryOp::Div,
            ExprNode::unary(UnaryOp::Log10, x()),
            ExprNode::binary(BinaryOp::Max, ExprNode::constant(-2.123456), x()),
        );
        assert_eq!(tree.to_string(), "div(log10(x), max(-2.1235, x))");
        let add = ExprNode::binary(BinaryOp::Add, x(), ExprNode::binary(BinaryOp::Pow, x(), x()));
        assert_eq!(add.to_string(), "add(x, pow(x, x))");
    }

    #[test]
    fn test_constants_are_rounded() {
        assert_eq!(ExprNode::constant(3.14159265), ExprNode::Constant(3.1416));
    }

    #[test]
    fn test_paths() {
        let tree = square_shift();
        let all = tree.node_paths();
        assert_eq!(all.len(), tree.size());
        assert_eq!(all[0], Vec::<usize>::new());
        assert_eq!(all[1], vec![0]);
        assert_eq!(all[2], vec![0, 0]);

        let internal = tree.internal_paths();
        assert_eq!(internal, vec![vec![], vec![0], vec![1]]);
        assert_eq!(tree.subtree(&[1, 1]), Some(&ExprNode::Constant(1.0)));
        assert!(tree.subtree(&[0, 0, 0]).is_none());
    }

    #[test]
    fn test_replace_subtree() {
        let mut tree = square_shift();
        assert!(tree.replace_subtree(&[1], x()));
        assert_eq!(tree.to_string(), "mul(sub(x, 1.0000), x)");
        assert!(!tree.replace_subtree(&[1, 0], x()));
        assert!(tree.replace_subtree(&[], ExprNode::constant(4.0)));
        assert_eq!(tree, ExprNode::Constant(4.0));
    }

    #[test]
    fn test_set_operator_keeps_arity() {
        let mut tree = square_shift();
        assert!(tree.set_operator(Operator::Binary(BinaryOp::Add)));
        assert!(!tree.set_operator(Operator::Unary(UnaryOp::Sin)));
        assert_eq!(tree.arity(), Some(Arity::Binary));
        assert_eq!(tree.size(), 7);

        let mut leaf = x();
        assert!(!leaf.set_operator(Operator::Binary(BinaryOp::Add)));
    }
}
