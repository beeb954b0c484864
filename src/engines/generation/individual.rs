use super::ast::ExprNode;

/// Sentinel MSE and fitness for trees that produced a non-finite value.
pub const INVALID_SCORE: f64 = f64::MAX;

/// A population member: an expression tree plus the scores of its last evaluation.
///
/// Cloning copies the scores too; use [`Individual::new`] with a cloned tree for
/// an unscored copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    pub tree: ExprNode,
    pub fitness: f64,
    pub mse: f64,
    pub size: usize,
}

impl Individual {
    pub fn new(tree: ExprNode) -> Self {
        Self {
            tree,
            fitness: INVALID_SCORE,
            mse: INVALID_SCORE,
            size: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    pub fn is_valid(&self) -> bool {
        self.mse < INVALID_SCORE
    }

    pub fn formula(&self) -> String {
        self.tree.to_string()
    }
}

impl From<ExprNode> for Individual {
    fn from(tree: ExprNode) -> Self {
        Individual::new(tree)
    }
}
