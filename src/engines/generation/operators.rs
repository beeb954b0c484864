use crate::engines::generation::{
    ast::ExprNode,
    individual::Individual,
    tree_builder::{random_constant, TreeBuilder},
};
use rand::Rng;

/// Chance that a mutated leaf becomes the variable (otherwise a fresh constant).
const LEAF_TO_VARIABLE_PROBABILITY: f64 = 0.5;
/// Chance that a mutated operator node is regrown instead of symbol-swapped.
const SUBTREE_REPLACEMENT_PROBABILITY: f64 = 0.7;
/// Draws allowed when looking for a same-arity replacement operator.
const OPERATOR_SWAP_ATTEMPTS: usize = 10;

/// Tournament selection: lowest fitness among K uniform draws (with replacement).
/// Ties go to the first candidate drawn.
pub fn tournament_selection<'a, R: Rng>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Individual {
    let mut best = &population[rng.gen_range(0..population.len())];

    for _ in 1..tournament_size {
        let candidate = &population[rng.gen_range(0..population.len())];
        if candidate.fitness < best.fitness {
            best = candidate;
        }
    }

    best
}

/// Subtree crossover: exchange one randomly chosen operator subtree between copies
/// of the parents.
///
/// When either parent is a bare leaf the unmodified copies are returned.
pub fn crossover<R: Rng>(
    parent1: &ExprNode,
    parent2: &ExprNode,
    rng: &mut R,
) -> (ExprNode, ExprNode) {
    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();

    let nodes1 = child1.internal_paths();
    let nodes2 = child2.internal_paths();
    if nodes1.is_empty() || nodes2.is_empty() {
        return (child1, child2);
    }

    let point1 = &nodes1[rng.gen_range(0..nodes1.len())];
    let point2 = &nodes2[rng.gen_range(0..nodes2.len())];

    // Both donors are taken from the parents before either child is touched.
    let (Some(subtree1), Some(subtree2)) = (parent1.subtree(point1), parent2.subtree(point2))
    else {
        return (child1, child2);
    };
    child1.replace_subtree(point1, subtree2.clone());
    child2.replace_subtree(point2, subtree1.clone());

    (child1, child2)
}

/// Point mutation of one uniformly chosen node.
///
/// * leaf: becomes the variable or a fresh constant;
/// * operator: regrown to `max_mutation_depth`, or its symbol swapped for another
///   of the same arity (left unchanged if none turns up within the attempt budget).
pub fn mutate<R: Rng>(
    tree: &mut ExprNode,
    builder: &TreeBuilder,
    max_mutation_depth: usize,
    rng: &mut R,
) {
    let nodes = tree.node_paths();
    let target_path = &nodes[rng.gen_range(0..nodes.len())];
    let Some(target) = tree.subtree_mut(target_path) else {
        return;
    };

    let r = rng.gen::<f64>();
    if target.is_leaf() {
        *target = if r < LEAF_TO_VARIABLE_PROBABILITY {
            ExprNode::Variable
        } else {
            random_constant(rng)
        };
    } else if r < SUBTREE_REPLACEMENT_PROBABILITY {
        *target = builder.grow(max_mutation_depth, rng);
    } else {
        swap_operator(target, builder, rng);
    }
}

/// Replaces the node's symbol with a same-arity operator from the builder's set.
/// Returns whether a swap happened.
pub fn swap_operator<R: Rng>(node: &mut ExprNode, builder: &TreeBuilder, rng: &mut R) -> bool {
    let Some(arity) = node.arity() else {
        return false;
    };
    for _ in 0..OPERATOR_SWAP_ATTEMPTS {
        let candidate = builder.functions().choose(rng);
        if candidate.arity() == arity {
            return node.set_operator(candidate);
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{Arity, BinaryOp, FunctionSet, Operator, UnaryOp};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scored(tree: ExprNode, fitness: f64) -> Individual {
        let mut ind = Individual::new(tree);
        ind.fitness = fitness;
        ind
    }

    fn sample_tree() -> ExprNode {
        ExprNode::binary(
            BinaryOp::Add,
            ExprNode::unary(UnaryOp::Sin, ExprNode::Variable),
            ExprNode::binary(BinaryOp::Mul, ExprNode::Variable, ExprNode::constant(2.0)),
        )
    }

    #[test]
    fn test_tournament_picks_lowest_fitness() {
        let population = vec![
            scored(ExprNode::constant(1.0), 5.0),
            scored(ExprNode::constant(2.0), 1.0),
            scored(ExprNode::constant(3.0), 3.0),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        // A tournament covering many draws almost surely includes the best.
        let winner = tournament_selection(&population, 50, &mut rng);
        assert_eq!(winner.fitness, 1.0);
    }

    #[test]
    fn test_tournament_of_one_is_uniform_draw() {
        let population: Vec<Individual> =
            (0..10).map(|i| scored(ExprNode::constant(i as f64), i as f64)).collect();
        let mut rng = StdRng::seed_from_u64(8);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(tournament_selection(&population, 1, &mut rng).fitness as i64);
        }
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn test_tournament_ties_keep_first_drawn() {
        let population = vec![
            scored(ExprNode::constant(1.0), 2.0),
            scored(ExprNode::constant(2.0), 2.0),
        ];
        let mut rng = StdRng::seed_from_u64(9);
        let mut first_rng = rng.clone();
        let first_index = first_rng.gen_range(0..population.len());
        let winner = tournament_selection(&population, 4, &mut rng);
        assert_eq!(winner.tree, population[first_index].tree);
    }

    #[test]
    fn test_crossover_conserves_total_size() {
        let mut rng = StdRng::seed_from_u64(10);
        let builder = TreeBuilder::new(FunctionSet::default());
        for _ in 0..200 {
            let a = builder.grow(4, &mut rng);
            let b = builder.grow(4, &mut rng);
            let (c1, c2) = crossover(&a, &b, &mut rng);
            assert_eq!(c1.size() + c2.size(), a.size() + b.size());
        }
    }

    #[test]
    fn test_crossover_with_leaf_parent_returns_copies() {
        let mut rng = StdRng::seed_from_u64(11);
        let leaf = ExprNode::Variable;
        let tree = sample_tree();
        let (c1, c2) = crossover(&leaf, &tree, &mut rng);
        assert_eq!(c1, leaf);
        assert_eq!(c2, tree);
    }

    #[test]
    fn test_crossover_children_are_independent() {
        let mut rng = StdRng::seed_from_u64(12);
        let a = sample_tree();
        let b = ExprNode::unary(
            UnaryOp::Exp,
            ExprNode::binary(BinaryOp::Sub, ExprNode::Variable, ExprNode::constant(1.0)),
        );
        let (mut c1, mut c2) = crossover(&a, &b, &mut rng);

        // Mutating the children must not leak into the parents or each other.
        let c2_before = c2.clone();
        c1.replace_subtree(&[], ExprNode::constant(0.0));
        assert_eq!(c2, c2_before);
        c2.replace_subtree(&[], ExprNode::constant(0.0));
        assert_eq!(a, sample_tree());
        assert_eq!(b.size(), 4);
    }

    #[test]
    fn test_mutating_leaf_yields_leaf() {
        let builder = TreeBuilder::new(FunctionSet::default());
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..200 {
            let mut tree = ExprNode::constant(3.0);
            mutate(&mut tree, &builder, 4, &mut rng);
            assert!(tree.is_leaf());
        }
    }

    #[test]
    fn test_swap_operator_preserves_arity() {
        let builder = TreeBuilder::new(FunctionSet::default());
        let mut rng = StdRng::seed_from_u64(14);
        for _ in 0..200 {
            let mut unary = ExprNode::unary(UnaryOp::Sin, ExprNode::Variable);
            swap_operator(&mut unary, &builder, &mut rng);
            assert_eq!(unary.arity(), Some(Arity::Unary));
            assert_eq!(unary.size(), 2);

            let mut binary = sample_tree();
            swap_operator(&mut binary, &builder, &mut rng);
            assert_eq!(binary.arity(), Some(Arity::Binary));
            assert_eq!(binary.size(), 6);
        }
    }

    #[test]
    fn test_swap_operator_without_match_leaves_node() {
        let functions = FunctionSet::new(vec![Operator::Binary(BinaryOp::Add)]).unwrap();
        let builder = TreeBuilder::new(functions);
        let mut rng = StdRng::seed_from_u64(15);
        let mut node = ExprNode::unary(UnaryOp::Cos, ExprNode::Variable);
        assert!(!swap_operator(&mut node, &builder, &mut rng));
        assert_eq!(node, ExprNode::unary(UnaryOp::Cos, ExprNode::Variable));
    }

    #[test]
    fn test_mutate_changes_at_most_reachable_nodes() {
        let builder = TreeBuilder::new(FunctionSet::default());
        let mut rng = StdRng::seed_from_u64(16);
        for _ in 0..200 {
            let mut tree = sample_tree();
            mutate(&mut tree, &builder, 3, &mut rng);
            // Regrown subtrees are bounded by the mutation depth plus the path to them.
            assert!(tree.depth() <= 3 + 1 + 2);
        }
    }
}
