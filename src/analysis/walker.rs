//! Depth-first traversal over syntax trees of any shape.
//!
//! The walker knows nothing about node kinds. It visits a node, then every
//! structural child the node exposes, in pre-order, passing the depth and
//! parent along. It never mutates the tree and does not guard against
//! cycles: parsers hand back trees.
//!
//! Pending nodes live on a heap-allocated stack, so nesting depth is bounded
//! by memory rather than by the thread's call stack.

use crate::parser::SyntaxNode;

/// Visit `root` and all of its descendants in pre-order.
///
/// The callback receives the node, its depth relative to `root` (0 for
/// `root` itself) and its parent (`None` for `root`).
pub fn walk<N, F>(root: &N, visit: &mut F)
where
    N: SyntaxNode,
    F: FnMut(&N, usize, Option<&N>),
{
    walk_from(root.clone(), visit);
}

/// Walk a list of sibling roots in order, each at depth 0 without a parent.
pub fn walk_all<N, F>(roots: &[N], visit: &mut F)
where
    N: SyntaxNode,
    F: FnMut(&N, usize, Option<&N>),
{
    for root in roots {
        walk_from(root.clone(), visit);
    }
}

fn walk_from<N, F>(root: N, visit: &mut F)
where
    N: SyntaxNode,
    F: FnMut(&N, usize, Option<&N>),
{
    let mut pending = vec![(root, 0usize)];
    // ancestors[d] is the open node at depth d on the current path
    let mut ancestors: Vec<N> = Vec::new();

    while let Some((node, depth)) = pending.pop() {
        ancestors.truncate(depth);
        visit(&node, depth, ancestors.last());
        pending.extend(node.child_nodes().into_iter().rev().map(|child| (child, depth + 1)));
        ancestors.push(node);
    }
}
