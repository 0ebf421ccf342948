//! Name-keyed call graph assembly.
//!
//! Edges are matched by name only. When two functions share a name the
//! later one in discovery order owns the entry.

use super::facts::{CallGraph, FunctionRecord};

/// Map each function name to the names it calls, in call order.
pub fn build_call_graph(functions: &[FunctionRecord]) -> CallGraph {
    functions
        .iter()
        .map(|f| (f.name.clone(), f.callee_names()))
        .collect()
}

/// Total number of caller/callee pairs, duplicates included.
pub fn edge_count(graph: &CallGraph) -> usize {
    graph.values().map(Vec::len).sum()
}
