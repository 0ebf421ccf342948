//! Structural analysis of parsed JavaScript/TypeScript.
//!
//! Turns a syntax tree into the facts a diagram front end draws:
//! - one record per function-like construct (nested ones included)
//! - per-function variables, call sites and condition counts
//! - a nested tree of `if`/loop constructs
//! - a name-keyed call graph
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌────────────────┐
//! │ Source text │────▶│ TreeSitter   │────▶│ SyntaxNode tree│
//! └─────────────┘     │ parser       │     └────────────────┘
//!                     └──────────────┘             │
//!                                                  ▼
//!                     ┌──────────────┐     ┌────────────────┐
//!                     │AnalysisResult│◀────│ walker +       │
//!                     │ (functions,  │     │ extractors     │
//!                     │  call graph) │     └────────────────┘
//!                     └──────────────┘
//! ```
//!
//! Everything below `analyze_tree` is generic over [`SyntaxNode`], so the
//! extractors work on any tree that exposes kinds, fields and positions.
//!
//! [`SyntaxNode`]: crate::parser::SyntaxNode

mod analyzer;
mod callgraph;
mod context;
mod facts;
mod functions;
mod kinds;
mod logic;
mod metrics;
mod walker;

pub use analyzer::{analyze_source, analyze_tree, Analyzer};
pub use callgraph::{build_call_graph, edge_count};
pub use context::{AnalysisContext, FileAnalysis};
pub use facts::{
    AnalysisResult, CallGraph, CallSite, FunctionRecord, LogicNode, ValueKind, Variable,
};
pub use functions::{discover_functions, extract_function, resolve_name, ANONYMOUS, DEFAULT_LINE_COUNT};
pub use kinds::{is_function_like, is_logical_operator, is_loop};
pub use logic::{build_logic_tree, CONDITION_PLACEHOLDER};
pub use metrics::{callee_name, infer_kind, is_condition, BodyMetrics, UNKNOWN_CALLEE};
pub use walker::{walk, walk_all};
