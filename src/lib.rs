//! Logicmap - structural analysis of JavaScript and TypeScript for diagrams.
//!
//! Logicmap parses a source file and reports, for every function-like
//! construct, its position, variables, call sites, condition count and a
//! nested tree of `if`/loop constructs, together with a name-keyed call graph.
//! Results serialize to a stable camelCase JSON shape meant for a rendering
//! front end.
//!
//! # Architecture
//!
//! - `parser`: tree-sitter grammars and the `SyntaxNode` abstraction
//! - `analysis`: tree walking, per-function extraction, call graph, batch runs
//! - `protocol`: success/failure messages and the line-delimited request loop
//! - `config`: YAML configuration for batch runs
//! - `report`: Output formatting (pretty, JSON, messages)
//!
//! # Example
//!
//! ```
//! use logicmap::{analyze_source, SourceLanguage};
//!
//! let result = analyze_source("function f() { g(); }", SourceLanguage::JavaScript, None).unwrap();
//! assert_eq!(result.call_graph["f"], vec!["g"]);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod protocol;
pub mod report;

pub use analysis::{
    analyze_source, analyze_tree, AnalysisContext, AnalysisResult, Analyzer, FileAnalysis,
    FunctionRecord, LogicNode,
};
pub use config::Config;
pub use error::AnalyzeError;
pub use parser::{SourceLanguage, SyntaxNode};
pub use protocol::{AnalysisMessage, AnalyzeRequest};
