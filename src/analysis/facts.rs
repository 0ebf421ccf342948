//! Fact structures produced by analysis.
//!
//! These are the plain-data shapes handed to renderers. Field names are
//! serialized in camelCase and must stay stable.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Callee names keyed by caller name.
pub type CallGraph = BTreeMap<String, Vec<String>>;

/// Heuristic classification of a variable's initial value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Number,
    String,
    Boolean,
    Expression,
    Unknown,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Boolean => "boolean",
            ValueKind::Expression => "expression",
            ValueKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A declared variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub name: String,
    pub inferred_kind: ValueKind,
}

/// A call expression found in a function body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    /// Callee name: identifier, accessed property, or `"unknown"`.
    pub name: String,
}

/// A node of the nested control-flow summary of one function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LogicNode {
    If {
        condition: String,
        children: Vec<LogicNode>,
    },
    Loop {
        children: Vec<LogicNode>,
    },
}

impl LogicNode {
    pub fn children(&self) -> &[LogicNode] {
        match self {
            LogicNode::If { children, .. } | LogicNode::Loop { children } => children,
        }
    }

    /// Nesting depth of this node, counting itself.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(LogicNode::depth).max().unwrap_or(0)
    }
}

/// Everything extracted for one function-like construct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRecord {
    pub name: String,
    /// 1-indexed; 0 when the parser recorded no position.
    pub start_line: usize,
    /// 1-indexed; 0 when the parser recorded no position.
    pub end_line: usize,
    pub line_count: usize,
    /// Branching and looping constructs anywhere in the body.
    pub conditions: usize,
    pub variables: Vec<Variable>,
    pub calls: Vec<CallSite>,
    pub logic_tree: Vec<LogicNode>,
}

impl FunctionRecord {
    /// A record with empty collections.
    pub fn new(name: String, start_line: usize, end_line: usize, line_count: usize) -> Self {
        Self {
            name,
            start_line,
            end_line,
            line_count,
            conditions: 0,
            variables: Vec::new(),
            calls: Vec::new(),
            logic_tree: Vec::new(),
        }
    }

    pub fn callee_names(&self) -> Vec<String> {
        self.calls.iter().map(|c| c.name.clone()).collect()
    }

    /// Deepest if/loop nesting in the logic tree.
    pub fn max_nesting(&self) -> usize {
        self.logic_tree.iter().map(LogicNode::depth).max().unwrap_or(0)
    }
}

/// The output of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Functions in discovery order (outer before inner).
    pub functions: Vec<FunctionRecord>,
    pub call_graph: CallGraph,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl AnalysisResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// First function with the given name.
    pub fn find_function(&self, name: &str) -> Option<&FunctionRecord> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn total_conditions(&self) -> usize {
        self.functions.iter().map(|f| f.conditions).sum()
    }
}
