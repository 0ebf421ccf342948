//! Per-function body metrics: declared variables, call sites and the
//! number of branching/looping constructs.
//!
//! The body is walked in full, including nested function bodies, so an
//! outer function's metrics cover everything lexically inside it.

use crate::parser::{node_text, SyntaxNode};

use super::facts::{CallSite, ValueKind, Variable};
use super::kinds::{
    self, BINARY_EXPRESSION, CALL_EXPRESSION, IDENTIFIER, IF_STATEMENT, MEMBER_EXPRESSION,
    SWITCH_STATEMENT, TEMPLATE_STRING, TERNARY_EXPRESSION, VARIABLE_DECLARATOR,
};
use super::walker::walk;

/// Callee name used when the callee is neither a name nor a property access.
pub const UNKNOWN_CALLEE: &str = "unknown";

/// Metrics collected from one function body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyMetrics {
    pub variables: Vec<Variable>,
    pub calls: Vec<CallSite>,
    pub conditions: usize,
}

impl BodyMetrics {
    /// Walk `body` and collect its metrics.
    pub fn collect<N: SyntaxNode>(body: &N, source: &str) -> Self {
        let mut metrics = Self::default();
        walk(body, &mut |node: &N, _depth, _parent| metrics.observe(node, source));
        metrics
    }

    fn observe<N: SyntaxNode>(&mut self, node: &N, source: &str) {
        if is_condition(node) {
            self.conditions += 1;
        }

        match node.kind() {
            VARIABLE_DECLARATOR => {
                if let Some(name) = node.field("name").and_then(|n| binding_text(&n, source)) {
                    self.variables.push(Variable {
                        name,
                        inferred_kind: infer_kind(node.field("value").as_ref()),
                    });
                }
            }
            "for_in_statement" => {
                // `for (const x of xs)` declares `x` without a declarator node
                if node.field("kind").is_some() {
                    if let Some(name) = node.field("left").and_then(|n| binding_text(&n, source)) {
                        self.variables.push(Variable {
                            name,
                            inferred_kind: ValueKind::Unknown,
                        });
                    }
                }
            }
            // a tagged template (html`...`) is not recorded as a call
            CALL_EXPRESSION if !is_tagged_template(node) => self.calls.push(CallSite {
                name: callee_name(node, source),
            }),
            _ => {}
        }
    }
}

/// Whether a node counts as a branching or looping construct.
pub fn is_condition<N: SyntaxNode>(node: &N) -> bool {
    match node.kind() {
        IF_STATEMENT | TERNARY_EXPRESSION | SWITCH_STATEMENT => true,
        BINARY_EXPRESSION => node
            .field("operator")
            .is_some_and(|op| kinds::is_logical_operator(op.kind())),
        kind => kinds::is_loop(kind),
    }
}

/// Classify an initializer by its literal type.
pub fn infer_kind<N: SyntaxNode>(value: Option<&N>) -> ValueKind {
    let Some(value) = value else {
        return ValueKind::Unknown;
    };
    match value.kind() {
        "number" => ValueKind::Number,
        "string" | "template_string" => ValueKind::String,
        "true" | "false" => ValueKind::Boolean,
        _ => ValueKind::Expression,
    }
}

/// Name of the function a `call_expression` invokes.
pub fn callee_name<N: SyntaxNode>(call: &N, source: &str) -> String {
    let name = call.field("function").and_then(|callee| match callee.kind() {
        IDENTIFIER => node_text(&callee, source),
        MEMBER_EXPRESSION => callee
            .field("property")
            .and_then(|property| node_text(&property, source)),
        _ => None,
    });
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => UNKNOWN_CALLEE.to_string(),
    }
}

fn is_tagged_template<N: SyntaxNode>(call: &N) -> bool {
    call.field("arguments")
        .is_some_and(|args| args.kind() == TEMPLATE_STRING)
}

/// Text of a binding target: an identifier, or a destructuring pattern verbatim.
fn binding_text<N: SyntaxNode>(node: &N, source: &str) -> Option<String> {
    node_text(node, source)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
