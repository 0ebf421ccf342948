//! Node kinds the analyzer recognizes.
//!
//! Names follow the tree-sitter JavaScript grammar, which the TypeScript
//! grammars extend without renaming these constructs.

/// Function-like constructs. `function` is the older grammar's name for
/// function expressions.
pub const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "function_expression",
    "function",
    "arrow_function",
    "generator_function_declaration",
    "generator_function",
    "method_definition",
];

/// Every loop form, for-in and for-of included.
pub const LOOP_KINDS: &[&str] = &[
    "for_statement",
    "for_in_statement",
    "while_statement",
    "do_statement",
];

/// Short-circuit operators of a `binary_expression`.
pub const LOGICAL_OPERATORS: &[&str] = &["&&", "||", "??"];

pub const IF_STATEMENT: &str = "if_statement";
pub const TERNARY_EXPRESSION: &str = "ternary_expression";
pub const SWITCH_STATEMENT: &str = "switch_statement";
pub const BINARY_EXPRESSION: &str = "binary_expression";
pub const STATEMENT_BLOCK: &str = "statement_block";
pub const ELSE_CLAUSE: &str = "else_clause";
pub const LABELED_STATEMENT: &str = "labeled_statement";
pub const PARENTHESIZED_EXPRESSION: &str = "parenthesized_expression";
pub const VARIABLE_DECLARATOR: &str = "variable_declarator";
pub const CALL_EXPRESSION: &str = "call_expression";
pub const MEMBER_EXPRESSION: &str = "member_expression";
pub const IDENTIFIER: &str = "identifier";
pub const TEMPLATE_STRING: &str = "template_string";
pub const COMMENT: &str = "comment";

pub fn is_function_like(kind: &str) -> bool {
    FUNCTION_KINDS.contains(&kind)
}

pub fn is_loop(kind: &str) -> bool {
    LOOP_KINDS.contains(&kind)
}

pub fn is_logical_operator(kind: &str) -> bool {
    LOGICAL_OPERATORS.contains(&kind)
}
