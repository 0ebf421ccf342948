//! Nested if/loop summary of a function body.
//!
//! Only direct statement nesting is followed: blocks and labels are spliced
//! into their parent list, `else` branches land next to the `if` they belong
//! to, and anything that is not an if, a loop or a block contributes nothing.
//!
//! The builder keeps its own work stack, so deeply nested input does not
//! grow the call stack.

use crate::parser::{node_text, SyntaxNode};

use super::facts::LogicNode;
use super::kinds::{
    self, COMMENT, ELSE_CLAUSE, IF_STATEMENT, LABELED_STATEMENT, PARENTHESIZED_EXPRESSION,
    STATEMENT_BLOCK,
};

/// Condition text used when the source of a test cannot be recovered.
pub const CONDITION_PLACEHOLDER: &str = "...";

enum Task<N> {
    Visit(N),
    /// Finish the innermost open if/loop and attach it to its parent list.
    Close,
}

enum Open {
    If(String),
    Loop,
}

/// Build the logic forest for a function body (or any statement).
pub fn build_logic_tree<N: SyntaxNode>(body: &N, source: &str) -> Vec<LogicNode> {
    let mut roots = Vec::new();
    let mut open: Vec<(Open, Vec<LogicNode>)> = Vec::new();
    let mut tasks = vec![Task::Visit(body.clone())];

    while let Some(task) = tasks.pop() {
        let stmt = match task {
            Task::Visit(stmt) => stmt,
            Task::Close => {
                let Some((header, children)) = open.pop() else {
                    continue;
                };
                let node = match header {
                    Open::If(condition) => LogicNode::If {
                        condition,
                        children,
                    },
                    Open::Loop => LogicNode::Loop { children },
                };
                match open.last_mut() {
                    Some((_, siblings)) => siblings.push(node),
                    None => roots.push(node),
                }
                continue;
            }
        };

        match stmt.kind() {
            STATEMENT_BLOCK | ELSE_CLAUSE => {
                tasks.extend(stmt.child_nodes().into_iter().rev().map(Task::Visit));
            }
            LABELED_STATEMENT => {
                if let Some(body) = stmt.field("body") {
                    tasks.push(Task::Visit(body));
                }
            }
            IF_STATEMENT => {
                open.push((Open::If(condition_text(&stmt, source)), Vec::new()));
                // popped in reverse: consequence, close, then the else branch
                if let Some(alternative) = stmt.field("alternative") {
                    tasks.push(Task::Visit(alternative));
                }
                tasks.push(Task::Close);
                if let Some(consequence) = stmt.field("consequence") {
                    tasks.push(Task::Visit(consequence));
                }
            }
            kind if kinds::is_loop(kind) => {
                open.push((Open::Loop, Vec::new()));
                tasks.push(Task::Close);
                if let Some(body) = stmt.field("body") {
                    tasks.push(Task::Visit(body));
                }
            }
            _ => {}
        }
    }

    roots
}

/// Raw source of an if statement's test, without the surrounding parens
/// or comments inside them.
fn condition_text<N: SyntaxNode>(if_stmt: &N, source: &str) -> String {
    let test = if_stmt.field("condition").map(|cond| {
        if cond.kind() == PARENTHESIZED_EXPRESSION {
            cond.child_nodes()
                .into_iter()
                .find(|child| child.kind() != COMMENT)
                .unwrap_or(cond)
        } else {
            cond
        }
    });

    test.as_ref()
        .and_then(|t| node_text(t, source))
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map_or_else(|| CONDITION_PLACEHOLDER.to_string(), str::to_string)
}
