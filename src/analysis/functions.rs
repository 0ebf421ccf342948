//! Discovery of function-like constructs and their per-function records.
//!
//! Discovery is a single pre-order walk, so an outer function is always
//! recorded before the functions nested inside it. Each discovered function
//! then gets its own independent walk of its body.

use crate::parser::{node_text, SyntaxNode};

use super::facts::FunctionRecord;
use super::kinds::{self, IDENTIFIER, VARIABLE_DECLARATOR};
use super::logic::build_logic_tree;
use super::metrics::BodyMetrics;
use super::walker::walk;

/// Name used when no identifier can be resolved.
pub const ANONYMOUS: &str = "anonymous";

/// Line count reported when the parser recorded no positions.
pub const DEFAULT_LINE_COUNT: usize = 1;

/// Find every function-like construct under `root`, nested ones included.
pub fn discover_functions<N: SyntaxNode>(root: &N, source: &str) -> Vec<FunctionRecord> {
    let mut functions = Vec::new();
    walk(root, &mut |node: &N, _depth, parent: Option<&N>| {
        if kinds::is_function_like(node.kind()) {
            functions.push(extract_function(node, parent, source));
        }
    });
    functions
}

/// Build the record for one function node.
pub fn extract_function<N: SyntaxNode>(
    func: &N,
    parent: Option<&N>,
    source: &str,
) -> FunctionRecord {
    let name = resolve_name(func, parent, source);
    let mut record = match func.line_span() {
        Some(span) => FunctionRecord::new(name, span.start, span.end, span.line_count()),
        None => FunctionRecord::new(name, 0, 0, DEFAULT_LINE_COUNT),
    };

    if let Some(body) = func.field("body") {
        let metrics = BodyMetrics::collect(&body, source);
        record.variables = metrics.variables;
        record.calls = metrics.calls;
        record.conditions = metrics.conditions;
        record.logic_tree = build_logic_tree(&body, source);
    }

    record
}

/// Best-effort display name for a function.
///
/// Priority: the variable it initializes, its own name, the property key it
/// is stored under, then [`ANONYMOUS`].
pub fn resolve_name<N: SyntaxNode>(func: &N, parent: Option<&N>, source: &str) -> String {
    binding_name(func, parent, source)
        .or_else(|| func.field("name").and_then(|n| plain_text(&n, source)))
        .or_else(|| property_key_name(func, parent, source))
        .unwrap_or_else(|| ANONYMOUS.to_string())
}

/// `const foo = () => {}` names the arrow `foo`.
fn binding_name<N: SyntaxNode>(func: &N, parent: Option<&N>, source: &str) -> Option<String> {
    let declarator = parent.filter(|p| p.kind() == VARIABLE_DECLARATOR)?;
    if declarator.field("value").as_ref() != Some(func) {
        return None;
    }
    declarator
        .field("name")
        .filter(|n| n.kind() == IDENTIFIER)
        .and_then(|n| plain_text(&n, source))
}

/// `{ foo: function () {} }` and class fields `foo = () => {}`.
fn property_key_name<N: SyntaxNode>(
    func: &N,
    parent: Option<&N>,
    source: &str,
) -> Option<String> {
    let parent = parent?;
    let key = match parent.kind() {
        "pair" if parent.field("value").as_ref() == Some(func) => parent.field("key")?,
        "field_definition" | "public_field_definition"
            if parent.field("value").as_ref() == Some(func) =>
        {
            parent.field("property").or_else(|| parent.field("name"))?
        }
        _ => return None,
    };
    match key.kind() {
        "property_identifier" | "private_property_identifier" | IDENTIFIER | "number" => {
            plain_text(&key, source)
        }
        "string" => plain_text(&key, source)
            .map(|text| text.trim_matches(|c| c == '"' || c == '\'').to_string())
            .filter(|text| !text.is_empty()),
        _ => None,
    }
}

fn plain_text<N: SyntaxNode>(node: &N, source: &str) -> Option<String> {
    node_text(node, source)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::facts::{CallSite, LogicNode, ValueKind, Variable};
    use crate::parser::testing::MockNode;
    use crate::parser::{for_language, SourceLanguage};

    fn functions_of(source: &str) -> Vec<FunctionRecord> {
        let parsed = for_language(SourceLanguage::JavaScript)
            .parse(source, None)
            .unwrap();
        discover_functions(&parsed.root(), source)
    }

    fn names(functions: &[FunctionRecord]) -> Vec<&str> {
        functions.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_function_forms() {
        let functions = functions_of(
            r#"
function declared() {}
const arrow = () => {};
let expr = function () {};
var named = function inner() {};
function* gen() {}
setTimeout(function () {}, 10);
"#,
        );
        assert_eq!(
            names(&functions),
            vec!["declared", "arrow", "expr", "named", "gen", "anonymous"]
        );
    }

    #[test]
    fn test_binding_name_wins_over_own_name() {
        let functions = functions_of("const outer = function inner() {};");
        assert_eq!(names(&functions), vec!["outer"]);
    }

    #[test]
    fn test_function_as_default_value_is_not_bound() {
        // the arrow initializes nothing; it is an argument
        let functions = functions_of("const result = compute(() => 1);");
        assert_eq!(names(&functions), vec!["anonymous"]);
    }

    #[test]
    fn test_nested_functions_in_discovery_order() {
        let functions = functions_of(
            r#"
function outer() {
    const helper = (x) => x * 2;
    function deep() {
        return [1, 2].map(function (n) { return n; });
    }
}
function after() {}
"#,
        );
        assert_eq!(
            names(&functions),
            vec!["outer", "helper", "deep", "anonymous", "after"]
        );
    }

    #[test]
    fn test_method_and_property_names() {
        let functions = functions_of(
            r#"
const api = {
    fetch() {},
    "save-all": function () {},
    remove: () => {},
    [dynamic]: () => {},
};
class Store {
    load() {}
    #reset() {}
    handler = () => {};
}
"#,
        );
        assert_eq!(
            names(&functions),
            vec!["fetch", "save-all", "remove", "anonymous", "load", "#reset", "handler"]
        );
    }

    #[test]
    fn test_outer_metrics_include_nested_functions() {
        let functions = functions_of(
            r#"
function outer() {
    inner();
    function inner() {
        if (x) { log(); }
    }
}
"#,
        );
        let outer = &functions[0];
        let inner = &functions[1];
        assert_eq!(outer.callee_names(), vec!["inner", "log"]);
        assert_eq!(outer.conditions, 1);
        // the logic tree only follows direct nesting
        assert!(outer.logic_tree.is_empty());
        assert_eq!(inner.callee_names(), vec!["log"]);
        assert_eq!(inner.logic_tree.len(), 1);
    }

    #[test]
    fn test_reference_scenario() {
        let functions = functions_of(
            "function f(n){ let s=0; for(let i=0;i<n;i++){ if(i%2===0){ s+=g(i); } } return s; }",
        );
        assert_eq!(functions.len(), 1);

        let f = &functions[0];
        assert_eq!(f.name, "f");
        assert_eq!(f.conditions, 2);
        assert_eq!(
            f.variables,
            vec![
                Variable {
                    name: "s".to_string(),
                    inferred_kind: ValueKind::Number,
                },
                Variable {
                    name: "i".to_string(),
                    inferred_kind: ValueKind::Number,
                },
            ]
        );
        assert_eq!(
            f.calls,
            vec![CallSite {
                name: "g".to_string()
            }]
        );
        assert_eq!(
            f.logic_tree,
            vec![LogicNode::Loop {
                children: vec![LogicNode::If {
                    condition: "i%2===0".to_string(),
                    children: vec![],
                }],
            }]
        );
    }

    #[test]
    fn test_line_span() {
        let functions = functions_of("\n\nfunction f() {\n  a();\n  b();\n}\n");
        assert_eq!(functions[0].start_line, 3);
        assert_eq!(functions[0].end_line, 6);
        assert_eq!(functions[0].line_count, 4);
    }

    #[test]
    fn test_expression_bodied_arrow() {
        let functions = functions_of("const pick = (a, b) => a ? first(a) : second(b);");
        let pick = &functions[0];
        assert_eq!(pick.conditions, 1);
        assert_eq!(pick.callee_names(), vec!["first", "second"]);
        assert!(pick.logic_tree.is_empty());
    }

    #[test]
    fn test_function_without_body_or_positions() {
        let func = MockNode::new("function_declaration");
        let record = extract_function(&func, None, "");
        assert_eq!(record, FunctionRecord::new(ANONYMOUS.to_string(), 0, 0, DEFAULT_LINE_COUNT));
    }

    #[test]
    fn test_span_from_hand_built_node() {
        let func = MockNode::new("arrow_function")
            .lines(4, 7)
            .with_field("body", MockNode::new("statement_block"));
        let record = extract_function(&func, None, "");
        assert_eq!((record.start_line, record.end_line, record.line_count), (4, 7, 4));
        assert!(record.logic_tree.is_empty());
    }

    #[test]
    fn test_unresolvable_binding_falls_back() {
        let source = "const { a } = () => {}";
        let arrow = MockNode::new("arrow_function").at(14..22);
        let declarator = MockNode::new("variable_declarator")
            .with_field("name", MockNode::new("object_pattern").at(6..11))
            .with_field("value", arrow.clone());
        assert_eq!(resolve_name(&arrow, Some(&declarator), source), ANONYMOUS);
    }
}
