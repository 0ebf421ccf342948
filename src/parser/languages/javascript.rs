//! JavaScript language configuration for tree-sitter parsing.
//!
//! The JavaScript grammar also covers JSX.

use crate::parser::treesitter::{Config, TreeSitterParser};
use crate::parser::SourceLanguage;

/// Create a new JavaScript parser.
pub fn new_parser() -> TreeSitterParser {
    TreeSitterParser::new(Config {
        language: tree_sitter_javascript::LANGUAGE.into(),
        source_language: SourceLanguage::JavaScript,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SyntaxNode;

    #[test]
    fn test_javascript_function_kinds() {
        let parser = new_parser();
        let source = r#"
function hello() {}
const arrow = () => 1;
const expr = function () {};
function* gen() {}
"#;
        let parsed = parser.parse(source, None).unwrap();
        let root = parsed.root();
        let kinds: Vec<String> = SyntaxNode::child_nodes(&root)
            .iter()
            .map(|n| n.kind().to_string())
            .collect();

        assert_eq!(kinds[0], "function_declaration");
        assert_eq!(kinds[1], "lexical_declaration");
        assert_eq!(kinds[3], "generator_function_declaration");
    }

    #[test]
    fn test_javascript_jsx() {
        let parser = new_parser();
        let parsed = parser
            .parse("const App = () => <div>{items.map(i => <b>{i}</b>)}</div>;", None)
            .unwrap();
        assert!(!parsed.has_errors());
    }
}
