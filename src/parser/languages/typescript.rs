//! TypeScript and TSX language configurations for tree-sitter parsing.
//!
//! Both grammars extend the JavaScript one, so every node kind the analyzer
//! inspects keeps its JavaScript name.

use crate::parser::treesitter::{Config, TreeSitterParser};
use crate::parser::SourceLanguage;

/// Create a new TypeScript parser.
pub fn new_parser() -> TreeSitterParser {
    TreeSitterParser::new(Config {
        language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        source_language: SourceLanguage::TypeScript,
    })
}

/// Create a new TSX parser.
pub fn new_tsx_parser() -> TreeSitterParser {
    TreeSitterParser::new(Config {
        language: tree_sitter_typescript::LANGUAGE_TSX.into(),
        source_language: SourceLanguage::Tsx,
    })
}
