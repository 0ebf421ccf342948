//! Tree-sitter backed parsing.
//!
//! Tree-sitter is error tolerant: malformed input still yields a tree, with
//! `ERROR` and `MISSING` nodes standing in for what could not be parsed. The
//! only hard failures are a grammar that cannot be loaded and a parse that
//! was cancelled by the timeout.

use std::ops::Range;
use std::time::Duration;

use tree_sitter::{Language, Node, Parser as TsParser, Tree};

use super::{LineSpan, SourceLanguage, SyntaxNode};
use crate::error::AnalyzeError;

impl<'tree> SyntaxNode for Node<'tree> {
    fn kind(&self) -> &str {
        Node::kind(self)
    }

    fn line_span(&self) -> Option<LineSpan> {
        // tree-sitter rows are 0-indexed
        Some(LineSpan::new(
            self.start_position().row + 1,
            self.end_position().row + 1,
        ))
    }

    fn offsets(&self) -> Option<Range<usize>> {
        Some(self.start_byte()..self.end_byte())
    }

    fn child_nodes(&self) -> Vec<Self> {
        let mut cursor = self.walk();
        self.named_children(&mut cursor).collect()
    }

    fn field(&self, name: &str) -> Option<Self> {
        self.child_by_field_name(name)
    }
}

/// Configuration for a tree-sitter language parser.
#[derive(Clone)]
pub struct Config {
    /// The tree-sitter language
    pub language: Language,
    /// Which dialect this grammar parses
    pub source_language: SourceLanguage,
}

/// Tree-sitter based parser for one language.
pub struct TreeSitterParser {
    config: Config,
}

impl TreeSitterParser {
    /// Create a new tree-sitter parser with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn language(&self) -> SourceLanguage {
        self.config.source_language
    }

    /// Parse source code into a tree.
    ///
    /// `tree_sitter::Parser` is not `Sync`, so a fresh one is created per call.
    pub fn parse(
        &self,
        source: &str,
        timeout: Option<Duration>,
    ) -> Result<ParsedSource, AnalyzeError> {
        let language = self.config.source_language;
        let mut parser = TsParser::new();
        parser
            .set_language(&self.config.language)
            .map_err(|source| AnalyzeError::Language { language, source })?;
        if let Some(timeout) = timeout {
            parser.set_timeout_micros(timeout.as_micros().min(u64::MAX as u128) as u64);
        }

        let tree = parser
            .parse(source, None)
            .ok_or(AnalyzeError::Parse { language })?;

        Ok(ParsedSource {
            tree,
            source: source.to_string(),
            language,
        })
    }
}

/// A parsed tree together with the text it was parsed from.
pub struct ParsedSource {
    /// The tree-sitter parse tree.
    pub tree: Tree,
    /// The original source code (kept for node text extraction).
    pub source: String,
    /// The dialect the source was parsed as.
    pub language: SourceLanguage,
}

impl ParsedSource {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Whether the parser had to recover from syntax errors.
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }
}
