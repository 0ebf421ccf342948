//! Parsing interface between source text and the structural analyzer.
//!
//! This module provides:
//! - `SyntaxNode` trait: the minimal, schema-agnostic view of a syntax tree
//!   node the analyzer consumes (kind tag, positions, reflective children)
//! - `SourceLanguage`: the dialects the bundled grammars understand
//! - Tree-sitter implementations of the above, served from a registry keyed
//!   by language

use std::fmt;
use std::ops::Range;
use std::path::Path;
use std::str::FromStr;

pub mod languages;
pub mod treesitter;

pub use languages::{for_extension, for_language};
pub use treesitter::{ParsedSource, TreeSitterParser};

/// Inclusive, 1-indexed line span of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of lines covered, never less than one.
    pub fn line_count(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }
}

/// A node of a parsed syntax tree, as seen by the analyzer.
///
/// The tree shape is owned by the external parser and varies per construct,
/// so the analyzer only relies on a discriminant tag, optional position
/// metadata and reflective access to children. Anything else about the
/// node stays opaque.
pub trait SyntaxNode: Clone + PartialEq {
    /// Discriminant tag, e.g. `"if_statement"`.
    fn kind(&self) -> &str;

    /// Start and end lines, if the parser recorded them.
    fn line_span(&self) -> Option<LineSpan>;

    /// Byte offsets into the source text, if the parser recorded them.
    fn offsets(&self) -> Option<Range<usize>>;

    /// Structural children in source order.
    ///
    /// Punctuation and keyword tokens are not tree-shaped values and are
    /// left out; they remain reachable through [`SyntaxNode::field`].
    fn child_nodes(&self) -> Vec<Self>;

    /// Look up a child by field name (`"body"`, `"condition"`, ...).
    fn field(&self, name: &str) -> Option<Self>;
}

/// Source text covered by a node, if its offsets are known and valid.
pub fn node_text<'s, N: SyntaxNode>(node: &N, source: &'s str) -> Option<&'s str> {
    node.offsets().and_then(|range| source.get(range))
}

/// Languages the bundled grammars can parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
    JavaScript,
    TypeScript,
    Tsx,
}

impl SourceLanguage {
    pub const ALL: [SourceLanguage; 3] = [
        SourceLanguage::JavaScript,
        SourceLanguage::TypeScript,
        SourceLanguage::Tsx,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceLanguage::JavaScript => "javascript",
            SourceLanguage::TypeScript => "typescript",
            SourceLanguage::Tsx => "tsx",
        }
    }

    /// File extensions (without dot) handled by this language.
    pub fn file_extensions(&self) -> &'static [&'static str] {
        match self {
            SourceLanguage::JavaScript => &["js", "jsx", "mjs", "cjs"],
            SourceLanguage::TypeScript => &["ts", "mts", "cts"],
            SourceLanguage::Tsx => &["tsx"],
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.file_extensions().contains(&ext.as_str()))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "javascript" | "js" | "jsx" => Ok(SourceLanguage::JavaScript),
            "typescript" | "ts" => Ok(SourceLanguage::TypeScript),
            "tsx" => Ok(SourceLanguage::Tsx),
            _ => Err(format!("unknown language: {}", s)),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Hand-built trees for exercising the analyzer without a parser.

    use super::{LineSpan, SyntaxNode};
    use std::ops::Range;

    #[derive(Debug, Clone, PartialEq)]
    pub struct MockNode {
        kind: String,
        lines: Option<LineSpan>,
        offsets: Option<Range<usize>>,
        token: bool,
        children: Vec<(Option<String>, MockNode)>,
    }

    impl MockNode {
        pub fn new(kind: &str) -> Self {
            Self {
                kind: kind.to_string(),
                lines: None,
                offsets: None,
                token: false,
                children: Vec::new(),
            }
        }

        /// An anonymous token such as an operator.
        pub fn token(kind: &str) -> Self {
            Self {
                token: true,
                ..Self::new(kind)
            }
        }

        pub fn lines(mut self, start: usize, end: usize) -> Self {
            self.lines = Some(LineSpan::new(start, end));
            self
        }

        pub fn at(mut self, range: Range<usize>) -> Self {
            self.offsets = Some(range);
            self
        }

        pub fn with_child(mut self, child: MockNode) -> Self {
            self.children.push((None, child));
            self
        }

        pub fn with_field(mut self, name: &str, child: MockNode) -> Self {
            self.children.push((Some(name.to_string()), child));
            self
        }
    }

    impl SyntaxNode for MockNode {
        fn kind(&self) -> &str {
            &self.kind
        }

        fn line_span(&self) -> Option<LineSpan> {
            self.lines
        }

        fn offsets(&self) -> Option<Range<usize>> {
            self.offsets.clone()
        }

        fn child_nodes(&self) -> Vec<Self> {
            self.children
                .iter()
                .filter(|(_, child)| !child.token)
                .map(|(_, child)| child.clone())
                .collect()
        }

        fn field(&self, name: &str) -> Option<Self> {
            self.children
                .iter()
                .find(|(field, _)| field.as_deref() == Some(name))
                .map(|(_, child)| child.clone())
        }
    }
}
