//! Analysis entry points.
//!
//! `analyze_tree` is a pure function of an already-parsed tree.
//! `Analyzer` adds the parsing step for raw source text.

use std::time::Duration;

use tracing::debug;

use crate::error::AnalyzeError;
use crate::parser::{self, SourceLanguage, SyntaxNode};

use super::callgraph::build_call_graph;
use super::facts::AnalysisResult;
use super::functions::discover_functions;

/// Analyze a parsed tree. `source` is the text the tree's offsets refer to.
pub fn analyze_tree<N: SyntaxNode>(root: &N, source: &str) -> AnalysisResult {
    let functions = discover_functions(root, source);
    let call_graph = build_call_graph(&functions);
    AnalysisResult {
        functions,
        call_graph,
        file_name: None,
    }
}

/// Parses source text and analyzes the resulting tree.
#[derive(Debug, Clone)]
pub struct Analyzer {
    language: SourceLanguage,
    parse_timeout: Option<Duration>,
}

impl Analyzer {
    pub fn new(language: SourceLanguage) -> Self {
        Self {
            language,
            parse_timeout: None,
        }
    }

    /// Give up on parses that take longer than `timeout`.
    pub fn with_parse_timeout(mut self, timeout: Duration) -> Self {
        self.parse_timeout = Some(timeout);
        self
    }

    pub fn language(&self) -> SourceLanguage {
        self.language
    }

    /// Analyze `source`, recording `file_name` in the result.
    ///
    /// Syntax errors do not fail the analysis; the parser recovers and
    /// whatever it produced is analyzed.
    pub fn analyze(
        &self,
        source: &str,
        file_name: Option<&str>,
    ) -> Result<AnalysisResult, AnalyzeError> {
        let parsed = parser::for_language(self.language).parse(source, self.parse_timeout)?;
        if parsed.has_errors() {
            debug!(
                file = file_name.unwrap_or("<input>"),
                "parser recovered from syntax errors"
            );
        }

        let mut result = analyze_tree(&parsed.root(), &parsed.source);
        result.file_name = file_name.map(str::to_string);

        debug!(
            file = file_name.unwrap_or("<input>"),
            language = %self.language,
            functions = result.functions.len(),
            "analysis complete"
        );
        Ok(result)
    }
}

/// Analyze source text in one call.
pub fn analyze_source(
    source: &str,
    language: SourceLanguage,
    file_name: Option<&str>,
) -> Result<AnalysisResult, AnalyzeError> {
    Analyzer::new(language).analyze(source, file_name)
}
