//! Error types for analysis.
//!
//! Only failures that prevent a tree from being produced at all are errors.
//! Missing positions, names or bodies inside a tree degrade to fallback
//! values instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::parser::SourceLanguage;

/// Errors that make an analysis run fail as a whole.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("failed to load {language} grammar: {source}")]
    Language {
        language: SourceLanguage,
        #[source]
        source: tree_sitter::LanguageError,
    },

    #[error("failed to parse {language} source")]
    Parse { language: SourceLanguage },

    #[error("no analyzer for `{}`", path.display())]
    UnsupportedLanguage { path: PathBuf },

    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{}` is {size} bytes, limit is {limit}", path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
}
