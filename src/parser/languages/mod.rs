//! Language-specific tree-sitter configurations.
//!
//! Each language module provides a factory for its parser. Parsers are
//! created once and shared; they only hold the grammar handle.

pub mod javascript;
pub mod typescript;

use once_cell::sync::OnceCell;

use super::{SourceLanguage, TreeSitterParser};

/// Static storage for the JavaScript parser.
static JAVASCRIPT_PARSER: OnceCell<TreeSitterParser> = OnceCell::new();

/// Static storage for the TypeScript parser.
static TYPESCRIPT_PARSER: OnceCell<TreeSitterParser> = OnceCell::new();

/// Static storage for the TSX parser.
static TSX_PARSER: OnceCell<TreeSitterParser> = OnceCell::new();

/// Get the shared parser for a language.
pub fn for_language(language: SourceLanguage) -> &'static TreeSitterParser {
    match language {
        SourceLanguage::JavaScript => JAVASCRIPT_PARSER.get_or_init(javascript::new_parser),
        SourceLanguage::TypeScript => TYPESCRIPT_PARSER.get_or_init(typescript::new_parser),
        SourceLanguage::Tsx => TSX_PARSER.get_or_init(typescript::new_tsx_parser),
    }
}

/// Get a parser for the given file extension (with or without the dot).
/// Returns None if no grammar handles the extension.
pub fn for_extension(ext: &str) -> Option<&'static TreeSitterParser> {
    SourceLanguage::from_extension(ext).map(for_language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry() {
        let parser = for_extension(".js").expect("js parser");
        assert_eq!(parser.language(), SourceLanguage::JavaScript);

        let parser = for_extension("tsx").expect("tsx parser");
        assert_eq!(parser.language(), SourceLanguage::Tsx);
    }

    #[test]
    fn test_unregistered_extension() {
        assert!(for_extension(".unknown").is_none());
    }

    #[test]
    fn test_parsers_are_shared() {
        let a = for_language(SourceLanguage::TypeScript) as *const TreeSitterParser;
        let b = for_language(SourceLanguage::TypeScript) as *const TreeSitterParser;
        assert_eq!(a, b);
    }
}
