mod python;

pub use python::PythonParser;

use crate::models::{ImportStatement, Language};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Failed to initialize parser: {0}")]
    InitError(String),
    #[error("Unsupported language: {0:?}")]
    UnsupportedLanguage(Language),
}

/// Trait for language-specific import parsers
pub trait ImportParser {
    /// Parse source code and extract import statements.
    ///
    /// A source that fails to parse yields an empty list rather than an
    /// error; per-file failures never abort a project scan.
    fn parse(&mut self, source: &str) -> Vec<ImportStatement>;

    /// Get the language this parser handles
    fn language(&self) -> Language;
}

/// Create a parser for the given language
pub fn create_parser(language: &Language) -> Result<Box<dyn ImportParser>, ParserError> {
    match language {
        Language::Python => Ok(Box::new(PythonParser::new()?)),
    }
}
