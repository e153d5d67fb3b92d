use std::path::Path;

use an_core::Language;
use tree_sitter::{Language as Grammar, Parser};

use crate::error::ParserError;

/// Static lookup from a file extension to the tree-sitter grammar that reads it.
///
/// TypeScript is the only language with two grammars: `.tsx` files need the
/// JSX-aware one, everything else under `Language::TypeScript` uses the plain one.
pub struct ParserRegistry;

impl ParserRegistry {
    pub fn grammar_for_extension(lang: Language, ext: &str) -> Grammar {
        let tsx = ext.eq_ignore_ascii_case("tsx");
        match (lang, tsx) {
            (Language::Python, _) => tree_sitter_python::LANGUAGE.into(),
            (Language::TypeScript, true) => tree_sitter_typescript::LANGUAGE_TSX.into(),
            (Language::TypeScript, false) => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            (Language::JavaScript, _) => tree_sitter_javascript::LANGUAGE.into(),
            (Language::Go, _) => tree_sitter_go::LANGUAGE.into(),
        }
    }

    /// Language and raw extension of `path`. Pure path inspection; a file that
    /// does not exist still resolves.
    pub fn resolve(path: &Path) -> Result<(Language, String), ParserError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        Language::from_extension(ext)
            .map(|lang| (lang, ext.to_owned()))
            .ok_or_else(|| ParserError::UnsupportedLanguage {
                path: path.display().to_string(),
            })
    }

    /// A fresh parser loaded with the grammar for `ext`.
    ///
    /// Fails only when the grammar was built against an ABI the linked
    /// tree-sitter runtime does not accept.
    pub fn parser_for(lang: Language, ext: &str, path: &str) -> Result<Parser, ParserError> {
        let mut parser = Parser::new();
        parser
            .set_language(&Self::grammar_for_extension(lang, ext))
            .map_err(|e| ParserError::ParseFailed {
                path: path.to_owned(),
                reason: format!("grammar rejected by runtime: {e}"),
            })?;
        Ok(parser)
    }
}
