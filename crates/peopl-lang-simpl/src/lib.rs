//! The Simpl grammar.
//!
//! ```ignore
//! let mut parser = peopl_syntax::Parser::new();
//! parser.set_language(peopl_lang_simpl::language())?;
//! let tree = parser.parse("type Point x: Int y: Int.\n");
//! ```
#![warn(missing_docs)]

mod kinds;
mod lexer;
mod parser;

pub use kinds::{Field, Kind};
use peopl_syntax::{HighlightRule, Language, LanguageDef, LanguageFn, LANGUAGE_VERSION};

/// The file extensions (without the leading dot) of Simpl sources.
pub const FILE_TYPES: &[&str] = &["simpl"];

const HIGHLIGHTS: &[HighlightRule] = &[
    HighlightRule::new("comment", "comment"),
    HighlightRule::new("field_identifier", "function")
        .under("function_declaration")
        .in_field("name"),
    HighlightRule::new("field_identifier", "function")
        .under("call_expression")
        .in_field("callee"),
    HighlightRule::new("field_identifier", "variable.parameter").in_field("name"),
    HighlightRule::new("field_identifier", "variable"),
    HighlightRule::new("type_identifier", "type"),
    HighlightRule::new("string_literal", "string"),
    HighlightRule::new("int_literal", "number"),
    HighlightRule::new("float_literal", "number"),
    HighlightRule::new("true", "boolean"),
    HighlightRule::new("false", "boolean"),
    HighlightRule::new("type", "keyword"),
    HighlightRule::new("contract", "keyword"),
    HighlightRule::new("func", "keyword"),
    HighlightRule::new("not", "keyword"),
    HighlightRule::new("and_operator", "keyword"),
    HighlightRule::new("or_operator", "keyword"),
    HighlightRule::new("multiplicative_operator", "operator"),
    HighlightRule::new("additive_operator", "operator"),
    HighlightRule::new("comparative_operator", "operator"),
    HighlightRule::new(";", "operator"),
    HighlightRule::new("^", "operator"),
    HighlightRule::new("|", "punctuation.delimiter"),
    HighlightRule::new(".", "punctuation.delimiter"),
    HighlightRule::new(",", "punctuation.delimiter"),
    HighlightRule::new(":", "punctuation.delimiter"),
    HighlightRule::new("(", "punctuation.bracket"),
    HighlightRule::new(")", "punctuation.bracket"),
    HighlightRule::new("[", "punctuation.bracket"),
    HighlightRule::new("]", "punctuation.bracket"),
    HighlightRule::new("{", "punctuation.bracket"),
    HighlightRule::new("}", "punctuation.bracket"),
];

static SIMPL: LanguageDef = LanguageDef {
    name: "simpl",
    version: LANGUAGE_VERSION,
    node_kinds: Kind::TABLE,
    field_names: Field::TABLE,
    file_types: FILE_TYPES,
    scope: "source.simpl",
    highlights: HIGHLIGHTS,
    parse: parser::parse,
};

fn simpl() -> Option<&'static LanguageDef> {
    Some(&SIMPL)
}

/// The Simpl language accessor.
pub const LANGUAGE: LanguageFn = LanguageFn::from_raw(simpl);

/// The Simpl language.
///
/// # Panics
///
/// If the grammar's own tables are malformed, which the binding tests rule out.
pub fn language() -> Language {
    Language::new(LANGUAGE).unwrap_or_else(|err| panic!("Error loading Simpl grammar: {}", err))
}
