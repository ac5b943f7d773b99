//! The PeoPl grammar.
//!
//! ```ignore
//! let mut parser = peopl_syntax::Parser::new();
//! parser.set_language(peopl_lang_peopl::language())?;
//! let tree = parser.parse("func main() => Nothing print(line: \"hi\")..");
//! ```
#![warn(missing_docs)]

mod kinds;
mod lexer;
mod parser;

pub use kinds::{Field, Kind};
use peopl_syntax::{HighlightRule, Language, LanguageDef, LanguageFn, LANGUAGE_VERSION};

/// The file extensions (without the leading dot) of PeoPl sources.
pub const FILE_TYPES: &[&str] = &["ppl", "peopl"];

const HIGHLIGHTS: &[HighlightRule] = &[
    HighlightRule::new("comment", "comment"),
    HighlightRule::new("argument_name", "function")
        .under("function_definition")
        .in_field("name"),
    HighlightRule::new("argument_name", "function")
        .under("call_expression")
        .in_field("command"),
    HighlightRule::new("argument_name", "variable.parameter").in_field("name"),
    HighlightRule::new("argument_name", "property").under("access_expression"),
    HighlightRule::new("argument_name", "variable"),
    HighlightRule::new("type_name", "type"),
    HighlightRule::new("nothing", "constant.builtin"),
    HighlightRule::new("never", "constant.builtin"),
    HighlightRule::new("string_literal", "string"),
    HighlightRule::new("int_literal", "number"),
    HighlightRule::new("float_literal", "number"),
    HighlightRule::new("bool_literal", "boolean"),
    HighlightRule::new("namespace", "keyword"),
    HighlightRule::new("type", "keyword"),
    HighlightRule::new("func", "keyword"),
    HighlightRule::new("not_operator", "keyword"),
    HighlightRule::new("and_operator", "keyword"),
    HighlightRule::new("or_operator", "keyword"),
    HighlightRule::new("multiplicative_operator", "operator"),
    HighlightRule::new("additive_operator", "operator"),
    HighlightRule::new("comparative_operator", "operator"),
    HighlightRule::new("pipe_operator", "operator"),
    HighlightRule::new("=>", "operator"),
    HighlightRule::new("->", "operator"),
    HighlightRule::new("=", "operator"),
    HighlightRule::new("^", "operator"),
    HighlightRule::new("|", "punctuation.delimiter"),
    HighlightRule::new("..", "punctuation.delimiter"),
    HighlightRule::new(".", "punctuation.delimiter"),
    HighlightRule::new(",", "punctuation.delimiter"),
    HighlightRule::new(":", "punctuation.delimiter"),
    HighlightRule::new("::", "punctuation.delimiter"),
    HighlightRule::new("(", "punctuation.bracket"),
    HighlightRule::new(")", "punctuation.bracket"),
    HighlightRule::new("[", "punctuation.bracket"),
    HighlightRule::new("]", "punctuation.bracket"),
    HighlightRule::new("{", "punctuation.bracket"),
    HighlightRule::new("}", "punctuation.bracket"),
    HighlightRule::new("<", "punctuation.bracket").under("type_arguments"),
    HighlightRule::new(">", "punctuation.bracket").under("type_arguments"),
];

static PEOPL: LanguageDef = LanguageDef {
    name: "peopl",
    version: LANGUAGE_VERSION,
    node_kinds: Kind::TABLE,
    field_names: Field::TABLE,
    file_types: FILE_TYPES,
    scope: "source.peopl",
    highlights: HIGHLIGHTS,
    parse: parser::parse,
};

fn peopl() -> Option<&'static LanguageDef> {
    Some(&PEOPL)
}

/// The PeoPl language accessor.
pub const LANGUAGE: LanguageFn = LanguageFn::from_raw(peopl);

/// The PeoPl language.
///
/// # Panics
///
/// If the grammar's own tables are malformed, which the binding tests rule out.
pub fn language() -> Language {
    Language::new(LANGUAGE).unwrap_or_else(|err| panic!("Error loading PeoPl grammar: {}", err))
}
