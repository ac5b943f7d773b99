//! The grammars shipped with peopl, looked up by name or file extension.

use itertools::Itertools;
use miette::Diagnostic;
use peopl_syntax::{Language, LanguageError, LanguageFn, Parser};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// A registered grammar.
#[derive(Debug, Clone, Copy)]
pub struct Grammar {
    /// Human readable name, e.g. `"PeoPl"`.
    pub display_name: &'static str,
    /// Registry name, e.g. `"peopl"`.
    pub name: &'static str,
    /// Extensions recognised without any extra configuration.
    pub file_types: &'static [&'static str],
    /// The grammar's language accessor.
    pub language_fn: LanguageFn,
}

impl Grammar {
    /// Invoke the accessor and validate the result.
    pub fn language(&self) -> Result<Language, LoadError> {
        Language::new(self.language_fn).map_err(|source| LoadError::Invalid {
            display_name: self.display_name,
            source,
        })
    }

    fn handles(&self, extension: &str) -> bool {
        self.file_types.iter().any(|file_type| *file_type == extension)
    }
}

/// Every grammar, in display order.
pub static ALL: &[Grammar] = &[
    Grammar {
        display_name: "Simpl",
        name: "simpl",
        file_types: peopl_lang_simpl::FILE_TYPES,
        language_fn: peopl_lang_simpl::LANGUAGE,
    },
    Grammar {
        display_name: "PeoPl",
        name: "peopl",
        file_types: peopl_lang_peopl::FILE_TYPES,
        language_fn: peopl_lang_peopl::LANGUAGE,
    },
];

/// Why a grammar couldn't be loaded.
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("unknown language {name:?}")]
    #[diagnostic(code(peopl::unknown_language))]
    Unknown {
        name: String,
        #[help]
        help: String,
    },
    #[error("Error loading {display_name} grammar")]
    #[diagnostic(code(peopl::invalid_grammar))]
    Invalid {
        display_name: &'static str,
        #[source]
        source: LanguageError,
    },
}

impl LoadError {
    fn unknown(name: &str) -> Self {
        Self::Unknown {
            name: name.to_owned(),
            help: format!(
                "known languages are {}",
                ALL.iter().map(|grammar| grammar.name).join(", ")
            ),
        }
    }
}

/// Look up a grammar by registry name.
pub fn find(name: &str) -> Option<&'static Grammar> {
    ALL.iter().find(|grammar| grammar.name == name)
}

/// Like [find], but an unknown name is an error.
pub fn get(name: &str) -> Result<&'static Grammar, LoadError> {
    find(name).ok_or_else(|| LoadError::unknown(name))
}

/// Load the grammar called `name`.
pub fn load(name: &str) -> Result<Language, LoadError> {
    get(name)?.language()
}

/// Pick a grammar for `path` by its extension.
///
/// `extra_file_types` pairs a grammar name with an additional extension, and
/// takes precedence over the built in file types.
pub fn for_path<'a>(
    path: &Path,
    extra_file_types: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Option<&'static Grammar> {
    let extension = path.extension()?.to_str()?;
    let grammar = extra_file_types
        .into_iter()
        .find(|(_, file_type)| *file_type == extension)
        .and_then(|(name, _)| find(name))
        .or_else(|| ALL.iter().find(|grammar| grammar.handles(extension)));
    debug!(
        path = %path.display(),
        grammar = ?grammar.map(|grammar| grammar.name),
        "resolved grammar"
    );
    grammar
}

/// Create a [Parser] for the grammar called `name`, panicking if that fails.
pub fn init_parser(name: &str) -> Parser {
    try_init_parser(name)
        .unwrap_or_else(|err| panic!("Error initialising parser with {} language: {}", name, err))
}

/// Create a [Parser] for the grammar called `name`.
pub fn try_init_parser(name: &str) -> Result<Parser, LoadError> {
    let grammar = get(name)?;
    let language = grammar.language()?;
    let mut parser = Parser::new();
    parser
        .set_language(language)
        .map_err(|source| LoadError::Invalid {
            display_name: grammar.display_name,
            source,
        })?;
    Ok(parser)
}
