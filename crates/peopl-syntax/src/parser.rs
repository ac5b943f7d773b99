use crate::{Language, LanguageError, Tree};
use std::time::Instant;
use tracing::debug;

/// Turns source text into [Tree]s.
#[derive(Debug, Default)]
pub struct Parser {
    language: Option<Language>,
}

impl Parser {
    /// A parser without a language.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the language used by subsequent calls to [Parser::parse].
    pub fn set_language(&mut self, language: Language) -> Result<(), LanguageError> {
        language.check_version()?;
        self.language = Some(language);
        Ok(())
    }

    /// The current language.
    pub fn language(&self) -> Option<Language> {
        self.language
    }

    /// Parse `source`.
    ///
    /// Returns `None` if no language has been set. Syntax errors don't stop
    /// parsing, they show up as `ERROR` nodes and in [Tree::errors].
    pub fn parse(&mut self, source: &str) -> Option<Tree> {
        let language = self.language?;
        let start = Instant::now();
        let output = (language.parse_fn())(source);
        let tree = Tree::new(language, source.to_owned(), output);
        debug!(
            language = language.name(),
            bytes = source.len(),
            errors = tree.errors().len(),
            elapsed = ?start.elapsed(),
            "parsed"
        );
        Some(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::Parser;
    use crate::language::tests::words_language;

    #[test]
    fn it_needs_a_language() {
        let mut parser = Parser::new();
        assert!(parser.language().is_none());
        assert!(parser.parse("one").is_none());

        parser.set_language(words_language()).unwrap();
        assert_eq!(parser.language(), Some(words_language()));
        let tree = parser.parse("one").unwrap();
        assert_eq!(tree.source(), "one");
        assert!(tree.errors().is_empty());
        assert!(tree.report("one.words").is_none());
    }
}
