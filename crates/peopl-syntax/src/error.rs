use crate::Span;
use itertools::Itertools;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// How deeply grammar rules may nest before parsing gives up on a statement.
pub const MAX_NESTING_DEPTH: usize = 128;

/// There was a problem parsing the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Where the error occurred.
    pub span: Span,
    /// Things we expected to parse.
    pub expected: Vec<String>,
    /// The offending source text, `None` at the end of input.
    pub found: Option<String>,
}

impl SyntaxError {
    /// Something other than `expected` was found at `span`.
    pub fn unexpected(
        span: Span,
        expected: impl IntoIterator<Item = impl Into<String>>,
        found: Option<&str>,
    ) -> Self {
        Self {
            span,
            expected: expected.into_iter().map(Into::into).collect(),
            found: found.map(str::to_owned),
        }
    }

    /// Nesting went past [MAX_NESTING_DEPTH] at `span`.
    pub fn nested_too_deeply(span: Span, found: Option<&str>) -> Self {
        Self::unexpected(
            span,
            [format!("at most {} levels of nesting", MAX_NESTING_DEPTH)],
            found,
        )
    }

    fn expected_list(&self) -> String {
        self.expected.iter().join(", ")
    }

    fn found_description(&self) -> String {
        self.found
            .as_ref()
            .map_or_else(|| String::from("end of input"), |found| format!("{:?}", found))
    }

    /// Create a pretty error report.
    pub fn into_report(self, name: impl AsRef<str>, input: String) -> SyntaxErrorReport {
        let input = NamedSource::new(name, input);
        let location = SourceSpan::from(self.span);
        let unexpected = self.found_description();
        if self.expected.is_empty() {
            SyntaxErrorReport::Unexpected {
                input,
                location,
                unexpected,
            }
        } else {
            SyntaxErrorReport::Expected {
                input,
                location,
                expected: self.expected_list(),
                unexpected,
            }
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.expected.is_empty() {
            write!(f, "unexpected {}", self.found_description())
        } else {
            write!(
                f,
                "expected {}, found {}",
                self.expected_list(),
                self.found_description()
            )
        }
    }
}

impl std::error::Error for SyntaxError {}

/// A pretty syntax error.
#[derive(Error, Debug, Diagnostic)]
pub enum SyntaxErrorReport {
    /// Syntax error without suggestions.
    #[error("syntax error")]
    #[diagnostic(severity(Error))]
    Unexpected {
        /// The offending input.
        #[source_code]
        input: NamedSource,
        /// Where the error occurred.
        #[label("unexpected {unexpected}")]
        location: SourceSpan,
        /// What was found instead.
        unexpected: String,
    },
    /// Syntax error with "expected" suggestions.
    #[error("syntax error")]
    #[diagnostic(severity(Error))]
    Expected {
        /// The offending input.
        #[source_code]
        input: NamedSource,
        /// Where the error occurred.
        #[label("expected {expected}, found {unexpected}")]
        location: SourceSpan,
        /// Things we expected to parse.
        expected: String,
        /// What was found instead.
        unexpected: String,
    },
}

/// Every syntax error in a file.
#[derive(Error, Debug, Diagnostic)]
#[error("{name} has {count} syntax error(s)", count = .errors.len())]
#[diagnostic(severity(Error))]
pub struct SyntaxErrorsReport {
    /// The file name.
    pub name: String,
    /// The individual errors.
    #[related]
    pub errors: Vec<SyntaxErrorReport>,
}

#[cfg(test)]
mod tests {
    use super::{SyntaxError, SyntaxErrorReport};
    use crate::Span;

    #[test]
    fn it_describes_errors() {
        let error = SyntaxError::unexpected(Span::new(4, 5), ["`)`", "`,`"], Some(";"));
        assert_eq!(error.to_string(), r#"expected `)`, `,`, found ";""#);

        let error = SyntaxError::unexpected(Span::empty(9), Vec::<String>::new(), None);
        assert_eq!(error.to_string(), "unexpected end of input");

        let error = SyntaxError::nested_too_deeply(Span::new(128, 129), Some("("));
        assert_eq!(
            error.to_string(),
            r#"expected at most 128 levels of nesting, found "(""#
        );
    }

    #[test]
    fn it_reports_errors() {
        let error = SyntaxError::unexpected(Span::new(4, 5), ["`)`"], Some(";"));
        let report = error.into_report("golden", String::from("(a b;"));
        assert!(matches!(
            report,
            SyntaxErrorReport::Expected { ref expected, .. } if expected == "`)`"
        ));
    }
}
