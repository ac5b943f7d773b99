//! Corpus tests: named inputs paired with the tree they should parse to.
//!
//! ```text
//! ==================
//! Simple call
//! ==================
//!
//! foo(a: 1)..
//!
//! ---
//!
//! (source_file (call_expression ...))
//! ```
//!
//! Entries are separated by header lines of at least three `=`, and input
//! is separated from the expected S-expression by a line of at least three
//! `-`. Whitespace in the S-expressions is not significant.

use crate::Parser;
use thiserror::Error;

/// A single corpus test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    /// The test name.
    pub name: String,
    /// Source text to parse.
    pub input: String,
    /// Expected S-expression.
    pub expected: String,
}

/// A malformed corpus file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CorpusError {
    /// Content appeared before the first header.
    #[error("line {line}: expected a `===` header")]
    MissingHeader {
        /// One-based line number.
        line: usize,
    },
    /// A header wasn't followed by a name and a closing header.
    #[error("line {line}: expected a test name between `===` headers")]
    MissingName {
        /// One-based line number.
        line: usize,
    },
    /// An entry has no `---` divider.
    #[error("test {name:?} has no `---` divider")]
    MissingDivider {
        /// The test name.
        name: String,
    },
}

fn is_rule(line: &str, fill: char) -> bool {
    let line = line.trim();
    line.len() >= 3 && line.chars().all(|c| c == fill)
}

/// Read the entries of a corpus file.
pub fn parse_corpus(contents: &str) -> Result<Vec<CorpusEntry>, CorpusError> {
    let lines = contents.lines().collect::<Vec<_>>();
    let mut entries = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        if lines[index].trim().is_empty() {
            index += 1;
            continue;
        }
        if !is_rule(lines[index], '=') {
            return Err(CorpusError::MissingHeader { line: index + 1 });
        }
        let name_line = index + 1;
        let closing = lines
            .iter()
            .skip(name_line)
            .position(|line| is_rule(line, '='))
            .map(|offset| name_line + offset)
            .ok_or(CorpusError::MissingName { line: name_line + 1 })?;
        let name = lines[name_line..closing].join(" ").trim().to_owned();
        if name.is_empty() {
            return Err(CorpusError::MissingName { line: name_line + 1 });
        }

        let body_start = closing + 1;
        let body_end = lines
            .iter()
            .skip(body_start)
            .position(|line| is_rule(line, '='))
            .map_or(lines.len(), |offset| body_start + offset);
        let body = &lines[body_start..body_end];
        let divider = body
            .iter()
            .rposition(|line| is_rule(line, '-'))
            .ok_or_else(|| CorpusError::MissingDivider { name: name.clone() })?;

        entries.push(CorpusEntry {
            name,
            input: trim_blank_lines(&body[..divider]),
            expected: normalize_sexp(&body[divider + 1..].join("\n")),
        });
        index = body_end;
    }
    Ok(entries)
}

fn trim_blank_lines(lines: &[&str]) -> String {
    let start = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(start, |last| last + 1);
    lines[start..end].join("\n")
}

/// Collapse whitespace so S-expressions can be compared structurally.
pub fn normalize_sexp(sexp: &str) -> String {
    let spaced = sexp.replace('(', " ( ").replace(')', " ) ");
    let mut normalized = String::with_capacity(sexp.len());
    for atom in spaced.split_whitespace() {
        let glue = normalized.is_empty() || normalized.ends_with('(') || atom == ")";
        if !glue {
            normalized.push(' ');
        }
        normalized.push_str(atom);
    }
    normalized
}

/// Lay an S-expression out with one node per line, for readable diffs.
pub fn pretty_sexp(sexp: &str) -> String {
    let spaced = sexp.replace('(', " ( ").replace(')', " ) ");
    let mut pretty = String::with_capacity(sexp.len() * 2);
    let mut depth = 0usize;
    let mut after_field = false;
    for atom in spaced.split_whitespace() {
        match atom {
            "(" => {
                if after_field {
                    pretty.push(' ');
                } else if !pretty.is_empty() {
                    newline(&mut pretty, depth);
                }
                pretty.push('(');
                depth += 1;
            }
            ")" => {
                pretty.push(')');
                depth = depth.saturating_sub(1);
            }
            field if field.ends_with(':') => {
                newline(&mut pretty, depth);
                pretty.push_str(field);
            }
            atom => {
                if !pretty.ends_with('(') {
                    pretty.push(' ');
                }
                pretty.push_str(atom);
            }
        }
        after_field = atom.ends_with(':');
    }
    pretty
}

fn newline(pretty: &mut String, depth: usize) {
    pretty.push('\n');
    pretty.extend(std::iter::repeat(' ').take(depth * 2));
}

/// The result of running one [CorpusEntry].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusOutcome {
    /// The test name.
    pub name: String,
    /// Normalized expected S-expression.
    pub expected: String,
    /// Normalized actual S-expression.
    pub actual: String,
}

impl CorpusOutcome {
    /// Did the tree match?
    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

/// Parse each entry with `parser` and compare against the expected trees.
///
/// Entries are skipped (and reported as failures with an empty actual tree)
/// if the parser has no language.
pub fn run_corpus(parser: &mut Parser, entries: &[CorpusEntry]) -> Vec<CorpusOutcome> {
    entries
        .iter()
        .map(|entry| {
            let actual = parser
                .parse(&entry.input)
                .map(|tree| normalize_sexp(&tree.root_node().to_sexp()))
                .unwrap_or_default();
            CorpusOutcome {
                name: entry.name.clone(),
                expected: entry.expected.clone(),
                actual,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::tests::words_language;

    static CORPUS: &str = r#"
=====
Single word
=====

one

---

(document
  head: (word))

==================
Missing word
==================
one,,two
---------
(document head: (word) (ERROR) (word))
"#;

    #[test]
    fn it_parses_corpus_files() {
        let entries = parse_corpus(CORPUS).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Single word");
        assert_eq!(entries[0].input, "one");
        assert_eq!(entries[0].expected, "(document head: (word))");
        assert_eq!(entries[1].name, "Missing word");
        assert_eq!(entries[1].input, "one,,two");
    }

    #[test]
    fn it_rejects_malformed_corpus_files() {
        assert_eq!(
            parse_corpus("one\n"),
            Err(CorpusError::MissingHeader { line: 1 })
        );
        assert_eq!(
            parse_corpus("===\nname\n===\none\n"),
            Err(CorpusError::MissingDivider {
                name: String::from("name")
            })
        );
        assert_eq!(
            parse_corpus("===\nname\n"),
            Err(CorpusError::MissingName { line: 2 })
        );
    }

    #[test]
    fn it_normalizes_sexps() {
        assert_eq!(
            normalize_sexp("( a\n   b: ( c )\n(d))"),
            "(a b: (c) (d))"
        );
    }

    #[test]
    fn it_pretty_prints_sexps() {
        assert_eq!(
            pretty_sexp("(document head: (word) (ERROR) (word (x)))"),
            "(document\n  head: (word)\n  (ERROR)\n  (word\n    (x)))"
        );
    }

    #[test]
    fn it_runs_corpus_entries() {
        let mut parser = Parser::new();
        parser.set_language(words_language()).unwrap();
        let outcomes = run_corpus(&mut parser, &parse_corpus(CORPUS).unwrap());
        assert!(outcomes.iter().all(CorpusOutcome::passed), "{:#?}", outcomes);

        let mut parser = Parser::new();
        let outcomes = run_corpus(&mut parser, &parse_corpus(CORPUS).unwrap());
        assert!(!outcomes[0].passed());
    }
}
