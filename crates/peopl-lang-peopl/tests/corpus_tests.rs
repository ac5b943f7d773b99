use peopl_syntax::{corpus, Parser};
use std::path::Path;

datatest_stable::harness!(test, "tests/corpus", r"^.*\.txt$");

fn test(path: &Path) -> datatest_stable::Result<()> {
    let contents = std::fs::read_to_string(path)?;
    let entries = corpus::parse_corpus(&contents)?;

    let mut parser = Parser::new();
    parser.set_language(peopl_lang_peopl::language())?;

    let failures = corpus::run_corpus(&mut parser, &entries)
        .into_iter()
        .filter(|outcome| !outcome.passed())
        .collect::<Vec<_>>();
    if failures.is_empty() {
        return Ok(());
    }
    Err(CorpusFailures(failures).into())
}

struct CorpusFailures(Vec<corpus::CorpusOutcome>);

impl std::fmt::Debug for CorpusFailures {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for outcome in &self.0 {
            let expected = corpus::pretty_sexp(&outcome.expected);
            let actual = corpus::pretty_sexp(&outcome.actual);
            let diff = similar_asserts::SimpleDiff::from_str(
                &expected,
                &actual,
                "expected",
                "actual",
            );
            writeln!(f, "{}:\n{}", outcome.name, diff)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for CorpusFailures {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

impl std::error::Error for CorpusFailures {}
