use crate::common;
use clap::{arg, value_parser, ArgMatches, Command};
use console::Style;
use miette::{bail, miette, Result};
use peopl_config::Config;
use peopl_syntax::corpus::{self, CorpusOutcome};
use std::path::PathBuf;
use tracing::debug;

pub fn command(name: impl Into<clap::builder::Str>) -> Command {
    Command::new(name)
        .about("Run corpus tests")
        .arg(arg!(--language <NAME> "Grammar to test (defaults to `default-language`)"))
        .arg(
            arg!(files: <FILE> ... "Corpus files")
                .value_parser(value_parser!(PathBuf)),
        )
}

#[test]
fn verify_cmd() {
    command("test").debug_assert();
}

pub fn run(matches: &ArgMatches, config: &Config) -> Result<()> {
    let language = matches.get_one::<String>("language").map(String::as_str);
    let files = matches
        .get_many::<PathBuf>("files")
        .ok_or_else(|| miette!("no corpus files given"))?;

    let pass = Style::new().green();
    let fail = Style::new().red().bold();
    let mut failures = Vec::new();
    let mut passed = 0;
    for path in files {
        let grammar = common::resolve_grammar(Some(path.as_path()), language, config)?;
        let contents = common::read_source(path)?;
        let entries = corpus::parse_corpus(&contents)
            .map_err(|err| miette!("{}: {}", path.display(), err))?;
        debug!(path = %path.display(), grammar = grammar.name, entries = entries.len());

        let mut parser = common::init_parser(grammar)?;
        println!("{}:", path.display());
        for outcome in corpus::run_corpus(&mut parser, &entries) {
            if outcome.passed() {
                println!("  {} {}", pass.apply_to("✓"), outcome.name);
                passed += 1;
            } else {
                println!("  {} {}", fail.apply_to("✗"), outcome.name);
                failures.push(outcome);
            }
        }
    }

    for outcome in &failures {
        print_failure(outcome);
    }
    println!("\n{} passed, {} failed", passed, failures.len());
    if !failures.is_empty() {
        bail!("{} corpus test(s) failed", failures.len());
    }
    Ok(())
}

fn print_failure(outcome: &CorpusOutcome) {
    let expected = corpus::pretty_sexp(&outcome.expected);
    let actual = corpus::pretty_sexp(&outcome.actual);
    println!(
        "\n{}:\n{}",
        outcome.name,
        similar_asserts::SimpleDiff::from_str(&expected, &actual, "expected", "actual")
    );
}
