use crate::common;
use clap::{arg, value_parser, ArgMatches, Command};
use miette::{bail, miette, Result};
use peopl_config::Config;
use peopl_languages::Grammar;
use std::path::PathBuf;

pub fn command(name: impl Into<clap::builder::Str>) -> Command {
    Command::new(name)
        .about("Parse files and print their syntax trees")
        .arg(arg!(--language <NAME> "Grammar to use (defaults to the file extension)"))
        .arg(arg!(-q --quiet "Only report syntax errors"))
        .arg(arg!(--stdin "Read source from stdin"))
        .arg(arg!(paths: [PATH] ... "Files to parse").value_parser(value_parser!(PathBuf)))
}

#[test]
fn verify_cmd() {
    command("parse").debug_assert();
}

pub fn run(matches: &ArgMatches, config: &Config) -> Result<()> {
    let language = matches.get_one::<String>("language").map(String::as_str);
    let quiet = matches.get_flag("quiet");
    let paths = matches
        .get_many::<PathBuf>("paths")
        .map(|paths| paths.collect::<Vec<_>>())
        .unwrap_or_default();

    if matches.get_flag("stdin") {
        if !paths.is_empty() {
            bail!("can only specify `--stdin` or paths, not both")
        }
        let source = common::read_stdin()?;
        let grammar = common::resolve_grammar(None, language, config)?;
        if !parse_source("stdin", grammar, &source, quiet)? {
            bail!("stdin has syntax errors");
        }
        return Ok(());
    }

    if paths.is_empty() {
        bail!("nothing to parse, pass some paths or `--stdin`")
    }
    let mut failed = 0;
    for path in paths {
        let grammar = common::resolve_grammar(Some(path.as_path()), language, config)?;
        let source = common::read_source(path)?;
        if !parse_source(&path.to_string_lossy(), grammar, &source, quiet)? {
            failed += 1;
        }
    }
    if failed > 0 {
        bail!("{} file(s) have syntax errors", failed);
    }
    Ok(())
}

/// Returns `false` if there were syntax errors, which are printed to stderr.
fn parse_source(name: &str, grammar: &Grammar, source: &str, quiet: bool) -> Result<bool> {
    let mut parser = common::init_parser(grammar)?;
    let tree = parser
        .parse(source)
        .ok_or_else(|| miette!("{} parser has no language", grammar.display_name))?;

    if !quiet {
        println!("{}", tree.root_node().to_sexp());
    }
    match tree.report(name) {
        Some(report) => {
            eprintln!("{:?}", miette::Report::new(report));
            Ok(false)
        }
        None => Ok(true),
    }
}
