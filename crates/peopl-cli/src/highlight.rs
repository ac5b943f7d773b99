use crate::common;
use clap::{arg, value_parser, ArgMatches, Command};
use miette::{miette, IntoDiagnostic, Result};
use peopl_config::Config;
use peopl_highlight::{ansi_tag_map, highlight, highlight_html};
use std::{
    io::{self, Write},
    path::PathBuf,
};

pub fn command(name: impl Into<clap::builder::Str>) -> Command {
    Command::new(name)
        .about("Print a file with syntax highlighting")
        .arg(arg!(--language <NAME> "Grammar to use (defaults to the file extension)"))
        .arg(arg!(--html "Render HTML instead of terminal colours"))
        .arg(arg!(path: <PATH> "File to highlight").value_parser(value_parser!(PathBuf)))
}

#[test]
fn verify_cmd() {
    command("highlight").debug_assert();
}

pub fn run(matches: &ArgMatches, config: &Config) -> Result<()> {
    let language = matches.get_one::<String>("language").map(String::as_str);
    let path = matches
        .get_one::<PathBuf>("path")
        .ok_or_else(|| miette!("missing path"))?;

    let grammar = common::resolve_grammar(Some(path.as_path()), language, config)?;
    let source = common::read_source(path)?;
    let mut parser = common::init_parser(grammar)?;
    let tree = parser
        .parse(&source)
        .ok_or_else(|| miette!("{} parser has no language", grammar.display_name))?;

    let output = if matches.get_flag("html") {
        highlight_html(&source, &tree)
    } else if common::is_plain() {
        source
    } else {
        highlight(&source, &tree, &ansi_tag_map())
    };
    io::stdout()
        .write_all(output.as_bytes())
        .into_diagnostic()
}
