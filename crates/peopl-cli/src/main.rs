mod common;
mod corpus;
mod highlight;
mod languages;
mod parse;
mod version;

use clap::{arg, value_parser, ArgMatches, Command};
use miette::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use version::Version;

static SUBCOMMAND_PARSE: &str = "parse";
static SUBCOMMAND_HIGHLIGHT: &str = "highlight";
static SUBCOMMAND_LANGUAGES: &str = "languages";
static SUBCOMMAND_TEST: &str = "test";

fn command() -> Command {
    Command::new("peopl")
        .bin_name("peopl")
        .version(env!("CARGO_PKG_VERSION"))
        .disable_help_subcommand(true)
        .subcommand_required(true)
        .about("Tools for the Simpl and PeoPl grammars")
        .arg(
            arg!(--config <FILE> "Config file (defaults to ./peopl.toml)")
                .global(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .subcommand(parse::command(SUBCOMMAND_PARSE).display_order(0))
        .subcommand(highlight::command(SUBCOMMAND_HIGHLIGHT).display_order(1))
        .subcommand(corpus::command(SUBCOMMAND_TEST).display_order(2))
        .subcommand(languages::command(SUBCOMMAND_LANGUAGES).display_order(3))
}

#[test]
fn verify_cmd() {
    command().debug_assert();
}

fn run(matches: &ArgMatches, version: &Version) -> Result<()> {
    if let Some(matches) = matches.subcommand_matches(SUBCOMMAND_PARSE) {
        let config = common::load_config(matches, version)?;
        parse::run(matches, &config)
    } else if let Some(matches) = matches.subcommand_matches(SUBCOMMAND_HIGHLIGHT) {
        let config = common::load_config(matches, version)?;
        highlight::run(matches, &config)
    } else if let Some(matches) = matches.subcommand_matches(SUBCOMMAND_TEST) {
        let config = common::load_config(matches, version)?;
        corpus::run(matches, &config)
    } else if matches.subcommand_matches(SUBCOMMAND_LANGUAGES).is_some() {
        languages::run()
    } else {
        unreachable!()
    }
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{:?}", err);
        std::process::exit(1);
    }
    std::process::exit(0);
}

fn try_main() -> Result<()> {
    // NOTE: parsers should never panic, if one does it's a bug
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("well that wasn't supposed to happen...\n");
        eprintln!("{}\n", panic_info);
        eprintln!("please open an issue with the input that caused this")
    }));

    let plain = common::is_plain();
    miette::set_hook(Box::new(move |_diagnostic| {
        Box::new(
            miette::GraphicalReportHandler::new().with_theme(if plain {
                miette::GraphicalTheme::unicode_nocolor()
            } else {
                miette::GraphicalTheme::unicode()
            }),
        )
    }))
    .expect("Error installing miette hook");
    if plain {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PEOPL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(!plain)
        .init();

    let version = Version::from_env();
    let matches = command().get_matches();
    tracing::debug!(?version, args = ?std::env::args().collect::<Vec<_>>());

    run(&matches, &version)
}
