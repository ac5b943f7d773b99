use crate::version::Version;
use clap::ArgMatches;
use miette::{bail, Diagnostic, IntoDiagnostic, Result, WrapErr};
use peopl_config::{find_config, read_config, Config};
use peopl_languages::Grammar;
use peopl_syntax::Parser;
use std::{
    io::{self, Read},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

pub fn is_plain() -> bool {
    if let Ok(plain) = std::env::var("PEOPL_PLAIN") {
        plain != "false"
    } else {
        !atty::is(atty::Stream::Stdout) || !atty::is(atty::Stream::Stderr)
    }
}

/// Read `--config`, or `./peopl.toml` if it exists, and check the
/// version requirement.
pub fn load_config(matches: &ArgMatches, version: &Version) -> Result<Config> {
    let config = if let Some(path) = matches.get_one::<PathBuf>("config") {
        read_config(path)?
    } else {
        find_config(".")?.unwrap_or_default()
    };
    check_version(&config, version)?;
    Ok(config)
}

fn check_version(config: &Config, version: &Version) -> Result<()> {
    if let Some(ref required) = config.required_peopl_version {
        if !required.matches(&version.semversion) {
            bail!(
                "peopl version requirement not met: current version = {}, wanted = {}",
                version.semversion,
                required
            );
        }
    }
    Ok(())
}

/// Pick a grammar: `--language` wins, then the file extension, then the
/// configured default.
pub fn resolve_grammar(
    path: Option<&Path>,
    language: Option<&str>,
    config: &Config,
) -> Result<&'static Grammar> {
    if let Some(name) = language {
        return Ok(peopl_languages::get(name)?);
    }
    if let Some(grammar) =
        path.and_then(|path| peopl_languages::for_path(path, config.extra_file_types()))
    {
        return Ok(grammar);
    }
    if let Some(ref name) = config.default_language {
        debug!(language = name.as_str(), "using default language");
        return Ok(peopl_languages::get(name.as_str())?);
    }
    Err(match path {
        Some(path) => ResolveError::UnknownExtension {
            path: path.display().to_string(),
        },
        None => ResolveError::NoLanguage,
    }
    .into())
}

#[derive(Debug, Error, Diagnostic)]
enum ResolveError {
    #[error("can't work out the language of {path}")]
    #[diagnostic(help("pass `--language` or add the extension to `file-types` in peopl.toml"))]
    UnknownExtension { path: String },
    #[error("no language given")]
    #[diagnostic(help("pass `--language` or set `default-language` in peopl.toml"))]
    NoLanguage,
}

pub fn init_parser(grammar: &Grammar) -> Result<Parser> {
    Ok(peopl_languages::try_init_parser(grammar.name)?)
}

pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err(format!("error reading {}", path.display()))
}

pub fn read_stdin() -> Result<String> {
    let mut contents = String::new();
    io::stdin()
        .read_to_string(&mut contents)
        .into_diagnostic()
        .wrap_err("error reading stdin")?;
    Ok(contents)
}
