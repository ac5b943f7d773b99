//! # The peopl config file
#![warn(missing_docs)]

mod language_name;
#[cfg(test)]
mod tests;

use miette::{Diagnostic, IntoDiagnostic, WrapErr};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};
use thiserror::Error;

pub use language_name::*;

/// `"peopl.toml"`
pub static CONFIG_FILE_NAME: &str = "peopl.toml";

/// peopl configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional version requirement on the `peopl` tool.
    ///
    /// The syntax is inherited from [Cargo](https://doc.rust-lang.org/cargo/reference/specifying-dependencies.html).
    #[serde(rename = "peopl-version")]
    pub required_peopl_version: Option<semver::VersionReq>,

    /// Language used when it can't be worked out from a file extension.
    #[serde(rename = "default-language")]
    pub default_language: Option<LanguageName>,

    /// Extra file extensions per language.
    #[serde(
        default,
        rename = "file-types",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub file_types: FileTypes,
}

/// The type of `config.file_types`, for convenience.
pub type FileTypes = BTreeMap<LanguageName, Vec<String>>;

impl Config {
    /// `(language, extension)` pairs for every configured file type.
    pub fn extra_file_types(&self) -> impl Iterator<Item = (&str, &str)> {
        self.file_types.iter().flat_map(|(language, extensions)| {
            extensions
                .iter()
                .map(move |extension| (language.as_str(), extension.trim_start_matches('.')))
        })
    }

    /// This method only really exists for testing. Use the `read_config` function.
    fn parse(_name: &str, input: &str) -> Result<Config, ParseError> {
        toml::from_str(input).map_err(|toml_error| ParseError::Unlocated {
            description: toml_error.to_string(),
        })
    }
}

#[derive(Error, Debug, Diagnostic)]
enum ParseError {
    #[error("{description}")]
    #[diagnostic(severity(Error))]
    Unlocated { description: String },
}

/// Read in a config file.
pub fn read_config<P: AsRef<Path>>(path: P) -> miette::Result<Config> {
    let contents = std::fs::read_to_string(&path)
        .into_diagnostic()
        .wrap_err(format!(
            "error reading config at {:?}",
            path.as_ref().as_os_str()
        ))?;

    Config::parse(&path.as_ref().to_string_lossy(), &contents)
        .map_err(miette::Report::from)
        .wrap_err(format!(
            "error reading config at {:?}",
            path.as_ref().as_os_str()
        ))
}

/// Read `peopl.toml` from `dir` if there is one.
pub fn find_config<P: AsRef<Path>>(dir: P) -> miette::Result<Option<Config>> {
    let path = dir.as_ref().join(CONFIG_FILE_NAME);
    if path.is_file() {
        read_config(path).map(Some)
    } else {
        Ok(None)
    }
}
