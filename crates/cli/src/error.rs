use crate::util::bold;
use b2ms_core::error::ConfigError;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("invalid configuration")]
    #[diagnostic(help("set it in the config file, with a B2MS_* env var, or with a flag"))]
    Config(#[from] ConfigError),

    #[error("{} already exists; pass {} to overwrite it", .0.display(), bold("--force"))]
    ConfigExists(PathBuf),

    #[error("core error")]
    Core(#[from] b2ms_core::Error),

    #[error("report error")]
    Report(#[from] b2ms_report::Error),
}

#[derive(Debug, Error)]
pub enum ParseDurationError {
    #[error("unexpected digit after unit in '{0}'")]
    UnexpectedDigit(String),

    #[error("invalid duration ('{0}'): floating point values are not supported")]
    NoFloats(String),

    #[error("invalid duration ('{0}'): could not parse number into u64")]
    InvalidNumber(String),

    #[error("invalid duration units: '{0}'.  Supported units: s, sec(s), second(s), m, min(ute)(s), h, hr(s), hour(s).")]
    InvalidUnits(String),
}
