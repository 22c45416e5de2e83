//! Command-line surface.

use crate::error::{DdnsError, Result};
use clap::{ArgAction, CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Long flags that may also be spelled with a single dash (`-hostname=foo`).
const LONG_FLAGS: &[&str] = &[
    "service",
    "hostname",
    "wildcard",
    "endpoint",
    "uname",
    "pword",
    "show-response",
    "config",
    "help",
    "version",
];

/// Flags whose value is the following token unless given as `flag=value`.
const VALUE_FLAGS: &[&str] = &[
    "service", "hostname", "wildcard", "endpoint", "uname", "pword", "config", "c",
];

/// Command-line arguments.
///
/// Every setting is optional here; defaults, the configuration file and the
/// environment are layered in by [`crate::config::Settings::resolve`].
#[derive(Parser, Debug, Default)]
#[command(name = "zoneedit-dyndns")]
#[command(about = "Point a ZoneEdit dynamic DNS hostname at this host's public IP")]
#[command(version)]
pub struct Cli {
    /// DNS service hosting the domain [default: zoneedit]
    #[arg(long, value_name = "SERVICE")]
    pub service: Option<String>,

    /// Fully qualified hostname to update
    #[arg(long, value_name = "HOSTNAME")]
    pub hostname: Option<String>,

    /// Specify YES to update the domain wildcard host [default: NO]
    #[arg(long, value_name = "YES|NO")]
    pub wildcard: Option<String>,

    /// API endpoint to contact [default: https://dynamic.zoneedit.com/dyn/jsclient.php]
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Authenticate as username
    #[arg(long = "uname", value_name = "USERNAME", allow_hyphen_values = true)]
    pub username: Option<String>,

    /// Authenticate with password
    #[arg(long = "pword", value_name = "PASSWORD", allow_hyphen_values = true)]
    pub password: Option<String>,

    /// Show server response [default: true]
    #[arg(
        short = 's',
        long = "show-response",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub show_response: Option<bool>,

    /// Path to config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Positional arguments are not accepted.
    #[arg(hide = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse from already normalized arguments, exiting on malformed input.
    pub fn parse_normalized<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(normalize_args(args))
    }

    /// Reject stray positional arguments.
    pub fn ensure_no_args(&self) -> Result<()> {
        if self.args.is_empty() {
            return Ok(());
        }
        Err(DdnsError::UnexpectedArguments(self.args.clone()))
    }
}

/// Full help text, printed alongside usage errors.
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// Rewrite single-dash long flags (`-hostname`) to their double-dash form.
///
/// The first argument is the program name and is left alone, as is
/// everything after a bare `--`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;
    let mut value_next = false;

    for (i, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if i == 0 || passthrough || value_next {
            value_next = false;
            normalized.push(arg);
            continue;
        }

        value_next = arg.to_str().is_some_and(takes_next_value);
        match arg.to_str() {
            Some("--") => {
                passthrough = true;
                normalized.push(arg);
            }
            Some(s) if is_single_dash_long(s) => normalized.push(format!("-{}", s).into()),
            _ => normalized.push(arg),
        }
    }

    normalized
}

/// Whether `arg` is a value-taking flag without an inline `=value`.
fn takes_next_value(arg: &str) -> bool {
    let name = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-'));
    match name {
        Some(name) => !name.contains('=') && VALUE_FLAGS.contains(&name),
        None => false,
    }
}

fn is_single_dash_long(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }
    let name = rest.split('=').next().unwrap_or(rest);
    LONG_FLAGS.contains(&name)
}
