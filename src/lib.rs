//! # zoneedit-dyndns
//!
//! A single-shot dynamic DNS updater. One authenticated GET to a ZoneEdit-style
//! update endpoint; the provider takes the public IP from the request origin.
//!
//! ## Usage
//!
//! ```bash
//! zoneedit-dyndns -uname alice -pword s3cret -hostname home.example.org
//!
//! # also update *.home.example.org, don't print the reply
//! zoneedit-dyndns -uname alice -pword s3cret -hostname home.example.org -wildcard YES -s=false
//! ```
//!
//! ## Exit codes
//!
//! | code | meaning                              |
//! |------|--------------------------------------|
//! | 0    | success                              |
//! | 1    | configuration file error             |
//! | 2    | unexpected arguments                 |
//! | 3    | missing username or password         |
//! | 4    | missing hostname                     |
//! | 5    | wildcard not YES or NO               |
//! | 6    | request construction failed          |
//! | 7    | request failed                       |
//! | 8    | response body could not be read      |
//! | 9    | response status was not 200          |

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod report;


pub use cli::Cli;
pub use client::{UpdateClient, UpdateResponse};
pub use config::{Credentials, FileConfig, QueryParameter, Settings};
pub use error::{DdnsError, Result};

use report::Outcome;
use std::io::Write;

/// Run one update and report it. Returns the process exit code.
///
/// `env` looks up environment variables. Only the config file named by
/// `cli.config` is read; finding the default one is up to the caller.
pub async fn run(
    cli: Cli,
    env: &dyn Fn(&str) -> Option<String>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> u8 {
    let outcome = update(&cli, env).await;
    report::report(outcome, out, err)
}

async fn update(cli: &Cli, env: &dyn Fn(&str) -> Option<String>) -> Result<Outcome> {
    cli.ensure_no_args()?;
    let file = FileConfig::load(cli.config.as_deref())?;
    let settings = Settings::resolve(cli, file.as_ref(), env)?;
    settings.validate()?;

    let url = query::request_url(&settings.endpoint, &settings.params)?;
    let client = UpdateClient::new()?;
    let response = client.update(url, &settings.credentials).await?;

    Ok(Outcome {
        response,
        show_response: settings.show_response,
    })
}
