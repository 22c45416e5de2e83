//! zoneedit-dyndns - single-shot dynamic DNS updater.

use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use zoneedit_dyndns::{Cli, FileConfig};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let mut cli = Cli::parse_normalized(std::env::args_os());
    if cli.config.is_none() {
        cli.config = FileConfig::discover();
    }
    let env = |name: &str| std::env::var(name).ok();

    let code = zoneedit_dyndns::run(cli, &env, &mut io::stdout(), &mut io::stderr()).await;
    ExitCode::from(code)
}
