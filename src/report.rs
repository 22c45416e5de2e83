//! Turning the outcome of a run into output and an exit code.

use crate::cli::usage;
use crate::client::UpdateResponse;
use crate::error::{DdnsError, Result};
use std::io::Write;

/// What a successful dispatch hands to the reporter.
#[derive(Debug)]
pub struct Outcome {
    pub response: UpdateResponse,
    pub show_response: bool,
}

/// Write the outcome to `out`/`err` and return the process exit code.
pub fn report(outcome: Result<Outcome>, out: &mut impl Write, err: &mut impl Write) -> u8 {
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => return report_error(&e, err),
    };

    let show_response = outcome.show_response;
    let body = match outcome.response.into_success() {
        Ok(body) => body,
        Err(e) => return report_error(&e, err),
    };

    if show_response {
        let written = out
            .write_all(&body)
            .and_then(|_| out.write_all(b"\n"))
            .and_then(|_| out.flush());
        if let Err(e) = written {
            tracing::warn!("Failed to print response: {}", e);
        }
    }

    0
}

/// Write an error (plus usage text for usage errors) and return its exit code.
pub fn report_error(e: &DdnsError, err: &mut impl Write) -> u8 {
    tracing::debug!("Run failed: {:?}", e);

    let mut message = format!("error: {}\n", e);
    if e.is_usage() {
        message.push_str(&usage());
    }
    if let Err(io) = err.write_all(message.as_bytes()) {
        tracing::warn!("Failed to print error: {}", io);
    }

    e.exit_code()
}
