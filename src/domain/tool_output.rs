//! Helpers for reading the `Output` of an external tool.

use std::process::Output;

const STDERR_LIMIT: usize = 500;

/// Human readable exit status, e.g. `exit status: 1`.
pub(crate) fn status_text(output: &Output) -> String {
    output.status.to_string()
}

/// Last part of stderr, enough to explain a failure in a log line.
pub(crate) fn stderr_tail(output: &Output) -> String {
    let text = String::from_utf8_lossy(&output.stderr);
    let text = text.trim();
    let chars = text.chars().count();
    if chars <= STDERR_LIMIT {
        return text.to_string();
    }
    match text.char_indices().nth(chars - STDERR_LIMIT) {
        Some((cut, _)) => format!("...{}", &text[cut..]),
        None => text.to_string(),
    }
}
