// UI layer: reads the RFID from the operator, runs the lookup behind a
// spinner and writes the one-line answer. All diagnostics go to stderr so
// stdout carries only the answer.

use std::io::{self, BufRead, IsTerminal, Write};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::api::UserLookup;

/// Metadata attached to every resolve call.
pub const LOOKUP_META: &str = "Some Meta String";

pub const NO_SUCH_USER: &str = "No such User";

/// What a lookup ended in, for callers that need more than the printed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    NoSuchUser,
    Found { username: String },
}

/// Prompt for the RFID with `RFID: `.
///
/// A terminal gets a `dialoguer` prompt; piped input is read as a single
/// line. The value is passed on untouched apart from the line terminator.
pub fn prompt_rfid() -> Result<String> {
    if io::stdin().is_terminal() {
        let rfid: String = Input::new()
            .with_prompt("RFID")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read RFID")?;
        return Ok(rfid);
    }

    let mut stderr = io::stderr();
    write!(stderr, "RFID: ")?;
    stderr.flush()?;
    read_rfid(io::stdin().lock())
}

/// Read one line from `reader`, dropping only the trailing `\n` or `\r\n`.
/// An empty line is a valid (empty) RFID; end of input before any byte is
/// an error.
pub fn read_rfid(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .context("Failed to read RFID from stdin")?;
    if read == 0 {
        bail!("No RFID on stdin");
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

/// Resolve `rfid`, fetch the user if there is one, and write the answer
/// line to `out`.
///
/// Errors from either call propagate before anything is written.
pub fn report_lookup<L: UserLookup + ?Sized>(
    api: &L,
    rfid: &str,
    out: &mut impl Write,
) -> Result<LookupOutcome> {
    let lookup = api
        .resolve_rfid(rfid, LOOKUP_META)
        .context("Failed to resolve RFID")?;
    debug!(request_id = %lookup.request_id, "lookup answered");

    let outcome = match lookup.user_id {
        None => LookupOutcome::NoSuchUser,
        Some(user_id) => {
            let user = api
                .get_user(&user_id)
                .with_context(|| format!("Failed to fetch user {user_id}"))?;
            LookupOutcome::Found {
                username: user.username()?,
            }
        }
    };

    match &outcome {
        LookupOutcome::NoSuchUser => writeln!(out, "{NO_SUCH_USER}")?,
        LookupOutcome::Found { username } => writeln!(out, "Username: {username}")?,
    }
    Ok(outcome)
}

/// Interactive entry point used by the binary: prompt unless an RFID was
/// given, then look it up while a spinner runs on stderr.
pub fn run<L: UserLookup + ?Sized>(api: &L, rfid: Option<String>) -> Result<LookupOutcome> {
    let rfid = match rfid {
        Some(rfid) => rfid,
        None => prompt_rfid()?,
    };

    // indicatif hides the spinner by itself when stderr is not a terminal.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Looking up RFID...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    // Buffer the answer so the spinner is gone before it is printed.
    let mut answer = Vec::new();
    let result = report_lookup(api, &rfid, &mut answer);
    spinner.finish_and_clear();

    let outcome = result?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(&answer)?;
    stdout.flush()?;
    Ok(outcome)
}
