//! Shell completion scripts and the man page, generated from [`Cli`].

use std::io::{self, Write};

use clap::{CommandFactory, ValueEnum};
use clap_complete::Shell;

use crate::about::APP;
use crate::cli::Cli;

/// Looks up a completion generator by shell name (case-insensitive).
pub fn shell_from_name(name: &str) -> Option<Shell> {
    <Shell as ValueEnum>::from_str(name, true).ok()
}

/// Writes the completion script for `shell`.
///
/// The script is generated into memory first; clap_complete panics when its
/// writer fails.
///
/// # Errors
///
/// Returns any error produced by the underlying writer.
pub fn write_completion(shell: Shell, out: &mut dyn Write) -> io::Result<()> {
    let mut cmd = Cli::command();
    let mut script = Vec::new();
    clap_complete::generate(shell, &mut cmd, APP, &mut script);
    out.write_all(&script)
}

/// Writes the man page in roff format.
///
/// # Errors
///
/// Returns any error produced by the underlying writer.
pub fn write_man(out: &mut dyn Write) -> io::Result<()> {
    clap_mangen::Man::new(Cli::command()).render(out)
}
