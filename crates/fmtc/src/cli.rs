//! Command-line interface definition.

use clap::{Parser, ValueEnum};

use crate::dispatch::OutputOptions;

const EXAMPLES: &str = "\
Examples:
  fmtc \"{*}Done!{!} File {#87}$file{!} successfully uploaded to {g_}$host{!}\"
    Print fmtc formatted message

  fmtc -E \"{r*}There is no user bob{!}\"
    Print fmtc formatted message to stderr

  fmtc --no-color \"{*}Done!{!} File {#87}$file{!} successfully uploaded\"
    Print message without colors

  echo \"{*}Done!{!} File {#87}$file{!} successfully uploaded\" | fmtc
    Use stdin as a source of data";

/// Utility for rendering fmtc formatted data
#[derive(Debug, Parser)]
#[command(name = "fmtc")]
#[command(about = "Utility for rendering fmtc formatted data")]
#[command(disable_version_flag = true)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Print data to stderr
    #[arg(short = 'E', long)]
    pub error: bool,

    /// Don't print newline at the end
    #[arg(short = 'L', long)]
    pub line: bool,

    /// Disable colors in output
    #[arg(long = "no-color", visible_alias = "nc")]
    pub no_color: bool,

    /// Show version
    #[arg(
        short = 'v',
        long,
        value_name = "FORMAT",
        value_enum,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "full"
    )]
    pub version: Option<VersionFormat>,

    /// Show verbose information about the build and environment
    #[arg(long = "verbose-version", hide = true)]
    pub verbose_version: bool,

    /// Print completion script for the given shell
    #[arg(long, value_name = "SHELL", hide = true)]
    pub completion: Option<String>,

    /// Print man page
    #[arg(long = "generate-man", hide = true)]
    pub generate_man: bool,

    /// Text to render; read from stdin when omitted
    #[arg(value_name = "DATA")]
    pub data: Vec<String>,
}

impl Cli {
    /// The two dispatcher flags.
    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            to_stderr: self.error,
            no_newline: self.line,
        }
    }
}

/// How `--version` prints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum VersionFormat {
    /// Name, version and description
    #[default]
    Full,
    /// The bare version number
    Simple,
    /// Machine-readable JSON
    Json,
}
