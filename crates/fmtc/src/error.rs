//! Errors that end a run.

use std::io;

use fmtc_input::InputError;

/// Exit status for a successful run.
pub const EXIT_OK: u8 = 0;

/// Exit status for every failure.
pub const EXIT_FAILURE: u8 = 1;

/// Errors that can end an `fmtc` invocation.
///
/// Every variant is terminal: nothing is retried and nothing is rendered
/// after one of these is raised.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Flags could not be parsed.
    #[error("{0}")]
    Usage(String),

    /// The text to render could not be resolved.
    #[error(transparent)]
    Input(#[from] InputError),

    /// `--completion` named a shell with no generator.
    #[error("Unsupported shell for completion: {0}")]
    UnsupportedShell(String),

    /// Writing to an output stream failed.
    #[error("Failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl AppError {
    /// The process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        EXIT_FAILURE
    }

    /// Whether the error ends the run without a message.
    ///
    /// A missing input and an unknown completion shell are silent; a closed
    /// output stream has nowhere left to report to.
    pub fn is_silent(&self) -> bool {
        match self {
            Self::Usage(_) => false,
            Self::Input(err) => err.is_silent(),
            Self::UnsupportedShell(_) => true,
            Self::Output(_) => true,
        }
    }
}
