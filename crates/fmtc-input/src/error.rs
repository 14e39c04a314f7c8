//! Error types for input resolution.

use std::io;

/// Errors that can occur while resolving the text to render.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// No positional text was given and stdin is an interactive terminal.
    ///
    /// Reading would block on the user forever, so resolution refuses to start.
    #[error("No input provided: stdin is a terminal and no text arguments were given.")]
    Interactive,

    /// Failed to read from stdin.
    #[error("Failed to read stdin: {0}")]
    StdinFailed(#[source] io::Error),
}

impl InputError {
    /// Whether this error should end the process without printing anything.
    ///
    /// A missing input is an expected usage outcome, not a fault worth
    /// reporting on the error stream.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Interactive)
    }
}
