//! Input resolution: positional arguments first, piped stdin second.

use std::fmt;
use std::sync::Arc;

use crate::env::{RealStdin, StdinReader};
use crate::InputError;

/// Information about how input was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    /// The raw text, before escape decoding.
    pub value: String,
    /// Which source provided the value.
    pub source: InputSourceKind,
}

impl ResolvedInput {
    /// Whether the text was drained from stdin.
    pub fn from_stdin(&self) -> bool {
        self.source == InputSourceKind::Stdin
    }
}

/// The kind of source that provided input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSourceKind {
    /// From positional CLI arguments.
    Arg,
    /// From piped or redirected stdin.
    Stdin,
}

impl fmt::Display for InputSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arg => write!(f, "argument"),
            Self::Stdin => write!(f, "stdin"),
        }
    }
}

/// Decides where the text to render comes from.
///
/// Positional arguments always win. Without them, stdin is drained to the
/// end, unless it is an interactive terminal, in which case resolution
/// fails instead of blocking on a read nobody will ever finish.
///
/// # Example
///
/// ```
/// use fmtc_input::{InputResolver, InputSourceKind, MockStdin};
///
/// let resolver = InputResolver::with_reader(MockStdin::piped("ignored"));
/// let input = resolver.resolve(&["a".to_string(), "b".to_string()]).unwrap();
///
/// assert_eq!(input.value, "a b");
/// assert_eq!(input.source, InputSourceKind::Arg);
/// ```
#[derive(Clone)]
pub struct InputResolver<R: StdinReader = RealStdin> {
    reader: Arc<R>,
}

impl InputResolver<RealStdin> {
    /// Create a resolver reading the process's real stdin.
    pub fn new() -> Self {
        Self {
            reader: Arc::new(RealStdin),
        }
    }
}

impl Default for InputResolver<RealStdin> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: StdinReader> InputResolver<R> {
    /// Create a resolver with a custom stdin reader.
    ///
    /// This is primarily used for testing to inject mock stdin.
    pub fn with_reader(reader: R) -> Self {
        Self {
            reader: Arc::new(reader),
        }
    }

    /// Resolve the input text from `args` or stdin.
    ///
    /// # Errors
    ///
    /// - [`InputError::Interactive`] when `args` is empty and stdin is a TTY.
    /// - [`InputError::StdinFailed`] when draining stdin fails.
    pub fn resolve(&self, args: &[String]) -> Result<ResolvedInput, InputError> {
        if !args.is_empty() {
            let value = args.join(" ");
            tracing::debug!(count = args.len(), len = value.len(), "input from arguments");
            return Ok(ResolvedInput {
                value,
                source: InputSourceKind::Arg,
            });
        }

        if self.reader.is_terminal() {
            tracing::debug!("stdin is a terminal and no arguments were given");
            return Err(InputError::Interactive);
        }

        let bytes = self.reader.read_to_end().map_err(InputError::StdinFailed)?;
        let value = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!("stdin is not valid UTF-8, decoding lossily");
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };

        tracing::debug!(len = value.len(), "input from stdin");
        Ok(ResolvedInput {
            value,
            source: InputSourceKind::Stdin,
        })
    }
}
