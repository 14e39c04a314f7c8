//! Environment abstractions for testability.
//!
//! This module provides traits that abstract over OS interactions,
//! allowing tests to run without depending on actual terminal state,
//! stdin piping, or the process environment.

use std::collections::HashMap;
use std::io::{self, IsTerminal, Read};

/// Abstraction over stdin reading.
///
/// This trait allows tests to mock stdin without actually piping data.
pub trait StdinReader: Send + Sync {
    /// Check if stdin is a terminal (TTY).
    ///
    /// Returns `true` if stdin is interactive, `false` if piped or redirected.
    fn is_terminal(&self) -> bool;

    /// Read all bytes from stdin until end of stream.
    ///
    /// This should only be called if `is_terminal()` returns `false`.
    fn read_to_end(&self) -> io::Result<Vec<u8>>;
}

/// Abstraction over environment variables.
pub trait EnvReader: Send + Sync {
    /// Get an environment variable value.
    fn var(&self, name: &str) -> Option<String>;
}

impl<T: StdinReader + ?Sized> StdinReader for &T {
    fn is_terminal(&self) -> bool {
        (**self).is_terminal()
    }

    fn read_to_end(&self) -> io::Result<Vec<u8>> {
        (**self).read_to_end()
    }
}

impl<T: EnvReader + ?Sized> EnvReader for &T {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

// === Real implementations ===

/// Real stdin reader using std::io.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealStdin;

impl StdinReader for RealStdin {
    fn is_terminal(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn read_to_end(&self) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        io::stdin().lock().read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

/// Real environment variable reader.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealEnv;

impl EnvReader for RealEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

// === Mock implementations for testing ===

/// Mock stdin reader for testing.
///
/// Allows tests to simulate a terminal, piped content, or a broken stream.
#[derive(Debug, Clone)]
pub struct MockStdin {
    is_terminal: bool,
    content: Option<Vec<u8>>,
    fail_with: Option<io::ErrorKind>,
}

impl MockStdin {
    /// Create a mock that simulates a terminal (no piped input).
    pub fn terminal() -> Self {
        Self {
            is_terminal: true,
            content: None,
            fail_with: None,
        }
    }

    /// Create a mock that simulates piped input.
    pub fn piped(content: impl Into<String>) -> Self {
        Self::piped_bytes(content.into().into_bytes())
    }

    /// Create a mock that simulates piped raw bytes, valid UTF-8 or not.
    pub fn piped_bytes(content: impl Into<Vec<u8>>) -> Self {
        Self {
            is_terminal: false,
            content: Some(content.into()),
            fail_with: None,
        }
    }

    /// Create a mock that simulates empty piped input.
    pub fn piped_empty() -> Self {
        Self::piped_bytes(Vec::new())
    }

    /// Create a mock whose stream is piped but fails when read.
    pub fn failing(kind: io::ErrorKind) -> Self {
        Self {
            is_terminal: false,
            content: None,
            fail_with: Some(kind),
        }
    }
}

impl StdinReader for MockStdin {
    fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    fn read_to_end(&self) -> io::Result<Vec<u8>> {
        if let Some(kind) = self.fail_with {
            return Err(io::Error::new(kind, "mock stdin failure"));
        }
        Ok(self.content.clone().unwrap_or_default())
    }
}

/// Mock environment variable reader for testing.
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: HashMap<String, String>,
}

impl MockEnv {
    /// Create an empty mock environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an environment variable.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvReader for MockEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
