//! Input resolution and escape decoding for `fmtc`.
//!
//! `fmtc-input` decides where the text to render comes from and turns the
//! backslash escapes a user typed in a shell into the characters they mean.
//!
//! # Quick Start
//!
//! ```
//! use fmtc_input::{normalize, InputResolver, InputSourceKind, MockStdin};
//!
//! let resolver = InputResolver::with_reader(MockStdin::terminal());
//! let args = vec!["{g}ok{!}".to_string(), "done\\n".to_string()];
//!
//! let input = resolver.resolve(&args).unwrap();
//! assert_eq!(input.source, InputSourceKind::Arg);
//! assert_eq!(normalize(&input.value), "{g}ok{!} done\n");
//! ```
//!
//! # Architecture
//!
//! ```text
//! positional args ──┐
//!                   ├─► InputResolver ─► ResolvedInput ─► normalize ─► text
//! stdin (piped) ────┘        │
//!                            └─► InputError::Interactive (stdin is a TTY)
//! ```
//!
//! # Testing
//!
//! Stdin and the environment are reached through the traits in [`env`], so
//! tests never depend on the state of the real terminal:
//!
//! ```
//! use fmtc_input::{InputResolver, MockStdin};
//!
//! let resolver = InputResolver::with_reader(MockStdin::piped("hi\n"));
//! assert_eq!(resolver.resolve(&[]).unwrap().value, "hi\n");
//! ```

pub mod env;
mod error;
pub mod escape;
mod resolve;

pub use error::InputError;
pub use escape::{normalize, unescape, EscapeError, EscapeErrorKind};
pub use resolve::{InputResolver, InputSourceKind, ResolvedInput};

pub use env::{MockEnv, MockStdin};

/// Version of this crate, reported by `fmtc --verbose-version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
