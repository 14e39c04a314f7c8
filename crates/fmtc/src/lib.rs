//! Render text with inline color markup to a terminal or pipe.
//!
//! `fmtc` takes text such as `{*}Done!{!} File {#87}report.txt{!}` from its
//! arguments or from piped stdin, decodes the backslash escapes a shell
//! leaves literal, and prints the result with ANSI styling.
//!
//! ## Execution Flow
//!
//! ```text
//! Clap Parsing → Input Resolution → Escape Decoding → Dispatch → Rendering
//! ```
//!
//! 1. Parsing: [`cli::Cli`] reads flags and the positional text. Informational
//!    flags (completion, man page, version) short-circuit here.
//!
//! 2. Input Resolution: [`fmtc_input::InputResolver`] joins the positional
//!    words or drains piped stdin. An interactive stdin with no words fails
//!    fast instead of blocking.
//!
//! 3. Escape Decoding: [`fmtc_input::normalize`] runs exactly once, on both
//!    sources, inside [`dispatch::RenderRequest::from_input`].
//!
//! 4. Dispatch: [`dispatch::dispatch`] picks the stream and whether a
//!    newline follows, then hands the text to a [`dispatch::Renderer`].
//!
//! 5. Rendering: [`fmtc_markup::Markup`] turns tags into ANSI codes, or strips
//!    them when [`config::UiConfig`] says the stream gets no colors.
//!
//! ## Single-Threaded Design
//!
//! The whole run happens on the main thread: parse args, resolve input,
//! write once, exit. No runtime or worker pool is ever started, which keeps
//! the bytes written to each stream in a fixed order.
//!
//! ## Testing
//!
//! [`app::run`] takes its stdin, environment and output streams as
//! parameters, so a complete invocation can run in process:
//!
//! ```
//! use fmtc::app::{run, AppIo};
//! use fmtc::config::ColorSupport;
//! use fmtc_input::{MockEnv, MockStdin};
//!
//! let (stdin, env) = (MockStdin::terminal(), MockEnv::new());
//! let (mut out, mut err) = (Vec::new(), Vec::new());
//! let mut io = AppIo::new(&stdin, &env, &mut out, &mut err)
//!     .color_support(ColorSupport::none());
//!
//! let code = run(["fmtc", "{g}hello{!}"], &mut io);
//! drop(io);
//! assert_eq!(code, 0);
//! assert_eq!(out, b"hello\n");
//! ```

pub mod about;
pub mod app;
pub mod cli;
pub mod completion;
pub mod config;
pub mod dispatch;
mod error;
pub mod logging;

pub use error::{AppError, EXIT_FAILURE, EXIT_OK};
