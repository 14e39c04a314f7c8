//! Output dispatch: which stream, and whether a newline follows.
//!
//! Line mode is decided from where the text came from and the `--line`
//! flag:
//!
//! | from stdin | `--line` | trailing newline |
//! |------------|----------|------------------|
//! | yes        | ignored  | no               |
//! | no         | set      | no               |
//! | no         | unset    | yes              |
//!
//! Text drained from a pipe already carries its own line endings, so the
//! renderer never adds one on top. The destination is chosen independently
//! by `--error`.

use std::io::{self, Write};

use fmtc_input::{normalize, ResolvedInput};

use crate::config::UiConfig;

/// The stream a request is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    Stderr,
}

/// What follows the rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    Newline,
    None,
}

impl Terminator {
    /// Whether a newline is written after the text.
    pub fn is_newline(self) -> bool {
        self == Terminator::Newline
    }
}

/// The two output flags, independent of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputOptions {
    /// `--error`: write to stderr instead of stdout.
    pub to_stderr: bool,
    /// `--line`: suppress the trailing newline.
    pub no_newline: bool,
}

/// Fully resolved text plus where and how to write it.
///
/// Built once per invocation and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    text: String,
    destination: Destination,
    terminator: Terminator,
}

impl RenderRequest {
    /// Builds a request from raw resolved input.
    ///
    /// Escapes are decoded here, before any output option is looked at, so
    /// no combination of flags can skip decoding.
    pub fn from_input(input: ResolvedInput, options: OutputOptions) -> Self {
        let from_stdin = input.from_stdin();
        let text = normalize(&input.value).into_owned();
        Self::new(text, from_stdin, options)
    }

    /// Builds a request from already decoded text.
    pub fn new(text: String, from_stdin: bool, options: OutputOptions) -> Self {
        let destination = if options.to_stderr {
            Destination::Stderr
        } else {
            Destination::Stdout
        };
        let terminator = if from_stdin || options.no_newline {
            Terminator::None
        } else {
            Terminator::Newline
        };

        tracing::debug!(
            ?destination,
            ?terminator,
            from_stdin,
            len = text.len(),
            "render request"
        );

        Self {
            text,
            destination,
            terminator,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn destination(&self) -> Destination {
        self.destination
    }

    pub fn terminator(&self) -> Terminator {
        self.terminator
    }
}

/// Renders markup into a stream.
///
/// The core never looks inside the text; whatever implements this trait owns
/// the markup grammar and the color decision.
pub trait Renderer {
    /// Renders `text` into `out`, followed by a newline when `newline` is set.
    fn render(
        &self,
        out: &mut dyn Write,
        text: &str,
        destination: Destination,
        newline: bool,
    ) -> io::Result<()>;
}

/// [`Renderer`] backed by `fmtc-markup`, colored per [`UiConfig`].
#[derive(Debug, Clone, Copy)]
pub struct MarkupRenderer<'a> {
    config: &'a UiConfig,
}

impl<'a> MarkupRenderer<'a> {
    pub fn new(config: &'a UiConfig) -> Self {
        Self { config }
    }
}

impl Renderer for MarkupRenderer<'_> {
    fn render(
        &self,
        out: &mut dyn Write,
        text: &str,
        destination: Destination,
        newline: bool,
    ) -> io::Result<()> {
        self.config.markup(destination).render(out, text, newline)
    }
}

/// The process's two output streams.
pub struct Streams<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

impl<'a> Streams<'a> {
    pub fn new(out: &'a mut dyn Write, err: &'a mut dyn Write) -> Self {
        Self { out, err }
    }

    /// The writer for `destination`.
    pub fn get(&mut self, destination: Destination) -> &mut dyn Write {
        match destination {
            Destination::Stdout => &mut *self.out,
            Destination::Stderr => &mut *self.err,
        }
    }
}

/// Writes `request` through `renderer` to the stream it names.
///
/// Exactly one stream is written, exactly once.
///
/// # Errors
///
/// Returns the error of the underlying write.
pub fn dispatch(
    request: &RenderRequest,
    renderer: &dyn Renderer,
    streams: &mut Streams<'_>,
) -> io::Result<()> {
    let destination = request.destination();
    renderer.render(
        streams.get(destination),
        request.text(),
        destination,
        request.terminator().is_newline(),
    )
}
