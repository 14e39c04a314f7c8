//! One complete invocation, from raw arguments to an exit status.
//!
//! [`run`] never touches the real process: stdin, the environment and both
//! output streams come in through [`AppIo`], so the binary and the tests
//! drive exactly the same code.

use std::ffi::OsString;
use std::io::Write;

use clap::error::ErrorKind;
use clap::Parser;
use fmtc_input::env::{EnvReader, StdinReader};
use fmtc_input::InputResolver;

use crate::about::About;
use crate::cli::Cli;
use crate::completion::{shell_from_name, write_completion, write_man};
use crate::config::{ColorSupport, UiConfig};
use crate::dispatch::{dispatch, Destination, MarkupRenderer, RenderRequest, Streams};
use crate::error::{AppError, EXIT_OK};

/// Everything a run reads from or writes to.
pub struct AppIo<'a, R: StdinReader, E: EnvReader> {
    stdin: &'a R,
    env: &'a E,
    streams: Streams<'a>,
    support: ColorSupport,
}

impl<'a, R: StdinReader, E: EnvReader> AppIo<'a, R, E> {
    /// Wires up a run; color support is probed from the real terminals.
    pub fn new(stdin: &'a R, env: &'a E, out: &'a mut dyn Write, err: &'a mut dyn Write) -> Self {
        Self {
            stdin,
            env,
            streams: Streams::new(out, err),
            support: ColorSupport::detect(),
        }
    }

    /// Overrides the probed terminal capabilities.
    pub fn color_support(mut self, support: ColorSupport) -> Self {
        self.support = support;
        self
    }
}

/// Runs `fmtc` with `args` (program name first) and returns the exit status.
pub fn run<I, T, R, E>(args: I, io: &mut AppIo<'_, R, E>) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    R: StdinReader,
    E: EnvReader,
{
    let cli = match parse(args, io) {
        Ok(Some(cli)) => cli,
        Ok(None) => return EXIT_OK,
        // Nothing styled is printed before the flags are known.
        Err(err) => return fail(&err, &UiConfig::plain(), io),
    };

    let config = UiConfig::new(cli.no_color, io.env, io.support);
    match execute(&cli, &config, io) {
        Ok(()) => EXIT_OK,
        Err(err) => fail(&err, &config, io),
    }
}

/// Parses the flags; `None` means clap already answered (help).
fn parse<I, T, R, E>(args: I, io: &mut AppIo<'_, R, E>) -> Result<Option<Cli>, AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    R: StdinReader,
    E: EnvReader,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => {
            let text = err.render().to_string();
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    io.streams
                        .get(Destination::Stdout)
                        .write_all(text.as_bytes())
                        .map_err(AppError::Output)?;
                    Ok(None)
                }
                _ => Err(AppError::Usage(text)),
            }
        }
    }
}

fn execute<R, E>(cli: &Cli, config: &UiConfig, io: &mut AppIo<'_, R, E>) -> Result<(), AppError>
where
    R: StdinReader,
    E: EnvReader,
{
    let out = io.streams.get(Destination::Stdout);

    if let Some(name) = &cli.completion {
        let shell = shell_from_name(name).ok_or_else(|| AppError::UnsupportedShell(name.clone()))?;
        return write_completion(shell, out).map_err(AppError::Output);
    }

    if cli.generate_man {
        return write_man(out).map_err(AppError::Output);
    }

    if let Some(format) = cli.version {
        return About::current()
            .write(out, format, config.markup(Destination::Stdout))
            .map_err(AppError::Output);
    }

    if cli.verbose_version {
        return About::current()
            .write_verbose(out, config.markup(Destination::Stdout))
            .map_err(AppError::Output);
    }

    let input = InputResolver::with_reader(io.stdin).resolve(&cli.data)?;
    tracing::debug!(source = %input.source, len = input.value.len(), "input resolved");

    let request = RenderRequest::from_input(input, cli.output_options());
    dispatch(&request, &MarkupRenderer::new(config), &mut io.streams).map_err(AppError::Output)
}

/// Reports `err` on stderr unless it is silent, and returns its exit status.
fn fail<R: StdinReader, E: EnvReader>(err: &AppError, config: &UiConfig, io: &mut AppIo<'_, R, E>) -> u8 {
    tracing::debug!(error = %err, silent = err.is_silent(), "run failed");
    if err.is_silent() {
        return err.exit_code();
    }

    let stderr = io.streams.get(Destination::Stderr);
    // Usage text comes from clap and is already formatted.
    let written = match err {
        AppError::Usage(text) => stderr.write_all(text.as_bytes()),
        _ => config
            .markup(Destination::Stderr)
            .render(stderr, &format!("{{r}}{}{{!}}", err), true),
    };
    if let Err(write_err) = written {
        tracing::debug!(error = %write_err, "could not report error");
    }
    err.exit_code()
}
