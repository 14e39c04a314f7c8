//! Version and build information.

use std::io::{self, Write};

use fmtc_markup::Markup;
use serde::Serialize;

use crate::cli::VersionFormat;

pub const APP: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESC: &str = env!("CARGO_PKG_DESCRIPTION");
pub const LICENSE: &str = env!("CARGO_PKG_LICENSE");

/// Tag used to highlight the app name and version in banners.
const ACCENT_TAG: &str = "{#197}";

/// Short git revision baked in at build time through `FMTC_GIT_REV`.
pub fn git_revision() -> Option<&'static str> {
    option_env!("FMTC_GIT_REV").filter(|rev| !rev.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct About {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub license: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
}

impl About {
    pub fn current() -> Self {
        Self::with_revision(git_revision())
    }

    pub fn with_revision(revision: Option<&str>) -> Self {
        Self {
            name: APP,
            version: VERSION,
            description: DESC,
            license: LICENSE,
            build: revision.map(|rev| format!("git:{}", rev)),
        }
    }

    /// Writes the version in the requested format.
    ///
    /// `markup` styles the full banner; the other formats are never styled
    /// so scripts can consume them.
    pub fn write(&self, out: &mut dyn Write, format: VersionFormat, markup: Markup) -> io::Result<()> {
        match format {
            VersionFormat::Full => markup.render(out, &self.banner(), true),
            VersionFormat::Simple => writeln!(out, "{}", self.version),
            VersionFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self).map_err(io::Error::from)?;
                writeln!(out)
            }
        }
    }

    /// Writes the extended information shown by `--verbose-version`.
    pub fn write_verbose(&self, out: &mut dyn Write, markup: Markup) -> io::Result<()> {
        let mut text = format!(
            "{{*}}{ACCENT_TAG}{}{{!}} {ACCENT_TAG}{}{{!}}\n",
            self.name, self.version
        );
        if let Some(build) = &self.build {
            text.push_str(&format!("{{s}}build:{{!}} {}\n", build));
        }
        text.push_str(&format!(
            "{{s}}os:{{!}}    {}\n{{s}}arch:{{!}}  {}\n",
            std::env::consts::OS,
            std::env::consts::ARCH
        ));
        text.push_str(&format!(
            "{{s}}deps:{{!}}  fmtc-input {}, fmtc-markup {}",
            fmtc_input::VERSION,
            fmtc_markup::VERSION
        ));
        markup.render(out, &text, true)
    }

    fn banner(&self) -> String {
        let mut banner = format!(
            "{{*}}{ACCENT_TAG}{}{{!}} {ACCENT_TAG}{}{{!}}",
            self.name, self.version
        );
        if let Some(build) = &self.build {
            banner.push_str(&format!(" {{s}}({}){{!}}", build));
        }
        banner.push_str(&format!(" - {}\n\n{{s}}License: {}{{!}}", self.description, self.license));
        banner
    }
}
