//! Color configuration, decided once at startup.
//!
//! Colors are on for a stream only when all of these hold:
//!
//! - `--no-color` was not given
//! - `NO_COLOR` is unset or empty
//! - the stream is a terminal that supports colors
//!
//! The result is an immutable [`UiConfig`] passed by reference to whatever
//! writes output. Nothing here touches console's process-wide color toggles.

use console::Term;
use fmtc_input::env::EnvReader;
use fmtc_markup::Markup;

use crate::dispatch::Destination;

/// Environment variable that disables colors when set to a non-empty value.
pub const NO_COLOR_VAR: &str = "NO_COLOR";

/// What the attached terminals can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSupport {
    /// Stdout is a color-capable terminal.
    pub stdout: bool,
    /// Stderr is a color-capable terminal.
    pub stderr: bool,
}

impl ColorSupport {
    /// Probes the real stdout and stderr.
    pub fn detect() -> Self {
        Self {
            stdout: Term::stdout().features().colors_supported(),
            stderr: Term::stderr().features().colors_supported(),
        }
    }

    /// Neither stream supports colors (pipes, files, tests).
    pub fn none() -> Self {
        Self {
            stdout: false,
            stderr: false,
        }
    }

    /// Both streams support colors.
    pub fn all() -> Self {
        Self {
            stdout: true,
            stderr: true,
        }
    }
}

/// Immutable color settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiConfig {
    stdout_colors: bool,
    stderr_colors: bool,
}

impl UiConfig {
    /// Builds the configuration from the `--no-color` flag, the environment
    /// and the terminal's capabilities.
    pub fn new<E: EnvReader + ?Sized>(no_color_flag: bool, env: &E, support: ColorSupport) -> Self {
        let disabled = no_color_flag || no_color_env(env);
        let config = Self {
            stdout_colors: !disabled && support.stdout,
            stderr_colors: !disabled && support.stderr,
        };
        tracing::debug!(
            no_color_flag,
            stdout = config.stdout_colors,
            stderr = config.stderr_colors,
            "color configuration"
        );
        config
    }

    /// Configuration with colors off everywhere.
    pub fn plain() -> Self {
        Self {
            stdout_colors: false,
            stderr_colors: false,
        }
    }

    /// Whether output sent to `destination` gets colors.
    pub fn colors_for(&self, destination: Destination) -> bool {
        match destination {
            Destination::Stdout => self.stdout_colors,
            Destination::Stderr => self.stderr_colors,
        }
    }

    /// The markup renderer to use for `destination`.
    pub fn markup(&self, destination: Destination) -> Markup {
        Markup::with_colors(self.colors_for(destination))
    }
}

fn no_color_env<E: EnvReader + ?Sized>(env: &E) -> bool {
    env.var(NO_COLOR_VAR).is_some_and(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmtc_input::MockEnv;
    use fmtc_markup::TagTransform;

    #[test]
    fn colors_follow_terminal_support() {
        let support = ColorSupport {
            stdout: true,
            stderr: false,
        };
        let config = UiConfig::new(false, &MockEnv::new(), support);
        assert!(config.colors_for(Destination::Stdout));
        assert!(!config.colors_for(Destination::Stderr));
    }

    #[test]
    fn flag_disables_colors() {
        let config = UiConfig::new(true, &MockEnv::new(), ColorSupport::all());
        assert_eq!(config, UiConfig::plain());
    }

    #[test]
    fn no_color_env_disables_colors() {
        let env = MockEnv::new().with_var(NO_COLOR_VAR, "1");
        let config = UiConfig::new(false, &env, ColorSupport::all());
        assert_eq!(config, UiConfig::plain());
    }

    #[test]
    fn empty_no_color_env_is_ignored() {
        let env = MockEnv::new().with_var(NO_COLOR_VAR, "");
        let config = UiConfig::new(false, &env, ColorSupport::all());
        assert!(config.colors_for(Destination::Stdout));
        assert!(config.colors_for(Destination::Stderr));
    }

    #[test]
    fn markup_matches_colors() {
        let config = UiConfig::new(false, &MockEnv::new(), ColorSupport::all());
        assert_eq!(
            config.markup(Destination::Stdout).transform(),
            TagTransform::Apply
        );
        assert_eq!(
            UiConfig::plain().markup(Destination::Stderr).transform(),
            TagTransform::Remove
        );
    }
}
