//! Brace-tag markup renderer for terminal styling.
//!
//! This crate turns text such as `{*}Done!{!} File {#87}report.txt{!}` into
//! ANSI-styled terminal output. Tags change the current style and stay in
//! effect until another tag changes it again; `{!}` resets everything.
//!
//! # Example
//!
//! ```rust
//! use fmtc_markup::{Markup, TagTransform};
//!
//! // Strip tags (plain text)
//! let markup = Markup::new(TagTransform::Remove);
//! assert_eq!(markup.process("{g*}ok{!} done"), "ok done");
//!
//! // Keep tags visible (debug mode)
//! let markup = Markup::new(TagTransform::Keep);
//! assert_eq!(markup.process("{g*}ok{!}"), "{g*}ok{!}");
//!
//! // Apply ANSI codes
//! let markup = Markup::new(TagTransform::Apply);
//! assert!(markup.process("{r}fail{!}").contains("\x1b[31m"));
//! ```
//!
//! # Tag Syntax
//!
//! A tag is `{BODY}`. Valid bodies:
//!
//! - `!` resets all styling.
//! - A run of codes, applied left to right:
//!   - foreground: `d` black, `r` red, `g` green, `y` yellow, `b` blue,
//!     `m` magenta, `c` cyan, `s` grey, `w` white
//!   - background: the same letters in upper case
//!   - modifiers: `*` bold, `^` dim, `&` italic, `_` underline, `~` blink,
//!     `@` reverse
//!
//!   A trailing `!` switches the listed codes off instead (`{*!}` ends bold).
//! - `#N` with `N` in `0..=255`, `#RGB` or `#RRGGBB` for a foreground palette
//!   color, and `%` instead of `#` for the background. Hex colors are mapped
//!   to the nearest 256-palette entry.
//!
//! Anything else between braces is not a tag and is printed as is.

use console::{Color, Style};
use std::io::{self, Write};

/// Version of this crate, reported by `fmtc --verbose-version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// How to transform matched tags in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagTransform {
    /// Apply ANSI escape codes for the tags.
    /// Used for terminal output with color support.
    Apply,

    /// Remove all tags, outputting only the content.
    /// Used for plain text output without styling.
    Remove,

    /// Keep tags as-is in the output.
    /// Used for debug mode to visualize tag structure.
    Keep,
}

/// A brace-tag markup renderer.
///
/// The renderer processes `{tag}` markup and transforms it according to the
/// configured [`TagTransform`] mode. It holds no global state: whether codes
/// are emitted depends only on the transform, never on what the process
/// detected about its terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markup {
    transform: TagTransform,
}

impl Markup {
    /// Creates a renderer with the given transform mode.
    pub fn new(transform: TagTransform) -> Self {
        Self { transform }
    }

    /// Creates a renderer that styles output when `colors` is true and
    /// strips tags otherwise.
    pub fn with_colors(colors: bool) -> Self {
        if colors {
            Self::new(TagTransform::Apply)
        } else {
            Self::new(TagTransform::Remove)
        }
    }

    /// Returns the configured transform.
    pub fn transform(&self) -> TagTransform {
        self.transform
    }

    /// Transforms the markup in `input` according to the configured mode.
    pub fn process(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut state = StyleState::default();

        for token in Tokenizer::new(input) {
            match token {
                Token::Text(text) => match self.transform {
                    TagTransform::Apply => state.append_styled(&mut output, text),
                    TagTransform::Remove | TagTransform::Keep => output.push_str(text),
                },
                Token::Tag { raw, tag } => match self.transform {
                    TagTransform::Apply => state.apply(&tag),
                    TagTransform::Remove => {}
                    TagTransform::Keep => output.push_str(raw),
                },
            }
        }

        output
    }

    /// Renders `text` into `out`, followed by a newline when `newline` is set.
    ///
    /// The styled text and the terminator are written with a single call so a
    /// rendered message never interleaves with other writers.
    ///
    /// # Errors
    ///
    /// Returns any error produced by the underlying writer.
    pub fn render<W: Write + ?Sized>(&self, out: &mut W, text: &str, newline: bool) -> io::Result<()> {
        let mut rendered = self.process(text);
        if newline {
            rendered.push('\n');
        }
        out.write_all(rendered.as_bytes())?;
        out.flush()
    }
}

/// Removes every valid tag from `input`, keeping the text.
pub fn strip(input: &str) -> String {
    Markup::new(TagTransform::Remove).process(input)
}

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
///
/// # Example
///
/// ```rust
/// use fmtc_markup::rgb_to_ansi256;
///
/// // Pure red maps to ANSI 196
/// assert_eq!(rgb_to_ansi256((255, 0, 0)), 196);
/// ```
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

// ============================================================================
// Tags
// ============================================================================

/// Text modifiers a tag can switch on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    Reverse,
}

/// A single code inside a tag body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Code {
    Fg(Color),
    Bg(Color),
    Mod(Modifier),
}

/// A parsed tag.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Tag {
    /// `{!}`
    Reset,
    /// `{r*}` or, with `off` set, `{r*!}`.
    Codes { codes: Vec<Code>, off: bool },
}

impl Tag {
    fn parse(body: &str) -> Option<Self> {
        if body == "!" {
            return Some(Tag::Reset);
        }
        if let Some(spec) = body.strip_prefix('#') {
            let color = parse_palette_color(spec)?;
            return Some(Tag::Codes {
                codes: vec![Code::Fg(color)],
                off: false,
            });
        }
        if let Some(spec) = body.strip_prefix('%') {
            let color = parse_palette_color(spec)?;
            return Some(Tag::Codes {
                codes: vec![Code::Bg(color)],
                off: false,
            });
        }

        let (letters, off) = match body.strip_suffix('!') {
            Some(rest) => (rest, true),
            None => (body, false),
        };
        if letters.is_empty() {
            return None;
        }

        let codes = letters.chars().map(parse_code).collect::<Option<Vec<_>>>()?;
        Some(Tag::Codes { codes, off })
    }
}

fn parse_code(c: char) -> Option<Code> {
    let modifier = match c {
        '*' => Some(Modifier::Bold),
        '^' => Some(Modifier::Dim),
        '&' => Some(Modifier::Italic),
        '_' => Some(Modifier::Underline),
        '~' => Some(Modifier::Blink),
        '@' => Some(Modifier::Reverse),
        _ => None,
    };
    if let Some(modifier) = modifier {
        return Some(Code::Mod(modifier));
    }

    let color = named_color(c.to_ascii_lowercase())?;
    if c.is_ascii_uppercase() {
        Some(Code::Bg(color))
    } else {
        Some(Code::Fg(color))
    }
}

fn named_color(c: char) -> Option<Color> {
    let color = match c {
        'd' => Color::Black,
        'r' => Color::Red,
        'g' => Color::Green,
        'y' => Color::Yellow,
        'b' => Color::Blue,
        'm' => Color::Magenta,
        'c' => Color::Cyan,
        // console has no plain grey; palette 8 is "bright black"
        's' => Color::Color256(8),
        'w' => Color::White,
        _ => return None,
    };
    Some(color)
}

/// Parses the part after `#` or `%`.
///
/// One to three decimal digits name a palette index; otherwise the spec must
/// be a 3 or 6 digit hex color.
fn parse_palette_color(spec: &str) -> Option<Color> {
    if spec.is_empty() {
        return None;
    }
    if spec.len() <= 3 && spec.chars().all(|c| c.is_ascii_digit()) {
        return spec.parse::<u8>().ok().map(Color::Color256);
    }
    parse_hex(spec).map(|rgb| Color::Color256(rgb_to_ansi256(rgb)))
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        // #rgb -> #rrggbb
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some((r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

// ============================================================================
// Style state
// ============================================================================

/// The style in effect at the current position of the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct StyleState {
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
    dim: bool,
    italic: bool,
    underline: bool,
    blink: bool,
    reverse: bool,
}

impl StyleState {
    fn apply(&mut self, tag: &Tag) {
        match tag {
            Tag::Reset => *self = Self::default(),
            Tag::Codes { codes, off } => {
                for code in codes {
                    self.set(*code, !off);
                }
            }
        }
    }

    fn set(&mut self, code: Code, on: bool) {
        match code {
            Code::Fg(color) => self.fg = on.then_some(color),
            Code::Bg(color) => self.bg = on.then_some(color),
            Code::Mod(Modifier::Bold) => self.bold = on,
            Code::Mod(Modifier::Dim) => self.dim = on,
            Code::Mod(Modifier::Italic) => self.italic = on,
            Code::Mod(Modifier::Underline) => self.underline = on,
            Code::Mod(Modifier::Blink) => self.blink = on,
            Code::Mod(Modifier::Reverse) => self.reverse = on,
        }
    }

    fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    fn to_style(&self) -> Style {
        let mut style = Style::new().force_styling(true);
        if let Some(fg) = self.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg);
        }
        if self.bold {
            style = style.bold();
        }
        if self.dim {
            style = style.dim();
        }
        if self.italic {
            style = style.italic();
        }
        if self.underline {
            style = style.underlined();
        }
        if self.blink {
            style = style.blink();
        }
        if self.reverse {
            style = style.reverse();
        }
        style
    }

    /// Appends `text` styled with the current state; each run resets itself.
    fn append_styled(&self, output: &mut String, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.is_plain() {
            output.push_str(text);
        } else {
            output.push_str(&self.to_style().apply_to(text).to_string());
        }
    }
}

// ============================================================================
// Tokenizer
// ============================================================================

/// Token types produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    /// Plain text content, including anything that looked like a tag but
    /// was not one.
    Text(&'a str),
    /// A valid tag and its source text.
    Tag { raw: &'a str, tag: Tag },
}

/// Tokenizer for brace tags.
struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn emit_text(&mut self, len: usize) -> Token<'a> {
        let text = &self.input[self.pos..self.pos + len];
        self.pos += len;
        Token::Text(text)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        let remaining = &self.input[self.pos..];

        let Some(open) = remaining.find('{') else {
            // No more braces - rest is text
            return Some(self.emit_text(remaining.len()));
        };
        if open > 0 {
            return Some(self.emit_text(open));
        }

        // We're at a '{'
        let after = &remaining[1..];
        let Some(close) = after.find('}') else {
            return Some(self.emit_text(remaining.len()));
        };

        // Another '{' before the '}' means this brace opens nothing
        if let Some(inner) = after[..close].find('{') {
            return Some(self.emit_text(inner + 1));
        }

        let body = &after[..close];
        let len = close + 2;
        match Tag::parse(body) {
            Some(tag) => {
                let raw = &remaining[..len];
                self.pos += len;
                Some(Token::Tag { raw, tag })
            }
            None => Some(self.emit_text(len)),
        }
    }
}
