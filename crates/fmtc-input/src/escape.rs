//! Backslash escape decoding.
//!
//! Text typed in a shell arrives with its escapes still literal: `\n` is a
//! backslash followed by `n`. This module turns those sequences into the
//! characters they denote.
//!
//! Supported sequences:
//!
//! | Sequence       | Result                        |
//! |----------------|-------------------------------|
//! | `\n` `\t` `\r` | newline, tab, carriage return |
//! | `\\`           | backslash                     |
//! | `\"` `\'`      | the quote itself              |
//! | `\a` `\b` `\f` `\v` | BEL, BS, FF, VT          |
//! | `\e`           | ESC                           |
//! | `\xHH`         | one byte (`00`–`ff`)          |
//! | `\NNN`         | one byte, three octal digits (`000`–`377`) |
//! | `\uHHHH`       | Unicode scalar value          |
//! | `\UHHHHHHHH`   | Unicode scalar value          |
//!
//! Consecutive byte escapes are collected and decoded together as UTF-8, so
//! `\xe2\x9c\x93` and `\342\234\223` both give `✓`. A run that is not valid
//! UTF-8 is malformed as a whole.
//!
//! Double quotes without a backslash are ordinary content.
//!
//! [`unescape`] is strict and stops at the first malformed sequence.
//! [`normalize`] never fails: a malformed or unknown sequence is copied
//! through verbatim and decoding continues after it.

use std::borrow::Cow;
use std::convert::Infallible;

/// What was wrong with an escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EscapeErrorKind {
    /// A backslash at the very end of the text.
    #[error("trailing backslash")]
    TrailingBackslash,

    /// A backslash followed by a character with no escape meaning.
    #[error("unknown escape '\\{0}'")]
    Unknown(char),

    /// Fewer digits than the sequence requires, or a non-digit among them.
    #[error("expected {expected} digits")]
    Truncated { expected: usize },

    /// An octal escape above `\377`.
    #[error("value {0:#o} does not fit in a byte")]
    OutOfRange(u32),

    /// A run of byte escapes that is not valid UTF-8.
    #[error("byte escapes do not form valid UTF-8")]
    InvalidUtf8,

    /// A Unicode escape that names no scalar value (surrogate or too large).
    #[error("{0:#x} is not a Unicode scalar value")]
    InvalidScalar(u32),
}

/// A malformed escape sequence and where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid escape at byte {offset}: {kind}")]
pub struct EscapeError {
    /// Byte offset of the introducing backslash.
    pub offset: usize,
    /// What went wrong.
    pub kind: EscapeErrorKind,
}

/// Decodes every escape sequence in `raw`, failing on the first bad one.
///
/// Returns the input unchanged (borrowed) when it holds no backslash.
///
/// # Errors
///
/// Returns an [`EscapeError`] for the first malformed or unknown sequence.
///
/// # Example
///
/// ```
/// use fmtc_input::unescape;
///
/// assert_eq!(unescape(r"a\tb").unwrap(), "a\tb");
/// assert!(unescape(r"bad\q").is_err());
/// ```
pub fn unescape(raw: &str) -> Result<Cow<'_, str>, EscapeError> {
    scan(raw, Err)
}

/// Decodes escape sequences in `raw` on a best-effort basis.
///
/// Malformed sequences are left exactly as typed; everything else is decoded.
///
/// # Example
///
/// ```
/// use fmtc_input::normalize;
///
/// assert_eq!(normalize(r#"say "hi"\n"#), "say \"hi\"\n");
/// assert_eq!(normalize(r"50\% done\n"), "50\\% done\n");
/// assert_eq!(normalize(r"\xe2\x9c\x93 ok"), "✓ ok");
/// ```
pub fn normalize(raw: &str) -> Cow<'_, str> {
    let decoded = scan(raw, |err| {
        tracing::debug!(offset = err.offset, kind = %err.kind, "keeping malformed escape verbatim");
        Ok::<(), Infallible>(())
    });
    match decoded {
        Ok(text) => text,
        Err(never) => match never {},
    }
}

/// One decoded escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Char(char),
    Byte(u8),
}

/// Consecutive byte escapes waiting to be decoded as UTF-8.
struct ByteRun {
    start: usize,
    end: usize,
    bytes: Vec<u8>,
}

/// Walks `raw`, decoding escapes into a new string.
///
/// Each malformed sequence is handed to `malformed`; returning `Err` stops
/// the scan, returning `Ok` keeps the sequence verbatim and carries on.
fn scan<E, F>(raw: &str, mut malformed: F) -> Result<Cow<'_, str>, E>
where
    F: FnMut(EscapeError) -> Result<(), E>,
{
    let Some(first) = raw.find('\\') else {
        return Ok(Cow::Borrowed(raw));
    };

    let mut out = String::with_capacity(raw.len());
    out.push_str(&raw[..first]);
    let mut run: Option<ByteRun> = None;
    let mut pos = first;

    while pos < raw.len() {
        let rest = &raw[pos..];
        let Some(after) = rest.strip_prefix('\\') else {
            flush_run(raw, run.take(), &mut out, &mut malformed)?;
            let next = rest.find('\\').unwrap_or(rest.len());
            out.push_str(&rest[..next]);
            pos += next;
            continue;
        };

        match decode_sequence(after) {
            Ok((Unit::Byte(byte), used)) => {
                let end = pos + 1 + used;
                let pending = run.get_or_insert_with(|| ByteRun {
                    start: pos,
                    end,
                    bytes: Vec::new(),
                });
                pending.bytes.push(byte);
                pending.end = end;
                pos = end;
            }
            Ok((Unit::Char(ch), used)) => {
                flush_run(raw, run.take(), &mut out, &mut malformed)?;
                out.push(ch);
                pos += 1 + used;
            }
            Err(kind) => {
                flush_run(raw, run.take(), &mut out, &mut malformed)?;
                malformed(EscapeError { offset: pos, kind })?;
                out.push('\\');
                pos += 1;
            }
        }
    }
    flush_run(raw, run.take(), &mut out, &mut malformed)?;

    Ok(Cow::Owned(out))
}

/// Appends a finished byte run, or its source text if it is not UTF-8.
fn flush_run<E, F>(raw: &str, run: Option<ByteRun>, out: &mut String, malformed: &mut F) -> Result<(), E>
where
    F: FnMut(EscapeError) -> Result<(), E>,
{
    let Some(run) = run else {
        return Ok(());
    };
    match String::from_utf8(run.bytes) {
        Ok(text) => out.push_str(&text),
        Err(_) => {
            malformed(EscapeError {
                offset: run.start,
                kind: EscapeErrorKind::InvalidUtf8,
            })?;
            out.push_str(&raw[run.start..run.end]);
        }
    }
    Ok(())
}

/// Decodes the sequence following a backslash.
///
/// Returns the unit and the number of bytes consumed after the backslash.
fn decode_sequence(after: &str) -> Result<(Unit, usize), EscapeErrorKind> {
    let Some(c) = after.chars().next() else {
        return Err(EscapeErrorKind::TrailingBackslash);
    };

    let simple = match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        '\'' => Some('\''),
        'a' => Some('\x07'),
        'b' => Some('\x08'),
        'f' => Some('\x0c'),
        'v' => Some('\x0b'),
        'e' => Some('\x1b'),
        _ => None,
    };
    if let Some(ch) = simple {
        return Ok((Unit::Char(ch), 1));
    }

    match c {
        'x' => byte(fixed_digits(after, 1, 2, 16)?).map(|b| (Unit::Byte(b), 3)),
        '0'..='7' => byte(fixed_digits(after, 0, 3, 8)?).map(|b| (Unit::Byte(b), 3)),
        'u' => scalar(fixed_digits(after, 1, 4, 16)?).map(|ch| (Unit::Char(ch), 5)),
        'U' => scalar(fixed_digits(after, 1, 8, 16)?).map(|ch| (Unit::Char(ch), 9)),
        other => Err(EscapeErrorKind::Unknown(other)),
    }
}

fn fixed_digits(s: &str, start: usize, width: usize, radix: u32) -> Result<u32, EscapeErrorKind> {
    let truncated = EscapeErrorKind::Truncated { expected: width };
    let digits = s.get(start..start + width).ok_or(truncated)?;
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(truncated);
    }
    u32::from_str_radix(digits, radix).map_err(|_| truncated)
}

fn byte(value: u32) -> Result<u8, EscapeErrorKind> {
    u8::try_from(value).map_err(|_| EscapeErrorKind::OutOfRange(value))
}

fn scalar(value: u32) -> Result<char, EscapeErrorKind> {
    char::from_u32(value).ok_or(EscapeErrorKind::InvalidScalar(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Simple escapes ====================

    mod simple {
        use super::*;

        #[test]
        fn plain_text_is_borrowed() {
            let out = normalize("hello world");
            assert!(matches!(out, Cow::Borrowed("hello world")));
        }

        #[test]
        fn newline() {
            assert_eq!(normalize(r"a\nb"), "a\nb");
        }

        #[test]
        fn tab_and_carriage_return() {
            assert_eq!(normalize(r"a\tb\rc"), "a\tb\rc");
        }

        #[test]
        fn backslash() {
            assert_eq!(normalize(r"C:\\dir"), r"C:\dir");
        }

        #[test]
        fn quotes() {
            assert_eq!(normalize(r#"\"quoted\" \'single\'"#), r#""quoted" 'single'"#);
        }

        #[test]
        fn bare_double_quotes_survive() {
            assert_eq!(normalize(r#"say "hi""#), r#"say "hi""#);
            assert_eq!(normalize(r#"say "hi"\n"#), "say \"hi\"\n");
        }

        #[test]
        fn control_letters() {
            assert_eq!(normalize(r"\a\b\f\v\e"), "\x07\x08\x0c\x0b\x1b");
        }

        #[test]
        fn real_newlines_untouched() {
            assert_eq!(normalize("line one\nline two\\n"), "line one\nline two\n");
        }

        #[test]
        fn markup_braces_untouched() {
            assert_eq!(normalize(r"{*}Done!{!}\n"), "{*}Done!{!}\n");
        }
    }

    // ==================== Numeric escapes ====================

    mod numeric {
        use super::*;

        #[test]
        fn hex_byte() {
            assert_eq!(normalize(r"\x41\x7e"), "A~");
        }

        #[test]
        fn hex_byte_uppercase_digits() {
            assert_eq!(normalize(r"\x4A"), "J");
        }

        #[test]
        fn octal() {
            assert_eq!(normalize(r"\101\033"), "A\x1b");
        }

        #[test]
        fn unicode_short() {
            assert_eq!(normalize(r"\u00e9t\u00e9"), "été");
        }

        #[test]
        fn unicode_long() {
            assert_eq!(normalize(r"\U0001F600"), "\u{1F600}");
        }

        #[test]
        fn utf8_hex_bytes() {
            assert_eq!(normalize(r"\xe2\x9c\x93 ok"), "✓ ok");
            assert_eq!(unescape(r"\xE2\x9C\x93").unwrap(), "✓");
        }

        #[test]
        fn utf8_octal_bytes() {
            assert_eq!(normalize(r"\342\234\223 ok"), "✓ ok");
        }

        #[test]
        fn mixed_hex_and_octal_run() {
            assert_eq!(normalize(r"\xc3\251"), "é");
        }

        #[test]
        fn ascii_bytes_around_a_run() {
            assert_eq!(normalize(r"\x41\xc3\xa9\x42"), "AéB");
        }

        #[test]
        fn run_broken_by_text() {
            // Each half is incomplete on its own
            assert_eq!(normalize(r"\xc3 \xa9"), r"\xc3 \xa9");
        }

        #[test]
        fn invalid_utf8_run_strict() {
            let err = unescape(r"ab\xff\x41").unwrap_err();
            assert_eq!(
                err,
                EscapeError {
                    offset: 2,
                    kind: EscapeErrorKind::InvalidUtf8
                }
            );
        }

        #[test]
        fn invalid_utf8_run_lossy() {
            assert_eq!(normalize(r"\xff\x41\n"), "\\xff\\x41\n");
            assert_eq!(normalize(r"\377"), r"\377");
        }

        #[test]
        fn octal_above_a_byte_rejected() {
            let err = unescape(r"\477").unwrap_err();
            assert_eq!(err.kind, EscapeErrorKind::OutOfRange(0o477));
            assert_eq!(normalize(r"\477"), r"\477");
        }

        #[test]
        fn surrogate_rejected() {
            let err = unescape(r"\ud800").unwrap_err();
            assert_eq!(err.kind, EscapeErrorKind::InvalidScalar(0xd800));
        }

        #[test]
        fn too_large_scalar_rejected() {
            let err = unescape(r"\U00110000").unwrap_err();
            assert_eq!(err.kind, EscapeErrorKind::InvalidScalar(0x110000));
        }
    }

    // ==================== Malformed input ====================

    mod malformed {
        use super::*;

        #[test]
        fn unknown_escape_strict() {
            let err = unescape(r"ab\q").unwrap_err();
            assert_eq!(
                err,
                EscapeError {
                    offset: 2,
                    kind: EscapeErrorKind::Unknown('q')
                }
            );
        }

        #[test]
        fn unknown_escape_lossy() {
            assert_eq!(normalize(r"\q\n"), "\\q\n");
        }

        #[test]
        fn trailing_backslash() {
            assert_eq!(
                unescape("end\\").unwrap_err().kind,
                EscapeErrorKind::TrailingBackslash
            );
            assert_eq!(normalize("end\\"), "end\\");
        }

        #[test]
        fn truncated_hex() {
            assert_eq!(
                unescape(r"\x4").unwrap_err().kind,
                EscapeErrorKind::Truncated { expected: 2 }
            );
            assert_eq!(normalize(r"\x4"), r"\x4");
        }

        #[test]
        fn non_digit_in_unicode() {
            assert_eq!(normalize(r"\u12zz\t"), "\\u12zz\t");
        }

        #[test]
        fn short_octal() {
            assert_eq!(normalize(r"\12"), r"\12");
        }

        #[test]
        fn multibyte_after_backslash() {
            assert_eq!(normalize("\\é\\n"), "\\é\n");
            assert_eq!(unescape("\\é").unwrap_err().kind, EscapeErrorKind::Unknown('é'));
        }

        #[test]
        fn error_display() {
            let err = unescape(r"x\q").unwrap_err();
            assert_eq!(err.to_string(), "invalid escape at byte 1: unknown escape '\\q'");
        }
    }
}
