//! Integration tests for fmtc-input.
//!
//! These tests run resolution and escape decoding together, the way the
//! binary does, using mocks so results do not depend on the real terminal.

use fmtc_input::{normalize, InputError, InputResolver, InputSourceKind, MockStdin};

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn resolve_and_normalize(stdin: MockStdin, argv: &[&str]) -> Result<(String, bool), InputError> {
    let input = InputResolver::with_reader(stdin).resolve(&args(argv))?;
    let from_stdin = input.from_stdin();
    Ok((normalize(&input.value).into_owned(), from_stdin))
}

// ============================================================================
// Arguments
// ============================================================================

#[test]
fn arguments_are_joined_then_decoded() {
    let (text, from_stdin) =
        resolve_and_normalize(MockStdin::terminal(), &["{r}error:{!}", r"disk\tfull\n"]).unwrap();
    assert_eq!(text, "{r}error:{!} disk\tfull\n");
    assert!(!from_stdin);
}

#[test]
fn escape_split_across_arguments_is_not_joined_into_one() {
    // "\" and "n" as separate words become "\ n" once joined: not an escape.
    let (text, _) = resolve_and_normalize(MockStdin::terminal(), &["\\", "n"]).unwrap();
    assert_eq!(text, "\\ n");
}

// ============================================================================
// Stdin
// ============================================================================

#[test]
fn piped_text_keeps_its_own_newline() {
    let (text, from_stdin) = resolve_and_normalize(MockStdin::piped("hi\n"), &[]).unwrap();
    assert_eq!(text, "hi\n");
    assert!(from_stdin);
}

#[test]
fn piped_text_is_decoded_too() {
    let (text, _) =
        resolve_and_normalize(MockStdin::piped("{*}Done!{!}\\n\"quoted\"\n"), &[]).unwrap();
    assert_eq!(text, "{*}Done!{!}\n\"quoted\"\n");
}

#[test]
fn empty_pipe_is_empty_text() {
    let (text, from_stdin) = resolve_and_normalize(MockStdin::piped_empty(), &[]).unwrap();
    assert_eq!(text, "");
    assert!(from_stdin);
}

#[test]
fn terminal_without_arguments_fails_silently() {
    let err = resolve_and_normalize(MockStdin::terminal(), &[]).unwrap_err();
    assert!(err.is_silent());
}

#[test]
fn read_error_is_not_silent() {
    let err =
        resolve_and_normalize(MockStdin::failing(std::io::ErrorKind::BrokenPipe), &[]).unwrap_err();
    assert!(matches!(err, InputError::StdinFailed(_)));
    assert!(!err.is_silent());
}

#[test]
fn source_kind_reported() {
    let resolver = InputResolver::with_reader(MockStdin::piped("x"));
    assert_eq!(resolver.resolve(&[]).unwrap().source, InputSourceKind::Stdin);
    assert_eq!(
        resolver.resolve(&args(&["y"])).unwrap().source,
        InputSourceKind::Arg
    );
}
