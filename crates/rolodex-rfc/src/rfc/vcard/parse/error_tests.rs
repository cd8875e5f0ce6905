//! Tests for vCard import warnings.

use super::error::{ParseWarning, WarningKind};

#[test]
fn warning_new() {
    let warning = ParseWarning::new(WarningKind::InvalidParameter, 5, "test message");
    assert_eq!(warning.line, 5);
    assert_eq!(warning.kind, WarningKind::InvalidParameter);
    assert_eq!(warning.message, "test message");
}

#[test]
fn warning_malformed_line() {
    let warning = ParseWarning::malformed_line(10, "missing colon separator");
    assert_eq!(warning.line, 10);
    assert_eq!(warning.kind, WarningKind::MalformedLine);
    assert_eq!(warning.message, "missing colon separator");
}

#[test]
fn warning_charset_unsupported() {
    let warning = ParseWarning::charset_unsupported(3, "X-KLINGON");
    assert_eq!(warning.kind, WarningKind::CharsetUnsupported);
    assert!(warning.message.contains("X-KLINGON"));
}

#[test]
fn warning_unterminated_block() {
    let warning = ParseWarning::unterminated_block(1);
    assert_eq!(warning.kind, WarningKind::UnterminatedBlock);
    assert!(warning.message.contains("END:VCARD"));
}

#[test]
fn warning_base64() {
    let err = base64::DecodeError::InvalidByte(2, b'*');
    let warning = ParseWarning::base64(7, "PHOTO", &err);
    assert_eq!(warning.line, 7);
    assert_eq!(warning.kind, WarningKind::Base64DecodeFailure);
    assert!(warning.message.starts_with("PHOTO: "));
}

#[test]
fn warning_display() {
    let warning = ParseWarning::new(WarningKind::QuotedPrintableDecodeFailure, 12, "=ZZ");
    let displayed = format!("{warning}");
    assert!(displayed.contains("line 12"));
    assert!(displayed.contains("quoted-printable decode failure"));
    assert!(displayed.contains("=ZZ"));
}

#[test]
fn warning_kind_display() {
    assert_eq!(
        format!("{}", WarningKind::CharsetUnsupported),
        "unsupported charset"
    );
    assert_eq!(format!("{}", WarningKind::MalformedLine), "malformed line");
    assert_eq!(
        format!("{}", WarningKind::UnterminatedBlock),
        "unterminated block"
    );
    assert_eq!(
        format!("{}", WarningKind::Base64DecodeFailure),
        "base64 decode failure"
    );
    assert_eq!(
        format!("{}", WarningKind::InvalidCharacters),
        "invalid characters"
    );
}

#[test]
fn warning_is_an_error() {
    fn promote(w: ParseWarning) -> Box<dyn std::error::Error> {
        Box::new(w)
    }
    let err = promote(ParseWarning::malformed_line(1, "x"));
    assert!(err.to_string().contains("malformed line"));
}
