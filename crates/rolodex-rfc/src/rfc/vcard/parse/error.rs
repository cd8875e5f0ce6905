//! vCard import diagnostics.
//!
//! Import never fails as a whole. Anything that goes wrong is scoped to the
//! smallest unit possible (a field, a line or a block) and reported as a
//! [`ParseWarning`] alongside the records that could be recovered.

use std::fmt;

/// A recoverable problem found while importing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// The kind of problem.
    pub kind: WarningKind,
    /// Physical line number where the affected unit starts (1-based).
    pub line: usize,
    /// Additional context or message.
    pub message: String,
}

impl ParseWarning {
    /// Creates a new warning.
    #[must_use]
    pub fn new(kind: WarningKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }

    /// Creates a malformed line warning.
    #[must_use]
    pub fn malformed_line(line: usize, message: impl Into<String>) -> Self {
        Self::new(WarningKind::MalformedLine, line, message)
    }

    /// Creates an unsupported charset warning.
    #[must_use]
    pub fn charset_unsupported(line: usize, label: &str) -> Self {
        Self::new(
            WarningKind::CharsetUnsupported,
            line,
            format!("unsupported charset: {label}"),
        )
    }

    /// Creates an unterminated block warning.
    #[must_use]
    pub fn unterminated_block(line: usize) -> Self {
        Self::new(
            WarningKind::UnterminatedBlock,
            line,
            "BEGIN:VCARD without matching END:VCARD",
        )
    }

    /// Creates a base64 decode failure warning.
    #[must_use]
    pub fn base64(line: usize, property: &str, err: &base64::DecodeError) -> Self {
        Self::new(
            WarningKind::Base64DecodeFailure,
            line,
            format!("{property}: {err}"),
        )
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.kind, self.message)
    }
}

impl std::error::Error for ParseWarning {}

/// The kind of import warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A `CHARSET` parameter names an unknown charset; bytes kept as UTF-8.
    CharsetUnsupported,
    /// Bytes did not decode cleanly under the declared or default charset.
    InvalidCharacters,
    /// A line could not be split into name and value; line skipped.
    MalformedLine,
    /// A parameter could not be parsed; parameter skipped.
    InvalidParameter,
    /// A block has no `END:VCARD`; block dropped.
    UnterminatedBlock,
    /// A base64 payload could not be decoded; value left empty.
    Base64DecodeFailure,
    /// A quoted-printable escape was malformed; kept literally.
    QuotedPrintableDecodeFailure,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CharsetUnsupported => write!(f, "unsupported charset"),
            Self::InvalidCharacters => write!(f, "invalid characters"),
            Self::MalformedLine => write!(f, "malformed line"),
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::UnterminatedBlock => write!(f, "unterminated block"),
            Self::Base64DecodeFailure => write!(f, "base64 decode failure"),
            Self::QuotedPrintableDecodeFailure => write!(f, "quoted-printable decode failure"),
        }
    }
}
