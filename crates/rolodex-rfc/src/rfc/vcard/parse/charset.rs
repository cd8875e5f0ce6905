//! Charset detection and decoding.
//!
//! A byte-order mark is a whole-document signal and wins over everything.
//! Without one, each field is decoded on its own: the `CHARSET` parameter if
//! present, else the configured default, else the configured fallback.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

use super::error::{ParseWarning, WarningKind};

/// Producer labels that the WHATWG label table does not know.
static CHARSET_ALIASES: &[(&str, &str)] = &[
    ("LATIN-1", "windows-1252"),
    ("LATIN-2", "ISO-8859-2"),
    ("CP-1252", "windows-1252"),
    ("MAC", "macintosh"),
    ("SHIFT-JIS", "Shift_JIS"),
    ("UTF_8", "UTF-8"),
];

/// Resolves a charset label (any case, optionally quoted).
#[must_use]
pub fn lookup(label: &str) -> Option<&'static Encoding> {
    let label = label.trim().trim_matches('"');
    let target = CHARSET_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(label))
        .map_or(label, |(_, canonical)| canonical);
    Encoding::for_label_no_replacement(target.as_bytes())
}

/// Detects a byte-order mark, returning the encoding and the BOM length.
#[must_use]
pub fn sniff_bom(bytes: &[u8]) -> Option<(&'static Encoding, usize)> {
    Encoding::for_bom(bytes)
}

/// Decodes a buffer to text.
///
/// A leading BOM selects the encoding and `hint` is ignored. Otherwise
/// `hint` names the charset; unknown hints and the no-hint case decode as
/// UTF-8, replacing invalid sequences. Returns the text and the encoding
/// that was applied.
#[must_use]
pub fn decode(bytes: &[u8], hint: Option<&str>) -> (String, &'static Encoding) {
    if let Some((encoding, bom_len)) = sniff_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (text.into_owned(), encoding);
    }

    let encoding = hint.and_then(lookup).unwrap_or(UTF_8);
    let (text, _) = encoding.decode_without_bom_handling(bytes);
    (text.into_owned(), encoding)
}

/// Transcodes a BOM-prefixed buffer to UTF-8.
///
/// Returns the input unchanged (minus a UTF-8 BOM) when there is no
/// non-UTF-8 BOM, and whether a transcode happened.
#[must_use]
pub fn normalize_document(bytes: &[u8]) -> (Cow<'_, [u8]>, bool) {
    match sniff_bom(bytes) {
        Some((encoding, bom_len)) if encoding == UTF_8 => (Cow::Borrowed(&bytes[bom_len..]), false),
        Some((encoding, bom_len)) => {
            let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
            tracing::debug!(charset = encoding.name(), "Transcoded document by byte-order mark");
            (Cow::Owned(text.into_owned().into_bytes()), true)
        }
        None => (Cow::Borrowed(bytes), false),
    }
}

/// Per-field decoder used inside one block.
#[derive(Debug, Clone, Copy)]
pub struct FieldDecoder {
    /// Set when the document was transcoded from a BOM; `CHARSET` is ignored.
    forced: bool,
    default: &'static Encoding,
    fallback: &'static Encoding,
}

impl Default for FieldDecoder {
    fn default() -> Self {
        Self::new(UTF_8, WINDOWS_1252)
    }
}

impl FieldDecoder {
    /// Creates a decoder with the given default and fallback charsets.
    #[must_use]
    pub const fn new(default: &'static Encoding, fallback: &'static Encoding) -> Self {
        Self {
            forced: false,
            default,
            fallback,
        }
    }

    /// Returns a decoder that treats every field as UTF-8, ignoring `CHARSET`.
    #[must_use]
    pub const fn forced_utf8(self) -> Self {
        Self {
            forced: true,
            default: UTF_8,
            fallback: self.fallback,
        }
    }

    /// Returns whether field charset declarations are ignored.
    #[must_use]
    pub const fn is_forced(&self) -> bool {
        self.forced
    }

    /// Decodes one field value.
    ///
    /// Never fails: unknown charsets degrade to lossy UTF-8 and invalid
    /// bytes are replaced, each with a warning.
    pub fn decode(
        &self,
        bytes: &[u8],
        declared: Option<&str>,
        line: usize,
        warnings: &mut Vec<ParseWarning>,
    ) -> String {
        if self.forced {
            return String::from_utf8_lossy(bytes).into_owned();
        }

        if let Some(label) = declared {
            let Some(encoding) = lookup(label) else {
                tracing::warn!(line, charset = label, "Unsupported charset, keeping raw bytes");
                warnings.push(ParseWarning::charset_unsupported(line, label));
                return String::from_utf8_lossy(bytes).into_owned();
            };

            let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
            if had_errors {
                tracing::warn!(line, charset = encoding.name(), "Invalid bytes for declared charset");
                warnings.push(ParseWarning::new(
                    WarningKind::InvalidCharacters,
                    line,
                    format!("invalid {} sequence", encoding.name()),
                ));
            }
            return text.into_owned();
        }

        let (text, had_errors) = self.default.decode_without_bom_handling(bytes);
        if !had_errors {
            return text.into_owned();
        }

        let (text, _) = self.fallback.decode_without_bom_handling(bytes);
        tracing::warn!(
            line,
            default = self.default.name(),
            fallback = self.fallback.name(),
            "Invalid bytes for default charset, used fallback"
        );
        warnings.push(ParseWarning::new(
            WarningKind::InvalidCharacters,
            line,
            format!(
                "not valid {}, decoded as {}",
                self.default.name(),
                self.fallback.name()
            ),
        ));
        text.into_owned()
    }
}
