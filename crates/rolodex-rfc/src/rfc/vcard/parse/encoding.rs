//! Transfer encodings: base64, quoted-printable and data URIs.

use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{Engine as _, alphabet};

use crate::rfc::vcard::core::VCardValue;

/// Base64 engine that accepts the padding and trailing-bit variations seen
/// in real producers.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decodes base64 text, ignoring embedded whitespace.
///
/// ## Errors
/// Returns the decoder error for invalid symbols or lengths.
pub fn decode_base64(text: &[u8]) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    LENIENT.decode(compact)
}

/// Decodes quoted-printable bytes.
///
/// Returns the decoded bytes and whether a malformed escape was found.
/// Malformed escapes are kept literally.
#[must_use]
pub fn decode_quoted_printable(input: &[u8]) -> (Vec<u8>, bool) {
    let mut out = Vec::with_capacity(input.len());
    let mut malformed = false;
    let mut i = 0;

    while i < input.len() {
        let b = input[i];
        if b != b'=' {
            out.push(b);
            i += 1;
            continue;
        }

        match input.get(i + 1..) {
            // Soft line break or trailing '='
            Some([] | [b'\n', ..]) => i += 2,
            Some([b'\r', b'\n', ..]) => i += 3,
            Some([hi, lo, ..]) => match (hex_value(*hi), hex_value(*lo)) {
                (Some(hi), Some(lo)) => {
                    out.push((hi << 4) | lo);
                    i += 3;
                }
                _ => {
                    malformed = true;
                    out.push(b'=');
                    i += 1;
                }
            },
            _ => {
                malformed = true;
                out.push(b'=');
                i += 1;
            }
        }
    }

    (out, malformed)
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// A decoded `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Media type from the URI, lowercased.
    pub media_type: Option<String>,
    /// Decoded payload.
    pub data: Vec<u8>,
}

/// Parses a `data:` URI (RFC 2397).
///
/// Returns `None` when the text is not a data URI.
///
/// ## Errors
/// The inner result carries the base64 error for a bad payload.
#[must_use]
pub fn parse_data_uri(uri: &str) -> Option<Result<DataUri, base64::DecodeError>> {
    let uri = uri.trim();
    let rest = uri
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .map(|_| &uri[5..])?;
    let (meta, payload) = rest.split_once(',')?;

    let mut attrs = meta.split(';');
    let media_type = attrs
        .next()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_ascii_lowercase);
    let is_base64 = attrs.any(|a| a.trim().eq_ignore_ascii_case("base64"));

    let data = if is_base64 {
        match decode_base64(payload.as_bytes()) {
            Ok(data) => data,
            Err(err) => return Some(Err(err)),
        }
    } else {
        percent_decode(payload.as_bytes())
    };

    Some(Ok(DataUri { media_type, data }))
}

fn percent_decode(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        if let [b'%', hi, lo, ..] = &input[i..]
            && let (Some(hi), Some(lo)) = (hex_value(*hi), hex_value(*lo))
        {
            out.push((hi << 4) | lo);
            i += 3;
            continue;
        }
        out.push(input[i]);
        i += 1;
    }

    out
}

/// Interprets caller-supplied text for a media field.
///
/// A valid data URI becomes an inline binary value; anything else is kept
/// as a URI reference.
#[must_use]
pub fn parse_media_text(text: &str) -> VCardValue {
    match parse_data_uri(text) {
        Some(Ok(DataUri { media_type, data })) => VCardValue::Binary { data, media_type },
        _ => VCardValue::Uri(text.trim().to_string()),
    }
}
