//! Property parser: one logical line to one decoded property.

use std::borrow::Cow;

use super::builder::RecordBuilder;
use super::charset::FieldDecoder;
use super::encoding::{DataUri, decode_base64, decode_quoted_printable, parse_data_uri};
use super::error::{ParseWarning, WarningKind};
use super::lexer::{ContentLine, LogicalLine, LogicalLines, parse_content_line};
use super::values::{has_nonstandard_escape, parse_structured, parse_text_list, unescape_text};
use crate::rfc::vcard::core::{
    ContactRecord, FieldKind, VCardProperty, VCardValue, ValueGrammar, encodings,
};

/// Parses one logical line into a decoded property.
///
/// The value is transfer-decoded (base64, quoted-printable), then
/// charset-decoded, then interpreted according to the field's grammar.
/// Field-local problems are pushed to `warnings` and the property is still
/// returned.
///
/// ## Errors
/// Returns a [`WarningKind::MalformedLine`] warning when the line cannot be
/// split into name and value; the caller skips the line.
pub fn parse_line(
    line: &LogicalLine,
    decoder: &FieldDecoder,
    warnings: &mut Vec<ParseWarning>,
) -> Result<VCardProperty, ParseWarning> {
    let ContentLine {
        group,
        name,
        params,
        value: raw,
    } = parse_content_line(line, warnings)?;

    let grammar = FieldKind::from_name(&name).grammar();
    let mut property = VCardProperty {
        group,
        name,
        params,
        value: VCardValue::Text(String::new()),
        raw_value: String::new(),
    };

    let encoding = property.encoding().map(str::to_ascii_uppercase);
    let bytes: Cow<'_, [u8]> = match encoding.as_deref() {
        Some(enc) if encodings::is_base64(enc) => {
            let data = decode_base64(raw).unwrap_or_else(|err| {
                tracing::warn!(line = line.number, property = %property.name, %err, "Bad base64 payload");
                warnings.push(ParseWarning::base64(line.number, &property.name, &err));
                Vec::new()
            });

            if grammar == ValueGrammar::Media {
                property.value = VCardValue::Binary {
                    data,
                    media_type: None,
                };
                return Ok(property);
            }
            Cow::Owned(data)
        }
        Some(encodings::QUOTED_PRINTABLE) => {
            let (data, malformed) = decode_quoted_printable(raw);
            if malformed {
                tracing::warn!(line = line.number, property = %property.name, "Malformed quoted-printable escape");
                warnings.push(ParseWarning::new(
                    WarningKind::QuotedPrintableDecodeFailure,
                    line.number,
                    format!("{}: malformed escape kept literally", property.name),
                ));
            }
            Cow::Owned(data)
        }
        _ => Cow::Borrowed(raw),
    };

    let text = decoder.decode(&bytes, property.charset(), line.number, warnings);

    if grammar != ValueGrammar::Media && has_nonstandard_escape(&text) {
        tracing::trace!(line = line.number, property = %property.name, "Non-standard backslash escape kept");
    }

    property.value = match grammar {
        ValueGrammar::Text => VCardValue::Text(unescape_text(&text)),
        ValueGrammar::TextList => VCardValue::TextList(parse_text_list(&text)),
        ValueGrammar::Structured => VCardValue::Structured(parse_structured(&text)),
        ValueGrammar::Media => media_value(&text, line.number, &property.name, warnings),
    };

    if !matches!(property.value, VCardValue::Binary { .. }) {
        property.raw_value = text;
    }

    tracing::trace!(line = line.number, property = %property.name, kind = property.value.kind_name(), "Parsed property");
    Ok(property)
}

fn media_value(
    text: &str,
    line: usize,
    property: &str,
    warnings: &mut Vec<ParseWarning>,
) -> VCardValue {
    match parse_data_uri(text) {
        Some(Ok(DataUri { media_type, data })) => VCardValue::Binary { data, media_type },
        Some(Err(err)) => {
            tracing::warn!(line, property, %err, "Bad base64 payload in data URI");
            warnings.push(ParseWarning::base64(line, property, &err));
            VCardValue::Binary {
                data: Vec::new(),
                media_type: None,
            }
        }
        None => VCardValue::Uri(text.trim().to_string()),
    }
}

/// Parses the content lines of one `BEGIN:VCARD … END:VCARD` block.
///
/// `block` holds the lines between the delimiters; `first_line` is the
/// physical line number of its first line, used in warnings. Lines that
/// cannot be parsed are skipped.
#[tracing::instrument(skip(block, decoder), fields(block_len = block.len()))]
pub fn parse_block(
    block: &[u8],
    first_line: usize,
    decoder: &FieldDecoder,
) -> (ContactRecord, Vec<ParseWarning>) {
    let mut warnings = Vec::new();
    let mut builder = RecordBuilder::new();

    for line in LogicalLines::starting_at(block, first_line) {
        match parse_line(&line, decoder, &mut warnings) {
            Ok(property) => builder.push(property),
            Err(warning) => {
                tracing::warn!(line = warning.line, %warning, "Skipping line");
                warnings.push(warning);
            }
        }
    }

    let record = builder.build();
    tracing::debug!(
        displayname = record.displayname(),
        business = record.is_business(),
        "Parsed vCard block"
    );

    (record, warnings)
}
