//! vCard 3.0 export.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rolodex_core::config::ExportConfig;
use rolodex_core::constants::{
    CRLF, DEFAULT_MAX_LINE_OCTETS, EXPORT_VERSION_LINE, VCARD_BEGIN, VCARD_END,
};

use super::escape::{escape_param_value, escape_text};
use super::fold::fold_line;
use crate::rfc::vcard::core::{
    ContactRecord, FieldKind, FieldValue, PREF, VCardParameter, VCardValue,
};

/// Export settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Fold threshold in octets; `None` disables folding.
    pub max_line_length: Option<usize>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            max_line_length: Some(DEFAULT_MAX_LINE_OCTETS),
        }
    }
}

impl From<&ExportConfig> for ExportOptions {
    fn from(config: &ExportConfig) -> Self {
        Self {
            max_line_length: config.fold_at(),
        }
    }
}

/// Exports a record as vCard 3.0 text with default options.
#[must_use]
pub fn export(record: &ContactRecord) -> String {
    export_with(record, &ExportOptions::default())
}

/// Exports several records, concatenated, with default options.
#[must_use]
pub fn export_all(records: &[ContactRecord]) -> String {
    let options = ExportOptions::default();
    records
        .iter()
        .map(|record| export_with(record, &options))
        .collect()
}

/// Exports a record as vCard 3.0 text.
///
/// ## Summary
/// Writes `BEGIN:VCARD`, `VERSION:3.0`, one line per field value in
/// canonical field order, and `END:VCARD`, each terminated by CRLF. Type
/// sets are written as `TYPE=` lists in normalized form, binary values as
/// base64 with `ENCODING=B`. Values that cannot be represented (empty
/// binary payloads) are omitted.
#[tracing::instrument(skip(record, options), fields(displayname = record.displayname()))]
pub fn export_with(record: &ContactRecord, options: &ExportOptions) -> String {
    let mut output = String::new();

    push_line(&mut output, VCARD_BEGIN, options);
    push_line(&mut output, EXPORT_VERSION_LINE, options);

    let mut fields: Vec<_> = record.fields().collect();
    fields.sort_by_key(|(kind, _)| kind.priority());

    for (kind, values) in fields {
        // FN, N, ORG and friends allow one line; the preferred value wins
        let values = if kind.is_single_valued() {
            &values[..values.len().min(1)]
        } else {
            values
        };
        for value in values {
            match property_line(kind, value) {
                Some(line) => push_line(&mut output, &line, options),
                None => tracing::trace!(field = %kind, "Omitting empty binary value"),
            }
        }
    }

    push_line(&mut output, VCARD_END, options);

    tracing::debug!(len = output.len(), "Exported vCard");
    output
}

fn push_line(output: &mut String, line: &str, options: &ExportOptions) {
    match options.max_line_length {
        Some(max) => output.push_str(&fold_line(line, max)),
        None => output.push_str(line),
    }
    output.push_str(CRLF);
}

fn property_line(kind: &FieldKind, value: &FieldValue) -> Option<String> {
    let mut line = String::new();

    // Group prefix
    if let Some(ref group) = value.group {
        line.push_str(group);
        line.push('.');
    }

    line.push_str(kind.as_str());

    if let VCardValue::Binary { data, media_type } = &value.value {
        if data.is_empty() {
            return None;
        }
        line.push_str(";ENCODING=B");
        if let Some(token) = media_token(media_type.as_deref(), data) {
            line.push_str(";TYPE=");
            line.push_str(&token);
        }
    } else {
        let mut tokens: Vec<&str> = value.types.iter().map(String::as_str).collect();
        if value.is_preferred() {
            tokens.push(PREF);
        }
        if !tokens.is_empty() {
            line.push_str(";TYPE=");
            line.push_str(&tokens.join(","));
        }
    }

    for param in &value.params {
        serialize_parameter(param, &mut line);
    }

    line.push(':');
    line.push_str(&encode_value(&value.value));

    Some(line)
}

fn serialize_parameter(param: &VCardParameter, output: &mut String) {
    output.push(';');
    output.push_str(&param.name);
    output.push('=');

    for (i, value) in param.values.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }

        let (escaped, needs_quotes) = escape_param_value(value);

        if needs_quotes {
            output.push('"');
            output.push_str(&escaped);
            output.push('"');
        } else {
            output.push_str(&escaped);
        }
    }
}

/// Encodes a value as wire text.
///
/// Structured components are rejoined with `;` and list items with `,`,
/// each escaped. URIs are written verbatim and binary payloads as base64.
#[must_use]
pub fn encode_value(value: &VCardValue) -> String {
    match value {
        VCardValue::Text(s) => escape_text(s),
        VCardValue::TextList(items) => join_escaped(items, ","),
        VCardValue::Structured(parts) => join_escaped(parts, ";"),
        VCardValue::Uri(s) => s.clone(),
        VCardValue::Binary { data, .. } => STANDARD.encode(data),
    }
}

fn join_escaped(items: &[String], separator: &str) -> String {
    items
        .iter()
        .map(|item| escape_text(item))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Returns the vCard 3.0 TYPE token for a media payload.
///
/// `image/jpeg` and `JPEG` both give `JPEG`; without a declared type the
/// payload's magic bytes are checked.
fn media_token(media_type: Option<&str>, data: &[u8]) -> Option<String> {
    if let Some(declared) = media_type.map(str::trim).filter(|m| !m.is_empty()) {
        let subtype = declared.split_once('/').map_or(declared, |(_, sub)| sub);
        return Some(subtype.to_ascii_uppercase());
    }

    let sniffed = if data.starts_with(&[0xff, 0xd8, 0xff]) {
        "JPEG"
    } else if data.starts_with(b"\x89PNG") {
        "PNG"
    } else if data.starts_with(b"GIF8") {
        "GIF"
    } else {
        return None;
    };
    Some(sniffed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::parse::import;

    fn record() -> ContactRecord {
        let mut record = ContactRecord::new();
        record.set("N", "Doe;John", None).unwrap();
        record.set("FN", "John Doe", None).unwrap();
        record
    }

    #[test]
    fn envelope_and_order() {
        let mut record = record();
        record.set("NOTE", "hi", None).unwrap();
        record.set("X-CUSTOM", "x", None).unwrap();
        record.set("EMAIL", "j@example.com", None).unwrap();

        let output = export(&record);
        assert_eq!(
            output,
            "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:John Doe\r\nN:Doe;John\r\n\
             EMAIL:j@example.com\r\nNOTE:hi\r\nX-CUSTOM:x\r\nEND:VCARD\r\n"
        );
    }

    #[test]
    fn single_valued_fields_export_once() {
        let input = b"BEGIN:VCARD\r\nFN:A\r\nFN:B\r\nN:X;Y\r\nN:Z;W\r\n\
EMAIL:a@example.com\r\nEMAIL:b@example.com\r\nEND:VCARD\r\n";
        let record = import(input).into_records().remove(0);

        let output = export(&record);
        assert_eq!(output.matches("\r\nFN:").count(), 1);
        assert_eq!(output.matches("\r\nN:").count(), 1);
        assert!(output.contains("\r\nFN:A\r\nN:X;Y\r\n"), "{output}");
        assert_eq!(output.matches("\r\nEMAIL:").count(), 2);
    }

    #[test]
    fn phone_types_and_pref() {
        let mut record = record();
        record.set("phone", "+1", Some("WORK,VOICE,PREF")).unwrap();
        record.set("phone", "+2", Some("MOBILE")).unwrap();

        let output = export(&record);
        assert!(output.contains("\r\nTEL;TYPE=WORK,VOICE,PREF:+1\r\n"));
        assert!(output.contains("\r\nTEL;TYPE=CELL:+2\r\n"));
    }

    #[test]
    fn text_is_escaped() {
        let mut record = record();
        record.set("NOTE", "a;b,c\nd", None).unwrap();
        record.set("ORG", r"Smith\; Sons;R&D", None).unwrap();

        let output = export(&record);
        assert!(output.contains(r"NOTE:a\;b\,c\nd"));
        assert!(output.contains(r"ORG:Smith\; Sons;R&D"));
    }

    #[test]
    fn binary_photo() {
        let mut record = record();
        record
            .set("photo", vec![0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10], None)
            .unwrap();

        let output = export(&record);
        assert!(output.contains("\r\nPHOTO;ENCODING=B;TYPE=JPEG:/9j/4AAQ\r\n"));
    }

    #[test]
    fn media_type_tokens() {
        assert_eq!(media_token(Some("image/png"), &[]), Some("PNG".into()));
        assert_eq!(media_token(Some("gif"), &[]), Some("GIF".into()));
        assert_eq!(media_token(None, b"GIF89a"), Some("GIF".into()));
        assert_eq!(media_token(None, b"\x00\x01"), None);
    }

    #[test]
    fn uri_photo_gets_value_param() {
        let mut record = record();
        record
            .set("photo", "http://example.com/me.jpg", Some("JPEG"))
            .unwrap();

        let output = export(&record);
        assert!(output.contains("\r\nPHOTO;VALUE=URI;TYPE=JPEG:http://example.com/me.jpg\r\n"));
    }

    #[test]
    fn colon_in_value_is_not_escaped() {
        let mut record = record();
        record.set("X-ABLABEL", "a:b", None).unwrap();
        let output = export(&record);
        assert!(output.contains("\r\nX-ABLABEL:a:b\r\n"));
    }

    #[test]
    fn folding_is_configurable() {
        let mut record = record();
        record.set("NOTE", "x".repeat(100), None).unwrap();

        let folded = export(&record);
        assert!(folded.lines().all(|l| l.len() <= 75));
        assert!(folded.contains("\r\n x"));

        let unfolded = export_with(
            &record,
            &ExportOptions {
                max_line_length: None,
            },
        );
        assert!(unfolded.contains(&format!("NOTE:{}\r\n", "x".repeat(100))));
    }

    #[test]
    fn options_from_config() {
        let options = ExportOptions::from(&ExportConfig { max_line_length: 0 });
        assert_eq!(options.max_line_length, None);
        let options = ExportOptions::from(&ExportConfig { max_line_length: 60 });
        assert_eq!(options.max_line_length, Some(60));
    }

    #[test]
    fn export_all_concatenates() {
        let output = export_all(&[record(), record()]);
        assert_eq!(output.matches("BEGIN:VCARD\r\n").count(), 2);
        assert_eq!(output.matches("END:VCARD\r\n").count(), 2);
    }
}
