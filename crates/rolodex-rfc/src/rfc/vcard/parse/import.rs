//! Stream importer: splits a multi-vCard stream into blocks and parses each.

use std::ops::Range;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use rolodex_core::config::ImportConfig;
use rolodex_core::constants::{VCARD_BEGIN, VCARD_END};
use rolodex_core::error::CoreError;

use super::charset::{FieldDecoder, lookup, normalize_document};
use super::error::ParseWarning;
use super::parser::parse_block;
use crate::error::{RfcError, RfcResult};
use crate::rfc::vcard::core::ContactRecord;

/// Charset policy for an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Charset for fields without `CHARSET` in documents without a BOM.
    pub default_charset: &'static Encoding,
    /// Charset for fields whose bytes are invalid in the default charset.
    pub fallback_charset: &'static Encoding,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            default_charset: UTF_8,
            fallback_charset: WINDOWS_1252,
        }
    }
}

impl TryFrom<&ImportConfig> for ImportOptions {
    type Error = RfcError;

    fn try_from(config: &ImportConfig) -> RfcResult<Self> {
        let resolve = |label: &str| {
            lookup(label).ok_or_else(|| {
                RfcError::Core(CoreError::ConfigError(format!("unknown charset: {label}")))
            })
        };

        Ok(Self {
            default_charset: resolve(&config.default_charset)?,
            fallback_charset: resolve(&config.fallback_charset)?,
        })
    }
}

impl ImportOptions {
    fn decoder(&self) -> FieldDecoder {
        FieldDecoder::new(self.default_charset, self.fallback_charset)
    }
}

/// Records recovered from a stream, plus everything that went wrong.
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// One record per complete block, in source order.
    pub records: Vec<ContactRecord>,
    /// Non-fatal diagnostics, in source order.
    pub warnings: Vec<ParseWarning>,
}

impl ImportResult {
    /// Returns whether any diagnostic was produced.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Discards the warnings.
    #[must_use]
    pub fn into_records(self) -> Vec<ContactRecord> {
        self.records
    }
}

/// Imports every vCard in a byte stream with the default charset policy.
#[must_use]
pub fn import(input: impl AsRef<[u8]>) -> ImportResult {
    import_with(input.as_ref(), &ImportOptions::default())
}

/// Imports every vCard in a byte stream.
///
/// Content outside `BEGIN:VCARD … END:VCARD` is ignored. A block without
/// its `END:VCARD` is dropped with a warning and the following blocks are
/// still imported. Each block gets its own decoder, so concatenated cards
/// with different charsets decode independently.
#[tracing::instrument(skip(input, options), fields(input_len = input.len()))]
pub fn import_with(input: &[u8], options: &ImportOptions) -> ImportResult {
    tracing::debug!("Importing vCard stream");

    let (document, transcoded) = normalize_document(input);
    let mut warnings = Vec::new();
    let blocks = split_blocks(&document, &mut warnings);

    tracing::trace!(count = blocks.len(), "Split blocks");

    let mut records = Vec::with_capacity(blocks.len());
    for block in blocks {
        let decoder = if transcoded {
            options.decoder().forced_utf8()
        } else {
            options.decoder()
        };

        let (record, block_warnings) =
            parse_block(&document[block.range], block.first_line, &decoder);
        warnings.extend(block_warnings);
        records.push(record);
    }
    // Unterminated blocks are reported while splitting, ahead of field warnings
    warnings.sort_by_key(|w| w.line);

    tracing::debug!(
        records = records.len(),
        warnings = warnings.len(),
        "Imported vCard stream"
    );

    ImportResult { records, warnings }
}

/// Content of one block, excluding its delimiter lines.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BlockRange {
    range: Range<usize>,
    first_line: usize,
}

fn split_blocks(bytes: &[u8], warnings: &mut Vec<ParseWarning>) -> Vec<BlockRange> {
    let mut blocks = Vec::new();
    // (line of BEGIN, offset after BEGIN line)
    let mut open: Option<(usize, usize)> = None;
    let mut offset = 0;

    for (index, physical) in bytes.split_inclusive(|&b| b == b'\n').enumerate() {
        let line_no = index + 1;
        let start = offset;
        offset += physical.len();

        let marker = marker_text(physical);
        if marker.eq_ignore_ascii_case(VCARD_BEGIN.as_bytes()) {
            if let Some((begin_line, _)) = open.replace((line_no, offset)) {
                drop_unterminated(begin_line, warnings);
            }
        } else if marker.eq_ignore_ascii_case(VCARD_END.as_bytes()) {
            match open.take() {
                Some((begin_line, content_start)) => blocks.push(BlockRange {
                    range: content_start..start,
                    first_line: begin_line + 1,
                }),
                None => tracing::trace!(line = line_no, "END:VCARD outside a block"),
            }
        }
    }

    if let Some((begin_line, _)) = open {
        drop_unterminated(begin_line, warnings);
    }

    blocks
}

fn drop_unterminated(begin_line: usize, warnings: &mut Vec<ParseWarning>) {
    tracing::warn!(line = begin_line, "Dropping unterminated vCard block");
    warnings.push(ParseWarning::unterminated_block(begin_line));
}

/// Strips a UTF-8 BOM left over from concatenated files and trailing
/// whitespace. A folded continuation line is never a marker.
fn marker_text(line: &[u8]) -> &[u8] {
    let line = line.strip_prefix(b"\xef\xbb\xbf").unwrap_or(line);
    if matches!(line.first(), Some(b' ' | b'\t')) {
        return &[];
    }
    line.trim_ascii_end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::parse::WarningKind;

    #[test]
    fn splits_blocks_and_ignores_outside_content() {
        let input = b"junk\r\nbegin:vcard\r\nFN:A\r\nend:vcard\r\nmore junk\r\nBEGIN:VCARD\r\nFN:B\r\nEND:VCARD";
        let mut warnings = Vec::new();
        let blocks = split_blocks(input, &mut warnings);

        assert!(warnings.is_empty());
        assert_eq!(blocks.len(), 2);
        assert_eq!(&input[blocks[0].range.clone()], b"FN:A\r\n");
        assert_eq!(blocks[0].first_line, 3);
        assert_eq!(&input[blocks[1].range.clone()], b"FN:B\r\n");
        assert_eq!(blocks[1].first_line, 7);
    }

    #[test_log::test]
    fn unterminated_block_dropped() {
        let input = b"BEGIN:VCARD\nFN:Lost\nBEGIN:VCARD\nFN:Kept\nEND:VCARD\nBEGIN:VCARD\nFN:Tail\n";
        let result = import(input);

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].displayname(), "Kept");
        let kinds: Vec<_> = result.warnings.iter().map(|w| (w.kind, w.line)).collect();
        assert_eq!(
            kinds,
            vec![
                (WarningKind::UnterminatedBlock, 1),
                (WarningKind::UnterminatedBlock, 6)
            ]
        );
    }

    #[test]
    fn folded_marker_text_stays_in_value() {
        let input = b"BEGIN:VCARD\r\nNOTE:line\r\n END:VCARD\r\nEMAIL:a@example.com\r\nEND:VCARD\r\n";
        let result = import(input);

        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].notes(), Some("lineEND:VCARD"));
        assert_eq!(result.records[0].emails(), vec!["a@example.com"]);
    }

    #[test]
    fn markers_tolerate_trailing_whitespace() {
        let mut warnings = Vec::new();
        let blocks = split_blocks(b"BEGIN:VCARD \r\nFN:A\r\nEND:VCARD\t\r\n", &mut warnings);

        assert!(warnings.is_empty());
        assert_eq!(blocks.len(), 1);
        assert_eq!(marker_text(b"\tEND:VCARD"), b"");
    }

    #[test]
    fn options_from_config() {
        let config = ImportConfig {
            default_charset: "utf-8".into(),
            fallback_charset: "iso-8859-2".into(),
        };
        let options = ImportOptions::try_from(&config).unwrap();
        assert_eq!(options.default_charset, UTF_8);
        assert_eq!(options.fallback_charset, encoding_rs::ISO_8859_2);

        let config = ImportConfig {
            default_charset: "klingon".into(),
            fallback_charset: "utf-8".into(),
        };
        assert!(matches!(
            ImportOptions::try_from(&config),
            Err(RfcError::Core(CoreError::ConfigError(_)))
        ));
    }

    #[test]
    fn fallback_charset_applies() {
        let options = ImportOptions {
            default_charset: UTF_8,
            fallback_charset: encoding_rs::ISO_8859_2,
        };
        let result = import_with(b"BEGIN:VCARD\r\nFN:\xa3\xf3d\xbc\r\nEND:VCARD\r\n", &options);
        assert_eq!(result.records[0].displayname(), "Łódź");
        assert_eq!(result.warnings[0].kind, WarningKind::InvalidCharacters);
    }
}
