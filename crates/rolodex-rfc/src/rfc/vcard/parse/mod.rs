//! vCard import.
//!
//! Bytes flow through the stream importer, which splits them into blocks;
//! each block is unfolded into logical lines, each line is parsed into a
//! property with its value transfer- and charset-decoded, and the record
//! builder folds the properties into a [`ContactRecord`].
//!
//! ## Usage
//!
//! ```rust
//! use rolodex_rfc::rfc::vcard::parse::import;
//!
//! let input = b"\
//! BEGIN:VCARD\r\n\
//! VERSION:3.0\r\n\
//! N:Doe;John\r\n\
//! TEL;TYPE=MOBILE:+1-555-0100\r\n\
//! END:VCARD\r\n";
//!
//! let result = import(input);
//! let card = &result.records[0];
//! assert_eq!(card.displayname(), "John Doe");
//! assert_eq!(card.phones()[0].types, ["CELL"]);
//! ```
//!
//! ## Features
//!
//! - vCard 2.1, 3.0 and 4.0 input
//! - Per-field `CHARSET` decoding, UTF-16 by byte-order mark
//! - Base64, quoted-printable and `data:` URI payloads
//! - Bare vCard 2.1 parameter tokens
//! - Separator-aware splitting of structured values
//! - Warnings instead of failures
//!
//! [`ContactRecord`]: crate::rfc::vcard::core::ContactRecord

mod builder;
mod charset;
mod encoding;
mod error;
mod import;
mod lexer;
mod parser;
mod values;

#[cfg(test)]
mod error_tests;

pub use builder::RecordBuilder;
pub use charset::{FieldDecoder, decode, lookup, normalize_document, sniff_bom};
pub use encoding::{
    DataUri, decode_base64, decode_quoted_printable, parse_data_uri, parse_media_text,
};
pub use error::{ParseWarning, WarningKind};
pub use import::{ImportOptions, ImportResult, import, import_with};
pub use lexer::{ContentLine, LogicalLine, LogicalLines, parse_content_line};
pub use parser::{parse_block, parse_line};
pub use values::{
    has_nonstandard_escape, parse_structured, parse_text_list, split_unescaped, unescape_text,
};
