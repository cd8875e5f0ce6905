//! vCard 3.0 export.
//!
//! ## Usage
//!
//! ```rust
//! use rolodex_rfc::rfc::vcard::build::export;
//! use rolodex_rfc::rfc::vcard::core::ContactRecord;
//!
//! let mut card = ContactRecord::new();
//! card.set("displayname", "John Doe", None).unwrap();
//! card.set("phone", "+987654321", Some("MOBILE")).unwrap();
//!
//! let output = export(&card);
//! assert!(output.contains("TEL;TYPE=CELL:+987654321\r\n"));
//! ```
//!
//! ## Features
//!
//! - Fixed `VERSION:3.0` output with CRLF terminators
//! - Line folding at a configurable octet limit (UTF-8 safe)
//! - Text escaping per RFC 2426
//! - RFC 6868 caret encoding for parameters
//! - Canonical field ordering

mod escape;
mod fold;
mod serializer;

pub use escape::{escape_param_value, escape_text};
pub use fold::fold_line;
pub use serializer::{ExportOptions, encode_value, export, export_all, export_with};
