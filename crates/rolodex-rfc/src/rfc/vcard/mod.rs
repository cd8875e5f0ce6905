//! vCard import and export.
//!
//! Reads vCard 2.1, 3.0 and 4.0 streams as produced by address books and
//! mail clients, including legacy charsets and transfer encodings, into
//! [`ContactRecord`] values. Records are written back as vCard 3.0.
//!
//! ## Usage
//!
//! ### Importing
//!
//! ```rust
//! use rolodex_rfc::rfc::vcard::import;
//!
//! let input = b"\
//! BEGIN:VCARD\r\n\
//! VERSION:3.0\r\n\
//! N:;;;;\r\n\
//! ORG:Example Inc.\r\n\
//! END:VCARD\r\n";
//!
//! let result = import(input);
//! assert!(result.warnings.is_empty());
//! assert!(result.records[0].is_business());
//! assert_eq!(result.records[0].displayname(), "Example Inc.");
//! ```
//!
//! ### Exporting
//!
//! ```rust
//! use rolodex_rfc::rfc::vcard::{ContactRecord, export};
//!
//! let mut card = ContactRecord::new();
//! card.set("surname", "Doe", None).unwrap();
//! card.set("firstname", "Jane", None).unwrap();
//! card.set("email", "jane@example.com", Some("work")).unwrap();
//!
//! let output = export(&card);
//! assert!(output.starts_with("BEGIN:VCARD\r\nVERSION:3.0\r\n"));
//! assert!(output.contains("EMAIL;TYPE=WORK:jane@example.com\r\n"));
//! ```
//!
//! ## Submodules
//!
//! - [`core`] - Record model, field vocabularies and value types
//! - [`parse`] - Stream import and its warnings
//! - [`build`] - vCard 3.0 export

pub mod build;
pub mod core;
pub mod parse;


// Re-export commonly used types
pub use build::{ExportOptions, export, export_all, export_with};
pub use core::{
    Address, AssocValue, ContactRecord, FieldInput, FieldKind, FieldValue, Media, Organization,
    StructuredName, TypedAddress, TypedText, VCardParameter, VCardProperty, VCardValue,
    VCardVersion,
};
pub use parse::{ImportOptions, ImportResult, ParseWarning, WarningKind, import, import_with};
