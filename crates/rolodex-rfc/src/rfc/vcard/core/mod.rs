//! Core vCard types.

mod assoc;
mod field;
mod parameter;
mod property;
mod record;
mod structured;
mod types;
mod value;

pub use assoc::AssocValue;
pub use field::{FieldKind, FieldTarget, NamePart, ValueGrammar};
pub use parameter::{VCardParameter, encodings};
pub use property::{VCardProperty, names};
pub(crate) use record::FieldParts;
pub use record::{
    ContactRecord, FieldInput, FieldValue, Media, TypedAddress, TypedText, VCardVersion,
};
pub use structured::{Address, Organization, StructuredName};
pub use types::{
    ADDRESS_TYPES, EMAIL_TYPES, NormalizedTypes, PHONE_TYPES, PREF, TypeVocabulary, URL_TYPES,
};
pub use value::VCardValue;
