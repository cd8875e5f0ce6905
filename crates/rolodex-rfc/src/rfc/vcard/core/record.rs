//! Contact record: the durable output of import and the input of export.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::field::{FieldKind, FieldTarget, NamePart, ValueGrammar};
use super::parameter::VCardParameter;
use super::structured::{Address, Organization, StructuredName};
use super::types::PREF;
use super::value::VCardValue;
use crate::error::{RfcError, RfcResult};
use crate::rfc::vcard::build::encode_value;
use crate::rfc::vcard::parse::{parse_media_text, parse_structured, parse_text_list};

/// vCard version declared by the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum VCardVersion {
    /// vCard 2.1 (versit).
    V21,
    /// vCard 3.0 (RFC 2426).
    #[default]
    V3,
    /// vCard 4.0 (RFC 6350).
    V4,
}

impl VCardVersion {
    /// Parses from version string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "2.1" => Some(Self::V21),
            "3.0" => Some(Self::V3),
            "4.0" => Some(Self::V4),
            _ => None,
        }
    }

    /// Returns the version string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V21 => "2.1",
            Self::V3 => "3.0",
            Self::V4 => "4.0",
        }
    }
}

/// One value of a field, with its normalized metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValue {
    /// Property group (e.g., "item1").
    pub group: Option<String>,
    /// Normalized type set. Empty for media fields, whose TYPE is a media type.
    pub types: Vec<String>,
    /// Preference rank; lower is preferred, `None` when not preferred.
    pub pref: Option<u8>,
    /// Parameters the engine does not interpret, in source order.
    pub params: Vec<VCardParameter>,
    /// Decoded value.
    pub value: VCardValue,
    /// Escaped wire text of the value. Empty for binary values.
    #[serde(skip)]
    pub raw_value: String,
}

/// Pieces of a field value before normalization.
#[derive(Debug, Default)]
pub(crate) struct FieldParts {
    pub group: Option<String>,
    pub type_tokens: Vec<String>,
    pub pref_param: Option<String>,
    pub media_type: Option<String>,
    pub params: Vec<VCardParameter>,
    pub value: Option<VCardValue>,
    pub raw_value: String,
}

impl FieldValue {
    /// Returns whether this value is marked preferred.
    #[must_use]
    pub fn is_preferred(&self) -> bool {
        self.pref.is_some()
    }

    /// Returns whether the normalized type set contains `tag`.
    #[must_use]
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Normalizes raw pieces into a field value.
    ///
    /// Shared by import and the field-set interface so both apply the same
    /// synonym table. Returns the value and any TYPE tokens that were
    /// dropped because they are outside the field's vocabulary.
    pub(crate) fn assemble(kind: &FieldKind, parts: FieldParts) -> (Self, Vec<String>) {
        let FieldParts {
            group,
            type_tokens,
            pref_param,
            media_type,
            params,
            value,
            raw_value,
        } = parts;

        let mut params: Vec<VCardParameter> =
            params.into_iter().filter(|p| !p.is_structural()).collect();
        let mut value = value.unwrap_or_else(|| VCardValue::Text(String::new()));
        let mut rejected = Vec::new();
        let mut pref = false;
        let mut types = Vec::new();

        if let Some(vocab) = kind.type_vocabulary() {
            let normalized = vocab.normalize(type_tokens.iter().map(String::as_str));
            types = normalized.types;
            pref = normalized.pref;
            rejected = normalized.rejected;
        } else {
            let mut tags = Vec::new();
            for token in &type_tokens {
                if token.eq_ignore_ascii_case(PREF) {
                    pref = true;
                } else if !token.is_empty() {
                    tags.push(token.clone());
                }
            }

            if kind.grammar() == ValueGrammar::Media {
                let declared = media_type.or_else(|| tags.first().cloned());
                match &mut value {
                    VCardValue::Binary { media_type, .. } => {
                        params.retain(|p| !p.is("VALUE"));
                        if media_type.is_none() {
                            *media_type = declared;
                        }
                    }
                    _ => {
                        if !params.iter().any(|p| p.is("VALUE")) {
                            params.push(VCardParameter::value_type("URI"));
                        }
                        if let Some(declared) = declared {
                            params.push(VCardParameter::type_param(declared));
                        }
                    }
                }
            } else {
                for tag in tags {
                    let upper = tag.to_ascii_uppercase();
                    if !types.contains(&upper) {
                        types.push(upper);
                    }
                }
            }
        }

        let param_rank = pref_param.map(|v| v.trim().parse::<u8>().unwrap_or(1));
        let rank = match (pref.then_some(1), param_rank) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };

        (
            Self {
                group,
                types,
                pref: rank,
                params,
                value,
                raw_value,
            },
            rejected,
        )
    }
}

/// A phone number or e-mail address with its type set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedText<'a> {
    pub value: &'a str,
    pub types: &'a [String],
    pub preferred: bool,
}

/// A postal address with its type set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedAddress<'a> {
    pub address: Address,
    pub types: &'a [String],
    pub preferred: bool,
}

/// An inline binary payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Media<'a> {
    pub data: &'a [u8],
    pub media_type: Option<&'a str>,
}

/// Value accepted by [`ContactRecord::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(String),
    Binary(Vec<u8>),
}

impl From<&str> for FieldInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<u8>> for FieldInput {
    fn from(data: Vec<u8>) -> Self {
        Self::Binary(data)
    }
}

/// A structured contact built from one `BEGIN:VCARD … END:VCARD` block.
///
/// Values of a field are kept in preference order. The `business` and
/// `displayname` attributes are recomputed from the complete field set
/// whenever it changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactRecord {
    version: VCardVersion,
    fields: BTreeMap<FieldKind, Vec<FieldValue>>,
    business: bool,
    displayname: String,
}

impl ContactRecord {
    /// Creates an empty vCard 3.0 record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a record from fully collected fields.
    pub(crate) fn from_fields(
        version: VCardVersion,
        mut fields: BTreeMap<FieldKind, Vec<FieldValue>>,
    ) -> Self {
        for values in fields.values_mut() {
            sort_by_preference(values);
        }

        let mut record = Self {
            version,
            fields,
            business: false,
            displayname: String::new(),
        };
        record.derive();
        record
    }

    /// Returns the version declared by the source.
    #[must_use]
    pub const fn version(&self) -> VCardVersion {
        self.version
    }

    /// Returns whether the record describes a company rather than a person.
    #[must_use]
    pub const fn is_business(&self) -> bool {
        self.business
    }

    /// Returns the display name (FN, else the structured name, else ORG).
    #[must_use]
    pub fn displayname(&self) -> &str {
        &self.displayname
    }

    /// Returns whether the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over fields in canonical kind order.
    pub fn fields(&self) -> impl Iterator<Item = (&FieldKind, &[FieldValue])> {
        self.fields.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Returns all values of a field in preference order.
    #[must_use]
    pub fn get(&self, kind: &FieldKind) -> &[FieldValue] {
        self.fields.get(kind).map_or(&[], Vec::as_slice)
    }

    /// Returns all values of a field by property name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> &[FieldValue] {
        self.get(&FieldKind::from_name(name))
    }

    /// Returns the preferred value of a field.
    #[must_use]
    pub fn first(&self, kind: &FieldKind) -> Option<&FieldValue> {
        self.get(kind).first()
    }

    /// Returns the FN (formatted name) value.
    #[must_use]
    pub fn formatted_name(&self) -> Option<&str> {
        self.first(&FieldKind::FormattedName)?.value.as_text()
    }

    /// Returns the N (structured name) value.
    #[must_use]
    pub fn structured_name(&self) -> Option<StructuredName> {
        self.name_components().map(StructuredName::from_components)
    }

    /// Returns one component of N.
    #[must_use]
    pub fn name_part(&self, part: NamePart) -> Option<&str> {
        self.name_components()?
            .get(part as usize)
            .map(String::as_str)
    }

    #[must_use]
    pub fn surname(&self) -> Option<&str> {
        self.name_part(NamePart::Surname)
    }

    #[must_use]
    pub fn firstname(&self) -> Option<&str> {
        self.name_part(NamePart::Firstname)
    }

    #[must_use]
    pub fn middlename(&self) -> Option<&str> {
        self.name_part(NamePart::Middlename)
    }

    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.name_part(NamePart::Prefix)
    }

    #[must_use]
    pub fn suffix(&self) -> Option<&str> {
        self.name_part(NamePart::Suffix)
    }

    /// Returns the ORG value as a structured organization.
    #[must_use]
    pub fn org(&self) -> Option<Organization> {
        self.first(&FieldKind::Organization)?
            .value
            .as_components()
            .map(Organization::from_components)
    }

    /// Returns the organization name.
    #[must_use]
    pub fn organization(&self) -> Option<&str> {
        self.org_component(0)
    }

    /// Returns the first organizational unit.
    #[must_use]
    pub fn department(&self) -> Option<&str> {
        self.org_component(1)
    }

    /// Returns all EMAIL values in preference order.
    #[must_use]
    pub fn emails(&self) -> Vec<&str> {
        self.typed_texts(&FieldKind::Email)
            .into_iter()
            .map(|t| t.value)
            .collect()
    }

    /// Returns all EMAIL values with their types.
    #[must_use]
    pub fn typed_emails(&self) -> Vec<TypedText<'_>> {
        self.typed_texts(&FieldKind::Email)
    }

    /// Returns all TEL values with their types, in preference order.
    #[must_use]
    pub fn phones(&self) -> Vec<TypedText<'_>> {
        self.typed_texts(&FieldKind::Phone)
    }

    /// Returns all ADR values with their types, in preference order.
    #[must_use]
    pub fn addresses(&self) -> Vec<TypedAddress<'_>> {
        self.get(&FieldKind::Address)
            .iter()
            .filter_map(|v| {
                Some(TypedAddress {
                    address: Address::from_components(v.value.as_components()?),
                    types: &v.types,
                    preferred: v.is_preferred(),
                })
            })
            .collect()
    }

    /// Returns the first nickname.
    #[must_use]
    pub fn nickname(&self) -> Option<&str> {
        self.first(&FieldKind::Nickname)?
            .value
            .as_list()?
            .first()
            .map(String::as_str)
    }

    /// Returns the NOTE value.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.first(&FieldKind::Note)?.value.as_text()
    }

    /// Returns the UID value.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.first(&FieldKind::Uid)?.value.as_text()
    }

    /// Returns the birthday as a calendar date.
    ///
    /// Accepts `YYYY-MM-DD`, `YYYYMMDD` and date-time forms; truncated
    /// vCard 4.0 dates without a year yield `None`.
    #[must_use]
    pub fn birthday(&self) -> Option<NaiveDate> {
        let text = self.first(&FieldKind::Birthday)?.value.as_text()?;
        parse_calendar_date(text)
    }

    /// Returns the inline PHOTO payload.
    #[must_use]
    pub fn photo(&self) -> Option<Media<'_>> {
        self.media(&FieldKind::Photo)
    }

    /// Returns the inline LOGO payload.
    #[must_use]
    pub fn logo(&self) -> Option<Media<'_>> {
        self.media(&FieldKind::Logo)
    }

    /// Returns the inline SOUND payload.
    #[must_use]
    pub fn sound(&self) -> Option<Media<'_>> {
        self.media(&FieldKind::Sound)
    }

    /// Returns the escaped wire text of every non-binary value, keyed by
    /// property name.
    #[must_use]
    pub fn raw_fields(&self) -> BTreeMap<&str, Vec<&str>> {
        self.fields
            .iter()
            .map(|(kind, values)| {
                let raws = values
                    .iter()
                    .filter(|v| !matches!(v.value, VCardValue::Binary { .. }))
                    .map(|v| v.raw_value.as_str())
                    .collect::<Vec<_>>();
                (kind.as_str(), raws)
            })
            .filter(|(_, raws)| !raws.is_empty())
            .collect()
    }

    /// Sets a field from caller-supplied data.
    ///
    /// `field` is a property name (`TEL`, `N`, `X-FOO`) or a friendly name
    /// (`phone`, `surname`, `organization`, …). `type_tag` may list several
    /// comma-separated tokens; it goes through the same synonym table as
    /// import, so `MOBILE` is stored as `CELL`. For media fields it names
    /// the media type.
    ///
    /// Single-valued fields are replaced, multi-valued fields are appended.
    /// Values for structured and list fields use the wire separators (`;`
    /// and `,`, escaped with a backslash when literal).
    ///
    /// ## Errors
    /// Returns an error for unknown field names, type tags outside the
    /// field's vocabulary, and binary data for a text field.
    pub fn set(
        &mut self,
        field: &str,
        value: impl Into<FieldInput>,
        type_tag: Option<&str>,
    ) -> RfcResult<()> {
        let target =
            FieldTarget::resolve(field).ok_or_else(|| RfcError::UnknownField(field.to_string()))?;
        let input = value.into();

        match target {
            FieldTarget::NamePart(part) => {
                let text = expect_text(&FieldKind::Name, input)?;
                reject_tags(&FieldKind::Name, type_tag)?;
                self.set_component(FieldKind::Name, part as usize, text);
            }
            FieldTarget::Department => {
                let text = expect_text(&FieldKind::Organization, input)?;
                reject_tags(&FieldKind::Organization, type_tag)?;
                self.set_component(FieldKind::Organization, 1, text);
            }
            FieldTarget::Field(kind) => self.set_field(kind, input, type_tag)?,
        }

        self.derive();
        tracing::trace!(field, displayname = %self.displayname, "Field set");
        Ok(())
    }

    fn set_field(
        &mut self,
        kind: FieldKind,
        input: FieldInput,
        type_tag: Option<&str>,
    ) -> RfcResult<()> {
        let tokens: Vec<String> = type_tag
            .map(|t| t.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default();

        match kind.type_vocabulary() {
            Some(vocab) => {
                let normalized = vocab.normalize(tokens.iter().map(String::as_str));
                if let Some(tag) = normalized.rejected.into_iter().next() {
                    return Err(RfcError::InvalidTypeTag {
                        field: kind.to_string(),
                        tag,
                    });
                }
            }
            None if kind.grammar() != ValueGrammar::Media => {
                reject_tags(&kind, type_tag)?;
            }
            None => {}
        }

        let value = match (kind.grammar(), input) {
            (ValueGrammar::Media, FieldInput::Binary(data)) => VCardValue::Binary {
                data,
                media_type: None,
            },
            (ValueGrammar::Media, FieldInput::Text(text)) => parse_media_text(&text),
            (_, FieldInput::Binary(_)) => {
                return Err(RfcError::ValueKindMismatch {
                    field: kind.to_string(),
                    found: "binary",
                });
            }
            (ValueGrammar::Text, FieldInput::Text(text)) => VCardValue::Text(text),
            (ValueGrammar::TextList, FieldInput::Text(text)) => {
                VCardValue::TextList(parse_text_list(&text))
            }
            (ValueGrammar::Structured, FieldInput::Text(text)) => {
                VCardValue::Structured(parse_structured(&text))
            }
        };

        let raw_value = wire_text(&value);
        let (field_value, _) = FieldValue::assemble(
            &kind,
            FieldParts {
                type_tokens: tokens,
                value: Some(value),
                raw_value,
                ..FieldParts::default()
            },
        );

        let values = self.fields.entry(kind.clone()).or_default();
        if kind.is_single_valued() {
            values.clear();
        }
        values.push(field_value);
        sort_by_preference(values);
        Ok(())
    }

    fn set_component(&mut self, kind: FieldKind, index: usize, text: String) {
        let values = self.fields.entry(kind).or_default();
        if values.is_empty() {
            values.push(FieldValue {
                group: None,
                types: Vec::new(),
                pref: None,
                params: Vec::new(),
                value: VCardValue::Structured(Vec::new()),
                raw_value: String::new(),
            });
        }

        let target = &mut values[0];
        let mut parts = match &target.value {
            VCardValue::Structured(parts) => parts.clone(),
            VCardValue::Text(text) => vec![text.clone()],
            _ => Vec::new(),
        };
        if parts.len() <= index {
            parts.resize(index + 1, String::new());
        }
        parts[index] = text;

        target.value = VCardValue::Structured(parts);
        target.raw_value = wire_text(&target.value);
    }

    fn derive(&mut self) {
        let person = self.structured_name().is_some_and(|n| !n.is_empty());
        let company = self.organization().is_some_and(|o| !o.trim().is_empty());
        self.business = company && !person;

        self.displayname = self
            .formatted_name()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .or_else(|| {
                self.structured_name()
                    .map(|n| n.display_name())
                    .filter(|s| !s.is_empty())
            })
            .or_else(|| {
                self.organization()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
            })
            .unwrap_or_default();
    }

    fn name_components(&self) -> Option<&[String]> {
        self.first(&FieldKind::Name)?.value.as_components()
    }

    fn org_component(&self, index: usize) -> Option<&str> {
        self.first(&FieldKind::Organization)?
            .value
            .as_components()?
            .get(index)
            .map(String::as_str)
    }

    fn typed_texts(&self, kind: &FieldKind) -> Vec<TypedText<'_>> {
        self.get(kind)
            .iter()
            .filter_map(|v| {
                Some(TypedText {
                    value: v.value.as_text()?,
                    types: &v.types,
                    preferred: v.is_preferred(),
                })
            })
            .collect()
    }

    fn media(&self, kind: &FieldKind) -> Option<Media<'_>> {
        self.get(kind).iter().find_map(|v| {
            let (data, media_type) = v.value.as_binary()?;
            Some(Media { data, media_type })
        })
    }
}

/// Escaped wire text kept alongside a value; binary payloads keep none.
fn wire_text(value: &VCardValue) -> String {
    match value {
        VCardValue::Binary { .. } => String::new(),
        _ => encode_value(value),
    }
}

/// Stable sort: preferred values first by rank, the rest in source order.
fn sort_by_preference(values: &mut [FieldValue]) {
    values.sort_by_key(|v| v.pref.map_or(u16::MAX, u16::from));
}

fn expect_text(kind: &FieldKind, input: FieldInput) -> RfcResult<String> {
    match input {
        FieldInput::Text(text) => Ok(text),
        FieldInput::Binary(_) => Err(RfcError::ValueKindMismatch {
            field: kind.to_string(),
            found: "binary",
        }),
    }
}

fn reject_tags(kind: &FieldKind, type_tag: Option<&str>) -> RfcResult<()> {
    let Some(tag) = type_tag
        .into_iter()
        .flat_map(|t| t.split(','))
        .map(str::trim)
        .find(|t| !t.is_empty() && !t.eq_ignore_ascii_case(PREF))
    else {
        return Ok(());
    };

    Err(RfcError::InvalidTypeTag {
        field: kind.to_string(),
        tag: tag.to_string(),
    })
}

pub(crate) fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let date = text.trim().split('T').next()?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y%m%d"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_phone_with_legacy_type() {
        let mut record = ContactRecord::new();
        record.set("phone", "+987654321", Some("MOBILE")).unwrap();

        let phones = record.phones();
        assert_eq!(phones.len(), 1);
        assert_eq!(phones[0].value, "+987654321");
        assert_eq!(phones[0].types, ["CELL".to_string()]);
    }

    #[test]
    fn set_rejects_unknown_type() {
        let mut record = ContactRecord::new();
        let err = record.set("TEL", "+1", Some("SATELLITE")).unwrap_err();
        assert!(matches!(err, RfcError::InvalidTypeTag { ref tag, .. } if tag == "SATELLITE"));
        assert!(record.phones().is_empty());
    }

    #[test]
    fn set_rejects_unknown_field() {
        let mut record = ContactRecord::new();
        assert!(matches!(
            record.set("shoe-size", "44", None),
            Err(RfcError::UnknownField(_))
        ));
    }

    #[test]
    fn set_rejects_binary_for_text_field() {
        let mut record = ContactRecord::new();
        assert!(matches!(
            record.set("email", vec![1_u8, 2, 3], None),
            Err(RfcError::ValueKindMismatch { .. })
        ));
    }

    #[test]
    fn single_valued_fields_replace() {
        let mut record = ContactRecord::new();
        record.set("FN", "First", None).unwrap();
        record.set("displayname", "Second", None).unwrap();

        assert_eq!(record.get(&FieldKind::FormattedName).len(), 1);
        assert_eq!(record.displayname(), "Second");
    }

    #[test]
    fn multi_valued_fields_append_in_preference_order() {
        let mut record = ContactRecord::new();
        record.set("email", "a@example.com", None).unwrap();
        record.set("email", "b@example.com", Some("pref")).unwrap();
        record.set("email", "c@example.com", Some("WORK")).unwrap();

        assert_eq!(
            record.emails(),
            vec!["b@example.com", "a@example.com", "c@example.com"]
        );
    }

    #[test]
    fn name_parts_edit_structured_name() {
        let mut record = ContactRecord::new();
        record.set("firstname", "John", None).unwrap();
        record.set("surname", "Doe", None).unwrap();

        assert_eq!(record.surname(), Some("Doe"));
        assert_eq!(record.firstname(), Some("John"));
        assert_eq!(record.middlename(), None);
        assert_eq!(record.displayname(), "John Doe");
        assert_eq!(record.raw_fields()["N"], vec!["Doe;John"]);
    }

    #[test]
    fn business_requires_org_without_name() {
        let mut record = ContactRecord::new();
        record.set("organization", "Acme;Sales", None).unwrap();
        assert!(record.is_business());
        assert_eq!(record.displayname(), "Acme");
        assert_eq!(record.department(), Some("Sales"));

        record.set("surname", "Doe", None).unwrap();
        assert!(!record.is_business());
        assert_eq!(record.displayname(), "Doe");
    }

    #[test]
    fn department_creates_org_units() {
        let mut record = ContactRecord::new();
        record.set("department", "Research", None).unwrap();
        assert_eq!(record.organization(), Some(""));
        assert_eq!(record.department(), Some("Research"));
        assert!(!record.is_business());
    }

    #[test]
    fn photo_type_tag_is_media_type() {
        let mut record = ContactRecord::new();
        record.set("photo", vec![0xff, 0xd8, 0xff], Some("JPEG")).unwrap();

        let photo = record.photo().unwrap();
        assert_eq!(photo.data, &[0xff, 0xd8, 0xff]);
        assert_eq!(photo.media_type, Some("JPEG"));
        assert!(record.raw_fields().get("PHOTO").is_none());
    }

    #[test]
    fn logo_and_sound_are_separate_media() {
        let mut record = ContactRecord::new();
        record.set("LOGO", b"\x89PNG".to_vec(), Some("image/png")).unwrap();
        record.set("SOUND", "http://example.com/hello.ogg", None).unwrap();

        assert_eq!(record.logo().and_then(|m| m.media_type), Some("image/png"));
        assert_eq!(record.sound(), None, "URI sounds are not inline");
        assert_eq!(
            record.first(&FieldKind::Sound).and_then(|v| v.value.as_uri()),
            Some("http://example.com/hello.ogg")
        );
        assert_eq!(record.photo(), None);
    }

    #[test]
    fn type_lookup_is_case_insensitive() {
        let mut record = ContactRecord::new();
        record.set("TEL", "+1", Some("home,fax")).unwrap();

        let value = &record.get(&FieldKind::Phone)[0];
        assert!(value.has_type("FAX"));
        assert!(value.has_type("home"));
        assert!(!value.has_type("CELL"));
        assert!(!value.is_preferred());
    }

    #[test]
    fn birthday_formats() {
        assert_eq!(
            parse_calendar_date("1980-02-29"),
            NaiveDate::from_ymd_opt(1980, 2, 29)
        );
        assert_eq!(
            parse_calendar_date("19800229T000000Z"),
            NaiveDate::from_ymd_opt(1980, 2, 29)
        );
        assert_eq!(parse_calendar_date("--0229"), None);
    }

    #[test]
    fn assemble_combines_pref_forms() {
        let (value, rejected) = FieldValue::assemble(
            &FieldKind::Email,
            FieldParts {
                type_tokens: vec!["internet".into(), "bogus".into()],
                pref_param: Some("3".into()),
                value: Some(VCardValue::Text("a@example.com".into())),
                ..FieldParts::default()
            },
        );
        assert_eq!(value.types, vec!["INTERNET"]);
        assert_eq!(value.pref, Some(3));
        assert_eq!(rejected, vec!["bogus"]);
    }
}
