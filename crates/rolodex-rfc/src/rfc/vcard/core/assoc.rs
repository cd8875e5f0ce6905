//! Flat key/value view of a record.

use std::collections::BTreeMap;

use serde::Serialize;

use super::field::FieldKind;
use super::record::{ContactRecord, FieldValue, parse_calendar_date};
use super::structured::Address;
use super::value::VCardValue;

/// A value in the flat view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AssocValue {
    Text(String),
    Binary(Vec<u8>),
    Address(Address),
}

impl AssocValue {
    /// Returns the value as text if applicable.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the binary payload if applicable.
    #[must_use]
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(data) => Some(data),
            _ => None,
        }
    }
}

/// Tags that qualify a value without saying where it belongs.
const GENERIC_TAGS: &[&str] = &["INTERNET", "VOICE", "MSG", "POSTAL", "PARCEL", "DOM", "INTL"];

impl ContactRecord {
    /// Flattens the record into friendly keys.
    ///
    /// Name parts, organization, department, notes and the like map to
    /// single keys. Multi-valued typed fields use `field:type` keys
    /// (`email:work`, `phone:cell`) with values in preference order. Fields
    /// without a friendly name appear under their lowercase property name.
    #[must_use]
    pub fn to_assoc(&self) -> BTreeMap<String, Vec<AssocValue>> {
        let mut out: BTreeMap<String, Vec<AssocValue>> = BTreeMap::new();
        let mut push = |key: String, value: AssocValue| out.entry(key).or_default().push(value);

        if !self.displayname().is_empty() {
            push("displayname".into(), AssocValue::Text(self.displayname().into()));
        }

        for (kind, values) in self.fields() {
            match kind {
                FieldKind::FormattedName => {}
                FieldKind::Name => {
                    let Some(name) = self.structured_name() else {
                        continue;
                    };
                    let parts = [
                        ("surname", name.surname),
                        ("firstname", name.firstname),
                        ("middlename", name.middlename),
                        ("prefix", name.prefix),
                        ("suffix", name.suffix),
                    ];
                    for (key, part) in parts {
                        if let Some(part) = part {
                            push(key.into(), AssocValue::Text(part));
                        }
                    }
                }
                FieldKind::Organization => {
                    if let Some(org) = self.org() {
                        push("organization".into(), AssocValue::Text(org.name));
                        if let Some(unit) = org.units.into_iter().next() {
                            push("department".into(), AssocValue::Text(unit));
                        }
                    }
                }
                FieldKind::Email | FieldKind::Phone | FieldKind::Url => {
                    let base = match kind {
                        FieldKind::Email => "email",
                        FieldKind::Phone => "phone",
                        _ => "website",
                    };
                    for value in values {
                        if let Some(text) = value.value.as_text() {
                            push(typed_key(base, value), AssocValue::Text(text.into()));
                        }
                    }
                }
                FieldKind::Address => {
                    for value in values {
                        if let Some(parts) = value.value.as_components() {
                            push(
                                typed_key("address", value),
                                AssocValue::Address(Address::from_components(parts)),
                            );
                        }
                    }
                }
                FieldKind::Birthday => {
                    for value in values {
                        if let Some(text) = value.value.as_text() {
                            let date = parse_calendar_date(text)
                                .map_or_else(|| text.to_string(), |d| d.to_string());
                            push("birthday".into(), AssocValue::Text(date));
                        }
                    }
                }
                _ => {
                    let key = match kind {
                        FieldKind::Nickname => "nickname".to_string(),
                        FieldKind::Title => "jobtitle".to_string(),
                        FieldKind::Note => "notes".to_string(),
                        FieldKind::Categories => "groups".to_string(),
                        other => other.as_str().to_ascii_lowercase(),
                    };
                    for value in values {
                        flatten_value(&value.value, |v| push(key.clone(), v));
                    }
                }
            }
        }

        out
    }
}

fn typed_key(base: &str, value: &FieldValue) -> String {
    let tag = value
        .types
        .iter()
        .find(|t| !GENERIC_TAGS.contains(&t.as_str()))
        .map_or_else(|| "other".to_string(), |t| t.to_ascii_lowercase());
    format!("{base}:{tag}")
}

fn flatten_value(value: &VCardValue, mut push: impl FnMut(AssocValue)) {
    match value {
        VCardValue::Text(s) | VCardValue::Uri(s) => push(AssocValue::Text(s.clone())),
        VCardValue::TextList(items) => {
            for item in items {
                push(AssocValue::Text(item.clone()));
            }
        }
        VCardValue::Structured(parts) => push(AssocValue::Text(parts.join(";"))),
        VCardValue::Binary { data, .. } => push(AssocValue::Binary(data.clone())),
    }
}
