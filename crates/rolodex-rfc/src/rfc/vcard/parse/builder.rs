//! Record builder: folds parsed properties into a contact record.

use std::collections::BTreeMap;

use crate::rfc::vcard::core::{
    ContactRecord, FieldKind, FieldParts, FieldValue, VCardProperty, VCardVersion, names,
};

/// Accumulates the properties of one block.
///
/// Nothing is derived until [`RecordBuilder::build`], so the derived
/// attributes depend only on the complete field set.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    version: Option<VCardVersion>,
    fields: BTreeMap<FieldKind, Vec<FieldValue>>,
}

impl RecordBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one parsed property.
    pub fn push(&mut self, property: VCardProperty) {
        match property.name.as_str() {
            names::VERSION => {
                let declared = property.as_text().unwrap_or_default();
                match VCardVersion::parse(declared) {
                    Some(version) => self.version = Some(version),
                    None => tracing::trace!(version = declared, "Unknown vCard version"),
                }
                return;
            }
            names::BEGIN | names::END => {
                tracing::trace!(name = %property.name, "Ignoring nested delimiter");
                return;
            }
            _ => {}
        }

        let kind = FieldKind::from_name(&property.name);
        let type_tokens = property
            .type_values()
            .into_iter()
            .map(str::to_string)
            .collect();
        let pref_param = property.param_value("PREF").map(str::to_string);
        let media_type = property.param_value("MEDIATYPE").map(str::to_string);

        let VCardProperty {
            group,
            params,
            value,
            raw_value,
            ..
        } = property;

        let (field_value, rejected) = FieldValue::assemble(
            &kind,
            FieldParts {
                group,
                type_tokens,
                pref_param,
                media_type,
                params,
                value: Some(value),
                raw_value,
            },
        );

        if !rejected.is_empty() {
            tracing::trace!(field = %kind, ?rejected, "Dropped unknown type tokens");
        }

        self.fields.entry(kind).or_default().push(field_value);
    }

    /// Publishes the record.
    #[must_use]
    pub fn build(self) -> ContactRecord {
        ContactRecord::from_fields(self.version.unwrap_or_default(), self.fields)
    }
}
