//! Parsed vCard property, before it is folded into a record.

use super::parameter::VCardParameter;
use super::value::VCardValue;

/// A vCard property as produced by the property parser.
///
/// Contains the decoded value along with the wire text it came from, so
/// callers can still see the escaped form.
#[derive(Debug, Clone, PartialEq)]
pub struct VCardProperty {
    /// Optional property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<VCardParameter>,
    /// Decoded value.
    pub value: VCardValue,
    /// Charset-decoded value text, still escaped. Empty for binary values.
    pub raw_value: String,
}

impl VCardProperty {
    /// Creates a property with a text value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value_str = value.into();
        Self {
            group: None,
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: VCardValue::Text(value_str.clone()),
            raw_value: value_str,
        }
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn param_value(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|p| p.is(name))?.value()
    }

    /// Returns every TYPE value across all TYPE parameters, in order.
    ///
    /// vCard 2.1 repeats the parameter (`TEL;TYPE=HOME;TYPE=FAX`) where 3.0
    /// uses a list, so all occurrences are collected. A quoted 4.0 list
    /// (`TYPE="voice,cell"`) arrives as one value and is split here.
    #[must_use]
    pub fn type_values(&self) -> Vec<&str> {
        self.params
            .iter()
            .filter(|p| p.is("TYPE"))
            .flat_map(|p| p.values.iter().flat_map(|v| v.split(',')))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Returns the declared transfer encoding, if any.
    #[must_use]
    pub fn encoding(&self) -> Option<&str> {
        self.param_value("ENCODING")
    }

    /// Returns the declared charset label, if any.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.param_value("CHARSET")
    }

    /// Returns the value as text if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }
}

/// Common property names as constants.
pub mod names {
    // Identification
    pub const FN: &str = "FN";
    pub const N: &str = "N";
    pub const NICKNAME: &str = "NICKNAME";
    pub const PHOTO: &str = "PHOTO";
    pub const BDAY: &str = "BDAY";
    pub const ANNIVERSARY: &str = "ANNIVERSARY";
    pub const GENDER: &str = "GENDER";

    // Delivery addressing
    pub const ADR: &str = "ADR";
    pub const LABEL: &str = "LABEL";

    // Communications
    pub const TEL: &str = "TEL";
    pub const EMAIL: &str = "EMAIL";
    pub const MAILER: &str = "MAILER";
    pub const IMPP: &str = "IMPP";

    // Geographical
    pub const TZ: &str = "TZ";
    pub const GEO: &str = "GEO";

    // Organizational
    pub const TITLE: &str = "TITLE";
    pub const ROLE: &str = "ROLE";
    pub const LOGO: &str = "LOGO";
    pub const ORG: &str = "ORG";

    // Explanatory
    pub const CATEGORIES: &str = "CATEGORIES";
    pub const NOTE: &str = "NOTE";
    pub const PRODID: &str = "PRODID";
    pub const REV: &str = "REV";
    pub const SORT_STRING: &str = "SORT-STRING";
    pub const SOUND: &str = "SOUND";
    pub const UID: &str = "UID";
    pub const URL: &str = "URL";

    // Security
    pub const KEY: &str = "KEY";

    // General/structural
    pub const BEGIN: &str = "BEGIN";
    pub const END: &str = "END";
    pub const VERSION: &str = "VERSION";
    pub const KIND: &str = "KIND";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::core::encodings;

    #[test]
    fn property_text() {
        let prop = VCardProperty::text("fn", "John Doe");
        assert_eq!(prop.name, "FN");
        assert_eq!(prop.as_text(), Some("John Doe"));
        assert_eq!(prop.raw_value, "John Doe");
    }

    #[test]
    fn repeated_type_parameters_are_collected() {
        let mut prop = VCardProperty::text("TEL", "+1-555-555-5555");
        prop.params.push(VCardParameter::type_param("HOME"));
        prop.params.push(VCardParameter::type_param("FAX"));

        assert_eq!(prop.type_values(), vec!["HOME", "FAX"]);
    }

    #[test]
    fn quoted_type_list_is_split() {
        let mut prop = VCardProperty::text("TEL", "+1-555");
        prop.params.push(VCardParameter::type_param("voice,cell"));

        assert_eq!(prop.type_values(), vec!["voice", "cell"]);
    }

    #[test]
    fn encoding_and_charset() {
        let mut prop = VCardProperty::text("PHOTO", "");
        prop.params.push(VCardParameter::encoding("b"));
        prop.params.push(VCardParameter::charset("UTF-8"));

        assert!(prop.encoding().is_some_and(encodings::is_base64));
        assert_eq!(prop.charset(), Some("UTF-8"));
        assert_eq!(prop.param_value("MEDIATYPE"), None);
    }
}
