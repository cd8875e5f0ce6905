//! vCard parameter types (RFC 2426 §4, RFC 6350 §5).

use serde::Serialize;

/// A vCard parameter.
///
/// Parameters can have multiple values (e.g., TYPE=home,work). Bare legacy
/// tokens (`TEL;HOME;VOICE`) are stored under the name they imply, so a
/// parameter always has a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VCardParameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values.
    pub values: Vec<String>,
}

impl VCardParameter {
    /// Creates a new parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![value.into()],
        }
    }

    /// Creates a parameter with multiple values.
    #[must_use]
    pub fn multi(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns whether this parameter has the given name (case-insensitive).
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns whether this parameter is consumed by the engine rather than
    /// carried through to the record.
    ///
    /// `CHARSET` and `ENCODING` describe the wire form only, `TYPE` and
    /// `PREF` are folded into the normalized type set, and `MEDIATYPE` moves
    /// into the binary value.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self.name.as_str(),
            "TYPE" | "PREF" | "CHARSET" | "ENCODING" | "MEDIATYPE"
        )
    }

    // --- Convenience constructors ---

    /// Creates a TYPE parameter.
    #[must_use]
    pub fn type_param(value: impl Into<String>) -> Self {
        Self::new("TYPE", value)
    }

    /// Creates an ENCODING parameter.
    #[must_use]
    pub fn encoding(value: impl Into<String>) -> Self {
        Self::new("ENCODING", value)
    }

    /// Creates a CHARSET parameter.
    #[must_use]
    pub fn charset(label: impl Into<String>) -> Self {
        Self::new("CHARSET", label)
    }

    /// Creates a VALUE parameter specifying the value type.
    #[must_use]
    pub fn value_type(type_name: impl Into<String>) -> Self {
        Self::new("VALUE", type_name)
    }
}

/// Transfer encodings that may appear as `ENCODING=` values or bare tokens.
pub mod encodings {
    pub const B: &str = "B";
    pub const BASE64: &str = "BASE64";
    pub const QUOTED_PRINTABLE: &str = "QUOTED-PRINTABLE";
    pub const EIGHT_BIT: &str = "8BIT";
    pub const SEVEN_BIT: &str = "7BIT";

    /// Returns whether a bare parameter token names a transfer encoding.
    #[must_use]
    pub fn is_encoding_token(token: &str) -> bool {
        [B, BASE64, QUOTED_PRINTABLE, EIGHT_BIT, SEVEN_BIT]
            .iter()
            .any(|e| e.eq_ignore_ascii_case(token))
    }

    /// Returns whether the value names base64.
    #[must_use]
    pub fn is_base64(value: &str) -> bool {
        value.eq_ignore_ascii_case(B) || value.eq_ignore_ascii_case(BASE64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_single_value() {
        let param = VCardParameter::new("type", "home");
        assert_eq!(param.name, "TYPE");
        assert_eq!(param.value(), Some("home"));
    }

    #[test]
    fn parameter_multi_value() {
        let param = VCardParameter::multi("x-source", vec!["a".into(), "b".into()]);
        assert!(param.is("X-SOURCE"));
        assert_eq!(param.value(), Some("a"));
        assert!(!param.is_structural());
    }

    #[test]
    fn structural_parameters() {
        assert!(VCardParameter::charset("ISO-8859-1").is_structural());
        assert!(VCardParameter::encoding("b").is_structural());
        assert!(!VCardParameter::new("LANGUAGE", "de").is_structural());
    }

    #[test]
    fn encoding_tokens() {
        assert!(encodings::is_encoding_token("quoted-printable"));
        assert!(encodings::is_encoding_token("BASE64"));
        assert!(!encodings::is_encoding_token("HOME"));
        assert!(encodings::is_base64("b"));
        assert!(!encodings::is_base64("8bit"));
    }
}
