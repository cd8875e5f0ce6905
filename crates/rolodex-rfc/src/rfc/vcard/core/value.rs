//! vCard value types.

use serde::Serialize;

/// A decoded vCard property value.
///
/// Text components are stored unescaped. Binary payloads are stored decoded;
/// base64 text is never retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum VCardValue {
    /// Free text.
    Text(String),

    /// Comma-separated text list (NICKNAME, CATEGORIES).
    TextList(Vec<String>),

    /// Semicolon-separated components (N, ADR, ORG).
    ///
    /// Only the components present in the source are stored: a missing
    /// trailing component is absent, an explicitly empty one is `""`.
    Structured(Vec<String>),

    /// URI reference, kept verbatim (PHOTO;VALUE=URI and friends).
    Uri(String),

    /// Inline binary payload.
    Binary {
        data: Vec<u8>,
        media_type: Option<String>,
    },
}

impl VCardValue {
    /// Returns the value as text if applicable.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a URI if applicable.
    #[must_use]
    pub fn as_uri(&self) -> Option<&str> {
        match self {
            Self::Uri(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the structured components if applicable.
    #[must_use]
    pub fn as_components(&self) -> Option<&[String]> {
        match self {
            Self::Structured(parts) => Some(parts),
            _ => None,
        }
    }

    /// Returns the list items if applicable.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::TextList(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the binary payload and its media type if applicable.
    #[must_use]
    pub fn as_binary(&self) -> Option<(&[u8], Option<&str>)> {
        match self {
            Self::Binary { data, media_type } => Some((data, media_type.as_deref())),
            _ => None,
        }
    }

    /// Returns a short name for the value kind, used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::TextList(_) => "text-list",
            Self::Structured(_) => "structured",
            Self::Uri(_) => "uri",
            Self::Binary { .. } => "binary",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_kind() {
        let text = VCardValue::Text("Hello".into());
        assert_eq!(text.as_text(), Some("Hello"));
        assert_eq!(text.as_uri(), None);

        let named = VCardValue::Structured(vec!["Doe".into()]);
        assert_eq!(named.as_components(), Some(&["Doe".to_string()][..]));
        assert_eq!(named.as_list(), None);
        assert_eq!(named.kind_name(), "structured");
    }

    #[test]
    fn binary_accessor() {
        let val = VCardValue::Binary {
            data: vec![0xff, 0xd8],
            media_type: Some("JPEG".into()),
        };
        assert_eq!(val.as_binary(), Some((&[0xff, 0xd8][..], Some("JPEG"))));
        assert_eq!(val.kind_name(), "binary");
    }
}
