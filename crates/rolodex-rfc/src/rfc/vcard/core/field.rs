//! Canonical field kinds and their value grammar.

use serde::{Serialize, Serializer};

use super::property::names;
use super::types::{ADDRESS_TYPES, EMAIL_TYPES, PHONE_TYPES, TypeVocabulary, URL_TYPES};

/// The closed set of fields the engine models individually, plus a fallback
/// for everything else.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    FormattedName,
    Name,
    Nickname,
    Photo,
    Birthday,
    Anniversary,
    Gender,
    Address,
    Label,
    Phone,
    Email,
    Mailer,
    Impp,
    Timezone,
    Geo,
    Title,
    Role,
    Logo,
    Organization,
    Categories,
    Note,
    ProductId,
    Revision,
    SortString,
    Sound,
    Uid,
    Url,
    Key,
    Kind,
    /// Any other property, retained under its uppercase name.
    Extension(String),
}

/// How a field's value text is laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueGrammar {
    /// Single escaped text value.
    Text,
    /// Comma-separated list of escaped text values.
    TextList,
    /// Semicolon-separated positional components.
    Structured,
    /// Inline binary (base64 or data URI) or a URI reference.
    Media,
}

impl FieldKind {
    /// Maps a property name (any case) to its field kind.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let upper = name.to_ascii_uppercase();
        match upper.as_str() {
            names::FN => Self::FormattedName,
            names::N => Self::Name,
            names::NICKNAME => Self::Nickname,
            names::PHOTO => Self::Photo,
            names::BDAY => Self::Birthday,
            names::ANNIVERSARY => Self::Anniversary,
            names::GENDER => Self::Gender,
            names::ADR => Self::Address,
            names::LABEL => Self::Label,
            names::TEL => Self::Phone,
            names::EMAIL => Self::Email,
            names::MAILER => Self::Mailer,
            names::IMPP => Self::Impp,
            names::TZ => Self::Timezone,
            names::GEO => Self::Geo,
            names::TITLE => Self::Title,
            names::ROLE => Self::Role,
            names::LOGO => Self::Logo,
            names::ORG => Self::Organization,
            names::CATEGORIES => Self::Categories,
            names::NOTE => Self::Note,
            names::PRODID => Self::ProductId,
            names::REV => Self::Revision,
            names::SORT_STRING => Self::SortString,
            names::SOUND => Self::Sound,
            names::UID => Self::Uid,
            names::URL => Self::Url,
            names::KEY => Self::Key,
            names::KIND => Self::Kind,
            _ => Self::Extension(upper),
        }
    }

    /// Returns the property name written on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::FormattedName => names::FN,
            Self::Name => names::N,
            Self::Nickname => names::NICKNAME,
            Self::Photo => names::PHOTO,
            Self::Birthday => names::BDAY,
            Self::Anniversary => names::ANNIVERSARY,
            Self::Gender => names::GENDER,
            Self::Address => names::ADR,
            Self::Label => names::LABEL,
            Self::Phone => names::TEL,
            Self::Email => names::EMAIL,
            Self::Mailer => names::MAILER,
            Self::Impp => names::IMPP,
            Self::Timezone => names::TZ,
            Self::Geo => names::GEO,
            Self::Title => names::TITLE,
            Self::Role => names::ROLE,
            Self::Logo => names::LOGO,
            Self::Organization => names::ORG,
            Self::Categories => names::CATEGORIES,
            Self::Note => names::NOTE,
            Self::ProductId => names::PRODID,
            Self::Revision => names::REV,
            Self::SortString => names::SORT_STRING,
            Self::Sound => names::SOUND,
            Self::Uid => names::UID,
            Self::Url => names::URL,
            Self::Key => names::KEY,
            Self::Kind => names::KIND,
            Self::Extension(name) => name,
        }
    }

    /// Returns the value grammar for this field.
    #[must_use]
    pub const fn grammar(&self) -> ValueGrammar {
        match self {
            Self::Name | Self::Address | Self::Organization | Self::Gender | Self::Geo => {
                ValueGrammar::Structured
            }
            Self::Nickname | Self::Categories => ValueGrammar::TextList,
            Self::Photo | Self::Logo | Self::Sound | Self::Key => ValueGrammar::Media,
            _ => ValueGrammar::Text,
        }
    }

    /// Returns the TYPE vocabulary, for fields whose TYPE carries tags.
    ///
    /// Media fields use TYPE for the media type instead.
    #[must_use]
    pub fn type_vocabulary(&self) -> Option<&'static TypeVocabulary> {
        match self {
            Self::Phone => Some(&PHONE_TYPES),
            Self::Email => Some(&EMAIL_TYPES),
            Self::Address | Self::Label => Some(&ADDRESS_TYPES),
            Self::Url | Self::Impp => Some(&URL_TYPES),
            _ => None,
        }
    }

    /// Returns whether a record holds at most one value of this field.
    #[must_use]
    pub const fn is_single_valued(&self) -> bool {
        matches!(
            self,
            Self::FormattedName
                | Self::Name
                | Self::Photo
                | Self::Birthday
                | Self::Anniversary
                | Self::Gender
                | Self::Timezone
                | Self::Geo
                | Self::Title
                | Self::Role
                | Self::Logo
                | Self::Organization
                | Self::Note
                | Self::ProductId
                | Self::Revision
                | Self::SortString
                | Self::Sound
                | Self::Uid
                | Self::Kind
        )
    }

    /// Returns priority for output ordering (lower = earlier).
    #[must_use]
    pub const fn priority(&self) -> u8 {
        match self {
            Self::FormattedName => 1,
            Self::Name => 2,
            Self::Kind => 3,
            Self::Nickname => 4,
            Self::Photo => 10,
            Self::Birthday => 11,
            Self::Anniversary => 12,
            Self::Gender => 13,
            Self::Address => 20,
            Self::Label => 21,
            Self::Phone => 30,
            Self::Email => 31,
            Self::Impp => 32,
            Self::Mailer => 33,
            Self::Timezone => 40,
            Self::Geo => 41,
            Self::Title => 50,
            Self::Role => 51,
            Self::Logo => 52,
            Self::Organization => 53,
            Self::Categories => 60,
            Self::Note => 61,
            Self::ProductId => 70,
            Self::Revision => 71,
            Self::SortString => 72,
            Self::Sound => 73,
            Self::Uid => 74,
            Self::Url => 75,
            Self::Key => 80,
            Self::Extension(_) => 100,
        }
    }
}

impl Serialize for FieldKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a component inside the N property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePart {
    Surname = 0,
    Firstname = 1,
    Middlename = 2,
    Prefix = 3,
    Suffix = 4,
}

/// What a caller-supplied field name refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldTarget {
    /// A whole property.
    Field(FieldKind),
    /// One component of N.
    NamePart(NamePart),
    /// The first organizational unit of ORG.
    Department,
}

/// Friendly field names understood by the field-set interface.
static FRIENDLY_NAMES: &[(&str, FieldTarget)] = &[
    ("displayname", FieldTarget::Field(FieldKind::FormattedName)),
    ("surname", FieldTarget::NamePart(NamePart::Surname)),
    ("firstname", FieldTarget::NamePart(NamePart::Firstname)),
    ("middlename", FieldTarget::NamePart(NamePart::Middlename)),
    ("prefix", FieldTarget::NamePart(NamePart::Prefix)),
    ("suffix", FieldTarget::NamePart(NamePart::Suffix)),
    ("nickname", FieldTarget::Field(FieldKind::Nickname)),
    ("organization", FieldTarget::Field(FieldKind::Organization)),
    ("department", FieldTarget::Department),
    ("jobtitle", FieldTarget::Field(FieldKind::Title)),
    ("notes", FieldTarget::Field(FieldKind::Note)),
    ("birthday", FieldTarget::Field(FieldKind::Birthday)),
    ("website", FieldTarget::Field(FieldKind::Url)),
    ("email", FieldTarget::Field(FieldKind::Email)),
    ("phone", FieldTarget::Field(FieldKind::Phone)),
    ("address", FieldTarget::Field(FieldKind::Address)),
    ("photo", FieldTarget::Field(FieldKind::Photo)),
    ("groups", FieldTarget::Field(FieldKind::Categories)),
    ("uid", FieldTarget::Field(FieldKind::Uid)),
];

impl FieldTarget {
    /// Resolves a friendly name or a property name.
    ///
    /// Unknown names resolve only when they are `X-` extensions, so typos do
    /// not silently create new properties.
    #[must_use]
    pub fn resolve(name: &str) -> Option<Self> {
        let name = name.trim();
        if let Some((_, target)) = FRIENDLY_NAMES
            .iter()
            .find(|(friendly, _)| friendly.eq_ignore_ascii_case(name))
        {
            return Some(target.clone());
        }

        match FieldKind::from_name(name) {
            FieldKind::Extension(ext) if !is_extension_name(&ext) => None,
            kind => Some(Self::Field(kind)),
        }
    }
}

fn is_extension_name(name: &str) -> bool {
    name.len() > 2
        && name.starts_with("X-")
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for name in ["FN", "N", "TEL", "EMAIL", "ORG", "PHOTO", "SORT-STRING"] {
            assert_eq!(FieldKind::from_name(name).as_str(), name);
        }
        assert_eq!(FieldKind::from_name("tel"), FieldKind::Phone);
    }

    #[test]
    fn unknown_properties_are_kept_verbatim() {
        let kind = FieldKind::from_name("x-abShowAs");
        assert_eq!(kind, FieldKind::Extension("X-ABSHOWAS".into()));
        assert_eq!(kind.grammar(), ValueGrammar::Text);
    }

    #[test]
    fn grammar_and_multiplicity() {
        assert_eq!(FieldKind::Name.grammar(), ValueGrammar::Structured);
        assert_eq!(FieldKind::Categories.grammar(), ValueGrammar::TextList);
        assert_eq!(FieldKind::Photo.grammar(), ValueGrammar::Media);
        assert!(FieldKind::Organization.is_single_valued());
        assert!(!FieldKind::Email.is_single_valued());
        assert!(FieldKind::Photo.type_vocabulary().is_none());
    }

    #[test]
    fn friendly_names_resolve() {
        assert_eq!(
            FieldTarget::resolve("phone"),
            Some(FieldTarget::Field(FieldKind::Phone))
        );
        assert_eq!(
            FieldTarget::resolve("Surname"),
            Some(FieldTarget::NamePart(NamePart::Surname))
        );
        assert_eq!(
            FieldTarget::resolve("TEL"),
            Some(FieldTarget::Field(FieldKind::Phone))
        );
        assert_eq!(
            FieldTarget::resolve("x-assistant"),
            Some(FieldTarget::Field(FieldKind::Extension("X-ASSISTANT".into())))
        );
        assert_eq!(FieldTarget::resolve("shoe-size"), None);
    }
}
