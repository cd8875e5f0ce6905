//! TYPE parameter normalization.
//!
//! Each typed field has a closed vocabulary of canonical tokens and a table
//! of legacy synonyms. Both are plain static data. A normalized type set is
//! uppercase, free of duplicates and ordered by vocabulary position, with
//! `X-` extension tokens after the vocabulary in source order. `PREF` is
//! never part of a type set; it is reported separately.

/// Token marking the preferred value among several of the same field.
pub const PREF: &str = "PREF";

/// Canonical tokens and synonyms for one field.
#[derive(Debug)]
pub struct TypeVocabulary {
    /// Canonical tokens in output order.
    pub tokens: &'static [&'static str],
    /// Legacy token to canonical token(s).
    pub synonyms: &'static [(&'static str, &'static [&'static str])],
}

pub static PHONE_TYPES: TypeVocabulary = TypeVocabulary {
    tokens: &[
        "HOME", "WORK", "CELL", "FAX", "PAGER", "VOICE", "VIDEO", "CAR", "TEXT", "MSG", "ISDN",
        "MODEM", "BBS", "MAIN", "OTHER",
    ],
    synonyms: &[
        ("MOBILE", &["CELL"]),
        ("IPHONE", &["CELL"]),
        ("HOMEFAX", &["HOME", "FAX"]),
        ("WORKFAX", &["WORK", "FAX"]),
        ("BUSINESS", &["WORK"]),
        ("OFFICE", &["WORK"]),
        ("PRIVATE", &["HOME"]),
        ("PERSONAL", &["HOME"]),
        ("TEXTPHONE", &["TEXT"]),
    ],
};

pub static EMAIL_TYPES: TypeVocabulary = TypeVocabulary {
    tokens: &["HOME", "WORK", "INTERNET", "X400", "OTHER"],
    synonyms: &[
        ("BUSINESS", &["WORK"]),
        ("OFFICE", &["WORK"]),
        ("PRIVATE", &["HOME"]),
        ("PERSONAL", &["HOME"]),
    ],
};

pub static ADDRESS_TYPES: TypeVocabulary = TypeVocabulary {
    tokens: &["HOME", "WORK", "DOM", "INTL", "POSTAL", "PARCEL", "OTHER"],
    synonyms: &[
        ("BUSINESS", &["WORK"]),
        ("OFFICE", &["WORK"]),
        ("PRIVATE", &["HOME"]),
        ("PERSONAL", &["HOME"]),
    ],
};

pub static URL_TYPES: TypeVocabulary = TypeVocabulary {
    tokens: &["HOME", "WORK", "OTHER"],
    synonyms: &[
        ("BUSINESS", &["WORK"]),
        ("OFFICE", &["WORK"]),
        ("PRIVATE", &["HOME"]),
        ("PERSONAL", &["HOME"]),
    ],
};

/// Outcome of normalizing a list of raw TYPE tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedTypes {
    /// Canonical type set.
    pub types: Vec<String>,
    /// Whether `PREF` appeared among the tokens.
    pub pref: bool,
    /// Tokens that are neither canonical, synonyms nor extensions.
    pub rejected: Vec<String>,
}

impl TypeVocabulary {
    /// Normalizes raw tokens against this vocabulary.
    ///
    /// Matching is case-insensitive and order-insensitive: `FAX,HOME` and
    /// `home,fax` produce the same set.
    #[must_use]
    pub fn normalize<'a>(&self, raw: impl IntoIterator<Item = &'a str>) -> NormalizedTypes {
        let mut known = vec![false; self.tokens.len()];
        let mut extensions: Vec<String> = Vec::new();
        let mut out = NormalizedTypes::default();

        for token in raw {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let upper = token.to_ascii_uppercase();

            if upper == PREF {
                out.pref = true;
            } else if let Some(i) = self.position(&upper) {
                known[i] = true;
            } else if let Some((_, canonical)) = self.synonyms.iter().find(|(s, _)| *s == upper) {
                for c in *canonical {
                    if let Some(i) = self.position(c) {
                        known[i] = true;
                    }
                }
            } else if upper.starts_with("X-") {
                if !extensions.contains(&upper) {
                    extensions.push(upper);
                }
            } else {
                out.rejected.push(token.to_string());
            }
        }

        out.types = self
            .tokens
            .iter()
            .zip(known)
            .filter(|(_, seen)| *seen)
            .map(|(t, _)| (*t).to_string())
            .chain(extensions)
            .collect();
        out
    }

    fn position(&self, upper: &str) -> Option<usize> {
        self.tokens.iter().position(|t| *t == upper)
    }
}
