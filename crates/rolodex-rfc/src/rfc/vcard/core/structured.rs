//! Structured vCard types.
//!
//! These types are positional views over the components of N, ADR and ORG.
//! A component the source never supplied is `None`; a component supplied as
//! an empty segment between separators is `Some("")`.

use serde::Serialize;

/// Structured name (N property, RFC 2426 §3.1.2).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuredName {
    /// Family name.
    pub surname: Option<String>,
    /// Given name.
    pub firstname: Option<String>,
    /// Additional names.
    pub middlename: Option<String>,
    /// Honorific prefix (e.g., "Mr.", "Dr.").
    pub prefix: Option<String>,
    /// Honorific suffix (e.g., "Jr.", "M.D.").
    pub suffix: Option<String>,
}

impl StructuredName {
    /// Creates a structured name with family and given names.
    #[must_use]
    pub fn simple(surname: impl Into<String>, firstname: impl Into<String>) -> Self {
        Self {
            surname: Some(surname.into()),
            firstname: Some(firstname.into()),
            ..Self::default()
        }
    }

    /// Builds a name from positional components.
    #[must_use]
    pub fn from_components(parts: &[String]) -> Self {
        let at = |i: usize| parts.get(i).cloned();
        Self {
            surname: at(0),
            firstname: at(1),
            middlename: at(2),
            prefix: at(3),
            suffix: at(4),
        }
    }

    /// Returns positional components, dropping absent trailing ones.
    #[must_use]
    pub fn to_components(&self) -> Vec<String> {
        components([
            &self.surname,
            &self.firstname,
            &self.middlename,
            &self.prefix,
            &self.suffix,
        ])
    }

    /// Returns whether every component is absent or empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [
            &self.surname,
            &self.firstname,
            &self.middlename,
            &self.prefix,
            &self.suffix,
        ]
        .iter()
        .all(|c| c.as_deref().is_none_or(str::is_empty))
    }

    /// Formats as a display name: prefix, given, additional, family, suffix.
    #[must_use]
    pub fn display_name(&self) -> String {
        [
            &self.prefix,
            &self.firstname,
            &self.middlename,
            &self.surname,
            &self.suffix,
        ]
        .iter()
        .filter_map(|c| c.as_deref())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Address (ADR property, RFC 2426 §3.2.1).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Address {
    /// Post office box.
    pub po_box: Option<String>,
    /// Extended address (e.g., apartment or suite number).
    pub extended: Option<String>,
    /// Street address.
    pub street: Option<String>,
    /// Locality (city).
    pub locality: Option<String>,
    /// Region (state or province).
    pub region: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Country name.
    pub country: Option<String>,
}

impl Address {
    /// Builds an address from positional components.
    #[must_use]
    pub fn from_components(parts: &[String]) -> Self {
        let at = |i: usize| parts.get(i).cloned();
        Self {
            po_box: at(0),
            extended: at(1),
            street: at(2),
            locality: at(3),
            region: at(4),
            postal_code: at(5),
            country: at(6),
        }
    }

    /// Returns positional components, dropping absent trailing ones.
    #[must_use]
    pub fn to_components(&self) -> Vec<String> {
        components([
            &self.po_box,
            &self.extended,
            &self.street,
            &self.locality,
            &self.region,
            &self.postal_code,
            &self.country,
        ])
    }

    /// Formats as a single-line address.
    #[must_use]
    pub fn one_line(&self) -> String {
        [
            &self.street,
            &self.locality,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .filter_map(|c| c.as_deref())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Organization (ORG property, RFC 2426 §3.5.5).
///
/// First value is the organizational name, subsequent values are
/// organizational units in order of decreasing specificity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Organization {
    /// Organization name.
    pub name: String,
    /// Organizational units (department, division, etc.).
    pub units: Vec<String>,
}

impl Organization {
    /// Builds an organization from positional components.
    #[must_use]
    pub fn from_components(parts: &[String]) -> Self {
        let mut iter = parts.iter().cloned();
        Self {
            name: iter.next().unwrap_or_default(),
            units: iter.collect(),
        }
    }

    /// Returns whether the organization is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.units.iter().all(String::is_empty)
    }
}

fn components<const N: usize>(slots: [&Option<String>; N]) -> Vec<String> {
    let len = slots.iter().rposition(|c| c.is_some()).map_or(0, |i| i + 1);
    slots[..len]
        .iter()
        .map(|c| c.as_deref().unwrap_or_default().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn missing_trailing_components_are_absent() {
        let name = StructuredName::from_components(&parts(&["Doe", "John"]));
        assert_eq!(name.surname.as_deref(), Some("Doe"));
        assert_eq!(name.firstname.as_deref(), Some("John"));
        assert_eq!(name.middlename, None);
        assert_eq!(name.suffix, None);
    }

    #[test]
    fn explicit_empty_component_is_kept() {
        let name = StructuredName::from_components(&parts(&["Doe", "John", ""]));
        assert_eq!(name.middlename.as_deref(), Some(""));
        assert_eq!(name.prefix, None);
    }

    #[test]
    fn components_round_trip() {
        let source = parts(&["Doe", "", "Q", "Dr."]);
        let name = StructuredName::from_components(&source);
        assert_eq!(name.to_components(), source);
    }

    #[test]
    fn components_keep_inner_gaps() {
        let name = StructuredName {
            surname: Some("Doe".into()),
            prefix: Some("Dr.".into()),
            ..StructuredName::default()
        };
        assert_eq!(name.to_components(), parts(&["Doe", "", "", "Dr."]));
        assert!(StructuredName::default().to_components().is_empty());
    }

    #[test]
    fn display_name_order() {
        let name = StructuredName::from_components(&parts(&["Public", "John", "Q.", "Mr.", "Esq."]));
        assert_eq!(name.display_name(), "Mr. John Q. Public Esq.");
    }

    #[test]
    fn empty_name() {
        assert!(StructuredName::from_components(&parts(&["", "", "", "", ""])).is_empty());
        assert!(!StructuredName::simple("Doe", "").is_empty());
    }

    #[test]
    fn address_one_line() {
        let addr = Address::from_components(&parts(&["", "", "123 Main St", "Anytown", "CA", "12345", "USA"]));
        assert_eq!(addr.one_line(), "123 Main St, Anytown, CA, 12345, USA");
        assert_eq!(addr.po_box.as_deref(), Some(""));
    }

    #[test]
    fn organization_units() {
        let org = Organization::from_components(&parts(&["Acme Inc.", "Engineering", "Backend"]));
        assert_eq!(org.name, "Acme Inc.");
        assert_eq!(org.units, vec!["Engineering", "Backend"]);
        assert!(Organization::from_components(&[]).is_empty());
    }
}
