//! # X.500 Legal Names
//!
//! A [`LegalName`] is the cross-network identity anchor: the same organisation
//! keeps its name when it is re-keyed on the destination network.
//!
//! Accepted attributes are `CN`, `OU`, `O`, `L`, `ST` and `C`. `O`, `L` and `C`
//! are mandatory and `C` must be a two-letter upper-case country code.
//! Attribute order in the input does not matter; rendering is canonical.

use crate::errors::PrimitiveError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Structured distinguished name, e.g. `O=Client, L=London, C=GB`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LegalName {
    common_name: Option<String>,
    organisation_unit: Option<String>,
    organisation: String,
    locality: String,
    state: Option<String>,
    country: String,
}

impl LegalName {
    /// Build a name from its mandatory attributes.
    pub fn new(
        organisation: impl Into<String>,
        locality: impl Into<String>,
        country: impl Into<String>,
    ) -> Result<Self, PrimitiveError> {
        let name = Self {
            common_name: None,
            organisation_unit: None,
            organisation: organisation.into(),
            locality: locality.into(),
            state: None,
            country: country.into(),
        };
        name.validate()?;
        Ok(name)
    }

    /// Parse `KEY=value` pairs separated by commas.
    pub fn parse(s: &str) -> Result<Self, PrimitiveError> {
        let invalid = |reason: &str| PrimitiveError::InvalidLegalName {
            name: s.to_string(),
            reason: reason.to_string(),
        };

        let mut common_name = None;
        let mut organisation_unit = None;
        let mut organisation = None;
        let mut locality = None;
        let mut state = None;
        let mut country = None;

        for part in s.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| invalid("attribute without '='"))?;
            let value = value.trim();
            if value.is_empty() {
                return Err(invalid("empty attribute value"));
            }
            let slot = match key.trim().to_ascii_uppercase().as_str() {
                "CN" => &mut common_name,
                "OU" => &mut organisation_unit,
                "O" => &mut organisation,
                "L" => &mut locality,
                "ST" => &mut state,
                "C" => &mut country,
                _ => return Err(invalid("unsupported attribute")),
            };
            if slot.replace(value.to_string()).is_some() {
                return Err(invalid("duplicate attribute"));
            }
        }

        let name = Self {
            common_name,
            organisation_unit,
            organisation: organisation.ok_or_else(|| invalid("missing O"))?,
            locality: locality.ok_or_else(|| invalid("missing L"))?,
            state,
            country: country.ok_or_else(|| invalid("missing C"))?,
        };
        name.validate()?;
        Ok(name)
    }

    fn validate(&self) -> Result<(), PrimitiveError> {
        let valid_country =
            self.country.len() == 2 && self.country.chars().all(|c| c.is_ascii_uppercase());
        if !valid_country {
            return Err(PrimitiveError::InvalidLegalName {
                name: self.to_string(),
                reason: "country must be a two-letter upper-case code".to_string(),
            });
        }
        Ok(())
    }

    pub fn organisation(&self) -> &str {
        &self.organisation
    }

    pub fn locality(&self) -> &str {
        &self.locality
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn common_name(&self) -> Option<&str> {
        self.common_name.as_deref()
    }

    /// Case-insensitive substring match over the rendered name.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        self.to_string()
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}

impl fmt::Display for LegalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attributes = [
            ("CN", self.common_name.as_deref()),
            ("OU", self.organisation_unit.as_deref()),
            ("O", Some(self.organisation.as_str())),
            ("L", Some(self.locality.as_str())),
            ("ST", self.state.as_deref()),
            ("C", Some(self.country.as_str())),
        ];
        let rendered: Vec<String> = attributes
            .iter()
            .filter_map(|(key, value)| value.map(|v| format!("{}={}", key, v)))
            .collect();
        write!(f, "{}", rendered.join(", "))
    }
}

impl FromStr for LegalName {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LegalName {
    type Error = PrimitiveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LegalName> for String {
    fn from(name: LegalName) -> Self {
        name.to_string()
    }
}
