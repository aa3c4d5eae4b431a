//! Supported tax jurisdictions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One of the thirteen jurisdictions the engine can evaluate.
///
/// Parsing is case-insensitive and accepts the ISO 3166 alpha-2 code
/// (`GB` is accepted as an alias for the United Kingdom).
///
/// # Example
///
/// ```
/// use salary_engine::models::Country;
///
/// let country: Country = "ch".parse().unwrap();
/// assert_eq!(country, Country::Switzerland);
/// assert_eq!(country.currency(), "CHF");
/// assert!("BR".parse::<Country>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Country {
    /// United States (`US`).
    UnitedStates,
    /// United Kingdom (`UK`).
    UnitedKingdom,
    /// Ireland (`IE`).
    Ireland,
    /// Canada (`CA`).
    Canada,
    /// Australia (`AU`).
    Australia,
    /// Germany (`DE`).
    Germany,
    /// France (`FR`).
    France,
    /// Netherlands (`NL`).
    Netherlands,
    /// Spain (`ES`).
    Spain,
    /// Italy (`IT`).
    Italy,
    /// Portugal (`PT`).
    Portugal,
    /// Switzerland (`CH`).
    Switzerland,
    /// Japan (`JP`).
    Japan,
}

impl Country {
    /// Every supported country, in display order.
    pub const ALL: [Country; 13] = [
        Country::UnitedStates,
        Country::UnitedKingdom,
        Country::Ireland,
        Country::Canada,
        Country::Australia,
        Country::Germany,
        Country::France,
        Country::Netherlands,
        Country::Spain,
        Country::Italy,
        Country::Portugal,
        Country::Switzerland,
        Country::Japan,
    ];

    /// Returns the canonical two-letter code.
    pub fn code(&self) -> &'static str {
        match self {
            Country::UnitedStates => "US",
            Country::UnitedKingdom => "UK",
            Country::Ireland => "IE",
            Country::Canada => "CA",
            Country::Australia => "AU",
            Country::Germany => "DE",
            Country::France => "FR",
            Country::Netherlands => "NL",
            Country::Spain => "ES",
            Country::Italy => "IT",
            Country::Portugal => "PT",
            Country::Switzerland => "CH",
            Country::Japan => "JP",
        }
    }

    /// Returns the ISO 4217 currency code results are denominated in.
    pub fn currency(&self) -> &'static str {
        match self {
            Country::UnitedStates => "USD",
            Country::UnitedKingdom => "GBP",
            Country::Canada => "CAD",
            Country::Australia => "AUD",
            Country::Switzerland => "CHF",
            Country::Japan => "JPY",
            Country::Ireland
            | Country::Germany
            | Country::France
            | Country::Netherlands
            | Country::Spain
            | Country::Italy
            | Country::Portugal => "EUR",
        }
    }

    /// Returns the English country name.
    pub fn name(&self) -> &'static str {
        match self {
            Country::UnitedStates => "United States",
            Country::UnitedKingdom => "United Kingdom",
            Country::Ireland => "Ireland",
            Country::Canada => "Canada",
            Country::Australia => "Australia",
            Country::Germany => "Germany",
            Country::France => "France",
            Country::Netherlands => "Netherlands",
            Country::Spain => "Spain",
            Country::Italy => "Italy",
            Country::Portugal => "Portugal",
            Country::Switzerland => "Switzerland",
            Country::Japan => "Japan",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Country {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "US" => Ok(Country::UnitedStates),
            "UK" | "GB" => Ok(Country::UnitedKingdom),
            "IE" => Ok(Country::Ireland),
            "CA" => Ok(Country::Canada),
            "AU" => Ok(Country::Australia),
            "DE" => Ok(Country::Germany),
            "FR" => Ok(Country::France),
            "NL" => Ok(Country::Netherlands),
            "ES" => Ok(Country::Spain),
            "IT" => Ok(Country::Italy),
            "PT" => Ok(Country::Portugal),
            "CH" => Ok(Country::Switzerland),
            "JP" => Ok(Country::Japan),
            _ => Err(EngineError::UnsupportedCountry {
                code: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Country {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Country> for String {
    fn from(country: Country) -> Self {
        country.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_codes_round_trip_through_parse() {
        for country in Country::ALL {
            assert_eq!(country.code().parse::<Country>().unwrap(), country);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("de".parse::<Country>().unwrap(), Country::Germany);
        assert_eq!(" Jp ".parse::<Country>().unwrap(), Country::Japan);
    }

    #[test]
    fn test_gb_is_alias_for_uk() {
        assert_eq!("GB".parse::<Country>().unwrap(), Country::UnitedKingdom);
    }

    #[test]
    fn test_unknown_code_is_unsupported_country() {
        match "MX".parse::<Country>() {
            Err(EngineError::UnsupportedCountry { code }) => assert_eq!(code, "MX"),
            other => panic!("Expected UnsupportedCountry, got {:?}", other),
        }
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&Country::Netherlands).unwrap();
        assert_eq!(json, "\"NL\"");

        let parsed: Country = serde_json::from_str("\"es\"").unwrap();
        assert_eq!(parsed, Country::Spain);
    }

    #[test]
    fn test_deserialize_rejects_unknown_code() {
        let parsed: Result<Country, _> = serde_json::from_str("\"ZZ\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_euro_countries() {
        let euro: Vec<_> = Country::ALL
            .iter()
            .filter(|c| c.currency() == "EUR")
            .collect();
        assert_eq!(euro.len(), 7);
    }
}
