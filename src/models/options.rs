//! Generic calculation options.
//!
//! This module defines the flat, namespaced [`GenericOptions`] bag a UI holds
//! for every country at once, and the shared [`EmploymentType`] enum. The
//! router narrows the bag into a country-specific options struct before a
//! formula ever sees it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents how the earner is engaged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    /// Salaried or waged employee (PAYE, payroll withholding).
    #[default]
    Employee,
    /// Self-employed or contractor income.
    SelfEmployed,
}

/// Superset of every country's options, namespaced by country prefix.
///
/// Every field is optional; absent fields fall back to the documented
/// default of the narrowed country options, never to a silent zero. Code
/// fields (states, regions, cantons, plans) are free text here and are
/// validated when narrowed.
///
/// # Example
///
/// ```
/// use salary_engine::models::GenericOptions;
///
/// let json = r#"{ "us_state": "CA", "us_filing_status": "married_joint" }"#;
/// let options: GenericOptions = serde_json::from_str(json).unwrap();
/// assert_eq!(options.us_state.as_deref(), Some("CA"));
/// assert!(options.uk_region.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericOptions {
    /// Employee or self-employed. Defaults to employee.
    pub employment_type: Option<EmploymentType>,

    /// US state or DC postal code. Defaults to no state tax.
    pub us_state: Option<String>,
    /// US filing status code (`single`, `married_joint`, `married_separate`, `head_of_household`).
    pub us_filing_status: Option<String>,
    /// Annual pre-tax 401(k) contribution.
    pub us_401k_contribution: Option<Decimal>,
    /// Annual pre-tax HSA contribution.
    pub us_hsa_contribution: Option<Decimal>,
    /// Number of qualifying children for the child tax credit.
    pub us_dependents: Option<u32>,

    /// UK region (`england`, `scotland`, `wales`, `northern_ireland`).
    pub uk_region: Option<String>,
    /// Annual UK pension contribution.
    pub uk_pension_contribution: Option<Decimal>,
    /// UK student loan plan (`none`, `plan1`, `plan2`, `plan4`, `plan5`, `postgraduate`).
    pub uk_student_loan: Option<String>,
    /// Whether the earner receives a transferred marriage allowance.
    pub uk_marriage_allowance: Option<bool>,

    /// Irish marital status (`single`, `single_parent`, `married_one_earner`, `married_two_earners`).
    pub ie_marital_status: Option<String>,
    /// Annual Irish pension contribution.
    pub ie_pension_contribution: Option<Decimal>,
    /// Spouse's income when both spouses earn.
    pub ie_spouse_income: Option<Decimal>,

    /// Canadian province or territory code (e.g. `ON`, `QC`).
    pub ca_province: Option<String>,

    /// Whether the earner is an Australian tax resident.
    pub au_resident: Option<bool>,
    /// Whether the earner holds private hospital cover.
    pub au_private_health: Option<bool>,
    /// Whether the earner has a HELP/student debt.
    pub au_help_debt: Option<bool>,

    /// Whether German church tax applies.
    pub de_church_tax: Option<bool>,
    /// German federal state code (e.g. `BY`, `BE`).
    pub de_state: Option<String>,
    /// Whether joint assessment (splitting) applies.
    pub de_married: Option<bool>,
    /// Whether the childless care-insurance surcharge applies.
    pub de_childless: Option<bool>,

    /// Whether the French household is a married or PACS couple.
    pub fr_married: Option<bool>,
    /// Number of dependent children in the French household.
    pub fr_children: Option<u32>,

    /// Whether the Dutch 30% ruling applies.
    pub nl_thirty_percent_ruling: Option<bool>,

    /// Spanish autonomous community (`madrid`, `catalonia`, `andalusia`, `valencia`).
    pub es_region: Option<String>,
    /// Number of descendants for the Spanish family minimum.
    pub es_children: Option<u32>,

    /// Italian region (`lombardy`, `lazio`, `campania`, `veneto`, `piedmont`).
    pub it_region: Option<String>,
    /// Municipal surcharge rate as a fraction (e.g. `0.008`).
    pub it_municipal_rate: Option<Decimal>,

    /// Whether the Portuguese household files jointly.
    pub pt_married: Option<bool>,
    /// Number of Portuguese dependants.
    pub pt_dependents: Option<u32>,
    /// Whether the Portuguese non-habitual-resident flat rate applies.
    pub pt_non_habitual_resident: Option<bool>,

    /// Swiss canton name (e.g. `zurich`, `zug`).
    pub ch_canton: Option<String>,
    /// Whether the Swiss married tariff applies.
    pub ch_married: Option<bool>,
    /// Number of Swiss dependent children.
    pub ch_children: Option<u32>,
    /// Age of the Swiss earner, used for the occupational pension rate.
    pub ch_age: Option<u32>,

    /// Number of Japanese dependants.
    pub jp_dependents: Option<u32>,
    /// Whether the Japanese spouse deduction applies.
    pub jp_spouse_deduction: Option<bool>,
    /// Age of the Japanese earner, used for nursing-care insurance.
    pub jp_age: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_deserializes_to_defaults() {
        let options: GenericOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, GenericOptions::default());
    }

    #[test]
    fn test_employment_type_defaults_to_employee() {
        assert_eq!(EmploymentType::default(), EmploymentType::Employee);
    }

    #[test]
    fn test_employment_type_serialization() {
        assert_eq!(
            serde_json::to_string(&EmploymentType::SelfEmployed).unwrap(),
            "\"self_employed\""
        );
    }

    #[test]
    fn test_decimal_fields_accept_strings() {
        let json = r#"{ "us_401k_contribution": "6000.50", "fr_children": 2 }"#;
        let options: GenericOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.us_401k_contribution, Some(Decimal::new(600050, 2)));
        assert_eq!(options.fr_children, Some(2));
    }
}
