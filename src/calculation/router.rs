//! Option routing and country dispatch.
//!
//! Callers hold one flat [`GenericOptions`] bag for every country. The
//! router narrows it into a [`CountryOptions`] value, one variant per
//! country, with a single exhaustive match, and dispatches to the matching
//! formula. Unknown country codes are rejected here and nowhere else.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::countries::{
    self, australia::AustraliaOptions, canada::CanadaOptions, france::FranceOptions,
    germany::GermanyOptions, ireland::IrelandOptions, italy::ItalyOptions, japan::JapanOptions,
    netherlands::NetherlandsOptions, portugal::PortugalOptions, spain::SpainOptions,
    switzerland::SwitzerlandOptions, uk::UkOptions, us::UsOptions,
};
use super::net_to_gross::invert;
use crate::config::SolverSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{Country, GenericOptions, NetToGrossResult, SalaryResult};

/// Country-specific options, keyed by country.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::CountryOptions;
/// use salary_engine::models::{Country, GenericOptions};
///
/// let generic = GenericOptions {
///     ch_canton: Some("zug".to_string()),
///     ..Default::default()
/// };
/// let options = CountryOptions::narrow(Country::Switzerland, &generic)?;
/// assert_eq!(options.country(), Country::Switzerland);
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "country")]
pub enum CountryOptions {
    /// United States.
    #[serde(rename = "US")]
    UnitedStates(UsOptions),
    /// United Kingdom.
    #[serde(rename = "UK")]
    UnitedKingdom(UkOptions),
    /// Ireland.
    #[serde(rename = "IE")]
    Ireland(IrelandOptions),
    /// Canada.
    #[serde(rename = "CA")]
    Canada(CanadaOptions),
    /// Australia.
    #[serde(rename = "AU")]
    Australia(AustraliaOptions),
    /// Germany.
    #[serde(rename = "DE")]
    Germany(GermanyOptions),
    /// France.
    #[serde(rename = "FR")]
    France(FranceOptions),
    /// Netherlands.
    #[serde(rename = "NL")]
    Netherlands(NetherlandsOptions),
    /// Spain.
    #[serde(rename = "ES")]
    Spain(SpainOptions),
    /// Italy.
    #[serde(rename = "IT")]
    Italy(ItalyOptions),
    /// Portugal.
    #[serde(rename = "PT")]
    Portugal(PortugalOptions),
    /// Switzerland.
    #[serde(rename = "CH")]
    Switzerland(SwitzerlandOptions),
    /// Japan.
    #[serde(rename = "JP")]
    Japan(JapanOptions),
}

fn parse_code<T>(value: &Option<String>) -> EngineResult<Option<T>>
where
    T: FromStr<Err = EngineError>,
{
    value.as_deref().map(str::parse).transpose()
}

impl CountryOptions {
    /// Narrows the generic bag into the options for `country`.
    ///
    /// Absent fields take the country's documented defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidOption`] when a code field (filing
    /// status, region, province, canton, state, loan plan, marital status)
    /// is not recognised.
    pub fn narrow(country: Country, generic: &GenericOptions) -> EngineResult<Self> {
        let employment_type = generic.employment_type.unwrap_or_default();

        let options = match country {
            Country::UnitedStates => {
                let defaults = UsOptions::default();
                CountryOptions::UnitedStates(UsOptions {
                    filing_status: parse_code(&generic.us_filing_status)?
                        .unwrap_or(defaults.filing_status),
                    state: generic.us_state.clone(),
                    contribution_401k: generic
                        .us_401k_contribution
                        .unwrap_or(defaults.contribution_401k),
                    hsa_contribution: generic
                        .us_hsa_contribution
                        .unwrap_or(defaults.hsa_contribution),
                    dependents: generic.us_dependents.unwrap_or(defaults.dependents),
                })
            }
            Country::UnitedKingdom => {
                let defaults = UkOptions::default();
                CountryOptions::UnitedKingdom(UkOptions {
                    region: parse_code(&generic.uk_region)?.unwrap_or(defaults.region),
                    pension_contribution: generic
                        .uk_pension_contribution
                        .unwrap_or(defaults.pension_contribution),
                    student_loan: parse_code(&generic.uk_student_loan)?
                        .unwrap_or(defaults.student_loan),
                    marriage_allowance: generic
                        .uk_marriage_allowance
                        .unwrap_or(defaults.marriage_allowance),
                    employment_type,
                })
            }
            Country::Ireland => {
                let defaults = IrelandOptions::default();
                CountryOptions::Ireland(IrelandOptions {
                    marital_status: parse_code(&generic.ie_marital_status)?
                        .unwrap_or(defaults.marital_status),
                    pension_contribution: generic
                        .ie_pension_contribution
                        .unwrap_or(defaults.pension_contribution),
                    spouse_income: generic.ie_spouse_income.unwrap_or(defaults.spouse_income),
                    employment_type,
                })
            }
            Country::Canada => CountryOptions::Canada(CanadaOptions {
                province: parse_code(&generic.ca_province)?.unwrap_or_default(),
                employment_type,
            }),
            Country::Australia => {
                let defaults = AustraliaOptions::default();
                CountryOptions::Australia(AustraliaOptions {
                    resident: generic.au_resident.unwrap_or(defaults.resident),
                    private_health: generic.au_private_health.unwrap_or(defaults.private_health),
                    help_debt: generic.au_help_debt.unwrap_or(defaults.help_debt),
                })
            }
            Country::Germany => CountryOptions::Germany(GermanyOptions {
                church_tax: generic.de_church_tax.unwrap_or(false),
                state: parse_code(&generic.de_state)?,
                married: generic.de_married.unwrap_or(false),
                childless: generic.de_childless.unwrap_or(false),
                employment_type,
            }),
            Country::France => CountryOptions::France(FranceOptions {
                married: generic.fr_married.unwrap_or(false),
                children: generic.fr_children.unwrap_or(0),
            }),
            Country::Netherlands => CountryOptions::Netherlands(NetherlandsOptions {
                thirty_percent_ruling: generic.nl_thirty_percent_ruling.unwrap_or(false),
            }),
            Country::Spain => CountryOptions::Spain(SpainOptions {
                region: parse_code(&generic.es_region)?.unwrap_or_default(),
                children: generic.es_children.unwrap_or(0),
            }),
            Country::Italy => {
                let defaults = ItalyOptions::default();
                CountryOptions::Italy(ItalyOptions {
                    region: parse_code(&generic.it_region)?.unwrap_or(defaults.region),
                    municipal_rate: generic.it_municipal_rate.unwrap_or(defaults.municipal_rate),
                })
            }
            Country::Portugal => CountryOptions::Portugal(PortugalOptions {
                married: generic.pt_married.unwrap_or(false),
                dependents: generic.pt_dependents.unwrap_or(0),
                non_habitual_resident: generic.pt_non_habitual_resident.unwrap_or(false),
            }),
            Country::Switzerland => {
                let defaults = SwitzerlandOptions::default();
                CountryOptions::Switzerland(SwitzerlandOptions {
                    canton: parse_code(&generic.ch_canton)?.unwrap_or(defaults.canton),
                    married: generic.ch_married.unwrap_or(defaults.married),
                    children: generic.ch_children.unwrap_or(defaults.children),
                    age: generic.ch_age.unwrap_or(defaults.age),
                })
            }
            Country::Japan => {
                let defaults = JapanOptions::default();
                CountryOptions::Japan(JapanOptions {
                    dependents: generic.jp_dependents.unwrap_or(defaults.dependents),
                    spouse_deduction: generic
                        .jp_spouse_deduction
                        .unwrap_or(defaults.spouse_deduction),
                    age: generic.jp_age.unwrap_or(defaults.age),
                })
            }
        };

        Ok(options)
    }

    /// The country these options belong to.
    pub fn country(&self) -> Country {
        match self {
            CountryOptions::UnitedStates(_) => Country::UnitedStates,
            CountryOptions::UnitedKingdom(_) => Country::UnitedKingdom,
            CountryOptions::Ireland(_) => Country::Ireland,
            CountryOptions::Canada(_) => Country::Canada,
            CountryOptions::Australia(_) => Country::Australia,
            CountryOptions::Germany(_) => Country::Germany,
            CountryOptions::France(_) => Country::France,
            CountryOptions::Netherlands(_) => Country::Netherlands,
            CountryOptions::Spain(_) => Country::Spain,
            CountryOptions::Italy(_) => Country::Italy,
            CountryOptions::Portugal(_) => Country::Portugal,
            CountryOptions::Switzerland(_) => Country::Switzerland,
            CountryOptions::Japan(_) => Country::Japan,
        }
    }

    /// Runs the country's gross-to-net formula.
    ///
    /// Only the US formula can fail, on an unknown state code.
    pub fn gross_to_net(&self, gross: Decimal) -> EngineResult<SalaryResult> {
        let result = match self {
            CountryOptions::UnitedStates(options) => countries::us::gross_to_net(gross, options)?,
            CountryOptions::UnitedKingdom(options) => countries::uk::gross_to_net(gross, options),
            CountryOptions::Ireland(options) => countries::ireland::gross_to_net(gross, options),
            CountryOptions::Canada(options) => countries::canada::gross_to_net(gross, options),
            CountryOptions::Australia(options) => countries::australia::gross_to_net(gross, options),
            CountryOptions::Germany(options) => countries::germany::gross_to_net(gross, options),
            CountryOptions::France(options) => countries::france::gross_to_net(gross, options),
            CountryOptions::Netherlands(options) => {
                countries::netherlands::gross_to_net(gross, options)
            }
            CountryOptions::Spain(options) => countries::spain::gross_to_net(gross, options),
            CountryOptions::Italy(options) => countries::italy::gross_to_net(gross, options),
            CountryOptions::Portugal(options) => countries::portugal::gross_to_net(gross, options),
            CountryOptions::Switzerland(options) => {
                countries::switzerland::gross_to_net(gross, options)
            }
            CountryOptions::Japan(options) => countries::japan::gross_to_net(gross, options),
        };
        Ok(result)
    }

    /// Inverts the country's formula, starting from its heuristic multiplier.
    pub fn net_to_gross(
        &self,
        net: Decimal,
        settings: &SolverSettings,
    ) -> EngineResult<NetToGrossResult> {
        let multiplier = countries::profile(self.country()).net_to_gross_multiplier;
        invert(net, multiplier, settings, |gross| self.gross_to_net(gross))
    }

    /// Evaluates `base` and `base + extra` and returns both results.
    pub fn marginal(&self, base: Decimal, extra: Decimal) -> EngineResult<MarginalTax> {
        Ok(MarginalTax {
            base: self.gross_to_net(base)?,
            combined: self.gross_to_net(base + extra)?,
        })
    }
}

/// A pair of evaluations used for marginal tax allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarginalTax {
    /// Result on the base amount alone.
    pub base: SalaryResult,
    /// Result on base plus the increment.
    pub combined: SalaryResult,
}

impl MarginalTax {
    /// Income tax and social security attributable to the increment.
    pub fn withheld(&self) -> Decimal {
        (self.combined.total_tax + self.combined.social_security)
            - (self.base.total_tax + self.base.social_security)
    }

    /// Net pay gained from the increment.
    pub fn kept(&self) -> Decimal {
        self.combined.net_salary - self.base.net_salary
    }
}

fn route(country_code: &str, options: &GenericOptions) -> EngineResult<CountryOptions> {
    let country: Country = country_code.parse()?;
    let narrowed = CountryOptions::narrow(country, options)?;
    debug!(country = %country, "routed options");
    Ok(narrowed)
}

/// Computes take-home pay for a country code and generic options.
///
/// # Errors
///
/// [`EngineError::UnsupportedCountry`] for a code outside the supported
/// set, [`EngineError::InvalidOption`] for an unrecognised code field and
/// [`EngineError::UnknownStateCode`] for an unknown US state.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::calculate_gross_to_net;
/// use salary_engine::models::GenericOptions;
/// use rust_decimal::Decimal;
///
/// let result = calculate_gross_to_net("UK", Decimal::from(30_000), &GenericOptions::default())?;
/// assert_eq!(result.net_salary, Decimal::new(251_196, 1));
///
/// assert!(calculate_gross_to_net("BR", Decimal::from(30_000), &GenericOptions::default()).is_err());
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
pub fn calculate_gross_to_net(
    country_code: &str,
    gross: Decimal,
    options: &GenericOptions,
) -> EngineResult<SalaryResult> {
    route(country_code, options)?.gross_to_net(gross)
}

/// Finds the gross salary that yields `net`, with the default solver settings.
pub fn calculate_net_to_gross(
    country_code: &str,
    net: Decimal,
    options: &GenericOptions,
) -> EngineResult<NetToGrossResult> {
    calculate_net_to_gross_with(country_code, net, options, &SolverSettings::default())
}

/// Finds the gross salary that yields `net`, with explicit solver settings.
pub fn calculate_net_to_gross_with(
    country_code: &str,
    net: Decimal,
    options: &GenericOptions,
    settings: &SolverSettings,
) -> EngineResult<NetToGrossResult> {
    route(country_code, options)?.net_to_gross(net, settings)
}

/// Share of the next currency unit of gross that does not reach net pay,
/// as a fraction.
pub fn marginal_rate(
    country_code: &str,
    gross: Decimal,
    options: &GenericOptions,
) -> EngineResult<Decimal> {
    let marginal = route(country_code, options)?.marginal(gross, Decimal::ONE)?;
    Ok(Decimal::ONE - marginal.kept())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::countries::canada::Province;
    use crate::calculation::countries::switzerland::Canton;
    use crate::calculation::countries::uk::{StudentLoanPlan, UkRegion};
    use crate::models::EmploymentType;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_every_country_routes_with_default_options() {
        for country in Country::ALL {
            let result = calculate_gross_to_net(country.code(), dec("60000"), &GenericOptions::default());
            assert!(result.is_ok(), "{}: {:?}", country, result.err());
            let narrowed = CountryOptions::narrow(country, &GenericOptions::default()).unwrap();
            assert_eq!(narrowed.country(), country);
        }
    }

    #[test]
    fn test_unsupported_country_is_rejected() {
        let result = calculate_gross_to_net("BR", dec("60000"), &GenericOptions::default());
        assert_eq!(
            result,
            Err(EngineError::UnsupportedCountry {
                code: "BR".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_us_state_surfaces_typed_error() {
        let options = GenericOptions {
            us_state: Some("ZZ".to_string()),
            ..Default::default()
        };
        let result = calculate_gross_to_net("US", dec("60000"), &options);
        assert!(matches!(result, Err(EngineError::UnknownStateCode { .. })));
    }

    #[test]
    fn test_invalid_code_field_is_rejected() {
        let options = GenericOptions {
            ch_canton: Some("atlantis".to_string()),
            ..Default::default()
        };
        let result = calculate_gross_to_net("CH", dec("80000"), &options);
        match result {
            Err(EngineError::InvalidOption { field, .. }) => assert_eq!(field, "ch_canton"),
            other => panic!("Expected InvalidOption, got {:?}", other),
        }
    }

    #[test]
    fn test_narrowing_reads_namespaced_fields() {
        let generic = GenericOptions {
            employment_type: Some(EmploymentType::SelfEmployed),
            uk_region: Some("scotland".to_string()),
            uk_student_loan: Some("plan2".to_string()),
            uk_pension_contribution: Some(dec("2000")),
            ca_province: Some("qc".to_string()),
            ch_canton: Some("zug".to_string()),
            ch_age: Some(50),
            ..Default::default()
        };

        match CountryOptions::narrow(Country::UnitedKingdom, &generic).unwrap() {
            CountryOptions::UnitedKingdom(uk) => {
                assert_eq!(uk.region, UkRegion::Scotland);
                assert_eq!(uk.student_loan, StudentLoanPlan::Plan2);
                assert_eq!(uk.pension_contribution, dec("2000"));
                assert_eq!(uk.employment_type, EmploymentType::SelfEmployed);
            }
            other => panic!("Expected UK options, got {:?}", other),
        }

        match CountryOptions::narrow(Country::Canada, &generic).unwrap() {
            CountryOptions::Canada(ca) => assert_eq!(ca.province, Province::Qc),
            other => panic!("Expected Canada options, got {:?}", other),
        }

        match CountryOptions::narrow(Country::Switzerland, &generic).unwrap() {
            CountryOptions::Switzerland(ch) => {
                assert_eq!(ch.canton, Canton::Zug);
                assert_eq!(ch.age, 50);
                assert!(!ch.married);
            }
            other => panic!("Expected Switzerland options, got {:?}", other),
        }
    }

    #[test]
    fn test_absent_fields_take_country_defaults() {
        let generic = GenericOptions::default();
        assert_eq!(
            CountryOptions::narrow(Country::Australia, &generic).unwrap(),
            CountryOptions::Australia(AustraliaOptions::default())
        );
        assert_eq!(
            CountryOptions::narrow(Country::Italy, &generic).unwrap(),
            CountryOptions::Italy(ItalyOptions::default())
        );
        assert_eq!(
            CountryOptions::narrow(Country::Japan, &generic).unwrap(),
            CountryOptions::Japan(JapanOptions::default())
        );
    }

    #[test]
    fn test_net_to_gross_round_trips_through_the_router() {
        let options = GenericOptions::default();
        let result = calculate_net_to_gross("DE", dec("50000"), &options).unwrap();
        assert!(result.convergence.converged);
        let check = calculate_gross_to_net("DE", result.salary.gross_salary, &options).unwrap();
        assert!((check.net_salary - dec("50000")).abs() < Decimal::ONE);
    }

    #[test]
    fn test_marginal_rate_in_flat_region() {
        // UK basic-rate band: 20% income tax plus 8% NI.
        let rate = marginal_rate("UK", dec("30000"), &GenericOptions::default()).unwrap();
        assert_eq!(rate, dec("0.28"));
    }

    #[test]
    fn test_marginal_tax_splits_withheld_and_kept() {
        let options = CountryOptions::narrow(Country::UnitedKingdom, &GenericOptions::default()).unwrap();
        let marginal = options.marginal(dec("30000"), dec("1000")).unwrap();
        assert_eq!(marginal.withheld(), dec("280"));
        assert_eq!(marginal.kept(), dec("720"));
    }

    #[test]
    fn test_country_options_serialize_with_country_tag() {
        let options = CountryOptions::narrow(Country::France, &GenericOptions::default()).unwrap();
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["country"], "FR");
        assert_eq!(json["children"], 0);
    }
}
