//! Germany: §32a income tax tariff, solidarity surcharge, church tax and
//! employee social insurance (2025).
//!
//! The tariff is not a bracket table: the two progression zones are
//! quadratic. Taxable income is gross less the employee lump sums and the
//! deductible share of social contributions.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::brackets::{money, non_negative, pct};
use crate::error::EngineError;
use crate::models::{EmploymentType, SalaryResult};

/// Standard full-time hours per year.
pub const HOURS_PER_YEAR: u32 = 2_080;
/// Standard working days per year.
pub const WORKING_DAYS_PER_YEAR: u32 = 260;
/// Initial gross/net ratio for net-to-gross inversion.
pub const NET_TO_GROSS_MULTIPLIER: Decimal = pct(155, 0);
/// Voluntary statutory pension rate for the self-employed.
pub const SELF_EMPLOYMENT_RATE: Decimal = pct(19, 0);

const BASIC_ALLOWANCE: Decimal = money(12_096);
const ZONE_TWO_START: Decimal = money(17_443);
const ZONE_THREE_START: Decimal = money(68_480);
const ZONE_FOUR_START: Decimal = money(277_825);
const TEN_THOUSAND: Decimal = money(10_000);

const EMPLOYEE_LUMP_SUM: Decimal = money(1_230);
const SPECIAL_EXPENSES_LUMP_SUM: Decimal = money(36);

const SOLI_RATE: Decimal = pct(55, 1);
const SOLI_EXEMPTION: Decimal = money(19_950);
const SOLI_TRANSITION_RATE: Decimal = pct(119, 1);

const CHURCH_TAX_RATE: Decimal = pct(9, 0);
const CHURCH_TAX_RATE_SOUTH: Decimal = pct(8, 0);

const PENSION_CEILING: Decimal = money(96_600);
const HEALTH_CEILING: Decimal = money(66_150);
const PENSION_RATE: Decimal = pct(93, 1);
const UNEMPLOYMENT_RATE: Decimal = pct(13, 1);
/// 7.3% general rate plus half the 2.5% average supplementary rate.
const HEALTH_RATE: Decimal = pct(855, 2);
const HEALTH_RATE_FULL: Decimal = pct(171, 1);
const CARE_RATE: Decimal = pct(18, 1);
const CARE_RATE_SAXONY: Decimal = pct(23, 1);
const CARE_RATE_FULL: Decimal = pct(36, 1);
const CARE_CHILDLESS_SURCHARGE: Decimal = pct(6, 1);

/// German federal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GermanState {
    /// Baden-Württemberg.
    Bw,
    /// Bavaria.
    By,
    /// Berlin.
    Be,
    /// Brandenburg.
    Bb,
    /// Bremen.
    Hb,
    /// Hamburg.
    Hh,
    /// Hesse.
    He,
    /// Mecklenburg-Vorpommern.
    Mv,
    /// Lower Saxony.
    Ni,
    /// North Rhine-Westphalia.
    Nw,
    /// Rhineland-Palatinate.
    Rp,
    /// Saarland.
    Sl,
    /// Saxony.
    Sn,
    /// Saxony-Anhalt.
    St,
    /// Schleswig-Holstein.
    Sh,
    /// Thuringia.
    Th,
}

impl GermanState {
    /// Church tax rate levied on income tax.
    pub fn church_tax_rate(&self) -> Decimal {
        match self {
            GermanState::Bw | GermanState::By => CHURCH_TAX_RATE_SOUTH,
            _ => CHURCH_TAX_RATE,
        }
    }
}

impl FromStr for GermanState {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let state = match s.trim().to_ascii_uppercase().as_str() {
            "BW" => GermanState::Bw,
            "BY" => GermanState::By,
            "BE" => GermanState::Be,
            "BB" => GermanState::Bb,
            "HB" => GermanState::Hb,
            "HH" => GermanState::Hh,
            "HE" => GermanState::He,
            "MV" => GermanState::Mv,
            "NI" => GermanState::Ni,
            "NW" => GermanState::Nw,
            "RP" => GermanState::Rp,
            "SL" => GermanState::Sl,
            "SN" => GermanState::Sn,
            "ST" => GermanState::St,
            "SH" => GermanState::Sh,
            "TH" => GermanState::Th,
            _ => {
                return Err(EngineError::InvalidOption {
                    field: "de_state".to_string(),
                    message: format!("unknown federal state '{}'", s),
                });
            }
        };
        Ok(state)
    }
}

/// Germany options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GermanyOptions {
    /// Member of a church that levies church tax.
    pub church_tax: bool,
    /// Federal state; decides the church tax rate and the Saxony care rate.
    pub state: Option<GermanState>,
    /// Joint assessment with income splitting.
    pub married: bool,
    /// Childless and over 23, so the care insurance surcharge applies.
    pub childless: bool,
    /// Employee or self-employed.
    pub employment_type: EmploymentType,
}

/// Income tax under the §32a basic tariff for one assessed person.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::countries::germany::income_tax_tariff;
/// use rust_decimal::Decimal;
///
/// assert_eq!(income_tax_tariff(Decimal::from(12_000)), Decimal::ZERO);
/// assert_eq!(income_tax_tariff(Decimal::from(100_000)), Decimal::new(3108808, 2));
/// ```
pub fn income_tax_tariff(taxable: Decimal) -> Decimal {
    if taxable <= BASIC_ALLOWANCE {
        Decimal::ZERO
    } else if taxable <= ZONE_TWO_START {
        let y = (taxable - BASIC_ALLOWANCE) / TEN_THOUSAND;
        (Decimal::new(93230, 2) * y + money(1_400)) * y
    } else if taxable <= ZONE_THREE_START {
        let z = (taxable - ZONE_TWO_START) / TEN_THOUSAND;
        (Decimal::new(17664, 2) * z + money(2_397)) * z + Decimal::new(101513, 2)
    } else if taxable <= ZONE_FOUR_START {
        pct(42, 0) * taxable - Decimal::new(1091192, 2)
    } else {
        pct(45, 0) * taxable - Decimal::new(1924667, 2)
    }
}

/// Solidarity surcharge with the transition zone above the exemption.
pub fn solidarity_surcharge(income_tax: Decimal, married: bool) -> Decimal {
    let exemption = if married {
        SOLI_EXEMPTION * Decimal::from(2)
    } else {
        SOLI_EXEMPTION
    };
    non_negative((income_tax * SOLI_RATE).min((income_tax - exemption) * SOLI_TRANSITION_RATE))
}

struct Contributions {
    pension: Decimal,
    unemployment: Decimal,
    health: Decimal,
    care: Decimal,
    care_rate: Decimal,
    health_rate: Decimal,
}

fn contributions(gross: Decimal, options: &GermanyOptions) -> Contributions {
    let pension_base = non_negative(gross).min(PENSION_CEILING);
    let health_base = non_negative(gross).min(HEALTH_CEILING);
    let surcharge = if options.childless {
        CARE_CHILDLESS_SURCHARGE
    } else {
        Decimal::ZERO
    };

    match options.employment_type {
        EmploymentType::Employee => {
            let care_rate = match options.state {
                Some(GermanState::Sn) => CARE_RATE_SAXONY,
                _ => CARE_RATE,
            } + surcharge;
            Contributions {
                pension: pension_base * PENSION_RATE,
                unemployment: pension_base * UNEMPLOYMENT_RATE,
                health: health_base * HEALTH_RATE,
                care: health_base * care_rate,
                care_rate,
                health_rate: HEALTH_RATE,
            }
        }
        EmploymentType::SelfEmployed => {
            let care_rate = CARE_RATE_FULL + surcharge;
            Contributions {
                pension: Decimal::ZERO,
                unemployment: Decimal::ZERO,
                health: health_base * HEALTH_RATE_FULL,
                care: health_base * care_rate,
                care_rate,
                health_rate: HEALTH_RATE_FULL,
            }
        }
    }
}

/// Computes German take-home pay.
pub fn gross_to_net(gross: Decimal, options: &GermanyOptions) -> SalaryResult {
    let social = contributions(gross, options);
    let deductible_social = social.pension + social.health + social.care;
    let taxable = non_negative(gross - EMPLOYEE_LUMP_SUM - SPECIAL_EXPENSES_LUMP_SUM - deductible_social);

    let income_tax = if options.married {
        income_tax_tariff(taxable / Decimal::from(2)) * Decimal::from(2)
    } else {
        income_tax_tariff(taxable)
    };
    let soli = solidarity_surcharge(income_tax, options.married);
    let (church_tax, church_rate) = match (options.church_tax, options.state) {
        (false, _) => (Decimal::ZERO, CHURCH_TAX_RATE),
        (true, Some(state)) => (income_tax * state.church_tax_rate(), state.church_tax_rate()),
        (true, None) => (income_tax * CHURCH_TAX_RATE, CHURCH_TAX_RATE),
    };

    SalaryResult::builder(gross)
        .tax("Income tax", income_tax, None)
        .tax("Solidarity surcharge", soli, Some(SOLI_RATE))
        .tax("Church tax", church_tax, Some(church_rate))
        .social("Pension insurance", social.pension, Some(PENSION_RATE))
        .social("Unemployment insurance", social.unemployment, Some(UNEMPLOYMENT_RATE))
        .social("Health insurance", social.health, Some(social.health_rate))
        .social("Long-term care insurance", social.care, Some(social.care_rate))
        .build()
}
