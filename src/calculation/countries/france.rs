//! France: employee social contributions, CSG/CRDS and income tax with the
//! family quotient.
//!
//! Order of operations: contributions are taken from gross; deductible
//! contributions give net taxable pay; the 10% professional expense
//! allowance gives net taxable income, which is divided by the household's
//! parts, taxed per part and multiplied back. The quotient advantage is
//! capped per half-part above the base household, and the décote then
//! reduces small tax bills.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::brackets::{
    TaxBracket, band, money, non_negative, pct, progressive_tax, top_band,
};
use crate::models::SalaryResult;

/// Legal hours per year (35 h week).
pub const HOURS_PER_YEAR: u32 = 1_607;
/// Working days per year under the annual day-count regime.
pub const WORKING_DAYS_PER_YEAR: u32 = 218;
/// Initial gross/net ratio for net-to-gross inversion.
pub const NET_TO_GROSS_MULTIPLIER: Decimal = pct(140, 0);
/// Average contribution rate on self-employed income.
pub const SELF_EMPLOYMENT_RATE: Decimal = pct(22, 0);

/// Annual social security ceiling (PASS).
const SOCIAL_SECURITY_CEILING: Decimal = money(47_100);
const SUPPLEMENTARY_CEILING: Decimal = money(376_800);

const OLD_AGE_CAPPED_RATE: Decimal = pct(69, 1);
const OLD_AGE_UNCAPPED_RATE: Decimal = pct(4, 1);
const SUPPLEMENTARY_T1_RATE: Decimal = pct(315, 2);
const SUPPLEMENTARY_T2_RATE: Decimal = pct(864, 2);
const CEG_T1_RATE: Decimal = pct(86, 2);
const CEG_T2_RATE: Decimal = pct(108, 2);

const CSG_BASE_RATIO: Decimal = pct(9825, 2);
const CSG_DEDUCTIBLE_RATE: Decimal = pct(68, 1);
const CSG_NON_DEDUCTIBLE_RATE: Decimal = pct(24, 1);
const CRDS_RATE: Decimal = pct(5, 1);

const PROFESSIONAL_EXPENSE_RATE: Decimal = pct(10, 0);
const PROFESSIONAL_EXPENSE_MIN: Decimal = money(504);
const PROFESSIONAL_EXPENSE_MAX: Decimal = money(14_171);

const HALF_PART_CAP: Decimal = money(1_791);

const DECOTE_SINGLE: Decimal = money(873);
const DECOTE_COUPLE: Decimal = money(1_444);
const DECOTE_RATE: Decimal = pct(4525, 2);

const INCOME_TAX: &[TaxBracket] = &[
    band(0, 11_497, Decimal::ZERO),
    band(11_497, 29_315, pct(11, 0)),
    band(29_315, 83_823, pct(30, 0)),
    band(83_823, 180_294, pct(41, 0)),
    top_band(180_294, pct(45, 0)),
];

/// France options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FranceOptions {
    /// Married or PACS couple taxed jointly.
    pub married: bool,
    /// Dependent children in the household.
    pub children: u32,
}

/// Number of household parts for the family quotient.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::countries::france::household_parts;
/// use rust_decimal::Decimal;
///
/// assert_eq!(household_parts(true, 2), Decimal::from(3));
/// assert_eq!(household_parts(false, 3), Decimal::from(3));
/// ```
pub fn household_parts(married: bool, children: u32) -> Decimal {
    let adults = if married { Decimal::from(2) } else { Decimal::ONE };
    let first_two = Decimal::from(children.min(2)) / Decimal::from(2);
    let further = Decimal::from(children.saturating_sub(2));
    adults + first_two + further
}

/// Income tax on net taxable income after the family quotient, its cap and the décote.
pub fn income_tax(net_taxable_income: Decimal, married: bool, children: u32) -> Decimal {
    let base_parts = if married { Decimal::from(2) } else { Decimal::ONE };
    let parts = household_parts(married, children);

    let per_part = |parts: Decimal| progressive_tax(net_taxable_income / parts, INCOME_TAX) * parts;
    let with_quotient = per_part(parts);
    let without_children = per_part(base_parts);
    let half_parts = (parts - base_parts) * Decimal::from(2);
    let tax = with_quotient.max(without_children - half_parts * HALF_PART_CAP);

    let decote_ceiling = if married { DECOTE_COUPLE } else { DECOTE_SINGLE };
    let decote = non_negative(decote_ceiling - tax * DECOTE_RATE);
    non_negative(tax - decote)
}

fn professional_expenses(net_taxable_pay: Decimal) -> Decimal {
    (net_taxable_pay * PROFESSIONAL_EXPENSE_RATE)
        .max(PROFESSIONAL_EXPENSE_MIN)
        .min(PROFESSIONAL_EXPENSE_MAX)
        .min(non_negative(net_taxable_pay))
}

/// Computes French take-home pay.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::countries::france::{FranceOptions, gross_to_net};
/// use rust_decimal::Decimal;
///
/// let result = gross_to_net(Decimal::from(60_000), &FranceOptions::default());
/// assert_eq!(result.rounded().net_salary, Decimal::new(4115697, 2));
/// ```
pub fn gross_to_net(gross: Decimal, options: &FranceOptions) -> SalaryResult {
    let gross_floor = non_negative(gross);
    let tranche_1 = gross_floor.min(SOCIAL_SECURITY_CEILING);
    let tranche_2 = non_negative(gross_floor.min(SUPPLEMENTARY_CEILING) - SOCIAL_SECURITY_CEILING);

    let old_age = tranche_1 * OLD_AGE_CAPPED_RATE + gross_floor * OLD_AGE_UNCAPPED_RATE;
    let supplementary = tranche_1 * SUPPLEMENTARY_T1_RATE + tranche_2 * SUPPLEMENTARY_T2_RATE;
    let ceg = tranche_1 * CEG_T1_RATE + tranche_2 * CEG_T2_RATE;

    let csg_base = gross_floor * CSG_BASE_RATIO;
    let csg_deductible = csg_base * CSG_DEDUCTIBLE_RATE;
    let csg_non_deductible = csg_base * CSG_NON_DEDUCTIBLE_RATE;
    let crds = csg_base * CRDS_RATE;

    let deductible = old_age + supplementary + ceg + csg_deductible;
    let net_taxable_pay = gross - deductible;
    let net_taxable_income = net_taxable_pay - professional_expenses(net_taxable_pay);
    let tax = income_tax(net_taxable_income, options.married, options.children);

    SalaryResult::builder(gross)
        .tax("Income tax", tax, None)
        .social("Old-age insurance", old_age, None)
        .social("AGIRC-ARRCO supplementary pension", supplementary, None)
        .social("CEG", ceg, None)
        .social("CSG (deductible)", csg_deductible, Some(CSG_DEDUCTIBLE_RATE))
        .social("CSG (non-deductible)", csg_non_deductible, Some(CSG_NON_DEDUCTIBLE_RATE))
        .social("CRDS", crds, Some(CRDS_RATE))
        .build()
}
