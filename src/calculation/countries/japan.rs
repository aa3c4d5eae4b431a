//! Japan: employee social insurance, national income tax with the
//! reconstruction surtax, and resident tax (2025).
//!
//! Social insurance premiums are deductible from employment income for
//! both national and resident tax. The basic and spouse deductions, which
//! statute withdraws in steps at high incomes, are withdrawn linearly here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::brackets::{
    TaxBracket, band, money, non_negative, pct, phase_in, progressive_tax, taper, top_band,
};
use crate::models::SalaryResult;

/// Standard full-time hours per year.
pub const HOURS_PER_YEAR: u32 = 2_080;
/// Standard working days per year.
pub const WORKING_DAYS_PER_YEAR: u32 = 260;
/// Initial gross/net ratio for net-to-gross inversion.
pub const NET_TO_GROSS_MULTIPLIER: Decimal = pct(130, 0);
/// Approximate combined national health and pension levy for sole proprietors.
pub const SELF_EMPLOYMENT_RATE: Decimal = pct(10, 0);

const HEALTH_RATE: Decimal = pct(4955, 3);
const HEALTH_CAP: Decimal = money(16_680_000);
const NURSING_CARE_RATE: Decimal = pct(8, 1);
const PENSION_RATE: Decimal = pct(915, 2);
const PENSION_CAP: Decimal = money(7_800_000);
const EMPLOYMENT_INSURANCE_RATE: Decimal = pct(55, 2);

const NATIONAL_BASIC_DEDUCTION: Decimal = money(480_000);
const RESIDENT_BASIC_DEDUCTION: Decimal = money(430_000);
const BASIC_DEDUCTION_TAPER_START: Decimal = money(24_000_000);
const NATIONAL_SPOUSE_DEDUCTION: Decimal = money(380_000);
const RESIDENT_SPOUSE_DEDUCTION: Decimal = money(330_000);
const SPOUSE_DEDUCTION_TAPER_START: Decimal = money(9_000_000);
const NATIONAL_DEPENDANT_DEDUCTION: Decimal = money(380_000);
const RESIDENT_DEPENDANT_DEDUCTION: Decimal = money(330_000);
/// Deductions are fully withdrawn over one million yen.
const TAPER_WIDTH: Decimal = money(1_000_000);

const RECONSTRUCTION_SURTAX_RATE: Decimal = pct(21, 1);
const RESIDENT_TAX_RATE: Decimal = pct(10, 0);
const PER_CAPITA_LEVY: Decimal = money(5_000);
const PER_CAPITA_THRESHOLD: Decimal = money(1_000_000);
const PER_CAPITA_ENTRY_RATE: Decimal = pct(10, 0);

const NATIONAL: &[TaxBracket] = &[
    band(0, 1_950_000, pct(5, 0)),
    band(1_950_000, 3_300_000, pct(10, 0)),
    band(3_300_000, 6_950_000, pct(20, 0)),
    band(6_950_000, 9_000_000, pct(23, 0)),
    band(9_000_000, 18_000_000, pct(33, 0)),
    band(18_000_000, 40_000_000, pct(40, 0)),
    top_band(40_000_000, pct(45, 0)),
];

/// Japan options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JapanOptions {
    /// Dependants other than a spouse.
    pub dependents: u32,
    /// Claims the spouse deduction.
    pub spouse_deduction: bool,
    /// Age in years; 40 to 64 pay nursing-care insurance.
    pub age: u32,
}

impl Default for JapanOptions {
    fn default() -> Self {
        Self {
            dependents: 0,
            spouse_deduction: false,
            age: 30,
        }
    }
}

/// Employment income deduction (kyuyo shotoku kojo).
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::countries::japan::employment_income_deduction;
/// use rust_decimal::Decimal;
///
/// assert_eq!(employment_income_deduction(Decimal::from(5_000_000)), Decimal::from(1_440_000));
/// ```
pub fn employment_income_deduction(gross: Decimal) -> Decimal {
    let deduction = if gross <= money(1_900_000) {
        money(650_000)
    } else if gross <= money(3_600_000) {
        gross * pct(30, 0) + money(80_000)
    } else if gross <= money(6_600_000) {
        gross * pct(20, 0) + money(440_000)
    } else if gross <= money(8_500_000) {
        gross * pct(10, 0) + money(1_100_000)
    } else {
        money(1_950_000)
    };
    deduction.min(non_negative(gross))
}

fn withdrawn_linearly(amount: Decimal, income: Decimal, start: Decimal) -> Decimal {
    taper(amount, income - start, amount / TAPER_WIDTH)
}

/// Computes Japanese take-home pay.
pub fn gross_to_net(gross: Decimal, options: &JapanOptions) -> SalaryResult {
    let gross_floor = non_negative(gross);
    let health = gross_floor.min(HEALTH_CAP) * HEALTH_RATE;
    let nursing = if (40..65).contains(&options.age) {
        gross_floor.min(HEALTH_CAP) * NURSING_CARE_RATE
    } else {
        Decimal::ZERO
    };
    let pension = gross_floor.min(PENSION_CAP) * PENSION_RATE;
    let employment_insurance = gross_floor * EMPLOYMENT_INSURANCE_RATE;
    let social = health + nursing + pension + employment_insurance;

    let income = gross - employment_income_deduction(gross) - social;
    let dependants = Decimal::from(options.dependents);
    let (national_spouse, resident_spouse) = if options.spouse_deduction {
        (
            withdrawn_linearly(NATIONAL_SPOUSE_DEDUCTION, income, SPOUSE_DEDUCTION_TAPER_START),
            withdrawn_linearly(RESIDENT_SPOUSE_DEDUCTION, income, SPOUSE_DEDUCTION_TAPER_START),
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let national_taxable = non_negative(
        income
            - withdrawn_linearly(NATIONAL_BASIC_DEDUCTION, income, BASIC_DEDUCTION_TAPER_START)
            - national_spouse
            - NATIONAL_DEPENDANT_DEDUCTION * dependants,
    );
    let resident_taxable = non_negative(
        income
            - withdrawn_linearly(RESIDENT_BASIC_DEDUCTION, income, BASIC_DEDUCTION_TAPER_START)
            - resident_spouse
            - RESIDENT_DEPENDANT_DEDUCTION * dependants,
    );

    let national_tax = progressive_tax(national_taxable, NATIONAL);
    let surtax = national_tax * RECONSTRUCTION_SURTAX_RATE;
    let resident_tax = resident_taxable * RESIDENT_TAX_RATE;
    let per_capita = phase_in(PER_CAPITA_LEVY, gross - PER_CAPITA_THRESHOLD, PER_CAPITA_ENTRY_RATE);

    SalaryResult::builder(gross)
        .tax("National income tax", national_tax, None)
        .tax("Reconstruction surtax", surtax, Some(RECONSTRUCTION_SURTAX_RATE))
        .tax("Resident tax", resident_tax, Some(RESIDENT_TAX_RATE))
        .tax("Resident tax per-capita levy", per_capita, None)
        .social("Health insurance", health, Some(HEALTH_RATE))
        .social("Nursing care insurance", nursing, Some(NURSING_CARE_RATE))
        .social("Employees' pension insurance", pension, Some(PENSION_RATE))
        .social("Employment insurance", employment_insurance, Some(EMPLOYMENT_INSURANCE_RATE))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::brackets::validate_brackets;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_national_scale_is_well_formed() {
        assert!(validate_brackets(NATIONAL).is_ok());
    }

    #[test]
    fn test_five_million_yen() {
        let result = gross_to_net(dec("5000000"), &JapanOptions::default());
        assert_eq!(result.social_security, dec("732750"));
        assert_eq!(result.total_tax, dec("384831.725"));
        assert_eq!(result.net_salary, dec("3882418.275"));
    }

    #[test]
    fn test_nursing_care_from_forty() {
        let young = gross_to_net(dec("5000000"), &JapanOptions::default());
        let older = gross_to_net(
            dec("5000000"),
            &JapanOptions {
                age: 45,
                ..Default::default()
            },
        );
        assert_eq!(older.social_security - young.social_security, dec("40000"));
    }

    #[test]
    fn test_employment_income_deduction_segments() {
        assert_eq!(employment_income_deduction(dec("500000")), dec("500000"));
        assert_eq!(employment_income_deduction(dec("1500000")), dec("650000"));
        assert_eq!(employment_income_deduction(dec("3000000")), dec("980000"));
        assert_eq!(employment_income_deduction(dec("8000000")), dec("1900000"));
        assert_eq!(employment_income_deduction(dec("20000000")), dec("1950000"));
    }

    #[test]
    fn test_dependants_and_spouse_lower_tax() {
        let base = gross_to_net(dec("6000000"), &JapanOptions::default());
        let family = gross_to_net(
            dec("6000000"),
            &JapanOptions {
                dependents: 2,
                spouse_deduction: true,
                ..Default::default()
            },
        );
        assert!(family.total_tax < base.total_tax);
        assert_eq!(family.social_security, base.social_security);
    }

    #[test]
    fn test_basic_deduction_withdrawal() {
        let start = BASIC_DEDUCTION_TAPER_START;
        assert_eq!(
            withdrawn_linearly(NATIONAL_BASIC_DEDUCTION, start, start),
            dec("480000")
        );
        assert_eq!(
            withdrawn_linearly(NATIONAL_BASIC_DEDUCTION, start + dec("500000"), start),
            dec("240000")
        );
        assert_eq!(
            withdrawn_linearly(NATIONAL_BASIC_DEDUCTION, start + dec("2000000"), start),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_pension_cap() {
        let result = gross_to_net(dec("12000000"), &JapanOptions::default());
        let pension = result
            .breakdown
            .iter()
            .find(|item| item.label == "Employees' pension insurance")
            .map(|item| item.amount)
            .unwrap();
        assert_eq!(pension, dec("713700"));
    }

    #[test]
    fn test_low_income_pays_no_income_tax() {
        let result = gross_to_net(dec("900000"), &JapanOptions::default());
        assert_eq!(result.total_tax, Decimal::ZERO);
    }
}
