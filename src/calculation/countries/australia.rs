//! Australia: income tax, LITO, Medicare levy, Medicare Levy Surcharge and
//! HELP repayments.
//!
//! The surcharge is charged on whole income once a tier is reached, which
//! on its own would make take-home pay fall at each tier threshold. Each
//! tier is instead entered at 25c per dollar above its threshold until the
//! full tier rate is reached. At the top tier that entry slope stacks on the
//! 37% band, the Medicare levy and the 17% HELP rate, and the sum must stay
//! below one dollar.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::brackets::{
    TaxBracket, band, money, non_negative, pct, phase_in, progressive_tax, taper, top_band,
};
use crate::models::SalaryResult;

/// Standard full-time hours per year (38 h x 52).
pub const HOURS_PER_YEAR: u32 = 1_976;
/// Standard working days per year.
pub const WORKING_DAYS_PER_YEAR: u32 = 260;
/// Initial gross/net ratio for net-to-gross inversion.
pub const NET_TO_GROSS_MULTIPLIER: Decimal = pct(130, 0);
/// Sole traders pay no separate self-employment levy.
pub const SELF_EMPLOYMENT_RATE: Decimal = Decimal::ZERO;

const RESIDENT: &[TaxBracket] = &[
    band(0, 18_200, Decimal::ZERO),
    band(18_200, 45_000, pct(16, 0)),
    band(45_000, 135_000, pct(30, 0)),
    band(135_000, 190_000, pct(37, 0)),
    top_band(190_000, pct(45, 0)),
];

const NON_RESIDENT: &[TaxBracket] = &[
    band(0, 135_000, pct(30, 0)),
    band(135_000, 190_000, pct(37, 0)),
    top_band(190_000, pct(45, 0)),
];

const LITO_MAX: Decimal = money(700);
const LITO_FIRST_TAPER_START: Decimal = money(37_500);
const LITO_FIRST_TAPER_END: Decimal = money(45_000);
const LITO_FIRST_TAPER_RATE: Decimal = pct(5, 0);
const LITO_SECOND_TAPER_RATE: Decimal = pct(15, 1);

const MEDICARE_RATE: Decimal = pct(2, 0);
const MEDICARE_LOW_INCOME_THRESHOLD: Decimal = money(27_222);
const MEDICARE_SHADE_IN_RATE: Decimal = pct(10, 0);

const SURCHARGE_TIERS: [(Decimal, Decimal); 3] = [
    (money(97_000), pct(1, 0)),
    (money(113_000), pct(125, 2)),
    (money(151_000), pct(15, 1)),
];
const SURCHARGE_ENTRY_RATE: Decimal = pct(25, 0);

const HELP_THRESHOLD: Decimal = money(67_000);
const HELP_UPPER_THRESHOLD: Decimal = money(125_000);
const HELP_RATE: Decimal = pct(15, 0);
const HELP_UPPER_RATE: Decimal = pct(17, 0);

/// Australia options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AustraliaOptions {
    /// Australian tax resident. Defaults to true.
    pub resident: bool,
    /// Holds private hospital cover, which exempts from the surcharge.
    pub private_health: bool,
    /// Has an outstanding HELP debt.
    pub help_debt: bool,
}

impl Default for AustraliaOptions {
    fn default() -> Self {
        Self {
            resident: true,
            private_health: false,
            help_debt: false,
        }
    }
}

/// Low Income Tax Offset for residents.
pub fn low_income_tax_offset(income: Decimal) -> Decimal {
    if income <= LITO_FIRST_TAPER_END {
        taper(LITO_MAX, income - LITO_FIRST_TAPER_START, LITO_FIRST_TAPER_RATE)
    } else {
        let after_first = LITO_MAX - (LITO_FIRST_TAPER_END - LITO_FIRST_TAPER_START) * LITO_FIRST_TAPER_RATE;
        taper(after_first, income - LITO_FIRST_TAPER_END, LITO_SECOND_TAPER_RATE)
    }
}

/// Medicare levy with the low-income shade-in.
pub fn medicare_levy(income: Decimal) -> Decimal {
    phase_in(
        non_negative(income) * MEDICARE_RATE,
        income - MEDICARE_LOW_INCOME_THRESHOLD,
        MEDICARE_SHADE_IN_RATE,
    )
}

/// Medicare Levy Surcharge for a single without private hospital cover.
pub fn medicare_levy_surcharge(income: Decimal) -> Decimal {
    let Some(tier) = SURCHARGE_TIERS
        .iter()
        .rposition(|(threshold, _)| income > *threshold)
    else {
        return Decimal::ZERO;
    };

    let (threshold, rate) = SURCHARGE_TIERS[tier];
    let carried = match tier {
        0 => Decimal::ZERO,
        _ => SURCHARGE_TIERS[tier - 1].1 * threshold,
    };
    (income * rate).min(carried + (income - threshold) * SURCHARGE_ENTRY_RATE)
}

/// HELP compulsory repayment on repayment income.
pub fn help_repayment(income: Decimal) -> Decimal {
    let lower = non_negative(income.min(HELP_UPPER_THRESHOLD) - HELP_THRESHOLD) * HELP_RATE;
    let upper = non_negative(income - HELP_UPPER_THRESHOLD) * HELP_UPPER_RATE;
    lower + upper
}

/// Computes Australian take-home pay.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::countries::australia::{AustraliaOptions, gross_to_net};
/// use rust_decimal::Decimal;
///
/// let result = gross_to_net(Decimal::from(80_000), &AustraliaOptions::default());
/// assert_eq!(result.net_salary, Decimal::from(63_612));
/// ```
pub fn gross_to_net(gross: Decimal, options: &AustraliaOptions) -> SalaryResult {
    let brackets = if options.resident { RESIDENT } else { NON_RESIDENT };
    let income_tax = progressive_tax(gross, brackets);

    let (lito, medicare) = if options.resident {
        (low_income_tax_offset(gross).min(income_tax), medicare_levy(gross))
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let surcharge = if options.resident && !options.private_health {
        medicare_levy_surcharge(gross)
    } else {
        Decimal::ZERO
    };

    let help = if options.help_debt {
        help_repayment(gross)
    } else {
        Decimal::ZERO
    };

    SalaryResult::builder(gross)
        .tax("Income tax", income_tax, None)
        .credit("Low Income Tax Offset", lito)
        .social("Medicare levy", medicare, Some(MEDICARE_RATE))
        .social("Medicare Levy Surcharge", surcharge, None)
        .deduction("HELP repayment", help)
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
    fn test_scales_are_well_formed() {
        assert!(validate_brackets(RESIDENT).is_ok());
        assert!(validate_brackets(NON_RESIDENT).is_ok());
    }

    #[test]
    fn test_resident_80k() {
        let result = gross_to_net(dec("80000"), &AustraliaOptions::default());
        assert_eq!(result.total_tax, dec("14788"));
        assert_eq!(result.social_security, dec("1600"));
        assert_eq!(result.net_salary, dec("63612"));
    }

    #[test]
    fn test_lito_reduces_tax_at_40k() {
        let result = gross_to_net(dec("40000"), &AustraliaOptions::default());
        // 3,488 - 575 LITO
        assert_eq!(result.total_tax, dec("2913"));
        assert_eq!(result.net_salary, dec("36287"));
    }

    #[test]
    fn test_lito_taper() {
        assert_eq!(low_income_tax_offset(dec("30000")), dec("700"));
        assert_eq!(low_income_tax_offset(dec("45000")), dec("325"));
        assert_eq!(low_income_tax_offset(dec("55000")), dec("175"));
        assert_eq!(low_income_tax_offset(dec("70000")), Decimal::ZERO);
    }

    #[test]
    fn test_medicare_shade_in() {
        assert_eq!(medicare_levy(dec("27000")), Decimal::ZERO);
        assert_eq!(medicare_levy(dec("30000")), dec("277.8"));
        assert_eq!(medicare_levy(dec("50000")), dec("1000"));
    }

    #[test]
    fn test_surcharge_tiers_are_entered_gradually() {
        assert_eq!(medicare_levy_surcharge(dec("97000")), Decimal::ZERO);
        assert_eq!(medicare_levy_surcharge(dec("98000")), dec("250"));
        assert_eq!(medicare_levy_surcharge(dec("100000")), dec("750"));
        assert_eq!(medicare_levy_surcharge(dec("110000")), dec("1100"));
        assert_eq!(medicare_levy_surcharge(dec("120000")), dec("1500"));
        assert_eq!(medicare_levy_surcharge(dec("200000")), dec("3000"));
    }

    #[test]
    fn test_private_cover_removes_surcharge() {
        let uncovered = gross_to_net(dec("120000"), &AustraliaOptions::default());
        let covered = gross_to_net(
            dec("120000"),
            &AustraliaOptions {
                private_health: true,
                ..Default::default()
            },
        );
        assert_eq!(uncovered.net_salary + dec("1500"), covered.net_salary);
    }

    #[test]
    fn test_non_resident_has_no_tax_free_threshold_or_medicare() {
        let result = gross_to_net(
            dec("80000"),
            &AustraliaOptions {
                resident: false,
                ..Default::default()
            },
        );
        assert_eq!(result.total_tax, dec("24000"));
        assert_eq!(result.social_security, Decimal::ZERO);
    }

    #[test]
    fn test_help_repayment() {
        assert_eq!(help_repayment(dec("60000")), Decimal::ZERO);
        assert_eq!(help_repayment(dec("80000")), dec("1950"));
        assert_eq!(help_repayment(dec("135000")), dec("10400"));

        let result = gross_to_net(
            dec("80000"),
            &AustraliaOptions {
                help_debt: true,
                ..Default::default()
            },
        );
        assert_eq!(result.other_deductions, dec("1950"));
    }

    #[test]
    fn test_top_surcharge_tier_with_help_keeps_net_rising() {
        let options = AustraliaOptions {
            help_debt: true,
            ..Default::default()
        };
        let mut previous = gross_to_net(dec("150500"), &options).net_salary;
        for step in 1..=40 {
            let gross = dec("150500") + Decimal::from(step * 50);
            let net = gross_to_net(gross, &options).net_salary;
            assert!(net >= previous, "net fell from {} to {} at {}", previous, net, gross);
            previous = net;
        }
    }

    #[test]
    fn test_combined_marginal_rate_stays_below_one() {
        let options = AustraliaOptions {
            help_debt: true,
            ..Default::default()
        };
        for start in ["97000", "113000", "151000"] {
            let low = gross_to_net(dec(start), &options).net_salary;
            let high = gross_to_net(dec(start) + dec("100"), &options).net_salary;
            let kept = high - low;
            assert!(kept > dec("10"), "only {} of 100 kept above {}", kept, start);
        }
    }
}
