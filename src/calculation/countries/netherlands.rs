//! Netherlands: box 1 income tax and national insurance premiums (2025).
//!
//! The first band rate combines 8.17% tax with 27.65% national insurance
//! premiums. Tax credits are offset against the combined levy, and what
//! remains is split between tax and premiums in proportion to their share
//! of the levy before credits.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::brackets::{
    TaxBracket, band, money, non_negative, pct, progressive_tax, taper, top_band,
};
use crate::models::SalaryResult;

/// Standard full-time hours per year.
pub const HOURS_PER_YEAR: u32 = 2_080;
/// Standard working days per year.
pub const WORKING_DAYS_PER_YEAR: u32 = 260;
/// Initial gross/net ratio for net-to-gross inversion.
pub const NET_TO_GROSS_MULTIPLIER: Decimal = pct(145, 0);
/// Income-related health insurance contribution for the self-employed.
pub const SELF_EMPLOYMENT_RATE: Decimal = pct(526, 2);

const BOX_ONE: &[TaxBracket] = &[
    band(0, 38_441, pct(3582, 2)),
    band(38_441, 76_817, pct(3748, 2)),
    top_band(76_817, pct(4950, 2)),
];

const PREMIUM_CEILING: Decimal = money(38_441);
const PREMIUM_RATE: Decimal = pct(2765, 2);

const GENERAL_CREDIT_MAX: Decimal = money(3_068);
const GENERAL_CREDIT_TAPER_START: Decimal = money(28_406);
const GENERAL_CREDIT_TAPER_RATE: Decimal = pct(6337, 3);

const THIRTY_PERCENT_RULING: Decimal = pct(30, 0);
const RULING_SALARY_CAP: Decimal = money(246_000);

/// Netherlands options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetherlandsOptions {
    /// 30% of salary paid tax-free under the expat ruling.
    pub thirty_percent_ruling: bool,
}

/// General tax credit (algemene heffingskorting).
pub fn general_tax_credit(taxable: Decimal) -> Decimal {
    taper(
        GENERAL_CREDIT_MAX,
        taxable - GENERAL_CREDIT_TAPER_START,
        GENERAL_CREDIT_TAPER_RATE,
    )
}

/// Labour tax credit (arbeidskorting) on employment income.
pub fn labour_tax_credit(income: Decimal) -> Decimal {
    let income = non_negative(income);
    if income <= money(12_169) {
        income * pct(8053, 3)
    } else if income <= money(26_288) {
        money(980) + (income - money(12_169)) * pct(30030, 3)
    } else if income <= money(43_071) {
        money(5_220) + (income - money(26_288)) * pct(2258, 3)
    } else {
        taper(money(5_599), income - money(43_071), pct(6510, 3))
    }
}

/// Computes Dutch take-home pay.
pub fn gross_to_net(gross: Decimal, options: &NetherlandsOptions) -> SalaryResult {
    let exempt = if options.thirty_percent_ruling {
        non_negative(gross).min(RULING_SALARY_CAP) * THIRTY_PERCENT_RULING
    } else {
        Decimal::ZERO
    };
    let taxable = gross - exempt;

    let levy = progressive_tax(taxable, BOX_ONE);
    let premiums_before_credits = non_negative(taxable).min(PREMIUM_CEILING) * PREMIUM_RATE;
    let premium_share = if levy.is_zero() {
        Decimal::ZERO
    } else {
        premiums_before_credits / levy
    };

    let credits = (general_tax_credit(taxable) + labour_tax_credit(taxable)).min(levy);
    let tax_share = Decimal::ONE - premium_share;
    let premiums = (levy - credits) * premium_share;

    SalaryResult::builder(gross)
        .tax("Income tax", levy * tax_share, None)
        .credit("General and labour tax credits", credits * tax_share)
        .social("National insurance premiums", premiums, Some(PREMIUM_RATE))
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
    fn test_box_one_is_well_formed() {
        assert!(validate_brackets(BOX_ONE).is_ok());
    }

    #[test]
    fn test_50k() {
        let result = gross_to_net(dec("50000"), &NetherlandsOptions::default());
        let levy_after_credits = result.total_tax + result.social_security;
        assert_eq!(levy_after_credits.round_dp(4), dec("11254.3691"));
        assert_eq!(result.rounded().net_salary, dec("38745.63"));
    }

    #[test]
    fn test_credits_never_push_tax_below_zero() {
        let result = gross_to_net(dec("10000"), &NetherlandsOptions::default());
        assert!(result.total_tax >= Decimal::ZERO);
        assert!(result.social_security >= Decimal::ZERO);
        assert_eq!(result.net_salary, dec("10000"));
    }

    #[test]
    fn test_premiums_only_in_first_band() {
        let low = gross_to_net(dec("30000"), &NetherlandsOptions::default());
        let high = gross_to_net(dec("150000"), &NetherlandsOptions::default());
        // credits are fully phased out at 150k, so premiums are the full first-band share
        assert_eq!(high.social_security.round_dp(4), dec("10628.9365"));
        assert!(low.social_security < high.social_security);
    }

    #[test]
    fn test_general_credit_taper() {
        assert_eq!(general_tax_credit(dec("20000")), dec("3068"));
        assert_eq!(general_tax_credit(dec("80000")), Decimal::ZERO);
    }

    #[test]
    fn test_labour_credit_segments() {
        assert_eq!(labour_tax_credit(dec("10000")), dec("805.3"));
        assert_eq!(labour_tax_credit(dec("20000")), dec("3331.6493"));
        assert_eq!(labour_tax_credit(dec("30000")), dec("5303.81696"));
        assert_eq!(labour_tax_credit(dec("200000")), Decimal::ZERO);
    }

    #[test]
    fn test_thirty_percent_ruling_raises_net() {
        let standard = gross_to_net(dec("90000"), &NetherlandsOptions::default());
        let ruling = gross_to_net(
            dec("90000"),
            &NetherlandsOptions {
                thirty_percent_ruling: true,
            },
        );
        assert!(ruling.net_salary > standard.net_salary);
    }
}
