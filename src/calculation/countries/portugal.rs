//! Portugal: social security and IRS (2025).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::brackets::{
    TaxBracket, band, money, non_negative, pct, progressive_tax, top_band,
};
use crate::models::SalaryResult;

/// Standard full-time hours per year.
pub const HOURS_PER_YEAR: u32 = 2_080;
/// Standard working days per year.
pub const WORKING_DAYS_PER_YEAR: u32 = 260;
/// Initial gross/net ratio for net-to-gross inversion.
pub const NET_TO_GROSS_MULTIPLIER: Decimal = pct(140, 0);
/// Effective independent-worker contribution (21.4% on 70% of income).
pub const SELF_EMPLOYMENT_RATE: Decimal = pct(15, 0);

const SOCIAL_SECURITY_RATE: Decimal = pct(11, 0);
const SPECIFIC_DEDUCTION: Decimal = Decimal::from_parts(446_215, 0, 0, false, 2);
const DEPENDANT_CREDIT: Decimal = money(600);
const EXISTENCE_MINIMUM: Decimal = money(12_180);
const NHR_RATE: Decimal = pct(20, 0);

const IRS: &[TaxBracket] = &[
    band(0, 8_059, pct(13, 0)),
    band(8_059, 12_160, pct(165, 1)),
    band(12_160, 17_233, pct(22, 0)),
    band(17_233, 22_306, pct(25, 0)),
    band(22_306, 28_400, pct(32, 0)),
    band(28_400, 41_629, pct(355, 1)),
    band(41_629, 44_987, pct(435, 1)),
    band(44_987, 83_696, pct(45, 0)),
    top_band(83_696, pct(48, 0)),
];

const SOLIDARITY: &[TaxBracket] = &[
    band(0, 80_000, Decimal::ZERO),
    band(80_000, 250_000, pct(25, 1)),
    top_band(250_000, pct(5, 0)),
];

/// Portugal options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortugalOptions {
    /// Joint filing with income splitting.
    pub married: bool,
    /// Dependants for the per-dependant tax credit.
    pub dependents: u32,
    /// Non-habitual resident flat rate on employment income.
    pub non_habitual_resident: bool,
}

/// Computes Portuguese take-home pay.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::countries::portugal::{PortugalOptions, gross_to_net};
/// use rust_decimal::Decimal;
///
/// let result = gross_to_net(Decimal::from(30_000), &PortugalOptions::default());
/// assert_eq!(result.net_salary, Decimal::new(21_557_163, 3));
/// ```
pub fn gross_to_net(gross: Decimal, options: &PortugalOptions) -> SalaryResult {
    let social_security = non_negative(gross) * SOCIAL_SECURITY_RATE;
    let specific_deduction = SPECIFIC_DEDUCTION.max(social_security).min(non_negative(gross));
    let taxable = non_negative(gross - specific_deduction);

    let (irs, rate) = if options.non_habitual_resident {
        (taxable * NHR_RATE, Some(NHR_RATE))
    } else if options.married {
        let two = Decimal::from(2);
        (progressive_tax(taxable / two, IRS) * two, None)
    } else {
        (progressive_tax(taxable, IRS), None)
    };

    let dependants = (DEPENDANT_CREDIT * Decimal::from(options.dependents)).min(irs);
    let after_credits = irs - dependants;
    // IRS may not take income after contributions below the existence minimum.
    let existence_relief = if options.non_habitual_resident {
        Decimal::ZERO
    } else {
        non_negative(after_credits - non_negative(gross - social_security - EXISTENCE_MINIMUM))
    };
    let solidarity = progressive_tax(taxable, SOLIDARITY);

    SalaryResult::builder(gross)
        .tax("IRS", irs, rate)
        .credit("Dependants credit", dependants)
        .credit("Existence minimum", existence_relief)
        .tax("Solidarity surcharge", solidarity, None)
        .social("Social security", social_security, Some(SOCIAL_SECURITY_RATE))
        .build()
}
