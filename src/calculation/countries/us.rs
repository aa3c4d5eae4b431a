//! United States federal, FICA and state withholding (2025).
//!
//! Federal tax applies the filing-status brackets to wages less pre-tax
//! contributions and the standard deduction. Social Security and Medicare
//! are levied on wages less HSA contributions (cafeteria-plan treatment);
//! 401(k) deferrals stay subject to FICA.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::brackets::{
    TaxBracket, band, money, non_negative, pct, progressive_tax, taper, top_band,
};
use crate::calculation::us_state::get_state_tax_info;
use crate::error::{EngineError, EngineResult};
use crate::models::SalaryResult;

/// Standard full-time hours per year (40 h x 52).
pub const HOURS_PER_YEAR: u32 = 2_080;
/// Standard working days per year.
pub const WORKING_DAYS_PER_YEAR: u32 = 260;
/// Initial gross/net ratio for net-to-gross inversion.
pub const NET_TO_GROSS_MULTIPLIER: Decimal = pct(140, 0);
/// Self-employment tax (Social Security + Medicare, both halves).
pub const SELF_EMPLOYMENT_RATE: Decimal = pct(153, 1);

const SOCIAL_SECURITY_RATE: Decimal = pct(62, 1);
const SOCIAL_SECURITY_WAGE_BASE: Decimal = money(176_100);
const MEDICARE_RATE: Decimal = pct(145, 2);
const ADDITIONAL_MEDICARE_RATE: Decimal = pct(9, 1);
const CHILD_TAX_CREDIT: Decimal = money(2_200);
const CHILD_TAX_CREDIT_PHASE_OUT: Decimal = pct(5, 0);

const SINGLE: &[TaxBracket] = &[
    band(0, 11_925, pct(10, 0)),
    band(11_925, 48_475, pct(12, 0)),
    band(48_475, 103_350, pct(22, 0)),
    band(103_350, 197_300, pct(24, 0)),
    band(197_300, 250_525, pct(32, 0)),
    band(250_525, 626_350, pct(35, 0)),
    top_band(626_350, pct(37, 0)),
];

const MARRIED_JOINT: &[TaxBracket] = &[
    band(0, 23_850, pct(10, 0)),
    band(23_850, 96_950, pct(12, 0)),
    band(96_950, 206_700, pct(22, 0)),
    band(206_700, 394_600, pct(24, 0)),
    band(394_600, 501_050, pct(32, 0)),
    band(501_050, 751_600, pct(35, 0)),
    top_band(751_600, pct(37, 0)),
];

const MARRIED_SEPARATE: &[TaxBracket] = &[
    band(0, 11_925, pct(10, 0)),
    band(11_925, 48_475, pct(12, 0)),
    band(48_475, 103_350, pct(22, 0)),
    band(103_350, 197_300, pct(24, 0)),
    band(197_300, 250_525, pct(32, 0)),
    band(250_525, 375_800, pct(35, 0)),
    top_band(375_800, pct(37, 0)),
];

const HEAD_OF_HOUSEHOLD: &[TaxBracket] = &[
    band(0, 17_000, pct(10, 0)),
    band(17_000, 64_850, pct(12, 0)),
    band(64_850, 103_350, pct(22, 0)),
    band(103_350, 197_300, pct(24, 0)),
    band(197_300, 250_500, pct(32, 0)),
    band(250_500, 626_350, pct(35, 0)),
    top_band(626_350, pct(37, 0)),
];

/// Federal filing status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    /// Single filer.
    #[default]
    Single,
    /// Married filing jointly.
    MarriedJoint,
    /// Married filing separately.
    MarriedSeparate,
    /// Head of household.
    HeadOfHousehold,
}

impl FilingStatus {
    /// Federal brackets for this status.
    pub fn brackets(&self) -> &'static [TaxBracket] {
        match self {
            FilingStatus::Single => SINGLE,
            FilingStatus::MarriedJoint => MARRIED_JOINT,
            FilingStatus::MarriedSeparate => MARRIED_SEPARATE,
            FilingStatus::HeadOfHousehold => HEAD_OF_HOUSEHOLD,
        }
    }

    /// Standard deduction for this status.
    pub fn standard_deduction(&self) -> Decimal {
        match self {
            FilingStatus::Single | FilingStatus::MarriedSeparate => money(15_750),
            FilingStatus::MarriedJoint => money(31_500),
            FilingStatus::HeadOfHousehold => money(23_625),
        }
    }

    fn additional_medicare_threshold(&self) -> Decimal {
        match self {
            FilingStatus::Single | FilingStatus::HeadOfHousehold => money(200_000),
            FilingStatus::MarriedJoint => money(250_000),
            FilingStatus::MarriedSeparate => money(125_000),
        }
    }

    fn child_credit_phase_out_start(&self) -> Decimal {
        match self {
            FilingStatus::MarriedJoint => money(400_000),
            _ => money(200_000),
        }
    }
}

impl FromStr for FilingStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(FilingStatus::Single),
            "married_joint" | "married" | "mfj" => Ok(FilingStatus::MarriedJoint),
            "married_separate" | "mfs" => Ok(FilingStatus::MarriedSeparate),
            "head_of_household" | "hoh" => Ok(FilingStatus::HeadOfHousehold),
            other => Err(EngineError::InvalidOption {
                field: "us_filing_status".to_string(),
                message: format!("unknown filing status '{}'", other),
            }),
        }
    }
}

/// United States options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsOptions {
    /// Federal filing status. Defaults to single.
    pub filing_status: FilingStatus,
    /// State postal code. `None` means no state tax is computed.
    pub state: Option<String>,
    /// Annual pre-tax 401(k) deferral.
    pub contribution_401k: Decimal,
    /// Annual pre-tax HSA contribution.
    pub hsa_contribution: Decimal,
    /// Qualifying children for the child tax credit.
    pub dependents: u32,
}

/// Computes US take-home pay.
///
/// # Errors
///
/// Returns [`EngineError::UnknownStateCode`] if `options.state` is not a
/// state in the table.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::countries::us::{UsOptions, gross_to_net};
/// use rust_decimal::Decimal;
///
/// let options = UsOptions { state: Some("TX".to_string()), ..Default::default() };
/// let result = gross_to_net(Decimal::from(75_000), &options).unwrap();
/// assert_eq!(result.net_salary, Decimal::new(613135, 1));
/// ```
pub fn gross_to_net(gross: Decimal, options: &UsOptions) -> EngineResult<SalaryResult> {
    let status = options.filing_status;
    let pre_tax = options.contribution_401k + options.hsa_contribution;
    let adjusted_income = gross - pre_tax;

    let federal_taxable = non_negative(adjusted_income - status.standard_deduction());
    let federal_before_credits = progressive_tax(federal_taxable, status.brackets());

    let child_credit = taper(
        CHILD_TAX_CREDIT * Decimal::from(options.dependents),
        adjusted_income - status.child_credit_phase_out_start(),
        CHILD_TAX_CREDIT_PHASE_OUT,
    );
    let applied_child_credit = child_credit.min(federal_before_credits);

    let state_tax = match &options.state {
        Some(code) => get_state_tax_info(code)?.tax(adjusted_income),
        None => Decimal::ZERO,
    };
    let state_label = match &options.state {
        Some(code) => format!("State income tax ({})", code.trim().to_ascii_uppercase()),
        None => "State income tax".to_string(),
    };

    let fica_wages = non_negative(gross - options.hsa_contribution);
    let social_security = fica_wages.min(SOCIAL_SECURITY_WAGE_BASE) * SOCIAL_SECURITY_RATE;
    let medicare = fica_wages * MEDICARE_RATE;
    let additional_medicare =
        non_negative(fica_wages - status.additional_medicare_threshold()) * ADDITIONAL_MEDICARE_RATE;

    Ok(SalaryResult::builder(gross)
        .tax("Federal income tax", federal_before_credits, None)
        .credit("Child tax credit", applied_child_credit)
        .tax(state_label, state_tax, None)
        .social("Social Security", social_security, Some(SOCIAL_SECURITY_RATE))
        .social("Medicare", medicare, Some(MEDICARE_RATE))
        .social(
            "Additional Medicare",
            additional_medicare,
            Some(ADDITIONAL_MEDICARE_RATE),
        )
        .deduction("401(k) contribution", options.contribution_401k)
        .deduction("HSA contribution", options.hsa_contribution)
        .build())
}
