//! United Kingdom income tax, National Insurance and student loans (2025/26).
//!
//! Pension contributions reduce the income tax base only; National
//! Insurance and student loan repayments are always computed on the
//! un-reduced gross. Scottish taxpayers use the six Scottish bands; the
//! rest of the UK shares the England bands.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::brackets::{
    TaxBracket, band, money, non_negative, pct, progressive_tax, taper, top_band,
};
use crate::error::EngineError;
use crate::models::{EmploymentType, SalaryResult};

/// Standard full-time hours per year (37.5 h x 52).
pub const HOURS_PER_YEAR: u32 = 1_950;
/// Standard working days per year.
pub const WORKING_DAYS_PER_YEAR: u32 = 260;
/// Initial gross/net ratio for net-to-gross inversion.
pub const NET_TO_GROSS_MULTIPLIER: Decimal = pct(135, 0);
/// Class 4 National Insurance main rate.
pub const SELF_EMPLOYMENT_RATE: Decimal = pct(6, 0);

const PERSONAL_ALLOWANCE: Decimal = money(12_570);
const ALLOWANCE_TAPER_START: Decimal = money(100_000);
const ALLOWANCE_TAPER_RATE: Decimal = pct(50, 0);
const MARRIAGE_ALLOWANCE_CREDIT: Decimal = money(252);

const NI_PRIMARY_THRESHOLD: Decimal = money(12_570);
const NI_UPPER_EARNINGS_LIMIT: Decimal = money(50_270);
const NI_EMPLOYEE_MAIN_RATE: Decimal = pct(8, 0);
const NI_SELF_EMPLOYED_MAIN_RATE: Decimal = pct(6, 0);
const NI_ADDITIONAL_RATE: Decimal = pct(2, 0);

/// Bands applied to income above the personal allowance.
const ENGLAND: &[TaxBracket] = &[
    band(0, 37_700, pct(20, 0)),
    band(37_700, 125_140, pct(40, 0)),
    top_band(125_140, pct(45, 0)),
];

const SCOTLAND: &[TaxBracket] = &[
    band(0, 2_827, pct(19, 0)),
    band(2_827, 14_921, pct(20, 0)),
    band(14_921, 31_092, pct(21, 0)),
    band(31_092, 62_430, pct(42, 0)),
    band(62_430, 125_140, pct(45, 0)),
    top_band(125_140, pct(48, 0)),
];

/// UK nation for income tax purposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UkRegion {
    /// England.
    #[default]
    England,
    /// Scotland (Scottish rate bands).
    Scotland,
    /// Wales.
    Wales,
    /// Northern Ireland.
    NorthernIreland,
}

impl UkRegion {
    /// Income tax bands applied above the personal allowance.
    pub fn brackets(&self) -> &'static [TaxBracket] {
        match self {
            UkRegion::Scotland => SCOTLAND,
            UkRegion::England | UkRegion::Wales | UkRegion::NorthernIreland => ENGLAND,
        }
    }
}

impl FromStr for UkRegion {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "england" => Ok(UkRegion::England),
            "scotland" => Ok(UkRegion::Scotland),
            "wales" => Ok(UkRegion::Wales),
            "northern_ireland" => Ok(UkRegion::NorthernIreland),
            other => Err(EngineError::InvalidOption {
                field: "uk_region".to_string(),
                message: format!("unknown region '{}'", other),
            }),
        }
    }
}

/// Student loan repayment plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentLoanPlan {
    /// No student loan.
    #[default]
    None,
    /// Plan 1.
    Plan1,
    /// Plan 2.
    Plan2,
    /// Plan 4 (Scotland).
    Plan4,
    /// Plan 5.
    Plan5,
    /// Postgraduate loan.
    Postgraduate,
}

impl StudentLoanPlan {
    /// Returns `(annual threshold, rate)` or `None` without a loan.
    pub fn terms(&self) -> Option<(Decimal, Decimal)> {
        match self {
            StudentLoanPlan::None => None,
            StudentLoanPlan::Plan1 => Some((money(26_065), pct(9, 0))),
            StudentLoanPlan::Plan2 => Some((money(28_470), pct(9, 0))),
            StudentLoanPlan::Plan4 => Some((money(32_745), pct(9, 0))),
            StudentLoanPlan::Plan5 => Some((money(25_000), pct(9, 0))),
            StudentLoanPlan::Postgraduate => Some((money(21_000), pct(6, 0))),
        }
    }
}

impl FromStr for StudentLoanPlan {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace([' ', '_'], "").as_str() {
            "" | "none" => Ok(StudentLoanPlan::None),
            "plan1" => Ok(StudentLoanPlan::Plan1),
            "plan2" => Ok(StudentLoanPlan::Plan2),
            "plan4" => Ok(StudentLoanPlan::Plan4),
            "plan5" => Ok(StudentLoanPlan::Plan5),
            "postgraduate" | "postgrad" | "pgl" => Ok(StudentLoanPlan::Postgraduate),
            other => Err(EngineError::InvalidOption {
                field: "uk_student_loan".to_string(),
                message: format!("unknown student loan plan '{}'", other),
            }),
        }
    }
}

/// United Kingdom options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UkOptions {
    /// Nation of residence. Defaults to England.
    pub region: UkRegion,
    /// Annual pension contribution receiving tax relief.
    pub pension_contribution: Decimal,
    /// Student loan plan. Defaults to none.
    pub student_loan: StudentLoanPlan,
    /// Whether a spouse's transferred marriage allowance is received.
    ///
    /// The UI offers this only to basic-rate taxpayers, so eligibility is
    /// not re-checked here.
    pub marriage_allowance: bool,
    /// Employee (Class 1 NI) or self-employed (Class 4 NI).
    pub employment_type: EmploymentType,
}

/// Personal allowance after the £1-per-£2 taper above £100,000.
pub fn personal_allowance(adjusted_net_income: Decimal) -> Decimal {
    taper(
        PERSONAL_ALLOWANCE,
        adjusted_net_income - ALLOWANCE_TAPER_START,
        ALLOWANCE_TAPER_RATE,
    )
}

fn national_insurance(gross: Decimal, employment_type: EmploymentType) -> (Decimal, Decimal) {
    let main_rate = match employment_type {
        EmploymentType::Employee => NI_EMPLOYEE_MAIN_RATE,
        EmploymentType::SelfEmployed => NI_SELF_EMPLOYED_MAIN_RATE,
    };
    let main_band = non_negative(gross.min(NI_UPPER_EARNINGS_LIMIT) - NI_PRIMARY_THRESHOLD);
    let upper_band = non_negative(gross - NI_UPPER_EARNINGS_LIMIT);
    (main_band * main_rate + upper_band * NI_ADDITIONAL_RATE, main_rate)
}

/// Computes UK take-home pay.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::countries::uk::{UkOptions, gross_to_net};
/// use rust_decimal::Decimal;
///
/// let result = gross_to_net(Decimal::from(30_000), &UkOptions::default());
/// assert_eq!(result.net_salary, Decimal::new(251196, 1));
/// ```
pub fn gross_to_net(gross: Decimal, options: &UkOptions) -> SalaryResult {
    let adjusted_net_income = gross - options.pension_contribution;
    let allowance = personal_allowance(adjusted_net_income);
    let taxable = non_negative(adjusted_net_income - allowance);
    let income_tax = progressive_tax(taxable, options.region.brackets());

    let marriage_credit = if options.marriage_allowance {
        MARRIAGE_ALLOWANCE_CREDIT.min(income_tax)
    } else {
        Decimal::ZERO
    };

    let (ni, ni_rate) = national_insurance(gross, options.employment_type);

    let student_loan = match options.student_loan.terms() {
        Some((threshold, rate)) => non_negative(gross - threshold) * rate,
        None => Decimal::ZERO,
    };

    SalaryResult::builder(gross)
        .tax("Income tax", income_tax, None)
        .credit("Marriage allowance", marriage_credit)
        .social("National Insurance", ni, Some(ni_rate))
        .deduction("Pension contribution", options.pension_contribution)
        .deduction("Student loan repayment", student_loan)
        .build()
}
