//! Ireland: income tax, Universal Social Charge and PRSI (2025).
//!
//! Pension contributions reduce only the income tax base; USC and PRSI are
//! charged on full gross. The USC exemption threshold and the PRSI entry
//! point are phased in linearly so that take-home pay never drops when a
//! threshold is crossed.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::brackets::{
    TaxBracket, band, money, non_negative, pct, phase_in, progressive_tax, top_band,
};
use crate::error::EngineError;
use crate::models::{EmploymentType, SalaryResult};

/// Standard full-time hours per year (39 h x 52).
pub const HOURS_PER_YEAR: u32 = 2_028;
/// Standard working days per year.
pub const WORKING_DAYS_PER_YEAR: u32 = 260;
/// Initial gross/net ratio for net-to-gross inversion.
pub const NET_TO_GROSS_MULTIPLIER: Decimal = pct(140, 0);
/// Class S PRSI rate.
pub const SELF_EMPLOYMENT_RATE: Decimal = pct(41, 1);

const STANDARD_RATE: Decimal = pct(20, 0);
const HIGHER_RATE: Decimal = pct(40, 0);
const SECOND_EARNER_BAND_CAP: Decimal = money(35_000);

const PERSONAL_CREDIT_SINGLE: Decimal = money(2_000);
const PERSONAL_CREDIT_MARRIED: Decimal = money(4_000);
const EMPLOYEE_CREDIT: Decimal = money(2_000);
const EARNED_INCOME_CREDIT: Decimal = money(2_000);
const SINGLE_PARENT_CREDIT: Decimal = money(1_900);

const USC_EXEMPTION_LIMIT: Decimal = money(13_000);
const USC_ENTRY_RATE: Decimal = pct(50, 0);
const USC_SURCHARGE_THRESHOLD: Decimal = money(100_000);
const USC_SELF_EMPLOYED_SURCHARGE: Decimal = pct(3, 0);

const USC: &[TaxBracket] = &[
    band(0, 12_012, pct(5, 1)),
    band(12_012, 27_382, pct(2, 0)),
    band(27_382, 70_044, pct(3, 0)),
    top_band(70_044, pct(8, 0)),
];

const PRSI_RATE: Decimal = pct(41, 1);
const PRSI_THRESHOLD: Decimal = money(18_304);
const PRSI_ENTRY_RATE: Decimal = pct(20, 0);

/// Irish tax assessment status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    /// Single person.
    #[default]
    Single,
    /// Single person child carer.
    SingleParent,
    /// Married or civil partners with one income.
    MarriedOneEarner,
    /// Married or civil partners, both earning.
    MarriedTwoEarners,
}

impl MaritalStatus {
    /// Width of the 20% standard rate band.
    ///
    /// Two-earner couples extend the band by the spouse's income, up to
    /// €35,000.
    pub fn standard_rate_band(&self, spouse_income: Decimal) -> Decimal {
        match self {
            MaritalStatus::Single => money(44_000),
            MaritalStatus::SingleParent => money(48_000),
            MaritalStatus::MarriedOneEarner => money(53_000),
            MaritalStatus::MarriedTwoEarners => {
                money(53_000) + non_negative(spouse_income).min(SECOND_EARNER_BAND_CAP)
            }
        }
    }

    fn personal_credit(&self) -> Decimal {
        match self {
            MaritalStatus::Single | MaritalStatus::SingleParent => PERSONAL_CREDIT_SINGLE,
            MaritalStatus::MarriedOneEarner | MaritalStatus::MarriedTwoEarners => {
                PERSONAL_CREDIT_MARRIED
            }
        }
    }
}

impl FromStr for MaritalStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "single" => Ok(MaritalStatus::Single),
            "single_parent" => Ok(MaritalStatus::SingleParent),
            "married_one_earner" | "married" => Ok(MaritalStatus::MarriedOneEarner),
            "married_two_earners" => Ok(MaritalStatus::MarriedTwoEarners),
            other => Err(EngineError::InvalidOption {
                field: "ie_marital_status".to_string(),
                message: format!("unknown marital status '{}'", other),
            }),
        }
    }
}

/// Ireland options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrelandOptions {
    /// Assessment status. Defaults to single.
    pub marital_status: MaritalStatus,
    /// Annual pension contribution receiving income tax relief.
    pub pension_contribution: Decimal,
    /// Spouse's income, only used for two-earner couples.
    pub spouse_income: Decimal,
    /// PAYE employee or self-employed.
    pub employment_type: EmploymentType,
}

/// Universal Social Charge on full gross income.
pub fn universal_social_charge(gross: Decimal, employment_type: EmploymentType) -> Decimal {
    let mut charge = progressive_tax(gross, USC);
    if employment_type == EmploymentType::SelfEmployed {
        charge += non_negative(gross - USC_SURCHARGE_THRESHOLD) * USC_SELF_EMPLOYED_SURCHARGE;
    }
    phase_in(charge, gross - USC_EXEMPTION_LIMIT, USC_ENTRY_RATE)
}

/// PRSI at the full rate once the phase-in above the weekly threshold completes.
pub fn prsi(gross: Decimal) -> Decimal {
    phase_in(non_negative(gross) * PRSI_RATE, gross - PRSI_THRESHOLD, PRSI_ENTRY_RATE)
}

/// Computes Irish take-home pay.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::countries::ireland::{IrelandOptions, gross_to_net};
/// use rust_decimal::Decimal;
///
/// let result = gross_to_net(Decimal::from(75_000), &IrelandOptions::default());
/// assert_eq!(result.net_salary, Decimal::new(526812, 1));
/// ```
pub fn gross_to_net(gross: Decimal, options: &IrelandOptions) -> SalaryResult {
    let status = options.marital_status;
    let taxable = non_negative(gross - options.pension_contribution);
    let band_width = status.standard_rate_band(options.spouse_income);
    let standard_part = taxable.min(band_width);
    let higher_part = non_negative(taxable - band_width);
    let gross_tax = standard_part * STANDARD_RATE + higher_part * HIGHER_RATE;

    // Credits are offset in order until tax reaches zero.
    let mut remaining = gross_tax;
    let mut apply = |credit: Decimal| {
        let applied = credit.min(remaining);
        remaining -= applied;
        applied
    };
    let personal = apply(status.personal_credit());
    let (work_label, work_amount) = match options.employment_type {
        EmploymentType::Employee => ("Employee (PAYE) credit", apply(EMPLOYEE_CREDIT)),
        EmploymentType::SelfEmployed => ("Earned income credit", apply(EARNED_INCOME_CREDIT)),
    };
    let single_parent = if status == MaritalStatus::SingleParent {
        apply(SINGLE_PARENT_CREDIT)
    } else {
        Decimal::ZERO
    };

    let usc = universal_social_charge(gross, options.employment_type);
    let prsi = prsi(gross);

    SalaryResult::builder(gross)
        .tax("Income tax (20%)", standard_part * STANDARD_RATE, Some(STANDARD_RATE))
        .tax("Income tax (40%)", higher_part * HIGHER_RATE, Some(HIGHER_RATE))
        .credit("Personal tax credit", personal)
        .credit(work_label, work_amount)
        .credit("Single person child carer credit", single_parent)
        .tax("Universal Social Charge", usc, None)
        .social("PRSI", prsi, Some(PRSI_RATE))
        .deduction("Pension contribution", options.pension_contribution)
        .build()
}
