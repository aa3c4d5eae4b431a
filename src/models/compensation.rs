//! Compensation event models.
//!
//! Overtime, bonus, commission and contractor calculations wrap the base
//! gross-to-net formula. Each takes an event-specific options struct and
//! returns the base [`SalaryResult`] together with an event breakdown.
//! These values are computed fresh on every call.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PayFrequency, SalaryResult};

/// Weekly hours and rates for an overtime calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeOptions {
    /// Regular hourly rate.
    pub hourly_rate: Decimal,
    /// Regular hours worked per week.
    pub regular_hours_per_week: Decimal,
    /// Overtime hours worked per week.
    pub overtime_hours_per_week: Decimal,
    /// Overtime multiplier. Defaults to 1.5.
    #[serde(default)]
    pub overtime_multiplier: Option<Decimal>,
    /// Paid weeks per year. Defaults to 52.
    #[serde(default)]
    pub weeks_per_year: Option<Decimal>,
}

/// How an annual overtime-inclusive gross was assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeBreakdown {
    /// Annual pay for regular hours.
    pub regular_pay: Decimal,
    /// Annual pay for overtime hours.
    pub overtime_pay: Decimal,
    /// Hourly rate paid for overtime.
    pub overtime_rate: Decimal,
}

/// Result of an overtime calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeResult {
    /// Gross-to-net on the combined annual pay.
    #[serde(flatten)]
    pub salary: SalaryResult,
    /// Overtime details.
    pub overtime_breakdown: OvertimeBreakdown,
}

/// A one-off bonus on top of a base salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusOptions {
    /// Annual base salary.
    pub base_salary: Decimal,
    /// Bonus amount.
    pub bonus_amount: Decimal,
}

/// Marginal tax allocated to a bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusBreakdown {
    /// Bonus amount.
    pub bonus_amount: Decimal,
    /// Tax and social security attributable to the bonus.
    pub bonus_tax: Decimal,
    /// Bonus kept after tax.
    pub net_bonus: Decimal,
    /// `bonus_tax / bonus_amount * 100`, zero for a zero bonus.
    pub bonus_tax_rate: Decimal,
}

/// Result of a bonus calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusResult {
    /// Gross-to-net on base salary plus bonus.
    #[serde(flatten)]
    pub salary: SalaryResult,
    /// Bonus details.
    pub bonus_breakdown: BonusBreakdown,
}

/// A recurring commission on top of a base salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionOptions {
    /// Annual base salary.
    pub base_salary: Decimal,
    /// Commission paid per period.
    pub commission_amount: Decimal,
    /// How often the commission is paid. Defaults to monthly.
    #[serde(default = "default_commission_frequency")]
    pub commission_frequency: PayFrequency,
}

fn default_commission_frequency() -> PayFrequency {
    PayFrequency::Monthly
}

/// Marginal tax allocated to annualised commission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionBreakdown {
    /// Commission normalised to a year.
    pub annual_commission: Decimal,
    /// Tax and social security attributable to the commission.
    pub commission_tax: Decimal,
    /// Commission kept after tax.
    pub net_commission: Decimal,
    /// `commission_tax / annual_commission * 100`, zero for no commission.
    pub commission_tax_rate: Decimal,
}

/// Result of a commission calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionResult {
    /// Gross-to-net on base salary plus annual commission.
    #[serde(flatten)]
    pub salary: SalaryResult,
    /// Commission details.
    pub commission_breakdown: CommissionBreakdown,
}

/// Revenue and expenses of a contractor or self-employed earner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractorOptions {
    /// Annual gross business income.
    pub gross_income: Decimal,
    /// Annual deductible business expenses.
    #[serde(default)]
    pub business_expenses: Decimal,
}

/// How contractor income was taxed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractorBreakdown {
    /// Business expenses deducted from gross income.
    pub business_expenses: Decimal,
    /// Gross income less expenses.
    pub net_business_income: Decimal,
    /// Flat self-employment rate for the country.
    pub self_employment_rate: Decimal,
    /// Self-employment levy on net business income.
    pub self_employment_tax: Decimal,
    /// Ordinary income tax on net business income.
    pub income_tax: Decimal,
}

/// Result of a contractor calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractorResult {
    /// Result expressed against gross business income.
    #[serde(flatten)]
    pub salary: SalaryResult,
    /// Contractor details.
    pub contractor_breakdown: ContractorBreakdown,
}
