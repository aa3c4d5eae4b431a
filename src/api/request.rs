//! Request types for the Salary Engine API.
//!
//! Every request names a country code and carries the flat generic options
//! bag; event endpoints add their own options object.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    BonusOptions, CommissionOptions, ContractorOptions, GenericOptions, OvertimeOptions,
    PayFrequency,
};

/// Request body for `POST /gross-to-net`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrossToNetRequest {
    /// Country code (e.g. "US", "DE").
    pub country: String,
    /// Annual gross salary.
    pub gross_salary: Decimal,
    /// Generic options; absent fields take country defaults.
    #[serde(default)]
    pub options: GenericOptions,
}

/// Request body for `POST /net-to-gross`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetToGrossRequest {
    /// Country code.
    pub country: String,
    /// Target annual net salary.
    pub net_salary: Decimal,
    /// Generic options.
    #[serde(default)]
    pub options: GenericOptions,
}

/// Request body for `POST /convert-frequency`.
///
/// With a `country`, that country's canonical hours and days per year are
/// used and `hours_per_week` is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertFrequencyRequest {
    /// Amount to convert.
    pub amount: Decimal,
    /// Frequency the amount is quoted in.
    pub from: PayFrequency,
    /// Working hours per week. Defaults to the configured value.
    #[serde(default)]
    pub hours_per_week: Option<Decimal>,
    /// Optional country code.
    #[serde(default)]
    pub country: Option<String>,
}

/// Request body for `POST /compensation/overtime`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertimeRequest {
    /// Country code.
    pub country: String,
    /// Hours and rates.
    pub overtime: OvertimeOptions,
    /// Generic options.
    #[serde(default)]
    pub options: GenericOptions,
}

/// Request body for `POST /compensation/bonus`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusRequest {
    /// Country code.
    pub country: String,
    /// Base salary and bonus.
    pub bonus: BonusOptions,
    /// Generic options.
    #[serde(default)]
    pub options: GenericOptions,
}

/// Request body for `POST /compensation/commission`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionRequest {
    /// Country code.
    pub country: String,
    /// Base salary and commission.
    pub commission: CommissionOptions,
    /// Generic options.
    #[serde(default)]
    pub options: GenericOptions,
}

/// Request body for `POST /compensation/contractor`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractorRequest {
    /// Country code.
    pub country: String,
    /// Business income and expenses.
    pub contractor: ContractorOptions,
    /// Generic options.
    #[serde(default)]
    pub options: GenericOptions,
}
