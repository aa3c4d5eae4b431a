//! Core data models for the Salary Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod compensation;
mod country;
mod frequency;
mod options;
mod salary_result;

pub use compensation::{
    BonusBreakdown, BonusOptions, BonusResult, CommissionBreakdown, CommissionOptions,
    CommissionResult, ContractorBreakdown, ContractorOptions, ContractorResult, OvertimeBreakdown,
    OvertimeOptions, OvertimeResult,
};
pub use country::Country;
pub use frequency::{FrequencyConversion, PayFrequency};
pub use options::{EmploymentType, GenericOptions};
pub use salary_result::{
    BreakdownCategory, BreakdownItem, Convergence, NetToGrossResult, SalaryResult,
    SalaryResultBuilder,
};
