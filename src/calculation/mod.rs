//! Calculation logic for the Salary Engine.
//!
//! This module contains the progressive bracket evaluator, the thirteen
//! per-country gross-to-net formulas and the US state table, the
//! net-to-gross inverter, the option router that dispatches by country
//! code, the frequency converter, and the compensation event wrappers
//! (overtime, bonus, commission, contractor income).

pub mod brackets;
mod compensation;
pub mod countries;
mod frequency;
mod net_to_gross;
mod router;
pub mod us_state;

pub use brackets::{BracketTable, TaxBracket, progressive_tax};
pub use compensation::{
    calculate_bonus_tax, calculate_commission, calculate_commission_with,
    calculate_contractor_income,
    calculate_overtime_pay,
};
pub use countries::{CountryProfile, profile};
pub use frequency::{
    convert_frequency, convert_frequency_for_country, convert_frequency_with, daily_to_salary,
    from_annual, hourly_to_salary, monthly_to_salary, to_annual, weekly_to_salary,
};
pub use net_to_gross::invert;
pub use router::{
    CountryOptions, MarginalTax, calculate_gross_to_net, calculate_net_to_gross,
    calculate_net_to_gross_with, marginal_rate,
};
pub use us_state::{StateTaxInfo, calculate_state_tax, get_state_tax_info};
