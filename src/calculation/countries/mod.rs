//! Per-country gross-to-net formulas.
//!
//! Each submodule exposes a `gross_to_net` function over an annual gross
//! figure and a country-specific options struct, plus four constants the
//! rest of the engine reads through [`profile`]: canonical working hours and
//! days per year, the net-to-gross starting multiplier and the flat
//! self-employment levy rate.

pub mod australia;
pub mod canada;
pub mod france;
pub mod germany;
pub mod ireland;
pub mod italy;
pub mod japan;
pub mod netherlands;
pub mod portugal;
pub mod spain;
pub mod switzerland;
pub mod uk;
pub mod us;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Country;

/// Country-level constants shared by the inverter, the time-based helpers
/// and the contractor calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountryProfile {
    /// Canonical full-time hours per year.
    pub hours_per_year: u32,
    /// Canonical working days per year.
    pub working_days_per_year: u32,
    /// Starting `gross / net` ratio for net-to-gross inversion.
    pub net_to_gross_multiplier: Decimal,
    /// Flat levy applied to net business income of the self-employed.
    pub self_employment_rate: Decimal,
}

macro_rules! profile_of {
    ($module:ident) => {
        CountryProfile {
            hours_per_year: $module::HOURS_PER_YEAR,
            working_days_per_year: $module::WORKING_DAYS_PER_YEAR,
            net_to_gross_multiplier: $module::NET_TO_GROSS_MULTIPLIER,
            self_employment_rate: $module::SELF_EMPLOYMENT_RATE,
        }
    };
}

/// Returns the constants for a country.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::countries::profile;
/// use salary_engine::models::Country;
///
/// assert_eq!(profile(Country::France).hours_per_year, 1_607);
/// assert_eq!(profile(Country::Switzerland).hours_per_year, 2_184);
/// ```
pub fn profile(country: Country) -> CountryProfile {
    match country {
        Country::UnitedStates => profile_of!(us),
        Country::UnitedKingdom => profile_of!(uk),
        Country::Ireland => profile_of!(ireland),
        Country::Canada => profile_of!(canada),
        Country::Australia => profile_of!(australia),
        Country::Germany => profile_of!(germany),
        Country::France => profile_of!(france),
        Country::Netherlands => profile_of!(netherlands),
        Country::Spain => profile_of!(spain),
        Country::Italy => profile_of!(italy),
        Country::Portugal => profile_of!(portugal),
        Country::Switzerland => profile_of!(switzerland),
        Country::Japan => profile_of!(japan),
    }
}
