//! Configuration types for the salary engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `config/engine.yaml`. Every field has a default so
//! a partial file, or no file at all, yields the documented behaviour.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Net-to-gross iteration settings.
///
/// # Example
///
/// ```
/// use salary_engine::config::SolverSettings;
/// use rust_decimal::Decimal;
///
/// let settings = SolverSettings::default();
/// assert_eq!(settings.tolerance, Decimal::ONE);
/// assert_eq!(settings.max_iterations, 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Largest accepted `|net(estimate) - target|`, in currency units.
    pub tolerance: Decimal,
    /// Maximum number of gross-to-net evaluations.
    pub max_iterations: u32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: Decimal::ONE,
            max_iterations: 20,
        }
    }
}

/// Constants used by the generic frequency converter.
///
/// These are independent of each country's own canonical working time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencySettings {
    /// Working hours per week; an hour is `annual / (hours_per_week * 52)`.
    pub hours_per_week: Decimal,
    /// Working days per year.
    pub working_days_per_year: Decimal,
}

impl Default for FrequencySettings {
    fn default() -> Self {
        Self {
            hours_per_week: Decimal::from(40),
            working_days_per_year: Decimal::from(260),
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Net-to-gross solver settings.
    pub solver: SolverSettings,
    /// Frequency converter settings.
    pub frequency: FrequencySettings,
}
