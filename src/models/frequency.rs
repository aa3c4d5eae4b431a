//! Pay frequency models.
//!
//! This module defines the [`PayFrequency`] enum used to describe the period
//! a salary figure is quoted in, and the [`FrequencyConversion`] produced by
//! the frequency converter.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The period a salary amount is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayFrequency {
    /// Once per year.
    Annual,
    /// Twice per year.
    SemiAnnual,
    /// Four times per year.
    Quarterly,
    /// Twelve times per year.
    Monthly,
    /// Twenty-four times per year.
    SemiMonthly,
    /// Every two weeks (26 times per year).
    BiWeekly,
    /// Every week (52 times per year).
    Weekly,
    /// Per working day.
    Daily,
    /// Per working hour.
    Hourly,
}

impl PayFrequency {
    /// Returns the number of periods per year for calendar-based
    /// frequencies, or `None` for daily and hourly amounts whose factor
    /// depends on working time.
    pub fn periods_per_year(&self) -> Option<Decimal> {
        match self {
            PayFrequency::Annual => Some(Decimal::ONE),
            PayFrequency::SemiAnnual => Some(Decimal::from(2)),
            PayFrequency::Quarterly => Some(Decimal::from(4)),
            PayFrequency::Monthly => Some(Decimal::from(12)),
            PayFrequency::SemiMonthly => Some(Decimal::from(24)),
            PayFrequency::BiWeekly => Some(Decimal::from(26)),
            PayFrequency::Weekly => Some(Decimal::from(52)),
            PayFrequency::Daily | PayFrequency::Hourly => None,
        }
    }
}

/// An amount expressed in every display frequency.
///
/// # Example
///
/// ```
/// use salary_engine::models::FrequencyConversion;
/// use rust_decimal::Decimal;
///
/// let conversion = FrequencyConversion {
///     annual: Decimal::from(52000),
///     monthly: Decimal::from(52000) / Decimal::from(12),
///     weekly: Decimal::from(1000),
///     daily: Decimal::from(200),
///     hourly: Decimal::from(25),
/// };
/// assert_eq!(conversion.weekly * Decimal::from(52), conversion.annual);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyConversion {
    /// Amount per year.
    pub annual: Decimal,
    /// Amount per month.
    pub monthly: Decimal,
    /// Amount per week.
    pub weekly: Decimal,
    /// Amount per working day.
    pub daily: Decimal,
    /// Amount per working hour.
    pub hourly: Decimal,
}
