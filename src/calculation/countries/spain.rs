//! Spain: social security and IRPF with state and regional scales (2025).
//!
//! Social security is deducted first; the work-income reduction and the
//! flat 2,000 expense allowance give the taxable base. The personal and
//! family minimum is taxed at zero by subtracting the scale applied to the
//! minimum from the scale applied to the base, separately for the state
//! and regional halves.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::brackets::{
    TaxBracket, band, money, non_negative, pct, progressive_tax, top_band,
};
use crate::error::EngineError;
use crate::models::SalaryResult;

/// Typical collective-agreement hours per year.
pub const HOURS_PER_YEAR: u32 = 1_780;
/// Standard working days per year.
pub const WORKING_DAYS_PER_YEAR: u32 = 260;
/// Initial gross/net ratio for net-to-gross inversion.
pub const NET_TO_GROSS_MULTIPLIER: Decimal = pct(135, 0);
/// Average self-employed (autónomo) contribution rate.
pub const SELF_EMPLOYMENT_RATE: Decimal = pct(30, 0);

const SOCIAL_SECURITY_RATE: Decimal = pct(647, 2);
const SOCIAL_SECURITY_MAX_BASE: Decimal = money(58_914);

const OTHER_EXPENSES: Decimal = money(2_000);
const PERSONAL_MINIMUM: Decimal = money(5_550);
const CHILD_MINIMUMS: [Decimal; 4] = [money(2_400), money(2_700), money(4_000), money(4_500)];

const STATE: &[TaxBracket] = &[
    band(0, 12_450, pct(95, 1)),
    band(12_450, 20_200, pct(12, 0)),
    band(20_200, 35_200, pct(15, 0)),
    band(35_200, 60_000, pct(185, 1)),
    band(60_000, 300_000, pct(225, 1)),
    top_band(300_000, pct(245, 1)),
];

const MADRID: &[TaxBracket] = &[
    band(0, 13_362, pct(85, 1)),
    band(13_362, 19_005, pct(107, 1)),
    band(19_005, 35_426, pct(128, 1)),
    band(35_426, 57_320, pct(174, 1)),
    top_band(57_320, pct(205, 1)),
];

const CATALONIA: &[TaxBracket] = &[
    band(0, 12_450, pct(105, 1)),
    band(12_450, 17_707, pct(12, 0)),
    band(17_707, 21_000, pct(14, 0)),
    band(21_000, 33_007, pct(15, 0)),
    band(33_007, 53_407, pct(188, 1)),
    band(53_407, 90_000, pct(215, 1)),
    band(90_000, 120_000, pct(235, 1)),
    band(120_000, 175_000, pct(245, 1)),
    top_band(175_000, pct(255, 1)),
];

const ANDALUSIA: &[TaxBracket] = &[
    band(0, 13_000, pct(95, 1)),
    band(13_000, 21_000, pct(12, 0)),
    band(21_000, 35_200, pct(15, 0)),
    band(35_200, 60_000, pct(185, 1)),
    top_band(60_000, pct(225, 1)),
];

const VALENCIA: &[TaxBracket] = &[
    band(0, 12_000, pct(9, 0)),
    band(12_000, 22_000, pct(12, 0)),
    band(22_000, 32_000, pct(15, 0)),
    band(32_000, 42_000, pct(175, 1)),
    band(42_000, 52_000, pct(20, 0)),
    band(52_000, 62_000, pct(225, 1)),
    band(62_000, 72_000, pct(25, 0)),
    band(72_000, 100_000, pct(265, 1)),
    band(100_000, 150_000, pct(275, 1)),
    band(150_000, 200_000, pct(285, 1)),
    top_band(200_000, pct(295, 1)),
];

/// Autonomous community for the regional half of IRPF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanishRegion {
    /// Community of Madrid.
    Madrid,
    /// Catalonia.
    Catalonia,
    /// Andalusia.
    Andalusia,
    /// Valencian Community.
    Valencia,
    /// Any other community; the regional scale mirrors the state scale.
    #[default]
    Other,
}

impl SpanishRegion {
    /// Regional scale.
    pub fn brackets(&self) -> &'static [TaxBracket] {
        match self {
            SpanishRegion::Madrid => MADRID,
            SpanishRegion::Catalonia => CATALONIA,
            SpanishRegion::Andalusia => ANDALUSIA,
            SpanishRegion::Valencia => VALENCIA,
            SpanishRegion::Other => STATE,
        }
    }
}

impl FromStr for SpanishRegion {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "madrid" | "comunidad_de_madrid" => Ok(SpanishRegion::Madrid),
            "catalonia" | "catalunya" | "cataluna" => Ok(SpanishRegion::Catalonia),
            "andalusia" | "andalucia" => Ok(SpanishRegion::Andalusia),
            "valencia" | "comunidad_valenciana" => Ok(SpanishRegion::Valencia),
            "" | "other" | "default" => Ok(SpanishRegion::Other),
            other => Err(EngineError::InvalidOption {
                field: "es_region".to_string(),
                message: format!("unknown region '{}'", other),
            }),
        }
    }
}

/// Spain options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpainOptions {
    /// Autonomous community. Defaults to the state-mirroring scale.
    pub region: SpanishRegion,
    /// Descendants counted in the family minimum.
    pub children: u32,
}

/// Reduction for net work income (rendimientos del trabajo).
pub fn work_income_reduction(net_work_income: Decimal) -> Decimal {
    let first = money(14_852);
    let second = Decimal::new(1_767_352, 2);
    let third = Decimal::new(1_974_750, 2);

    if net_work_income <= first {
        money(7_302)
    } else if net_work_income <= second {
        money(7_302) - pct(175, 0) * (net_work_income - first)
    } else if net_work_income <= third {
        non_negative(Decimal::new(236_434, 2) - pct(114, 0) * (net_work_income - second))
    } else {
        Decimal::ZERO
    }
}

/// Personal plus descendant minimum.
pub fn personal_and_family_minimum(children: u32) -> Decimal {
    let last = CHILD_MINIMUMS[CHILD_MINIMUMS.len() - 1];
    (0..children as usize)
        .map(|index| CHILD_MINIMUMS.get(index).copied().unwrap_or(last))
        .fold(PERSONAL_MINIMUM, |total, amount| total + amount)
}

fn scale_after_minimum(base: Decimal, minimum: Decimal, scale: &[TaxBracket]) -> Decimal {
    non_negative(progressive_tax(base, scale) - progressive_tax(minimum.min(base), scale))
}

/// Computes Spanish take-home pay.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::countries::spain::{SpainOptions, SpanishRegion, gross_to_net};
/// use rust_decimal::Decimal;
///
/// let options = SpainOptions { region: SpanishRegion::Madrid, children: 0 };
/// let result = gross_to_net(Decimal::from(40_000), &options);
/// assert_eq!(result.net_salary, Decimal::new(30_169_363, 3));
/// ```
pub fn gross_to_net(gross: Decimal, options: &SpainOptions) -> SalaryResult {
    let social_security = non_negative(gross).min(SOCIAL_SECURITY_MAX_BASE) * SOCIAL_SECURITY_RATE;
    let net_work_income = gross - social_security;
    let reduction = work_income_reduction(net_work_income);
    let base = non_negative(net_work_income - OTHER_EXPENSES - reduction);
    let minimum = personal_and_family_minimum(options.children);

    let state_tax = scale_after_minimum(base, minimum, STATE);
    let regional_tax = scale_after_minimum(base, minimum, options.region.brackets());

    SalaryResult::builder(gross)
        .tax("IRPF (state)", state_tax, None)
        .tax("IRPF (regional)", regional_tax, None)
        .social("Social security", social_security, Some(SOCIAL_SECURITY_RATE))
        .build()
}
