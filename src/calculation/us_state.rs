//! US state income tax resolution.
//!
//! A static table of the fifty states plus the District of Columbia, each
//! tagged as flat, progressive, no income tax, or no tax on wages. Brackets
//! are the 2025 single-filer schedules applied to wages less pre-tax
//! contributions; state standard deductions and credits are not modelled.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use super::brackets::{TaxBracket, band, pct, progressive_tax, top_band};
use crate::error::{EngineError, EngineResult};

/// How a state taxes wage income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateTaxKind {
    /// Single rate on all taxable income.
    Flat,
    /// Graduated brackets.
    Progressive,
    /// No personal income tax.
    None,
    /// Income tax exists but does not reach wages (investment income only).
    NoneOnWages,
}

/// The rule a state applies to taxable wages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateTaxRule {
    /// Single rate.
    Flat(Decimal),
    /// Graduated brackets.
    Progressive(&'static [TaxBracket]),
    /// No personal income tax.
    None,
    /// No tax on wages.
    NoneOnWages,
}

/// Descriptor of one state's income tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTaxInfo {
    /// Two-letter postal code.
    pub code: &'static str,
    /// State name.
    pub name: &'static str,
    /// How wages are taxed.
    pub rule: StateTaxRule,
}

impl StateTaxInfo {
    /// Returns the kind tag of this state's rule.
    pub fn kind(&self) -> StateTaxKind {
        match self.rule {
            StateTaxRule::Flat(_) => StateTaxKind::Flat,
            StateTaxRule::Progressive(_) => StateTaxKind::Progressive,
            StateTaxRule::None => StateTaxKind::None,
            StateTaxRule::NoneOnWages => StateTaxKind::NoneOnWages,
        }
    }

    /// Computes state tax on taxable wages.
    pub fn tax(&self, taxable_income: Decimal) -> Decimal {
        match self.rule {
            StateTaxRule::Flat(rate) => taxable_income.max(Decimal::ZERO) * rate,
            StateTaxRule::Progressive(brackets) => progressive_tax(taxable_income, brackets),
            StateTaxRule::None | StateTaxRule::NoneOnWages => Decimal::ZERO,
        }
    }

    /// Returns the highest marginal rate the state applies to wages.
    pub fn top_rate(&self) -> Decimal {
        match self.rule {
            StateTaxRule::Flat(rate) => rate,
            StateTaxRule::Progressive(brackets) => brackets
                .last()
                .map(|bracket| bracket.rate)
                .unwrap_or(Decimal::ZERO),
            StateTaxRule::None | StateTaxRule::NoneOnWages => Decimal::ZERO,
        }
    }
}

const fn flat(code: &'static str, name: &'static str, rate: Decimal) -> StateTaxInfo {
    StateTaxInfo {
        code,
        name,
        rule: StateTaxRule::Flat(rate),
    }
}

const fn progressive(
    code: &'static str,
    name: &'static str,
    brackets: &'static [TaxBracket],
) -> StateTaxInfo {
    StateTaxInfo {
        code,
        name,
        rule: StateTaxRule::Progressive(brackets),
    }
}

const fn no_tax(code: &'static str, name: &'static str) -> StateTaxInfo {
    StateTaxInfo {
        code,
        name,
        rule: StateTaxRule::None,
    }
}

const fn no_wage_tax(code: &'static str, name: &'static str) -> StateTaxInfo {
    StateTaxInfo {
        code,
        name,
        rule: StateTaxRule::NoneOnWages,
    }
}

const AL: &[TaxBracket] = &[
    band(0, 500, pct(2, 0)),
    band(500, 3_000, pct(4, 0)),
    top_band(3_000, pct(5, 0)),
];

const AR: &[TaxBracket] = &[
    band(0, 5_500, pct(0, 0)),
    band(5_500, 10_900, pct(2, 0)),
    band(10_900, 15_600, pct(3, 0)),
    band(15_600, 25_700, pct(34, 1)),
    top_band(25_700, pct(39, 1)),
];

const CA: &[TaxBracket] = &[
    band(0, 10_756, pct(1, 0)),
    band(10_756, 25_499, pct(2, 0)),
    band(25_499, 40_245, pct(4, 0)),
    band(40_245, 55_866, pct(6, 0)),
    band(55_866, 70_606, pct(8, 0)),
    band(70_606, 360_659, pct(93, 1)),
    band(360_659, 432_787, pct(103, 1)),
    band(432_787, 721_314, pct(113, 1)),
    band(721_314, 1_000_000, pct(123, 1)),
    // Mental Health Services Tax adds 1% above $1M.
    top_band(1_000_000, pct(133, 1)),
];

const CT: &[TaxBracket] = &[
    band(0, 10_000, pct(2, 0)),
    band(10_000, 50_000, pct(45, 1)),
    band(50_000, 100_000, pct(55, 1)),
    band(100_000, 200_000, pct(6, 0)),
    band(200_000, 250_000, pct(65, 1)),
    band(250_000, 500_000, pct(69, 1)),
    top_band(500_000, pct(699, 2)),
];

const DE: &[TaxBracket] = &[
    band(0, 2_000, pct(0, 0)),
    band(2_000, 5_000, pct(22, 1)),
    band(5_000, 10_000, pct(39, 1)),
    band(10_000, 20_000, pct(48, 1)),
    band(20_000, 25_000, pct(52, 1)),
    band(25_000, 60_000, pct(555, 2)),
    top_band(60_000, pct(66, 1)),
];

const DC: &[TaxBracket] = &[
    band(0, 10_000, pct(4, 0)),
    band(10_000, 40_000, pct(6, 0)),
    band(40_000, 60_000, pct(65, 1)),
    band(60_000, 250_000, pct(85, 1)),
    band(250_000, 500_000, pct(925, 2)),
    band(500_000, 1_000_000, pct(975, 2)),
    top_band(1_000_000, pct(1075, 2)),
];

const HI: &[TaxBracket] = &[
    band(0, 9_600, pct(14, 1)),
    band(9_600, 14_400, pct(32, 1)),
    band(14_400, 19_200, pct(55, 1)),
    band(19_200, 24_000, pct(64, 1)),
    band(24_000, 36_000, pct(68, 1)),
    band(36_000, 48_000, pct(72, 1)),
    band(48_000, 125_000, pct(76, 1)),
    band(125_000, 175_000, pct(79, 1)),
    band(175_000, 225_000, pct(825, 2)),
    band(225_000, 275_000, pct(9, 0)),
    band(275_000, 325_000, pct(10, 0)),
    top_band(325_000, pct(11, 0)),
];

const KS: &[TaxBracket] = &[band(0, 23_000, pct(52, 1)), top_band(23_000, pct(558, 2))];

const ME: &[TaxBracket] = &[
    band(0, 26_800, pct(58, 1)),
    band(26_800, 63_450, pct(675, 2)),
    top_band(63_450, pct(715, 2)),
];

const MD: &[TaxBracket] = &[
    band(0, 1_000, pct(2, 0)),
    band(1_000, 2_000, pct(3, 0)),
    band(2_000, 3_000, pct(4, 0)),
    band(3_000, 100_000, pct(475, 2)),
    band(100_000, 125_000, pct(5, 0)),
    band(125_000, 150_000, pct(525, 2)),
    band(150_000, 250_000, pct(55, 1)),
    band(250_000, 500_000, pct(575, 2)),
    band(500_000, 1_000_000, pct(625, 2)),
    top_band(1_000_000, pct(65, 1)),
];

const MA: &[TaxBracket] = &[
    band(0, 1_083_150, pct(5, 0)),
    // 4% millionaires' surtax on top of the 5% base rate.
    top_band(1_083_150, pct(9, 0)),
];

const MN: &[TaxBracket] = &[
    band(0, 32_570, pct(535, 2)),
    band(32_570, 106_990, pct(68, 1)),
    band(106_990, 198_630, pct(785, 2)),
    top_band(198_630, pct(985, 2)),
];

const MS: &[TaxBracket] = &[band(0, 10_000, pct(0, 0)), top_band(10_000, pct(44, 1))];

const MO: &[TaxBracket] = &[
    band(0, 1_313, pct(0, 0)),
    band(1_313, 2_626, pct(2, 0)),
    band(2_626, 3_939, pct(25, 1)),
    band(3_939, 5_252, pct(3, 0)),
    band(5_252, 6_565, pct(35, 1)),
    band(6_565, 7_878, pct(4, 0)),
    band(7_878, 9_191, pct(45, 1)),
    top_band(9_191, pct(47, 1)),
];

const MT: &[TaxBracket] = &[band(0, 21_100, pct(47, 1)), top_band(21_100, pct(59, 1))];

const NE: &[TaxBracket] = &[
    band(0, 4_030, pct(246, 2)),
    band(4_030, 24_120, pct(351, 2)),
    band(24_120, 38_870, pct(501, 2)),
    top_band(38_870, pct(52, 1)),
];

const NJ: &[TaxBracket] = &[
    band(0, 20_000, pct(14, 1)),
    band(20_000, 35_000, pct(175, 2)),
    band(35_000, 40_000, pct(35, 1)),
    band(40_000, 75_000, pct(5525, 3)),
    band(75_000, 500_000, pct(637, 2)),
    band(500_000, 1_000_000, pct(897, 2)),
    top_band(1_000_000, pct(1075, 2)),
];

const NM: &[TaxBracket] = &[
    band(0, 5_500, pct(15, 1)),
    band(5_500, 16_500, pct(32, 1)),
    band(16_500, 33_500, pct(43, 1)),
    band(33_500, 66_500, pct(47, 1)),
    band(66_500, 210_000, pct(49, 1)),
    top_band(210_000, pct(59, 1)),
];

const NY: &[TaxBracket] = &[
    band(0, 8_500, pct(4, 0)),
    band(8_500, 11_700, pct(45, 1)),
    band(11_700, 13_900, pct(525, 2)),
    band(13_900, 80_650, pct(55, 1)),
    band(80_650, 215_400, pct(6, 0)),
    band(215_400, 1_077_550, pct(685, 2)),
    band(1_077_550, 5_000_000, pct(965, 2)),
    band(5_000_000, 25_000_000, pct(103, 1)),
    top_band(25_000_000, pct(109, 1)),
];

const ND: &[TaxBracket] = &[
    band(0, 48_475, pct(0, 0)),
    band(48_475, 244_825, pct(195, 2)),
    top_band(244_825, pct(25, 1)),
];

const OH: &[TaxBracket] = &[
    band(0, 26_050, pct(0, 0)),
    band(26_050, 100_000, pct(275, 2)),
    top_band(100_000, pct(3125, 3)),
];

const OK: &[TaxBracket] = &[
    band(0, 1_000, pct(25, 2)),
    band(1_000, 2_500, pct(75, 2)),
    band(2_500, 3_750, pct(175, 2)),
    band(3_750, 4_900, pct(275, 2)),
    band(4_900, 7_200, pct(375, 2)),
    top_band(7_200, pct(475, 2)),
];

const OR: &[TaxBracket] = &[
    band(0, 4_400, pct(475, 2)),
    band(4_400, 11_050, pct(675, 2)),
    band(11_050, 125_000, pct(875, 2)),
    top_band(125_000, pct(99, 1)),
];

const RI: &[TaxBracket] = &[
    band(0, 79_900, pct(375, 2)),
    band(79_900, 181_650, pct(475, 2)),
    top_band(181_650, pct(599, 2)),
];

const SC: &[TaxBracket] = &[
    band(0, 3_560, pct(0, 0)),
    band(3_560, 17_830, pct(3, 0)),
    top_band(17_830, pct(62, 1)),
];

const VT: &[TaxBracket] = &[
    band(0, 47_900, pct(335, 2)),
    band(47_900, 116_000, pct(66, 1)),
    band(116_000, 242_000, pct(76, 1)),
    top_band(242_000, pct(875, 2)),
];

const VA: &[TaxBracket] = &[
    band(0, 3_000, pct(2, 0)),
    band(3_000, 5_000, pct(3, 0)),
    band(5_000, 17_000, pct(5, 0)),
    top_band(17_000, pct(575, 2)),
];

const WV: &[TaxBracket] = &[
    band(0, 10_000, pct(222, 2)),
    band(10_000, 25_000, pct(296, 2)),
    band(25_000, 40_000, pct(333, 2)),
    band(40_000, 60_000, pct(444, 2)),
    top_band(60_000, pct(482, 2)),
];

const WI: &[TaxBracket] = &[
    band(0, 14_680, pct(35, 1)),
    band(14_680, 29_370, pct(44, 1)),
    band(29_370, 323_290, pct(53, 1)),
    top_band(323_290, pct(765, 2)),
];

/// The fifty states and DC.
pub static STATE_TAX_TABLE: [StateTaxInfo; 51] = [
    progressive("AL", "Alabama", AL),
    no_tax("AK", "Alaska"),
    flat("AZ", "Arizona", pct(25, 1)),
    progressive("AR", "Arkansas", AR),
    progressive("CA", "California", CA),
    flat("CO", "Colorado", pct(44, 1)),
    progressive("CT", "Connecticut", CT),
    progressive("DE", "Delaware", DE),
    progressive("DC", "District of Columbia", DC),
    no_tax("FL", "Florida"),
    flat("GA", "Georgia", pct(519, 2)),
    progressive("HI", "Hawaii", HI),
    flat("ID", "Idaho", pct(53, 1)),
    flat("IL", "Illinois", pct(495, 2)),
    flat("IN", "Indiana", pct(3, 0)),
    flat("IA", "Iowa", pct(38, 1)),
    progressive("KS", "Kansas", KS),
    flat("KY", "Kentucky", pct(4, 0)),
    flat("LA", "Louisiana", pct(3, 0)),
    progressive("ME", "Maine", ME),
    progressive("MD", "Maryland", MD),
    progressive("MA", "Massachusetts", MA),
    flat("MI", "Michigan", pct(425, 2)),
    progressive("MN", "Minnesota", MN),
    progressive("MS", "Mississippi", MS),
    progressive("MO", "Missouri", MO),
    progressive("MT", "Montana", MT),
    progressive("NE", "Nebraska", NE),
    no_tax("NV", "Nevada"),
    no_wage_tax("NH", "New Hampshire"),
    progressive("NJ", "New Jersey", NJ),
    progressive("NM", "New Mexico", NM),
    progressive("NY", "New York", NY),
    flat("NC", "North Carolina", pct(425, 2)),
    progressive("ND", "North Dakota", ND),
    progressive("OH", "Ohio", OH),
    progressive("OK", "Oklahoma", OK),
    progressive("OR", "Oregon", OR),
    flat("PA", "Pennsylvania", pct(307, 2)),
    progressive("RI", "Rhode Island", RI),
    progressive("SC", "South Carolina", SC),
    no_tax("SD", "South Dakota"),
    no_tax("TN", "Tennessee"),
    no_tax("TX", "Texas"),
    flat("UT", "Utah", pct(45, 1)),
    progressive("VT", "Vermont", VT),
    progressive("VA", "Virginia", VA),
    no_wage_tax("WA", "Washington"),
    progressive("WV", "West Virginia", WV),
    progressive("WI", "Wisconsin", WI),
    no_tax("WY", "Wyoming"),
];

/// Looks up a state descriptor by postal code (case-insensitive).
///
/// # Errors
///
/// Returns [`EngineError::UnknownStateCode`] when the code is not one of
/// the 51 entries. A warning is logged so misconfigured callers are visible.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::us_state::{StateTaxKind, get_state_tax_info};
///
/// let texas = get_state_tax_info("tx").unwrap();
/// assert_eq!(texas.kind(), StateTaxKind::None);
/// assert!(get_state_tax_info("PR").is_err());
/// ```
pub fn get_state_tax_info(state_code: &str) -> EngineResult<&'static StateTaxInfo> {
    let wanted = state_code.trim();
    STATE_TAX_TABLE
        .iter()
        .find(|info| info.code.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            warn!(state_code = %state_code, "Unknown US state code");
            EngineError::UnknownStateCode {
                code: state_code.to_string(),
            }
        })
}

/// Computes state income tax on taxable wages.
///
/// # Errors
///
/// Returns [`EngineError::UnknownStateCode`] for codes outside the table;
/// the caller decides whether to fall back to zero.
pub fn calculate_state_tax(state_code: &str, taxable_income: Decimal) -> EngineResult<Decimal> {
    Ok(get_state_tax_info(state_code)?.tax(taxable_income))
}
