//! Progressive bracket evaluation.
//!
//! This module provides the [`TaxBracket`] band type, the
//! [`progressive_tax`] evaluator shared by every country formula, and a few
//! small primitives (`phase_in`, `taper`) used to express statutory
//! allowances without jump discontinuities.
//!
//! Static tables are written with the `const` helpers [`band`],
//! [`top_band`] and [`pct`]; their well-formedness is asserted by tests
//! rather than on the hot path. Tables built from caller data go through
//! [`BracketTable::new`], which validates them once.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A contiguous income range taxed at one marginal rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of the band (inclusive).
    pub min: Decimal,
    /// Upper bound of the band, `None` for the unbounded top band.
    pub max: Option<Decimal>,
    /// Marginal rate as a fraction.
    pub rate: Decimal,
}

/// Builds a whole-currency-unit amount in a `const` context.
pub const fn money(value: u32) -> Decimal {
    Decimal::from_parts(value, 0, 0, false, 0)
}

/// Builds a fraction from a percentage with `scale` decimal places.
///
/// `pct(4125, 3)` is 4.125% (0.04125); `pct(22, 0)` is 22% (0.22).
pub const fn pct(value: u32, scale: u32) -> Decimal {
    Decimal::from_parts(value, 0, 0, false, scale + 2)
}

/// A bounded band `[min, max)` in whole currency units.
pub const fn band(min: u32, max: u32, rate: Decimal) -> TaxBracket {
    TaxBracket {
        min: money(min),
        max: Some(money(max)),
        rate,
    }
}

/// The unbounded top band starting at `min`.
pub const fn top_band(min: u32, rate: Decimal) -> TaxBracket {
    TaxBracket {
        min: money(min),
        max: None,
        rate,
    }
}

/// Computes marginal tax on `income` over an ordered bracket table.
///
/// For each band in ascending order this adds
/// `max(0, min(income, band.max) - band.min) * band.rate` and stops at the
/// first band whose lower bound is at or above the income. Zero or negative
/// income yields zero.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::brackets::{band, pct, progressive_tax, top_band};
/// use rust_decimal::Decimal;
///
/// let table = [band(0, 10_000, pct(10, 0)), top_band(10_000, pct(20, 0))];
/// assert_eq!(progressive_tax(Decimal::from(15_000), &table), Decimal::from(2_000));
/// assert_eq!(progressive_tax(Decimal::ZERO, &table), Decimal::ZERO);
/// ```
pub fn progressive_tax(income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    let mut tax = Decimal::ZERO;

    for bracket in brackets {
        if income <= bracket.min {
            break;
        }
        let upper = match bracket.max {
            Some(max) if max < income => max,
            _ => income,
        };
        tax += (upper - bracket.min) * bracket.rate;
    }

    tax
}

/// Returns the marginal rate that applies to the next unit above `income`.
pub fn marginal_bracket_rate(income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    brackets
        .iter()
        .rfind(|bracket| income >= bracket.min)
        .map(|bracket| bracket.rate)
        .unwrap_or(Decimal::ZERO)
}

/// Checks that a table starts at zero, is contiguous, ends unbounded and
/// has non-decreasing rates.
pub fn validate_brackets(brackets: &[TaxBracket]) -> EngineResult<()> {
    let invalid = |message: String| EngineError::InvalidBracketTable { message };

    let first = brackets
        .first()
        .ok_or_else(|| invalid("table is empty".to_string()))?;
    if !first.min.is_zero() {
        return Err(invalid(format!("first band starts at {} instead of 0", first.min)));
    }

    for pair in brackets.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);
        match lower.max {
            Some(max) if max == upper.min => {}
            Some(max) => {
                return Err(invalid(format!(
                    "gap or overlap between {} and {}",
                    max, upper.min
                )));
            }
            None => {
                return Err(invalid(format!(
                    "unbounded band at {} is not the last band",
                    lower.min
                )));
            }
        }
        if upper.rate < lower.rate {
            return Err(invalid(format!(
                "rate falls from {} to {} at {}",
                lower.rate, upper.rate, upper.min
            )));
        }
    }

    for bracket in brackets {
        if let Some(max) = bracket.max {
            if max <= bracket.min {
                return Err(invalid(format!("empty band at {}", bracket.min)));
            }
        }
    }

    match brackets.last() {
        Some(last) if last.max.is_none() => Ok(()),
        _ => Err(invalid("top band must be unbounded".to_string())),
    }
}

/// A bracket table validated at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Validates and wraps a table.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBracketTable`] if the table does not
    /// cover `[0, ∞)` contiguously with non-decreasing rates.
    pub fn new(brackets: Vec<TaxBracket>) -> EngineResult<Self> {
        validate_brackets(&brackets)?;
        Ok(Self { brackets })
    }

    /// Computes tax on `income`.
    pub fn tax(&self, income: Decimal) -> Decimal {
        progressive_tax(income, &self.brackets)
    }

    /// Returns the bands.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

/// Phases a levy in linearly above a threshold.
///
/// Returns `min(full_amount, max(0, excess) * phase_rate)`, never negative.
/// Used where statute would otherwise switch a levy on at full strength.
pub fn phase_in(full_amount: Decimal, excess: Decimal, phase_rate: Decimal) -> Decimal {
    let phased = excess.max(Decimal::ZERO) * phase_rate;
    full_amount.min(phased).max(Decimal::ZERO)
}

/// Reduces an allowance by `rate` per unit of `excess`, never below zero.
pub fn taper(amount: Decimal, excess: Decimal, rate: Decimal) -> Decimal {
    (amount - excess.max(Decimal::ZERO) * rate).max(Decimal::ZERO)
}

/// Returns `value` floored at zero.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
