//! Salary result models for the Salary Engine.
//!
//! This module contains the [`SalaryResult`] type produced by every
//! gross-to-net formula, its categorized [`BreakdownItem`] lines, and the
//! [`NetToGrossResult`] wrapper that reports how a net-to-gross inversion
//! converged.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// The category of a breakdown line.
///
/// Categories decide which total a line contributes to and the colour a
/// chart uses to render it.
///
/// # Example
///
/// ```
/// use salary_engine::models::BreakdownCategory;
///
/// assert_eq!(BreakdownCategory::Net.color(), "#10b981");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownCategory {
    /// An income-tax-like levy (national, regional, municipal, surtaxes).
    IncomeTax,
    /// A social insurance, pension, health or unemployment contribution.
    SocialSecurity,
    /// A withholding that is neither tax nor social insurance.
    Deduction,
    /// A credit or offset; stored as a negative amount that reduces income tax.
    Credit,
    /// Take-home pay.
    Net,
}

impl BreakdownCategory {
    /// Returns the hex colour used to render lines of this category.
    pub fn color(&self) -> &'static str {
        match self {
            BreakdownCategory::IncomeTax => "#ef4444",
            BreakdownCategory::SocialSecurity => "#f59e0b",
            BreakdownCategory::Deduction => "#8b5cf6",
            BreakdownCategory::Credit => "#3b82f6",
            BreakdownCategory::Net => "#10b981",
        }
    }
}

/// A single labelled line in a salary breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownItem {
    /// Human-readable label (e.g. "Federal income tax").
    pub label: String,
    /// Annual amount. Negative for credits.
    pub amount: Decimal,
    /// The statutory rate behind this line, where one applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
    /// The category this line belongs to.
    pub category: BreakdownCategory,
    /// Chart colour for this line.
    pub color: String,
}

/// The universal output of a gross-to-net computation.
///
/// All amounts are annual. Every formula in the engine guarantees
/// `net_salary = gross_salary - total_tax - social_security - other_deductions`
/// and that the breakdown amounts (credits included) sum to `gross_salary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryResult {
    /// Annual gross salary.
    pub gross_salary: Decimal,
    /// Annual take-home pay.
    pub net_salary: Decimal,
    /// Sum of all income-tax-like levies after credits.
    pub total_tax: Decimal,
    /// Sum of all social insurance contributions.
    pub social_security: Decimal,
    /// Pension contributions, loan repayments and similar withholdings.
    pub other_deductions: Decimal,
    /// `(total_tax + social_security) / gross_salary * 100`, or zero for zero gross.
    pub effective_tax_rate: Decimal,
    /// Ordered line items.
    pub breakdown: Vec<BreakdownItem>,
}

impl SalaryResult {
    /// Starts building a result for the given annual gross salary.
    pub fn builder(gross_salary: Decimal) -> SalaryResultBuilder {
        SalaryResultBuilder {
            gross_salary,
            items: Vec::new(),
        }
    }

    /// Total withheld from gross pay.
    pub fn total_deductions(&self) -> Decimal {
        self.total_tax + self.social_security + self.other_deductions
    }

    /// Returns a copy with every amount rounded to two decimal places.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_engine::models::SalaryResult;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let result = SalaryResult::builder(Decimal::from(1000))
    ///     .tax("Income tax", Decimal::from_str("123.456").unwrap(), None)
    ///     .build()
    ///     .rounded();
    /// assert_eq!(result.total_tax, Decimal::from_str("123.46").unwrap());
    /// ```
    pub fn rounded(&self) -> Self {
        let round = |value: Decimal| {
            value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        };

        Self {
            gross_salary: round(self.gross_salary),
            net_salary: round(self.net_salary),
            total_tax: round(self.total_tax),
            social_security: round(self.social_security),
            other_deductions: round(self.other_deductions),
            effective_tax_rate: round(self.effective_tax_rate),
            breakdown: self
                .breakdown
                .iter()
                .map(|item| BreakdownItem {
                    amount: round(item.amount),
                    ..item.clone()
                })
                .collect(),
        }
    }
}

/// Accumulates breakdown lines and derives the totals of a [`SalaryResult`].
///
/// Zero-amount lines are dropped so formulas can add optional levies
/// unconditionally.
#[derive(Debug, Clone)]
pub struct SalaryResultBuilder {
    gross_salary: Decimal,
    items: Vec<BreakdownItem>,
}

impl SalaryResultBuilder {
    fn push(
        mut self,
        label: impl Into<String>,
        amount: Decimal,
        rate: Option<Decimal>,
        category: BreakdownCategory,
    ) -> Self {
        if !amount.is_zero() {
            self.items.push(BreakdownItem {
                label: label.into(),
                amount,
                rate,
                category,
                color: category.color().to_string(),
            });
        }
        self
    }

    /// Adds an income-tax line.
    pub fn tax(self, label: impl Into<String>, amount: Decimal, rate: Option<Decimal>) -> Self {
        self.push(label, amount, rate, BreakdownCategory::IncomeTax)
    }

    /// Adds a social insurance line.
    pub fn social(self, label: impl Into<String>, amount: Decimal, rate: Option<Decimal>) -> Self {
        self.push(label, amount, rate, BreakdownCategory::SocialSecurity)
    }

    /// Adds a non-tax withholding line.
    pub fn deduction(self, label: impl Into<String>, amount: Decimal) -> Self {
        self.push(label, amount, None, BreakdownCategory::Deduction)
    }

    /// Adds an applied credit. `amount` is the positive value actually
    /// offset against tax; it is stored negated.
    pub fn credit(self, label: impl Into<String>, amount: Decimal) -> Self {
        self.push(label, -amount, None, BreakdownCategory::Credit)
    }

    /// Carries over lines from another result. Net lines are skipped.
    pub fn extend(mut self, items: impl IntoIterator<Item = BreakdownItem>) -> Self {
        for item in items {
            if item.category != BreakdownCategory::Net {
                self = self.push(item.label, item.amount, item.rate, item.category);
            }
        }
        self
    }

    /// Derives totals, appends the net line and returns the result.
    pub fn build(self) -> SalaryResult {
        let sum_of = |wanted: &[BreakdownCategory]| -> Decimal {
            self.items
                .iter()
                .filter(|item| wanted.contains(&item.category))
                .map(|item| item.amount)
                .sum()
        };

        let total_tax = sum_of(&[BreakdownCategory::IncomeTax, BreakdownCategory::Credit]);
        let social_security = sum_of(&[BreakdownCategory::SocialSecurity]);
        let other_deductions = sum_of(&[BreakdownCategory::Deduction]);
        let net_salary = self.gross_salary - total_tax - social_security - other_deductions;

        let effective_tax_rate = if self.gross_salary.is_zero() {
            Decimal::ZERO
        } else {
            (total_tax + social_security) / self.gross_salary * Decimal::ONE_HUNDRED
        };

        let mut breakdown = self.items;
        breakdown.push(BreakdownItem {
            label: "Net salary".to_string(),
            amount: net_salary,
            rate: None,
            category: BreakdownCategory::Net,
            color: BreakdownCategory::Net.color().to_string(),
        });

        SalaryResult {
            gross_salary: self.gross_salary,
            net_salary,
            total_tax,
            social_security,
            other_deductions,
            effective_tax_rate,
            breakdown,
        }
    }
}

/// How a net-to-gross inversion ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Convergence {
    /// Whether the residual fell inside the tolerance.
    pub converged: bool,
    /// Number of gross-to-net evaluations performed.
    pub iterations: u32,
    /// `net(estimate) - target` at the returned estimate.
    pub residual: Decimal,
}

/// The result of a net-to-gross inversion.
///
/// The salary result is always the best (last) estimate, even when the
/// iteration budget ran out; check [`Convergence::converged`] before
/// trusting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetToGrossResult {
    /// Full gross-to-net evaluation at the found gross salary.
    pub salary: SalaryResult,
    /// Convergence diagnostics.
    pub convergence: Convergence,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample() -> SalaryResult {
        SalaryResult::builder(dec("50000"))
            .tax("Income tax", dec("8000"), Some(dec("0.20")))
            .credit("Personal credit", dec("1500"))
            .social("Pension", dec("4000"), Some(dec("0.08")))
            .deduction("Student loan", dec("900"))
            .build()
    }

    #[test]
    fn test_totals_are_derived_from_lines() {
        let result = sample();
        assert_eq!(result.total_tax, dec("6500"));
        assert_eq!(result.social_security, dec("4000"));
        assert_eq!(result.other_deductions, dec("900"));
        assert_eq!(result.net_salary, dec("38600"));
        assert_eq!(result.total_deductions(), dec("11400"));
    }

    #[test]
    fn test_breakdown_sums_to_gross() {
        let result = sample();
        let sum: Decimal = result.breakdown.iter().map(|item| item.amount).sum();
        assert_eq!(sum, result.gross_salary);
    }

    #[test]
    fn test_credit_is_stored_negative() {
        let result = sample();
        let credit = result
            .breakdown
            .iter()
            .find(|item| item.category == BreakdownCategory::Credit)
            .unwrap();
        assert_eq!(credit.amount, dec("-1500"));
        assert_eq!(credit.color, "#3b82f6");
    }

    #[test]
    fn test_effective_rate_excludes_other_deductions() {
        let result = sample();
        // (6500 + 4000) / 50000 * 100
        assert_eq!(result.effective_tax_rate, dec("21"));
    }

    #[test]
    fn test_zero_gross_has_zero_effective_rate() {
        let result = SalaryResult::builder(Decimal::ZERO).build();
        assert_eq!(result.net_salary, Decimal::ZERO);
        assert_eq!(result.effective_tax_rate, Decimal::ZERO);
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].category, BreakdownCategory::Net);
    }

    #[test]
    fn test_zero_amount_lines_are_dropped() {
        let result = SalaryResult::builder(dec("1000"))
            .tax("State tax", Decimal::ZERO, None)
            .social("Pension", dec("100"), None)
            .build();
        assert_eq!(result.breakdown.len(), 2);
        assert!(result.breakdown.iter().all(|item| item.label != "State tax"));
    }

    #[test]
    fn test_rounded_rounds_half_away_from_zero() {
        let result = SalaryResult::builder(dec("1000"))
            .tax("Income tax", dec("100.005"), None)
            .build()
            .rounded();
        assert_eq!(result.total_tax, dec("100.01"));
        assert_eq!(result.net_salary, dec("900.00"));
    }

    #[test]
    fn test_extend_carries_lines_but_not_net() {
        let source = sample();
        let copied = SalaryResult::builder(dec("50000"))
            .extend(source.breakdown.clone())
            .build();
        assert_eq!(copied, source);
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&BreakdownCategory::SocialSecurity).unwrap();
        assert_eq!(json, "\"social_security\"");
    }

    #[test]
    fn test_rate_is_omitted_when_absent() {
        let result = sample();
        let json = serde_json::to_value(&result).unwrap();
        let student_loan = &json["breakdown"][3];
        assert_eq!(student_loan["label"], "Student loan");
        assert!(student_loan.get("rate").is_none());
    }
}
