//! Net-to-gross inversion.
//!
//! Every gross-to-net formula produces a net salary that is continuous and
//! non-decreasing in gross, so the inverse is found by root-finding on
//! `net(gross) - target`. The first correction assumes a slope of one
//! (`estimate -= diff`); later corrections use the secant slope between
//! the last two estimates, clamped to `[MIN_SLOPE, 1]` so a flat segment
//! cannot throw the estimate far away.
//!
//! The last estimate is always returned. Running out of iterations is
//! reported through [`Convergence`], never as an error.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::SolverSettings;
use crate::error::EngineResult;
use crate::models::{Convergence, NetToGrossResult, SalaryResult};

const MIN_SLOPE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Finds the gross salary whose net equals `target`.
///
/// `gross_to_net` is evaluated once per iteration; the first estimate is
/// `target * initial_multiplier`. Errors from `gross_to_net` are returned
/// unchanged.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::invert;
/// use salary_engine::config::SolverSettings;
/// use salary_engine::error::EngineResult;
/// use salary_engine::models::SalaryResult;
/// use rust_decimal::Decimal;
///
/// // A flat 25% tax.
/// let flat = |gross: Decimal| -> EngineResult<SalaryResult> {
///     Ok(SalaryResult::builder(gross)
///         .tax("Income tax", gross * Decimal::new(25, 2), None)
///         .build())
/// };
///
/// let result = invert(Decimal::from(30_000), Decimal::new(13, 1), &SolverSettings::default(), flat)?;
/// assert!(result.convergence.converged);
/// assert_eq!(result.salary.gross_salary, Decimal::from(40_000));
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
pub fn invert<F>(
    target: Decimal,
    initial_multiplier: Decimal,
    settings: &SolverSettings,
    mut gross_to_net: F,
) -> EngineResult<NetToGrossResult>
where
    F: FnMut(Decimal) -> EngineResult<SalaryResult>,
{
    let mut estimate = (target * initial_multiplier).round_dp(2);
    let mut salary = gross_to_net(estimate)?;
    let mut diff = salary.net_salary - target;
    let mut iterations = 1;
    let mut previous: Option<(Decimal, Decimal)> = None;

    debug!(%target, %estimate, %diff, iteration = iterations, "net-to-gross step");

    while diff.abs() >= settings.tolerance && iterations < settings.max_iterations {
        let slope = match previous {
            Some((last_estimate, last_diff)) if last_estimate != estimate => {
                ((diff - last_diff) / (estimate - last_estimate)).clamp(MIN_SLOPE, Decimal::ONE)
            }
            _ => Decimal::ONE,
        };

        previous = Some((estimate, diff));
        estimate = (estimate - diff / slope).round_dp(2);
        salary = gross_to_net(estimate)?;
        diff = salary.net_salary - target;
        iterations += 1;

        debug!(%target, %estimate, %diff, %slope, iteration = iterations, "net-to-gross step");
    }

    let converged = diff.abs() < settings.tolerance;
    if !converged {
        warn!(
            %target,
            %estimate,
            residual = %diff,
            iterations,
            "net-to-gross did not converge; returning last estimate"
        );
    }

    Ok(NetToGrossResult {
        salary,
        convergence: Convergence {
            converged,
            iterations,
            residual: diff,
        },
    })
}
