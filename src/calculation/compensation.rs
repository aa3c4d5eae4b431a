//! Compensation event calculators.
//!
//! Thin wrappers over the routed gross-to-net formula. Bonus and commission
//! use marginal tax allocation: the tax attributed to the extra pay is the
//! difference in income tax plus social security between the base salary
//! alone and the base salary with the extra pay on top. Jurisdictions with
//! flat supplemental withholding rates are not modelled.

use rust_decimal::Decimal;
use tracing::debug;

use super::brackets::non_negative;
use super::countries::profile;
use super::frequency::to_annual;
use super::router::CountryOptions;
use crate::config::FrequencySettings;
use crate::error::EngineResult;
use crate::models::{
    BonusBreakdown, BonusOptions, BonusResult, BreakdownCategory, CommissionBreakdown,
    CommissionOptions, CommissionResult, ContractorBreakdown, ContractorOptions, ContractorResult,
    Country, EmploymentType, GenericOptions, OvertimeBreakdown, OvertimeOptions, OvertimeResult,
    SalaryResult,
};

const DEFAULT_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);
const DEFAULT_WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

fn narrow(country_code: &str, options: &GenericOptions) -> EngineResult<CountryOptions> {
    let country: Country = country_code.parse()?;
    CountryOptions::narrow(country, options)
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * Decimal::ONE_HUNDRED
    }
}

/// Annual gross-to-net on regular plus overtime hours.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::calculate_overtime_pay;
/// use salary_engine::models::{GenericOptions, OvertimeOptions};
/// use rust_decimal::Decimal;
///
/// let overtime = OvertimeOptions {
///     hourly_rate: Decimal::from(20),
///     regular_hours_per_week: Decimal::from(40),
///     overtime_hours_per_week: Decimal::from(5),
///     overtime_multiplier: None,
///     weeks_per_year: None,
/// };
/// let result = calculate_overtime_pay("UK", &overtime, &GenericOptions::default())?;
/// assert_eq!(result.salary.gross_salary, Decimal::from(49_400));
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
pub fn calculate_overtime_pay(
    country_code: &str,
    overtime: &OvertimeOptions,
    options: &GenericOptions,
) -> EngineResult<OvertimeResult> {
    let narrowed = narrow(country_code, options)?;
    let multiplier = overtime
        .overtime_multiplier
        .unwrap_or(DEFAULT_OVERTIME_MULTIPLIER);
    let weeks = overtime.weeks_per_year.unwrap_or(DEFAULT_WEEKS_PER_YEAR);

    let overtime_rate = overtime.hourly_rate * multiplier;
    let regular_pay = overtime.regular_hours_per_week * overtime.hourly_rate * weeks;
    let overtime_pay = overtime.overtime_hours_per_week * overtime_rate * weeks;

    debug!(country = %narrowed.country(), %regular_pay, %overtime_pay, "overtime gross");

    Ok(OvertimeResult {
        salary: narrowed.gross_to_net(regular_pay + overtime_pay)?,
        overtime_breakdown: OvertimeBreakdown {
            regular_pay,
            overtime_pay,
            overtime_rate,
        },
    })
}

/// Gross-to-net on base salary plus a one-off bonus, with the bonus taxed
/// at the margin.
pub fn calculate_bonus_tax(
    country_code: &str,
    bonus: &BonusOptions,
    options: &GenericOptions,
) -> EngineResult<BonusResult> {
    let marginal = narrow(country_code, options)?.marginal(bonus.base_salary, bonus.bonus_amount)?;
    let bonus_tax = marginal.withheld();

    Ok(BonusResult {
        bonus_breakdown: BonusBreakdown {
            bonus_amount: bonus.bonus_amount,
            bonus_tax,
            net_bonus: bonus.bonus_amount - bonus_tax,
            bonus_tax_rate: percent_of(bonus_tax, bonus.bonus_amount),
        },
        salary: marginal.combined,
    })
}

/// Gross-to-net on base salary plus annualised commission, with the
/// commission taxed at the margin.
///
/// Daily and hourly commission is annualised with the default working time;
/// use [`calculate_commission_with`] to supply configured settings.
pub fn calculate_commission(
    country_code: &str,
    commission: &CommissionOptions,
    options: &GenericOptions,
) -> EngineResult<CommissionResult> {
    calculate_commission_with(country_code, commission, options, &FrequencySettings::default())
}

/// [`calculate_commission`] with explicit working-time settings.
pub fn calculate_commission_with(
    country_code: &str,
    commission: &CommissionOptions,
    options: &GenericOptions,
    frequency: &FrequencySettings,
) -> EngineResult<CommissionResult> {
    let annual_commission = to_annual(
        commission.commission_amount,
        commission.commission_frequency,
        frequency,
    );
    let marginal =
        narrow(country_code, options)?.marginal(commission.base_salary, annual_commission)?;
    let commission_tax = marginal.withheld();

    Ok(CommissionResult {
        commission_breakdown: CommissionBreakdown {
            annual_commission,
            commission_tax,
            net_commission: annual_commission - commission_tax,
            commission_tax_rate: percent_of(commission_tax, annual_commission),
        },
        salary: marginal.combined,
    })
}

/// Contractor income: ordinary income tax on net business income plus the
/// country's flat self-employment levy in place of employee social security.
///
/// The result is expressed against gross business income, with business
/// expenses shown as a deduction line.
pub fn calculate_contractor_income(
    country_code: &str,
    contractor: &ContractorOptions,
    options: &GenericOptions,
) -> EngineResult<ContractorResult> {
    let country: Country = country_code.parse()?;
    let self_employed = GenericOptions {
        employment_type: Some(EmploymentType::SelfEmployed),
        ..options.clone()
    };
    let narrowed = CountryOptions::narrow(country, &self_employed)?;

    let net_business_income = contractor.gross_income - contractor.business_expenses;
    let ordinary = narrowed.gross_to_net(net_business_income)?;

    let self_employment_rate = profile(country).self_employment_rate;
    let self_employment_tax = non_negative(net_business_income) * self_employment_rate;

    let tax_lines = ordinary.breakdown.into_iter().filter(|item| {
        matches!(
            item.category,
            BreakdownCategory::IncomeTax | BreakdownCategory::Credit
        )
    });

    let salary = SalaryResult::builder(contractor.gross_income)
        .extend(tax_lines)
        .social(
            "Self-employment tax",
            self_employment_tax,
            Some(self_employment_rate),
        )
        .deduction("Business expenses", contractor.business_expenses)
        .build();

    debug!(country = %country, %net_business_income, %self_employment_tax, "contractor income");

    Ok(ContractorResult {
        contractor_breakdown: ContractorBreakdown {
            business_expenses: contractor.business_expenses,
            net_business_income,
            self_employment_rate,
            self_employment_tax,
            income_tax: ordinary.total_tax,
        },
        salary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::router::calculate_gross_to_net;
    use crate::error::EngineError;
    use crate::models::PayFrequency;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn overtime(rate: &str, regular: &str, extra: &str) -> OvertimeOptions {
        OvertimeOptions {
            hourly_rate: dec(rate),
            regular_hours_per_week: dec(regular),
            overtime_hours_per_week: dec(extra),
            overtime_multiplier: None,
            weeks_per_year: None,
        }
    }

    #[test]
    fn test_overtime_defaults() {
        let result =
            calculate_overtime_pay("UK", &overtime("20", "40", "5"), &GenericOptions::default())
                .unwrap();
        assert_eq!(result.overtime_breakdown.regular_pay, dec("41600"));
        assert_eq!(result.overtime_breakdown.overtime_rate, dec("30"));
        assert_eq!(result.overtime_breakdown.overtime_pay, dec("7800"));
        assert_eq!(
            result.salary,
            calculate_gross_to_net("UK", dec("49400"), &GenericOptions::default()).unwrap()
        );
    }

    #[test]
    fn test_overtime_custom_multiplier_and_weeks() {
        let options = OvertimeOptions {
            overtime_multiplier: Some(dec("2")),
            weeks_per_year: Some(dec("48")),
            ..overtime("25", "38", "4")
        };
        let result = calculate_overtime_pay("AU", &options, &GenericOptions::default()).unwrap();
        assert_eq!(result.overtime_breakdown.overtime_rate, dec("50"));
        assert_eq!(result.overtime_breakdown.regular_pay, dec("45600"));
        assert_eq!(result.overtime_breakdown.overtime_pay, dec("9600"));
        assert_eq!(result.salary.gross_salary, dec("55200"));
    }

    #[test]
    fn test_bonus_in_basic_rate_band() {
        let bonus = BonusOptions {
            base_salary: dec("30000"),
            bonus_amount: dec("5000"),
        };
        let result = calculate_bonus_tax("UK", &bonus, &GenericOptions::default()).unwrap();
        // 20% income tax plus 8% NI
        assert_eq!(result.bonus_breakdown.bonus_tax, dec("1400"));
        assert_eq!(result.bonus_breakdown.net_bonus, dec("3600"));
        assert_eq!(result.bonus_breakdown.bonus_tax_rate, dec("28"));
        assert_eq!(result.salary.gross_salary, dec("35000"));
    }

    #[test]
    fn test_zero_bonus_has_zero_rate() {
        let bonus = BonusOptions {
            base_salary: dec("50000"),
            bonus_amount: Decimal::ZERO,
        };
        let result = calculate_bonus_tax("DE", &bonus, &GenericOptions::default()).unwrap();
        assert_eq!(result.bonus_breakdown.bonus_tax, Decimal::ZERO);
        assert_eq!(result.bonus_breakdown.bonus_tax_rate, Decimal::ZERO);
    }

    #[test]
    fn test_commission_is_annualised() {
        let commission = CommissionOptions {
            base_salary: dec("30000"),
            commission_amount: dec("500"),
            commission_frequency: PayFrequency::Monthly,
        };
        let result = calculate_commission("UK", &commission, &GenericOptions::default()).unwrap();
        assert_eq!(result.commission_breakdown.annual_commission, dec("6000"));
        assert_eq!(result.commission_breakdown.commission_tax, dec("1680"));
        assert_eq!(result.commission_breakdown.net_commission, dec("4320"));
        assert_eq!(result.salary.gross_salary, dec("36000"));
    }

    #[test]
    fn test_quarterly_commission() {
        let commission = CommissionOptions {
            base_salary: dec("50000"),
            commission_amount: dec("2500"),
            commission_frequency: PayFrequency::Quarterly,
        };
        let result = calculate_commission("IE", &commission, &GenericOptions::default()).unwrap();
        assert_eq!(result.commission_breakdown.annual_commission, dec("10000"));
    }

    #[test]
    fn test_hourly_commission_uses_supplied_working_week() {
        let commission = CommissionOptions {
            base_salary: dec("30000"),
            commission_amount: dec("2"),
            commission_frequency: PayFrequency::Hourly,
        };
        let short_week = FrequencySettings {
            hours_per_week: dec("35"),
            ..Default::default()
        };

        let standard = calculate_commission("UK", &commission, &GenericOptions::default()).unwrap();
        let configured =
            calculate_commission_with("UK", &commission, &GenericOptions::default(), &short_week)
                .unwrap();

        assert_eq!(standard.commission_breakdown.annual_commission, dec("4160"));
        assert_eq!(configured.commission_breakdown.annual_commission, dec("3640"));
    }

    #[test]
    fn test_contractor_in_the_uk() {
        let contractor = ContractorOptions {
            gross_income: dec("60000"),
            business_expenses: dec("10000"),
        };
        let result =
            calculate_contractor_income("UK", &contractor, &GenericOptions::default()).unwrap();

        assert_eq!(result.contractor_breakdown.net_business_income, dec("50000"));
        assert_eq!(result.contractor_breakdown.income_tax, dec("7486"));
        assert_eq!(result.contractor_breakdown.self_employment_tax, dec("3000"));
        assert_eq!(result.salary.total_tax, dec("7486"));
        assert_eq!(result.salary.social_security, dec("3000"));
        assert_eq!(result.salary.other_deductions, dec("10000"));
        assert_eq!(result.salary.net_salary, dec("39514"));
    }

    #[test]
    fn test_contractor_without_levy() {
        let contractor = ContractorOptions {
            gross_income: dec("100000"),
            business_expenses: dec("20000"),
        };
        let result =
            calculate_contractor_income("AU", &contractor, &GenericOptions::default()).unwrap();
        assert_eq!(result.contractor_breakdown.self_employment_tax, Decimal::ZERO);
        assert_eq!(result.salary.total_tax, dec("14788"));
        assert_eq!(result.salary.net_salary, dec("65212"));
    }

    #[test]
    fn test_contractor_breakdown_sums_to_gross_income() {
        let contractor = ContractorOptions {
            gross_income: dec("90000"),
            business_expenses: dec("15000"),
        };
        for country in Country::ALL {
            let result =
                calculate_contractor_income(country.code(), &contractor, &GenericOptions::default())
                    .unwrap();
            let sum: Decimal = result.salary.breakdown.iter().map(|item| item.amount).sum();
            assert_eq!(sum, dec("90000"), "{}", country);
        }
    }

    #[test]
    fn test_wrappers_reject_unknown_country() {
        let bonus = BonusOptions {
            base_salary: dec("50000"),
            bonus_amount: dec("1000"),
        };
        let result = calculate_bonus_tax("ZZ", &bonus, &GenericOptions::default());
        assert!(matches!(result, Err(EngineError::UnsupportedCountry { .. })));
    }
}
