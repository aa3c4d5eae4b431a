//! Pay frequency conversion.
//!
//! The generic converter uses fixed calendar constants (52 weeks, 12 months)
//! and the configured working time (`hours_per_week * 52` hours, 260 days by
//! default). The per-country variant and the time-based salary helpers use
//! each country's own canonical hours and days per year instead. The two sets
//! of constants must not be mixed.

use rust_decimal::Decimal;

use super::countries::profile;
use super::router::calculate_gross_to_net;
use crate::config::FrequencySettings;
use crate::error::EngineResult;
use crate::models::{Country, FrequencyConversion, GenericOptions, PayFrequency, SalaryResult};

const WEEKS_PER_YEAR: u32 = 52;
const MONTHS_PER_YEAR: u32 = 12;

#[derive(Debug, Clone, Copy)]
struct WorkingTime {
    hours_per_year: Decimal,
    days_per_year: Decimal,
}

impl From<&FrequencySettings> for WorkingTime {
    fn from(settings: &FrequencySettings) -> Self {
        Self {
            hours_per_year: settings.hours_per_week * Decimal::from(WEEKS_PER_YEAR),
            days_per_year: settings.working_days_per_year,
        }
    }
}

impl From<Country> for WorkingTime {
    fn from(country: Country) -> Self {
        let profile = profile(country);
        Self {
            hours_per_year: Decimal::from(profile.hours_per_year),
            days_per_year: Decimal::from(profile.working_days_per_year),
        }
    }
}

impl WorkingTime {
    fn periods(&self, frequency: PayFrequency) -> Decimal {
        match frequency {
            PayFrequency::Daily => self.days_per_year,
            PayFrequency::Hourly => self.hours_per_year,
            calendar => calendar.periods_per_year().unwrap_or(Decimal::ONE),
        }
    }

    fn to_annual(&self, amount: Decimal, from: PayFrequency) -> Decimal {
        amount * self.periods(from)
    }

    fn from_annual(&self, annual: Decimal, to: PayFrequency) -> Decimal {
        per(annual, self.periods(to))
    }

    fn convert(&self, amount: Decimal, from: PayFrequency) -> FrequencyConversion {
        let annual = self.to_annual(amount, from);
        FrequencyConversion {
            annual,
            monthly: per(annual, Decimal::from(MONTHS_PER_YEAR)),
            weekly: per(annual, Decimal::from(WEEKS_PER_YEAR)),
            daily: per(annual, self.days_per_year),
            hourly: per(annual, self.hours_per_year),
        }
    }
}

// A zero working time yields zero rather than a division panic.
fn per(amount: Decimal, periods: Decimal) -> Decimal {
    if periods.is_zero() {
        Decimal::ZERO
    } else {
        amount / periods
    }
}

/// Expresses `amount` in every display frequency, assuming a week of
/// `hours_per_week` hours and the default 260-day year.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::convert_frequency;
/// use salary_engine::models::PayFrequency;
/// use rust_decimal::Decimal;
///
/// let conversion = convert_frequency(Decimal::from(25), PayFrequency::Hourly, Decimal::from(40));
/// assert_eq!(conversion.annual, Decimal::from(52_000));
/// assert_eq!(conversion.weekly, Decimal::from(1_000));
/// assert_eq!(conversion.daily, Decimal::from(200));
/// ```
pub fn convert_frequency(
    amount: Decimal,
    from: PayFrequency,
    hours_per_week: Decimal,
) -> FrequencyConversion {
    let settings = FrequencySettings {
        hours_per_week,
        ..FrequencySettings::default()
    };
    convert_frequency_with(amount, from, &settings)
}

/// Like [`convert_frequency`], with explicit converter settings.
pub fn convert_frequency_with(
    amount: Decimal,
    from: PayFrequency,
    settings: &FrequencySettings,
) -> FrequencyConversion {
    WorkingTime::from(settings).convert(amount, from)
}

/// Expresses `amount` in every display frequency using the country's
/// canonical hours and days per year.
pub fn convert_frequency_for_country(
    amount: Decimal,
    from: PayFrequency,
    country: Country,
) -> FrequencyConversion {
    WorkingTime::from(country).convert(amount, from)
}

/// Annualises an amount quoted in `from`.
pub fn to_annual(amount: Decimal, from: PayFrequency, settings: &FrequencySettings) -> Decimal {
    WorkingTime::from(settings).to_annual(amount, from)
}

/// Splits an annual amount into `to` periods.
pub fn from_annual(annual: Decimal, to: PayFrequency, settings: &FrequencySettings) -> Decimal {
    WorkingTime::from(settings).from_annual(annual, to)
}

fn salary_from(
    country_code: &str,
    amount: Decimal,
    frequency: PayFrequency,
    options: &GenericOptions,
) -> EngineResult<SalaryResult> {
    let country: Country = country_code.parse()?;
    let annual = WorkingTime::from(country).to_annual(amount, frequency);
    calculate_gross_to_net(country_code, annual, options)
}

/// Gross-to-net on an hourly rate times the country's canonical hours.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::hourly_to_salary;
/// use salary_engine::models::GenericOptions;
/// use rust_decimal::Decimal;
///
/// // 1,607 hours at 30 EUR
/// let result = hourly_to_salary("FR", Decimal::from(30), &GenericOptions::default())?;
/// assert_eq!(result.gross_salary, Decimal::from(48_210));
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
pub fn hourly_to_salary(
    country_code: &str,
    hourly_rate: Decimal,
    options: &GenericOptions,
) -> EngineResult<SalaryResult> {
    salary_from(country_code, hourly_rate, PayFrequency::Hourly, options)
}

/// Gross-to-net on a daily rate times the country's canonical working days.
pub fn daily_to_salary(
    country_code: &str,
    daily_rate: Decimal,
    options: &GenericOptions,
) -> EngineResult<SalaryResult> {
    salary_from(country_code, daily_rate, PayFrequency::Daily, options)
}

/// Gross-to-net on a weekly wage times 52.
pub fn weekly_to_salary(
    country_code: &str,
    weekly_wage: Decimal,
    options: &GenericOptions,
) -> EngineResult<SalaryResult> {
    salary_from(country_code, weekly_wage, PayFrequency::Weekly, options)
}

/// Gross-to-net on a monthly salary times 12.
pub fn monthly_to_salary(
    country_code: &str,
    monthly_salary: Decimal,
    options: &GenericOptions,
) -> EngineResult<SalaryResult> {
    salary_from(country_code, monthly_salary, PayFrequency::Monthly, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_annual_amount_is_split_with_fixed_constants() {
        let conversion = convert_frequency(dec("52000"), PayFrequency::Annual, dec("40"));
        assert_eq!(conversion.annual, dec("52000"));
        assert_eq!(conversion.weekly, dec("1000"));
        assert_eq!(conversion.daily, dec("200"));
        assert_eq!(conversion.hourly, dec("25"));
        assert_eq!(conversion.monthly, dec("52000") / dec("12"));
    }

    #[test]
    fn test_monthly_and_bi_weekly_inputs() {
        let monthly = convert_frequency(dec("5000"), PayFrequency::Monthly, dec("40"));
        assert_eq!(monthly.annual, dec("60000"));

        let bi_weekly = convert_frequency(dec("2000"), PayFrequency::BiWeekly, dec("40"));
        assert_eq!(bi_weekly.annual, dec("52000"));
        assert_eq!(bi_weekly.weekly, dec("1000"));
    }

    #[test]
    fn test_hours_per_week_changes_only_the_hourly_figure() {
        let full = convert_frequency(dec("39000"), PayFrequency::Annual, dec("40"));
        let short = convert_frequency(dec("39000"), PayFrequency::Annual, dec("37.5"));
        assert_eq!(short.hourly, dec("20"));
        assert_eq!(short.weekly, full.weekly);
        assert_eq!(short.daily, full.daily);
    }

    #[test]
    fn test_daily_input_uses_working_days() {
        let conversion = convert_frequency(dec("200"), PayFrequency::Daily, dec("40"));
        assert_eq!(conversion.annual, dec("52000"));
    }

    #[test]
    fn test_zero_hours_do_not_panic() {
        let conversion = convert_frequency(dec("52000"), PayFrequency::Annual, Decimal::ZERO);
        assert_eq!(conversion.hourly, Decimal::ZERO);
        assert_eq!(conversion.weekly, dec("1000"));
    }

    #[test]
    fn test_to_and_from_annual() {
        let settings = FrequencySettings::default();
        assert_eq!(to_annual(dec("1000"), PayFrequency::SemiMonthly, &settings), dec("24000"));
        assert_eq!(from_annual(dec("24000"), PayFrequency::Quarterly, &settings), dec("6000"));
        assert_eq!(from_annual(dec("83200"), PayFrequency::Hourly, &settings), dec("40"));
    }

    #[test]
    fn test_country_conversion_uses_canonical_working_time() {
        let france = convert_frequency_for_country(dec("48210"), PayFrequency::Annual, Country::France);
        assert_eq!(france.hourly, dec("30"));
        assert_eq!(france.daily, dec("48210") / dec("218"));

        let swiss = convert_frequency_for_country(dec("50"), PayFrequency::Hourly, Country::Switzerland);
        assert_eq!(swiss.annual, dec("109200"));
    }

    #[test]
    fn test_time_based_helpers() {
        let options = GenericOptions::default();
        let hourly = hourly_to_salary("CH", dec("40"), &options).unwrap();
        assert_eq!(hourly.gross_salary, dec("87360"));

        let daily = daily_to_salary("FR", dec("250"), &options).unwrap();
        assert_eq!(daily.gross_salary, dec("54500"));

        let weekly = weekly_to_salary("UK", dec("600"), &options).unwrap();
        assert_eq!(weekly.gross_salary, dec("31200"));

        let monthly = monthly_to_salary("DE", dec("4000"), &options).unwrap();
        assert_eq!(
            monthly,
            calculate_gross_to_net("DE", dec("48000"), &options).unwrap()
        );
    }

    #[test]
    fn test_time_based_helpers_reject_unknown_country() {
        let result = hourly_to_salary("XX", dec("20"), &GenericOptions::default());
        assert!(matches!(result, Err(EngineError::UnsupportedCountry { .. })));
    }
}
