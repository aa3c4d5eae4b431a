//! Switzerland: social insurance, occupational pension, direct federal tax
//! and a flat cantonal plus communal rate per canton (2025).
//!
//! Social contributions and professional expenses are deducted before
//! either tax is computed. Cantonal tariffs are approximated by one
//! effective rate per canton for a resident of the capital commune.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::brackets::{
    TaxBracket, band, money, non_negative, pct, phase_in, progressive_tax, top_band,
};
use crate::error::EngineError;
use crate::models::SalaryResult;

/// Standard full-time hours per year (42 h x 52).
pub const HOURS_PER_YEAR: u32 = 2_184;
/// Standard working days per year.
pub const WORKING_DAYS_PER_YEAR: u32 = 260;
/// Initial gross/net ratio for net-to-gross inversion.
pub const NET_TO_GROSS_MULTIPLIER: Decimal = pct(125, 0);
/// AHV/IV/EO rate for the self-employed.
pub const SELF_EMPLOYMENT_RATE: Decimal = pct(10, 0);

const AHV_RATE: Decimal = pct(53, 1);
const ALV_RATE: Decimal = pct(11, 1);
const NBU_RATE: Decimal = pct(1, 0);
const INSURED_SALARY_CAP: Decimal = money(148_200);

const BVG_ENTRY_THRESHOLD: Decimal = money(22_680);
const BVG_COORDINATION_DEDUCTION: Decimal = money(26_460);
const BVG_MAX_SALARY: Decimal = money(90_720);
const BVG_MIN_COORDINATED: Decimal = money(3_780);
const BVG_ENTRY_RATE: Decimal = pct(50, 0);

const PROFESSIONAL_EXPENSE_RATE: Decimal = pct(3, 0);
const PROFESSIONAL_EXPENSE_MIN: Decimal = money(2_000);
const PROFESSIONAL_EXPENSE_MAX: Decimal = money(4_000);

const CHILD_DEDUCTION: Decimal = money(6_800);
const CHILD_TAX_CREDIT: Decimal = money(263);
const FEDERAL_MAX_AVERAGE_RATE: Decimal = pct(115, 1);

const FEDERAL_SINGLE: &[TaxBracket] = &[
    band(0, 15_200, Decimal::ZERO),
    band(15_200, 33_200, pct(77, 2)),
    band(33_200, 43_500, pct(88, 2)),
    band(43_500, 58_000, pct(264, 2)),
    band(58_000, 76_100, pct(297, 2)),
    band(76_100, 82_000, pct(594, 2)),
    band(82_000, 108_800, pct(66, 1)),
    band(108_800, 141_500, pct(88, 1)),
    band(141_500, 184_900, pct(11, 0)),
    top_band(184_900, pct(132, 1)),
];

const FEDERAL_MARRIED: &[TaxBracket] = &[
    band(0, 29_700, Decimal::ZERO),
    band(29_700, 53_400, pct(1, 0)),
    band(53_400, 61_300, pct(2, 0)),
    band(61_300, 79_100, pct(3, 0)),
    band(79_100, 94_900, pct(4, 0)),
    band(94_900, 108_600, pct(5, 0)),
    band(108_600, 120_500, pct(6, 0)),
    band(120_500, 130_500, pct(7, 0)),
    band(130_500, 138_300, pct(8, 0)),
    band(138_300, 144_200, pct(9, 0)),
    band(144_200, 148_200, pct(10, 0)),
    band(148_200, 150_300, pct(11, 0)),
    band(150_300, 152_300, pct(12, 0)),
    top_band(152_300, pct(13, 0)),
];

/// Swiss canton.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Canton {
    /// Zurich.
    #[default]
    Zurich,
    /// Bern.
    Bern,
    /// Lucerne.
    Lucerne,
    /// Uri.
    Uri,
    /// Schwyz.
    Schwyz,
    /// Obwalden.
    Obwalden,
    /// Nidwalden.
    Nidwalden,
    /// Glarus.
    Glarus,
    /// Zug.
    Zug,
    /// Fribourg.
    Fribourg,
    /// Solothurn.
    Solothurn,
    /// Basel-Stadt.
    Basel,
    /// Basel-Landschaft.
    BaselLandschaft,
    /// Schaffhausen.
    Schaffhausen,
    /// Appenzell Ausserrhoden.
    AppenzellAusserrhoden,
    /// Appenzell Innerrhoden.
    AppenzellInnerrhoden,
    /// St. Gallen.
    StGallen,
    /// Graubünden.
    Graubunden,
    /// Aargau.
    Aargau,
    /// Thurgau.
    Thurgau,
    /// Ticino.
    Ticino,
    /// Vaud.
    Vaud,
    /// Valais.
    Valais,
    /// Neuchâtel.
    Neuchatel,
    /// Geneva.
    Geneva,
    /// Jura.
    Jura,
}

impl Canton {
    /// Combined cantonal and communal effective rate on taxable income.
    pub fn effective_rate(&self) -> Decimal {
        let per_mille = match self {
            Canton::Zurich => 100,
            Canton::Bern => 130,
            Canton::Lucerne => 90,
            Canton::Uri => 80,
            Canton::Schwyz => 65,
            Canton::Obwalden => 75,
            Canton::Nidwalden => 70,
            Canton::Glarus => 90,
            Canton::Zug => 60,
            Canton::Fribourg => 120,
            Canton::Solothurn => 115,
            Canton::Basel => 130,
            Canton::BaselLandschaft => 120,
            Canton::Schaffhausen => 100,
            Canton::AppenzellAusserrhoden => 90,
            Canton::AppenzellInnerrhoden => 75,
            Canton::StGallen => 105,
            Canton::Graubunden => 100,
            Canton::Aargau => 100,
            Canton::Thurgau => 95,
            Canton::Ticino => 110,
            Canton::Vaud => 135,
            Canton::Valais => 110,
            Canton::Neuchatel => 135,
            Canton::Geneva => 130,
            Canton::Jura => 135,
        };
        pct(per_mille, 1)
    }
}

impl FromStr for Canton {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', '_', '.'], " ");
        let canton = match key.split_whitespace().collect::<Vec<_>>().join(" ").as_str() {
            "zh" | "zurich" | "zürich" => Canton::Zurich,
            "be" | "bern" | "berne" => Canton::Bern,
            "lu" | "lucerne" | "luzern" => Canton::Lucerne,
            "ur" | "uri" => Canton::Uri,
            "sz" | "schwyz" => Canton::Schwyz,
            "ow" | "obwalden" => Canton::Obwalden,
            "nw" | "nidwalden" => Canton::Nidwalden,
            "gl" | "glarus" => Canton::Glarus,
            "zg" | "zug" => Canton::Zug,
            "fr" | "fribourg" | "freiburg" => Canton::Fribourg,
            "so" | "solothurn" => Canton::Solothurn,
            "bs" | "basel" | "basel stadt" => Canton::Basel,
            "bl" | "basel landschaft" | "baselland" => Canton::BaselLandschaft,
            "sh" | "schaffhausen" => Canton::Schaffhausen,
            "ar" | "appenzell ausserrhoden" => Canton::AppenzellAusserrhoden,
            "ai" | "appenzell innerrhoden" => Canton::AppenzellInnerrhoden,
            "sg" | "st gallen" | "sankt gallen" => Canton::StGallen,
            "gr" | "graubunden" | "graubünden" | "grisons" => Canton::Graubunden,
            "ag" | "aargau" => Canton::Aargau,
            "tg" | "thurgau" => Canton::Thurgau,
            "ti" | "ticino" => Canton::Ticino,
            "vd" | "vaud" => Canton::Vaud,
            "vs" | "valais" | "wallis" => Canton::Valais,
            "ne" | "neuchatel" | "neuchâtel" => Canton::Neuchatel,
            "ge" | "geneva" | "geneve" | "genève" | "genf" => Canton::Geneva,
            "ju" | "jura" => Canton::Jura,
            _ => {
                return Err(EngineError::InvalidOption {
                    field: "ch_canton".to_string(),
                    message: format!("unknown canton '{}'", s),
                });
            }
        };
        Ok(canton)
    }
}

/// Switzerland options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitzerlandOptions {
    /// Canton of residence. Defaults to Zurich.
    pub canton: Canton,
    /// Married tariff for the direct federal tax.
    pub married: bool,
    /// Dependent children.
    pub children: u32,
    /// Age in years, which sets the occupational pension credit rate.
    pub age: u32,
}

impl Default for SwitzerlandOptions {
    fn default() -> Self {
        Self {
            canton: Canton::default(),
            married: false,
            children: 0,
            age: 35,
        }
    }
}

/// Employee share of the BVG age credit.
pub fn occupational_pension_rate(age: u32) -> Decimal {
    match age {
        0..=24 => Decimal::ZERO,
        25..=34 => pct(35, 1),
        35..=44 => pct(5, 0),
        45..=54 => pct(75, 1),
        _ => pct(9, 0),
    }
}

/// Employee BVG contribution on the coordinated salary.
pub fn occupational_pension(gross: Decimal, age: u32) -> Decimal {
    let coordinated = (gross.min(BVG_MAX_SALARY) - BVG_COORDINATION_DEDUCTION)
        .max(BVG_MIN_COORDINATED);
    phase_in(
        coordinated * occupational_pension_rate(age),
        gross - BVG_ENTRY_THRESHOLD,
        BVG_ENTRY_RATE,
    )
}

/// Direct federal tax, never above 11.5% of taxable income.
pub fn federal_tax(taxable: Decimal, married: bool) -> Decimal {
    let tariff = if married { FEDERAL_MARRIED } else { FEDERAL_SINGLE };
    progressive_tax(taxable, tariff).min(non_negative(taxable) * FEDERAL_MAX_AVERAGE_RATE)
}

/// Computes Swiss take-home pay.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::countries::switzerland::{Canton, SwitzerlandOptions, gross_to_net};
/// use rust_decimal::Decimal;
///
/// let zug = SwitzerlandOptions { canton: Canton::Zug, ..Default::default() };
/// let basel = SwitzerlandOptions { canton: Canton::Basel, ..Default::default() };
/// let gross = Decimal::from(80_000);
/// assert!(gross_to_net(gross, &zug).net_salary > gross_to_net(gross, &basel).net_salary);
/// ```
pub fn gross_to_net(gross: Decimal, options: &SwitzerlandOptions) -> SalaryResult {
    let insured = non_negative(gross).min(INSURED_SALARY_CAP);
    let ahv = non_negative(gross) * AHV_RATE;
    let alv = insured * ALV_RATE;
    let nbu = insured * NBU_RATE;
    let bvg = occupational_pension(gross, options.age);

    let net_wage = gross - ahv - alv - nbu - bvg;
    let expenses = (net_wage * PROFESSIONAL_EXPENSE_RATE)
        .max(PROFESSIONAL_EXPENSE_MIN)
        .min(PROFESSIONAL_EXPENSE_MAX);
    let children = Decimal::from(options.children);
    let taxable = non_negative(net_wage - expenses - CHILD_DEDUCTION * children);

    let federal = federal_tax(taxable, options.married);
    let child_credit = (CHILD_TAX_CREDIT * children).min(federal);
    let cantonal_rate = options.canton.effective_rate();
    let cantonal = taxable * cantonal_rate;

    SalaryResult::builder(gross)
        .tax("Direct federal tax", federal, None)
        .credit("Federal child credit", child_credit)
        .tax("Cantonal and communal tax", cantonal, Some(cantonal_rate))
        .social("AHV/IV/EO", ahv, Some(AHV_RATE))
        .social("Unemployment insurance (ALV)", alv, Some(ALV_RATE))
        .social("Non-occupational accident insurance", nbu, Some(NBU_RATE))
        .social("Occupational pension (BVG)", bvg, Some(occupational_pension_rate(options.age)))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::brackets::validate_brackets;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn in_canton(canton: Canton) -> SwitzerlandOptions {
        SwitzerlandOptions {
            canton,
            ..Default::default()
        }
    }

    #[test]
    fn test_federal_tariffs_are_well_formed() {
        assert!(validate_brackets(FEDERAL_SINGLE).is_ok());
        assert!(validate_brackets(FEDERAL_MARRIED).is_ok());
    }

    #[test]
    fn test_zurich_80k() {
        let result = gross_to_net(dec("80000"), &SwitzerlandOptions::default());
        assert_eq!(result.social_security, dec("8597"));
        assert_eq!(result.rounded().net_salary, dec("63530.42"));
    }

    #[test]
    fn test_zug_beats_basel_at_80k() {
        let zug = gross_to_net(dec("80000"), &in_canton(Canton::Zug));
        let basel = gross_to_net(dec("80000"), &in_canton(Canton::Basel));
        assert!(zug.net_salary > basel.net_salary);
        assert_eq!(zug.social_security, basel.social_security);
    }

    #[test]
    fn test_federal_tax_average_rate_cap() {
        let income = dec("2000000");
        assert_eq!(federal_tax(income, false), dec("230000"));
        assert_eq!(federal_tax(income, true), dec("230000"));
    }

    #[test]
    fn test_occupational_pension_by_age() {
        assert_eq!(occupational_pension(dec("80000"), 22), Decimal::ZERO);
        assert_eq!(occupational_pension(dec("80000"), 30), dec("1873.9"));
        assert_eq!(occupational_pension(dec("80000"), 60), dec("4818.6"));
        // capped coordinated salary
        assert_eq!(occupational_pension(dec("200000"), 40), dec("3213"));
    }

    #[test]
    fn test_occupational_pension_entry_is_gradual() {
        assert_eq!(occupational_pension(dec("22680"), 40), Decimal::ZERO);
        assert_eq!(occupational_pension(dec("22780"), 40), dec("50"));
        assert_eq!(occupational_pension(dec("23500"), 40), dec("189"));
    }

    #[test]
    fn test_children_reduce_tax() {
        let none = gross_to_net(dec("100000"), &SwitzerlandOptions::default());
        let two = gross_to_net(
            dec("100000"),
            &SwitzerlandOptions {
                children: 2,
                ..Default::default()
            },
        );
        assert!(two.total_tax < none.total_tax);
    }

    #[test]
    fn test_married_tariff_is_lower() {
        let single = federal_tax(dec("100000"), false);
        let married = federal_tax(dec("100000"), true);
        assert!(married < single);
    }

    #[test]
    fn test_canton_parse() {
        assert_eq!("zug".parse::<Canton>().unwrap(), Canton::Zug);
        assert_eq!("Basel-Stadt".parse::<Canton>().unwrap(), Canton::Basel);
        assert_eq!("St. Gallen".parse::<Canton>().unwrap(), Canton::StGallen);
        assert_eq!("GE".parse::<Canton>().unwrap(), Canton::Geneva);
        assert!("bavaria".parse::<Canton>().is_err());
    }
}
