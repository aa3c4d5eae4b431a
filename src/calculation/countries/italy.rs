//! Italy: INPS, IRPEF with employment deductions, and the regional and
//! municipal surcharges (2025).

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::brackets::{
    TaxBracket, band, money, non_negative, pct, progressive_tax, top_band,
};
use crate::error::EngineError;
use crate::models::SalaryResult;

/// Standard full-time hours per year.
pub const HOURS_PER_YEAR: u32 = 2_080;
/// Standard working days per year.
pub const WORKING_DAYS_PER_YEAR: u32 = 260;
/// Initial gross/net ratio for net-to-gross inversion.
pub const NET_TO_GROSS_MULTIPLIER: Decimal = pct(145, 0);
/// INPS separate-management rate for freelancers.
pub const SELF_EMPLOYMENT_RATE: Decimal = pct(2607, 2);

const INPS_RATE: Decimal = pct(919, 2);
const INPS_CEILING: Decimal = money(120_607);
const DEFAULT_MUNICIPAL_RATE: Decimal = pct(8, 1);

const IRPEF: &[TaxBracket] = &[
    band(0, 28_000, pct(23, 0)),
    band(28_000, 50_000, pct(35, 0)),
    top_band(50_000, pct(43, 0)),
];

const LOMBARDY: &[TaxBracket] = &[
    band(0, 15_000, pct(123, 2)),
    band(15_000, 28_000, pct(158, 2)),
    band(28_000, 50_000, pct(172, 2)),
    top_band(50_000, pct(173, 2)),
];

const LAZIO: &[TaxBracket] = &[
    band(0, 15_000, pct(173, 2)),
    band(15_000, 28_000, pct(273, 2)),
    top_band(28_000, pct(333, 2)),
];

const CAMPANIA: &[TaxBracket] = &[
    band(0, 15_000, pct(173, 2)),
    band(15_000, 28_000, pct(296, 2)),
    band(28_000, 50_000, pct(320, 2)),
    top_band(50_000, pct(333, 2)),
];

const VENETO: &[TaxBracket] = &[top_band(0, pct(123, 2))];

const PIEDMONT: &[TaxBracket] = &[
    band(0, 15_000, pct(162, 2)),
    band(15_000, 28_000, pct(213, 2)),
    band(28_000, 50_000, pct(275, 2)),
    top_band(50_000, pct(333, 2)),
];

const BASE_REGIONAL: &[TaxBracket] = &[top_band(0, pct(123, 2))];

/// Italian region for the regional IRPEF surcharge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItalianRegion {
    /// Lombardy.
    Lombardy,
    /// Lazio.
    Lazio,
    /// Campania.
    Campania,
    /// Veneto.
    Veneto,
    /// Piedmont.
    Piedmont,
    /// Any other region, at the 1.23% base rate.
    #[default]
    Other,
}

impl ItalianRegion {
    /// Regional surcharge scale.
    pub fn brackets(&self) -> &'static [TaxBracket] {
        match self {
            ItalianRegion::Lombardy => LOMBARDY,
            ItalianRegion::Lazio => LAZIO,
            ItalianRegion::Campania => CAMPANIA,
            ItalianRegion::Veneto => VENETO,
            ItalianRegion::Piedmont => PIEDMONT,
            ItalianRegion::Other => BASE_REGIONAL,
        }
    }
}

impl FromStr for ItalianRegion {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lombardy" | "lombardia" => Ok(ItalianRegion::Lombardy),
            "lazio" => Ok(ItalianRegion::Lazio),
            "campania" => Ok(ItalianRegion::Campania),
            "veneto" => Ok(ItalianRegion::Veneto),
            "piedmont" | "piemonte" => Ok(ItalianRegion::Piedmont),
            "" | "other" => Ok(ItalianRegion::Other),
            other => Err(EngineError::InvalidOption {
                field: "it_region".to_string(),
                message: format!("unknown region '{}'", other),
            }),
        }
    }
}

/// Italy options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItalyOptions {
    /// Region of residence. Defaults to the base regional rate.
    pub region: ItalianRegion,
    /// Municipal surcharge rate. Defaults to 0.8%.
    pub municipal_rate: Decimal,
}

impl Default for ItalyOptions {
    fn default() -> Self {
        Self {
            region: ItalianRegion::default(),
            municipal_rate: DEFAULT_MUNICIPAL_RATE,
        }
    }
}

/// Employment income deduction (detrazione per lavoro dipendente).
pub fn employment_deduction(income: Decimal) -> Decimal {
    if income <= money(15_000) {
        money(1_955)
    } else if income <= money(28_000) {
        money(1_910) + money(1_190) * (money(28_000) - income) / money(13_000)
    } else if income <= money(50_000) {
        money(1_910) * (money(50_000) - income) / money(22_000)
    } else {
        Decimal::ZERO
    }
}

/// The 2025 additional deduction for incomes between 20,000 and 40,000.
pub fn additional_deduction(income: Decimal) -> Decimal {
    if income <= money(20_000) {
        Decimal::ZERO
    } else if income <= money(32_000) {
        money(1_000)
    } else if income <= money(40_000) {
        money(1_000) * (money(40_000) - income) / money(8_000)
    } else {
        Decimal::ZERO
    }
}

/// Computes Italian take-home pay.
pub fn gross_to_net(gross: Decimal, options: &ItalyOptions) -> SalaryResult {
    let inps = non_negative(gross).min(INPS_CEILING) * INPS_RATE;
    let taxable = non_negative(gross - inps);

    let irpef = progressive_tax(taxable, IRPEF);
    let employment = employment_deduction(taxable).min(irpef);
    let additional = additional_deduction(taxable).min(irpef - employment);

    let regional = progressive_tax(taxable, options.region.brackets());
    let municipal = taxable * options.municipal_rate;

    SalaryResult::builder(gross)
        .tax("IRPEF", irpef, None)
        .credit("Employment income deduction", employment)
        .credit("Additional deduction", additional)
        .tax("Regional surcharge", regional, None)
        .tax("Municipal surcharge", municipal, Some(options.municipal_rate))
        .social("INPS", inps, Some(INPS_RATE))
        .build()
}
