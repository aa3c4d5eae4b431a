//! Canada: federal and provincial income tax, CPP/QPP, EI and QPIP (2025).

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::brackets::{
    TaxBracket, band, money, non_negative, pct, progressive_tax, taper, top_band,
};
use crate::error::EngineError;
use crate::models::{EmploymentType, SalaryResult};

/// Standard full-time hours per year.
pub const HOURS_PER_YEAR: u32 = 2_080;
/// Standard working days per year.
pub const WORKING_DAYS_PER_YEAR: u32 = 260;
/// Initial gross/net ratio for net-to-gross inversion.
pub const NET_TO_GROSS_MULTIPLIER: Decimal = pct(135, 0);
/// Self-employed CPP rate (both employee and employer shares).
pub const SELF_EMPLOYMENT_RATE: Decimal = pct(119, 1);

const FEDERAL: &[TaxBracket] = &[
    band(0, 57_375, pct(145, 1)),
    band(57_375, 114_750, pct(205, 1)),
    band(114_750, 177_882, pct(26, 0)),
    band(177_882, 253_414, pct(29, 0)),
    top_band(253_414, pct(33, 0)),
];
const FEDERAL_CREDIT_RATE: Decimal = pct(145, 1);
const BPA_MAX: Decimal = money(16_129);
const BPA_MIN: Decimal = money(14_538);
const BPA_TAPER_START: Decimal = money(177_882);
const BPA_TAPER_RATE: Decimal = Decimal::from_parts(21_064, 0, 0, false, 6);
const CANADA_EMPLOYMENT_AMOUNT: Decimal = money(1_471);
const QUEBEC_ABATEMENT: Decimal = pct(165, 1);

const PENSION_EXEMPTION: Decimal = money(3_500);
const PENSION_MAX_EARNINGS: Decimal = money(71_300);
const PENSION_ADDITIONAL_MAX_EARNINGS: Decimal = money(81_200);
const CPP_RATE: Decimal = pct(595, 2);
const QPP_RATE: Decimal = pct(64, 1);
const SECOND_TIER_RATE: Decimal = pct(4, 0);

const EI_MAX_INSURABLE: Decimal = money(65_700);
const EI_RATE: Decimal = pct(164, 2);
const EI_RATE_QUEBEC: Decimal = pct(131, 2);
const QPIP_MAX_INSURABLE: Decimal = money(98_000);
const QPIP_RATE: Decimal = pct(494, 3);

const ONTARIO_SURTAX: [(Decimal, Decimal); 2] = [
    (money(5_710), pct(20, 0)),
    (money(7_307), pct(36, 0)),
];

const AB: &[TaxBracket] = &[
    band(0, 151_234, pct(10, 0)),
    band(151_234, 181_481, pct(12, 0)),
    band(181_481, 241_974, pct(13, 0)),
    band(241_974, 362_961, pct(14, 0)),
    top_band(362_961, pct(15, 0)),
];

const BC: &[TaxBracket] = &[
    band(0, 49_279, pct(506, 2)),
    band(49_279, 98_560, pct(77, 1)),
    band(98_560, 113_158, pct(105, 1)),
    band(113_158, 137_407, pct(1229, 2)),
    band(137_407, 186_306, pct(147, 1)),
    band(186_306, 259_829, pct(168, 1)),
    top_band(259_829, pct(205, 1)),
];

const MB: &[TaxBracket] = &[
    band(0, 47_000, pct(108, 1)),
    band(47_000, 100_000, pct(1275, 2)),
    top_band(100_000, pct(174, 1)),
];

const NB: &[TaxBracket] = &[
    band(0, 51_306, pct(94, 1)),
    band(51_306, 102_614, pct(14, 0)),
    band(102_614, 190_060, pct(16, 0)),
    top_band(190_060, pct(195, 1)),
];

const NL: &[TaxBracket] = &[
    band(0, 44_192, pct(87, 1)),
    band(44_192, 88_382, pct(145, 1)),
    band(88_382, 157_792, pct(158, 1)),
    band(157_792, 220_910, pct(178, 1)),
    band(220_910, 282_214, pct(198, 1)),
    band(282_214, 564_429, pct(208, 1)),
    band(564_429, 1_128_858, pct(213, 1)),
    top_band(1_128_858, pct(218, 1)),
];

const NS: &[TaxBracket] = &[
    band(0, 30_507, pct(879, 2)),
    band(30_507, 61_015, pct(1495, 2)),
    band(61_015, 95_883, pct(1667, 2)),
    band(95_883, 154_650, pct(175, 1)),
    top_band(154_650, pct(21, 0)),
];

const NT: &[TaxBracket] = &[
    band(0, 51_964, pct(59, 1)),
    band(51_964, 103_930, pct(86, 1)),
    band(103_930, 168_967, pct(122, 1)),
    top_band(168_967, pct(1405, 2)),
];

const NU: &[TaxBracket] = &[
    band(0, 54_707, pct(4, 0)),
    band(54_707, 109_413, pct(7, 0)),
    band(109_413, 177_881, pct(9, 0)),
    top_band(177_881, pct(115, 1)),
];

const ON: &[TaxBracket] = &[
    band(0, 52_886, pct(505, 2)),
    band(52_886, 105_775, pct(915, 2)),
    band(105_775, 150_000, pct(1116, 2)),
    band(150_000, 220_000, pct(1216, 2)),
    top_band(220_000, pct(1316, 2)),
];

const PE: &[TaxBracket] = &[
    band(0, 33_328, pct(95, 1)),
    band(33_328, 64_656, pct(1347, 2)),
    band(64_656, 105_000, pct(166, 1)),
    band(105_000, 140_000, pct(1762, 2)),
    top_band(140_000, pct(19, 0)),
];

const QC: &[TaxBracket] = &[
    band(0, 53_255, pct(14, 0)),
    band(53_255, 106_495, pct(19, 0)),
    band(106_495, 129_590, pct(24, 0)),
    top_band(129_590, pct(2575, 2)),
];

const SK: &[TaxBracket] = &[
    band(0, 53_463, pct(105, 1)),
    band(53_463, 152_750, pct(125, 1)),
    top_band(152_750, pct(145, 1)),
];

const YT: &[TaxBracket] = &[
    band(0, 57_375, pct(64, 1)),
    band(57_375, 114_750, pct(9, 0)),
    band(114_750, 177_882, pct(109, 1)),
    band(177_882, 500_000, pct(128, 1)),
    top_band(500_000, pct(15, 0)),
];

/// Canadian province or territory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Province {
    /// Alberta.
    Ab,
    /// British Columbia.
    Bc,
    /// Manitoba.
    Mb,
    /// New Brunswick.
    Nb,
    /// Newfoundland and Labrador.
    Nl,
    /// Nova Scotia.
    Ns,
    /// Northwest Territories.
    Nt,
    /// Nunavut.
    Nu,
    /// Ontario.
    #[default]
    On,
    /// Prince Edward Island.
    Pe,
    /// Quebec.
    Qc,
    /// Saskatchewan.
    Sk,
    /// Yukon.
    Yt,
}

impl Province {
    /// Provincial brackets.
    pub fn brackets(&self) -> &'static [TaxBracket] {
        match self {
            Province::Ab => AB,
            Province::Bc => BC,
            Province::Mb => MB,
            Province::Nb => NB,
            Province::Nl => NL,
            Province::Ns => NS,
            Province::Nt => NT,
            Province::Nu => NU,
            Province::On => ON,
            Province::Pe => PE,
            Province::Qc => QC,
            Province::Sk => SK,
            Province::Yt => YT,
        }
    }

    /// Provincial basic personal amount.
    pub fn basic_personal_amount(&self) -> Decimal {
        money(match self {
            Province::Ab => 22_323,
            Province::Bc => 12_932,
            Province::Mb => 15_780,
            Province::Nb => 13_396,
            Province::Nl => 11_067,
            Province::Ns => 11_744,
            Province::Nt => 17_842,
            Province::Nu => 19_274,
            Province::On => 12_747,
            Province::Pe => 14_250,
            Province::Qc => 18_571,
            Province::Sk => 19_491,
            Province::Yt => 16_129,
        })
    }

    /// Two-letter postal abbreviation.
    pub fn code(&self) -> &'static str {
        match self {
            Province::Ab => "AB",
            Province::Bc => "BC",
            Province::Mb => "MB",
            Province::Nb => "NB",
            Province::Nl => "NL",
            Province::Ns => "NS",
            Province::Nt => "NT",
            Province::Nu => "NU",
            Province::On => "ON",
            Province::Pe => "PE",
            Province::Qc => "QC",
            Province::Sk => "SK",
            Province::Yt => "YT",
        }
    }

    /// All provinces and territories.
    pub const ALL: [Province; 13] = [
        Province::Ab,
        Province::Bc,
        Province::Mb,
        Province::Nb,
        Province::Nl,
        Province::Ns,
        Province::Nt,
        Province::Nu,
        Province::On,
        Province::Pe,
        Province::Qc,
        Province::Sk,
        Province::Yt,
    ];
}

impl FromStr for Province {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        let province = match key.as_str() {
            "ab" | "alberta" => Province::Ab,
            "bc" | "british columbia" => Province::Bc,
            "mb" | "manitoba" => Province::Mb,
            "nb" | "new brunswick" => Province::Nb,
            "nl" | "newfoundland" | "newfoundland and labrador" => Province::Nl,
            "ns" | "nova scotia" => Province::Ns,
            "nt" | "northwest territories" => Province::Nt,
            "nu" | "nunavut" => Province::Nu,
            "on" | "ontario" => Province::On,
            "pe" | "pei" | "prince edward island" => Province::Pe,
            "qc" | "quebec" => Province::Qc,
            "sk" | "saskatchewan" => Province::Sk,
            "yt" | "yukon" => Province::Yt,
            _ => {
                return Err(EngineError::InvalidOption {
                    field: "ca_province".to_string(),
                    message: format!("unknown province '{}'", s),
                });
            }
        };
        Ok(province)
    }
}

/// Canada options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanadaOptions {
    /// Province of residence. Defaults to Ontario.
    pub province: Province,
    /// Employee or self-employed.
    pub employment_type: EmploymentType,
}

fn ontario_surtax(basic_provincial_tax: Decimal) -> Decimal {
    ONTARIO_SURTAX
        .iter()
        .map(|(threshold, rate)| non_negative(basic_provincial_tax - threshold) * rate)
        .sum()
}

/// Ontario Health Premium: each step ramps up to its plateau.
fn ontario_health_premium(income: Decimal) -> Decimal {
    const STEPS: [(u32, u32, u32, u32); 5] = [
        (20_000, 0, 6, 300),
        (36_000, 300, 6, 450),
        (48_000, 450, 25, 600),
        (72_000, 600, 25, 750),
        (200_000, 750, 25, 900),
    ];

    STEPS
        .iter()
        .rev()
        .find(|(start, ..)| income > money(*start))
        .map(|&(start, base, rate, plateau)| {
            (money(base) + (income - money(start)) * pct(rate, 0)).min(money(plateau))
        })
        .unwrap_or(Decimal::ZERO)
}

/// Computes Canadian take-home pay.
pub fn gross_to_net(gross: Decimal, options: &CanadaOptions) -> SalaryResult {
    let province = options.province;
    let is_employee = options.employment_type == EmploymentType::Employee;
    let is_quebec = province == Province::Qc;

    // Federal
    let federal_tax = progressive_tax(gross, FEDERAL);
    let bpa = taper(BPA_MAX, gross - BPA_TAPER_START, BPA_TAPER_RATE).max(BPA_MIN);
    let employment_amount = if is_employee {
        CANADA_EMPLOYMENT_AMOUNT.min(non_negative(gross))
    } else {
        Decimal::ZERO
    };
    let federal_credits = ((bpa + employment_amount) * FEDERAL_CREDIT_RATE).min(federal_tax);
    let basic_federal = federal_tax - federal_credits;
    let abatement = if is_quebec {
        basic_federal * QUEBEC_ABATEMENT
    } else {
        Decimal::ZERO
    };

    // Provincial
    let brackets = province.brackets();
    let provincial_tax = progressive_tax(gross, brackets);
    let provincial_credit = (province.basic_personal_amount() * brackets[0].rate).min(provincial_tax);
    let basic_provincial = provincial_tax - provincial_credit;
    let (surtax, health_premium) = if province == Province::On {
        (ontario_surtax(basic_provincial), ontario_health_premium(gross))
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    // Contributions
    let share = if is_employee { Decimal::ONE } else { Decimal::from(2) };
    let pension_rate = if is_quebec { QPP_RATE } else { CPP_RATE };
    let pension_label = if is_quebec { "QPP" } else { "CPP" };
    let pension = non_negative(gross.min(PENSION_MAX_EARNINGS) - PENSION_EXEMPTION)
        * pension_rate
        * share;
    let second_tier = non_negative(gross.min(PENSION_ADDITIONAL_MAX_EARNINGS) - PENSION_MAX_EARNINGS)
        * SECOND_TIER_RATE
        * share;
    let (ei, ei_rate) = match (is_employee, is_quebec) {
        (false, _) => (Decimal::ZERO, EI_RATE),
        (true, true) => (non_negative(gross).min(EI_MAX_INSURABLE) * EI_RATE_QUEBEC, EI_RATE_QUEBEC),
        (true, false) => (non_negative(gross).min(EI_MAX_INSURABLE) * EI_RATE, EI_RATE),
    };
    let qpip = if is_quebec && is_employee {
        non_negative(gross).min(QPIP_MAX_INSURABLE) * QPIP_RATE
    } else {
        Decimal::ZERO
    };

    SalaryResult::builder(gross)
        .tax("Federal income tax", federal_tax, None)
        .credit("Federal non-refundable credits", federal_credits)
        .credit("Quebec abatement", abatement)
        .tax(format!("Provincial income tax ({})", province.code()), provincial_tax, None)
        .credit("Provincial basic personal amount", provincial_credit)
        .tax("Ontario surtax", surtax, None)
        .tax("Ontario Health Premium", health_premium, None)
        .social(pension_label, pension, Some(pension_rate * share))
        .social(format!("{}2", pension_label), second_tier, Some(SECOND_TIER_RATE * share))
        .social("Employment Insurance", ei, Some(ei_rate))
        .social("QPIP", qpip, Some(QPIP_RATE))
        .build()
}
