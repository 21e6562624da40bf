//! Data models for feasibility scenarios and simulation results

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FeasibilityError, Result};
use crate::format::Locale;

/// Sensitivity case of a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseKind {
    Worst,
    Base,
    Best,
}

impl CaseKind {
    pub const ALL: [CaseKind; 3] = [CaseKind::Worst, CaseKind::Base, CaseKind::Best];

    pub fn as_str(self) -> &'static str {
        match self {
            CaseKind::Worst => "worst",
            CaseKind::Base => "base",
            CaseKind::Best => "best",
        }
    }
}

impl fmt::Display for CaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseKind {
    type Err = FeasibilityError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "worst" => Ok(CaseKind::Worst),
            "base" => Ok(CaseKind::Base),
            "best" => Ok(CaseKind::Best),
            other => Err(FeasibilityError::InvalidSelection(format!(
                "unknown case '{}' (expected worst, base or best)",
                other
            ))),
        }
    }
}

/// One feasibility study: a property, its rental model and its numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ar: Option<String>,
    #[serde(default, alias = "type")]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_ar: Option<String>,
    pub financials: BTreeMap<CaseKind, FinancialCase>,
    #[serde(default)]
    pub unit_mix: Vec<UnitMixItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_label_ar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupancy_duration_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupancy_duration_label_ar: Option<String>,
}

impl Scenario {
    /// Look up the financial case, failing if the scenario does not define it
    pub fn financial(&self, case: CaseKind) -> Result<&FinancialCase> {
        self.financials.get(&case).ok_or_else(|| {
            FeasibilityError::InvalidSelection(format!(
                "scenario '{}' has no '{}' case",
                self.id, case
            ))
        })
    }

    pub fn display_name(&self, locale: Locale) -> &str {
        match (locale, &self.name_ar) {
            (Locale::Ar, Some(name)) => name,
            _ => &self.name,
        }
    }

    pub fn display_description(&self, locale: Locale) -> &str {
        match (locale, &self.description_ar) {
            (Locale::Ar, Some(text)) => text,
            _ => &self.description,
        }
    }

    pub fn unit_label(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => self.unit_label.as_deref().unwrap_or("Units"),
            Locale::Ar => self.unit_label_ar.as_deref().unwrap_or("وحدة"),
        }
    }

    pub fn occupancy_duration_label(&self, locale: Locale) -> Option<&str> {
        match locale {
            Locale::En => self.occupancy_duration_label.as_deref(),
            Locale::Ar => self
                .occupancy_duration_label_ar
                .as_deref()
                .or(self.occupancy_duration_label.as_deref()),
        }
    }

    /// Number of physical units across the unit mix
    pub fn total_units(&self) -> u32 {
        self.unit_mix.iter().map(|u| u.count).sum()
    }
}

/// Annual figures of one case as recorded in the source data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialCase {
    pub revenue: f64,
    #[serde(alias = "mabaatShare")]
    pub fee_share_amount: f64,
    pub net_income: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roi: Option<f64>,
}

/// A category of rentable unit and how many of them exist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitMixItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ar: Option<String>,
    pub count: u32,
    #[serde(alias = "avgPrice")]
    pub average_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
}

impl UnitMixItem {
    pub fn display_name(&self, locale: Locale) -> &str {
        match (locale, &self.name_ar) {
            (Locale::Ar, Some(name)) => name,
            _ => &self.name,
        }
    }
}

/// Annual price band of a unit: min/avg/max map to worst/base/best
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn select(&self, case: CaseKind) -> f64 {
        match case {
            CaseKind::Worst => self.min,
            CaseKind::Base => self.avg,
            CaseKind::Best => self.max,
        }
    }
}

/// The selection a consumer hands to the calculator
#[derive(Debug, Clone, Copy)]
pub struct SimulationInput<'a> {
    pub scenario: &'a Scenario,
    pub case: CaseKind,
    pub occupancy_rate: f64,
    pub management_fee_rate: f64,
}

impl<'a> SimulationInput<'a> {
    pub fn new(
        scenario: &'a Scenario,
        case: CaseKind,
        occupancy_rate: f64,
        management_fee_rate: f64,
    ) -> Self {
        Self {
            scenario,
            case,
            occupancy_rate,
            management_fee_rate,
        }
    }
}

/// Result of a feasibility calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub scenario_id: String,
    pub case: CaseKind,
    pub occupancy_rate: f64,
    pub management_fee_rate: f64,
    pub base_revenue: f64,
    pub effective_revenue: f64,
    pub fee_amount: f64,
    pub net_income: f64,
    pub units: Vec<UnitProjection>,
}

/// Per-unit pricing; monthly figures are left unrounded
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitProjection {
    pub name: String,
    pub count: u32,
    pub base_annual: f64,
    pub daily_rate: f64,
    pub monthly_gross: f64,
    pub monthly_net: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LedgerKind {
    ManagementFee,
    NetIncome,
}

/// One line of the financial distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerLine {
    pub kind: LedgerKind,
    pub amount: f64,
    /// Whole-percent share of effective revenue
    pub percent: i64,
}

impl SimulationResult {
    pub fn ledger(&self) -> Vec<LedgerLine> {
        let share = |amount: f64| -> i64 {
            if self.effective_revenue > 0.0 {
                (amount / self.effective_revenue * 100.0).round() as i64
            } else {
                0
            }
        };

        vec![
            LedgerLine {
                kind: LedgerKind::ManagementFee,
                amount: self.fee_amount,
                percent: share(self.fee_amount),
            },
            LedgerLine {
                kind: LedgerKind::NetIncome,
                amount: self.net_income,
                percent: share(self.net_income),
            },
        ]
    }
}
