//! Selection controls: the fixed option sets a user can pick from, and
//! parsing of rate text typed on the command line

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::Catalog;
use crate::error::{FeasibilityError, Result};
use crate::format::{format_percent, to_ascii_digits, Locale};
use crate::models::{CaseKind, SimulationInput};

pub const DEFAULT_CASE: CaseKind = CaseKind::Base;
pub const DEFAULT_OCCUPANCY_RATE: f64 = 0.8;
pub const DEFAULT_FEE_RATE: f64 = 0.20;

pub const OCCUPANCY_OPTIONS: [f64; 3] = [0.7, 0.8, 0.9];
pub const FEE_OPTIONS: [f64; 1] = [DEFAULT_FEE_RATE];

static RATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(?:[.,٫]\d+)?)\s*([%٪])?\s*$").expect("rate pattern is valid")
});

/// One option of a segmented control
#[derive(Debug, Clone, PartialEq)]
pub struct Choice<T> {
    pub value: T,
    pub label: String,
}

pub fn case_label(case: CaseKind, locale: Locale) -> &'static str {
    match (case, locale) {
        (CaseKind::Worst, Locale::En) => "Conservative",
        (CaseKind::Base, Locale::En) => "Realistic",
        (CaseKind::Best, Locale::En) => "Optimistic",
        (CaseKind::Worst, Locale::Ar) => "متحفظ",
        (CaseKind::Base, Locale::Ar) => "واقعي",
        (CaseKind::Best, Locale::Ar) => "متفائل",
    }
}

pub fn case_choices(locale: Locale) -> Vec<Choice<CaseKind>> {
    CaseKind::ALL
        .iter()
        .map(|&case| Choice {
            value: case,
            label: case_label(case, locale).to_string(),
        })
        .collect()
}

fn rate_choices(rates: &[f64], locale: Locale) -> Vec<Choice<f64>> {
    rates
        .iter()
        .map(|&rate| Choice {
            value: rate,
            label: format_percent(rate, locale),
        })
        .collect()
}

pub fn occupancy_choices(locale: Locale) -> Vec<Choice<f64>> {
    rate_choices(&OCCUPANCY_OPTIONS, locale)
}

pub fn fee_choices(locale: Locale) -> Vec<Choice<f64>> {
    rate_choices(&FEE_OPTIONS, locale)
}

/// The user's current pick on every control
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub scenario_id: Option<String>,
    pub case: CaseKind,
    pub occupancy_rate: f64,
    pub management_fee_rate: f64,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            scenario_id: None,
            case: DEFAULT_CASE,
            occupancy_rate: DEFAULT_OCCUPANCY_RATE,
            management_fee_rate: DEFAULT_FEE_RATE,
        }
    }
}

impl Selection {
    /// Resolve the scenario against a catalog and build the calculator input
    pub fn input<'a>(&self, catalog: &'a Catalog) -> Result<SimulationInput<'a>> {
        let scenario = catalog.active(self.scenario_id.as_deref())?;
        Ok(SimulationInput::new(
            scenario,
            self.case,
            self.occupancy_rate,
            self.management_fee_rate,
        ))
    }
}

/// Parse a rate written as a fraction (`0.8`) or a percentage (`80`,
/// `80%`, `٨٠٪`). A bare number above 1 is a percentage only when it is
/// whole; `1.5` is rejected rather than guessed at.
pub fn parse_rate(text: &str) -> Result<f64> {
    let normalized = to_ascii_digits(text);
    let invalid = || FeasibilityError::InvalidRate {
        what: "rate",
        value: text.to_string(),
    };

    let caps = RATE_RE.captures(&normalized).ok_or_else(invalid)?;
    let number: f64 = caps[1]
        .replace([',', '٫'], ".")
        .parse()
        .map_err(|_| invalid())?;

    let has_percent_sign = caps.get(2).is_some();
    if has_percent_sign || (number > 1.0 && number.fract() == 0.0) {
        Ok(number / 100.0)
    } else if number > 1.0 {
        Err(invalid())
    } else {
        Ok(number)
    }
}

/// Occupancy must lie in (0, 1]
pub fn parse_occupancy(text: &str) -> Result<f64> {
    let rate = parse_rate(text)?;
    if rate > 0.0 && rate <= 1.0 {
        Ok(rate)
    } else {
        Err(FeasibilityError::InvalidRate {
            what: "occupancy rate",
            value: text.to_string(),
        })
    }
}

/// Management fee must lie in [0, 1)
pub fn parse_fee(text: &str) -> Result<f64> {
    let rate = parse_rate(text)?;
    if (0.0..1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(FeasibilityError::InvalidRate {
            what: "management fee rate",
            value: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fraction_and_percent_forms() {
        assert_eq!(parse_rate("0.8").unwrap(), 0.8);
        assert_eq!(parse_rate("80").unwrap(), 0.8);
        assert_eq!(parse_rate("80%").unwrap(), 0.8);
        assert_eq!(parse_rate(" 20 % ").unwrap(), 0.2);
        assert_eq!(parse_rate("٨٠٪").unwrap(), 0.8);
        assert_eq!(parse_rate("1").unwrap(), 1.0);
    }

    #[test]
    fn fractional_values_above_one_are_rejected() {
        assert!(matches!(
            parse_rate("1.5"),
            Err(FeasibilityError::InvalidRate { what: "rate", .. })
        ));
        assert!(parse_rate("1.01").is_err());
        assert!(parse_occupancy("1.5").is_err());
        assert!(parse_fee("1.5").is_err());
        assert_eq!(parse_rate("12.5%").unwrap(), 0.125);
        assert_eq!(parse_rate("2").unwrap(), 0.02);
    }

    #[test]
    fn rejects_non_numeric_rates() {
        assert!(parse_rate("eighty").is_err());
        assert!(parse_rate("-0.5").is_err());
        assert!(parse_rate("").is_err());
    }

    #[test]
    fn occupancy_must_be_positive() {
        assert!(parse_occupancy("0").is_err());
        assert!(parse_occupancy("150%").is_err());
        assert_eq!(parse_occupancy("100%").unwrap(), 1.0);
    }

    #[test]
    fn fee_must_be_below_one() {
        assert_eq!(parse_fee("0").unwrap(), 0.0);
        assert!(parse_fee("100%").is_err());
    }

    #[test]
    fn choices_carry_localized_labels() {
        let cases = case_choices(Locale::En);
        assert_eq!(cases.len(), 3);
        assert_eq!(cases[1].value, CaseKind::Base);
        assert_eq!(cases[1].label, "Realistic");

        let occupancy = occupancy_choices(Locale::Ar);
        let labels: Vec<_> = occupancy.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["٧٠٪", "٨٠٪", "٩٠٪"]);

        assert_eq!(fee_choices(Locale::En)[0].label, "20%");
    }

    #[test]
    fn default_selection_matches_dashboard_defaults() {
        let selection = Selection::default();
        assert_eq!(selection.case, CaseKind::Base);
        assert_eq!(selection.occupancy_rate, 0.8);
        assert_eq!(selection.management_fee_rate, 0.20);
        assert!(selection.scenario_id.is_none());
        assert!(OCCUPANCY_OPTIONS.contains(&selection.occupancy_rate));
        assert!(FEE_OPTIONS.contains(&selection.management_fee_rate));
    }

    #[test]
    fn selection_resolves_against_catalog() {
        let catalog = Catalog::builtin();
        let input = Selection::default().input(&catalog).unwrap();
        assert_eq!(input.scenario.id, "study_madinah");
        assert_eq!(input.case, CaseKind::Base);

        let unknown = Selection {
            scenario_id: Some("study_jeddah".to_string()),
            ..Selection::default()
        };
        assert!(matches!(
            unknown.input(&catalog),
            Err(FeasibilityError::InvalidSelection(_))
        ));
    }
}
