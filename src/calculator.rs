//! Feasibility calculator logic

use std::fmt;

use tracing::debug;

use crate::error::{FeasibilityError, Result};
use crate::models::{
    CaseKind, Scenario, SimulationInput, SimulationResult, UnitMixItem, UnitProjection,
};

const DAYS_PER_YEAR: f64 = 365.0;
const MONTHS_PER_YEAR: f64 = 12.0;

/// Allowed drift between stored and recomputed money figures
const AUDIT_TOLERANCE: f64 = 0.5;

/// Round half away from zero
pub fn round_money(value: f64) -> f64 {
    value.round()
}

/// Compute the feasibility figures for a scenario given a case name
///
/// Fails with `InvalidSelection` when the case name is unknown or the
/// scenario has no figures for it, and with `InvalidRange` when a unit
/// declares a price range whose min exceeds its max.
pub fn compute_feasibility(
    scenario: &Scenario,
    case_name: &str,
    occupancy_rate: f64,
    management_fee_rate: f64,
) -> Result<SimulationResult> {
    let case: CaseKind = case_name.parse()?;
    compute(&SimulationInput::new(
        scenario,
        case,
        occupancy_rate,
        management_fee_rate,
    ))
}

pub fn compute(input: &SimulationInput<'_>) -> Result<SimulationResult> {
    let scenario = input.scenario;
    let financial = scenario.financial(input.case)?;

    let base_revenue = financial.revenue;
    let effective_revenue = round_money(base_revenue * input.occupancy_rate);
    let fee_amount = round_money(effective_revenue * input.management_fee_rate);
    let net_income = effective_revenue - fee_amount;

    let units = scenario
        .unit_mix
        .iter()
        .map(|unit| project_unit(unit, input))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        scenario = %scenario.id,
        case = %input.case,
        occupancy = input.occupancy_rate,
        fee_rate = input.management_fee_rate,
        effective_revenue,
        net_income,
        "Feasibility computed"
    );

    Ok(SimulationResult {
        scenario_id: scenario.id.clone(),
        case: input.case,
        occupancy_rate: input.occupancy_rate,
        management_fee_rate: input.management_fee_rate,
        base_revenue,
        effective_revenue,
        fee_amount,
        net_income,
        units,
    })
}

/// Annual price of a unit under a case: the matching price-range bound,
/// or the average price when no range is declared
pub fn unit_base_annual(unit: &UnitMixItem, case: CaseKind) -> Result<f64> {
    match &unit.price_range {
        Some(range) => {
            if range.min > range.max {
                return Err(FeasibilityError::InvalidRange {
                    unit: unit.name.clone(),
                    min: range.min,
                    avg: range.avg,
                    max: range.max,
                });
            }
            Ok(range.select(case))
        }
        None => Ok(unit.average_price),
    }
}

fn project_unit(unit: &UnitMixItem, input: &SimulationInput<'_>) -> Result<UnitProjection> {
    let base_annual = unit_base_annual(unit, input.case)?;
    let monthly_gross = base_annual * input.occupancy_rate / MONTHS_PER_YEAR;

    Ok(UnitProjection {
        name: unit.name.clone(),
        count: unit.count,
        base_annual,
        daily_rate: round_money(base_annual / DAYS_PER_YEAR),
        monthly_gross,
        monthly_net: monthly_gross * (1.0 - input.management_fee_rate),
    })
}

/// Evaluate every (case, occupancy) pair, row-major by case
pub fn sensitivity_matrix(
    scenario: &Scenario,
    cases: &[CaseKind],
    occupancy_rates: &[f64],
    management_fee_rate: f64,
) -> Result<Vec<Vec<SimulationResult>>> {
    cases
        .iter()
        .map(|&case| {
            occupancy_rates
                .iter()
                .map(|&occupancy| {
                    compute(&SimulationInput::new(
                        scenario,
                        case,
                        occupancy,
                        management_fee_rate,
                    ))
                })
                .collect()
        })
        .collect()
}

/// A mismatch in source data that does not stop calculation
#[derive(Debug, Clone, PartialEq)]
pub enum DataQualityWarning {
    MissingCase {
        case: CaseKind,
    },
    NetIncomeMismatch {
        case: CaseKind,
        stored: f64,
        expected: f64,
    },
    FeeShareMismatch {
        case: CaseKind,
        stored: f64,
        expected: f64,
    },
    UnitRevenueMismatch {
        case: CaseKind,
        stored: f64,
        unit_total: f64,
    },
    AveragePriceMismatch {
        unit: String,
        average_price: f64,
        range_avg: f64,
    },
    UnitCountMismatch {
        declared: u32,
        actual: u32,
    },
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataQualityWarning::MissingCase { case } => {
                write!(f, "no financial figures for the '{}' case", case)
            }
            DataQualityWarning::NetIncomeMismatch {
                case,
                stored,
                expected,
            } => write!(
                f,
                "{}: stored net income {:.0} differs from revenue minus fee share {:.0}",
                case, stored, expected
            ),
            DataQualityWarning::FeeShareMismatch {
                case,
                stored,
                expected,
            } => write!(
                f,
                "{}: stored fee share {:.0} differs from recomputed {:.0}",
                case, stored, expected
            ),
            DataQualityWarning::UnitRevenueMismatch {
                case,
                stored,
                unit_total,
            } => write!(
                f,
                "{}: stored revenue {:.0} differs from unit mix total {:.0}",
                case, stored, unit_total
            ),
            DataQualityWarning::AveragePriceMismatch {
                unit,
                average_price,
                range_avg,
            } => write!(
                f,
                "unit '{}': average price {:.0} differs from price range avg {:.0}",
                unit, average_price, range_avg
            ),
            DataQualityWarning::UnitCountMismatch { declared, actual } => write!(
                f,
                "declared unit count {} differs from unit mix total {}",
                declared, actual
            ),
        }
    }
}

/// Compare the stored seed figures of a scenario against what the
/// calculator would derive at full occupancy and the reference fee rate
///
/// Range errors are reported as failures; everything else is a warning.
pub fn audit_scenario(
    scenario: &Scenario,
    reference_fee_rate: f64,
) -> Result<Vec<DataQualityWarning>> {
    let mut warnings = Vec::new();
    let differs = |a: f64, b: f64| (a - b).abs() > AUDIT_TOLERANCE;

    for case in CaseKind::ALL {
        let Some(financial) = scenario.financials.get(&case) else {
            warnings.push(DataQualityWarning::MissingCase { case });
            continue;
        };

        let expected_net = financial.revenue - financial.fee_share_amount;
        if differs(financial.net_income, expected_net) {
            warnings.push(DataQualityWarning::NetIncomeMismatch {
                case,
                stored: financial.net_income,
                expected: expected_net,
            });
        }

        let expected_share = round_money(financial.revenue * reference_fee_rate);
        if differs(financial.fee_share_amount, expected_share) {
            warnings.push(DataQualityWarning::FeeShareMismatch {
                case,
                stored: financial.fee_share_amount,
                expected: expected_share,
            });
        }

        if !scenario.unit_mix.is_empty() {
            let mut unit_total = 0.0;
            for unit in &scenario.unit_mix {
                unit_total += unit_base_annual(unit, case)? * f64::from(unit.count);
            }
            if differs(financial.revenue, unit_total) {
                warnings.push(DataQualityWarning::UnitRevenueMismatch {
                    case,
                    stored: financial.revenue,
                    unit_total,
                });
            }
        }
    }

    for unit in &scenario.unit_mix {
        if let Some(range) = &unit.price_range {
            if differs(unit.average_price, range.avg) {
                warnings.push(DataQualityWarning::AveragePriceMismatch {
                    unit: unit.name.clone(),
                    average_price: unit.average_price,
                    range_avg: range.avg,
                });
            }
        }
    }

    if let Some(declared) = scenario.unit_count {
        let actual = scenario.total_units();
        if declared != actual {
            warnings.push(DataQualityWarning::UnitCountMismatch { declared, actual });
        }
    }

    Ok(warnings)
}
