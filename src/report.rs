//! Text rendering of the feasibility dashboard

use std::fmt;

use crate::calculator::DataQualityWarning;
use crate::controls::{case_choices, case_label, fee_choices, occupancy_choices, Choice};
use crate::format::{format_count, format_money, format_percent, format_whole_percent, Locale};
use crate::models::{LedgerKind, Scenario, SimulationResult};

const RLM: char = '\u{200F}';

struct Labels {
    study: &'static str,
    case: &'static str,
    occupancy: &'static str,
    fee: &'static str,
    projected_revenue: &'static str,
    distribution: &'static str,
    total_revenue: &'static str,
    management_fee: &'static str,
    net_income: &'static str,
    per_unit: &'static str,
    daily_rate: &'static str,
    monthly_revenue: &'static str,
    owner_net: &'static str,
    sensitivity: &'static str,
    category: &'static str,
    stored_financials: &'static str,
    revenue: &'static str,
    fee_share: &'static str,
    stored_net: &'static str,
    unit_mix: &'static str,
    range: &'static str,
}

const EN: Labels = Labels {
    study: "Property Feasibility Study",
    case: "Case",
    occupancy: "Occupancy",
    fee: "Mgmt Fee",
    projected_revenue: "Projected Annual Revenue",
    distribution: "Financial Distribution",
    total_revenue: "Total Annual Revenue",
    management_fee: "Management Fee",
    net_income: "Net Income (Owner)",
    per_unit: "Revenue Per Apartment",
    daily_rate: "Daily Rate",
    monthly_revenue: "Monthly Revenue",
    owner_net: "Owner Net Income",
    sensitivity: "Net Income by Case and Occupancy",
    category: "Category",
    stored_financials: "Financials (stored)",
    revenue: "Revenue",
    fee_share: "Fee share",
    stored_net: "Net income",
    unit_mix: "Unit mix",
    range: "range",
};

const AR: Labels = Labels {
    study: "دراسة جدوى عقارية",
    case: "الحالة",
    occupancy: "معدل الإشغال",
    fee: "رسوم الإدارة",
    projected_revenue: "الإيرادات السنوية المتوقعة",
    distribution: "التحليل المالي",
    total_revenue: "الإيرادات السنوية",
    management_fee: "رسوم الإدارة",
    net_income: "صافي الدخل (المالك)",
    per_unit: "الإيرادات لكل شقة",
    daily_rate: "سعر اليوم",
    monthly_revenue: "الإيراد الشهري",
    owner_net: "صافي دخل المالك",
    sensitivity: "صافي الدخل حسب الحالة ومعدل الإشغال",
    category: "التصنيف",
    stored_financials: "البيانات المالية (المخزنة)",
    revenue: "الإيرادات",
    fee_share: "حصة الرسوم",
    stored_net: "صافي الدخل",
    unit_mix: "مزيج الوحدات",
    range: "النطاق",
};

fn labels(locale: Locale) -> &'static Labels {
    match locale {
        Locale::En => &EN,
        Locale::Ar => &AR,
    }
}

/// Prefix every line with a right-to-left mark for Arabic output
fn finish(text: String, locale: Locale) -> String {
    if !locale.is_rtl() {
        return text;
    }
    text.lines()
        .map(|line| format!("{}{}\n", RLM, line))
        .collect()
}

/// One control row: every option, the active one in brackets. A value
/// outside the option set is appended so the row still shows what ran.
fn write_choices<T: PartialEq>(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    choices: &[Choice<T>],
    active: &T,
    fallback: impl FnOnce() -> String,
) -> fmt::Result {
    write!(f, "  {:<14}", label)?;
    let mut found = false;
    for choice in choices {
        if choice.value == *active {
            found = true;
            write!(f, " [{}]", choice.label)?;
        } else {
            write!(f, "  {} ", choice.label)?;
        }
    }
    if !found {
        write!(f, " [{}]", fallback())?;
    }
    writeln!(f)
}

/// Dashboard view of one calculation
pub struct Dashboard<'a> {
    pub scenario: &'a Scenario,
    pub result: &'a SimulationResult,
    pub locale: Locale,
}

impl fmt::Display for Dashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (scenario, result, locale) = (self.scenario, self.result, self.locale);
        let l = labels(locale);

        writeln!(f, "=== {} ===", l.study)?;
        writeln!(f, "{}", scenario.display_name(locale))?;
        if !scenario.display_description(locale).is_empty() {
            writeln!(f, "{}", scenario.display_description(locale))?;
        }
        writeln!(f)?;

        write_choices(f, l.case, &case_choices(locale), &result.case, || {
            case_label(result.case, locale).to_string()
        })?;
        write_choices(
            f,
            l.occupancy,
            &occupancy_choices(locale),
            &result.occupancy_rate,
            || format_percent(result.occupancy_rate, locale),
        )?;
        write_choices(
            f,
            l.fee,
            &fee_choices(locale),
            &result.management_fee_rate,
            || format_percent(result.management_fee_rate, locale),
        )?;
        writeln!(f)?;

        writeln!(f, "{}:", l.projected_revenue)?;
        writeln!(f, "  {}", format_money(result.effective_revenue, locale))?;
        let occupancy = format_percent(result.occupancy_rate, locale);
        match (scenario.occupancy_duration_label(locale), locale) {
            (Some(duration), Locale::En) => writeln!(f, "  {} ({} Occupancy)", duration, occupancy)?,
            (Some(duration), Locale::Ar) => writeln!(f, "  {} (إشغال {})", duration, occupancy)?,
            (None, _) => {}
        }
        writeln!(f)?;

        writeln!(f, "{}:", l.distribution)?;
        writeln!(
            f,
            "  {:<28} {:>16}",
            l.total_revenue,
            format_money(result.effective_revenue, locale)
        )?;
        for line in result.ledger() {
            let category = match line.kind {
                LedgerKind::ManagementFee => format!(
                    "{} ({})",
                    l.management_fee,
                    format_percent(result.management_fee_rate, locale)
                ),
                LedgerKind::NetIncome => l.net_income.to_string(),
            };
            writeln!(
                f,
                "  {:<28} {:>16} {:>6}",
                category,
                format_money(line.amount, locale),
                format_whole_percent(line.percent, locale)
            )?;
        }

        if result.units.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(f, "{}:", l.per_unit)?;
        for (unit, item) in result.units.iter().zip(&scenario.unit_mix) {
            writeln!(
                f,
                "  {} ({} {})",
                item.display_name(locale),
                format_count(unit.count, locale),
                scenario.unit_label(locale)
            )?;
            for (label, amount) in [
                (l.daily_rate, unit.daily_rate),
                (l.monthly_revenue, unit.monthly_gross),
                (l.owner_net, unit.monthly_net),
            ] {
                writeln!(f, "    {:<20} {:>16}", label, format_money(amount, locale))?;
            }
        }

        Ok(())
    }
}

/// Sensitivity grid: one row per case, one column per occupancy
pub struct MatrixView<'a> {
    pub matrix: &'a [Vec<SimulationResult>],
    pub locale: Locale,
}

impl fmt::Display for MatrixView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let locale = self.locale;
        let l = labels(locale);

        writeln!(f, "{}:", l.sensitivity)?;

        let Some(first_row) = self.matrix.first() else {
            return Ok(());
        };

        write!(f, "  {:<14}", l.case)?;
        for cell in first_row {
            write!(f, " {:>16}", format_percent(cell.occupancy_rate, locale))?;
        }
        writeln!(f)?;

        for row in self.matrix {
            let Some(first) = row.first() else { continue };
            write!(f, "  {:<14}", case_label(first.case, locale))?;
            for cell in row {
                write!(f, " {:>16}", format_money(cell.net_income, locale))?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Stored figures and unit mix of a scenario
pub struct ScenarioView<'a> {
    pub scenario: &'a Scenario,
    pub locale: Locale,
}

impl fmt::Display for ScenarioView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (scenario, locale) = (self.scenario, self.locale);
        let l = labels(locale);

        writeln!(f, "{} [{}]", scenario.display_name(locale), scenario.id)?;
        if !scenario.category.is_empty() {
            writeln!(f, "  {}: {}", l.category, scenario.category)?;
        }
        if !scenario.display_description(locale).is_empty() {
            writeln!(f, "  {}", scenario.display_description(locale))?;
        }

        writeln!(f, "  {}:", l.stored_financials)?;
        writeln!(
            f,
            "    {:<14} {:>16} {:>16} {:>16}",
            l.case, l.revenue, l.fee_share, l.stored_net
        )?;
        for (case, financial) in &scenario.financials {
            writeln!(
                f,
                "    {:<14} {:>16} {:>16} {:>16}",
                case_label(*case, locale),
                format_money(financial.revenue, locale),
                format_money(financial.fee_share_amount, locale),
                format_money(financial.net_income, locale)
            )?;
        }

        if scenario.unit_mix.is_empty() {
            return Ok(());
        }

        writeln!(
            f,
            "  {} ({} {}):",
            l.unit_mix,
            format_count(scenario.total_units(), locale),
            scenario.unit_label(locale)
        )?;
        for unit in &scenario.unit_mix {
            write!(
                f,
                "    {}x {} @ {}",
                format_count(unit.count, locale),
                unit.display_name(locale),
                format_money(unit.average_price, locale)
            )?;
            if let Some(range) = &unit.price_range {
                write!(
                    f,
                    " ({} {} / {} / {})",
                    l.range,
                    format_money(range.min, locale),
                    format_money(range.avg, locale),
                    format_money(range.max, locale)
                )?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Audit result for one scenario, one line per warning
pub struct AuditView<'a> {
    pub scenario: &'a Scenario,
    pub warnings: &'a [DataQualityWarning],
}

impl fmt::Display for AuditView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.warnings.is_empty() {
            return writeln!(f, "{}: ok", self.scenario.id);
        }

        writeln!(f, "{}: {} warning(s)", self.scenario.id, self.warnings.len())?;
        for warning in self.warnings {
            writeln!(f, "  {}", warning)?;
        }
        Ok(())
    }
}

pub fn render_dashboard(scenario: &Scenario, result: &SimulationResult, locale: Locale) -> String {
    let view = Dashboard {
        scenario,
        result,
        locale,
    };
    finish(view.to_string(), locale)
}

pub fn render_matrix(matrix: &[Vec<SimulationResult>], locale: Locale) -> String {
    finish(MatrixView { matrix, locale }.to_string(), locale)
}

pub fn render_scenario(scenario: &Scenario, locale: Locale) -> String {
    finish(ScenarioView { scenario, locale }.to_string(), locale)
}

pub fn render_audit(scenario: &Scenario, warnings: &[DataQualityWarning]) -> String {
    AuditView { scenario, warnings }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{audit_scenario, compute_feasibility, sensitivity_matrix};
    use crate::catalog::Catalog;
    use crate::models::CaseKind;

    #[test]
    fn english_dashboard_shows_headline_figures() {
        let catalog = Catalog::builtin();
        let scenario = catalog.active(None).unwrap();
        let result = compute_feasibility(scenario, "base", 0.8, 0.2).unwrap();
        let text = render_dashboard(scenario, &result, Locale::En);

        assert!(text.contains("Realistic"));
        assert!(text.contains("SAR 215,496"));
        assert!(text.contains("SAR 43,099"));
        assert!(text.contains("SAR 172,397"));
        assert!(text.contains("Daily Rentals (80% Occupancy)"));
        assert!(text.contains("SAR 551"));
        assert!(!text.contains(RLM));
    }

    #[test]
    fn arabic_dashboard_is_marked_right_to_left() {
        let catalog = Catalog::builtin();
        let scenario = catalog.active(None).unwrap();
        let result = compute_feasibility(scenario, "base", 0.8, 0.2).unwrap();
        let text = render_dashboard(scenario, &result, Locale::Ar);

        assert!(text.lines().all(|line| line.starts_with(RLM)));
        assert!(text.contains("٢١٥٬٤٩٦ ريال"));
        assert!(text.contains("واقعي"));
        assert!(text.contains("شقة ٣ غرف نوم"));
    }

    #[test]
    fn dashboard_lists_options_with_active_marked() {
        let catalog = Catalog::builtin();
        let scenario = catalog.active(None).unwrap();
        let result = compute_feasibility(scenario, "best", 0.9, 0.2).unwrap();
        let text = render_dashboard(scenario, &result, Locale::En);

        assert!(text.contains("Conservative"));
        assert!(text.contains("  Realistic "));
        assert!(text.contains("[Optimistic]"));
        assert!(text.contains("  70%   80%  [90%]"));
        assert!(text.contains("[20%]"));
    }

    #[test]
    fn dashboard_appends_off_menu_rate() {
        let catalog = Catalog::builtin();
        let scenario = catalog.active(None).unwrap();
        let result = compute_feasibility(scenario, "base", 0.75, 0.15).unwrap();
        let text = render_dashboard(scenario, &result, Locale::En);

        assert!(text.contains("  90%  [75%]"));
        assert!(text.contains("  20%  [15%]"));
        assert!(!text.contains("[80%]"));
    }

    #[test]
    fn matrix_lists_every_case() {
        let catalog = Catalog::builtin();
        let scenario = catalog.active(None).unwrap();
        let matrix = sensitivity_matrix(scenario, &CaseKind::ALL, &[0.7, 0.8, 0.9], 0.2).unwrap();
        let text = render_matrix(&matrix, Locale::En);

        assert!(text.contains("Conservative"));
        assert!(text.contains("Optimistic"));
        assert!(text.contains("90%"));
        assert!(text.contains("SAR 172,397"));
    }

    #[test]
    fn scenario_view_lists_unit_ranges() {
        let catalog = Catalog::builtin();
        let text = render_scenario(catalog.active(None).unwrap(), Locale::En);
        assert!(text.contains("study_madinah"));
        assert!(text.contains("SAR 171,915 / SAR 201,115 / SAR 229,950"));
    }

    #[test]
    fn arabic_scenario_view_has_no_english_headings() {
        let catalog = Catalog::builtin();
        let text = render_scenario(catalog.active(None).unwrap(), Locale::Ar);

        assert!(text.lines().all(|line| line.starts_with(RLM)));
        assert!(text.contains("البيانات المالية (المخزنة)"));
        assert!(text.contains("مزيج الوحدات (٢ وحدة)"));
        assert!(text.contains("النطاق ١٧١٬٩١٥ ريال"));
        for heading in ["Category", "Financials", "Revenue", "Fee share", "Unit mix", "range"] {
            assert!(!text.contains(heading), "{} in {}", heading, text);
        }
    }

    #[test]
    fn audit_lists_each_warning_once() {
        let mut scenario = Catalog::builtin().active(None).unwrap().clone();
        scenario.financials.remove(&CaseKind::Worst);
        if let Some(base) = scenario.financials.get_mut(&CaseKind::Base) {
            base.net_income = 200000.0;
        }

        let warnings = audit_scenario(&scenario, 0.20).unwrap();
        let text = render_audit(&scenario, &warnings);

        assert!(text.starts_with(&format!("study_madinah: {} warning(s)\n", warnings.len())));
        assert_eq!(text.lines().count(), warnings.len() + 1);
        for warning in &warnings {
            assert_eq!(text.matches(&warning.to_string()).count(), 1);
        }
    }

    #[test]
    fn clean_audit_is_one_line() {
        let catalog = Catalog::builtin();
        let scenario = catalog.active(None).unwrap();
        let text = render_audit(scenario, &audit_scenario(scenario, 0.20).unwrap());
        assert_eq!(text, "study_madinah: ok\n");
    }
}
