//! Stay Feasibility
//!
//! Command-line dashboard for short-term rental feasibility studies.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use stay_feasibility::calculator::{self, audit_scenario, sensitivity_matrix};
use stay_feasibility::controls::{
    self, Selection, DEFAULT_CASE, DEFAULT_FEE_RATE, DEFAULT_OCCUPANCY_RATE, OCCUPANCY_OPTIONS,
};
use stay_feasibility::format::{format_money, Locale};
use stay_feasibility::models::CaseKind;
use stay_feasibility::report;
use stay_feasibility::Catalog;

#[derive(Parser)]
#[command(name = "stay-feasibility")]
#[command(about = "Short-term rental feasibility calculator")]
struct Cli {
    /// Scenario catalog: a JSON file or a directory of JSON files
    #[arg(short, long, env = "STAY_FEASIBILITY_CATALOG")]
    catalog: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all scenarios in the catalog
    List,

    /// Show stored figures and unit mix for a scenario
    Show {
        /// Scenario ID
        id: String,

        /// Report language (en, ar)
        #[arg(short, long, default_value = "en")]
        lang: Locale,
    },

    /// Calculate revenue, fee and net income for a selection
    Calc {
        /// Scenario ID (defaults to the first scenario)
        #[arg(short, long)]
        scenario: Option<String>,

        /// Case: worst, base or best
        #[arg(long, default_value_t = DEFAULT_CASE)]
        case: CaseKind,

        /// Occupancy rate, e.g. 0.8 or 80%
        #[arg(short, long, default_value_t = DEFAULT_OCCUPANCY_RATE, value_parser = parse_occupancy)]
        occupancy: f64,

        /// Management fee rate, e.g. 0.2 or 20%
        #[arg(short, long, default_value_t = DEFAULT_FEE_RATE, value_parser = parse_fee)]
        fee: f64,

        /// Report language (en, ar)
        #[arg(short, long, default_value = "en")]
        lang: Locale,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Net income for every case at each occupancy option
    Matrix {
        /// Scenario ID (defaults to the first scenario)
        #[arg(short, long)]
        scenario: Option<String>,

        /// Management fee rate, e.g. 0.2 or 20%
        #[arg(short, long, default_value_t = DEFAULT_FEE_RATE, value_parser = parse_fee)]
        fee: f64,

        /// Report language (en, ar)
        #[arg(short, long, default_value = "en")]
        lang: Locale,
    },

    /// Audit stored figures against recomputed values
    Check,

    /// Print the built-in catalog as JSON
    Sample,
}

fn parse_occupancy(text: &str) -> std::result::Result<f64, String> {
    controls::parse_occupancy(text).map_err(|e| e.to_string())
}

fn parse_fee(text: &str) -> std::result::Result<f64, String> {
    controls::parse_fee(text).map_err(|e| e.to_string())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog> {
    match path {
        Some(path) => {
            let catalog = Catalog::load(path)
                .with_context(|| format!("Failed to load catalog from {}", path.display()))?;
            info!(path = %path.display(), scenarios = catalog.len(), "Catalog loaded");
            Ok(catalog)
        }
        None => Ok(Catalog::builtin()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = load_catalog(cli.catalog.as_ref())?;

    match cli.command {
        Commands::List => {
            println!("{:<20} {:<28} {:>6} {:>16}", "ID", "Name", "Units", "Base revenue");
            println!("{}", "-".repeat(73));
            for s in catalog.scenarios() {
                let base = s
                    .financials
                    .get(&CaseKind::Base)
                    .map(|f| format_money(f.revenue, Locale::En))
                    .unwrap_or_else(|| "-".to_string());
                println!("{:<20} {:<28} {:>6} {:>16}", s.id, s.name, s.total_units(), base);
            }
        }

        Commands::Show { id, lang } => {
            let scenario = catalog.active(Some(&id))?;
            print!("{}", report::render_scenario(scenario, lang));
        }

        Commands::Calc {
            scenario,
            case,
            occupancy,
            fee,
            lang,
            json,
        } => {
            let selection = Selection {
                scenario_id: scenario,
                case,
                occupancy_rate: occupancy,
                management_fee_rate: fee,
            };
            let input = selection.input(&catalog)?;
            let result = calculator::compute(&input)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", report::render_dashboard(input.scenario, &result, lang));
            }
        }

        Commands::Matrix {
            scenario,
            fee,
            lang,
        } => {
            let selection = Selection {
                scenario_id: scenario,
                management_fee_rate: fee,
                ..Selection::default()
            };
            let input = selection.input(&catalog)?;
            let matrix = sensitivity_matrix(
                input.scenario,
                &CaseKind::ALL,
                &OCCUPANCY_OPTIONS,
                input.management_fee_rate,
            )?;
            print!("{}", report::render_matrix(&matrix, lang));
        }

        Commands::Check => {
            let mut total = 0;
            for scenario in catalog.scenarios() {
                let warnings = audit_scenario(scenario, DEFAULT_FEE_RATE)?;
                debug!(scenario = %scenario.id, warnings = warnings.len(), "Scenario audited");
                print!("{}", report::render_audit(scenario, &warnings));
                total += warnings.len();
            }
            println!(
                "\nChecked {} scenario(s), {} data-quality warning(s)",
                catalog.len(),
                total
            );
        }

        Commands::Sample => {
            println!("{}", Catalog::builtin().to_json_pretty()?);
        }
    }

    Ok(())
}
