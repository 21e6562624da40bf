//! Scenario catalog: the built-in study and JSON catalog files
//!
//! A catalog is read-only once constructed. Files may hold a single
//! scenario object or an array of them; a directory is scanned
//! recursively for `*.json` files.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{FeasibilityError, Result};
use crate::models::{CaseKind, FinancialCase, PriceRange, Scenario, UnitMixItem};

#[derive(Debug, Clone)]
pub struct Catalog {
    scenarios: Vec<Scenario>,
}

impl Catalog {
    /// Build a catalog, rejecting empty lists, duplicate ids, zero unit
    /// counts and malformed price ranges
    pub fn new(scenarios: Vec<Scenario>) -> Result<Self> {
        if scenarios.is_empty() {
            return Err(FeasibilityError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for scenario in &scenarios {
            if !seen.insert(scenario.id.as_str()) {
                return Err(FeasibilityError::DuplicateScenario(scenario.id.clone()));
            }
            for unit in &scenario.unit_mix {
                validate_unit(unit)?;
            }
        }

        Ok(Self { scenarios })
    }

    /// The Al Madinah short-term rental study
    pub fn builtin() -> Self {
        Self {
            scenarios: vec![madinah_short_term()],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::new(parse_scenarios(json, Path::new("<inline>"))?)
    }

    /// Load a catalog file, or every `*.json` file under a directory
    pub fn load(path: &Path) -> Result<Self> {
        let files = if path.is_dir() {
            find_catalog_files(path)?
        } else {
            vec![path.to_path_buf()]
        };

        let mut scenarios = Vec::new();
        for file in &files {
            let content = fs::read_to_string(file)?;
            let parsed = parse_scenarios(&content, file)?;
            debug!(path = %file.display(), scenarios = parsed.len(), "Catalog file loaded");
            scenarios.extend(parsed);
        }

        Self::new(scenarios)
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// The active scenario: the one named, or the first in the catalog
    pub fn active(&self, id: Option<&str>) -> Result<&Scenario> {
        match id {
            Some(id) => self.get(id).ok_or_else(|| {
                FeasibilityError::InvalidSelection(format!("unknown scenario '{}'", id))
            }),
            None => self.scenarios.first().ok_or(FeasibilityError::EmptyCatalog),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.scenarios).map_err(|source| FeasibilityError::Json {
            path: PathBuf::from("<catalog>"),
            source,
        })
    }
}

/// A file holding `[...]` is a list of scenarios; anything else is read as
/// a single scenario object
fn parse_scenarios(json: &str, path: &Path) -> Result<Vec<Scenario>> {
    let parsed = if json.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<Scenario>>(json)
    } else {
        serde_json::from_str::<Scenario>(json).map(|scenario| vec![scenario])
    };

    parsed.map_err(|source| FeasibilityError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Find all catalog files under a directory, in path order
pub fn find_catalog_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

fn validate_unit(unit: &UnitMixItem) -> Result<()> {
    if unit.count == 0 {
        return Err(FeasibilityError::InvalidUnit {
            unit: unit.name.clone(),
        });
    }

    if let Some(range) = &unit.price_range {
        if !(range.min <= range.avg && range.avg <= range.max) {
            return Err(FeasibilityError::InvalidRange {
                unit: unit.name.clone(),
                min: range.min,
                avg: range.avg,
                max: range.max,
            });
        }
    }

    Ok(())
}

fn madinah_short_term() -> Scenario {
    // Nightly rates x 365: studio 170/187/204, 3BR 471/551/630
    let financials = BTreeMap::from([
        (
            CaseKind::Worst,
            FinancialCase {
                revenue: 233965.0,
                fee_share_amount: 46793.0,
                net_income: 187172.0,
                roi: None,
            },
        ),
        (
            CaseKind::Base,
            FinancialCase {
                revenue: 269370.0,
                fee_share_amount: 53874.0,
                net_income: 215496.0,
                roi: None,
            },
        ),
        (
            CaseKind::Best,
            FinancialCase {
                revenue: 304410.0,
                fee_share_amount: 60882.0,
                net_income: 243528.0,
                roi: None,
            },
        ),
    ]);

    Scenario {
        id: "study_madinah".to_string(),
        name: "Short Term Rental".to_string(),
        name_ar: Some("تأجير قصير المدى".to_string()),
        category: "short_term".to_string(),
        description: "Short term rental model for Al Madinah property consisting of \
                      1 Studio and 1 3-Bedroom Apartment."
            .to_string(),
        description_ar: Some(
            "نموذج التأجير قصير المدى لعقار المدينة المنورة (١ استوديو و ١ شقة ٣ غرف نوم)."
                .to_string(),
        ),
        financials,
        unit_mix: vec![
            UnitMixItem {
                name: "Studio".to_string(),
                name_ar: Some("استوديو".to_string()),
                count: 1,
                average_price: 68255.0,
                price_range: Some(PriceRange {
                    min: 62050.0,
                    avg: 68255.0,
                    max: 74460.0,
                }),
            },
            UnitMixItem {
                name: "3 Bedroom Apartment".to_string(),
                name_ar: Some("شقة ٣ غرف نوم".to_string()),
                count: 1,
                average_price: 201115.0,
                price_range: Some(PriceRange {
                    min: 171915.0,
                    avg: 201115.0,
                    max: 229950.0,
                }),
            },
        ],
        unit_count: Some(2),
        unit_label: Some("Units".to_string()),
        unit_label_ar: Some("وحدة".to_string()),
        occupancy_duration_label: Some("Daily Rentals".to_string()),
        occupancy_duration_label_ar: Some("عقود يومية".to_string()),
    }
}
