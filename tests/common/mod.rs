//! Shared fixtures for the feasibility integration tests.
//!
//! Provides a second scenario (a long-term rental, one unit without a price
//! range) in
//! catalog-file JSON form, and `setup_catalog_dir()` which writes catalog
//! files into a temporary directory.

#![allow(dead_code)]

use std::fs;

use stay_feasibility::{Catalog, Scenario};

pub fn long_term_json() -> serde_json::Value {
    serde_json::json!({
        "id": "study_riyadh",
        "type": "long_term",
        "name": "Long Term Lease",
        "nameAr": "تأجير طويل المدى",
        "description": "Annual leases for a Riyadh block of four apartments.",
        "financials": {
            "worst": { "revenue": 170000, "mabaatShare": 34000, "netIncome": 136000 },
            "base":  { "revenue": 180000, "mabaatShare": 36000, "netIncome": 144000 },
            "best":  { "revenue": 190000, "mabaatShare": 38000, "netIncome": 152000 }
        },
        "unitCount": 4,
        "unitMix": [
            {
                "name": "2 Bedroom Apartment",
                "count": 2,
                "avgPrice": 42000,
                "priceRange": { "min": 37000, "avg": 42000, "max": 47000 }
            },
            { "name": "3 Bedroom Apartment", "count": 2, "avgPrice": 48000 }
        ]
    })
}

pub fn long_term() -> Scenario {
    serde_json::from_value(long_term_json()).unwrap()
}

/// Temporary directory holding the built-in catalog and the long-term
/// scenario in a nested folder.
///
/// The caller must keep the `TempDir` alive for the duration of the test.
pub fn setup_catalog_dir() -> tempfile::TempDir {
    let tmp_dir = tempfile::tempdir().unwrap();

    let builtin = Catalog::builtin().to_json_pretty().unwrap();
    fs::write(tmp_dir.path().join("madinah.json"), builtin).unwrap();

    let nested = tmp_dir.path().join("riyadh");
    fs::create_dir_all(&nested).unwrap();
    fs::write(
        nested.join("lease.json"),
        serde_json::to_string_pretty(&long_term_json()).unwrap(),
    )
    .unwrap();

    // Not a catalog file; must be ignored
    fs::write(tmp_dir.path().join("notes.txt"), "draft figures").unwrap();

    tmp_dir
}
