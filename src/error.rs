use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FeasibilityError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid price range for unit '{unit}': min {min}, avg {avg}, max {max}")]
    InvalidRange {
        unit: String,
        min: f64,
        avg: f64,
        max: f64,
    },

    #[error("Invalid unit '{unit}': count must be positive")]
    InvalidUnit { unit: String },

    #[error("Invalid {what}: {value}")]
    InvalidRate { what: &'static str, value: String },

    #[error("Duplicate scenario id: {0}")]
    DuplicateScenario(String),

    #[error("Catalog contains no scenarios")]
    EmptyCatalog,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, FeasibilityError>;
