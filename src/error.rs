use std::path::PathBuf;

use thiserror::Error;

use crate::data::Dataset;

/// Failure to fetch or parse one dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {dataset} from {}: {source}", path.display())]
    Io {
        dataset: Dataset,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {dataset} table {}: {source}", path.display())]
    Csv {
        dataset: Dataset,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("malformed GeoJSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: simd_json::Error,
    },
    #[error("{} is not a GeoJSON FeatureCollection", path.display())]
    NotFeatureCollection { path: PathBuf },
}

impl LoadError {
    pub fn dataset(&self) -> Dataset {
        match self {
            LoadError::Io { dataset, .. } | LoadError::Csv { dataset, .. } => *dataset,
            LoadError::Json { .. } | LoadError::NotFeatureCollection { .. } => Dataset::Boundaries,
        }
    }
}

/// Every dataset that failed during [`crate::data::load_all`].
#[derive(Error, Debug)]
#[error("{} of 3 datasets failed to load{}", .0.len(), bullet_list(.0))]
pub struct LoadFailures(pub Vec<LoadError>);

impl LoadFailures {
    pub fn errors(&self) -> &[LoadError] {
        &self.0
    }
}

fn bullet_list(errors: &[LoadError]) -> String {
    errors.iter().map(|err| format!("\n  - {err}")).collect()
}

/// Rejections raised by a strict join. The collection is untouched when
/// this is returned.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum JoinError {
    #[error("no boundary feature named {}", .0.join(", "))]
    Unmatched(Vec<String>),
    #[error("state listed more than once in the visit table: {}", .0.join(", "))]
    DuplicateVisit(Vec<String>),
    #[error("boundary features share a name: {}", .0.join(", "))]
    DuplicateFeature(Vec<String>),
}
