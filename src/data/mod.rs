mod boundaries;
mod tables;

pub use boundaries::{parse_state_boundaries, Polygon, Ring, StateCollection, StateFeature};
pub use tables::{parse_cities, parse_states_visited, CityRecord, StateVisitRecord};

use crate::error::{LoadError, LoadFailures};
use std::fmt;
use std::fs::{self, File};
use std::path::Path;

/// The three input files, with their fixed names inside the data directory
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dataset {
    StatesVisited,
    Cities,
    Boundaries,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [Dataset::StatesVisited, Dataset::Cities, Dataset::Boundaries];

    pub fn file_name(self) -> &'static str {
        match self {
            Dataset::StatesVisited => "stateslived.csv",
            Dataset::Cities => "cities-lived.csv",
            Dataset::Boundaries => "us-states.json",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dataset::StatesVisited => "states-visited table",
            Dataset::Cities => "cities table",
            Dataset::Boundaries => "state boundaries",
        })
    }
}

/// Everything the pipeline needs, owned for the length of one run
#[derive(Clone, Debug, Default)]
pub struct Datasets {
    pub visits: Vec<StateVisitRecord>,
    pub cities: Vec<CityRecord>,
    pub states: StateCollection,
}

/// Load the three datasets from `data_dir` concurrently.
///
/// Succeeds only when all three load; otherwise every failure is reported.
pub fn load_all(data_dir: &Path) -> Result<Datasets, LoadFailures> {
    let visits_path = data_dir.join(Dataset::StatesVisited.file_name());
    let cities_path = data_dir.join(Dataset::Cities.file_name());
    let states_path = data_dir.join(Dataset::Boundaries.file_name());

    let (visits, (cities, states)) = rayon::join(
        || load_states_visited(&visits_path),
        || {
            rayon::join(
                || load_cities(&cities_path),
                || load_state_boundaries(&states_path),
            )
        },
    );

    match (visits, cities, states) {
        (Ok(visits), Ok(cities), Ok(states)) => {
            tracing::info!(
                visits = visits.len(),
                cities = cities.len(),
                states = states.len(),
                "datasets loaded"
            );
            Ok(Datasets {
                visits,
                cities,
                states,
            })
        }
        (visits, cities, states) => {
            let errors = [visits.err(), cities.err(), states.err()]
                .into_iter()
                .flatten()
                .collect();
            Err(LoadFailures(errors))
        }
    }
}

/// Load `stateslived.csv`
pub fn load_states_visited(path: &Path) -> Result<Vec<StateVisitRecord>, LoadError> {
    let dataset = Dataset::StatesVisited;
    let file = open(dataset, path)?;
    let rows = parse_states_visited(file).map_err(|source| LoadError::Csv {
        dataset,
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "loaded {dataset}");
    Ok(rows)
}

/// Load `cities-lived.csv`
pub fn load_cities(path: &Path) -> Result<Vec<CityRecord>, LoadError> {
    let dataset = Dataset::Cities;
    let file = open(dataset, path)?;
    let rows = parse_cities(file).map_err(|source| LoadError::Csv {
        dataset,
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "loaded {dataset}");
    Ok(rows)
}

/// Load `us-states.json`
pub fn load_state_boundaries(path: &Path) -> Result<StateCollection, LoadError> {
    let mut bytes = fs::read(path).map_err(|source| LoadError::Io {
        dataset: Dataset::Boundaries,
        path: path.to_path_buf(),
        source,
    })?;

    let states = parse_state_boundaries(&mut bytes)
        .map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?
        .ok_or_else(|| LoadError::NotFeatureCollection {
            path: path.to_path_buf(),
        })?;

    tracing::debug!(
        path = %path.display(),
        features = states.len(),
        "loaded {}",
        Dataset::Boundaries
    );
    Ok(states)
}

fn open(dataset: Dataset, path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        dataset,
        path: path.to_path_buf(),
        source,
    })
}
