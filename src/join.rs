//! Copies visit codes from the states-visited table onto boundary features.

use std::collections::{HashMap, HashSet};

use clap::ValueEnum;

use crate::data::{StateCollection, StateVisitRecord};
use crate::error::JoinError;

/// How visit rows are matched to boundary features
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum JoinMode {
    /// Linear scan, first matching feature wins, misses are dropped and a
    /// repeated state row overwrites the earlier one
    #[default]
    Lenient,
    /// Indexed by name; misses and duplicate names are rejected
    Strict,
}

/// Outcome of a join
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JoinReport {
    /// Visit rows written into a feature
    pub matched: usize,
    /// Visit state names with no feature, in table order
    pub unmatched: Vec<String>,
    /// State names seen more than once in the visit table, in table order
    pub duplicate_visits: Vec<String>,
}

/// Join `visits` into `states` by exact, case-sensitive name equality.
pub fn join_visits(
    states: &mut StateCollection,
    visits: &[StateVisitRecord],
    mode: JoinMode,
) -> Result<JoinReport, JoinError> {
    let report = match mode {
        JoinMode::Lenient => join_lenient(states, visits),
        JoinMode::Strict => join_strict(states, visits)?,
    };

    tracing::info!(
        ?mode,
        matched = report.matched,
        unmatched = report.unmatched.len(),
        duplicates = report.duplicate_visits.len(),
        "joined visits into state boundaries"
    );
    if !report.unmatched.is_empty() {
        tracing::debug!(names = ?report.unmatched, "visit rows with no boundary feature");
    }
    if !report.duplicate_visits.is_empty() {
        tracing::debug!(names = ?report.duplicate_visits, "states listed more than once");
    }

    Ok(report)
}

fn join_lenient(states: &mut StateCollection, visits: &[StateVisitRecord]) -> JoinReport {
    let mut report = JoinReport::default();
    let mut seen = HashSet::new();

    for visit in visits {
        if !seen.insert(visit.state.as_str()) {
            report.duplicate_visits.push(visit.state.clone());
        }

        let matched = states
            .features
            .iter_mut()
            .find(|f| f.name.as_deref() == Some(visit.state.as_str()));

        match matched {
            Some(feature) => {
                feature.visited = visit.visited;
                report.matched += 1;
            }
            None => report.unmatched.push(visit.state.clone()),
        }
    }

    report
}

fn join_strict(
    states: &mut StateCollection,
    visits: &[StateVisitRecord],
) -> Result<JoinReport, JoinError> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(states.len());
    let mut duplicate_features = Vec::new();
    for (idx, feature) in states.features.iter().enumerate() {
        let Some(name) = feature.name.as_deref() else {
            continue;
        };
        if index.insert(name, idx).is_some() {
            duplicate_features.push(name.to_string());
        }
    }
    if !duplicate_features.is_empty() {
        return Err(JoinError::DuplicateFeature(duplicate_features));
    }

    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    let mut unmatched = Vec::new();
    let mut updates = Vec::with_capacity(visits.len());
    for visit in visits {
        if !seen.insert(visit.state.as_str()) {
            duplicates.push(visit.state.clone());
        }
        match index.get(visit.state.as_str()) {
            Some(&idx) => updates.push((idx, visit.visited)),
            None => unmatched.push(visit.state.clone()),
        }
    }
    if !duplicates.is_empty() {
        return Err(JoinError::DuplicateVisit(duplicates));
    }
    if !unmatched.is_empty() {
        return Err(JoinError::Unmatched(unmatched));
    }

    let matched = updates.len();
    for (idx, visited) in updates {
        states.features[idx].visited = visited;
    }

    Ok(JoinReport {
        matched,
        unmatched,
        duplicate_visits: duplicates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StateFeature;

    fn states(names: &[&str]) -> StateCollection {
        StateCollection::new(
            names
                .iter()
                .map(|name| StateFeature::new(*name, Vec::new()))
                .collect(),
        )
    }

    #[test]
    fn test_matching_feature_gets_value() {
        let mut collection = states(&["Ohio", "Texas", "Utah"]);
        let visits = [StateVisitRecord::new("Texas", 2.0)];
        let report = join_visits(&mut collection, &visits, JoinMode::Lenient).unwrap();

        assert_eq!(report.matched, 1);
        assert_eq!(collection.get("Texas").unwrap().visited, Some(2.0));
        assert_eq!(collection.get("Ohio").unwrap().visited, None);
        assert_eq!(collection.get("Utah").unwrap().visited, None);
    }

    #[test]
    fn test_unmatched_visit_is_dropped() {
        let mut collection = states(&["Ohio", "Texas"]);
        let visits = [
            StateVisitRecord::new("Puerto Rico", 3.0),
            StateVisitRecord::new("texas", 1.0),
        ];
        let report = join_visits(&mut collection, &visits, JoinMode::Lenient).unwrap();

        assert_eq!(collection.len(), 2);
        assert!(collection.features.iter().all(|f| f.visited.is_none()));
        assert_eq!(report.matched, 0);
        assert_eq!(report.unmatched, vec!["Puerto Rico", "texas"]);
    }

    #[test]
    fn test_later_visit_row_wins() {
        let mut collection = states(&["Texas"]);
        let visits = [
            StateVisitRecord::new("Texas", 1.0),
            StateVisitRecord::new("Texas", 3.0),
        ];
        let report = join_visits(&mut collection, &visits, JoinMode::Lenient).unwrap();

        assert_eq!(collection.get("Texas").unwrap().visited, Some(3.0));
        assert_eq!(report.duplicate_visits, vec!["Texas"]);
    }

    #[test]
    fn test_first_feature_with_name_wins() {
        let mut collection = states(&["Texas", "Texas"]);
        let visits = [StateVisitRecord::new("Texas", 2.0)];
        join_visits(&mut collection, &visits, JoinMode::Lenient).unwrap();

        assert_eq!(collection.features[0].visited, Some(2.0));
        assert_eq!(collection.features[1].visited, None);
    }

    #[test]
    fn test_empty_code_clears_value() {
        let mut collection = states(&["Texas"]);
        let visits = [
            StateVisitRecord::new("Texas", 2.0),
            StateVisitRecord {
                state: "Texas".to_string(),
                visited: None,
            },
        ];
        join_visits(&mut collection, &visits, JoinMode::Lenient).unwrap();
        assert_eq!(collection.get("Texas").unwrap().visited, None);
    }

    #[test]
    fn test_strict_join_applies_clean_table() {
        let mut collection = states(&["Ohio", "Texas"]);
        let visits = [
            StateVisitRecord::new("Texas", 2.0),
            StateVisitRecord::new("Ohio", 1.0),
        ];
        let report = join_visits(&mut collection, &visits, JoinMode::Strict).unwrap();

        assert_eq!(report.matched, 2);
        assert_eq!(collection.get("Ohio").unwrap().visited, Some(1.0));
        assert_eq!(collection.get("Texas").unwrap().visited, Some(2.0));
    }

    #[test]
    fn test_strict_join_rejects_misses() {
        let mut collection = states(&["Texas"]);
        let visits = [
            StateVisitRecord::new("Texas", 2.0),
            StateVisitRecord::new("Guam", 1.0),
        ];
        let err = join_visits(&mut collection, &visits, JoinMode::Strict).unwrap_err();

        assert_eq!(err, JoinError::Unmatched(vec!["Guam".to_string()]));
        assert_eq!(collection.get("Texas").unwrap().visited, None);
    }

    #[test]
    fn test_strict_join_rejects_duplicates() {
        let mut collection = states(&["Texas"]);
        let visits = [
            StateVisitRecord::new("Texas", 2.0),
            StateVisitRecord::new("Texas", 3.0),
        ];
        let err = join_visits(&mut collection, &visits, JoinMode::Strict).unwrap_err();
        assert_eq!(err, JoinError::DuplicateVisit(vec!["Texas".to_string()]));

        let mut collection = states(&["Texas", "Texas"]);
        let visits = [StateVisitRecord::new("Texas", 2.0)];
        let err = join_visits(&mut collection, &visits, JoinMode::Strict).unwrap_err();
        assert_eq!(err, JoinError::DuplicateFeature(vec!["Texas".to_string()]));
        assert!(collection.features.iter().all(|f| f.visited.is_none()));
    }
}
