use crate::summary::StageSummary;
use std::collections::HashSet;

/// Collapses duplicate raw stage entries and orders the survivors
/// chronologically. Duplicates share an id; the first one encountered wins
/// whole, its fields are never merged with later ones. The sort is stable,
/// so stages sharing a start time keep their pre-sort (traversal) order.
pub fn aggregate_stages(raw_stages: Vec<StageSummary>) -> Vec<StageSummary> {
    let mut seen = HashSet::with_capacity(raw_stages.len());
    let mut stages: Vec<StageSummary> = raw_stages
        .into_iter()
        .filter(|stage| seen.insert(stage.id.clone()))
        .collect();
    stages.sort_by_key(|stage| stage.start_time_millis);
    stages
}
