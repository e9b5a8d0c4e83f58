// Standings resolution: points, then goal difference, then goals scored

use crate::types::TeamRecord;
use std::cmp::Ordering;

/// Table order between two records. Teams level on points, goal difference
/// and goals scored are ordered by name so every table is reproducible.
pub fn compare_records(a: &TeamRecord, b: &TeamRecord) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.name.cmp(&b.name))
}

/// Rank order as indices into `records`, best team first.
pub fn resolve(records: &[TeamRecord]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_unstable_by(|&a, &b| compare_records(&records[a], &records[b]));
    order
}

/// Rank order as team keys, best team first.
pub fn resolve_keys(records: &[TeamRecord]) -> Vec<String> {
    resolve(records)
        .into_iter()
        .map(|index| records[index].name.clone())
        .collect()
}

/// 1-based position of every record, indexed like `records`.
pub fn positions(records: &[TeamRecord]) -> Vec<usize> {
    let mut positions = vec![0; records.len()];
    for (rank, index) in resolve(records).into_iter().enumerate() {
        positions[index] = rank + 1;
    }
    positions
}
