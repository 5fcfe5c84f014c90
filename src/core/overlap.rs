//! Pair-overlap aggregation. Pure functions over normalized work periods:
//! no I/O, no shared state, deterministic for a given input.

use crate::domain::model::{EmployeePair, PairDuration, WorkPeriod};
use std::collections::HashMap;

/// Day-overlap between two inclusive date ranges: later start vs earlier
/// end, zero when they only touch or miss entirely. Inverted ranges
/// (start > end) fall out as zero the same way.
pub fn overlap_days(a: &WorkPeriod, b: &WorkPeriod) -> i64 {
    let overlap_start = a.start.max(b.start);
    let overlap_end = a.end.min(b.end);

    if overlap_start > overlap_end {
        return 0;
    }

    (overlap_end - overlap_start).num_days()
}

/// Accumulate total overlapping days per unordered employee pair.
///
/// Records are grouped by project; within each group every unordered pair
/// of records between distinct employees is checked (O(n²) per group,
/// fine at assignment-file scale). Only strictly positive overlaps are
/// recorded, so the map never carries zero entries. Contributions for the
/// same pair are summed across projects.
pub fn pair_durations(records: &[WorkPeriod]) -> HashMap<EmployeePair, i64> {
    let mut by_project: HashMap<u32, Vec<&WorkPeriod>> = HashMap::new();
    for record in records {
        by_project.entry(record.project_id).or_default().push(record);
    }

    let mut durations: HashMap<EmployeePair, i64> = HashMap::new();

    for periods in by_project.values() {
        for i in 0..periods.len() {
            for j in (i + 1)..periods.len() {
                let (a, b) = (periods[i], periods[j]);

                if a.employee_id == b.employee_id {
                    continue;
                }

                let days = overlap_days(a, b);
                if days > 0 {
                    let pair = EmployeePair::new(a.employee_id, b.employee_id);
                    *durations.entry(pair).or_insert(0) += days;
                }
            }
        }
    }

    durations
}

/// Entry with the greatest accumulated total, or `None` for an empty map.
/// Ties are broken deterministically in favor of the lowest employee-id
/// pair rather than map iteration order.
pub fn longest_pair(durations: &HashMap<EmployeePair, i64>) -> Option<(EmployeePair, i64)> {
    let mut best: Option<(EmployeePair, i64)> = None;

    for (&pair, &days) in durations {
        let better = match best {
            None => true,
            Some((best_pair, best_days)) => {
                days > best_days || (days == best_days && pair < best_pair)
            }
        };
        if better {
            best = Some((pair, days));
        }
    }

    best
}

/// Report listing: days descending, then pair ascending, so output is
/// byte-stable across runs.
pub fn ranked_pairs(durations: &HashMap<EmployeePair, i64>) -> Vec<PairDuration> {
    let mut pairs: Vec<PairDuration> = durations
        .iter()
        .map(|(&pair, &days)| PairDuration::from_entry(pair, days))
        .collect();

    pairs.sort_by(|a, b| {
        b.total_days
            .cmp(&a.total_days)
            .then(a.employee_a.cmp(&b.employee_a))
            .then(a.employee_b.cmp(&b.employee_b))
    });

    pairs
}
