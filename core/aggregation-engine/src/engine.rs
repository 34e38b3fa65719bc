//! FILENAME: core/aggregation-engine/src/engine.rs
//! Aggregation Engine - The single pass that turns rows into records.
//!
//! Algorithm:
//! 1. Return an empty table if there are no rows or either selection is empty
//! 2. For each row, in input order, build its group key
//! 3. Look the key up in the run-scoped arena, creating a zeroed group on first sight
//! 4. Fold the row's value for every selected measure into that group
//! 5. Emit the groups in the order their keys were first seen
//!
//! The pass owns all of its state and never mutates the input, so
//! concurrent passes over the same rows are safe.

use dataset::{Dataset, Row};
use log::{debug, warn};
use smallvec::SmallVec;

use crate::accumulator::{group_key, GroupArena};
use crate::record::{AggregateTable, DISPLAY_NAME_KEY};
use crate::selection::AxisSelection;

/// Groups `rows` by their values at `group_fields` and accumulates each of
/// `measure_fields` per group.
///
/// Runs in O(R * (G + M)) time with O(K * M) extra space, where K is the
/// number of distinct keys. There is no sorting step.
pub fn aggregate<G, M>(rows: &[Row], group_fields: &[G], measure_fields: &[M]) -> AggregateTable
where
    G: AsRef<str>,
    M: AsRef<str>,
{
    if rows.is_empty() || group_fields.is_empty() || measure_fields.is_empty() {
        debug!(
            "aggregate: nothing to do (rows={} group_fields={} measure_fields={})",
            rows.len(),
            group_fields.len(),
            measure_fields.len()
        );
        return AggregateTable::empty();
    }

    // Accumulators are keyed by measure name; a repeated name maps every
    // occurrence onto the same slot, so each occurrence folds the row again.
    let mut measure_names: Vec<String> = Vec::with_capacity(measure_fields.len());
    let slots: SmallVec<[usize; 4]> = measure_fields
        .iter()
        .map(|field| {
            let field = field.as_ref();
            match measure_names.iter().position(|m| m == field) {
                Some(slot) => slot,
                None => {
                    measure_names.push(field.to_string());
                    measure_names.len() - 1
                }
            }
        })
        .collect();
    if measure_names.len() < measure_fields.len() {
        debug!("aggregate: repeated measure names fold each row once per occurrence");
    }
    if measure_names.iter().any(|m| m == DISPLAY_NAME_KEY) {
        warn!(
            "measure field '{}' collides with the display name key; its value replaces the label in flat output",
            DISPLAY_NAME_KEY
        );
    }

    let mut arena = GroupArena::new(measure_names.len());
    for row in rows {
        let key = group_key(row, group_fields);
        let accumulators = arena.accumulators_for(key);
        for (&slot, field) in slots.iter().zip(measure_fields) {
            accumulators[slot].add(row.get(field.as_ref()));
        }
    }

    debug!(
        "aggregate: scanned {} rows into {} groups ({} measures)",
        rows.len(),
        arena.len(),
        measure_names.len()
    );

    AggregateTable::new(measure_names, arena.into_records())
}

/// Aggregates a whole dataset under a selection.
pub fn aggregate_selection(dataset: &Dataset, selection: &AxisSelection) -> AggregateTable {
    aggregate(
        dataset.rows(),
        &selection.group_fields,
        &selection.measure_fields,
    )
}
