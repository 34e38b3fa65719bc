//! FILENAME: core/aggregation-engine/src/accumulator.rs
//! Group keys and per-measure accumulation.
//!
//! Architecture:
//! - A group key is the row's group-field values rendered as text and joined
//!   with `", "`. The same string is the lookup key and the display label.
//! - Each group owns one accumulator per distinct measure name.
//! - Groups live in a run-scoped arena (a `Vec`) indexed by key, so the
//!   arena order is the order in which keys were first seen.

use dataset::{FieldValue, Row};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::record::AggregateRecord;

/// Separator placed between the per-field parts of a group key.
pub const GROUP_KEY_SEPARATOR: &str = ", ";

// ============================================================================
// GROUP KEY
// ============================================================================

/// Builds the group key for `row` from its values at `group_fields`.
///
/// A field the row lacks contributes an empty string, so `["a", <absent>]`
/// yields `"a, "`. Numbers render in canonical form, which means the number
/// `5` and the text `"5"` produce the same key.
pub fn group_key<S: AsRef<str>>(row: &Row, group_fields: &[S]) -> String {
    let mut key = String::new();
    for (i, field) in group_fields.iter().enumerate() {
        if i > 0 {
            key.push_str(GROUP_KEY_SEPARATOR);
        }
        if let Some(value) = row.get(field.as_ref()) {
            match value.as_text() {
                Some(text) => key.push_str(text),
                None => key.push_str(&value.display_text()),
            }
        }
    }
    key
}

// ============================================================================
// MEASURE ACCUMULATOR
// ============================================================================

/// Running total for one measure field within one group.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeasureAccumulator {
    total: f64,
}

impl MeasureAccumulator {
    pub fn new() -> Self {
        MeasureAccumulator { total: 0.0 }
    }

    /// Folds one row's value in: numbers are added, text and absent values
    /// add exactly one regardless of content.
    pub fn add(&mut self, value: Option<&FieldValue>) {
        match value.and_then(FieldValue::as_number) {
            Some(n) => self.total += n,
            None => self.total += 1.0,
        }
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}

// ============================================================================
// GROUP ARENA
// ============================================================================

/// One group under construction.
#[derive(Debug)]
struct PendingGroup {
    name: String,
    accumulators: SmallVec<[MeasureAccumulator; 4]>,
}

/// Run-scoped store of groups in first-seen order.
#[derive(Debug)]
pub(crate) struct GroupArena {
    /// Key -> position in `groups`.
    index: FxHashMap<String, usize>,
    groups: Vec<PendingGroup>,
    measure_count: usize,
}

impl GroupArena {
    pub(crate) fn new(measure_count: usize) -> Self {
        GroupArena {
            index: FxHashMap::default(),
            groups: Vec::new(),
            measure_count,
        }
    }

    /// Returns the accumulators for `key`, creating a zeroed group on first sight.
    pub(crate) fn accumulators_for(&mut self, key: String) -> &mut [MeasureAccumulator] {
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                let position = self.groups.len();
                self.index.insert(key.clone(), position);
                self.groups.push(PendingGroup {
                    name: key,
                    accumulators: SmallVec::from_elem(MeasureAccumulator::new(), self.measure_count),
                });
                position
            }
        };
        &mut self.groups[position].accumulators
    }

    pub(crate) fn len(&self) -> usize {
        self.groups.len()
    }

    /// Consumes the arena, yielding records in first-seen order.
    pub(crate) fn into_records(self) -> Vec<AggregateRecord> {
        self.groups
            .into_iter()
            .map(|group| {
                let values = group.accumulators.iter().map(|acc| acc.total()).collect();
                AggregateRecord::new(group.name, values)
            })
            .collect()
    }
}
