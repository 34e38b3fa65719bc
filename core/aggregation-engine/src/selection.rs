//! FILENAME: core/aggregation-engine/src/selection.rs
//! Axis Selection - The serializable description of what to aggregate.
//!
//! Both lists are ordered and treated as plain sequences: a field may appear
//! in both lists, or more than once in one list.

use dataset::Dataset;
use serde::{Deserialize, Serialize};

/// The user's choice of grouping fields (X axis) and measure fields (Y axis).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSelection {
    /// Fields whose values form the group key, in key order.
    pub group_fields: Vec<String>,

    /// Fields accumulated per group, in output order.
    pub measure_fields: Vec<String>,
}

impl AxisSelection {
    pub fn new<G, M>(group_fields: G, measure_fields: M) -> Self
    where
        G: IntoIterator,
        G::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        AxisSelection {
            group_fields: group_fields.into_iter().map(Into::into).collect(),
            measure_fields: measure_fields.into_iter().map(Into::into).collect(),
        }
    }

    /// True once both axes have at least one field. An incomplete selection
    /// aggregates to nothing rather than failing.
    pub fn is_complete(&self) -> bool {
        !self.group_fields.is_empty() && !self.measure_fields.is_empty()
    }

    /// Selected field names that the dataset header does not contain,
    /// deduplicated, in selection order (group fields first).
    ///
    /// Purely informational: the engine treats such fields as absent values.
    pub fn missing_fields(&self, dataset: &Dataset) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for field in self.group_fields.iter().chain(self.measure_fields.iter()) {
            if !dataset.has_field(field) && !missing.contains(field) {
                missing.push(field.clone());
            }
        }
        missing
    }
}
