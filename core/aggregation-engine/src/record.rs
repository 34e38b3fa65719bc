//! FILENAME: core/aggregation-engine/src/record.rs
//! Aggregate Records - The output handed to presentation.
//!
//! A table keeps each distinct measure name once and each record keeps its
//! values positionally, aligned with those names. Record order is the order
//! in which group keys were first seen and must not be re-sorted downstream.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use smallvec::SmallVec;

/// Key under which a record's group label is emitted in the flat output form.
pub const DISPLAY_NAME_KEY: &str = "name";

/// Largest magnitude below which every integral f64 is an exact integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Writes integral finite values as JSON integers (`5`, not `5.0`).
pub(crate) fn serialize_measure<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    let v = *value;
    if v.is_finite() && v.fract() == 0.0 && v.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(v as i64)
    } else {
        serializer.serialize_f64(v)
    }
}

struct Measure(f64);

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_measure(&self.0, serializer)
    }
}

// ============================================================================
// AGGREGATE RECORD
// ============================================================================

/// One output unit per distinct group key.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRecord {
    name: String,
    values: SmallVec<[f64; 4]>,
}

impl AggregateRecord {
    pub(crate) fn new(name: String, values: SmallVec<[f64; 4]>) -> Self {
        AggregateRecord { name, values }
    }

    /// The group key, used as the display label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accumulated values, one per measure position.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn value(&self, position: usize) -> Option<f64> {
        self.values.get(position).copied()
    }
}

/// The `{name, value}` pair used when exactly one measure is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub name: String,
    #[serde(serialize_with = "serialize_measure")]
    pub value: f64,
}

// ============================================================================
// AGGREGATE TABLE
// ============================================================================

/// The ordered result of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateTable {
    measure_fields: Vec<String>,
    records: Vec<AggregateRecord>,
}

impl AggregateTable {
    pub(crate) fn new(measure_fields: Vec<String>, records: Vec<AggregateRecord>) -> Self {
        AggregateTable {
            measure_fields,
            records,
        }
    }

    /// An empty result: the "nothing selected yet" state.
    pub fn empty() -> Self {
        AggregateTable::default()
    }

    /// Distinct measure names, in order of first selection.
    pub fn measure_fields(&self) -> &[String] {
        &self.measure_fields
    }

    pub fn records(&self) -> &[AggregateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finds the record for a group key.
    pub fn record(&self, name: &str) -> Option<&AggregateRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Value of `measure` for group `name`.
    pub fn value(&self, name: &str, measure: &str) -> Option<f64> {
        let position = self.measure_fields.iter().position(|m| m == measure)?;
        self.record(name)?.value(position)
    }

    /// Largest accumulated value across every record and measure.
    pub fn max_value(&self) -> Option<f64> {
        self.records
            .iter()
            .flat_map(|r| r.values.iter().copied())
            .fold(None, |max: Option<f64>, v| Some(max.map_or(v, |m| m.max(v))))
    }

    /// Values of one measure position, in record order.
    pub fn column(&self, position: usize) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| r.value(position).unwrap_or(0.0))
            .collect()
    }

    /// The restricted single-measure form. `None` unless exactly one
    /// measure field was selected.
    pub fn single_measure_points(&self) -> Option<Vec<DataPoint>> {
        if self.measure_fields.len() != 1 {
            return None;
        }
        Some(
            self.records
                .iter()
                .map(|r| DataPoint {
                    name: r.name.clone(),
                    value: r.value(0).unwrap_or(0.0),
                })
                .collect(),
        )
    }
}

// ============================================================================
// SERIALIZATION
// ============================================================================

/// A record paired with the measure names it should be keyed by.
struct FlatRecord<'a> {
    record: &'a AggregateRecord,
    measure_fields: &'a [String],
}

impl Serialize for FlatRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // A measure called `name` takes over the display key's value but
        // keeps its leading position.
        let name_measure = self
            .measure_fields
            .iter()
            .position(|m| m == DISPLAY_NAME_KEY)
            .and_then(|p| self.record.value(p));

        let mut map = serializer.serialize_map(None)?;
        match name_measure {
            Some(value) => map.serialize_entry(DISPLAY_NAME_KEY, &Measure(value))?,
            None => map.serialize_entry(DISPLAY_NAME_KEY, &self.record.name)?,
        }
        for (field, value) in self.measure_fields.iter().zip(self.record.values.iter()) {
            if field != DISPLAY_NAME_KEY {
                map.serialize_entry(field, &Measure(*value))?;
            }
        }
        map.end()
    }
}

/// Serializes as a list of flat objects: `[{"name": "red", "qty": 5}, ...]`.
impl Serialize for AggregateTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.records.len()))?;
        for record in &self.records {
            seq.serialize_element(&FlatRecord {
                record,
                measure_fields: &self.measure_fields,
            })?;
        }
        seq.end()
    }
}
