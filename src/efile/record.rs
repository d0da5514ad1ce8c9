use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::temporal::SCAN_TIMESTAMP;
use super::value::FieldValue;

/// Geometry of one slice: the three `gw_point` lines following a `slice` line.
///
/// Coordinates are kept as the scanner wrote them, without coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliceRecord {
    /// First gradient/geometry corner point
    pub gw_point1: String,
    /// Second gradient/geometry corner point
    pub gw_point2: String,
    /// Third gradient/geometry corner point
    pub gw_point3: String,
}

impl SliceRecord {
    /// Create a slice record from its three coordinate strings
    pub fn new(
        gw_point1: impl Into<String>,
        gw_point2: impl Into<String>,
        gw_point3: impl Into<String>,
    ) -> Self {
        Self {
            gw_point1: gw_point1.into(),
            gw_point2: gw_point2.into(),
            gw_point3: gw_point3.into(),
        }
    }

    /// The points in file order, paired with their key names
    pub fn points(&self) -> [(&'static str, &str); 3] {
        [
            ("gw_point1", &self.gw_point1),
            ("gw_point2", &self.gw_point2),
            ("gw_point3", &self.gw_point3),
        ]
    }
}

/// Flat, typed view of one E-file.
///
/// Fields keep the order in which their key first appeared. A repeated key
/// overwrites the earlier value in place. Slice blocks are stored under the
/// full trimmed text of their `slice = N` line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EFileRecord {
    entries: IndexMap<String, FieldValue>,
}

impl EFileRecord {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Store a field, returning the value it replaced
    pub(crate) fn insert(&mut self, key: String, value: FieldValue) -> Option<FieldValue> {
        self.entries.insert(key, value)
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.entries.shift_remove(key)
    }

    /// Look up a field by its canonical key
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.get(key)
    }

    /// Whether the record has a field with this key
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of stored fields (each slice block counts once)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate fields in file order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterate field keys in file order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate slice blocks together with the `slice = N` line they are keyed by
    pub fn slices(&self) -> impl Iterator<Item = (&str, &SliceRecord)> {
        self.iter()
            .filter_map(|(key, value)| value.as_slice().map(|slice| (key, slice)))
    }

    /// Re-serialize the non-derived fields as `key = value` lines.
    ///
    /// Values come back in their normalized form: unit-labeled fields are
    /// written scaled and without their label, and keys keep underscores.
    /// Slice blocks expand back into their `slice` line plus three `gw_point`
    /// lines. The derived `scan_timestamp` is omitted.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            match value {
                FieldValue::Timestamp(_) if key == SCAN_TIMESTAMP => {}
                FieldValue::Slice(slice) => {
                    lines.push(key.clone());
                    for (point_key, point) in slice.points() {
                        lines.push(format!("{} = {}", point_key, point));
                    }
                }
                _ => lines.push(format!("{} = {}", key, value)),
            }
        }
        lines
    }
}

impl Serialize for EFileRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
