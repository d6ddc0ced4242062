//! Saved-gradient history: a newest-first list of at most ten snapshots,
//! de-duplicated on design equality and persisted as one JSON array.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::GradientError;
use crate::gradient::GradientSpec;
use crate::storage::Storage;

/// Storage key for the history list.
pub const HISTORY_KEY: &str = "savedGradients";

/// Maximum number of saved gradients.
pub const HISTORY_CAPACITY: usize = 10;

/// An immutable snapshot of a gradient plus its creation time.
///
/// Serializes as the gradient's record fields with an extra `createdAt`
/// (unix milliseconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGradient {
    #[serde(flatten)]
    pub spec: GradientSpec,
    #[serde(default, deserialize_with = "millis_or_zero")]
    pub created_at: u64,
}

/// Result of [`History::save`].
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// The snapshot was inserted at the front; `evicted` is the entry
    /// dropped from the tail when the list was full.
    Saved { evicted: Option<SavedGradient> },
    /// An entry with the same design already exists; nothing changed.
    Duplicate,
}

/// Newest-first list of saved gradients.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<SavedGradient>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a persisted history list.
    ///
    /// Unparseable input yields an empty history. Individual records that
    /// fail to decode or hold fewer than two stops are skipped. Stops are
    /// re-sorted and the list is cut to [`HISTORY_CAPACITY`].
    pub fn from_json(json: &str) -> Self {
        let records: Vec<serde_json::Value> = match serde_json::from_str(json) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "saved history is malformed, starting empty");
                return Self::new();
            }
        };

        let mut entries: Vec<SavedGradient> = records
            .into_iter()
            .enumerate()
            .filter_map(|(i, record)| {
                let decoded = serde_json::from_value::<SavedGradient>(record)
                    .map_err(GradientError::from)
                    .and_then(|saved| saved.spec.check().map(|()| saved));
                match decoded {
                    Ok(mut saved) => {
                        saved.spec.normalize();
                        Some(saved)
                    }
                    Err(e) => {
                        tracing::warn!(index = i, error = %e, "skipping saved gradient");
                        None
                    }
                }
            })
            .collect();
        entries.truncate(HISTORY_CAPACITY);
        Self { entries }
    }

    /// Serializes the full list.
    pub fn to_json(&self) -> Result<String, GradientError> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[SavedGradient] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at `index` (0 = newest).
    pub fn get(&self, index: usize) -> Result<&SavedGradient, GradientError> {
        self.entries.get(index).ok_or(GradientError::HistoryIndex {
            index,
            len: self.entries.len(),
        })
    }

    /// True if any entry has the same design as `spec`.
    pub fn contains_design(&self, spec: &GradientSpec) -> bool {
        self.entries.iter().any(|e| e.spec.same_design(spec))
    }

    /// Snapshots `spec` at the front of the list.
    ///
    /// Duplicates are refused. When the list grows past
    /// [`HISTORY_CAPACITY`] the oldest entry is evicted.
    pub fn save(&mut self, spec: &GradientSpec, created_at: u64) -> SaveOutcome {
        if self.contains_design(spec) {
            return SaveOutcome::Duplicate;
        }
        self.entries.insert(
            0,
            SavedGradient {
                spec: spec.clone(),
                created_at,
            },
        );
        let evicted = if self.entries.len() > HISTORY_CAPACITY {
            self.entries.pop()
        } else {
            None
        };
        if let Some(old) = &evicted {
            tracing::debug!(created_at = old.created_at, "evicted oldest saved gradient");
        }
        SaveOutcome::Saved { evicted }
    }

    /// Removes and returns the entry at `index`.
    pub fn delete(&mut self, index: usize) -> Result<SavedGradient, GradientError> {
        if index >= self.entries.len() {
            return Err(GradientError::HistoryIndex {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }
}

/// Reads the history from `storage`.
///
/// Missing data, read failures and malformed data all yield an empty history.
pub fn load_history<S: Storage + ?Sized>(storage: &S) -> History {
    match storage.get(HISTORY_KEY) {
        Ok(Some(json)) => History::from_json(&json),
        Ok(None) => History::new(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read saved history, starting empty");
            History::new()
        }
    }
}

/// Writes the whole history to `storage`.
pub fn save_history<S: Storage + ?Sized>(
    history: &History,
    storage: &mut S,
) -> Result<(), GradientError> {
    storage.set(HISTORY_KEY, &history.to_json()?)
}

/// Milliseconds since the unix epoch, 0 if the clock is before it.
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Older records stored an ISO date string; anything that is not an
/// integer count of milliseconds reads as 0.
fn millis_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HexColor;
    use crate::gradient::{GradientKind, RadialShape};
    use crate::storage::{FileStorage, MemoryStorage};

    fn spec_with_angle(angle: i32) -> GradientSpec {
        GradientSpec::default().with_angle(angle)
    }

    #[test]
    fn save_inserts_newest_first() {
        let mut history = History::new();
        history.save(&spec_with_angle(1), 100);
        history.save(&spec_with_angle(2), 200);
        assert_eq!(history.len(), 2);
        assert_eq!(history.get(0).unwrap().spec.angle(), 2);
        assert_eq!(history.get(1).unwrap().created_at, 100);
    }

    #[test]
    fn identical_save_is_duplicate() {
        let mut history = History::new();
        let spec = GradientSpec::default();
        assert!(matches!(
            history.save(&spec, 1),
            SaveOutcome::Saved { evicted: None }
        ));
        assert_eq!(history.save(&spec, 2), SaveOutcome::Duplicate);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn duplicate_detection_ignores_stop_ids() {
        let mut history = History::new();
        let mut spec = GradientSpec::default();
        history.save(&spec, 1);
        let id = spec.add_stop(HexColor::parse("#fff").unwrap());
        spec.remove_stop(id).unwrap();
        assert_eq!(history.save(&spec, 2), SaveOutcome::Duplicate);
    }

    #[test]
    fn style_differences_are_not_duplicates() {
        let mut history = History::new();
        let base = GradientSpec::default();
        history.save(&base, 1);
        let radial = base.clone().with_kind(GradientKind::Radial);
        assert!(matches!(history.save(&radial, 2), SaveOutcome::Saved { .. }));
        let ellipse = radial.with_radial_shape(RadialShape::Ellipse);
        assert!(matches!(history.save(&ellipse, 3), SaveOutcome::Saved { .. }));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn eleventh_save_evicts_oldest() {
        let mut history = History::new();
        for angle in 0..10 {
            history.save(&spec_with_angle(angle), angle as u64);
        }
        let outcome = history.save(&spec_with_angle(10), 10);
        match outcome {
            SaveOutcome::Saved {
                evicted: Some(old),
            } => assert_eq!(old.spec.angle(), 0),
            other => panic!("expected eviction, got {other:?}"),
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.get(0).unwrap().spec.angle(), 10);
        assert_eq!(history.get(9).unwrap().spec.angle(), 1);
    }

    #[test]
    fn delete_removes_entry() {
        let mut history = History::new();
        history.save(&spec_with_angle(1), 1);
        history.save(&spec_with_angle(2), 2);
        let removed = history.delete(0).unwrap();
        assert_eq!(removed.spec.angle(), 2);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn delete_out_of_range_is_error() {
        let mut history = History::new();
        assert!(matches!(
            history.delete(0),
            Err(GradientError::HistoryIndex { index: 0, len: 0 })
        ));
    }

    #[test]
    fn json_round_trip_preserves_design() {
        let mut history = History::new();
        let mut spec = GradientSpec::default()
            .with_kind(GradientKind::Radial)
            .with_repeating(true);
        spec.add_stop(HexColor::parse("#123").unwrap());
        spec.set_stop_opacity(3, 0.4).unwrap();
        history.save(&spec, 1_700_000_000_000);

        let restored = History::from_json(&history.to_json().unwrap());
        let entry = restored.get(0).unwrap();
        assert!(entry.spec.same_design(&spec));
        assert_eq!(entry.created_at, 1_700_000_000_000);
    }

    #[test]
    fn record_shape_is_flat() {
        let mut history = History::new();
        history.save(&GradientSpec::default(), 5);
        let v: serde_json::Value = serde_json::from_str(&history.to_json().unwrap()).unwrap();
        let record = &v[0];
        assert_eq!(record["type"], "linear");
        assert_eq!(record["createdAt"], 5);
        assert!(record["colorStops"].is_array());
    }

    #[test]
    fn malformed_json_is_empty() {
        assert!(History::from_json("not json").is_empty());
        assert!(History::from_json("{\"a\": 1}").is_empty());
        assert!(History::from_json("").is_empty());
    }

    #[test]
    fn bad_records_are_skipped() {
        let json = r##"[
            {"type": "linear", "angle": 90, "colorStops": [
                {"id": 1, "color": "#000", "position": 0, "opacity": 1}
            ]},
            {"type": "linear", "angle": 45, "colorStops": [
                {"id": 1, "color": "nope", "position": 0, "opacity": 1},
                {"id": 2, "color": "#fff", "position": 100, "opacity": 1}
            ]},
            {"type": "linear", "angle": 30, "createdAt": "2024-05-01T10:00:00.000Z", "colorStops": [
                {"id": 2, "color": "#fff", "position": 100, "opacity": 1},
                {"id": 1, "color": "#000", "position": 0, "opacity": 1}
            ]}
        ]"##;
        let history = History::from_json(json);
        assert_eq!(history.len(), 1);
        let entry = history.get(0).unwrap();
        assert_eq!(entry.spec.angle(), 30);
        assert_eq!(entry.created_at, 0);
        assert_eq!(entry.spec.stops()[0].position(), 0, "stops re-sorted on load");
    }

    #[test]
    fn loaded_stop_ids_are_made_unique() {
        let json = r##"[
            {"type": "linear", "angle": 90, "colorStops": [
                {"id": 1, "color": "#000", "position": 0},
                {"id": 1, "color": "#888", "position": 50},
                {"id": 1, "color": "#fff", "position": 100}
            ]}
        ]"##;
        let history = History::from_json(json);
        let mut ids: Vec<u32> = history.get(0).unwrap().spec.stops().iter().map(|s| s.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn oversized_list_is_truncated() {
        let records: Vec<SavedGradient> = (0..15)
            .map(|a| SavedGradient {
                spec: spec_with_angle(a),
                created_at: a as u64,
            })
            .collect();
        let history = History::from_json(&serde_json::to_string(&records).unwrap());
        assert_eq!(history.len(), HISTORY_CAPACITY);
    }

    #[test]
    fn load_and_save_through_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert!(load_history(&storage).is_empty());

        let mut history = History::new();
        history.save(&spec_with_angle(33), 1);
        save_history(&history, &mut storage).unwrap();

        assert_eq!(load_history(&storage), history);
    }

    #[test]
    fn load_from_file_storage_with_garbage_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        storage.set(HISTORY_KEY, "{{{{").unwrap();
        assert!(load_history(&storage).is_empty());
    }

    #[test]
    fn unix_millis_is_after_2020() {
        assert!(unix_millis() > 1_577_836_800_000);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn never_exceeds_capacity(angles in prop::collection::vec(0_i32..30, 0..40)) {
                let mut history = History::new();
                for (t, angle) in angles.iter().enumerate() {
                    history.save(&spec_with_angle(*angle), t as u64);
                    prop_assert!(history.len() <= HISTORY_CAPACITY);
                }
                let designs = history.entries();
                for (i, a) in designs.iter().enumerate() {
                    for b in &designs[i + 1..] {
                        prop_assert!(!a.spec.same_design(&b.spec), "duplicate designs stored");
                    }
                }
            }
        }
    }
}
