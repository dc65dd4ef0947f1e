use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::pair::{DisplayMode, PairSet};

// ---------------------------------------------------------------------------
// Rating
// ---------------------------------------------------------------------------

/// A thumbs up/down verdict on one photo. Absence of an entry means unrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Up,
    Down,
}

impl Rating {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            _ => None,
        }
    }
}

/// Per-scope rating counts for the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatingSummary {
    pub up: usize,
    pub down: usize,
}

impl RatingSummary {
    pub fn total(self) -> usize {
        self.up + self.down
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// In-memory rating and mode-preference maps, keyed `"<scope>::<bw_name>"`.
///
/// The maps may carry entries from other scopes (the persisted records are
/// shared across galleries); mutation and summaries only ever touch the
/// store's own scope, and foreign entries survive a save/load round trip.
#[derive(Debug, Clone)]
pub struct RatingStore {
    scope: String,
    ratings: HashMap<String, Rating>,
    /// Non-default mode preferences. Only `Color` is ever stored; absence
    /// of a key means `High`.
    modes: HashMap<String, DisplayMode>,
}

impl RatingStore {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            ratings: HashMap::new(),
            modes: HashMap::new(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    fn key(&self, pairs: &PairSet, index: usize) -> Option<String> {
        let pair = pairs.get(index)?;
        Some(format!("{}::{}", self.scope, pair.bw_name))
    }

    fn mode_key(key: &str) -> String {
        format!("{key}::mode")
    }

    /// Apply a thumbs up/down with toggle-off semantics.
    ///
    /// Setting the value already stored clears the rating. Setting `Down`
    /// snapshots `active_non_bw` as the photo's mode preference; clearing
    /// or overwriting a rating drops that snapshot. Out-of-range indices
    /// are ignored.
    ///
    /// Returns `true` when the store changed.
    pub fn set(
        &mut self,
        pairs: &PairSet,
        index: usize,
        value: Rating,
        active_non_bw: DisplayMode,
    ) -> bool {
        let Some(key) = self.key(pairs, index) else {
            debug!(index, "rating ignored: index out of range");
            return false;
        };
        let mode_key = Self::mode_key(&key);

        if self.ratings.get(&key) == Some(&value) {
            // Toggle off.
            self.ratings.remove(&key);
            self.modes.remove(&mode_key);
            return true;
        }

        self.ratings.insert(key, value);
        match value {
            Rating::Down if active_non_bw == DisplayMode::Color => {
                self.modes.insert(mode_key, DisplayMode::Color);
            }
            _ => {
                self.modes.remove(&mode_key);
            }
        }
        true
    }

    pub fn rating(&self, pairs: &PairSet, index: usize) -> Option<Rating> {
        let key = self.key(pairs, index)?;
        self.ratings.get(&key).copied()
    }

    /// The non-bw mode this photo should reveal to. `High` unless a
    /// `Color` preference was recorded.
    pub fn preferred_mode(&self, pairs: &PairSet, index: usize) -> DisplayMode {
        self.key(pairs, index)
            .and_then(|key| self.modes.get(&Self::mode_key(&key)).copied())
            .unwrap_or(DisplayMode::High)
    }

    /// Remember an explicitly chosen non-bw mode. `High` is the default and
    /// clears the entry; `Bw` is not a preference and is ignored.
    pub fn set_preferred_mode(&mut self, pairs: &PairSet, index: usize, mode: DisplayMode) {
        let Some(key) = self.key(pairs, index) else {
            return;
        };
        let mode_key = Self::mode_key(&key);
        match mode {
            DisplayMode::Color => {
                self.modes.insert(mode_key, DisplayMode::Color);
            }
            DisplayMode::High => {
                self.modes.remove(&mode_key);
            }
            DisplayMode::Bw => {}
        }
    }

    /// Count up/down ratings belonging to this store's scope.
    pub fn summary(&self) -> RatingSummary {
        let prefix = format!("{}::", self.scope);
        let mut summary = RatingSummary::default();
        for (key, rating) in &self.ratings {
            if !key.starts_with(&prefix) {
                continue;
            }
            match rating {
                Rating::Up => summary.up += 1,
                Rating::Down => summary.down += 1,
            }
        }
        summary
    }

    // -- Serialized form ----------------------------------------------------

    /// Flatten to the two persisted records: ratings and mode preferences.
    pub fn to_records(&self) -> (BTreeMap<String, String>, BTreeMap<String, String>) {
        let ratings = self
            .ratings
            .iter()
            .map(|(k, v)| (k.clone(), v.as_str().to_string()))
            .collect();
        let modes = self
            .modes
            .keys()
            .map(|k| (k.clone(), "color".to_string()))
            .collect();
        (ratings, modes)
    }

    /// Rebuild a store from persisted records, skipping entries that do not
    /// parse. Unknown scopes are kept so they round-trip through a save.
    pub fn from_records(
        scope: impl Into<String>,
        ratings: &BTreeMap<String, String>,
        modes: &BTreeMap<String, String>,
    ) -> Self {
        let mut store = Self::new(scope);
        for (key, value) in ratings {
            match Rating::from_str(value) {
                Some(rating) => {
                    store.ratings.insert(key.clone(), rating);
                }
                None => debug!(%key, %value, "skipping unrecognized rating entry"),
            }
        }
        for (key, value) in modes {
            if value == "color" {
                store.modes.insert(key.clone(), DisplayMode::Color);
            } else {
                debug!(%key, %value, "skipping unrecognized mode entry");
            }
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs() -> PairSet {
        PairSet::new(
            vec!["a.jpg".into(), "b.jpg".into()],
            vec!["a2.jpg".into(), "b2.jpg".into()],
        )
        .unwrap()
    }

    #[test]
    fn set_twice_toggles_off() {
        let pairs = pairs();
        let mut store = RatingStore::new("gallery");
        assert!(store.set(&pairs, 0, Rating::Up, DisplayMode::High));
        assert_eq!(store.rating(&pairs, 0), Some(Rating::Up));
        assert!(store.set(&pairs, 0, Rating::Up, DisplayMode::High));
        assert_eq!(store.rating(&pairs, 0), None);
    }

    #[test]
    fn down_snapshots_color_mode() {
        let pairs = pairs();
        let mut store = RatingStore::new("gallery");
        store.set(&pairs, 0, Rating::Down, DisplayMode::Color);
        assert_eq!(store.preferred_mode(&pairs, 0), DisplayMode::Color);

        // Overwriting with Up drops the snapshot.
        store.set(&pairs, 0, Rating::Up, DisplayMode::Color);
        assert_eq!(store.rating(&pairs, 0), Some(Rating::Up));
        assert_eq!(store.preferred_mode(&pairs, 0), DisplayMode::High);
    }

    #[test]
    fn down_with_high_mode_stores_nothing() {
        let pairs = pairs();
        let mut store = RatingStore::new("gallery");
        store.set(&pairs, 1, Rating::Down, DisplayMode::High);
        assert_eq!(store.preferred_mode(&pairs, 1), DisplayMode::High);
        let (_, modes) = store.to_records();
        assert!(modes.is_empty());
    }

    #[test]
    fn out_of_range_index_is_noop() {
        let pairs = pairs();
        let mut store = RatingStore::new("gallery");
        assert!(!store.set(&pairs, 5, Rating::Up, DisplayMode::High));
        assert_eq!(store.summary().total(), 0);
    }

    #[test]
    fn summary_counts_own_scope_only() {
        let pairs = pairs();
        let mut store = RatingStore::new("gallery");
        store.set(&pairs, 0, Rating::Up, DisplayMode::High);
        store.set(&pairs, 1, Rating::Down, DisplayMode::High);
        store
            .ratings
            .insert("other::x.jpg".to_string(), Rating::Up);

        let summary = store.summary();
        assert_eq!(summary.up, 1);
        assert_eq!(summary.down, 1);
        assert_eq!(summary.total(), 2);
    }

    #[test]
    fn records_round_trip_preserves_foreign_scopes() {
        let pairs = pairs();
        let mut store = RatingStore::new("gallery");
        store.set(&pairs, 0, Rating::Down, DisplayMode::Color);
        store
            .ratings
            .insert("other::x.jpg".to_string(), Rating::Down);

        let (ratings, modes) = store.to_records();
        let reloaded = RatingStore::from_records("gallery", &ratings, &modes);
        assert_eq!(reloaded.rating(&pairs, 0), Some(Rating::Down));
        assert_eq!(reloaded.preferred_mode(&pairs, 0), DisplayMode::Color);
        assert_eq!(
            reloaded.ratings.get("other::x.jpg"),
            Some(&Rating::Down)
        );
    }

    #[test]
    fn malformed_record_values_skipped() {
        let mut ratings = BTreeMap::new();
        ratings.insert("gallery::a.jpg".to_string(), "sideways".to_string());
        let modes = BTreeMap::new();
        let store = RatingStore::from_records("gallery", &ratings, &modes);
        assert_eq!(store.summary().total(), 0);
    }

    #[test]
    fn preference_cleared_by_high() {
        let pairs = pairs();
        let mut store = RatingStore::new("gallery");
        store.set_preferred_mode(&pairs, 0, DisplayMode::Color);
        assert_eq!(store.preferred_mode(&pairs, 0), DisplayMode::Color);
        store.set_preferred_mode(&pairs, 0, DisplayMode::High);
        assert_eq!(store.preferred_mode(&pairs, 0), DisplayMode::High);
    }
}
