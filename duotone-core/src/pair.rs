use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Display mode
// ---------------------------------------------------------------------------

/// Which image variant a pane is currently showing.
///
/// Exactly one mode is active per visible pane (grid tile or the zoom
/// overlay) at any time. `Bw` is the resting state of every tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Bw,
    High,
    Color,
}

impl DisplayMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Bw => "B/W",
            Self::High => "High",
            Self::Color => "Color",
        }
    }

    pub fn is_bw(self) -> bool {
        self == Self::Bw
    }

    /// The other non-bw mode. `Bw` maps to itself.
    pub fn other_non_bw(self) -> Self {
        match self {
            Self::High => Self::Color,
            Self::Color => Self::High,
            Self::Bw => Self::Bw,
        }
    }
}

// ---------------------------------------------------------------------------
// Navigation direction
// ---------------------------------------------------------------------------

/// Travel direction for slide navigation between photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Back,
    Forward,
}

impl Direction {
    /// Signed index step: `Back` is -1, `Forward` is +1.
    pub fn delta(self) -> isize {
        match self {
            Self::Back => -1,
            Self::Forward => 1,
        }
    }

    /// Horizontal sign of the incoming pane's off-screen start position.
    pub fn sign(self) -> f32 {
        self.delta() as f32
    }
}

// ---------------------------------------------------------------------------
// Photo pairs
// ---------------------------------------------------------------------------

/// One b/w + color filename pair. Index `i` in the set identifies it for
/// the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoPair {
    pub bw_name: String,
    pub color_name: String,
}

/// The fixed, ordered sequence of photo pairs supplied at startup.
///
/// Immutable after construction; every other component refers to photos by
/// index into this set.
#[derive(Debug, Clone, Default)]
pub struct PairSet {
    pairs: Vec<PhotoPair>,
}

impl PairSet {
    /// Zip two equal-length name lists into a pair set.
    pub fn new(bw_names: Vec<String>, color_names: Vec<String>) -> crate::Result<Self> {
        if bw_names.len() != color_names.len() {
            return Err(CoreError::MismatchedPairLists {
                bw: bw_names.len(),
                color: color_names.len(),
            });
        }
        let pairs = bw_names
            .into_iter()
            .zip(color_names)
            .map(|(bw_name, color_name)| PhotoPair { bw_name, color_name })
            .collect();
        Ok(Self { pairs })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PhotoPair> {
        self.pairs.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhotoPair> {
        self.pairs.iter()
    }

    /// Destination index for a navigation step, wrapping at both ends.
    pub fn step(&self, index: usize, direction: Direction) -> usize {
        let count = self.pairs.len() as isize;
        debug_assert!(count > 0);
        let next = (index as isize + direction.delta()).rem_euclid(count);
        next as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(n: usize) -> PairSet {
        let bw = (0..n).map(|i| format!("bw{i}.jpg")).collect();
        let color = (0..n).map(|i| format!("c{i}.jpg")).collect();
        PairSet::new(bw, color).unwrap()
    }

    #[test]
    fn mismatched_lists_rejected() {
        let err = PairSet::new(vec!["a.jpg".into()], vec![]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::MismatchedPairLists { bw: 1, color: 0 }
        ));
    }

    #[test]
    fn step_wraps_both_ends() {
        let s = set(3);
        assert_eq!(s.step(2, Direction::Forward), 0);
        assert_eq!(s.step(0, Direction::Back), 2);
        assert_eq!(s.step(1, Direction::Forward), 2);
        assert_eq!(s.step(1, Direction::Back), 0);
    }

    #[test]
    fn step_single_pair_stays_put() {
        let s = set(1);
        assert_eq!(s.step(0, Direction::Forward), 0);
        assert_eq!(s.step(0, Direction::Back), 0);
    }

    #[test]
    fn other_non_bw_swaps() {
        assert_eq!(DisplayMode::High.other_non_bw(), DisplayMode::Color);
        assert_eq!(DisplayMode::Color.other_non_bw(), DisplayMode::High);
        assert_eq!(DisplayMode::Bw.other_non_bw(), DisplayMode::Bw);
    }
}
