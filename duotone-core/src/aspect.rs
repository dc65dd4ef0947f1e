/// Fallback display ratio used until a photo reports real dimensions.
pub const DEFAULT_ASPECT: f64 = 4.0 / 3.0;

/// Records the display aspect ratio of each photo as its variants load.
///
/// The first valid (finite, positive) width/height pair reported for an
/// index sets its ratio; later valid reports overwrite it, so the last
/// successful load wins. Invalid dimensions are ignored outright.
#[derive(Debug, Clone)]
pub struct AspectTracker {
    ratios: Vec<Option<f64>>,
}

impl AspectTracker {
    pub fn new(count: usize) -> Self {
        Self {
            ratios: vec![None; count],
        }
    }

    /// Record the natural dimensions of a loaded variant.
    ///
    /// Returns `true` when the ratio was accepted and stored.
    pub fn record(&mut self, index: usize, width: f64, height: f64) -> bool {
        let Some(slot) = self.ratios.get_mut(index) else {
            return false;
        };
        if width <= 0.0 || height <= 0.0 {
            return false;
        }
        let ratio = width / height;
        if !ratio.is_finite() || ratio <= 0.0 {
            return false;
        }
        *slot = Some(ratio);
        true
    }

    pub fn ratio(&self, index: usize) -> Option<f64> {
        self.ratios.get(index).copied().flatten()
    }

    /// The ratio to lay a pane out with, falling back to 4:3.
    pub fn ratio_or_default(&self, index: usize) -> f64 {
        self.ratio(index).unwrap_or(DEFAULT_ASPECT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ratio_falls_back() {
        let t = AspectTracker::new(2);
        assert_eq!(t.ratio(0), None);
        assert!((t.ratio_or_default(0) - DEFAULT_ASPECT).abs() < 1e-12);
    }

    #[test]
    fn invalid_dimensions_ignored() {
        let mut t = AspectTracker::new(1);
        assert!(!t.record(0, 0.0, 600.0));
        assert!(!t.record(0, 800.0, 0.0));
        assert!(!t.record(0, -800.0, 600.0));
        assert!(!t.record(0, f64::INFINITY, 600.0));
        assert_eq!(t.ratio(0), None);
    }

    #[test]
    fn last_valid_report_wins() {
        let mut t = AspectTracker::new(1);
        assert!(t.record(0, 400.0, 300.0));
        assert!(t.record(0, 1600.0, 900.0));
        let r = t.ratio(0).unwrap();
        assert!((r - 16.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_index_rejected() {
        let mut t = AspectTracker::new(1);
        assert!(!t.record(5, 800.0, 600.0));
    }
}
