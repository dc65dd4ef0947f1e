use std::time::{Duration, Instant};

/// How long a primary click is held back while waiting for a possible
/// secondary gesture on platforms where the two overlap.
pub const CLICK_DEBOUNCE: Duration = Duration::from_millis(220);

/// Outcome of a primary click on the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickDecision {
    /// Act on the click immediately.
    Fire,
    /// The click is parked; [`ClickArbiter::poll`] releases it unless a
    /// secondary gesture cancels it first.
    Deferred,
}

/// Resolves the primary-click vs secondary-gesture ambiguity.
///
/// On platforms where a secondary gesture arrives as a delayed pair of
/// events (two-finger taps, ctrl-clicks), acting on the primary click
/// immediately would toggle the overlay right before the secondary gesture
/// toggles it differently. Deferral parks the single click for a short
/// window that the secondary gesture can cancel.
#[derive(Debug, Clone)]
pub struct ClickArbiter {
    defer: bool,
    pending: Option<Instant>,
}

impl ClickArbiter {
    pub fn new(defer: bool) -> Self {
        Self {
            defer,
            pending: None,
        }
    }

    /// A primary click arrived. With deferral off this always fires; with
    /// deferral on it (re)arms the release deadline.
    pub fn primary(&mut self, now: Instant) -> ClickDecision {
        if !self.defer {
            return ClickDecision::Fire;
        }
        self.pending = Some(now + CLICK_DEBOUNCE);
        ClickDecision::Deferred
    }

    /// A secondary gesture arrived; any parked single click is dropped.
    pub fn secondary(&mut self) {
        self.pending = None;
    }

    /// Drop any parked click without firing it (e.g. when a navigation
    /// supersedes the gesture).
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Release a parked click whose window has elapsed. Returns `true` at
    /// most once per parked click.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(deadline) if now >= deadline => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_mode_always_fires() {
        let mut arbiter = ClickArbiter::new(false);
        let now = Instant::now();
        assert_eq!(arbiter.primary(now), ClickDecision::Fire);
        assert!(!arbiter.has_pending());
    }

    #[test]
    fn deferred_click_released_after_window() {
        let mut arbiter = ClickArbiter::new(true);
        let t0 = Instant::now();
        assert_eq!(arbiter.primary(t0), ClickDecision::Deferred);
        assert!(!arbiter.poll(t0 + Duration::from_millis(100)));
        assert!(arbiter.poll(t0 + CLICK_DEBOUNCE));
        // Released exactly once.
        assert!(!arbiter.poll(t0 + CLICK_DEBOUNCE + Duration::from_secs(1)));
    }

    #[test]
    fn secondary_gesture_cancels_parked_click() {
        let mut arbiter = ClickArbiter::new(true);
        let t0 = Instant::now();
        arbiter.primary(t0);
        arbiter.secondary();
        assert!(!arbiter.poll(t0 + CLICK_DEBOUNCE + Duration::from_millis(1)));
    }

    #[test]
    fn repeated_primary_rearms_deadline() {
        let mut arbiter = ClickArbiter::new(true);
        let t0 = Instant::now();
        arbiter.primary(t0);
        let t1 = t0 + Duration::from_millis(150);
        arbiter.primary(t1);
        // The first deadline passing releases nothing.
        assert!(!arbiter.poll(t0 + CLICK_DEBOUNCE));
        assert!(arbiter.poll(t1 + CLICK_DEBOUNCE));
    }

    #[test]
    fn cancel_drops_parked_click() {
        let mut arbiter = ClickArbiter::new(true);
        let t0 = Instant::now();
        arbiter.primary(t0);
        arbiter.cancel();
        assert!(!arbiter.poll(t0 + CLICK_DEBOUNCE + Duration::from_millis(1)));
    }
}
