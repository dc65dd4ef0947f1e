use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::aspect::{AspectTracker, DEFAULT_ASPECT};
use crate::pair::{Direction, DisplayMode, PairSet};
use crate::rating::RatingStore;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Duration of the grid-to-center open tween.
pub const OPEN_ANIMATION: Duration = Duration::from_millis(920);
/// Duration of the center-to-grid close tween.
pub const CLOSE_ANIMATION: Duration = Duration::from_millis(920);
/// Duration of the pane slide when navigating between photos.
pub const SLIDE_ANIMATION: Duration = Duration::from_millis(560);
/// Duration of a mode cross-fade.
pub const FADE_ANIMATION: Duration = Duration::from_millis(420);
/// Grace period past a tween's duration before the fallback deadline fires.
pub const FINALIZE_MARGIN: Duration = Duration::from_millis(40);
/// The centered overlay occupies at most this fraction of each viewport axis.
pub const MAX_VIEWPORT_FRACTION: f32 = 0.86;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A screen-space rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            ..*self
        }
    }

    fn lerp(a: Rect, b: Rect, t: f32) -> Self {
        let mix = |x: f32, y: f32| x + (y - x) * t;
        Self {
            left: mix(a.left, b.left),
            top: mix(a.top, b.top),
            width: mix(a.width, b.width),
            height: mix(a.height, b.height),
        }
    }
}

/// The centered overlay rectangle for a photo of the given aspect ratio.
///
/// Caps each axis at 86% of the viewport, preserves the ratio (4:3 when the
/// ratio is unusable), and centers per axis. Computed fresh on every
/// open/navigate from live viewport dimensions.
pub fn centered_rect(viewport_w: f32, viewport_h: f32, aspect_ratio: f64) -> Rect {
    let ratio = if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        aspect_ratio as f32
    } else {
        DEFAULT_ASPECT as f32
    };
    let max_w = (viewport_w * MAX_VIEWPORT_FRACTION).floor();
    let max_h = (viewport_h * MAX_VIEWPORT_FRACTION).floor();

    let mut width = max_w;
    let mut height = (width / ratio).round();
    if height > max_h {
        height = max_h;
        width = (height * ratio).round();
    }

    Rect {
        left: ((viewport_w - width) / 2.0).round().max(0.0),
        top: ((viewport_h - height) / 2.0).round().max(0.0),
        width,
        height,
    }
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

// ---------------------------------------------------------------------------
// Tweens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveKind {
    Open,
    Close,
    Slide,
}

/// A positional tween with a fallback deadline.
///
/// Finalization takes the tween out of its slot, which is the one-shot
/// guard: whichever of the completion report or the deadline arrives first
/// wins, and the loser finds the slot empty.
#[derive(Debug, Clone, Copy)]
struct MoveTween {
    kind: MoveKind,
    from: Rect,
    to: Rect,
    started: Instant,
    duration: Duration,
    deadline: Instant,
}

impl MoveTween {
    fn new(kind: MoveKind, from: Rect, to: Rect, duration: Duration, now: Instant) -> Self {
        Self {
            kind,
            from,
            to,
            started: now,
            duration,
            deadline: now + duration + FINALIZE_MARGIN,
        }
    }

    fn raw_progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started).as_secs_f32();
        (elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    fn rect_at(&self, now: Instant) -> Rect {
        Rect::lerp(self.from, self.to, ease_in_out(self.raw_progress(now)))
    }
}

/// An opacity cross-fade between two image variants in the same frame.
#[derive(Debug, Clone, Copy)]
struct FadeTween {
    to: DisplayMode,
    started: Instant,
    duration: Duration,
    deadline: Instant,
}

impl FadeTween {
    fn new(to: DisplayMode, now: Instant) -> Self {
        Self {
            to,
            started: now,
            duration: FADE_ANIMATION,
            deadline: now + FADE_ANIMATION + FINALIZE_MARGIN,
        }
    }

    fn raw_progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started).as_secs_f32();
        (elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// The pane being pushed off-screen during a slide.
#[derive(Debug, Clone, Copy)]
struct OutgoingPane {
    index: usize,
    mode: DisplayMode,
    from: Rect,
    to: Rect,
}

// ---------------------------------------------------------------------------
// Public surface
// ---------------------------------------------------------------------------

/// Lifecycle phase of the lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomStatus {
    #[default]
    Idle,
    Opening,
    Expanded,
    Closing,
}

/// Finalized transitions, reported so the grid can stay in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomEvent {
    /// The open tween settled; the source tile should drop back to b/w.
    Opened { index: usize },
    /// The overlay is gone; the source tile inherits the overlay's last mode.
    Closed { index: usize, mode: DisplayMode },
    /// A navigation slide settled on a new photo.
    Slid { from: usize, to: usize },
    /// A mode cross-fade settled.
    ModeSettled { mode: DisplayMode },
}

/// One pane of the overlay to draw, produced fresh every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPane {
    pub index: usize,
    /// Settled base mode of the pane.
    pub mode: DisplayMode,
    /// In-flight cross-fade layered over the base: target mode and opacity.
    pub fade: Option<(DisplayMode, f32)>,
    pub rect: Rect,
}

/// Read-only context the controller needs when computing transitions.
#[derive(Clone, Copy)]
pub struct ZoomCtx<'a> {
    pub pairs: &'a PairSet,
    pub aspects: &'a AspectTracker,
    pub store: &'a RatingStore,
    /// Live viewport dimensions in logical pixels.
    pub viewport: (f32, f32),
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// The lightbox state machine.
///
/// Single-threaded and event-driven: user input, per-frame ticks, and
/// completion reports all arrive on the UI thread. At most one move tween
/// and one fade are in flight at a time; navigation requested while either
/// is running queues, and exactly one queued direction replays per
/// finalization.
#[derive(Debug, Default)]
pub struct ZoomController {
    status: ZoomStatus,
    index: usize,
    /// Settled display mode of the overlay of record.
    mode: DisplayMode,
    /// The non-bw mode a reveal toggle switches to.
    active_non_bw: DisplayMode,
    /// Grid rect the overlay animates back to on close.
    source_rect: Rect,
    /// Settled centered rect of the overlay.
    current_rect: Rect,
    move_tween: Option<MoveTween>,
    fade: Option<FadeTween>,
    outgoing: Option<OutgoingPane>,
    /// Non-bw mode to restore once an in-flight slide settles.
    restore_mode: Option<DisplayMode>,
    pending_nav: VecDeque<Direction>,
}

impl ZoomController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ZoomStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status != ZoomStatus::Idle
    }

    /// Index of the open photo, if any.
    pub fn index(&self) -> Option<usize> {
        match self.status {
            ZoomStatus::Idle => None,
            _ => Some(self.index),
        }
    }

    /// Settled mode of the overlay of record.
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// The mode the overlay is heading towards (fade target, else settled).
    pub fn visible_mode(&self) -> DisplayMode {
        self.fade.map(|f| f.to).unwrap_or(self.mode)
    }

    pub fn active_non_bw(&self) -> DisplayMode {
        self.active_non_bw
    }

    pub fn queued_navigations(&self) -> usize {
        self.pending_nav.len()
    }

    /// Raw progress of the in-flight move tween, if any.
    pub fn move_progress(&self, now: Instant) -> Option<f32> {
        self.move_tween.map(|t| t.raw_progress(now))
    }

    /// Raw progress of the in-flight cross-fade, if any.
    pub fn fade_progress(&self, now: Instant) -> Option<f32> {
        self.fade.map(|f| f.raw_progress(now))
    }

    // -- Operations ---------------------------------------------------------

    /// Open `index` from a grid tile occupying `source_rect`.
    ///
    /// A no-op unless idle; also refuses an out-of-range index or a source
    /// rect without area (the tile has not been laid out yet).
    pub fn open(&mut self, ctx: ZoomCtx<'_>, index: usize, source_rect: Rect, now: Instant) -> bool {
        if self.status != ZoomStatus::Idle {
            return false;
        }
        if index >= ctx.pairs.len() || !source_rect.has_area() {
            return false;
        }

        let target = centered_rect(
            ctx.viewport.0,
            ctx.viewport.1,
            ctx.aspects.ratio_or_default(index),
        );
        self.status = ZoomStatus::Opening;
        self.index = index;
        self.mode = DisplayMode::Bw;
        self.active_non_bw = ctx.store.preferred_mode(ctx.pairs, index);
        self.source_rect = source_rect;
        self.current_rect = target;
        self.move_tween = Some(MoveTween::new(
            MoveKind::Open,
            source_rect,
            target,
            OPEN_ANIMATION,
            now,
        ));
        debug!(index, "zoom opening");
        true
    }

    /// Animate the overlay back into its source tile.
    ///
    /// Cancels the open deadline, any in-flight fade (settled to its target
    /// so the tile inherits the right mode), a mid-slide outgoing pane, and
    /// every queued navigation.
    pub fn close(&mut self, now: Instant) -> bool {
        if !matches!(self.status, ZoomStatus::Opening | ZoomStatus::Expanded) {
            return false;
        }
        let from = self
            .move_tween
            .map(|t| t.rect_at(now))
            .unwrap_or(self.current_rect);
        if let Some(fade) = self.fade.take() {
            self.mode = fade.to;
        }
        self.outgoing = None;
        self.restore_mode = None;
        self.pending_nav.clear();
        self.status = ZoomStatus::Closing;
        self.move_tween = Some(MoveTween::new(
            MoveKind::Close,
            from,
            self.source_rect,
            CLOSE_ANIMATION,
            now,
        ));
        debug!(index = self.index, "zoom closing");
        true
    }

    /// Slide to the adjacent photo, wrapping at both ends.
    ///
    /// Queued when a slide or a fade is already in flight; ignored outside
    /// `Opening`/`Expanded` and for single-photo sets.
    pub fn navigate(&mut self, ctx: ZoomCtx<'_>, direction: Direction, now: Instant) {
        if !matches!(self.status, ZoomStatus::Opening | ZoomStatus::Expanded) {
            return;
        }
        if ctx.pairs.len() <= 1 {
            return;
        }
        if self.move_tween.is_some() || self.fade.is_some() {
            self.pending_nav.push_back(direction);
            return;
        }
        self.start_slide(ctx, direction, now);
    }

    /// Cross-fade the overlay to `mode`.
    ///
    /// Ignored outside `Opening`/`Expanded` and during a slide. Replacing an
    /// in-flight fade settles the old fade to its target first.
    pub fn set_mode(&mut self, mode: DisplayMode, now: Instant) {
        if !matches!(self.status, ZoomStatus::Opening | ZoomStatus::Expanded) {
            return;
        }
        if matches!(self.move_tween, Some(t) if t.kind == MoveKind::Slide) {
            return;
        }
        if let Some(fade) = self.fade.take() {
            self.mode = fade.to;
        }
        if self.mode == mode {
            return;
        }
        if mode != DisplayMode::Bw {
            self.active_non_bw = mode;
        }
        self.fade = Some(FadeTween::new(mode, now));
    }

    /// Toggle between b/w and the remembered non-bw mode.
    pub fn toggle_reveal(&mut self, now: Instant) {
        let target = if self.visible_mode().is_bw() {
            self.active_non_bw
        } else {
            DisplayMode::Bw
        };
        self.set_mode(target, now);
    }

    /// Toggle between the two non-bw modes. Returns the chosen mode so the
    /// caller can record it as the photo's preference; `None` while in b/w.
    pub fn toggle_non_bw(&mut self, now: Instant) -> Option<DisplayMode> {
        let current = self.visible_mode();
        if current.is_bw() || !matches!(self.status, ZoomStatus::Opening | ZoomStatus::Expanded) {
            return None;
        }
        let next = current.other_non_bw();
        self.set_mode(next, now);
        Some(next)
    }

    /// Reset every field to its idle default. Safe from any state and
    /// idempotent.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // -- Completion ---------------------------------------------------------

    /// Deadline sweep. Call once per frame; finalizes any tween whose
    /// fallback deadline has passed without a completion report.
    pub fn tick(&mut self, ctx: ZoomCtx<'_>, now: Instant) -> Vec<ZoomEvent> {
        let mut events = Vec::new();
        if matches!(self.move_tween, Some(t) if now >= t.deadline) {
            self.finalize_move(ctx, now, &mut events);
        }
        if matches!(self.fade, Some(f) if now >= f.deadline) {
            self.finalize_fade(ctx, now, &mut events);
        }
        events
    }

    /// Report that the move tween visibly completed (progress reached 1).
    pub fn finish_move(&mut self, ctx: ZoomCtx<'_>, now: Instant) -> Vec<ZoomEvent> {
        let mut events = Vec::new();
        if self.move_tween.is_some() {
            self.finalize_move(ctx, now, &mut events);
        }
        events
    }

    /// Report that the cross-fade visibly completed.
    pub fn finish_fade(&mut self, ctx: ZoomCtx<'_>, now: Instant) -> Vec<ZoomEvent> {
        let mut events = Vec::new();
        if self.fade.is_some() {
            self.finalize_fade(ctx, now, &mut events);
        }
        events
    }

    // -- Rendering ----------------------------------------------------------

    /// The overlay panes to draw at `now`, back to front.
    pub fn frames(&self, now: Instant) -> Vec<OverlayPane> {
        match self.status {
            ZoomStatus::Idle => Vec::new(),
            ZoomStatus::Closing => {
                let rect = self
                    .move_tween
                    .map(|t| t.rect_at(now))
                    .unwrap_or(self.source_rect);
                vec![OverlayPane {
                    index: self.index,
                    mode: self.mode,
                    fade: None,
                    rect,
                }]
            }
            ZoomStatus::Opening | ZoomStatus::Expanded => {
                let mut panes = Vec::with_capacity(2);
                if let (Some(out), Some(tween)) = (self.outgoing, self.move_tween) {
                    let t = ease_in_out(tween.raw_progress(now));
                    panes.push(OverlayPane {
                        index: out.index,
                        mode: out.mode,
                        fade: None,
                        rect: Rect::lerp(out.from, out.to, t),
                    });
                }
                let rect = self
                    .move_tween
                    .map(|t| t.rect_at(now))
                    .unwrap_or(self.current_rect);
                panes.push(OverlayPane {
                    index: self.index,
                    mode: self.mode,
                    fade: self.fade.map(|f| (f.to, f.raw_progress(now))),
                    rect,
                });
                panes
            }
        }
    }

    /// Backdrop opacity at `now`: fades in with the open tween, out with
    /// the close tween.
    pub fn backdrop_alpha(&self, now: Instant) -> f32 {
        match self.status {
            ZoomStatus::Idle => 0.0,
            ZoomStatus::Expanded => 1.0,
            ZoomStatus::Opening => match self.move_tween {
                Some(t) if t.kind == MoveKind::Open => ease_in_out(t.raw_progress(now)),
                _ => 1.0,
            },
            ZoomStatus::Closing => match self.move_tween {
                Some(t) => 1.0 - ease_in_out(t.raw_progress(now)),
                None => 0.0,
            },
        }
    }

    // -- Internals ----------------------------------------------------------

    fn start_slide(&mut self, ctx: ZoomCtx<'_>, direction: Direction, now: Instant) {
        let from_index = self.index;
        let to_index = ctx.pairs.step(from_index, direction);
        let viewport_w = ctx.viewport.0;
        let sign = direction.sign();

        // Outgoing pane exits opposite the travel direction.
        self.outgoing = Some(OutgoingPane {
            index: from_index,
            mode: self.mode,
            from: self.current_rect,
            to: self.current_rect.translated(-sign * viewport_w, 0.0),
        });

        let target = centered_rect(
            ctx.viewport.0,
            ctx.viewport.1,
            ctx.aspects.ratio_or_default(to_index),
        );
        let start = target.translated(sign * viewport_w, 0.0);

        // The incoming pane arrives in b/w and restores its non-bw mode
        // once the slide settles.
        self.restore_mode = Some(if !self.mode.is_bw() {
            self.mode
        } else {
            ctx.store.preferred_mode(ctx.pairs, to_index)
        });

        self.index = to_index;
        self.mode = DisplayMode::Bw;
        self.current_rect = target;
        self.status = ZoomStatus::Opening;
        self.move_tween = Some(MoveTween::new(
            MoveKind::Slide,
            start,
            target,
            SLIDE_ANIMATION,
            now,
        ));
        debug!(from = from_index, to = to_index, "zoom sliding");
    }

    fn finalize_move(&mut self, ctx: ZoomCtx<'_>, now: Instant, events: &mut Vec<ZoomEvent>) {
        let Some(tween) = self.move_tween.take() else {
            return;
        };
        match tween.kind {
            MoveKind::Open => {
                self.status = ZoomStatus::Expanded;
                events.push(ZoomEvent::Opened { index: self.index });
                // Reveal to the photo's remembered non-bw mode.
                if self.fade.is_none() && self.mode != self.active_non_bw {
                    self.fade = Some(FadeTween::new(self.active_non_bw, now));
                } else {
                    self.replay_pending(ctx, now);
                }
            }
            MoveKind::Close => {
                let index = self.index;
                let mode = self.mode;
                self.reset();
                events.push(ZoomEvent::Closed { index, mode });
            }
            MoveKind::Slide => {
                let from = self
                    .outgoing
                    .take()
                    .map(|out| out.index)
                    .unwrap_or(self.index);
                self.status = ZoomStatus::Expanded;
                events.push(ZoomEvent::Slid {
                    from,
                    to: self.index,
                });
                match self.restore_mode.take() {
                    Some(mode) if mode != self.mode => {
                        self.fade = Some(FadeTween::new(mode, now));
                    }
                    _ => self.replay_pending(ctx, now),
                }
            }
        }
    }

    fn finalize_fade(&mut self, ctx: ZoomCtx<'_>, now: Instant, events: &mut Vec<ZoomEvent>) {
        let Some(fade) = self.fade.take() else {
            return;
        };
        self.mode = fade.to;
        if !fade.to.is_bw() {
            self.active_non_bw = fade.to;
        }
        events.push(ZoomEvent::ModeSettled { mode: fade.to });
        self.replay_pending(ctx, now);
    }

    /// Replay exactly one queued navigation once nothing is in flight.
    fn replay_pending(&mut self, ctx: ZoomCtx<'_>, now: Instant) {
        if self.status != ZoomStatus::Expanded
            || self.move_tween.is_some()
            || self.fade.is_some()
        {
            return;
        }
        if let Some(direction) = self.pending_nav.pop_front() {
            if ctx.pairs.len() > 1 {
                self.start_slide(ctx, direction, now);
            }
        }
    }
}
