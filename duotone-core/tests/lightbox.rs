use std::time::{Duration, Instant};

use duotone_core::zoom::{
    CLOSE_ANIMATION, FADE_ANIMATION, FINALIZE_MARGIN, OPEN_ANIMATION, SLIDE_ANIMATION,
};
use duotone_core::{
    AspectTracker, ClickArbiter, Direction, DisplayMode, FailureRecord, LoadStats, PairSet,
    Rating, RatingStore, Rect, VariantKind, ZoomController, ZoomCtx, ZoomEvent, ZoomStatus,
};

struct Gallery {
    pairs: PairSet,
    aspects: AspectTracker,
    store: RatingStore,
    zoom: ZoomController,
}

impl Gallery {
    fn new(names: &[&str]) -> Self {
        let bw: Vec<String> = names.iter().map(|n| format!("{n}.jpg")).collect();
        let color: Vec<String> = names.iter().map(|n| format!("{n}_color.jpg")).collect();
        let pairs = PairSet::new(bw, color).unwrap();
        let count = pairs.len();
        Self {
            pairs,
            aspects: AspectTracker::new(count),
            store: RatingStore::new("tests/pairs.json"),
            zoom: ZoomController::new(),
        }
    }
}

/// Borrows the read-only side of the gallery for one controller call,
/// leaving `zoom` (and, between calls, `store`) free for mutation.
macro_rules! ctx {
    ($g:expr) => {
        ZoomCtx {
            pairs: &$g.pairs,
            aspects: &$g.aspects,
            store: &$g.store,
            viewport: (1440.0, 900.0),
        }
    };
}

fn tile() -> Rect {
    Rect::new(24.0, 36.0, 220.0, 165.0)
}

/// Full lifecycle: open, reveal, switch modes, navigate with queuing, rate,
/// close. The way a user session actually plays out.
#[test]
fn end_to_end_lightbox_session() {
    let mut g = Gallery::new(&["alpha", "beta", "gamma"]);
    g.aspects.record(1, 1600.0, 900.0);
    let t0 = Instant::now();

    // Open photo 0 and let the fallback deadline finalize it.
    assert!(g.zoom.open(ctx!(g), 0, tile(), t0));
    let t1 = t0 + OPEN_ANIMATION + FINALIZE_MARGIN + Duration::from_millis(5);
    let events = g.zoom.tick(ctx!(g), t1);
    assert_eq!(events, vec![ZoomEvent::Opened { index: 0 }]);
    assert_eq!(g.zoom.status(), ZoomStatus::Expanded);

    // The reveal fade brings the default non-bw mode in.
    let t2 = t1 + FADE_ANIMATION;
    let events = g.zoom.finish_fade(ctx!(g), t2);
    assert_eq!(
        events,
        vec![ZoomEvent::ModeSettled {
            mode: DisplayMode::High
        }]
    );

    // Flip to color, then navigate twice quickly: the second queues.
    g.zoom.set_mode(DisplayMode::Color, t2);
    let t3 = t2 + FADE_ANIMATION;
    g.zoom.finish_fade(ctx!(g), t3);
    g.zoom.navigate(ctx!(g), Direction::Forward, t3);
    g.zoom
        .navigate(ctx!(g), Direction::Forward, t3 + Duration::from_millis(80));
    assert_eq!(g.zoom.queued_navigations(), 1);

    let t4 = t3 + SLIDE_ANIMATION;
    let events = g.zoom.finish_move(ctx!(g), t4);
    assert_eq!(events, vec![ZoomEvent::Slid { from: 0, to: 1 }]);
    // Color was active, so the incoming photo restores to color.
    assert_eq!(g.zoom.visible_mode(), DisplayMode::Color);
    assert_eq!(g.zoom.queued_navigations(), 1);

    let t5 = t4 + FADE_ANIMATION;
    g.zoom.finish_fade(ctx!(g), t5);
    // The queued navigation replayed onto photo 2.
    assert_eq!(g.zoom.index(), Some(2));

    let t6 = t5 + SLIDE_ANIMATION;
    g.zoom.finish_move(ctx!(g), t6);
    let t7 = t6 + FADE_ANIMATION;
    g.zoom.finish_fade(ctx!(g), t7);
    assert_eq!(g.zoom.status(), ZoomStatus::Expanded);

    // Thumb down snapshots the active color mode.
    let active = g.zoom.active_non_bw();
    g.store.set(&g.pairs, 2, Rating::Down, active);
    assert_eq!(g.store.preferred_mode(&g.pairs, 2), DisplayMode::Color);

    // Close; the tile inherits the overlay's color mode.
    assert!(g.zoom.close(t7));
    let t8 = t7 + CLOSE_ANIMATION + FINALIZE_MARGIN + Duration::from_millis(5);
    let events = g.zoom.tick(ctx!(g), t8);
    assert_eq!(
        events,
        vec![ZoomEvent::Closed {
            index: 2,
            mode: DisplayMode::Color
        }]
    );
    assert_eq!(g.zoom.status(), ZoomStatus::Idle);
    assert!(g.zoom.frames(t8).is_empty());
}

/// Persisted records survive a reload: the color snapshot taken by a down
/// rating is still there for a fresh store.
#[test]
fn rating_mode_survives_store_reload() {
    let g = Gallery::new(&["alpha", "beta"]);
    let mut store = RatingStore::new("tests/pairs.json");
    store.set(&g.pairs, 0, Rating::Down, DisplayMode::Color);

    let (ratings, modes) = store.to_records();
    let ratings_json = serde_json::to_string(&ratings).unwrap();
    let modes_json = serde_json::to_string(&modes).unwrap();

    let reloaded = RatingStore::from_records(
        "tests/pairs.json",
        &serde_json::from_str(&ratings_json).unwrap(),
        &serde_json::from_str(&modes_json).unwrap(),
    );
    assert_eq!(reloaded.rating(&g.pairs, 0), Some(Rating::Down));
    assert_eq!(reloaded.preferred_mode(&g.pairs, 0), DisplayMode::Color);
    assert_eq!(reloaded.summary().down, 1);
}

/// The click arbiter, zoom, and rating store cooperate the way the input
/// layer wires them: a deferred single click released by the poll toggles
/// the reveal, and a secondary gesture in the window suppresses it.
#[test]
fn deferred_click_resolution_against_live_overlay() {
    let mut g = Gallery::new(&["alpha", "beta"]);
    let t0 = Instant::now();
    assert!(g.zoom.open(ctx!(g), 0, tile(), t0));
    let t1 = t0 + OPEN_ANIMATION;
    g.zoom.finish_move(ctx!(g), t1);
    let t2 = t1 + FADE_ANIMATION;
    g.zoom.finish_fade(ctx!(g), t2);
    assert_eq!(g.zoom.mode(), DisplayMode::High);

    let mut clicks = ClickArbiter::new(true);

    // Single click, no secondary gesture: released at the deadline and the
    // overlay drops to b/w.
    clicks.primary(t2);
    let t3 = t2 + Duration::from_millis(300);
    if clicks.poll(t3) {
        g.zoom.toggle_reveal(t3);
    }
    assert_eq!(g.zoom.visible_mode(), DisplayMode::Bw);
    let t4 = t3 + FADE_ANIMATION;
    g.zoom.finish_fade(ctx!(g), t4);

    // Reveal again, then: primary immediately followed by a secondary
    // gesture. The parked click dies; only the high/color toggle runs.
    g.zoom.toggle_reveal(t4);
    let t5 = t4 + FADE_ANIMATION;
    g.zoom.finish_fade(ctx!(g), t5);
    clicks.primary(t5);
    clicks.secondary();
    let chosen = g.zoom.toggle_non_bw(t5);
    assert_eq!(chosen, Some(DisplayMode::Color));
    let t6 = t5 + Duration::from_secs(1);
    assert!(!clicks.poll(t6));
    g.zoom.finish_fade(ctx!(g), t6);
    assert_eq!(g.zoom.mode(), DisplayMode::Color);
}

/// The load-failure scenario from the gallery's startup path: every variant
/// of every pair missing.
#[test]
fn all_variants_missing_reports_complete_failure() {
    let pairs = PairSet::new(
        vec!["a.jpg".into(), "b.jpg".into()],
        vec!["a2.jpg".into(), "b2.jpg".into()],
    )
    .unwrap();
    let mut stats = LoadStats::new(pairs.len());

    let mut completions = 0;
    let mut reveal = false;
    for pair in pairs.iter() {
        for kind in VariantKind::ALL {
            let name = match kind {
                VariantKind::Bw => pair.bw_name.clone(),
                _ => pair.color_name.clone(),
            };
            let update = stats.record_failure(FailureRecord {
                kind,
                name: name.clone(),
                path: format!("./local/{name}"),
            });
            reveal |= update.reveal_log;
            if update.completed {
                completions += 1;
            }
        }
    }

    assert_eq!(stats.loaded(), 0);
    assert_eq!(stats.failed(), 6);
    assert_eq!(completions, 1);
    assert!(reveal);
    assert_eq!(stats.failures().len(), 6);
}
