use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use eframe::egui;
use tracing::{debug, info};

use duotone_core::{
    AspectTracker, ClickArbiter, ClickDecision, DisplayMode, FailureRecord, LoadStats, PairSet,
    Rating, RatingStore, Rect, SourceScheme, StatusUpdate, VariantKind, ZoomController, ZoomCtx,
    ZoomEvent, ZoomStatus,
};

use crate::config::AppConfig;
use crate::event_log::EventLog;
use crate::io_worker::{spawn_io_worker, IoRequest};
use crate::loader::{load_worker, LoadRequest, LoadResponse};
use crate::{manifest, store};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Preferred tile width; the grid fits as many columns as the panel allows.
pub(crate) const TILE_WIDTH: f32 = 260.0;
pub(crate) const TILE_SPACING: f32 = 14.0;
/// Backdrop color at full opacity.
pub(crate) const BACKDROP_RGB: (u8, u8, u8) = (8, 8, 10);

// ---------------------------------------------------------------------------
// Gallery data
// ---------------------------------------------------------------------------

/// The read-mostly photo data the zoom controller consults: the pair list,
/// measured aspect ratios, and the rating store.
pub(crate) struct Gallery {
    pub(crate) pairs: PairSet,
    pub(crate) aspects: AspectTracker,
    pub(crate) store: RatingStore,
}

impl Gallery {
    /// Borrow the gallery for one zoom-controller call. A separate field
    /// from the controller itself so both can be borrowed at once.
    pub(crate) fn ctx(&self, viewport: (f32, f32)) -> ZoomCtx<'_> {
        ZoomCtx {
            pairs: &self.pairs,
            aspects: &self.aspects,
            store: &self.store,
            viewport,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

pub(crate) struct DuotoneApp {
    pub(crate) config: AppConfig,
    pub(crate) gallery: Gallery,
    pub(crate) zoom: ZoomController,
    pub(crate) clicks: ClickArbiter,
    /// Per-tile display mode; a closed overlay hands its mode back to its tile.
    pub(crate) tile_modes: Vec<DisplayMode>,
    /// Last grid tile the user interacted with; keyboard ratings fall back to
    /// it when no overlay is open.
    pub(crate) focused_tile: Option<usize>,
    pub(crate) stats: LoadStats,
    pub(crate) status_note: String,
    /// Non-empty when an image folder points at a URL the loader cannot read.
    pub(crate) scheme_hint: &'static str,
    pub(crate) textures: HashMap<(usize, VariantKind), egui::TextureHandle>,
    pub(crate) log: EventLog,
    pub(crate) show_help: bool,
    /// Central panel size from the current frame; drives overlay geometry.
    pub(crate) viewport: (f32, f32),
    rx_loads: mpsc::Receiver<LoadResponse>,
    io_tx: mpsc::Sender<IoRequest>,
}

impl DuotoneApp {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let pairs = manifest::load_pairs(Path::new(&config.manifest_path)).unwrap_or_default();
        let pair_count = pairs.len();

        let scheme_hint = [config.bw_dir.as_str(), config.high_dir.as_str(), config.color_dir()]
            .into_iter()
            .map(SourceScheme::detect)
            .map(SourceScheme::hint)
            .find(|hint| !hint.is_empty())
            .unwrap_or("");

        let (load_tx, load_rx) = mpsc::channel::<LoadRequest>();
        let (resp_tx, resp_rx) = mpsc::channel::<LoadResponse>();
        let egui_ctx = cc.egui_ctx.clone();
        std::thread::Builder::new()
            .name("load-worker".into())
            .spawn(move || load_worker(egui_ctx, load_rx, resp_tx))
            .expect("Failed to spawn load worker thread");

        for (index, pair) in pairs.iter().enumerate() {
            for kind in VariantKind::ALL {
                let name = match kind {
                    VariantKind::Bw => pair.bw_name.clone(),
                    _ => pair.color_name.clone(),
                };
                let location = manifest::variant_location(&config, pair, kind);
                let _ = load_tx.send(LoadRequest {
                    index,
                    kind,
                    name,
                    location,
                });
            }
        }
        // Dropping the sender lets the worker exit once the queue drains.
        drop(load_tx);

        let log = EventLog::new(Instant::now());
        let store = store::load_store(config.rating_scope());
        info!(pairs = pair_count, scope = config.rating_scope(), "gallery ready");

        let status_note = if pair_count == 0 {
            "No matching filenames were found.".to_string()
        } else {
            format!("Loading {} images\u{2026}", pair_count * 3)
        };

        Self {
            gallery: Gallery {
                aspects: AspectTracker::new(pair_count),
                store,
                pairs,
            },
            zoom: ZoomController::new(),
            clicks: ClickArbiter::new(config.defer_single_click),
            tile_modes: vec![DisplayMode::Bw; pair_count],
            focused_tile: None,
            stats: LoadStats::new(pair_count),
            status_note,
            scheme_hint,
            textures: HashMap::new(),
            log,
            show_help: false,
            viewport: (0.0, 0.0),
            rx_loads: resp_rx,
            io_tx: spawn_io_worker(),
            config,
        }
    }

    // -- Background results --------------------------------------------------

    /// Drain decoded images and failures from the load worker.
    fn pump_loader(&mut self, ctx: &egui::Context) {
        let responses: Vec<LoadResponse> = self.rx_loads.try_iter().collect();
        for response in responses {
            match response {
                LoadResponse::Done {
                    index,
                    kind,
                    pixels,
                    width,
                    height,
                } => {
                    let image = egui::ColorImage::from_rgba_unmultiplied(
                        [width as usize, height as usize],
                        &pixels,
                    );
                    let handle = ctx.load_texture(
                        format!("photo-{index}-{}", kind.label()),
                        image,
                        egui::TextureOptions::LINEAR,
                    );
                    self.textures.insert((index, kind), handle);
                    self.gallery
                        .aspects
                        .record(index, f64::from(width), f64::from(height));
                    let update = self.stats.record_success();
                    self.apply_status(update);
                }
                LoadResponse::Failed {
                    index,
                    kind,
                    name,
                    location,
                    error,
                } => {
                    let record = FailureRecord {
                        kind,
                        name,
                        path: location,
                    };
                    self.log.error(format!("{record} ({error})"));
                    debug!(index, "variant load failed");
                    let update = self.stats.record_failure(record);
                    self.apply_status(update);
                }
            }
        }
    }

    fn apply_status(&mut self, update: StatusUpdate) {
        if update.completed {
            let summary = format!(
                "Load complete. Loaded: {}, Failed: {}.",
                self.stats.loaded(),
                self.stats.failed()
            );
            self.log.info(summary.clone());
            if update.note.is_none() {
                self.status_note = summary;
            }
        }
        if let Some(note) = update.note {
            self.status_note = note;
        }
        if update.reveal_log {
            self.log.visible = true;
        }
    }

    // -- Zoom plumbing -------------------------------------------------------

    /// Finalize overlay animations: report tweens whose progress reached 1,
    /// then sweep fallback deadlines for anything that slipped past.
    fn pump_zoom(&mut self, now: Instant) {
        let mut events = Vec::new();
        if matches!(self.zoom.move_progress(now), Some(p) if p >= 1.0) {
            events.extend(self.zoom.finish_move(self.gallery.ctx(self.viewport), now));
        }
        if matches!(self.zoom.fade_progress(now), Some(p) if p >= 1.0) {
            events.extend(self.zoom.finish_fade(self.gallery.ctx(self.viewport), now));
        }
        events.extend(self.zoom.tick(self.gallery.ctx(self.viewport), now));
        self.apply_zoom_events(events);
    }

    fn apply_zoom_events(&mut self, events: Vec<ZoomEvent>) {
        for event in events {
            match event {
                ZoomEvent::Opened { index } => debug!(index, "overlay expanded"),
                ZoomEvent::Closed { index, mode } => {
                    // The source tile inherits whatever the overlay showed.
                    if let Some(tile) = self.tile_modes.get_mut(index) {
                        *tile = mode;
                    }
                    debug!(index, mode = mode.label(), "overlay closed");
                }
                ZoomEvent::Slid { from, to } => debug!(from, to, "overlay slid"),
                ZoomEvent::ModeSettled { mode } => debug!(mode = mode.label(), "fade settled"),
            }
        }
    }

    // -- User actions --------------------------------------------------------

    /// A grid tile was clicked. While expanded only the overlay's source
    /// tile responds (it closes the zoom); other transition states swallow
    /// the click. When idle, a revealed tile drops back to b/w and an
    /// unrevealed tile opens the overlay.
    pub(crate) fn tile_clicked(&mut self, index: usize, tile_rect: egui::Rect, now: Instant) {
        self.focused_tile = Some(index);
        match self.zoom.status() {
            ZoomStatus::Expanded => {
                if self.zoom.index() == Some(index) {
                    self.zoom.close(now);
                }
            }
            ZoomStatus::Opening | ZoomStatus::Closing => {}
            ZoomStatus::Idle => {
                if !self.tile_modes[index].is_bw() {
                    self.tile_modes[index] = DisplayMode::Bw;
                } else {
                    self.zoom
                        .open(self.gallery.ctx(self.viewport), index, core_rect(tile_rect), now);
                }
            }
        }
    }

    /// Primary click on the open overlay. Fired or parked per the arbiter;
    /// a parked click is released by `poll_clicks` unless a secondary
    /// gesture cancels it first.
    pub(crate) fn overlay_primary(&mut self, now: Instant) {
        if self.clicks.primary(now) == ClickDecision::Fire {
            self.zoom.toggle_reveal(now);
        }
    }

    /// Secondary gesture on the overlay: drop any parked single click and
    /// flip between the two colorizations, remembering the choice.
    pub(crate) fn overlay_secondary(&mut self, now: Instant) {
        self.clicks.secondary();
        self.toggle_palette(now);
    }

    pub(crate) fn toggle_palette(&mut self, now: Instant) {
        if let Some(mode) = self.zoom.toggle_non_bw(now) {
            if let Some(index) = self.zoom.index() {
                self.gallery
                    .store
                    .set_preferred_mode(&self.gallery.pairs, index, mode);
                store::save_store(&self.gallery.store, &self.io_tx);
            }
        }
    }

    fn poll_clicks(&mut self, now: Instant) {
        if self.clicks.poll(now) {
            self.zoom.toggle_reveal(now);
        }
    }

    /// Rate the active photo: the open overlay wins, else the last-focused
    /// grid tile. Rating twice with the same value clears it.
    pub(crate) fn rate_active(&mut self, value: Rating) {
        let Some(index) = self.zoom.index().or(self.focused_tile) else {
            return;
        };
        let active = if self.zoom.index() == Some(index) {
            self.zoom.active_non_bw()
        } else if !self.tile_modes[index].is_bw() {
            self.tile_modes[index]
        } else {
            self.gallery.store.preferred_mode(&self.gallery.pairs, index)
        };
        if self.gallery.store.set(&self.gallery.pairs, index, value, active) {
            store::save_store(&self.gallery.store, &self.io_tx);
            let name = self
                .gallery
                .pairs
                .get(index)
                .map(|p| p.bw_name.as_str())
                .unwrap_or("?");
            let stored = match self.gallery.store.rating(&self.gallery.pairs, index) {
                Some(rating) => rating.as_str(),
                None => "cleared",
            };
            self.log.info(format!("Rating for {name}: {stored}"));
        }
    }

    pub(crate) fn texture(&self, index: usize, kind: VariantKind) -> Option<&egui::TextureHandle> {
        self.textures.get(&(index, kind))
    }

    /// Texture for a display mode, tolerating a missing variant.
    pub(crate) fn mode_texture(
        &self,
        index: usize,
        mode: DisplayMode,
    ) -> Option<&egui::TextureHandle> {
        let kind = match mode {
            DisplayMode::Bw => VariantKind::Bw,
            DisplayMode::High => VariantKind::High,
            DisplayMode::Color => VariantKind::Color,
        };
        self.texture(index, kind)
    }
}

/// egui rect to the controller's geometry type.
pub(crate) fn core_rect(rect: egui::Rect) -> Rect {
    Rect::new(rect.min.x, rect.min.y, rect.width(), rect.height())
}

pub(crate) fn egui_rect(rect: Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(rect.left, rect.top),
        egui::vec2(rect.width, rect.height),
    )
}

// ---------------------------------------------------------------------------
// Frame loop
// ---------------------------------------------------------------------------

impl eframe::App for DuotoneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());
        let now = Instant::now();

        self.pump_loader(ctx);
        self.handle_keys(ctx, now);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.draw_status_bar(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let available = ui.available_rect_before_wrap();
                self.viewport = (available.width(), available.height());

                self.pump_zoom(now);
                self.poll_clicks(now);

                self.draw_grid(ui, now);
                self.draw_overlay(ui, now);
            });

        self.show_help_window(ctx);
        self.show_log_panel(ctx);

        // Track the window size so it persists across sessions.
        let screen = ctx.screen_rect();
        self.config.window_width = screen.width();
        self.config.window_height = screen.height();

        // Animations and parked clicks advance with time, not input.
        if self.zoom.is_active() || self.clicks.has_pending() {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.config.save();
        // The fire-and-forget worker may not drain before the process exits.
        store::save_store_blocking(&self.gallery.store);
        info!("Saved configuration and ratings on exit");
    }
}
