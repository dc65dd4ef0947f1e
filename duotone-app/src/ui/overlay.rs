use std::time::Instant;

use eframe::egui;

use duotone_core::ZoomStatus;

use crate::app::{egui_rect, DuotoneApp, BACKDROP_RGB};

impl DuotoneApp {
    /// Backdrop and animated overlay panes, painted above the grid. Overlay
    /// geometry lives in central-panel coordinates; the panel sits at the
    /// window origin, so they coincide with screen coordinates here.
    pub(crate) fn draw_overlay(&mut self, ui: &mut egui::Ui, now: Instant) {
        if !self.zoom.is_active() {
            return;
        }

        let panel_rect = egui::Rect::from_min_size(
            egui::pos2(0.0, 0.0),
            egui::vec2(self.viewport.0, self.viewport.1),
        );

        let mut primary = false;
        let mut secondary = false;
        let mut backdrop_clicked = false;

        egui::Area::new(egui::Id::new("zoom_overlay"))
            .fixed_pos(panel_rect.min)
            .order(egui::Order::Foreground)
            .show(ui.ctx(), |ui| {
                let (response, painter) =
                    ui.allocate_painter(panel_rect.size(), egui::Sense::click());

                let alpha = self.zoom.backdrop_alpha(now).clamp(0.0, 1.0);
                let (r, g, b) = BACKDROP_RGB;
                painter.rect_filled(
                    panel_rect,
                    0.0,
                    egui::Color32::from_rgba_unmultiplied(r, g, b, (alpha * 235.0) as u8),
                );

                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                let panes = self.zoom.frames(now);
                let front_rect = panes.last().map(|p| egui_rect(p.rect));

                for pane in &panes {
                    let rect = egui_rect(pane.rect);
                    match self.mode_texture(pane.index, pane.mode) {
                        Some(tex) => {
                            painter.image(tex.id(), rect, uv, egui::Color32::WHITE);
                        }
                        None => {
                            painter.rect_filled(rect, 2.0, egui::Color32::from_gray(24));
                        }
                    }
                    // Incoming mode layered on top at the fade's opacity. A
                    // missing variant fades to nothing, which is the contract
                    // for absent files.
                    if let Some((fade_mode, progress)) = pane.fade {
                        if let Some(tex) = self.mode_texture(pane.index, fade_mode) {
                            let fade_alpha = progress.clamp(0.0, 1.0);
                            painter.image(
                                tex.id(),
                                rect,
                                uv,
                                egui::Color32::WHITE.gamma_multiply(fade_alpha),
                            );
                        }
                    }
                }

                if matches!(
                    self.zoom.status(),
                    ZoomStatus::Opening | ZoomStatus::Expanded
                ) {
                    let inside = |pos: Option<egui::Pos2>| {
                        matches!((pos, front_rect), (Some(p), Some(r)) if r.contains(p))
                    };
                    if response.double_clicked() || response.secondary_clicked() {
                        if inside(response.interact_pointer_pos()) {
                            secondary = true;
                        }
                    } else if response.clicked() {
                        if inside(response.interact_pointer_pos()) {
                            primary = true;
                        } else {
                            backdrop_clicked = true;
                        }
                    }
                }
            });

        if secondary {
            self.overlay_secondary(now);
        } else if primary {
            self.overlay_primary(now);
        } else if backdrop_clicked {
            self.clicks.cancel();
            self.zoom.close(now);
        }
    }
}
