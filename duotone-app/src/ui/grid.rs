use std::time::Instant;

use eframe::egui;

use duotone_core::Rating;

use crate::app::{DuotoneApp, TILE_SPACING, TILE_WIDTH};

const CAPTION_HEIGHT: f32 = 22.0;

impl DuotoneApp {
    pub(crate) fn draw_grid(&mut self, ui: &mut egui::Ui, now: Instant) {
        if self.gallery.pairs.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("No photo pairs loaded. Check the manifest path in config.json.")
                        .color(egui::Color32::from_rgb(170, 170, 170)),
                );
            });
            return;
        }

        let count = self.gallery.pairs.len();
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.add_space(TILE_SPACING);
            let avail = ui.available_width() - TILE_SPACING;
            let columns = ((avail / (TILE_WIDTH + TILE_SPACING)).floor() as usize).max(1);
            let tile_w =
                (avail - TILE_SPACING * columns as f32) / columns as f32;

            let mut index = 0;
            while index < count {
                ui.horizontal(|ui| {
                    ui.add_space(TILE_SPACING);
                    for i in index..(index + columns).min(count) {
                        self.draw_tile(ui, i, tile_w, now);
                        ui.add_space(TILE_SPACING);
                    }
                });
                ui.add_space(TILE_SPACING);
                index += columns;
            }
        });
    }

    fn draw_tile(&mut self, ui: &mut egui::Ui, index: usize, tile_w: f32, now: Instant) {
        let aspect = self.gallery.aspects.ratio_or_default(index) as f32;
        let image_h = tile_w / aspect;
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(tile_w, image_h + CAPTION_HEIGHT),
            egui::Sense::click(),
        );
        if !ui.is_rect_visible(rect) {
            return;
        }

        let image_rect =
            egui::Rect::from_min_size(rect.min, egui::vec2(tile_w, image_h));
        let painter = ui.painter();
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

        // A missing variant paints as an empty frame, not an error.
        match self.mode_texture(index, self.tile_modes[index]) {
            Some(tex) => {
                painter.image(tex.id(), image_rect, uv, egui::Color32::WHITE);
            }
            None => {
                painter.rect_filled(image_rect, 2.0, egui::Color32::from_gray(28));
            }
        }
        if response.hovered() && !self.zoom.is_active() {
            painter.rect_stroke(
                image_rect,
                2.0,
                egui::Stroke::new(1.0, egui::Color32::from_gray(120)),
                egui::StrokeKind::Outside,
            );
        }

        self.draw_caption(ui, index, rect, image_h);

        if response.clicked() {
            self.tile_clicked(index, image_rect, now);
        }
    }

    fn draw_caption(&self, ui: &mut egui::Ui, index: usize, rect: egui::Rect, image_h: f32) {
        use egui_material_icons::icons::*;

        let Some(pair) = self.gallery.pairs.get(index) else {
            return;
        };
        let caption_rect = egui::Rect::from_min_max(
            egui::pos2(rect.min.x, rect.min.y + image_h),
            rect.max,
        );
        let painter = ui.painter();
        painter.text(
            caption_rect.left_center() + egui::vec2(2.0, 0.0),
            egui::Align2::LEFT_CENTER,
            &pair.bw_name,
            egui::FontId::proportional(12.0),
            egui::Color32::from_gray(180),
        );
        let (icon, color) = match self.gallery.store.rating(&self.gallery.pairs, index) {
            Some(Rating::Up) => (ICON_THUMB_UP, egui::Color32::from_rgb(110, 190, 110)),
            Some(Rating::Down) => (ICON_THUMB_DOWN, egui::Color32::from_rgb(200, 110, 110)),
            None => return,
        };
        painter.text(
            caption_rect.right_center() - egui::vec2(4.0, 0.0),
            egui::Align2::RIGHT_CENTER,
            icon,
            egui::FontId::proportional(14.0),
            color,
        );
    }
}
