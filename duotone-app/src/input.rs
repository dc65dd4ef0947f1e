use std::time::Instant;

use eframe::egui;

use duotone_core::{Direction, Rating};

use crate::app::DuotoneApp;

impl DuotoneApp {
    /// Global shortcuts. Skipped entirely while a text widget has focus so
    /// typing never drives the gallery.
    pub(crate) fn handle_keys(&mut self, ctx: &egui::Context, now: Instant) {
        let text_editing = ctx.memory(|m| m.focused().is_some());
        if text_editing {
            return;
        }

        ctx.input(|input| {
            if input.key_pressed(egui::Key::Escape) {
                if self.show_help {
                    self.show_help = false;
                } else if self.log.visible {
                    self.log.visible = false;
                } else {
                    self.zoom.close(now);
                }
            }

            // Navigation supersedes any parked single click.
            if input.key_pressed(egui::Key::ArrowLeft) {
                self.clicks.cancel();
                self.zoom
                    .navigate(self.gallery.ctx(self.viewport), Direction::Back, now);
            }
            if input.key_pressed(egui::Key::ArrowRight) {
                self.clicks.cancel();
                self.zoom
                    .navigate(self.gallery.ctx(self.viewport), Direction::Forward, now);
            }

            if input.key_pressed(egui::Key::Num1) {
                self.rate_active(Rating::Up);
            }
            if input.key_pressed(egui::Key::Num2) {
                self.rate_active(Rating::Down);
            }

            if input.key_pressed(egui::Key::C) {
                self.toggle_palette(now);
            }
            if input.key_pressed(egui::Key::H) {
                self.show_help = !self.show_help;
            }
            if input.key_pressed(egui::Key::L) {
                self.log.visible = !self.log.visible;
            }
        });
    }
}
