use eframe::egui;

use crate::app::DuotoneApp;

impl DuotoneApp {
    pub(crate) fn draw_status_bar(&mut self, ui: &mut egui::Ui) {
        use egui_material_icons::icons::*;

        ui.horizontal(|ui| {
            ui.label(format!(
                "{} pairs \u{00b7} {}/{} images",
                self.gallery.pairs.len(),
                self.stats.loaded(),
                self.stats.total()
            ));
            ui.separator();

            let summary = self.gallery.store.summary();
            ui.label(
                egui::RichText::new(format!("{ICON_THUMB_UP} {}", summary.up))
                    .color(egui::Color32::from_rgb(110, 190, 110)),
            );
            ui.label(
                egui::RichText::new(format!("{ICON_THUMB_DOWN} {}", summary.down))
                    .color(egui::Color32::from_rgb(200, 110, 110)),
            );
            ui.separator();

            if !self.status_note.is_empty() {
                let color = if self.stats.failed() > 0 {
                    egui::Color32::from_rgb(230, 180, 100)
                } else {
                    egui::Color32::from_gray(170)
                };
                ui.label(egui::RichText::new(&self.status_note).color(color))
                    .on_hover_text(&self.status_note);
            }
            if !self.scheme_hint.is_empty() && self.stats.failed() > 0 {
                ui.label(egui::RichText::new(ICON_WARNING).color(egui::Color32::YELLOW))
                    .on_hover_text(self.scheme_hint);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .selectable_label(self.show_help, "Help")
                    .on_hover_text("Shortcuts (H)")
                    .clicked()
                {
                    self.show_help = !self.show_help;
                }
                if ui
                    .selectable_label(self.log.visible, "Log")
                    .on_hover_text("Event log (L)")
                    .clicked()
                {
                    self.log.visible = !self.log.visible;
                }
            });
        });
    }
}
