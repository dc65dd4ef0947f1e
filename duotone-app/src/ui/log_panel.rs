use eframe::egui;

use crate::app::DuotoneApp;
use crate::event_log::LogLevel;

impl DuotoneApp {
    pub(crate) fn show_log_panel(&mut self, ctx: &egui::Context) {
        if !self.log.visible {
            return;
        }

        let mut open = true;
        egui::Window::new("Event Log")
            .open(&mut open)
            .default_width(420.0)
            .default_height(220.0)
            .resizable(true)
            .frame(
                egui::Frame::window(&ctx.style())
                    .fill(egui::Color32::from_rgba_unmultiplied(10, 10, 10, 220)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for entry in self.log.entries() {
                            let color = match entry.level {
                                LogLevel::Info => egui::Color32::from_gray(190),
                                LogLevel::Error => egui::Color32::from_rgb(230, 130, 120),
                            };
                            ui.horizontal_wrapped(|ui| {
                                ui.label(
                                    egui::RichText::new(&entry.stamp)
                                        .monospace()
                                        .color(egui::Color32::from_gray(110)),
                                );
                                ui.label(egui::RichText::new(&entry.message).color(color));
                            });
                        }
                    });
            });
        if !open {
            self.log.visible = false;
        }
    }
}
