use eframe::egui;

use crate::app::DuotoneApp;

impl DuotoneApp {
    pub(crate) fn show_help_window(&mut self, ctx: &egui::Context) {
        if !self.show_help {
            return;
        }

        let mut open = true;
        egui::Window::new("Controls & Shortcuts")
            .open(&mut open)
            .resizable(false)
            .default_width(340.0)
            .frame(
                egui::Frame::window(&ctx.style())
                    .fill(egui::Color32::from_rgba_unmultiplied(10, 10, 10, 210)),
            )
            .show(ctx, |ui| {
                ui.style_mut().visuals.override_text_color =
                    Some(egui::Color32::from_rgb(220, 220, 220));

                ui.heading("Keyboard");
                ui.add_space(2.0);
                egui::Grid::new("help_kb")
                    .num_columns(2)
                    .spacing([12.0, 2.0])
                    .show(ui, |ui| {
                        let keys: &[(&str, &str)] = &[
                            ("Esc", "Close help / log / zoom overlay"),
                            ("Left / Right", "Previous / next photo (zoomed)"),
                            ("1", "Thumbs up the active photo (again to clear)"),
                            ("2", "Thumbs down the active photo (again to clear)"),
                            ("C", "Switch high-contrast / color (zoomed)"),
                            ("H", "Toggle this window"),
                            ("L", "Toggle the event log"),
                        ];
                        for &(k, d) in keys {
                            ui.label(
                                egui::RichText::new(k).strong().color(egui::Color32::WHITE),
                            );
                            ui.label(d);
                            ui.end_row();
                        }
                    });

                ui.add_space(8.0);
                ui.heading("Mouse");
                ui.add_space(2.0);
                egui::Grid::new("help_mouse")
                    .num_columns(2)
                    .spacing([12.0, 2.0])
                    .show(ui, |ui| {
                        let actions: &[(&str, &str)] = &[
                            ("Click tile", "Zoom in (or hide a revealed tile)"),
                            ("Click overlay", "Reveal / hide the colorization"),
                            ("Double / right-click overlay", "Switch high-contrast / color"),
                            ("Click backdrop", "Close the zoom"),
                        ];
                        for &(k, d) in actions {
                            ui.label(
                                egui::RichText::new(k).strong().color(egui::Color32::WHITE),
                            );
                            ui.label(d);
                            ui.end_row();
                        }
                    });
            });
        if !open {
            self.show_help = false;
        }
    }
}
