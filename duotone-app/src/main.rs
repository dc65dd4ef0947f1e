mod app;
mod app_dir;
mod config;
mod event_log;
mod input;
mod io_worker;
mod loader;
mod manifest;
mod store;
mod ui;

use eframe::egui;
use tracing::info;

use app::DuotoneApp;
use config::AppConfig;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Panics land in the log before the process unwinds.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("panic: {info}");
        default_hook(info);
    }));

    info!("Starting Duotone");

    let config = AppConfig::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Duotone")
            .with_inner_size([config.window_width, config.window_height]),
        ..Default::default()
    };

    eframe::run_native(
        "Duotone",
        options,
        Box::new(move |cc| {
            egui_material_icons::initialize(&cc.egui_ctx);
            Ok(Box::new(DuotoneApp::new(cc, config)))
        }),
    )
}
