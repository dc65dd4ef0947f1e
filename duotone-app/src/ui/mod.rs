mod grid;
mod help;
mod log_panel;
mod overlay;
mod status;
