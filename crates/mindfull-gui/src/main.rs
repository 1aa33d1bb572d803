#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe::egui;

mod app;
mod input;
mod notifications;
mod painter;
mod settings;
mod theme;

use app::MindfullApp;

fn main() -> eframe::Result<()> {
    // Log to stdout (if you run with `RUST_LOG=debug`).
    tracing_subscriber::fmt::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("MindFull"),
        ..Default::default()
    };

    eframe::run_native(
        "MindFull",
        options,
        Box::new(|cc| Ok(Box::new(MindfullApp::new(cc)))),
    )
}
