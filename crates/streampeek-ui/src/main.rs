#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod follows;
mod helpers;
mod modules;
mod paths;
mod storage;
mod theme;

fn main() -> eframe::Result {
    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title("StreamPeek")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([760.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "StreamPeek",
        native_options,
        Box::new(|cc| {
            theme::configure_style(&cc.egui_ctx);
            Ok(Box::new(app::StreamPeekApp::new(cc)))
        }),
    )
}
