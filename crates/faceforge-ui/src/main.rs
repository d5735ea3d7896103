#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod context;
mod helpers;
mod modules;
mod theme;

fn main() -> eframe::Result {
    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title("🎭 FaceForge")
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([820.0, 560.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "FaceForge",
        native_options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(app::FaceForgeApp::new(cc)))
        }),
    )
}
