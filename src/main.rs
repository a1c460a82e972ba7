#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::PathBuf;

use meme_canvas::MemeApp;
use meme_canvas::config::EditorConfig;

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = EditorConfig::from_env();
    // Optional background image to start with.
    let initial_image = std::env::args_os().nth(1).map(PathBuf::from);
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.surface_width as f32 + 260.0, config.surface_height as f32 + 40.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title("Meme Canvas"),
        ..Default::default()
    };

    eframe::run_native(
        "meme_canvas",
        native_options,
        Box::new(|cc| {
            let mut app = MemeApp::new(cc, config);
            if let Some(path) = initial_image {
                app.open_image_path(&path);
            }
            Ok(Box::new(app))
        }),
    )
}
