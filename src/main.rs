// Hide the console window in release builds on Windows
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod domain;
mod infrastructure;
mod presentation;

use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 640.0])
            .with_min_inner_size([480.0, 420.0])
            .with_title("BLE Advertise & Scan"),
        ..Default::default()
    };

    eframe::run_native(
        "BLE Advertise & Scan",
        options,
        Box::new(|cc| Ok(Box::new(presentation::app::BleApp::new(cc)))),
    )
}
