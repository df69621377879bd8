pub mod advertise;
pub mod scan;
pub mod settings;

use crate::presentation::app::BleApp;
use crate::presentation::components::Components;
use eframe::egui;

/// Last log line reported by the worker or the UI
pub fn status_panel(app: &mut BleApp, ui: &mut egui::Ui) {
    if let Some(msg) = &app.state.status_message {
        let color = app.palette.severity(msg.severity);
        Components::brutalist_card(ui, "System Status", |ui| {
            ui.label(egui::RichText::new(&msg.message).color(color).strong());
        });
    }
}
