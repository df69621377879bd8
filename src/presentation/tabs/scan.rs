use crate::domain::models::{format_address, Screen, ScannedDevice};
use crate::presentation::app::BleApp;
use crate::presentation::components::Components;
use eframe::egui;

pub fn render(app: &mut BleApp, ui: &mut egui::Ui) {
    Components::heading(ui, "Nearby Devices");
    ui.add_space(20.0);

    ui_scan_panel(app, ui);

    if let Some(address) = app.state.selected_device {
        ui.add_space(15.0);
        match app.state.scan_results.get(address) {
            Some(device) => ui_device_details(device, ui),
            None => app.state.selected_device = None,
        }
    }
}

fn ui_scan_panel(app: &mut BleApp, ui: &mut egui::Ui) {
    Components::brutalist_card(ui, "Scan Results", |ui| {
        ui.horizontal(|ui| {
            let session = &app.state.session;
            if session.scan_active {
                ui.spinner();
                ui.label(format!(
                    "Scanning... {} device(s)",
                    app.state.scan_results.len()
                ));
            } else if session.scanning {
                ui.spinner();
                ui.label("Starting scan...");
            } else {
                ui.label("Scan stopped");
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Back").clicked() {
                    app.navigate(Screen::Advertise);
                }
            });
        });

        ui.separator();

        if app.state.scan_results.is_empty() {
            ui.label(egui::RichText::new("No devices found yet.").italics());
            return;
        }

        let mut clicked = None;
        egui::ScrollArea::vertical()
            .id_salt("scan_results")
            .max_height(360.0)
            .show(ui, |ui| {
                for device in app.state.scan_results.iter() {
                    let selected = app.state.selected_device == Some(device.address);
                    let text = format!(
                        "{}  ·  {}  ·  {} dBm",
                        device.display_name(),
                        format_address(device.address),
                        device.signal_strength
                    );
                    if ui
                        .add_sized(
                            [ui.available_width(), 28.0],
                            egui::SelectableLabel::new(selected, text),
                        )
                        .clicked()
                    {
                        clicked = Some(device.address);
                    }
                }
            });

        if let Some(address) = clicked {
            app.state.selected_device = if app.state.selected_device == Some(address) {
                None
            } else {
                Some(address)
            };
        }
    });
}

fn ui_device_details(device: &ScannedDevice, ui: &mut egui::Ui) {
    Components::brutalist_card(ui, "Last Advertisement", |ui| {
        egui::Grid::new("device_grid")
            .spacing([30.0, 8.0])
            .show(ui, |ui| {
                ui.label("Name:");
                ui.label(device.display_name());
                ui.end_row();

                ui.label("Address:");
                ui.monospace(device.address_string());
                ui.end_row();

                ui.label("Signal:");
                ui.label(format!("{} dBm", device.signal_strength));
                ui.end_row();

                ui.label("TX power:");
                ui.label(
                    device
                        .tx_power
                        .map(|p| format!("{} dBm", p))
                        .unwrap_or_else(|| "-".to_string()),
                );
                ui.end_row();

                ui.label("Services:");
                ui.vertical(|ui| {
                    if device.service_uuids.is_empty() {
                        ui.label("-");
                    }
                    for uuid in &device.service_uuids {
                        ui.monospace(uuid.to_string());
                    }
                });
                ui.end_row();

                ui.label("Last seen:");
                ui.label(format!(
                    "{:.1} s ago",
                    device.last_seen.elapsed().as_secs_f32()
                ));
                ui.end_row();
            });
    });
}
