use crate::domain::models::{AdapterState, BluetoothCommand, PermissionStatus, Screen};
use crate::presentation::app::BleApp;
use crate::presentation::components::Components;
use eframe::egui;

pub fn render(app: &mut BleApp, ui: &mut egui::Ui) {
    Components::heading(ui, "BLE Advertiser");
    ui.add_space(20.0);

    ui_adapter_panel(app, ui);
    ui.add_space(15.0);

    ui_advertising_panel(app, ui);
}

fn ui_adapter_panel(app: &mut BleApp, ui: &mut egui::Ui) {
    Components::brutalist_card(ui, "Bluetooth", |ui| {
        let session = &app.state.session;
        let (text, bg) = app.palette.radio_banner(session.adapter, session.advertising);
        Components::status_banner(ui, text, bg, egui::Color32::BLACK);

        ui.add_space(10.0);

        let permissions = session.permissions;
        let mut enabled = session.adapter == AdapterState::On;
        let switch_usable =
            permissions == PermissionStatus::Granted && session.adapter != AdapterState::Unavailable;

        ui.horizontal(|ui| {
            ui.label("Bluetooth:");
            if Components::toggle_switch(ui, &mut enabled, switch_usable).changed() {
                app.set_bluetooth_enabled(enabled);
            }
        });

        match permissions {
            PermissionStatus::Unknown => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Waiting for Bluetooth access...");
                });
            }
            PermissionStatus::Denied => {
                ui.label(
                    egui::RichText::new("Bluetooth access was not granted.")
                        .color(app.palette.warn),
                );
                if ui.button("Request Access").clicked() {
                    app.send(BluetoothCommand::RequestAccess);
                }
            }
            PermissionStatus::Granted => {}
        }
    });
}

fn ui_advertising_panel(app: &mut BleApp, ui: &mut egui::Ui) {
    let (service_uuid, local_name) = match app.settings.lock() {
        Ok(settings) => {
            let advertise = &settings.get().advertise;
            (advertise.service_uuid.clone(), advertise.local_name())
        }
        Err(_) => return,
    };

    Components::brutalist_card(ui, "Advertising", |ui| {
        egui::Grid::new("advertise_grid")
            .spacing([30.0, 8.0])
            .show(ui, |ui| {
                ui.label("Service UUID:");
                ui.monospace(&service_uuid);
                ui.end_row();

                ui.label("Device name:");
                ui.label(local_name.as_deref().unwrap_or("(not included)"));
                ui.end_row();
            });

        ui.add_space(10.0);

        let controls_enabled = app.state.session.controls_enabled();
        ui.horizontal(|ui| {
            let label = app.state.advertise_button_label();
            if ui
                .add_enabled(controls_enabled, egui::Button::new(label))
                .clicked()
            {
                app.toggle_advertising();
            }
            if app.state.session.is_advertising() {
                ui.spinner();
            }

            if ui
                .add_enabled(controls_enabled, egui::Button::new("Scan for Devices"))
                .clicked()
            {
                app.navigate(Screen::Scan);
            }
        });
    });
}
