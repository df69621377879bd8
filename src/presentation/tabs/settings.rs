use crate::domain::models::{MessageSeverity, StatusMessage};
use crate::domain::settings::TxPowerLevel;
use crate::infrastructure::bluetooth::protocol;
use crate::presentation::app::BleApp;
use crate::presentation::components::Components;
use eframe::egui;
use tracing::{error, info};

pub fn render(app: &mut BleApp, ui: &mut egui::Ui) {
    Components::heading(ui, "Settings");
    ui.add_space(20.0);

    let warn = app.palette.warn;
    let mut save_result = None;

    if let Ok(mut settings) = app.settings.lock() {
        let settings_mut = settings.get_mut();

        Components::brutalist_card(ui, "Advertising", |ui| {
            egui::Grid::new("advertise_settings")
                .spacing([10.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Service UUID:");
                    ui.text_edit_singleline(&mut settings_mut.advertise.service_uuid);
                    ui.end_row();

                    ui.label("Name override:");
                    let mut name = settings_mut.advertise.device_name.clone().unwrap_or_default();
                    if ui.text_edit_singleline(&mut name).changed() {
                        settings_mut.advertise.device_name =
                            if name.is_empty() { None } else { Some(name) };
                    }
                    ui.end_row();

                    ui.label("TX power:");
                    egui::ComboBox::from_id_salt("tx_power")
                        .selected_text(settings_mut.advertise.tx_power.label())
                        .show_ui(ui, |ui| {
                            for level in TxPowerLevel::ALL {
                                ui.selectable_value(
                                    &mut settings_mut.advertise.tx_power,
                                    level,
                                    level.label(),
                                );
                            }
                        });
                    ui.end_row();
                });

            if protocol::parse_uuid(&settings_mut.advertise.service_uuid).is_err() {
                ui.label(
                    egui::RichText::new("⚠ Not a valid UUID; advertising will fail.").color(warn),
                );
            }

            ui.checkbox(
                &mut settings_mut.advertise.include_device_name,
                "Include device name",
            );
            ui.checkbox(
                &mut settings_mut.advertise.include_tx_power,
                "Include TX power level",
            );
        });

        ui.add_space(10.0);

        Components::brutalist_card(ui, "Scanning", |ui| {
            ui.checkbox(
                &mut settings_mut.scan.active_scanning,
                "Active scanning (request scan responses)",
            );
        });

        ui.add_space(10.0);

        Components::brutalist_card(ui, "Logging & Debug", |ui| {
            ui.horizontal(|ui| {
                ui.label("Verbosity Level:");
                egui::ComboBox::from_id_salt("log_level")
                    .selected_text(&settings_mut.log_settings.level)
                    .show_ui(ui, |ui| {
                        for level in &["trace", "debug", "info", "warn", "error"] {
                            ui.selectable_value(
                                &mut settings_mut.log_settings.level,
                                level.to_string(),
                                *level,
                            );
                        }
                    });
            });

            ui.checkbox(
                &mut settings_mut.log_settings.console_logging_enabled,
                "Console Logs",
            );
            ui.checkbox(
                &mut settings_mut.log_settings.file_logging_enabled,
                "File Logs",
            );

            if settings_mut.log_settings.file_logging_enabled {
                ui.indent("file_logs", |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Save Path:");
                        ui.text_edit_singleline(&mut settings_mut.log_settings.log_dir);
                    });
                    ui.horizontal(|ui| {
                        ui.label("Rotation:");
                        egui::ComboBox::from_id_salt("log_rot")
                            .selected_text(&settings_mut.log_settings.rotation)
                            .show_ui(ui, |ui| {
                                for rot in &["daily", "hourly", "never"] {
                                    ui.selectable_value(
                                        &mut settings_mut.log_settings.rotation,
                                        rot.to_string(),
                                        *rot,
                                    );
                                }
                            });
                    });
                });
            }
            ui.label(
                egui::RichText::new("Restart required for log changes.")
                    .italics()
                    .size(12.0),
            );
        });

        ui.add_space(10.0);

        if ui.button("Save Settings").clicked() {
            save_result = Some(settings.save());
        }
    }

    match save_result {
        Some(Ok(())) => {
            info!("Settings saved");
            app.state.status_message =
                Some(StatusMessage::new("Settings saved", MessageSeverity::Success));
        }
        Some(Err(e)) => {
            error!("Failed to save settings: {}", e);
            app.state.status_message = Some(StatusMessage::new(
                format!("Failed to save settings: {}", e),
                MessageSeverity::Error,
            ));
        }
        None => {}
    }
}
