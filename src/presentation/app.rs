use crate::domain::models::{AppEvent, BluetoothCommand, MessageSeverity, Screen, StatusMessage};
use crate::domain::settings::SettingsService;
use crate::infrastructure::bluetooth::worker;
use crate::infrastructure::logging::{init_logger, LoggingGuard};
use crate::presentation::state::UiState;
use crate::presentation::theme::{configure_theme, Palette};
use eframe::egui;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};

pub struct BleApp {
    // Services
    pub(crate) settings: Arc<Mutex<SettingsService>>,

    // Bluetooth
    pub(crate) bluetooth_tx: mpsc::UnboundedSender<BluetoothCommand>,
    pub(crate) event_rx: mpsc::UnboundedReceiver<AppEvent>,
    pub(crate) worker: Option<JoinHandle<()>>,

    // State
    pub(crate) state: UiState,

    // UI Options
    pub(crate) is_dark_mode: bool,
    pub(crate) palette: Palette,

    // Logging guard
    pub(crate) _logging_guard: Option<LoggingGuard>,
}

impl BleApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        configure_theme(&cc.egui_ctx, false);

        let settings_service = SettingsService::new().unwrap_or_else(|e| {
            eprintln!("Settings directory unavailable ({}), using ./settings.json", e);
            SettingsService::with_path(PathBuf::from("settings.json"))
        });

        let logging_guard = init_logger(&settings_service.get().log_settings)
            .map_err(|e| eprintln!("Failed to initialize logging: {}", e))
            .ok();

        info!("Starting BLE Advertise & Scan");
        info!("Settings file: {}", settings_service.path().display());

        let settings = Arc::new(Mutex::new(settings_service));
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let mut state = UiState::new();

        let (bluetooth_tx, worker) = match worker::spawn(event_tx, settings.clone()) {
            Ok((tx, handle)) => (tx, Some(handle)),
            Err(e) => {
                error!("Failed to start Bluetooth worker: {}", e);
                state.status_message = Some(StatusMessage::new(
                    format!("Bluetooth worker failed to start: {}", e),
                    MessageSeverity::Error,
                ));
                (mpsc::unbounded_channel().0, None)
            }
        };

        let app = Self {
            settings,
            bluetooth_tx,
            event_rx,
            worker,
            state,
            is_dark_mode: false,
            palette: Palette::new(false),
            _logging_guard: logging_guard,
        };
        app.send(BluetoothCommand::RequestAccess);
        app
    }

    pub(crate) fn send(&self, command: BluetoothCommand) {
        if self.bluetooth_tx.send(command).is_err() {
            error!("Bluetooth worker is gone, dropped {:?}", command);
        }
    }

    fn send_all(&self, commands: Vec<BluetoothCommand>) {
        for command in commands {
            self.send(command);
        }
    }

    pub(crate) fn navigate(&mut self, to: Screen) {
        let commands = self.state.navigate(to);
        self.send_all(commands);
    }

    pub(crate) fn toggle_advertising(&mut self) {
        if let Some(command) = self.state.toggle_advertising() {
            self.send(command);
        }
    }

    /// Turning on asks the OS; turning off goes through the system settings page
    pub(crate) fn set_bluetooth_enabled(&mut self, enabled: bool) {
        if enabled {
            self.send(BluetoothCommand::PowerOn);
        } else {
            crate::infrastructure::system::open_bluetooth_settings();
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            let commands = self.state.handle_event(event);
            self.send_all(commands);
        }
    }

    fn tab(&mut self, ui: &mut egui::Ui, screen: Screen, label: &str) {
        let enabled = screen != Screen::Scan || self.state.session.controls_enabled();
        let selected = self.state.screen == screen;
        if ui
            .add_enabled(enabled, egui::SelectableLabel::new(selected, label))
            .clicked()
        {
            self.navigate(screen);
        }
    }
}

impl eframe::App for BleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        // Platform callbacks don't wake egui
        ctx.request_repaint_after(Duration::from_millis(100));

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                self.tab(ui, Screen::Advertise, "Advertise");
                self.tab(ui, Screen::Scan, "Scan");
                self.tab(ui, Screen::Settings, "Settings");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let switch_icon = if self.is_dark_mode {
                        "☀ Light"
                    } else {
                        "🌙 Dark"
                    };
                    if ui.button(switch_icon).clicked() {
                        self.is_dark_mode = !self.is_dark_mode;
                        self.palette = Palette::new(self.is_dark_mode);
                        configure_theme(ctx, self.is_dark_mode);
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(720.0);
                    ui.add_space(20.0);

                    use crate::presentation::tabs;
                    match self.state.screen {
                        Screen::Advertise => tabs::advertise::render(self, ui),
                        Screen::Scan => tabs::scan::render(self, ui),
                        Screen::Settings => tabs::settings::render(self, ui),
                    }

                    ui.add_space(15.0);
                    tabs::status_panel(self, ui);
                    ui.add_space(40.0);
                });
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        let commands = self.state.shutdown();
        self.send_all(commands);
        info!("Shutting down");

        // Closing the command channel lets the worker release the radio and exit
        let (closed_tx, _) = mpsc::unbounded_channel();
        drop(std::mem::replace(&mut self.bluetooth_tx, closed_tx));
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                error!("Bluetooth worker panicked");
            }
        }
    }
}
