//! Screen state driven by worker events and user input

use crate::domain::models::{
    AdapterState, AdvertisingState, AppEvent, BluetoothCommand, MessageSeverity, Screen,
    StatusMessage,
};
use crate::domain::scan_results::{ScanResults, ScanUpdate};
use crate::domain::session::RadioSession;
use tracing::{debug, trace};

pub struct UiState {
    pub session: RadioSession,
    pub scan_results: ScanResults,
    pub selected_device: Option<u64>,
    pub status_message: Option<StatusMessage>,
    pub screen: Screen,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            session: RadioSession::new(),
            scan_results: ScanResults::new(),
            selected_device: None,
            status_message: None,
            screen: Screen::Advertise,
        }
    }

    /// Apply one worker event, returning any follow-up commands
    pub fn handle_event(&mut self, event: AppEvent) -> Vec<BluetoothCommand> {
        match event {
            AppEvent::Permissions(status) => {
                self.session.on_permissions(status);
            }
            AppEvent::AdapterState(state) => {
                let was = self.session.adapter;
                let commands = self.session.on_adapter_state(state, self.screen);
                if commands.contains(&BluetoothCommand::StartScan) {
                    self.clear_scan_results();
                }
                if was == AdapterState::On && state != AdapterState::On {
                    self.set_status("Bluetooth turned off", MessageSeverity::Warning);
                } else if was != AdapterState::On && state == AdapterState::On {
                    self.set_status("Bluetooth is on", MessageSeverity::Info);
                }
                return commands;
            }
            AppEvent::AdvertisingStarted => {
                if self.session.advertising == AdvertisingState::Starting {
                    self.set_status("Advertising started", MessageSeverity::Success);
                }
                self.session.on_advertising_started();
            }
            AppEvent::AdvertisingStopped => {
                self.session.on_advertising_stopped();
            }
            AppEvent::AdvertisingFailed(reason) => {
                self.session.on_advertising_failed();
                self.set_status(reason, MessageSeverity::Error);
            }
            AppEvent::ScanStarted => self.session.on_scan_started(),
            AppEvent::ScanStopped => self.session.on_scan_stopped(),
            AppEvent::ScanFailed(reason) => {
                self.session.on_scan_failed();
                self.set_status(reason, MessageSeverity::Error);
            }
            AppEvent::DeviceFound(device) => {
                if self.session.accepts_scan_results() {
                    match self.scan_results.upsert(device) {
                        ScanUpdate::Inserted(row) => debug!("New device at row {}", row),
                        ScanUpdate::Changed(row) => trace!("Updated row {}", row),
                    }
                }
            }
            AppEvent::LogMessage(message) => {
                self.status_message = Some(message);
            }
        }
        Vec::new()
    }

    /// Switch screens; scan results live only while the scan screen is shown
    pub fn navigate(&mut self, to: Screen) -> Vec<BluetoothCommand> {
        let from = self.screen;
        if from == to {
            return Vec::new();
        }

        let commands = self.session.on_screen_change(from, to);
        if from == Screen::Scan || to == Screen::Scan {
            self.clear_scan_results();
        }
        self.screen = to;
        commands
    }

    pub fn toggle_advertising(&mut self) -> Option<BluetoothCommand> {
        self.session.toggle_advertising()
    }

    /// Release the radio before the window closes
    pub fn shutdown(&mut self) -> Vec<BluetoothCommand> {
        self.session.shutdown()
    }

    pub fn advertise_button_label(&self) -> &'static str {
        match self.session.advertising {
            AdvertisingState::Idle => "Start Advertising",
            AdvertisingState::Starting => "Starting...",
            AdvertisingState::Active => "Stop Advertising",
        }
    }

    fn clear_scan_results(&mut self) {
        self.scan_results.clear();
        self.selected_device = None;
    }

    fn set_status(&mut self, message: impl Into<String>, severity: MessageSeverity) {
        self.status_message = Some(StatusMessage::new(message, severity));
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
