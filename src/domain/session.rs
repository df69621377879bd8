//! Radio session state
//!
//! Mirrors adapter power, access, advertising and scanning state on the UI
//! side and decides which commands a UI event should send to the worker.

use crate::domain::models::{
    AdapterState, AdvertisingState, BluetoothCommand, PermissionStatus, Screen,
};

#[derive(Debug, Default)]
pub struct RadioSession {
    pub adapter: AdapterState,
    pub permissions: PermissionStatus,
    pub advertising: AdvertisingState,
    /// A scan was requested and not yet stopped
    pub scanning: bool,
    /// The worker confirmed the watcher is running
    pub scan_active: bool,
}

impl RadioSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advertise/scan controls are usable only with access granted and the radio on
    pub fn controls_enabled(&self) -> bool {
        self.permissions == PermissionStatus::Granted && self.adapter == AdapterState::On
    }

    pub fn is_advertising(&self) -> bool {
        self.advertising != AdvertisingState::Idle
    }

    pub fn on_permissions(&mut self, status: PermissionStatus) {
        self.permissions = status;
    }

    /// Power loss stops both sessions; power returning on the scan screen resumes the scan
    pub fn on_adapter_state(
        &mut self,
        state: AdapterState,
        screen: Screen,
    ) -> Vec<BluetoothCommand> {
        self.adapter = state;

        let mut commands = Vec::new();
        if state != AdapterState::On {
            if self.is_advertising() {
                self.advertising = AdvertisingState::Idle;
                commands.push(BluetoothCommand::StopAdvertising);
            }
            if self.scanning {
                self.stop_scanning();
                commands.push(BluetoothCommand::StopScan);
            }
        } else if screen == Screen::Scan && self.controls_enabled() && !self.scanning {
            self.scanning = true;
            commands.push(BluetoothCommand::StartScan);
        }
        commands
    }

    pub fn toggle_advertising(&mut self) -> Option<BluetoothCommand> {
        match self.advertising {
            AdvertisingState::Active => {
                self.advertising = AdvertisingState::Idle;
                Some(BluetoothCommand::StopAdvertising)
            }
            AdvertisingState::Idle if self.controls_enabled() => {
                self.advertising = AdvertisingState::Starting;
                Some(BluetoothCommand::StartAdvertising)
            }
            _ => None,
        }
    }

    /// Ignored unless a start is pending; a stop is already queued otherwise
    pub fn on_advertising_started(&mut self) {
        if self.advertising == AdvertisingState::Starting {
            self.advertising = AdvertisingState::Active;
        }
    }

    /// A pending start is settled only by its own started/failed outcome
    pub fn on_advertising_stopped(&mut self) {
        if self.advertising == AdvertisingState::Active {
            self.advertising = AdvertisingState::Idle;
        }
    }

    pub fn on_advertising_failed(&mut self) {
        self.advertising = AdvertisingState::Idle;
    }

    /// Ignored when the scan was already stopped from the UI
    pub fn on_scan_started(&mut self) {
        if self.scanning {
            self.scan_active = true;
        }
    }

    pub fn on_scan_stopped(&mut self) {
        self.scan_active = false;
    }

    pub fn on_scan_failed(&mut self) {
        self.stop_scanning();
    }

    fn stop_scanning(&mut self) {
        self.scanning = false;
        self.scan_active = false;
    }

    pub fn on_screen_change(&mut self, from: Screen, to: Screen) -> Vec<BluetoothCommand> {
        let mut commands = Vec::new();
        if from == to {
            return commands;
        }

        if from == Screen::Advertise && self.is_advertising() {
            self.advertising = AdvertisingState::Idle;
            commands.push(BluetoothCommand::StopAdvertising);
        }
        if from == Screen::Scan && self.scanning {
            self.stop_scanning();
            commands.push(BluetoothCommand::StopScan);
        }
        if to == Screen::Scan && self.controls_enabled() && !self.scanning {
            self.scanning = true;
            commands.push(BluetoothCommand::StartScan);
        }
        commands
    }

    /// Commands needed to release the radio when the app shuts down
    pub fn shutdown(&mut self) -> Vec<BluetoothCommand> {
        let mut commands = Vec::new();
        if self.is_advertising() {
            self.advertising = AdvertisingState::Idle;
            commands.push(BluetoothCommand::StopAdvertising);
        }
        if self.scanning {
            self.stop_scanning();
            commands.push(BluetoothCommand::StopScan);
        }
        commands
    }

    /// Late watcher callbacks after a stop must not repopulate the list
    pub fn accepts_scan_results(&self) -> bool {
        self.scanning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_session() -> RadioSession {
        let mut session = RadioSession::new();
        session.on_permissions(PermissionStatus::Granted);
        session.on_adapter_state(AdapterState::On, Screen::Advertise);
        session
    }

    #[test]
    fn test_controls_need_access_and_power() {
        let mut session = RadioSession::new();
        assert!(!session.controls_enabled());

        session.on_adapter_state(AdapterState::On, Screen::Advertise);
        assert!(!session.controls_enabled());

        session.on_permissions(PermissionStatus::Granted);
        assert!(session.controls_enabled());

        session.on_adapter_state(AdapterState::Off, Screen::Advertise);
        assert!(!session.controls_enabled());
    }

    #[test]
    fn test_toggle_cycle() {
        let mut session = ready_session();

        assert_eq!(
            session.toggle_advertising(),
            Some(BluetoothCommand::StartAdvertising)
        );
        assert_eq!(session.advertising, AdvertisingState::Starting);

        // Pressing again before the platform confirms does nothing
        assert_eq!(session.toggle_advertising(), None);

        session.on_advertising_started();
        assert_eq!(
            session.toggle_advertising(),
            Some(BluetoothCommand::StopAdvertising)
        );
        assert_eq!(session.advertising, AdvertisingState::Idle);
    }

    #[test]
    fn test_toggle_ignored_when_adapter_off() {
        let mut session = RadioSession::new();
        session.on_permissions(PermissionStatus::Granted);
        session.on_adapter_state(AdapterState::Off, Screen::Advertise);
        assert_eq!(session.toggle_advertising(), None);
        assert_eq!(session.advertising, AdvertisingState::Idle);
    }

    #[test]
    fn test_failed_start_returns_to_idle() {
        let mut session = ready_session();
        session.toggle_advertising();
        session.on_advertising_failed();
        assert!(!session.is_advertising());
    }

    #[test]
    fn test_stale_stop_does_not_cancel_pending_start() {
        let mut session = ready_session();
        session.toggle_advertising();
        session.on_advertising_started();
        session.toggle_advertising();
        session.toggle_advertising();
        assert_eq!(session.advertising, AdvertisingState::Starting);

        // Confirmation of the earlier stop arrives late
        session.on_advertising_stopped();
        assert_eq!(session.advertising, AdvertisingState::Starting);

        session.on_advertising_started();
        session.on_advertising_stopped();
        assert_eq!(session.advertising, AdvertisingState::Idle);
    }

    #[test]
    fn test_adapter_off_stops_everything() {
        let mut session = ready_session();
        session.toggle_advertising();
        session.on_advertising_started();
        session.on_screen_change(Screen::Settings, Screen::Scan);
        assert!(session.scanning);

        let commands = session.on_adapter_state(AdapterState::Off, Screen::Advertise);
        assert_eq!(
            commands,
            vec![BluetoothCommand::StopAdvertising, BluetoothCommand::StopScan]
        );
        assert!(!session.is_advertising());
        assert!(!session.scanning);
    }

    #[test]
    fn test_adapter_off_while_idle_sends_nothing() {
        let mut session = ready_session();
        assert!(session
            .on_adapter_state(AdapterState::Off, Screen::Advertise)
            .is_empty());
    }

    #[test]
    fn test_leaving_advertise_screen_stops_advertising_and_starts_scan() {
        let mut session = ready_session();
        session.toggle_advertising();
        session.on_advertising_started();

        let commands = session.on_screen_change(Screen::Advertise, Screen::Scan);
        assert_eq!(
            commands,
            vec![BluetoothCommand::StopAdvertising, BluetoothCommand::StartScan]
        );
        assert!(session.accepts_scan_results());
    }

    #[test]
    fn test_leaving_scan_screen_stops_scan() {
        let mut session = ready_session();
        session.on_screen_change(Screen::Advertise, Screen::Scan);

        let commands = session.on_screen_change(Screen::Scan, Screen::Advertise);
        assert_eq!(commands, vec![BluetoothCommand::StopScan]);
        assert!(!session.accepts_scan_results());
    }

    #[test]
    fn test_scan_not_started_without_access() {
        let mut session = RadioSession::new();
        session.on_adapter_state(AdapterState::On, Screen::Advertise);
        session.on_permissions(PermissionStatus::Denied);
        assert!(session
            .on_screen_change(Screen::Advertise, Screen::Scan)
            .is_empty());
    }

    #[test]
    fn test_shutdown_releases_radio() {
        let mut session = ready_session();
        session.toggle_advertising();
        assert_eq!(session.shutdown(), vec![BluetoothCommand::StopAdvertising]);
        assert!(session.shutdown().is_empty());
    }

    #[test]
    fn test_scan_indicator_follows_worker() {
        let mut session = ready_session();
        session.on_screen_change(Screen::Advertise, Screen::Scan);
        assert!(session.scanning);
        assert!(!session.scan_active);

        session.on_scan_started();
        assert!(session.scan_active);

        session.on_screen_change(Screen::Scan, Screen::Advertise);
        assert!(!session.scan_active);

        // Confirmation of the abandoned scan arrives after the stop
        session.on_scan_started();
        assert!(!session.scan_active);
        session.on_scan_stopped();
        assert!(!session.scan_active);
    }

    #[test]
    fn test_power_returning_on_scan_screen_resumes_scan() {
        let mut session = ready_session();
        session.on_screen_change(Screen::Advertise, Screen::Scan);
        session.on_scan_started();

        assert_eq!(
            session.on_adapter_state(AdapterState::Off, Screen::Scan),
            vec![BluetoothCommand::StopScan]
        );
        assert!(!session.scan_active);

        assert_eq!(
            session.on_adapter_state(AdapterState::On, Screen::Scan),
            vec![BluetoothCommand::StartScan]
        );
        assert!(session.accepts_scan_results());
    }

    #[test]
    fn test_power_returning_elsewhere_starts_nothing() {
        let mut session = ready_session();
        session.on_adapter_state(AdapterState::Off, Screen::Advertise);
        assert!(session
            .on_adapter_state(AdapterState::On, Screen::Advertise)
            .is_empty());
        assert!(!session.scanning);
    }
}
