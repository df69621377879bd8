//! Bluetooth Service Module
//!
//! Applies the app's guards (access, adapter power, peripheral support,
//! single advertising session) before delegating to the platform backend,
//! and reports every outcome to the UI.

use crate::domain::models::{
    AdapterState, AppEvent, BluetoothCommand, MessageSeverity, PermissionStatus, StatusMessage,
};
use crate::domain::settings::{AdvertiseSettings, ScanSettings, SettingsService};
use crate::infrastructure::bluetooth::{
    backend::BleBackend,
    error::BluetoothError,
    protocol::{AdvertisementConfig, ScanConfig},
};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Coordinates all BLE operations on the worker thread
pub struct BluetoothService<B: BleBackend> {
    backend: B,
    event_sender: mpsc::UnboundedSender<AppEvent>,
    settings: Arc<Mutex<SettingsService>>,
    permissions: PermissionStatus,
}

impl<B: BleBackend> BluetoothService<B> {
    pub fn new(
        backend: B,
        event_sender: mpsc::UnboundedSender<AppEvent>,
        settings: Arc<Mutex<SettingsService>>,
    ) -> Self {
        Self {
            backend,
            event_sender,
            settings,
            permissions: PermissionStatus::Unknown,
        }
    }

    pub async fn handle(&mut self, command: BluetoothCommand) {
        match command {
            BluetoothCommand::RequestAccess => self.request_access().await,
            BluetoothCommand::PowerOn => {
                if let Err(e) = self.power_on().await {
                    error!("Failed to turn Bluetooth on: {}", e);
                    self.send_log(
                        format!("Could not turn Bluetooth on: {}", e),
                        MessageSeverity::Error,
                    );
                }
            }
            BluetoothCommand::StartAdvertising => {
                if let Err(e) = self.start_advertising().await {
                    error!("Advertising failed: {}", e);
                    self.send(AppEvent::AdvertisingFailed(e.to_string()));
                    self.send_log(
                        format!("Advertising failed: {}", e),
                        MessageSeverity::Error,
                    );
                }
            }
            BluetoothCommand::StopAdvertising => self.stop_advertising(),
            BluetoothCommand::StartScan => {
                if let Err(e) = self.start_scan().await {
                    error!("Scan failed: {}", e);
                    self.send(AppEvent::ScanFailed(e.to_string()));
                    self.send_log(format!("Scan failed: {}", e), MessageSeverity::Error);
                }
            }
            BluetoothCommand::StopScan => self.stop_scan(),
        }
    }

    async fn request_access(&mut self) {
        let status = match self.backend.request_access().await {
            Ok(status) => status,
            Err(e) => {
                error!("Bluetooth access request failed: {}", e);
                self.send_log(e.to_string(), MessageSeverity::Error);
                PermissionStatus::Denied
            }
        };

        info!("Bluetooth access: {:?}", status);
        self.permissions = status;
        self.send(AppEvent::Permissions(status));

        if status != PermissionStatus::Granted {
            self.send(AppEvent::AdapterState(AdapterState::Unavailable));
            if let Ok(info) = self.backend.adapter_info().await {
                if info.state != AdapterState::Unavailable {
                    self.send_log(
                        "Bluetooth access denied. Allow radio access in system settings.",
                        MessageSeverity::Warning,
                    );
                }
            }
            return;
        }

        if let Err(e) = self.backend.watch_adapter().await {
            warn!("Could not subscribe to adapter state changes: {}", e);
        }

        let state = match self.backend.adapter_info().await {
            Ok(info) => info.state,
            Err(e) => {
                error!("Failed to query adapter: {}", e);
                AdapterState::Unavailable
            }
        };
        info!("Adapter state: {:?}", state);
        self.send(AppEvent::AdapterState(state));
    }

    /// Turn the radio on; the new state arrives through the adapter watcher
    async fn power_on(&mut self) -> Result<(), BluetoothError> {
        if self.permissions != PermissionStatus::Granted {
            return Ok(());
        }
        info!("Requesting Bluetooth radio power on");
        self.backend.power_on().await
    }

    async fn start_advertising(&mut self) -> Result<(), BluetoothError> {
        let adapter = self.backend.adapter_info().await?;
        if adapter.state != AdapterState::On {
            return Err(BluetoothError::AdapterOff);
        }
        if !adapter.peripheral_role_supported {
            return Err(BluetoothError::PeripheralRoleUnsupported);
        }

        let config = AdvertisementConfig::from_settings(&self.advertise_settings())?;

        if self.backend.is_advertising() {
            self.backend.stop_advertising()?;
        }

        info!(
            "Starting advertising: service {} name {:?}",
            config.service_uuid, config.local_name
        );
        self.backend.start_advertising(&config)
    }

    fn stop_advertising(&mut self) {
        if let Err(e) = self.backend.stop_advertising() {
            warn!("Failed to stop advertising cleanly: {}", e);
        }
        info!("Advertising stopped");
        self.send(AppEvent::AdvertisingStopped);
    }

    async fn start_scan(&mut self) -> Result<(), BluetoothError> {
        let adapter = self.backend.adapter_info().await?;
        if adapter.state != AdapterState::On {
            return Err(BluetoothError::AdapterOff);
        }

        let config = ScanConfig::from(&self.scan_settings());
        if self.backend.is_scanning() {
            self.backend.stop_scan()?;
        }

        info!("Starting BLE scan (active: {})", config.active);
        self.backend.start_scan(&config)?;
        self.send(AppEvent::ScanStarted);
        self.send_log("Scanning for nearby devices...", MessageSeverity::Info);
        Ok(())
    }

    fn stop_scan(&mut self) {
        if let Err(e) = self.backend.stop_scan() {
            warn!("Failed to stop scan cleanly: {}", e);
        }
        info!("Scan stopped");
        self.send(AppEvent::ScanStopped);
    }

    /// Release any running session before the worker exits
    pub fn shutdown(&mut self) {
        if self.backend.is_advertising() {
            self.stop_advertising();
        }
        if self.backend.is_scanning() {
            self.stop_scan();
        }
    }

    fn advertise_settings(&self) -> AdvertiseSettings {
        self.settings
            .lock()
            .map(|s| s.get().advertise.clone())
            .unwrap_or_default()
    }

    fn scan_settings(&self) -> ScanSettings {
        self.settings
            .lock()
            .map(|s| s.get().scan.clone())
            .unwrap_or_default()
    }

    fn send(&self, event: AppEvent) {
        let _ = self.event_sender.send(event);
    }

    fn send_log(&self, message: impl Into<String>, severity: MessageSeverity) {
        self.send(AppEvent::LogMessage(StatusMessage::new(message, severity)));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::models::AdapterInfo;

    /// Backend double that records calls and confirms advertising immediately
    pub(crate) struct FakeBackend {
        pub access: PermissionStatus,
        pub adapter: AdapterInfo,
        pub advertising: bool,
        pub scanning: bool,
        pub calls: Arc<Mutex<Vec<String>>>,
        events: mpsc::UnboundedSender<AppEvent>,
    }

    impl FakeBackend {
        pub(crate) fn new(events: mpsc::UnboundedSender<AppEvent>) -> Self {
            Self {
                access: PermissionStatus::Granted,
                adapter: AdapterInfo {
                    state: AdapterState::On,
                    peripheral_role_supported: true,
                },
                advertising: false,
                scanning: false,
                calls: Arc::new(Mutex::new(Vec::new())),
                events,
            }
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }
    }

    impl BleBackend for FakeBackend {
        async fn request_access(&mut self) -> Result<PermissionStatus, BluetoothError> {
            self.record("request_access");
            Ok(self.access)
        }

        async fn adapter_info(&mut self) -> Result<AdapterInfo, BluetoothError> {
            Ok(self.adapter)
        }

        async fn watch_adapter(&mut self) -> Result<(), BluetoothError> {
            self.record("watch_adapter");
            Ok(())
        }

        async fn power_on(&mut self) -> Result<(), BluetoothError> {
            self.record("power_on");
            self.adapter.state = AdapterState::On;
            let _ = self.events.send(AppEvent::AdapterState(AdapterState::On));
            Ok(())
        }

        fn start_advertising(
            &mut self,
            config: &AdvertisementConfig,
        ) -> Result<(), BluetoothError> {
            self.record(format!("start_advertising {}", config.service_uuid));
            self.advertising = true;
            let _ = self.events.send(AppEvent::AdvertisingStarted);
            Ok(())
        }

        fn stop_advertising(&mut self) -> Result<(), BluetoothError> {
            self.record("stop_advertising");
            self.advertising = false;
            Ok(())
        }

        fn is_advertising(&self) -> bool {
            self.advertising
        }

        fn start_scan(&mut self, config: &ScanConfig) -> Result<(), BluetoothError> {
            self.record(format!("start_scan active={}", config.active));
            self.scanning = true;
            Ok(())
        }

        fn stop_scan(&mut self) -> Result<(), BluetoothError> {
            self.record("stop_scan");
            self.scanning = false;
            Ok(())
        }

        fn is_scanning(&self) -> bool {
            self.scanning
        }
    }

    pub(crate) fn test_settings() -> (tempfile::TempDir, Arc<Mutex<SettingsService>>) {
        let dir = tempfile::tempdir().unwrap();
        let service = SettingsService::with_path(dir.path().join("settings.json"));
        (dir, Arc::new(Mutex::new(service)))
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn setup() -> (
        tempfile::TempDir,
        BluetoothService<FakeBackend>,
        Arc<Mutex<Vec<String>>>,
        mpsc::UnboundedReceiver<AppEvent>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let backend = FakeBackend::new(tx.clone());
        let calls = backend.calls.clone();
        let (dir, settings) = test_settings();
        (dir, BluetoothService::new(backend, tx, settings), calls, rx)
    }

    #[tokio::test]
    async fn test_granted_access_publishes_adapter_state() {
        let (_dir, mut service, calls, mut rx) = setup();
        service.handle(BluetoothCommand::RequestAccess).await;

        let events = drain(&mut rx);
        assert!(matches!(
            events[0],
            AppEvent::Permissions(PermissionStatus::Granted)
        ));
        assert!(events
            .iter()
            .any(|e| matches!(e, AppEvent::AdapterState(AdapterState::On))));
        assert!(calls.lock().unwrap().contains(&"watch_adapter".to_string()));
    }

    #[tokio::test]
    async fn test_denied_access_skips_watch() {
        let (_dir, mut service, calls, mut rx) = setup();
        service.backend.access = PermissionStatus::Denied;
        service.handle(BluetoothCommand::RequestAccess).await;

        let events = drain(&mut rx);
        assert!(events
            .iter()
            .any(|e| matches!(e, AppEvent::Permissions(PermissionStatus::Denied))));
        assert!(!calls.lock().unwrap().contains(&"watch_adapter".to_string()));
    }

    #[tokio::test]
    async fn test_power_on_requires_access() {
        let (_dir, mut service, calls, _rx) = setup();
        service.handle(BluetoothCommand::PowerOn).await;
        assert!(calls.lock().unwrap().is_empty());

        service.handle(BluetoothCommand::RequestAccess).await;
        service.handle(BluetoothCommand::PowerOn).await;
        assert!(calls.lock().unwrap().contains(&"power_on".to_string()));
    }

    #[tokio::test]
    async fn test_start_advertising_uses_configured_uuid() {
        let (_dir, mut service, calls, mut rx) = setup();
        service.handle(BluetoothCommand::StartAdvertising).await;

        assert_eq!(
            calls.lock().unwrap().as_slice(),
            ["start_advertising 00001101-0000-1000-8000-00805f9b34fb"]
        );
        assert!(drain(&mut rx)
            .iter()
            .any(|e| matches!(e, AppEvent::AdvertisingStarted)));
    }

    #[tokio::test]
    async fn test_advertising_refused_when_adapter_off() {
        let (_dir, mut service, calls, mut rx) = setup();
        service.backend.adapter.state = AdapterState::Off;
        service.handle(BluetoothCommand::StartAdvertising).await;

        assert!(calls.lock().unwrap().is_empty());
        assert!(drain(&mut rx)
            .iter()
            .any(|e| matches!(e, AppEvent::AdvertisingFailed(_))));
    }

    #[tokio::test]
    async fn test_advertising_refused_without_peripheral_role() {
        let (_dir, mut service, calls, mut rx) = setup();
        service.backend.adapter.peripheral_role_supported = false;
        service.handle(BluetoothCommand::StartAdvertising).await;

        assert!(calls.lock().unwrap().is_empty());
        let events = drain(&mut rx);
        assert!(events.iter().any(|e| matches!(
            e,
            AppEvent::AdvertisingFailed(msg) if msg.contains("peripheral role")
        )));
    }

    #[tokio::test]
    async fn test_single_advertising_session() {
        let (_dir, mut service, calls, _rx) = setup();
        service.handle(BluetoothCommand::StartAdvertising).await;
        service.handle(BluetoothCommand::StartAdvertising).await;

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1], "stop_advertising");
    }

    #[tokio::test]
    async fn test_invalid_uuid_reports_failure() {
        let (_dir, mut service, calls, mut rx) = setup();
        service
            .settings
            .lock()
            .unwrap()
            .get_mut()
            .advertise
            .service_uuid = "bogus".to_string();
        service.handle(BluetoothCommand::StartAdvertising).await;

        assert!(calls.lock().unwrap().is_empty());
        assert!(drain(&mut rx)
            .iter()
            .any(|e| matches!(e, AppEvent::AdvertisingFailed(_))));
    }

    #[tokio::test]
    async fn test_stop_advertising_always_reports_stopped() {
        let (_dir, mut service, _calls, mut rx) = setup();
        service.backend.adapter.state = AdapterState::Off;
        service.handle(BluetoothCommand::StopAdvertising).await;

        assert!(drain(&mut rx)
            .iter()
            .any(|e| matches!(e, AppEvent::AdvertisingStopped)));
    }

    #[tokio::test]
    async fn test_scan_start_and_stop() {
        let (_dir, mut service, calls, mut rx) = setup();
        service.settings.lock().unwrap().get_mut().scan.active_scanning = false;

        service.handle(BluetoothCommand::StartScan).await;
        service.handle(BluetoothCommand::StopScan).await;

        assert_eq!(
            calls.lock().unwrap().as_slice(),
            ["start_scan active=false", "stop_scan"]
        );
        let events = drain(&mut rx);
        assert!(events.iter().any(|e| matches!(e, AppEvent::ScanStarted)));
        assert!(events.iter().any(|e| matches!(e, AppEvent::ScanStopped)));
    }

    #[tokio::test]
    async fn test_scan_refused_when_adapter_off() {
        let (_dir, mut service, _calls, mut rx) = setup();
        service.backend.adapter.state = AdapterState::Off;
        service.handle(BluetoothCommand::StartScan).await;

        assert!(drain(&mut rx)
            .iter()
            .any(|e| matches!(e, AppEvent::ScanFailed(_))));
    }

    #[tokio::test]
    async fn test_shutdown_stops_running_sessions() {
        let (_dir, mut service, calls, _rx) = setup();
        service.handle(BluetoothCommand::StartAdvertising).await;
        service.handle(BluetoothCommand::StartScan).await;
        service.shutdown();

        let calls = calls.lock().unwrap();
        assert!(calls.contains(&"stop_advertising".to_string()));
        assert!(calls.contains(&"stop_scan".to_string()));
        assert!(!service.backend.is_advertising());
    }

    #[cfg(not(windows))]
    #[tokio::test]
    async fn test_unsupported_platform_reports_every_failure() {
        use crate::infrastructure::bluetooth::backend::UnsupportedBackend;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let (_dir, settings) = test_settings();
        let mut service = BluetoothService::new(UnsupportedBackend::new(tx.clone()), tx, settings);

        service.handle(BluetoothCommand::RequestAccess).await;
        let events = drain(&mut rx);
        assert!(events
            .iter()
            .any(|e| matches!(e, AppEvent::Permissions(PermissionStatus::Denied))));
        assert!(events
            .iter()
            .any(|e| matches!(e, AppEvent::AdapterState(AdapterState::Unavailable))));
        assert!(events.iter().any(|e| matches!(
            e,
            AppEvent::LogMessage(msg) if msg.severity == MessageSeverity::Error
        )));

        service.handle(BluetoothCommand::StartAdvertising).await;
        service.handle(BluetoothCommand::StartScan).await;
        let events = drain(&mut rx);
        assert!(events
            .iter()
            .any(|e| matches!(e, AppEvent::AdvertisingFailed(_))));
        assert!(events.iter().any(|e| matches!(e, AppEvent::ScanFailed(_))));

        service.shutdown();
        assert!(rx.try_recv().is_err());
    }
}
