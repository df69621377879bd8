//! Platform backend seam
//!
//! [`BleBackend`] is the set of OS Bluetooth primitives the service relies on.
//! Asynchronous outcomes (advertising confirmed or aborted, devices found,
//! adapter power changes) are pushed by the backend as `AppEvent`s on the
//! sender it was created with.

use crate::domain::models::{AdapterInfo, PermissionStatus};
use crate::infrastructure::bluetooth::error::BluetoothError;
use crate::infrastructure::bluetooth::protocol::{AdvertisementConfig, ScanConfig};

// Only driven from the worker's current-thread runtime, so no Send bound
#[allow(async_fn_in_trait)]
pub trait BleBackend {
    /// Ask the OS for permission to use the Bluetooth radio
    async fn request_access(&mut self) -> Result<PermissionStatus, BluetoothError>;

    async fn adapter_info(&mut self) -> Result<AdapterInfo, BluetoothError>;

    /// Subscribe to adapter power changes, reported as `AppEvent::AdapterState`
    async fn watch_adapter(&mut self) -> Result<(), BluetoothError>;

    async fn power_on(&mut self) -> Result<(), BluetoothError>;

    /// Begin publishing; success is confirmed later with `AppEvent::AdvertisingStarted`
    fn start_advertising(&mut self, config: &AdvertisementConfig) -> Result<(), BluetoothError>;

    fn stop_advertising(&mut self) -> Result<(), BluetoothError>;

    fn is_advertising(&self) -> bool;

    /// Begin a continuous scan; each sighting arrives as `AppEvent::DeviceFound`
    fn start_scan(&mut self, config: &ScanConfig) -> Result<(), BluetoothError>;

    fn stop_scan(&mut self) -> Result<(), BluetoothError>;

    fn is_scanning(&self) -> bool;
}

/// Backend for targets without a supported Bluetooth LE API
#[cfg(not(windows))]
pub struct UnsupportedBackend {
    _event_sender: tokio::sync::mpsc::UnboundedSender<crate::domain::models::AppEvent>,
}

#[cfg(not(windows))]
impl UnsupportedBackend {
    pub fn new(
        event_sender: tokio::sync::mpsc::UnboundedSender<crate::domain::models::AppEvent>,
    ) -> Self {
        Self {
            _event_sender: event_sender,
        }
    }
}

#[cfg(not(windows))]
impl BleBackend for UnsupportedBackend {
    async fn request_access(&mut self) -> Result<PermissionStatus, BluetoothError> {
        Err(BluetoothError::Unsupported)
    }

    async fn adapter_info(&mut self) -> Result<AdapterInfo, BluetoothError> {
        Ok(AdapterInfo::default())
    }

    async fn watch_adapter(&mut self) -> Result<(), BluetoothError> {
        Err(BluetoothError::Unsupported)
    }

    async fn power_on(&mut self) -> Result<(), BluetoothError> {
        Err(BluetoothError::Unsupported)
    }

    fn start_advertising(&mut self, _config: &AdvertisementConfig) -> Result<(), BluetoothError> {
        Err(BluetoothError::Unsupported)
    }

    fn stop_advertising(&mut self) -> Result<(), BluetoothError> {
        Ok(())
    }

    fn is_advertising(&self) -> bool {
        false
    }

    fn start_scan(&mut self, _config: &ScanConfig) -> Result<(), BluetoothError> {
        Err(BluetoothError::Unsupported)
    }

    fn stop_scan(&mut self) -> Result<(), BluetoothError> {
        Ok(())
    }

    fn is_scanning(&self) -> bool {
        false
    }
}
