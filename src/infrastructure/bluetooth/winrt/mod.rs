//! WinRT backend
//!
//! Adapter state comes from `Windows.Devices.Radios`, advertising from
//! `BluetoothLEAdvertisementPublisher` and scanning from
//! `BluetoothLEAdvertisementWatcher`.

mod advertiser;
mod radio;
mod scanner;

use crate::domain::models::{AdapterInfo, AppEvent, PermissionStatus};
use crate::infrastructure::bluetooth::{
    backend::BleBackend,
    error::BluetoothError,
    protocol::{AdvertisementConfig, ScanConfig},
};
use advertiser::BleAdvertiser;
use radio::RadioMonitor;
use scanner::BleScanner;
use tokio::sync::mpsc;
use uuid::Uuid;
use windows::core::GUID;

pub struct WinRtBackend {
    radio: RadioMonitor,
    advertiser: BleAdvertiser,
    scanner: BleScanner,
}

impl WinRtBackend {
    pub fn new(event_sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            radio: RadioMonitor::new(event_sender.clone()),
            advertiser: BleAdvertiser::new(event_sender.clone()),
            scanner: BleScanner::new(event_sender),
        }
    }
}

impl BleBackend for WinRtBackend {
    async fn request_access(&mut self) -> Result<PermissionStatus, BluetoothError> {
        RadioMonitor::request_access().await
    }

    async fn adapter_info(&mut self) -> Result<AdapterInfo, BluetoothError> {
        self.radio.info().await
    }

    async fn watch_adapter(&mut self) -> Result<(), BluetoothError> {
        self.radio.watch().await
    }

    async fn power_on(&mut self) -> Result<(), BluetoothError> {
        self.radio.power_on().await
    }

    fn start_advertising(&mut self, config: &AdvertisementConfig) -> Result<(), BluetoothError> {
        self.advertiser.start(config)
    }

    fn stop_advertising(&mut self) -> Result<(), BluetoothError> {
        self.advertiser.stop()
    }

    fn is_advertising(&self) -> bool {
        self.advertiser.is_advertising()
    }

    fn start_scan(&mut self, config: &ScanConfig) -> Result<(), BluetoothError> {
        self.scanner.start(config)
    }

    fn stop_scan(&mut self) -> Result<(), BluetoothError> {
        self.scanner.stop()
    }

    fn is_scanning(&self) -> bool {
        self.scanner.is_scanning()
    }
}

fn to_guid(uuid: &Uuid) -> GUID {
    GUID::from_u128(uuid.as_u128())
}

fn from_guid(guid: &GUID) -> Uuid {
    Uuid::from_u128(guid.to_u128())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::bluetooth::protocol::{parse_uuid, DEFAULT_SERVICE_UUID};

    #[test]
    fn test_guid_conversion() {
        let uuid = parse_uuid(DEFAULT_SERVICE_UUID).unwrap();
        let guid = to_guid(&uuid);
        assert_eq!(guid.data1, 0x0000_1101);
        assert_eq!(guid.data4, [0x80, 0x00, 0x00, 0x80, 0x5F, 0x9B, 0x34, 0xFB]);
        assert_eq!(from_guid(&guid), uuid);
    }
}
