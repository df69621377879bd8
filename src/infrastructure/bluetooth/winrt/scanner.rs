//! BLE Scanner Module
//!
//! Reports every advertisement heard as a `DeviceFound` event.

use crate::domain::models::{AppEvent, ScannedDevice};
use crate::infrastructure::bluetooth::error::BluetoothError;
use crate::infrastructure::bluetooth::protocol::ScanConfig;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{error, info, trace};
use windows::Devices::Bluetooth::Advertisement::{
    BluetoothLEAdvertisementReceivedEventArgs, BluetoothLEAdvertisementWatcher,
    BluetoothLEAdvertisementWatcherStoppedEventArgs, BluetoothLEScanningMode,
};
use windows::Devices::Bluetooth::BluetoothError as WinBluetoothError;
use windows::Foundation::TypedEventHandler;

/// BLE Scanner backed by an advertisement watcher
pub struct BleScanner {
    watcher: Option<BluetoothLEAdvertisementWatcher>,
    event_sender: mpsc::UnboundedSender<AppEvent>,
}

impl BleScanner {
    /// Create a new scanner
    pub fn new(event_sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            watcher: None,
            event_sender,
        }
    }

    /// Start a continuous scan with no service filter
    pub fn start(&mut self, config: &ScanConfig) -> Result<(), BluetoothError> {
        // Stop any existing scan
        self.stop()?;

        let watcher = BluetoothLEAdvertisementWatcher::new()?;
        watcher.SetScanningMode(if config.active {
            BluetoothLEScanningMode::Active
        } else {
            BluetoothLEScanningMode::Passive
        })?;

        let sender = self.event_sender.clone();
        let received = TypedEventHandler::new(
            move |_: windows::core::Ref<BluetoothLEAdvertisementWatcher>,
                  args: windows::core::Ref<BluetoothLEAdvertisementReceivedEventArgs>| {
                if let Some(args) = args.as_ref() {
                    let adv = args.Advertisement()?;
                    let name = adv.LocalName()?.to_string();

                    let uuids = adv.ServiceUuids()?;
                    let mut service_uuids = Vec::with_capacity(uuids.Size()? as usize);
                    for i in 0..uuids.Size()? {
                        service_uuids.push(super::from_guid(&uuids.GetAt(i)?));
                    }

                    let tx_power = args
                        .TransmitPowerLevelInDBm()
                        .and_then(|power| power.Value())
                        .ok();

                    let device = ScannedDevice {
                        address: args.BluetoothAddress()?,
                        name: if name.is_empty() { None } else { Some(name) },
                        signal_strength: args.RawSignalStrengthInDBm()?,
                        service_uuids,
                        tx_power,
                        last_seen: Instant::now(),
                    };
                    trace!("Advertisement from {}", device.address_string());

                    let _ = sender.send(AppEvent::DeviceFound(device));
                }
                Ok(())
            },
        );

        let sender = self.event_sender.clone();
        let stopped = TypedEventHandler::new(
            move |_: windows::core::Ref<BluetoothLEAdvertisementWatcher>,
                  args: windows::core::Ref<BluetoothLEAdvertisementWatcherStoppedEventArgs>| {
                if let Some(args) = args.as_ref() {
                    let reason = args.Error()?;
                    if reason != WinBluetoothError::Success {
                        error!("Scan stopped by the system: {:?}", reason);
                        let _ = sender.send(AppEvent::ScanFailed(format!(
                            "Scan stopped by the system ({:?})",
                            reason
                        )));
                    }
                }
                Ok(())
            },
        );

        watcher.Received(&received)?;
        watcher.Stopped(&stopped)?;
        watcher.Start()?;
        self.watcher = Some(watcher);

        Ok(())
    }

    /// Stop scanning
    pub fn stop(&mut self) -> Result<(), BluetoothError> {
        if let Some(watcher) = self.watcher.take() {
            info!("Stopping BLE scan...");
            watcher.Stop()?;
        }
        Ok(())
    }

    /// Check if currently scanning
    pub fn is_scanning(&self) -> bool {
        self.watcher.is_some()
    }
}

impl Drop for BleScanner {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
