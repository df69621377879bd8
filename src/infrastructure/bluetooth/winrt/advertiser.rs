//! BLE advertisement publisher

use crate::domain::models::AppEvent;
use crate::infrastructure::bluetooth::error::BluetoothError;
use crate::infrastructure::bluetooth::protocol::AdvertisementConfig;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use windows::core::{Interface, HSTRING};
use windows::Devices::Bluetooth::Advertisement::{
    BluetoothLEAdvertisement, BluetoothLEAdvertisementPublisher,
    BluetoothLEAdvertisementPublisherStatus,
    BluetoothLEAdvertisementPublisherStatusChangedEventArgs,
};
use windows::Foundation::{IReference, PropertyValue, TypedEventHandler};

pub struct BleAdvertiser {
    /// Active publisher and its status handler token
    publisher: Option<(BluetoothLEAdvertisementPublisher, i64)>,
    event_sender: mpsc::UnboundedSender<AppEvent>,
}

impl BleAdvertiser {
    pub fn new(event_sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            publisher: None,
            event_sender,
        }
    }

    pub fn start(&mut self, config: &AdvertisementConfig) -> Result<(), BluetoothError> {
        self.stop()?;

        let advertisement = BluetoothLEAdvertisement::new()?;
        advertisement
            .ServiceUuids()?
            .Append(super::to_guid(&config.service_uuid))?;

        if let Some(name) = &config.local_name {
            // Some Windows builds reserve the local name for the OS
            if let Err(e) = advertisement.SetLocalName(&HSTRING::from(name.as_str())) {
                warn!("Local name rejected, advertising without it: {}", e);
            }
        }

        let publisher = BluetoothLEAdvertisementPublisher::Create(&advertisement)?;

        let power: IReference<i16> = PropertyValue::CreateInt16(config.tx_power_dbm)?.cast()?;
        if let Err(e) = publisher.SetPreferredTransmitPowerLevelInDBm(&power) {
            warn!("Preferred TX power not supported: {}", e);
        }
        if config.include_tx_power {
            if let Err(e) = publisher.SetIncludeTransmitPowerLevel(true) {
                warn!("Cannot include TX power in advertisement: {}", e);
            }
        }

        let sender = self.event_sender.clone();
        let handler = TypedEventHandler::new(
            move |_: windows::core::Ref<BluetoothLEAdvertisementPublisher>,
                  args: windows::core::Ref<BluetoothLEAdvertisementPublisherStatusChangedEventArgs>| {
                if let Some(args) = args.as_ref() {
                    let status = args.Status()?;
                    debug!("Publisher status: {:?}", status);
                    if status == BluetoothLEAdvertisementPublisherStatus::Started {
                        info!("Advertising started successfully");
                        let _ = sender.send(AppEvent::AdvertisingStarted);
                    } else if status == BluetoothLEAdvertisementPublisherStatus::Aborted {
                        let reason = args.Error()?;
                        error!("Advertising aborted: {:?}", reason);
                        let _ = sender.send(AppEvent::AdvertisingFailed(format!(
                            "Advertising aborted by the system ({:?})",
                            reason
                        )));
                    }
                }
                Ok(())
            },
        );
        let token = publisher.StatusChanged(&handler)?;

        publisher.Start()?;
        self.publisher = Some((publisher, token));
        Ok(())
    }

    /// Stop publishing; our own stop is not reported back as a status event
    pub fn stop(&mut self) -> Result<(), BluetoothError> {
        if let Some((publisher, token)) = self.publisher.take() {
            info!("Stopping advertisement publisher...");
            let _ = publisher.RemoveStatusChanged(token);
            publisher.Stop()?;
        }
        Ok(())
    }

    pub fn is_advertising(&self) -> bool {
        self.publisher.is_some()
    }
}

impl Drop for BleAdvertiser {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
