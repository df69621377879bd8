//! Adapter power state and radio access

use crate::domain::models::{AdapterInfo, AdapterState, AppEvent, PermissionStatus};
use crate::infrastructure::bluetooth::error::BluetoothError;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use windows::core::IInspectable;
use windows::Devices::Bluetooth::BluetoothAdapter;
use windows::Devices::Radios::{Radio, RadioAccessStatus, RadioState};
use windows::Foundation::TypedEventHandler;

pub struct RadioMonitor {
    adapter: Option<BluetoothAdapter>,
    radio: Option<Radio>,
    state_token: Option<i64>,
    event_sender: mpsc::UnboundedSender<AppEvent>,
}

impl RadioMonitor {
    pub fn new(event_sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            adapter: None,
            radio: None,
            state_token: None,
            event_sender,
        }
    }

    pub async fn request_access() -> Result<PermissionStatus, BluetoothError> {
        let status = Radio::RequestAccessAsync()?.await?;
        debug!("Radio access status: {:?}", status);
        Ok(if status == RadioAccessStatus::Allowed {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        })
    }

    /// Resolve the default adapter and its radio once
    async fn load(&mut self) -> Result<(&BluetoothAdapter, &Radio), BluetoothError> {
        if self.adapter.is_none() || self.radio.is_none() {
            // GetDefaultAsync yields a null adapter when none is present
            let adapter = BluetoothAdapter::GetDefaultAsync()?
                .await
                .map_err(|_| BluetoothError::NoAdapter)?;
            let radio = adapter.GetRadioAsync()?.await?;
            info!(
                "Using Bluetooth adapter {:012X}",
                adapter.BluetoothAddress().unwrap_or_default()
            );
            self.adapter = Some(adapter);
            self.radio = Some(radio);
        }

        match (&self.adapter, &self.radio) {
            (Some(adapter), Some(radio)) => Ok((adapter, radio)),
            _ => Err(BluetoothError::NoAdapter),
        }
    }

    pub async fn info(&mut self) -> Result<AdapterInfo, BluetoothError> {
        let (adapter, radio) = match self.load().await {
            Ok(pair) => pair,
            Err(BluetoothError::NoAdapter) => return Ok(AdapterInfo::default()),
            Err(e) => return Err(e),
        };

        if !adapter.IsLowEnergySupported()? {
            return Ok(AdapterInfo::default());
        }

        Ok(AdapterInfo {
            state: map_state(radio.State()?),
            peripheral_role_supported: adapter.IsPeripheralRoleSupported()?,
        })
    }

    pub async fn watch(&mut self) -> Result<(), BluetoothError> {
        if self.state_token.is_some() {
            return Ok(());
        }

        let sender = self.event_sender.clone();
        let (_, radio) = self.load().await?;

        let handler = TypedEventHandler::new(
            move |radio: windows::core::Ref<Radio>, _: windows::core::Ref<IInspectable>| {
                if let Some(radio) = radio.as_ref() {
                    let state = map_state(radio.State()?);
                    info!("Adapter state changed: {:?}", state);
                    let _ = sender.send(AppEvent::AdapterState(state));
                }
                Ok(())
            },
        );

        let token = radio.StateChanged(&handler)?;
        self.state_token = Some(token);
        Ok(())
    }

    pub async fn power_on(&mut self) -> Result<(), BluetoothError> {
        let (_, radio) = self.load().await?;
        let status = radio.SetStateAsync(RadioState::On)?.await?;
        if status != RadioAccessStatus::Allowed {
            warn!("Radio power change refused: {:?}", status);
            return Err(BluetoothError::AccessDenied);
        }
        Ok(())
    }
}

impl Drop for RadioMonitor {
    fn drop(&mut self) {
        if let (Some(radio), Some(token)) = (&self.radio, self.state_token.take()) {
            let _ = radio.RemoveStateChanged(token);
        }
    }
}

fn map_state(state: RadioState) -> AdapterState {
    match state {
        RadioState::On => AdapterState::On,
        RadioState::Off | RadioState::Disabled => AdapterState::Off,
        _ => AdapterState::Unavailable,
    }
}
