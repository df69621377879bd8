//! Bluetooth worker thread
//!
//! All platform Bluetooth calls run here, on a dedicated thread driving a
//! current-thread tokio runtime, so the UI thread never blocks on the radio.

use crate::domain::models::{AppEvent, BluetoothCommand};
use crate::domain::settings::SettingsService;
use crate::infrastructure::bluetooth::{
    backend::BleBackend, service::BluetoothService, PlatformBackend,
};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use tokio::sync::mpsc;
use tracing::{error, info};

/// Drain commands until every sender is gone, then release the radio
pub async fn run<B: BleBackend>(
    mut service: BluetoothService<B>,
    mut commands: mpsc::UnboundedReceiver<BluetoothCommand>,
) {
    while let Some(command) = commands.recv().await {
        tracing::debug!("Bluetooth command: {:?}", command);
        service.handle(command).await;
    }
    service.shutdown();
    info!("Bluetooth worker finished");
}

/// Start the worker with the platform backend
pub fn spawn(
    event_sender: mpsc::UnboundedSender<AppEvent>,
    settings: Arc<Mutex<SettingsService>>,
) -> std::io::Result<(mpsc::UnboundedSender<BluetoothCommand>, JoinHandle<()>)> {
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let handle = std::thread::Builder::new()
        .name("bluetooth".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to create tokio runtime for Bluetooth: {}", e);
                    return;
                }
            };

            rt.block_on(async move {
                let backend = PlatformBackend::new(event_sender.clone());
                let service = BluetoothService::new(backend, event_sender, settings);
                run(service, command_rx).await;
            });
        })?;

    Ok((command_tx, handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::bluetooth::service::tests::{test_settings, FakeBackend};

    #[tokio::test]
    async fn test_worker_processes_commands_in_order_and_cleans_up() {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let backend = FakeBackend::new(event_tx.clone());
        let calls = backend.calls.clone();
        let (_dir, settings) = test_settings();
        let service = BluetoothService::new(backend, event_tx, settings);

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        command_tx.send(BluetoothCommand::RequestAccess).unwrap();
        command_tx.send(BluetoothCommand::StartAdvertising).unwrap();
        command_tx.send(BluetoothCommand::StartScan).unwrap();
        drop(command_tx);

        run(service, command_rx).await;

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0], "request_access");
        assert!(calls[2].starts_with("start_advertising"));
        assert!(calls[3].starts_with("start_scan"));
        // Channel closed: both sessions released
        assert!(calls.ends_with(&["stop_advertising".to_string(), "stop_scan".to_string()]));

        let mut saw_stopped = false;
        while let Ok(event) = event_rx.try_recv() {
            if matches!(event, AppEvent::AdvertisingStopped) {
                saw_stopped = true;
            }
        }
        assert!(saw_stopped);
    }
}
