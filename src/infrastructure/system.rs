//! Hooks into the host OS outside the Bluetooth API

use tracing::warn;

/// Open the system Bluetooth settings page
pub fn open_bluetooth_settings() {
    #[cfg(windows)]
    {
        tracing::info!("Opening Windows Bluetooth settings");
        if let Err(e) = std::process::Command::new("explorer")
            .arg("ms-settings:bluetooth")
            .spawn()
        {
            warn!("Failed to open Bluetooth settings: {}", e);
        }
    }

    #[cfg(not(windows))]
    warn!("No Bluetooth settings page on this platform");
}
