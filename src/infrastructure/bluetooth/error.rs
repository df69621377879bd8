use thiserror::Error;

#[derive(Debug, Error)]
pub enum BluetoothError {
    #[error("Bluetooth LE is not supported on this platform")]
    Unsupported,
    #[error("No Bluetooth adapter found")]
    NoAdapter,
    #[error("Bluetooth access denied")]
    AccessDenied,
    #[error("Bluetooth is turned off")]
    AdapterOff,
    #[error("Adapter cannot advertise (peripheral role not supported)")]
    PeripheralRoleUnsupported,
    #[error("Invalid service UUID: {0}")]
    InvalidUuid(String),
    #[cfg(windows)]
    #[error("Windows Bluetooth API error: {0}")]
    Platform(#[from] windows::core::Error),
}
