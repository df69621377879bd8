use std::time::Instant;
use uuid::Uuid;

/// A device seen during the current scan session.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedDevice {
    /// 48-bit Bluetooth address, the unique key of the scan list
    pub address: u64,
    pub name: Option<String>,
    pub signal_strength: i16,
    /// Service UUIDs carried by the last advertisement
    pub service_uuids: Vec<Uuid>,
    pub tx_power: Option<i16>,
    pub last_seen: Instant,
}

impl ScannedDevice {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed")
    }

    /// Address formatted as `AA:BB:CC:DD:EE:FF`
    pub fn address_string(&self) -> String {
        format_address(self.address)
    }
}

pub fn format_address(address: u64) -> String {
    let bytes = address.to_be_bytes();
    bytes[2..]
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// Power state of the local adapter as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdapterState {
    #[default]
    Unavailable,
    Off,
    On,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdapterInfo {
    pub state: AdapterState,
    pub peripheral_role_supported: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionStatus {
    #[default]
    Unknown,
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdvertisingState {
    #[default]
    Idle,
    /// Start requested, waiting for the platform to confirm
    Starting,
    Active,
}

/// Events flowing from the Bluetooth worker (and platform callbacks) to the UI
#[derive(Debug, Clone)]
pub enum AppEvent {
    Permissions(PermissionStatus),
    AdapterState(AdapterState),
    AdvertisingStarted,
    AdvertisingStopped,
    AdvertisingFailed(String),
    ScanStarted,
    ScanStopped,
    ScanFailed(String),
    DeviceFound(ScannedDevice),
    LogMessage(StatusMessage),
}

/// Commands sent from the UI to the Bluetooth worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BluetoothCommand {
    RequestAccess,
    PowerOn,
    StartAdvertising,
    StopAdvertising,
    StartScan,
    StopScan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Advertise,
    Scan,
    Settings,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub severity: MessageSeverity,
}

impl StatusMessage {
    pub fn new(message: impl Into<String>, severity: MessageSeverity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSeverity {
    Info,
    Success,
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        assert_eq!(format_address(0x0000_A1B2_C3D4_E5F6), "A1:B2:C3:D4:E5:F6");
        assert_eq!(format_address(0x01), "00:00:00:00:00:01");
    }

    #[test]
    fn test_unnamed_device() {
        let device = ScannedDevice {
            address: 1,
            name: None,
            signal_strength: -40,
            service_uuids: Vec::new(),
            tx_power: None,
            last_seen: Instant::now(),
        };
        assert_eq!(device.display_name(), "Unnamed");
    }
}
