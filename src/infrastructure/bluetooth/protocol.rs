//! Advertising payload definitions
//!
//! Platform-neutral description of what gets advertised and how scans run.

use crate::domain::settings::{AdvertiseSettings, ScanSettings, TxPowerLevel};
use crate::infrastructure::bluetooth::error::BluetoothError;
use uuid::Uuid;

/// Service UUID advertised by default (Serial Port Profile)
pub const DEFAULT_SERVICE_UUID: &str = "00001101-0000-1000-8000-00805F9B34FB";

/// Bluetooth Base UUID, used to expand 16-bit short UUIDs
const BASE_UUID: u128 = 0x0000_0000_0000_1000_8000_0080_5F9B_34FB;

/// Parse a full UUID string or a 16/32-bit short form ("1101", "0x1101")
pub fn parse_uuid(uuid_str: &str) -> Result<Uuid, BluetoothError> {
    let trimmed = uuid_str.trim();
    let short = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if short.len() == 4 || short.len() == 8 {
        let value = u32::from_str_radix(short, 16)
            .map_err(|_| BluetoothError::InvalidUuid(uuid_str.to_string()))?;
        return Ok(Uuid::from_u128(BASE_UUID | (u128::from(value) << 96)));
    }

    Uuid::parse_str(trimmed).map_err(|_| BluetoothError::InvalidUuid(uuid_str.to_string()))
}

/// Transmit power in dBm for each level
pub fn tx_power_dbm(level: TxPowerLevel) -> i16 {
    match level {
        TxPowerLevel::UltraLow => -21,
        TxPowerLevel::Low => -15,
        TxPowerLevel::Medium => -7,
        TxPowerLevel::High => 1,
    }
}

/// Everything a backend needs to publish one advertisement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvertisementConfig {
    pub service_uuid: Uuid,
    pub local_name: Option<String>,
    pub tx_power_dbm: i16,
    pub include_tx_power: bool,
}

impl AdvertisementConfig {
    pub fn from_settings(settings: &AdvertiseSettings) -> Result<Self, BluetoothError> {
        Ok(Self {
            service_uuid: parse_uuid(&settings.service_uuid)?,
            local_name: settings.local_name(),
            tx_power_dbm: tx_power_dbm(settings.tx_power),
            include_tx_power: settings.include_tx_power,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    pub active: bool,
}

impl From<&ScanSettings> for ScanConfig {
    fn from(settings: &ScanSettings) -> Self {
        Self {
            active: settings.active_scanning,
        }
    }
}
