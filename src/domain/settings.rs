use crate::infrastructure::bluetooth::protocol;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_level")]
    pub level: String, // "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_true")]
    pub file_logging_enabled: bool,
    #[serde(default = "default_true")]
    pub console_logging_enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_prefix")]
    pub file_name_prefix: String,
    #[serde(default = "default_true")]
    pub show_file_line: bool,
    #[serde(default = "default_false")]
    pub show_thread_ids: bool,
    #[serde(default = "default_true")]
    pub show_target: bool,
    #[serde(default = "default_true")]
    pub ansi_colors: bool,
    #[serde(default = "default_rotation")]
    pub rotation: String, // "daily", "hourly", "minutely", "never"
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            file_logging_enabled: default_true(),
            console_logging_enabled: default_true(),
            log_dir: default_log_dir(),
            file_name_prefix: default_prefix(),
            show_file_line: default_true(),
            show_thread_ids: default_false(),
            show_target: default_true(),
            ansi_colors: default_true(),
            rotation: default_rotation(),
        }
    }
}

/// Requested advertising transmit power
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxPowerLevel {
    UltraLow,
    Low,
    Medium,
    High,
}

impl TxPowerLevel {
    pub const ALL: [TxPowerLevel; 4] = [Self::UltraLow, Self::Low, Self::Medium, Self::High];

    pub fn label(&self) -> &'static str {
        match self {
            Self::UltraLow => "Ultra low",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvertiseSettings {
    #[serde(default = "default_service_uuid")]
    pub service_uuid: String,
    #[serde(default = "default_true")]
    pub include_device_name: bool,
    /// Overrides the host name in the advertised local name
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default = "default_tx_power")]
    pub tx_power: TxPowerLevel,
    #[serde(default = "default_false")]
    pub include_tx_power: bool,
}

impl Default for AdvertiseSettings {
    fn default() -> Self {
        Self {
            service_uuid: default_service_uuid(),
            include_device_name: default_true(),
            device_name: None,
            tx_power: default_tx_power(),
            include_tx_power: default_false(),
        }
    }
}

impl AdvertiseSettings {
    /// Name placed in the advertisement, if names are included at all
    pub fn local_name(&self) -> Option<String> {
        if !self.include_device_name {
            return None;
        }
        self.device_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .or_else(host_name)
    }
}

fn host_name() -> Option<String> {
    ["COMPUTERNAME", "HOSTNAME"]
        .iter()
        .find_map(|key| std::env::var(key).ok())
        .filter(|name| !name.is_empty())
        .or_else(|| Some("BLE Demo".to_string()))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSettings {
    /// Request scan responses, which usually carry the device name
    #[serde(default = "default_true")]
    pub active_scanning: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            active_scanning: default_true(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_log_dir() -> String {
    "logs".to_string()
}
fn default_prefix() -> String {
    "ble_advertise_scan".to_string()
}
fn default_rotation() -> String {
    "daily".to_string()
}
fn default_service_uuid() -> String {
    protocol::DEFAULT_SERVICE_UUID.to_string()
}
fn default_tx_power() -> TxPowerLevel {
    TxPowerLevel::High
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub advertise: AdvertiseSettings,
    #[serde(default)]
    pub scan: ScanSettings,

    // Logging Settings
    #[serde(default)]
    pub log_settings: LogSettings,
}

pub struct SettingsService {
    settings: Settings,
    settings_path: PathBuf,
}

impl SettingsService {
    pub fn new() -> anyhow::Result<Self> {
        let settings_path = Self::get_settings_path()?;
        Ok(Self::with_path(settings_path))
    }

    /// Load settings from `settings_path`, falling back to defaults
    pub fn with_path(settings_path: PathBuf) -> Self {
        let settings = Self::load_from_file(&settings_path).unwrap_or_default();
        Self {
            settings,
            settings_path,
        }
    }

    fn get_settings_path() -> anyhow::Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        path.push("BleAdvertiseScan");
        fs::create_dir_all(&path)?;
        path.push("settings.json");
        Ok(path)
    }

    fn load_from_file(path: &Path) -> anyhow::Result<Settings> {
        let contents = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents)?;
        Ok(settings)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.settings_path, json)?;
        Ok(())
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    pub fn get_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn path(&self) -> &Path {
        &self.settings_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(
            settings.advertise.service_uuid,
            "00001101-0000-1000-8000-00805F9B34FB"
        );
        assert!(settings.advertise.include_device_name);
        assert_eq!(settings.advertise.tx_power, TxPowerLevel::High);
        assert!(settings.scan.active_scanning);
        assert_eq!(settings.log_settings.level, "info");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "advertise": { "tx_power": "Low" } }"#).unwrap();
        assert_eq!(settings.advertise.tx_power, TxPowerLevel::Low);
        assert!(settings.advertise.include_device_name);
        assert_eq!(settings.log_settings.rotation, "daily");
    }

    #[test]
    fn test_local_name() {
        let mut advertise = AdvertiseSettings {
            device_name: Some("Bench Beacon".to_string()),
            ..Default::default()
        };
        assert_eq!(advertise.local_name().as_deref(), Some("Bench Beacon"));

        advertise.device_name = Some("  ".to_string());
        assert!(advertise.local_name().is_some());

        advertise.include_device_name = false;
        assert_eq!(advertise.local_name(), None);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut service = SettingsService::with_path(path.clone());
        service.get_mut().advertise.device_name = Some("Lab".to_string());
        service.get_mut().scan.active_scanning = false;
        service.save().unwrap();

        let reloaded = SettingsService::with_path(path);
        assert_eq!(reloaded.get().advertise.device_name.as_deref(), Some("Lab"));
        assert!(!reloaded.get().scan.active_scanning);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let service = SettingsService::with_path(path);
        assert!(service.get().advertise.include_device_name);
    }
}
