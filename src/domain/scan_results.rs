//! Scan result list
//!
//! Keeps discovered devices in first-seen order, one entry per address.

use crate::domain::models::ScannedDevice;

/// Outcome of merging a sighting into the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanUpdate {
    Inserted(usize),
    Changed(usize),
}

#[derive(Debug, Default)]
pub struct ScanResults {
    devices: Vec<ScannedDevice>,
}

impl ScanResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new device or replace the entry with the same address in place.
    ///
    /// A repeat sighting without a name keeps the name seen earlier.
    pub fn upsert(&mut self, mut device: ScannedDevice) -> ScanUpdate {
        match self
            .devices
            .iter()
            .position(|d| d.address == device.address)
        {
            Some(index) => {
                if device.name.is_none() {
                    device.name = self.devices[index].name.take();
                }
                self.devices[index] = device;
                ScanUpdate::Changed(index)
            }
            None => {
                self.devices.push(device);
                ScanUpdate::Inserted(self.devices.len() - 1)
            }
        }
    }

    pub fn get(&self, address: u64) -> Option<&ScannedDevice> {
        self.devices.iter().find(|d| d.address == address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScannedDevice> {
        self.devices.iter()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn clear(&mut self) {
        self.devices.clear();
    }
}
