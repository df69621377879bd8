//! Bluetooth Module
//!
//! Advertising, scanning and adapter state for the app.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  BluetoothCommand   ┌──────────────────────────┐
//! │  UI (egui)   │ ──────────────────▶ │ worker: BluetoothService │
//! │              │ ◀────────────────── │   guards + reporting     │
//! └──────────────┘      AppEvent       └────────────┬─────────────┘
//!                                                   │ BleBackend
//!                              ┌────────────────────┼──────────────┐
//!                              ▼                    ▼              ▼
//!                        ┌───────────┐      ┌────────────┐  ┌───────────┐
//!                        │  Radio    │      │ Advertiser │  │  Scanner  │
//!                        └───────────┘      └────────────┘  └───────────┘
//! ```
//!
//! ## Modules
//!
//! - [`protocol`] - Advertised payload, TX power levels and UUID parsing
//! - [`backend`] - Platform backend trait
//! - [`service`] - Guards and event reporting on top of a backend
//! - [`worker`] - Dedicated thread running the service
//! - `winrt` - Windows backend (radio, publisher, watcher)

pub mod backend;
pub mod error;
pub mod protocol;
pub mod service;
pub mod worker;

#[cfg(windows)]
mod winrt;

#[cfg(windows)]
pub use winrt::WinRtBackend as PlatformBackend;

#[cfg(not(windows))]
pub use backend::UnsupportedBackend as PlatformBackend;
