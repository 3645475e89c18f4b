//! wpa_supplicant over D-Bus.
//!
//! The BSS property mapping is plain data and always built; the bus client
//! needs the `backend_wpa_dbus` feature.

mod bss;
pub use bss::BssProperties;

#[cfg(feature = "backend_wpa_dbus")]
mod client;
#[cfg(feature = "backend_wpa_dbus")]
pub use client::WpaDbusScanner;
