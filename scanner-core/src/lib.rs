//! Core library for the WiFi scanner.
//! This crate defines the domain records and their classifiers, the scan
//! backends (platform adapters), the JSON emitter, the terminal table and
//! the web server that serves the browser dashboard.

pub mod backends;
pub mod classify;
pub mod config;
pub mod emit;
pub mod factory;
pub mod frontends;
pub mod normalize;
pub mod presentation;
pub mod structs;
pub mod traits;
pub mod web_server;

// Define a shared Error and Result type for the entire crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not find any WiFi interfaces: {0}")]
    NoInterface(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("scan failed: {0}")]
    ScanFailed(String),

    #[error("Scan did not finish within {0} seconds")]
    ScanTimeout(u64),

    #[error("JSON encoding failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "backend_wpa_dbus")]
    #[error("D-Bus error: {0}")]
    Dbus(#[from] zbus::Error),

    #[cfg(feature = "backend_wpa_dbus")]
    #[error("zvariant error: {0}")]
    Zvariant(#[from] zbus::zvariant::Error),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),
}

/// A specialized `Result` type for this crate's operations.
pub type Result<T> = std::result::Result<T, Error>;
