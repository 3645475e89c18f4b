use serde::{Deserialize, Serialize};
use std::fmt;

/// SSID 缺失时使用的占位符（通常是缺少定位/扫描权限导致的）
pub const REDACTED_SSID: &str = "[Redacted/Hidden]";

/// Human-readable security label of a network.
///
/// The string form only exists at the serialization boundary; everything
/// inside the crate works with the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Security {
    #[serde(rename = "WPA3 Personal")]
    Wpa3Personal,
    #[serde(rename = "WPA3 Enterprise")]
    Wpa3Enterprise,
    #[serde(rename = "WPA2 Personal")]
    Wpa2Personal,
    #[serde(rename = "WPA2 Enterprise")]
    Wpa2Enterprise,
    #[serde(rename = "WPA Personal")]
    WpaPersonal,
    #[serde(rename = "WPA Enterprise")]
    WpaEnterprise,
    #[serde(rename = "WEP")]
    Wep,
    #[serde(rename = "None")]
    Open,
}

impl Security {
    pub fn as_str(&self) -> &'static str {
        match self {
            Security::Wpa3Personal => "WPA3 Personal",
            Security::Wpa3Enterprise => "WPA3 Enterprise",
            Security::Wpa2Personal => "WPA2 Personal",
            Security::Wpa2Enterprise => "WPA2 Enterprise",
            Security::WpaPersonal => "WPA Personal",
            Security::WpaEnterprise => "WPA Enterprise",
            Security::Wep => "WEP",
            Security::Open => "None",
        }
    }
}

impl fmt::Display for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Frequency band label of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "2.4 GHz")]
    Band2GHz,
    #[serde(rename = "5 GHz")]
    Band5GHz,
    #[serde(rename = "6 GHz")]
    Band6GHz,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Band2GHz => "2.4 GHz",
            Band::Band5GHz => "5 GHz",
            Band::Band6GHz => "6 GHz",
            Band::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 表示扫描到的单个 Wi-Fi 网络（对外的 JSON 结构）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRecord {
    pub ssid: String,
    /// RSSI in dBm, serialized as `rssi`.
    #[serde(rename = "rssi")]
    pub signal_strength: i32,
    pub security: Security,
    /// 0 when the backend reported no channel.
    pub channel: u32,
    pub band: Band,
}

// ============= 后端原始数据 =============

/// A security scheme a network advertises support for.
///
/// A network usually advertises several of these at once (WPA2/WPA3
/// transition mode, WPA/WPA2 mixed mode...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityCapability {
    Wpa3Personal,
    Wpa3Enterprise,
    Wpa2Personal,
    Wpa2Enterprise,
    WpaPersonal,
    WpaEnterprise,
    Wep,
}

/// Band tag of a channel as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawBand {
    Band2GHz,
    Band5GHz,
    Band6GHz,
    /// A band we have no label for, e.g. 60 GHz (802.11ad).
    Unrecognized,
}

/// Channel descriptor as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawChannel {
    pub number: u32,
    pub band: RawBand,
}

/// A single scan result before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawNetwork {
    /// `None` (or empty) when the SSID is hidden or redacted.
    pub ssid: Option<String>,
    pub rssi: i32,
    pub capabilities: Vec<SecurityCapability>,
    pub channel: Option<RawChannel>,
}

impl RawNetwork {
    pub fn supports(&self, capability: SecurityCapability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Records a capability once, keeping the first-seen order.
    pub fn add_capability(&mut self, capability: SecurityCapability) {
        if !self.supports(capability) {
            self.capabilities.push(capability);
        }
    }
}
