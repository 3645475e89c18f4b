//! Helpers shared by the scan backends.

use crate::structs::{RawBand, RawChannel, RawNetwork, SecurityCapability};
use crate::{Error, Result};
use std::path::Path;

pub const SYSFS_NET: &str = "/sys/class/net";

/// Which information element a key-management suite was advertised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyProtocol {
    /// Legacy WPA IE.
    Wpa,
    /// RSN IE (WPA2 / WPA3).
    Rsn,
}

/// Records the capabilities implied by one key-management suite.
///
/// Accepts the spellings of `iw` (`PSK`, `SAE`, `IEEE 802.1X`,
/// `802.1X/SUITE-B-192`), wpa_cli flags (`PSK+SAE`, `EAP-SUITE-B-192`) and
/// the wpa_supplicant D-Bus `KeyMgmt` values (`wpa-psk`, `sae`, `wpa-eap`).
/// Unknown suites such as OWE add nothing.
pub fn add_key_mgmt(network: &mut RawNetwork, protocol: KeyProtocol, suite: &str) {
    let suite = suite.to_ascii_uppercase();

    if suite.contains("SUITE-B") || suite.contains("SUITE_B") {
        network.add_capability(SecurityCapability::Wpa3Enterprise);
    }
    if suite.contains("SAE") {
        network.add_capability(SecurityCapability::Wpa3Personal);
    }

    let personal = suite.contains("PSK");
    let enterprise = suite.contains("EAP") || suite.contains("802.1X") || suite.contains("8021X");
    match protocol {
        KeyProtocol::Rsn => {
            if personal {
                network.add_capability(SecurityCapability::Wpa2Personal);
            }
            if enterprise {
                network.add_capability(SecurityCapability::Wpa2Enterprise);
            }
        }
        KeyProtocol::Wpa => {
            if personal {
                network.add_capability(SecurityCapability::WpaPersonal);
            }
            if enterprise {
                network.add_capability(SecurityCapability::WpaEnterprise);
            }
        }
    }
}

/// 将 IEEE 802.11 频率（MHz）转换为信道描述
/// 参考：https://en.wikipedia.org/wiki/List_of_WLAN_channels
pub fn channel_from_frequency(freq_mhz: u32) -> Option<RawChannel> {
    let (number, band) = match freq_mhz {
        // 2.4 GHz: channels 1-13, 14 is Japan only.
        2412..=2472 => ((freq_mhz - 2407) / 5, RawBand::Band2GHz),
        2484 => (14, RawBand::Band2GHz),
        // 5 GHz: channels 32-177.
        5150..=5895 => ((freq_mhz - 5000) / 5, RawBand::Band5GHz),
        // 6 GHz (Wi-Fi 6E): channel 2 sits off the regular grid.
        5935 => (2, RawBand::Band6GHz),
        5955..=7125 => ((freq_mhz - 5950) / 5, RawBand::Band6GHz),
        // 60 GHz (802.11ad/ay)
        58320..=70200 => ((freq_mhz - 56160) / 2160, RawBand::Unrecognized),
        _ => return None,
    };
    Some(RawChannel { number, band })
}

/// Maps a bare channel number to a descriptor when no frequency is known.
///
/// Channel numbers 1-14 are ambiguous between 2.4 GHz and 6 GHz; without a
/// frequency they are taken as 2.4 GHz.
pub fn channel_from_number(channel: u32) -> Option<RawChannel> {
    let band = match channel {
        1..=14 => RawBand::Band2GHz,
        32..=177 => RawBand::Band5GHz,
        _ => return None,
    };
    Some(RawChannel { number: channel, band })
}

/// Treats empty and all-NUL SSIDs (how hidden networks appear) as absent.
pub fn ssid_from_bytes(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() || bytes.iter().all(|b| *b == 0) {
        return None;
    }
    Some(String::from_utf8_lossy(bytes).to_string())
}

/// 将 `\xHH` 转义序列反转义回原始字节。
/// wpa_cli 和 iw 都会这样输出 SSID 中的非 ASCII 字节（例如汉字）。
pub fn unescape_ssid(s: &str) -> Vec<u8> {
    fn hex_val(b: u8) -> Option<u8> {
        match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(10 + b - b'a'),
            b'A'..=b'F' => Some(10 + b - b'A'),
            _ => None,
        }
    }

    let bs = s.as_bytes();
    let mut out = Vec::with_capacity(bs.len());
    let mut i = 0;
    while i < bs.len() {
        if bs[i] != b'\\' || i + 1 >= bs.len() {
            out.push(bs[i]);
            i += 1;
            continue;
        }
        match bs[i + 1] {
            b'x' | b'X' if i + 3 < bs.len() => {
                if let (Some(hi), Some(lo)) = (hex_val(bs[i + 2]), hex_val(bs[i + 3])) {
                    out.push((hi << 4) | lo);
                    i += 4;
                } else {
                    // 格式不正确，按字面量保留反斜杠
                    out.push(b'\\');
                    i += 1;
                }
            }
            b'\\' => {
                out.push(b'\\');
                i += 2;
            }
            _ => {
                out.push(b'\\');
                i += 1;
            }
        }
    }
    out
}

/// Picks the wireless interface to scan with.
///
/// A configured name must exist and be wireless. Without one, the first
/// wireless interface in name order is used.
pub async fn resolve_interface(configured: Option<&str>) -> Result<String> {
    resolve_interface_in(Path::new(SYSFS_NET), configured).await
}

pub async fn resolve_interface_in(sysfs_net: &Path, configured: Option<&str>) -> Result<String> {
    if let Some(name) = configured {
        if is_wireless(sysfs_net, name).await {
            return Ok(name.to_string());
        }
        return Err(Error::NoInterface(format!("'{}' is not a wireless interface", name)));
    }

    let mut entries = tokio::fs::read_dir(sysfs_net)
        .await
        .map_err(|e| Error::NoInterface(format!("cannot list {}: {}", sysfs_net.display(), e)))?;

    let mut candidates = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().to_string();
        if is_wireless(sysfs_net, &name).await {
            candidates.push(name);
        }
    }
    candidates.sort();

    match candidates.into_iter().next() {
        Some(name) => {
            tracing::debug!("Using wireless interface {}", name);
            Ok(name)
        }
        None => Err(Error::NoInterface(format!(
            "no wireless interface under {}",
            sysfs_net.display()
        ))),
    }
}

async fn is_wireless(sysfs_net: &Path, name: &str) -> bool {
    let dir = sysfs_net.join(name);
    for marker in ["wireless", "phy80211"] {
        if tokio::fs::try_exists(dir.join(marker)).await.unwrap_or(false) {
            return true;
        }
    }
    false
}
