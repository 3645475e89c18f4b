use crate::backends::utils::{add_key_mgmt, channel_from_frequency, ssid_from_bytes, KeyProtocol};
use crate::structs::{RawNetwork, SecurityCapability};

/// The `fi.w1.wpa_supplicant1.BSS` properties a scan result is built from.
#[derive(Debug, Clone, Default)]
pub struct BssProperties {
    pub ssid: Vec<u8>,
    /// dBm
    pub signal: i16,
    /// MHz
    pub frequency: u16,
    pub privacy: bool,
    /// `KeyMgmt` of the `WPA` dict, empty when the BSS has no WPA element.
    pub wpa_key_mgmt: Vec<String>,
    /// `KeyMgmt` of the `RSN` dict, empty when the BSS has no RSN element.
    pub rsn_key_mgmt: Vec<String>,
}

impl BssProperties {
    pub fn into_raw(self) -> RawNetwork {
        let mut network = RawNetwork {
            ssid: ssid_from_bytes(&self.ssid),
            rssi: i32::from(self.signal),
            capabilities: Vec::new(),
            channel: channel_from_frequency(u32::from(self.frequency)),
        };
        for suite in &self.wpa_key_mgmt {
            add_key_mgmt(&mut network, KeyProtocol::Wpa, suite);
        }
        for suite in &self.rsn_key_mgmt {
            add_key_mgmt(&mut network, KeyProtocol::Rsn, suite);
        }

        // OWE 等未知套件不产生能力，但有 WPA/RSN 元素就不是 WEP
        let has_wpa_ie = !self.wpa_key_mgmt.is_empty() || !self.rsn_key_mgmt.is_empty();
        if self.privacy && !has_wpa_ie {
            network.add_capability(SecurityCapability::Wep);
        }
        network
    }
}
