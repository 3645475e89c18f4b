//! Scan backend that invokes `iw dev <iface> scan`.
//!
//! `iw` runs the radio scan synchronously and prints one `BSS` stanza per
//! access point. Triggering a scan needs `CAP_NET_ADMIN` (typically root).

use crate::backends::utils::{
    add_key_mgmt, channel_from_frequency, channel_from_number, resolve_interface, ssid_from_bytes, unescape_ssid,
    KeyProtocol,
};
use crate::structs::{RawNetwork, SecurityCapability};
use crate::traits::WifiScanner;
use crate::{Error, Result};
use async_trait::async_trait;
use tokio::process::Command;

#[derive(Debug, Clone, Default)]
pub struct IwScanner {
    interface: Option<String>,
}

impl IwScanner {
    pub fn new(interface: Option<String>) -> Self {
        Self { interface }
    }
}

#[async_trait]
impl WifiScanner for IwScanner {
    fn name(&self) -> &'static str {
        "iw"
    }

    async fn scan(&self) -> Result<Vec<RawNetwork>> {
        let iface = resolve_interface(self.interface.as_deref()).await?;

        tracing::debug!("Running iw dev {} scan", iface);
        let output = Command::new("iw")
            .arg("dev")
            .arg(&iface)
            .arg("scan")
            .output()
            .await
            .map_err(|e| Error::CommandFailed(format!("failed to run iw: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ScanFailed(format!(
                "iw exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_iw_scan_output(&stdout))
    }
}

/// The information element an indented line currently belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Other,
    Rsn,
    Wpa,
}

/// Accumulates the fields of one `BSS` stanza.
#[derive(Default)]
struct BssStanza {
    ssid: Option<String>,
    signal_dbm: Option<f64>,
    freq_mhz: Option<u32>,
    ds_channel: Option<u32>,
    privacy: bool,
    /// An RSN or WPA element was present, even one with unknown suites (OWE).
    has_wpa_ie: bool,
    network: RawNetwork,
}

impl BssStanza {
    /// `None` when the stanza carried no signal level.
    fn finish(mut self) -> Option<RawNetwork> {
        let Some(signal) = self.signal_dbm else {
            tracing::debug!("Skipping iw BSS without signal level (SSID {:?})", self.ssid);
            return None;
        };
        self.network.ssid = self.ssid;
        self.network.rssi = signal.round() as i32;
        self.network.channel = self
            .freq_mhz
            .and_then(channel_from_frequency)
            .or_else(|| self.ds_channel.and_then(channel_from_number));

        if self.privacy && !self.has_wpa_ie {
            self.network.add_capability(SecurityCapability::Wep);
        }
        Some(self.network)
    }
}

/// 解析 `iw dev <iface> scan` 的输出
///
/// 每个 stanza 以顶格的 `BSS aa:bb:cc:dd:ee:ff(on wlan0)` 开始，后面是缩进的字段。
pub fn parse_iw_scan_output(output: &str) -> Vec<RawNetwork> {
    let mut results = Vec::new();
    let mut current: Option<BssStanza> = None;
    let mut section = Section::Other;

    for line in output.lines() {
        if line.starts_with("BSS ") {
            results.extend(current.take().and_then(BssStanza::finish));
            current = Some(BssStanza::default());
            section = Section::Other;
            continue;
        }

        let Some(stanza) = current.as_mut() else {
            continue;
        };

        // One tab: a field of the stanza; deeper lines belong to the last IE.
        let depth = line.chars().take_while(|c| *c == '\t').count();
        let trimmed = line.trim();

        if depth <= 1 {
            section = Section::Other;
            if let Some(rest) = trimmed.strip_prefix("RSN:") {
                section = Section::Rsn;
                stanza.has_wpa_ie = true;
                apply_ie_line(stanza, section, rest.trim());
            } else if let Some(rest) = trimmed.strip_prefix("WPA:") {
                section = Section::Wpa;
                stanza.has_wpa_ie = true;
                apply_ie_line(stanza, section, rest.trim());
            } else if let Some(rest) = line.trim_start_matches('\t').strip_prefix("SSID:") {
                // 只去掉冒号后的一个分隔空格，SSID 本身的首尾空格要保留
                let raw = rest.strip_prefix(' ').unwrap_or(rest);
                stanza.ssid = ssid_from_bytes(&unescape_ssid(raw));
            } else if let Some(rest) = trimmed.strip_prefix("signal:") {
                stanza.signal_dbm = rest.split_whitespace().next().and_then(|s| s.parse().ok());
            } else if let Some(rest) = trimmed.strip_prefix("freq:") {
                // 新版本的 iw 会输出小数，如 "freq: 5180.0"
                stanza.freq_mhz = rest.trim().parse::<f64>().ok().map(|f| f as u32);
            } else if let Some(rest) = trimmed.strip_prefix("DS Parameter set: channel") {
                stanza.ds_channel = rest.trim().parse().ok();
            } else if let Some(rest) = trimmed.strip_prefix("capability:") {
                stanza.privacy = rest.split_whitespace().any(|w| w == "Privacy");
            }
        } else if section != Section::Other {
            apply_ie_line(stanza, section, trimmed);
        }
    }

    results.extend(current.take().and_then(BssStanza::finish));
    results
}

fn apply_ie_line(stanza: &mut BssStanza, section: Section, line: &str) {
    let protocol = match section {
        Section::Rsn => KeyProtocol::Rsn,
        Section::Wpa => KeyProtocol::Wpa,
        Section::Other => return,
    };
    let line = line.trim_start_matches('*').trim();
    if let Some(suites) = line.strip_prefix("Authentication suites:") {
        // "IEEE 802.1X" 中间有空格，先合并再按空格分割
        let suites = suites.replace("IEEE 802.1X", "IEEE-802.1X");
        for suite in suites.split_whitespace() {
            add_key_mgmt(&mut stanza.network, protocol, suite);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::RawBand;
    use SecurityCapability::*;

    const SAMPLE_IW_OUTPUT: &str = "\
BSS aa:bb:cc:dd:ee:ff(on wlan0)
\tTSF: 123456789 usec
\tfreq: 5180
\tbeacon interval: 100 TUs
\tcapability: ESS Privacy SpectrumMgmt (0x0111)
\tsignal: -52.00 dBm
\tSSID: HomeNetwork
\tRSN:\t * Version: 1
\t\t * Group cipher: CCMP
\t\t * Pairwise ciphers: CCMP
\t\t * Authentication suites: PSK SAE
\t\t * Capabilities: 1-PTKSA-RC 1-GTKSA-RC (0x0000)
BSS 11:22:33:44:55:66(on wlan0)
\tfreq: 2437
\tcapability: ESS Privacy ShortSlotTime (0x0411)
\tsignal: -71.00 dBm
\tSSID: Legacy
\tDS Parameter set: channel 6
\tWPA:\t * Version: 1
\t\t * Group cipher: TKIP
\t\t * Pairwise ciphers: TKIP
\t\t * Authentication suites: PSK
\tRSN:\t * Version: 1
\t\t * Authentication suites: IEEE 802.1X
BSS de:ad:be:ef:ca:fe(on wlan0) -- associated
\tfreq: 2462.0
\tcapability: ESS Privacy (0x0011)
\tsignal: -45.50 dBm
\tSSID: \\x00\\x00\\x00\\x00
\tDS Parameter set: channel 11
BSS 01:02:03:04:05:06(on wlan0)
\tfreq: 5745
\tcapability: ESS (0x0001)
\tsignal: -80.00 dBm
\tSSID: CoffeeShop
";

    #[test]
    fn parses_stanzas() {
        let nets = parse_iw_scan_output(SAMPLE_IW_OUTPUT);
        assert_eq!(nets.len(), 4);

        assert_eq!(nets[0].ssid.as_deref(), Some("HomeNetwork"));
        assert_eq!(nets[0].rssi, -52);
        assert_eq!(nets[0].channel.map(|c| (c.number, c.band)), Some((36, RawBand::Band5GHz)));
        assert_eq!(nets[0].capabilities, vec![Wpa2Personal, Wpa3Personal]);

        assert_eq!(nets[1].ssid.as_deref(), Some("Legacy"));
        assert_eq!(nets[1].capabilities, vec![WpaPersonal, Wpa2Enterprise]);
        assert_eq!(nets[1].channel.map(|c| c.number), Some(6));
    }

    #[test]
    fn privacy_without_wpa_is_wep() {
        let nets = parse_iw_scan_output(SAMPLE_IW_OUTPUT);
        assert_eq!(nets[2].capabilities, vec![Wep]);
        assert_eq!(nets[2].ssid, None);
        // -45.5 rounds away from zero
        assert_eq!(nets[2].rssi, -46);
        assert_eq!(nets[2].channel.map(|c| c.number), Some(11));
    }

    #[test]
    fn open_network_has_no_capabilities() {
        let nets = parse_iw_scan_output(SAMPLE_IW_OUTPUT);
        assert!(nets[3].capabilities.is_empty());
        assert_eq!(nets[3].channel.map(|c| c.band), Some(RawBand::Band5GHz));
    }

    #[test]
    fn ds_channel_used_without_frequency() {
        let output = "BSS aa:bb:cc:dd:ee:ff(on wlan0)\n\tsignal: -60.00 dBm\n\tDS Parameter set: channel 3\n";
        let nets = parse_iw_scan_output(output);
        assert_eq!(nets[0].channel.map(|c| (c.number, c.band)), Some((3, RawBand::Band2GHz)));
    }

    #[test]
    fn empty_output() {
        assert!(parse_iw_scan_output("").is_empty());
    }

    #[test]
    fn owe_with_privacy_is_not_wep() {
        let output = "\
BSS aa:bb:cc:dd:ee:ff(on wlan0)
\tfreq: 5180
\tcapability: ESS Privacy (0x0011)
\tsignal: -58.00 dBm
\tSSID: EnhancedOpen
\tRSN:\t * Version: 1
\t\t * Group cipher: CCMP
\t\t * Authentication suites: OWE
";
        let nets = parse_iw_scan_output(output);
        assert_eq!(nets.len(), 1);
        assert!(nets[0].capabilities.is_empty());
        assert_eq!(
            crate::classify::classify_security(&nets[0]),
            crate::structs::Security::Open
        );
    }

    #[test]
    fn stanza_without_signal_is_skipped() {
        let output = "\
BSS aa:bb:cc:dd:ee:ff(on wlan0)
\tfreq: 2412
\tSSID: NoSignal
BSS 11:22:33:44:55:66(on wlan0)
\tfreq: 2437
\tsignal: -70.00 dBm
\tSSID: Present
";
        let nets = parse_iw_scan_output(output);
        assert_eq!(nets.len(), 1);
        assert_eq!(nets[0].ssid.as_deref(), Some("Present"));
    }

    #[test]
    fn ssid_keeps_inner_padding() {
        let output = "BSS aa:bb:cc:dd:ee:ff(on wlan0)\n\tsignal: -60.00 dBm\n\tSSID:  spaced \n";
        let nets = parse_iw_scan_output(output);
        assert_eq!(nets[0].ssid.as_deref(), Some(" spaced "));
    }
}
