use crate::backends::utils::{
    add_key_mgmt, channel_from_frequency, resolve_interface, ssid_from_bytes, unescape_ssid, KeyProtocol,
};
use crate::structs::{RawNetwork, SecurityCapability};
use crate::traits::WifiScanner;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;

// 通过调用 wpa_cli 命令行工具实现的扫描后端，适用于由 wpa_supplicant 管理无线网卡的 Linux 系统

/// Scans through a running wpa_supplicant using `wpa_cli`.
///
/// `scan` only triggers the radio scan; the results are read with
/// `scan_results` after `settle` has passed.
#[derive(Debug, Clone)]
pub struct WpaCliScanner {
    interface: Option<String>,
    settle: Duration,
}

impl WpaCliScanner {
    pub fn new(interface: Option<String>, settle: Duration) -> Self {
        Self { interface, settle }
    }

    async fn wpa_cli(&self, iface: &str, cmd: &str) -> Result<String> {
        tracing::debug!("Running wpa_cli -i {} {}", iface, cmd);
        let output = Command::new("wpa_cli")
            .arg("-i")
            .arg(iface)
            .arg(cmd)
            .output()
            .await
            .map_err(|e| Error::CommandFailed(format!("failed to run wpa_cli: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ScanFailed(format!(
                "wpa_cli {} exited with {}: {}",
                cmd,
                output.status,
                if stderr.trim().is_empty() { stdout.trim() } else { stderr.trim() }
            )));
        }
        Ok(stdout)
    }
}

#[async_trait]
impl WifiScanner for WpaCliScanner {
    fn name(&self) -> &'static str {
        "wpa_cli"
    }

    async fn scan(&self) -> Result<Vec<RawNetwork>> {
        let iface = resolve_interface(self.interface.as_deref()).await?;

        let reply = self.wpa_cli(&iface, "scan").await?;
        if reply.trim() != "OK" {
            // e.g. FAIL-BUSY while another scan is running
            return Err(Error::ScanFailed(format!("wpa_cli scan replied '{}'", reply.trim())));
        }

        tracing::debug!("Waiting {:?} for scan results...", self.settle);
        tokio::time::sleep(self.settle).await;

        let results = self.wpa_cli(&iface, "scan_results").await?;
        Ok(parse_scan_results(&results))
    }
}

/// 解析 scan_results 的输出
/// 格式: bssid / frequency / signal level / flags / ssid
pub fn parse_scan_results(output: &str) -> Vec<RawNetwork> {
    let mut networks = Vec::new();
    for line in output.lines() {
        let parts: Vec<&str> = line.split('\t').collect();
        // 表头和异常行的列数不足，直接跳过
        if parts.len() < 4 {
            continue;
        }
        let Ok(rssi) = parts[2].trim().parse::<i32>() else {
            continue;
        };

        let mut network = RawNetwork {
            ssid: parts.get(4).and_then(|raw| ssid_from_bytes(&unescape_ssid(raw))),
            rssi,
            capabilities: Vec::new(),
            channel: parts[1].trim().parse().ok().and_then(channel_from_frequency),
        };
        apply_flags(&mut network, parts[3]);
        networks.push(network);
    }
    networks
}

/// Reads capabilities out of a flags column like `[WPA2-PSK-CCMP][ESS]`.
fn apply_flags(network: &mut RawNetwork, flags: &str) {
    for flag in flags.split(['[', ']']).filter(|f| !f.is_empty()) {
        if let Some(rest) = flag.strip_prefix("WPA2-").or_else(|| flag.strip_prefix("RSN-")) {
            add_key_mgmt(network, KeyProtocol::Rsn, rest);
        } else if let Some(rest) = flag.strip_prefix("WPA-") {
            add_key_mgmt(network, KeyProtocol::Wpa, rest);
        } else if flag == "WEP" {
            network.add_capability(SecurityCapability::Wep);
        }
    }
}
