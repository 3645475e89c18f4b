//! Turns one platform scan into the ordered list of [`NetworkRecord`]s.

use crate::classify::{classify_band, classify_security};
use crate::structs::{NetworkRecord, RawNetwork, REDACTED_SSID};
use crate::traits::WifiScanner;
use crate::{Error, Result};
use std::time::Duration;

/// Normalizes a single raw scan result.
pub fn normalize_network(raw: &RawNetwork) -> NetworkRecord {
    let ssid = match raw.ssid.as_deref() {
        Some(ssid) if !ssid.is_empty() => ssid.to_string(),
        // 没有 SSID 通常意味着缺少定位/扫描权限，或者是隐藏网络
        _ => REDACTED_SSID.to_string(),
    };

    NetworkRecord {
        ssid,
        signal_strength: raw.rssi,
        security: classify_security(raw),
        channel: raw.channel.map(|ch| ch.number).unwrap_or(0),
        band: classify_band(raw.channel.as_ref()),
    }
}

/// Normalizes a whole result set, keeping the platform order.
pub fn normalize(raw: &[RawNetwork]) -> Vec<NetworkRecord> {
    raw.iter().map(normalize_network).collect()
}

/// Runs the scanner exactly once and normalizes the result.
///
/// Nothing is retried here. With `timeout` set, a scan that has not finished
/// in time fails with [`Error::ScanTimeout`]; without it a hung scan blocks
/// the caller.
pub async fn scan_once(scanner: &dyn WifiScanner, timeout: Option<Duration>) -> Result<Vec<NetworkRecord>> {
    tracing::debug!("Starting scan with {} backend", scanner.name());

    let raw = match timeout {
        Some(limit) => tokio::time::timeout(limit, scanner.scan())
            .await
            .map_err(|_| Error::ScanTimeout(limit.as_secs()))??,
        None => scanner.scan().await?,
    };

    let records = normalize(&raw);
    tracing::info!("📡 Scan complete, found {} networks.", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::mock::MockScanner;
    use crate::structs::{Band, RawBand, RawChannel, Security, SecurityCapability};

    fn sample() -> Vec<RawNetwork> {
        vec![
            RawNetwork {
                ssid: Some("Office".to_string()),
                rssi: -71,
                capabilities: vec![SecurityCapability::Wpa2Enterprise],
                channel: Some(RawChannel { number: 11, band: RawBand::Band2GHz }),
            },
            RawNetwork {
                ssid: None,
                rssi: -80,
                capabilities: vec![],
                channel: None,
            },
            RawNetwork {
                ssid: Some("HomeNet".to_string()),
                rssi: -52,
                capabilities: vec![SecurityCapability::Wpa2Personal, SecurityCapability::Wpa3Personal],
                channel: Some(RawChannel { number: 36, band: RawBand::Band5GHz }),
            },
        ]
    }

    #[test]
    fn keeps_platform_order_and_maps_fields() {
        let records = normalize(&sample());
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].ssid, "Office");
        assert_eq!(records[0].signal_strength, -71);
        assert_eq!(records[0].security, Security::Wpa2Enterprise);
        assert_eq!(records[0].channel, 11);
        assert_eq!(records[0].band, Band::Band2GHz);

        assert_eq!(records[2].ssid, "HomeNet");
        assert_eq!(records[2].security, Security::Wpa3Personal);
        assert_eq!(records[2].band, Band::Band5GHz);
    }

    #[test]
    fn missing_ssid_gets_placeholder() {
        let records = normalize(&sample());
        assert_eq!(records[1].ssid, REDACTED_SSID);
        assert_eq!(records[1].security, Security::Open);
        assert_eq!(records[1].channel, 0);
        assert_eq!(records[1].band, Band::Unknown);

        let empty = RawNetwork {
            ssid: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(normalize_network(&empty).ssid, "[Redacted/Hidden]");
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw = sample();
        assert_eq!(normalize(&raw), normalize(&raw));
    }

    #[test]
    fn empty_scan_is_empty() {
        assert!(normalize(&[]).is_empty());
    }

    #[tokio::test]
    async fn scan_once_normalizes_backend_output() {
        let scanner = MockScanner::with_networks(sample());
        let records = scan_once(&scanner, None).await.unwrap();
        assert_eq!(records, normalize(&sample()));
    }

    #[tokio::test]
    async fn scan_failure_yields_no_records() {
        let scanner = MockScanner::failing("radio busy");
        let err = scan_once(&scanner, None).await.unwrap_err();
        assert!(matches!(err, Error::ScanFailed(ref msg) if msg == "radio busy"));
    }

    #[tokio::test]
    async fn missing_interface_is_reported() {
        let scanner = MockScanner::no_interface();
        let err = scan_once(&scanner, None).await.unwrap_err();
        assert!(matches!(err, Error::NoInterface(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn hung_scan_times_out() {
        let scanner = MockScanner::with_networks(sample()).with_delay(Duration::from_secs(60));
        let err = scan_once(&scanner, Some(Duration::from_secs(5))).await.unwrap_err();
        assert!(matches!(err, Error::ScanTimeout(5)));
    }
}
