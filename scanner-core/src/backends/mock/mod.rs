use crate::structs::{RawNetwork, SecurityCapability};
use crate::traits::WifiScanner;
use crate::backends::utils::channel_from_frequency;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

#[derive(Debug, Clone)]
enum Outcome {
    Networks(Vec<RawNetwork>),
    ScanFailure(String),
    NoInterface,
}

/// A mock backend for development and tests.
/// It simulates scanning without any real hardware interaction.
#[derive(Debug, Clone)]
pub struct MockScanner {
    outcome: Outcome,
    delay: Duration,
}

impl MockScanner {
    /// A fixed list of fake networks.
    pub fn new() -> Self {
        Self::with_networks(fixture_networks())
    }

    pub fn with_networks(networks: Vec<RawNetwork>) -> Self {
        Self {
            outcome: Outcome::Networks(networks),
            delay: Duration::ZERO,
        }
    }

    /// Every scan fails as if the radio refused it.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::ScanFailure(reason.into()),
            delay: Duration::ZERO,
        }
    }

    /// Every scan fails as if the host had no WiFi hardware.
    pub fn no_interface() -> Self {
        Self {
            outcome: Outcome::NoInterface,
            delay: Duration::ZERO,
        }
    }

    /// Simulated scan duration.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for MockScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WifiScanner for MockScanner {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn scan(&self) -> Result<Vec<RawNetwork>> {
        tracing::debug!("🤖 [MockScanner] Scanning for networks...");
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match &self.outcome {
            Outcome::Networks(networks) => {
                tracing::debug!("🤖 [MockScanner] Found {} networks.", networks.len());
                Ok(networks.clone())
            }
            Outcome::ScanFailure(reason) => Err(Error::ScanFailed(reason.clone())),
            Outcome::NoInterface => Err(Error::NoInterface("mock scanner has no interface".to_string())),
        }
    }
}

fn fake(ssid: Option<&str>, rssi: i32, caps: &[SecurityCapability], freq: u32) -> RawNetwork {
    RawNetwork {
        ssid: ssid.map(str::to_string),
        rssi,
        capabilities: caps.to_vec(),
        channel: channel_from_frequency(freq),
    }
}

fn fixture_networks() -> Vec<RawNetwork> {
    use SecurityCapability::*;
    vec![
        fake(Some("MyHomeWiFi"), -42, &[Wpa2Personal, Wpa3Personal], 5180),
        fake(Some("CafeGuest"), -61, &[], 2437),
        fake(Some("Neighbor's Network"), -78, &[WpaPersonal, Wpa2Personal], 2462),
        fake(Some("CorpNet"), -55, &[Wpa2Enterprise], 5745),
        fake(None, -83, &[Wpa2Personal], 2412),
        fake(Some("Printer-Setup"), -91, &[Wep], 2472),
        fake(Some("NewAP-6E"), -67, &[Wpa3Personal], 6135),
    ]
}
