use super::bss::BssProperties;
use crate::structs::RawNetwork;
use crate::traits::WifiScanner;
use crate::{Error, Result};
use async_trait::async_trait;
use futures_util::stream::StreamExt;
use std::collections::HashMap;
use zbus::zvariant::{OwnedObjectPath, OwnedValue, Value};
use zbus::{Connection, Proxy};

// D-Bus 常量
const WPA_S_SERVICE: &str = "fi.w1.wpa_supplicant1";
const WPA_S_PATH: &str = "/fi/w1/wpa_supplicant1";
const WPA_S_INTERFACE: &str = "fi.w1.wpa_supplicant1";
const WPA_S_IFACE_INTERFACE: &str = "fi.w1.wpa_supplicant1.Interface";
const WPA_S_BSS_INTERFACE: &str = "fi.w1.wpa_supplicant1.BSS";

/// A scanner that talks to wpa_supplicant over the system bus.
#[derive(Debug, Clone, Default)]
pub struct WpaDbusScanner {
    interface: Option<String>,
}

impl WpaDbusScanner {
    pub fn new(interface: Option<String>) -> Self {
        Self { interface }
    }

    /// Finds the wpa_supplicant object for our interface (the first one
    /// wpa_supplicant manages when none is configured).
    async fn iface_proxy<'a>(&self, conn: &'a Connection) -> Result<Proxy<'a>> {
        let root = Proxy::new(conn, WPA_S_SERVICE, WPA_S_PATH, WPA_S_INTERFACE).await?;
        let paths: Vec<OwnedObjectPath> = root.get_property("Interfaces").await?;

        for path in paths {
            let proxy = Proxy::new(conn, WPA_S_SERVICE, path, WPA_S_IFACE_INTERFACE).await?;
            let ifname: String = proxy.get_property("Ifname").await?;
            match self.interface.as_deref() {
                Some(wanted) if wanted != ifname => continue,
                _ => {
                    tracing::debug!("Using wpa_supplicant interface {}", ifname);
                    return Ok(proxy);
                }
            }
        }

        Err(Error::NoInterface(match &self.interface {
            Some(name) => format!("wpa_supplicant does not manage '{}'", name),
            None => "wpa_supplicant manages no interface".to_string(),
        }))
    }
}

#[async_trait]
impl WifiScanner for WpaDbusScanner {
    fn name(&self) -> &'static str {
        "wpa_dbus"
    }

    async fn scan(&self) -> Result<Vec<RawNetwork>> {
        let conn = Connection::system().await?;
        let iface = self.iface_proxy(&conn).await?;

        // 先订阅 ScanDone，再触发扫描，避免错过信号
        let mut scan_done_stream = iface.receive_signal("ScanDone").await?;

        let mut opts: HashMap<&str, Value<'_>> = HashMap::new();
        opts.insert("Type", Value::from("active"));
        iface
            .call_method("Scan", &(opts,))
            .await
            .map_err(|e| Error::ScanFailed(format!("Scan request rejected: {}", e)))?;

        let Some(signal) = scan_done_stream.next().await else {
            return Err(Error::ScanFailed("ScanDone signal stream closed".to_string()));
        };
        let (success,): (bool,) = signal.body().deserialize()?;
        if !success {
            return Err(Error::ScanFailed("wpa_supplicant reported an unsuccessful scan".to_string()));
        }

        let bss_paths: Vec<OwnedObjectPath> = iface.get_property("BSSs").await?;
        let mut networks = Vec::with_capacity(bss_paths.len());
        for bss_path in bss_paths {
            let bss = Proxy::new(&conn, WPA_S_SERVICE, bss_path, WPA_S_BSS_INTERFACE).await?;
            networks.push(read_bss(&bss).await?.into_raw());
        }
        Ok(networks)
    }
}

async fn read_bss(bss: &Proxy<'_>) -> Result<BssProperties> {
    let wpa: HashMap<String, OwnedValue> = bss.get_property("WPA").await?;
    let rsn: HashMap<String, OwnedValue> = bss.get_property("RSN").await?;

    Ok(BssProperties {
        ssid: bss.get_property("SSID").await?,
        signal: bss.get_property("Signal").await?,
        frequency: bss.get_property("Frequency").await?,
        privacy: bss.get_property("Privacy").await?,
        wpa_key_mgmt: key_mgmt(&wpa)?,
        rsn_key_mgmt: key_mgmt(&rsn)?,
    })
}

/// `WPA` / `RSN` are `a{sv}` dicts; `KeyMgmt` lists suites like `wpa-psk` or `sae`.
fn key_mgmt(ie: &HashMap<String, OwnedValue>) -> Result<Vec<String>> {
    match ie.get("KeyMgmt") {
        Some(value) => Ok(value.try_clone()?.try_into()?),
        None => Ok(Vec::new()),
    }
}
