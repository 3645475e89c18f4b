use crate::backends::iw::IwScanner;
use crate::backends::mock::MockScanner;
use crate::backends::wpa_cli::WpaCliScanner;
use crate::config::{BackendKind, ScannerConfig};
use crate::traits::{UiAssetProvider, WifiScanner};
use crate::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// 根据配置创建扫描后端
pub fn create_scanner(config: &ScannerConfig) -> Result<Arc<dyn WifiScanner>> {
    let scanner: Arc<dyn WifiScanner> = match config.backend {
        BackendKind::WpaCli => Arc::new(WpaCliScanner::new(config.interface.clone(), config.settle)),
        BackendKind::Iw => Arc::new(IwScanner::new(config.interface.clone())),
        // 模拟真实扫描的耗时，便于调试前端的加载状态
        BackendKind::Mock => Arc::new(MockScanner::new().with_delay(Duration::from_secs(2))),
        BackendKind::WpaDbus => create_wpa_dbus(config)?,
    };
    tracing::info!("Scan backend: {}", scanner.name());
    Ok(scanner)
}

#[cfg(feature = "backend_wpa_dbus")]
fn create_wpa_dbus(config: &ScannerConfig) -> Result<Arc<dyn WifiScanner>> {
    Ok(Arc::new(crate::backends::wpa_supplicant_dbus::WpaDbusScanner::new(
        config.interface.clone(),
    )))
}

#[cfg(not(feature = "backend_wpa_dbus"))]
fn create_wpa_dbus(_config: &ScannerConfig) -> Result<Arc<dyn WifiScanner>> {
    Err(crate::Error::Config(
        "backend 'wpa_dbus' requires the backend_wpa_dbus feature".to_string(),
    ))
}

/// Disk provider when `ui_dir` is set (local UI development), embedded assets otherwise.
pub fn create_frontend(ui_dir: Option<&Path>) -> Arc<dyn UiAssetProvider> {
    match ui_dir {
        Some(dir) => {
            tracing::info!("Frontend: serving UI from {}", dir.display());
            Arc::new(crate::frontends::provider_disk::DiskFrontend::new(dir))
        }
        None => {
            tracing::info!("Frontend: serving embedded UI");
            Arc::new(crate::frontends::provider_embed::EmbedFrontend::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(backend: BackendKind) -> ScannerConfig {
        ScannerConfig {
            backend,
            interface: Some("wlan0".to_string()),
            settle: Duration::from_secs(5),
            timeout: None,
        }
    }

    #[test]
    fn builds_each_cli_backend() {
        assert_eq!(create_scanner(&config(BackendKind::WpaCli)).unwrap().name(), "wpa_cli");
        assert_eq!(create_scanner(&config(BackendKind::Iw)).unwrap().name(), "iw");
        assert_eq!(create_scanner(&config(BackendKind::Mock)).unwrap().name(), "mock");
    }

    #[cfg(not(feature = "backend_wpa_dbus"))]
    #[test]
    fn wpa_dbus_needs_feature() {
        let err = create_scanner(&config(BackendKind::WpaDbus)).err().unwrap();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}
