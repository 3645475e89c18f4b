use crate::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// 编译时嵌入的默认配置
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../configs.toml");

/// Which scan backend to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    WpaCli,
    Iw,
    Mock,
    WpaDbus,
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "wpa_cli" => Ok(BackendKind::WpaCli),
            "iw" => Ok(BackendKind::Iw),
            "mock" => Ok(BackendKind::Mock),
            "wpa_dbus" => Ok(BackendKind::WpaDbus),
            other => Err(Error::Config(format!("unknown backend '{}'", other))),
        }
    }
}

/// 顶层应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scanner: ScannerConfig,
    pub web: WebConfig,
    pub watch: WatchConfig,
}

#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub backend: BackendKind,
    /// `None` picks the first wireless interface.
    pub interface: Option<String>,
    /// How long wpa_cli waits between `scan` and `scan_results`.
    pub settle: Duration,
    /// `None` means a scan may take as long as it takes.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct WebConfig {
    pub bind_addr: SocketAddr,
    pub refresh_interval: Duration,
    /// Serve the UI from this directory instead of the embedded copy.
    pub ui_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub interval: Duration,
}

// ============= TOML 解析用的临时结构 =============

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AppConfigFile {
    scanner: ScannerToml,
    web: WebToml,
    watch: WatchToml,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ScannerToml {
    backend: BackendKind,
    #[serde(default)]
    interface: Option<String>,
    settle_secs: u64,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WebToml {
    bind_addr: String,
    refresh_interval_secs: u64,
    #[serde(default)]
    ui_dir: Option<PathBuf>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WatchToml {
    interval_secs: u64,
}

impl TryFrom<AppConfigFile> for AppConfig {
    type Error = Error;

    fn try_from(t: AppConfigFile) -> Result<Self> {
        let bind_addr = SocketAddr::from_str(&t.web.bind_addr)
            .map_err(|e| Error::Config(format!("invalid web.bind_addr '{}': {}", t.web.bind_addr, e)))?;

        if t.web.refresh_interval_secs == 0 {
            return Err(Error::Config("web.refresh_interval_secs must be positive".to_string()));
        }
        if t.watch.interval_secs == 0 {
            return Err(Error::Config("watch.interval_secs must be positive".to_string()));
        }
        if t.scanner.timeout_secs == Some(0) {
            return Err(Error::Config("scanner.timeout_secs must be positive".to_string()));
        }

        Ok(AppConfig {
            scanner: ScannerConfig {
                backend: t.scanner.backend,
                interface: t.scanner.interface.filter(|name| !name.is_empty()),
                settle: Duration::from_secs(t.scanner.settle_secs),
                timeout: t.scanner.timeout_secs.map(Duration::from_secs),
            },
            web: WebConfig {
                bind_addr,
                refresh_interval: Duration::from_secs(t.web.refresh_interval_secs),
                ui_dir: t.web.ui_dir,
            },
            watch: WatchConfig {
                interval: Duration::from_secs(t.watch.interval_secs),
            },
        })
    }
}

// ============= 配置加载函数 =============

/// 从 TOML 字符串加载应用配置
pub fn load_config_from_toml_str(s: &str) -> Result<AppConfig> {
    let parsed: AppConfigFile = toml::from_str(s)?;
    AppConfig::try_from(parsed)
}

/// Loads `path`, or the embedded defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            let text = std::fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
            load_config_from_toml_str(&text)
        }
        None => load_config_from_toml_str(DEFAULT_CONFIG_TOML),
    }
}
