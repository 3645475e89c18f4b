use crate::structs::RawNetwork;
use async_trait::async_trait;
use std::borrow::Cow;

/// 平台 Wi-Fi 扫描能力。
///
/// `Send + Sync` 约束是必须的，因为它将被用于 Axum 的共享状态 (State) 中。
#[async_trait]
pub trait WifiScanner: Send + Sync {
    /// Short backend name used in log lines.
    fn name(&self) -> &'static str;

    /// Performs one scan and returns every network the radio saw, in the
    /// order the platform reported them.
    ///
    /// Fails with [`crate::Error::NoInterface`] when there is no usable WiFi
    /// interface, and with a scan/command error when the scan itself fails.
    async fn scan(&self) -> crate::Result<Vec<RawNetwork>>;
}

/// 前端资源提供者接口。
#[async_trait]
pub trait UiAssetProvider: Send + Sync {
    /// Retrieves a single UI asset.
    ///
    /// # Arguments
    /// * `path` - The path to the asset (e.g., "index.html", "style.css").
    ///
    /// # Returns
    /// A `Result` containing a tuple of (`Cow<'static, [u8]>`, `String`)
    /// representing the asset's content and its MIME type, or an `Error` if not found.
    async fn get_asset(&self, path: &str) -> crate::Result<(Cow<'static, [u8]>, String)>;
}
